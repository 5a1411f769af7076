//! Errors reported by variant construction and access.

use crate::Variant;

/// Result type for fallible variant operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Failure of a variant operation.
///
/// Both kinds are ordinary, recoverable errors: the variant is left exactly as it was.
///
/// # Examples
///
/// ```
/// use tagvar::prelude::*;
/// use tagvar_macro::define_variant;
///
/// #[define_variant]
/// enum Scalar {
///     Int(i32),
///     Char(char),
/// }
///
/// let v = Scalar::from(-981i32);
/// let err = v.get::<char>().unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "cannot access alternative `char` of `Scalar`: active alternative is `i32`",
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A value offered at runtime is not of any alternative type.
    #[error("`{requested}` is not an alternative of `{variant}`")]
    NotAnAlternative {
        /// Name of the variant type.
        variant: &'static str,
        /// Name of the offered type.
        requested: &'static str,
    },

    /// An access named an alternative that isn't the active one.
    #[error(
        "cannot access alternative `{requested}` of `{variant}`: {}",
        ActiveDescription(.active)
    )]
    Mismatch {
        /// Name of the variant type.
        variant: &'static str,
        /// Name of the requested alternative.
        requested: &'static str,
        /// Name of the active alternative, or `None` if nothing was ever assigned.
        active: Option<&'static str>,
    },
}

impl Error {
    pub(crate) fn mismatch<V: Variant>(requested: usize, active: Option<usize>) -> Self {
        Error::Mismatch {
            variant: V::NAME,
            requested: crate::alternative_name::<V>(requested).unwrap_or("?"),
            active: active.map(|i| crate::alternative_name::<V>(i).unwrap_or("?")),
        }
    }

    pub(crate) fn not_an_alternative<V: Variant>(requested: &'static str) -> Self {
        Error::NotAnAlternative {
            variant: V::NAME,
            requested,
        }
    }

    /// Name of the variant type the error was reported for.
    pub fn variant(&self) -> &'static str {
        match self {
            Error::NotAnAlternative { variant, .. } | Error::Mismatch { variant, .. } => *variant,
        }
    }
}

struct ActiveDescription<'a>(&'a Option<&'static str>);

impl core::fmt::Display for ActiveDescription<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self.0 {
            Some(name) => write!(f, "active alternative is `{}`", name),
            None => f.write_str("no value was ever assigned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_type::Scalar;
    use alloc::string::ToString;

    #[test]
    fn messages() {
        assert_eq!(
            Error::mismatch::<Scalar>(2, None).to_string(),
            "cannot access alternative `char` of `Scalar`: no value was ever assigned"
        );
        assert_eq!(
            Error::not_an_alternative::<Scalar>("u8").to_string(),
            "`u8` is not an alternative of `Scalar`"
        );
    }

    #[test]
    fn variant_name() {
        assert_eq!(Error::mismatch::<Scalar>(0, Some(1)).variant(), "Scalar");
    }
}
