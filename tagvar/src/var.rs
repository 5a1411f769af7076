//! A variant that may be empty.
//!
//! A [`Variant`] always holds one of its alternatives. [`Var<V>`] adds the state "nothing
//! was ever assigned", which is where a variant lives between being declared and being
//! given its first value. Nothing is dropped when an empty `Var` is reassigned or goes
//! out of scope.

use alloc::boxed::Box;
use core::any::Any;
use log::{debug, trace};

use crate::{At, DynVariant, Error, Holds, Result, Variant};

/// A variant over `V`'s alternatives, which may also be empty.
///
/// # Examples
///
/// ```
/// use tagvar::prelude::*;
/// use tagvar_macro::define_variant;
///
/// #[define_variant]
/// #[derive(Clone, Debug, PartialEq)]
/// enum Scalar {
///     Int(i32),
///     Float(f64),
///     Char(char),
/// }
///
/// let mut g: Var<Scalar> = Var::new();
/// assert_eq!(g.index(), None);
/// assert!(g.get::<i32>().is_err());
///
/// g.set(-981i32);
/// let v = g.clone();
/// assert_eq!(v.get::<i32>(), Ok(&-981));
/// assert_eq!(v.get_at::<0>(), Ok(&-981));
/// ```
///
/// Copies only go between variants over the same alternatives. A variant with a different
/// alternative list is a different type, even where the lists overlap:
///
/// ```compile_fail
/// use tagvar::prelude::*;
/// use tagvar_macro::define_variant;
///
/// #[define_variant]
/// #[derive(Clone)]
/// enum Scalar {
///     Int(i32),
///     Float(f64),
///     Char(char),
/// }
///
/// #[define_variant]
/// #[derive(Clone)]
/// enum Narrow {
///     Int(i32),
///     Char(char),
/// }
///
/// let mut w: Var<Narrow> = Var::from_value('c');
/// w.clone_from(&Var::<Scalar>::from_value(-981i32));
/// ```
///
/// ```compile_fail
/// use tagvar::prelude::*;
/// use tagvar_macro::define_variant;
///
/// #[define_variant]
/// #[derive(Clone)]
/// enum Scalar {
///     Int(i32),
///     Char(char),
/// }
///
/// #[define_variant]
/// #[derive(Clone)]
/// enum Narrow {
///     Int(i32),
///     Char(char),
/// }
///
/// let g = Scalar::from(-981i32);
/// let v: Narrow = g.clone();
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Var<V> {
    slot: Option<V>,
}

impl<V> Default for Var<V> {
    fn default() -> Self {
        Var { slot: None }
    }
}

impl<V> Var<V> {
    /// An empty variant. Nothing is stored and nothing will be dropped.
    pub const fn new() -> Self {
        Var { slot: None }
    }

    /// Returns true once a value has been assigned, until the next [`Var::clear`] or
    /// [`Var::take`].
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.slot.is_some()
    }

    /// The stored variant, if any.
    #[inline]
    pub fn as_variant(&self) -> Option<&V> {
        self.slot.as_ref()
    }

    /// The stored variant, mutably, if any.
    #[inline]
    pub fn as_variant_mut(&mut self) -> Option<&mut V> {
        self.slot.as_mut()
    }

    /// Moves the stored variant out, leaving `self` empty.
    #[inline]
    pub fn take(&mut self) -> Option<V> {
        self.slot.take()
    }

    /// Consumes `self`, returning the stored variant, if any.
    #[inline]
    pub fn into_inner(self) -> Option<V> {
        self.slot
    }
}

impl<V: Variant> Var<V> {
    /// A variant holding `value`.
    pub fn from_value<T>(value: T) -> Self
    where
        V: Holds<T>,
    {
        Var {
            slot: Some(V::wrap(value)),
        }
    }

    /// The tag, or `None` if empty.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.slot.as_ref().map(V::index)
    }

    /// Name of the active alternative, or `None` if empty.
    #[inline]
    pub fn alternative_name(&self) -> Option<&'static str> {
        self.slot.as_ref().map(V::alternative_name)
    }

    /// Stores `value`, dropping the previously held value first.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagvar::prelude::*;
    /// use tagvar_macro::define_variant;
    ///
    /// #[define_variant]
    /// enum Slot {
    ///     Count(u32),
    ///     Label(String),
    /// }
    ///
    /// let mut v: Var<Slot> = Var::new();
    /// v.set(String::from("a"));
    /// v.set(3u32);
    /// assert_eq!(v.alternative_name(), Some("u32"));
    /// ```
    pub fn set<T>(&mut self, value: T)
    where
        V: Holds<T>,
    {
        if let Some(old) = self.slot.take() {
            trace!(
                "{}: dropping `{}` before storing `{}`",
                V::NAME,
                old.alternative_name(),
                crate::alternative_name::<V>(<V as Holds<T>>::INDEX).unwrap_or("?")
            );
            drop(old);
        }
        self.slot = Some(V::wrap(value));
    }

    /// Stores `value` and returns the previously held variant instead of dropping it.
    pub fn replace<T>(&mut self, value: T) -> Option<V>
    where
        V: Holds<T>,
    {
        trace!(
            "{}: replacing with `{}`",
            V::NAME,
            crate::alternative_name::<V>(<V as Holds<T>>::INDEX).unwrap_or("?")
        );
        self.slot.replace(V::wrap(value))
    }

    /// Stores an already-built variant, dropping the previously held value first.
    pub fn set_variant(&mut self, value: V) {
        self.clear();
        self.slot = Some(value);
    }

    /// Drops the held value, if any, and returns to the empty state.
    pub fn clear(&mut self) {
        if let Some(old) = self.slot.take() {
            trace!("{}: clearing `{}`", V::NAME, old.alternative_name());
        }
    }

    /// Shared access by type.
    ///
    /// # Errors
    ///
    /// [`Error::Mismatch`] if `T` is not active, including when `self` is empty.
    #[inline]
    pub fn get<T>(&self) -> Result<&T>
    where
        V: Holds<T>,
    {
        match &self.slot {
            Some(v) => v.get::<T>(),
            None => Err(Error::mismatch::<V>(<V as Holds<T>>::INDEX, None)),
        }
    }

    /// Mutable access by type.
    ///
    /// # Errors
    ///
    /// [`Error::Mismatch`] if `T` is not active, including when `self` is empty.
    #[inline]
    pub fn get_mut<T>(&mut self) -> Result<&mut T>
    where
        V: Holds<T>,
    {
        match &mut self.slot {
            Some(v) => v.get_mut::<T>(),
            None => Err(Error::mismatch::<V>(<V as Holds<T>>::INDEX, None)),
        }
    }

    /// Shared access by index.
    ///
    /// # Errors
    ///
    /// [`Error::Mismatch`] if `N` is not the tag, including when `self` is empty.
    #[inline]
    pub fn get_at<const N: usize>(&self) -> Result<&<V as At<N>>::Output>
    where
        V: At<N>,
    {
        match &self.slot {
            Some(v) => v.get_at::<N>(),
            None => Err(Error::mismatch::<V>(N, None)),
        }
    }

    /// Mutable access by index.
    ///
    /// # Errors
    ///
    /// [`Error::Mismatch`] if `N` is not the tag, including when `self` is empty.
    #[inline]
    pub fn get_at_mut<const N: usize>(&mut self) -> Result<&mut <V as At<N>>::Output>
    where
        V: At<N>,
    {
        match &mut self.slot {
            Some(v) => v.get_at_mut::<N>(),
            None => Err(Error::mismatch::<V>(N, None)),
        }
    }
}

impl<V: DynVariant> Var<V> {
    /// Stores `value` if its type is an alternative, checked at runtime.
    ///
    /// # Errors
    ///
    /// [`Error::NotAnAlternative`] if `T` is not an alternative. `self` is left unchanged
    /// and `value` is dropped.
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
    /// let mut v = Var::<Scalar>::from_value('c');
    /// assert!(v.try_set_any(1.5f32).is_err());
    /// assert_eq!(v.get::<char>(), Ok(&'c'));
    /// v.try_set_any(4i32).unwrap();
    /// assert_eq!(v.get::<i32>(), Ok(&4));
    /// ```
    pub fn try_set_any<T: Any>(&mut self, value: T) -> Result<()> {
        match V::try_from_any(value) {
            Ok(v) => {
                self.set_variant(v);
                Ok(())
            }
            Err(e) => {
                debug!("{}", e);
                Err(e)
            }
        }
    }

    /// Stores a boxed value if its type is an alternative, checked at runtime.
    ///
    /// # Errors
    ///
    /// [`Error::NotAnAlternative`] if the boxed type is not an alternative. `self` is left
    /// unchanged.
    pub fn try_set_box(&mut self, value: Box<dyn Any>) -> Result<()> {
        let v = V::try_from_box(value).map_err(|e| {
            debug!("{}", e);
            e
        })?;
        self.set_variant(v);
        Ok(())
    }
}

impl<V> From<V> for Var<V> {
    fn from(value: V) -> Self {
        Var { slot: Some(value) }
    }
}
