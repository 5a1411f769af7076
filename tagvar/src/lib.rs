//! # `tagvar`
//! Closed, type-checked variants over a fixed set of alternatives.
//!
//! 1. [Summary](#summary)
//! 1. [Examples](#examples)
//! 1. [Overview of types](#overview-of-types)
//! 1. [What is checked at compile time](#what-is-checked-at-compile-time)
//! 1. [Feature flags](#feature-flags)
//!
//! # Summary
//!
//! A *variant* is a single value that holds exactly one of a fixed list of alternative
//! types, and remembers which one. `tagvar` lets you declare such a value as an ordinary
//! Rust enum with one tuple field per alternative, and then gives you typed and indexed
//! access to it: `v.get::<char>()` or `v.get_at::<2>()`.
//!
//! The storage is the enum itself, so the compiler sizes it for the largest alternative
//! and keeps the discriminant in sync with the payload. Assigning a new alternative drops
//! the old one, and dropping the variant drops whatever it holds. There is no path that
//! reads the payload under a type other than the active one: a request for the wrong
//! alternative returns [`Error::Mismatch`].
//!
//! # Examples
//!
//! ```
//! use tagvar::prelude::*;
//! use tagvar_macro::define_variant;
//!
//! #[define_variant]
//! #[derive(Clone, Debug, PartialEq)]
//! pub enum Scalar {
//!     Int(i32),
//!     Float(f64),
//!     Char(char),
//! }
//!
//! let mut v = Scalar::from('c');
//! assert_eq!(v.get::<char>(), Ok(&'c'));
//!
//! // Writing through the reference mutates the variant in place.
//! *v.get_mut::<char>().unwrap() = 'l';
//! assert_eq!(v.get_at::<{ scalar::CHAR }>(), Ok(&'l'));
//!
//! // Asking for an alternative that isn't active is an error, never a bad read.
//! assert!(v.get::<i32>().is_err());
//!
//! // Assignment replaces the active alternative.
//! v.assign(-981i32);
//! assert_eq!(v.get_at::<0>(), Ok(&-981));
//! assert_eq!(v.alternative_name(), "i32");
//!
//! // A variant that starts out empty.
//! let mut slot: Var<Scalar> = Var::new();
//! assert!(!slot.is_initialized());
//! slot.set(2.5f64);
//! assert_eq!(slot.get::<f64>(), Ok(&2.5));
//! ```
//!
//! # Overview of types
//!
//! | Name                           | Role                                                                |
//! |--------------------------------|---------------------------------------------------------------------|
//! | [`Variant`]                    | Implemented for every `#[define_variant]` enum. Tag and accessors.  |
//! | [`Holds<T>`]                   | "`T` is an alternative": type to index lookup.                      |
//! | [`At<N>`]                      | "The alternative at index `N`": index to type lookup.               |
//! | [`DynVariant`]                 | Construction from values whose type is only known at runtime.       |
//! | [`Var<V>`][crate::var::Var]    | A variant that may also be empty, i.e. never assigned.              |
//! | [`Error`]                      | The two failure kinds: not an alternative, and not active.          |
//!
//! # What is checked at compile time
//!
//! `#[define_variant]` rejects alternatives that are arrays, slices, references, `()` or
//! `!`, as well as duplicated alternative types. Asking for `get::<T>()` where `T` is not
//! an alternative, or `get_at::<N>()` where `N` is out of range, does not compile, because
//! the corresponding [`Holds<T>`] or [`At<N>`] impl does not exist. Two variants with
//! different alternative lists are different types, so one can never be copied into the
//! other.
//!
//! # Feature flags
//!
//! * `macro`. Re-exports the procedural macro [`#[define_variant]`][crate::define_variant]
//!   from this crate. Adds a dependency on `tagvar_macro`, `syn` and `quote`.
//!

#![no_std]
extern crate alloc;

#[cfg(any(doc, test))]
extern crate std;

pub mod error;
#[doc(hidden)]
pub mod macro_support;
pub mod prelude;
pub mod var;

#[cfg(test)]
mod test_type;

use alloc::boxed::Box;
use core::any::Any;

pub use error::{Error, Result};
pub use var::Var;
#[cfg(feature = "macro")]
pub use tagvar_macro::define_variant;

/// The fundamental trait for variant types.
///
/// A `Variant` is a closed sum over a fixed list of alternative types. The list is ordered;
/// the position of an alternative in the list is its *index*, and the index of the
/// alternative currently held is the variant's *tag*, reported by [`Variant::index`].
///
/// You are not expected to implement this trait by hand. Use
/// [`#[define_variant]`][crate::define_variant], which also implements [`Holds<T>`] for
/// every alternative `T` and [`At<N>`] for every index `N`.
///
/// # Examples
///
/// ```
/// use tagvar::prelude::*;
/// use tagvar_macro::define_variant;
///
/// #[define_variant]
/// enum Shape {
///     Circle(f32),
///     Rect((f32, f32)),
/// }
///
/// assert_eq!(Shape::NAME, "Shape");
/// assert_eq!(Shape::ALTERNATIVES, &["f32", "(f32, f32)"]);
/// assert_eq!(Shape::MAX_SIZE, std::mem::size_of::<(f32, f32)>());
///
/// let s = Shape::from((1.0f32, 2.0f32));
/// assert_eq!(s.index(), 1);
/// assert!(s.holds::<(f32, f32)>());
/// assert!(!s.holds::<f32>());
/// ```
pub trait Variant: Sized {
    /// The name of the variant type, for diagnostics.
    const NAME: &'static str;

    /// Names of the alternative types, in index order.
    const ALTERNATIVES: &'static [&'static str];

    /// The largest `size_of` among the alternatives.
    const MAX_SIZE: usize;

    /// The largest `align_of` among the alternatives.
    const MAX_ALIGN: usize;

    /// The tag: index of the alternative currently held.
    ///
    /// Always less than `Self::ALTERNATIVES.len()`.
    fn index(&self) -> usize;

    /// Name of the alternative currently held.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagvar::prelude::*;
    /// use tagvar_macro::define_variant;
    ///
    /// #[define_variant]
    /// enum Id {
    ///     Number(u64),
    ///     Name(String),
    /// }
    ///
    /// assert_eq!(Id::from(String::from("x")).alternative_name(), "String");
    /// ```
    fn alternative_name(&self) -> &'static str {
        alternative_name::<Self>(self.index()).unwrap_or("?")
    }

    /// Returns true if the active alternative is `T`.
    #[inline]
    fn holds<T>(&self) -> bool
    where
        Self: Holds<T>,
    {
        self.index() == <Self as Holds<T>>::INDEX
    }

    /// Shared access to the active alternative, by type.
    ///
    /// # Errors
    ///
    /// [`Error::Mismatch`] if `T` is not the active alternative.
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
    /// assert_eq!(v.get::<i32>(), Ok(&-981));
    /// assert!(v.get::<char>().is_err());
    /// ```
    #[inline]
    fn get<T>(&self) -> Result<&T>
    where
        Self: Holds<T>,
    {
        match <Self as Holds<T>>::peek(self) {
            Some(value) => Ok(value),
            None => Err(Error::mismatch::<Self>(
                <Self as Holds<T>>::INDEX,
                Some(self.index()),
            )),
        }
    }

    /// Mutable access to the active alternative, by type.
    ///
    /// Writing through the returned reference mutates the variant in place; the tag
    /// doesn't change.
    ///
    /// # Errors
    ///
    /// [`Error::Mismatch`] if `T` is not the active alternative.
    #[inline]
    fn get_mut<T>(&mut self) -> Result<&mut T>
    where
        Self: Holds<T>,
    {
        let active = self.index();
        <Self as Holds<T>>::peek_mut(self)
            .ok_or_else(|| Error::mismatch::<Self>(<Self as Holds<T>>::INDEX, Some(active)))
    }

    /// Shared access to the active alternative, by index.
    ///
    /// # Errors
    ///
    /// [`Error::Mismatch`] if `N` is not the tag.
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
    /// let v = Scalar::from('c');
    /// assert_eq!(v.get_at::<1>(), Ok(&'c'));
    /// assert!(v.get_at::<0>().is_err());
    /// ```
    #[inline]
    fn get_at<const N: usize>(&self) -> Result<&<Self as At<N>>::Output>
    where
        Self: At<N>,
    {
        match <Self as At<N>>::peek_at(self) {
            Some(value) => Ok(value),
            None => Err(Error::mismatch::<Self>(N, Some(self.index()))),
        }
    }

    /// Mutable access to the active alternative, by index.
    ///
    /// # Errors
    ///
    /// [`Error::Mismatch`] if `N` is not the tag.
    #[inline]
    fn get_at_mut<const N: usize>(&mut self) -> Result<&mut <Self as At<N>>::Output>
    where
        Self: At<N>,
    {
        let active = self.index();
        <Self as At<N>>::peek_at_mut(self).ok_or_else(|| Error::mismatch::<Self>(N, Some(active)))
    }

    /// Replaces the active alternative with `value`.
    ///
    /// The previously held value is dropped first, then `value` is stored and the tag
    /// becomes `<Self as Holds<T>>::INDEX`.
    #[inline]
    fn assign<T>(&mut self, value: T)
    where
        Self: Holds<T>,
    {
        *self = <Self as Holds<T>>::wrap(value);
    }

    /// Moves the active alternative out, if it is `T`. Otherwise gives `self` back.
    #[inline]
    fn into_alternative<T>(self) -> core::result::Result<T, Self>
    where
        Self: Holds<T>,
    {
        <Self as Holds<T>>::unwrap_into(self)
    }
}

/// `T` is one of the alternatives of `Self`.
///
/// This is the type to index lookup: [`Holds::INDEX`] is the position of `T` in the
/// alternative list. It only exists for types that are alternatives, so requesting any
/// other type is a compile error.
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
///     Float(f64),
///     Char(char),
/// }
///
/// assert_eq!(<Scalar as Holds<i32>>::INDEX, 0);
/// assert_eq!(<Scalar as Holds<char>>::INDEX, 2);
/// ```
///
/// ```compile_fail
/// use tagvar::prelude::*;
/// use tagvar_macro::define_variant;
///
/// #[define_variant]
/// enum Scalar {
///     Int(i32),
///     Char(char),
/// }
///
/// let _ = <Scalar as Holds<u8>>::INDEX;
/// ```
pub trait Holds<T>: Variant {
    /// Position of `T` in the alternative list.
    const INDEX: usize;

    /// Builds a variant holding `value`.
    fn wrap(value: T) -> Self;

    /// The value, if `T` is the active alternative.
    fn peek(&self) -> Option<&T>;

    /// The value, mutably, if `T` is the active alternative.
    fn peek_mut(&mut self) -> Option<&mut T>;

    /// Moves the value out if `T` is the active alternative, otherwise returns `self`.
    fn unwrap_into(self) -> core::result::Result<T, Self>;
}

/// The alternative at index `N` of `Self`.
///
/// This is the index to type lookup, the inverse of [`Holds::INDEX`]: for every
/// alternative `T` at position `i`, `<Self as At<i>>::Output` is `T`. Indices past the
/// end of the list have no impl.
///
/// ```compile_fail
/// use tagvar::prelude::*;
/// use tagvar_macro::define_variant;
///
/// #[define_variant]
/// enum Scalar {
///     Int(i32),
///     Char(char),
/// }
///
/// let v = Scalar::from(1i32);
/// let _ = v.get_at::<2>();
/// ```
pub trait At<const N: usize>: Variant {
    /// The alternative type at position `N`.
    type Output;

    /// The value, if `N` is the tag.
    fn peek_at(&self) -> Option<&Self::Output>;

    /// The value, mutably, if `N` is the tag.
    fn peek_at_mut(&mut self) -> Option<&mut Self::Output>;
}

/// Construction of a variant from a value whose type is only known at runtime.
///
/// This is the one place where "not an alternative" is a runtime failure instead of a
/// compile error. Generated by [`#[define_variant]`][crate::define_variant] when all
/// alternatives are `'static`.
///
/// # Examples
///
/// ```
/// use tagvar::prelude::*;
/// use tagvar_macro::define_variant;
///
/// #[define_variant]
/// #[derive(Debug, PartialEq)]
/// enum Scalar {
///     Int(i32),
///     Char(char),
/// }
///
/// assert_eq!(Scalar::try_from_any(7i32), Ok(Scalar::Int(7)));
/// let err = Scalar::try_from_any(7u8).unwrap_err();
/// assert_eq!(err, Error::NotAnAlternative { variant: "Scalar", requested: "u8" });
///
/// let boxed: Box<dyn std::any::Any> = Box::new('x');
/// assert_eq!(Scalar::try_from_box(boxed).ok(), Some(Scalar::Char('x')));
/// ```
pub trait DynVariant: Variant {
    /// Takes the value out of `slot` if `slot` is an `Option<T>` for some alternative `T`.
    ///
    /// Returns `None`, leaving `slot` untouched, for any other type.
    fn take_from_any(slot: &mut dyn Any) -> Option<Self>;

    /// Unboxes `value` into the alternative of the same type, or gives it back.
    fn from_any_box(value: Box<dyn Any>) -> core::result::Result<Self, Box<dyn Any>>;

    /// Builds a variant from `value`, checking at runtime that `T` is an alternative.
    ///
    /// # Errors
    ///
    /// [`Error::NotAnAlternative`] if `T` is not an alternative. `value` is dropped.
    fn try_from_any<T: Any>(value: T) -> Result<Self> {
        let mut slot = Some(value);
        Self::take_from_any(&mut slot)
            .ok_or_else(|| Error::not_an_alternative::<Self>(core::any::type_name::<T>()))
    }

    /// Builds a variant from a boxed value of unknown type.
    ///
    /// # Errors
    ///
    /// [`Error::NotAnAlternative`] if the boxed value is not of an alternative type.
    fn try_from_box(value: Box<dyn Any>) -> Result<Self> {
        Self::from_any_box(value).map_err(|_| Error::not_an_alternative::<Self>("dyn Any"))
    }
}

/// Name of the alternative at `index`, or `None` if `index` is out of range.
///
/// The runtime counterpart of [`At<N>`], for diagnostics.
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
/// assert_eq!(tagvar::alternative_name::<Scalar>(1), Some("char"));
/// assert_eq!(tagvar::alternative_name::<Scalar>(2), None);
/// ```
#[inline]
pub fn alternative_name<V: Variant>(index: usize) -> Option<&'static str> {
    V::ALTERNATIVES.get(index).copied()
}

/// Shared access by type. Same as [`Variant::get`].
#[inline]
pub fn get<T, V: Holds<T>>(v: &V) -> Result<&T> {
    v.get::<T>()
}

/// Mutable access by type. Same as [`Variant::get_mut`].
#[inline]
pub fn get_mut<T, V: Holds<T>>(v: &mut V) -> Result<&mut T> {
    v.get_mut::<T>()
}

/// Shared access by index. Same as [`Variant::get_at`].
#[inline]
pub fn get_at<const N: usize, V: At<N>>(v: &V) -> Result<&V::Output> {
    v.get_at::<N>()
}

/// Mutable access by index. Same as [`Variant::get_at_mut`].
#[inline]
pub fn get_at_mut<const N: usize, V: At<N>>(v: &mut V) -> Result<&mut V::Output> {
    v.get_at_mut::<N>()
}
