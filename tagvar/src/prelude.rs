//! Single module with almost all `tagvar` exports
//!
//! # Examples
//!
//! Import all into current scope:
//!
//! ```
//! use tagvar::prelude::*;
//! ```
//!
//! Import all, named:
//!
//! ```
//! use tagvar::prelude as tv;
//! ```

#[cfg(feature = "macro")]
pub use crate::define_variant;
pub use crate::var::Var;
pub use crate::{At, DynVariant, Error, Holds, Variant};
