//! Hand-written equivalents of `#[define_variant]` output, for unit tests that can't use
//! the macro from inside this crate.

use crate::{At, DynVariant, Holds, Variant};
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use core::cell::RefCell;

#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Int(i32),
    Float(f64),
    Char(char),
}

impl Variant for Scalar {
    const NAME: &'static str = "Scalar";
    const ALTERNATIVES: &'static [&'static str] = &["i32", "f64", "char"];
    const MAX_SIZE: usize = crate::macro_support::array_max(&[
        core::mem::size_of::<i32>(),
        core::mem::size_of::<f64>(),
        core::mem::size_of::<char>(),
    ]);
    const MAX_ALIGN: usize = crate::macro_support::array_max(&[
        core::mem::align_of::<i32>(),
        core::mem::align_of::<f64>(),
        core::mem::align_of::<char>(),
    ]);

    fn index(&self) -> usize {
        match self {
            Scalar::Int(_) => 0,
            Scalar::Float(_) => 1,
            Scalar::Char(_) => 2,
        }
    }
}

macro_rules! alternative {
    ($ty:ident < $($lt:lifetime)? > :: $v:ident ( $alt:ty ) at $i:literal) => {
        impl<$($lt)?> Holds<$alt> for $ty<$($lt)?> {
            const INDEX: usize = $i;

            fn wrap(value: $alt) -> Self {
                $ty::$v(value)
            }

            #[allow(unreachable_patterns)]
            fn peek(&self) -> Option<&$alt> {
                match self {
                    $ty::$v(value) => Some(value),
                    _ => None,
                }
            }

            #[allow(unreachable_patterns)]
            fn peek_mut(&mut self) -> Option<&mut $alt> {
                match self {
                    $ty::$v(value) => Some(value),
                    _ => None,
                }
            }

            #[allow(unreachable_patterns)]
            fn unwrap_into(self) -> Result<$alt, Self> {
                match self {
                    $ty::$v(value) => Ok(value),
                    other => Err(other),
                }
            }
        }

        impl<$($lt)?> At<$i> for $ty<$($lt)?> {
            type Output = $alt;

            fn peek_at(&self) -> Option<&$alt> {
                <Self as Holds<$alt>>::peek(self)
            }

            fn peek_at_mut(&mut self) -> Option<&mut $alt> {
                <Self as Holds<$alt>>::peek_mut(self)
            }
        }
    };
}

alternative!(Scalar<>::Int(i32) at 0);
alternative!(Scalar<>::Float(f64) at 1);
alternative!(Scalar<>::Char(char) at 2);

impl DynVariant for Scalar {
    fn take_from_any(slot: &mut dyn Any) -> Option<Self> {
        if let Some(value) = slot.downcast_mut::<Option<i32>>() {
            return value.take().map(Scalar::Int);
        }
        if let Some(value) = slot.downcast_mut::<Option<f64>>() {
            return value.take().map(Scalar::Float);
        }
        if let Some(value) = slot.downcast_mut::<Option<char>>() {
            return value.take().map(Scalar::Char);
        }
        None
    }

    fn from_any_box(value: Box<dyn Any>) -> Result<Self, Box<dyn Any>> {
        let value = match value.downcast::<i32>() {
            Ok(value) => return Ok(Scalar::Int(*value)),
            Err(value) => value,
        };
        let value = match value.downcast::<f64>() {
            Ok(value) => return Ok(Scalar::Float(*value)),
            Err(value) => value,
        };
        match value.downcast::<char>() {
            Ok(value) => Ok(Scalar::Char(*value)),
            Err(value) => Err(value),
        }
    }
}

/// Pushes its id onto the log when dropped.
pub struct Probe<'a> {
    id: u32,
    log: &'a RefCell<Vec<u32>>,
}

impl<'a> Probe<'a> {
    pub fn new(id: u32, log: &'a RefCell<Vec<u32>>) -> Self {
        Probe { id, log }
    }
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        self.log.borrow_mut().push(self.id);
    }
}

pub enum Tracked<'a> {
    Int(i32),
    Probe(Probe<'a>),
}

impl<'a> Variant for Tracked<'a> {
    const NAME: &'static str = "Tracked";
    const ALTERNATIVES: &'static [&'static str] = &["i32", "Probe<'a>"];
    const MAX_SIZE: usize = crate::macro_support::array_max(&[
        core::mem::size_of::<i32>(),
        core::mem::size_of::<Probe<'a>>(),
    ]);
    const MAX_ALIGN: usize = crate::macro_support::array_max(&[
        core::mem::align_of::<i32>(),
        core::mem::align_of::<Probe<'a>>(),
    ]);

    fn index(&self) -> usize {
        match self {
            Tracked::Int(_) => 0,
            Tracked::Probe(_) => 1,
        }
    }
}

alternative!(Tracked<'a>::Int(i32) at 0);
alternative!(Tracked<'a>::Probe(Probe<'a>) at 1);
