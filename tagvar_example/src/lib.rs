#![allow(dead_code)]
#![deny(missing_docs)]
//! Example variants generated by `#[define_variant]`, a demonstration type with observable
//! drops, and a scripted session that uses both.

use tagvar::prelude::*;

pub mod probe;
pub mod walkthrough;

use probe::Probe;

#[define_variant]
/// A plain-data variant: an integer, a float or a character.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// A signed 32-bit integer.
    Int(i32),
    /// A double-precision float.
    Float(f64),
    /// A character.
    Char(char),
}

#[define_variant]
/// A variant where one alternative owns a resource.
#[derive(Clone, Debug, PartialEq)]
pub enum IntOrProbe {
    /// A number.
    Int(i32),
    /// A probe, whose drop is recorded in its ledger.
    Probe(Probe),
}

#[define_variant]
/// Two resource-owning alternatives, to watch one being replaced by the other.
#[derive(Clone, Debug)]
pub enum ProbeOrPair {
    /// One probe.
    Single(Probe),
    /// Two probes.
    Pair((Probe, Probe)),
}

#[define_variant]
/// A generic variant.
#[derive(Clone, Debug, PartialEq)]
pub enum OneOrMany<T> {
    /// A single item. No `From<T>` is generated for this one.
    One(T),
    /// Several items.
    Many(Vec<T>),
}

pub mod pixel {
    //! A variant exported from a module, next to its companion module `format`.
    use tagvar::prelude::*;

    #[define_variant]
    /// Storage format of one pixel.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub enum Format {
        /// 8-bit grey.
        Grey(u8),
        /// Packed RGBA.
        Rgba(u32),
    }
}
