mod alpha;
mod catalog;
mod error;
mod machine;
mod mapper;
mod pairs;
mod rotor;
mod settings;
mod stepping;

pub use {
    alpha::{char_to_index, index_to_char, index_to_number},
    catalog::{catalog, Catalog, Wheel},
    error::*,
    machine::*,
    mapper::Mapper,
    settings::Settings,
};

/// Letters on each wheel.
pub const LETTER_COUNT: usize = 26;

/// Rotor slots in the machine, slowest first.
pub const ROTOR_COUNT: usize = 4;

/// Editable plugboard pair slots.
pub const PLUG_COUNT: usize = 13;

/// Editable reflector pair slots. A reconfigurable reflector carries one
/// further hardwired pair on top of these.
pub const PAIR_COUNT: usize = 12;

/// The historical wheel sets the catalog is partitioned into.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Debug,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
pub enum WheelSet {
    Commercial,
    Rocket,
    SwissK,
    M3,
    M4,
}

/// Machine position a rotor is fitted into. The slow slot only takes part
/// when the fourth wheel is enabled and never advances automatically.
#[repr(usize)]
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Debug,
    strum::Display,
    strum::EnumIter,
    strum::FromRepr,
)]
pub enum RotorSlot {
    Slow,
    Left,
    Middle,
    Right,
}

impl RotorSlot {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Traversal direction through a substitution. For Rotor I of Enigma I the
/// letter A maps to E right-to-left, but E maps to L left-to-right. A
/// mapping for which both directions agree is a reflector.
#[derive(Clone, Copy, PartialEq, Eq, Debug, strum::Display)]
pub enum Direction {
    RightToLeft,
    LeftToRight,
}
