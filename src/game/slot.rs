//! Equipment slots and equipment descriptors.
//!
//! The ten overridable slots are the five equipment pieces followed by the
//! five accessories; slot indices beyond 9 belong to non-equipment draw
//! parts and never take part in override resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Model set id, the 4-digit number embedded in equipment paths.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetId(pub u16);

/// Variant id selecting a row in a set's variant table.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variant(pub u8);

/// Set and variant for one equipped piece.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EquipmentDescriptor {
    pub set: SetId,
    pub variant: Variant,
}

/// The ten equipment slots, in draw-slot order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum EquipSlot {
    Head,
    Body,
    Hands,
    Legs,
    Feet,
    Ears,
    Neck,
    Wrists,
    RFinger,
    LFinger,
}

impl EquipSlot {
    pub const COUNT: u32 = 10;

    /// Slot for a raw draw-slot index, if it is one of the ten.
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::Head),
            1 => Some(Self::Body),
            2 => Some(Self::Hands),
            3 => Some(Self::Legs),
            4 => Some(Self::Feet),
            5 => Some(Self::Ears),
            6 => Some(Self::Neck),
            7 => Some(Self::Wrists),
            8 => Some(Self::RFinger),
            9 => Some(Self::LFinger),
            _ => None,
        }
    }

    pub fn to_index(self) -> u32 {
        match self {
            Self::Head => 0,
            Self::Body => 1,
            Self::Hands => 2,
            Self::Legs => 3,
            Self::Feet => 4,
            Self::Ears => 5,
            Self::Neck => 6,
            Self::Wrists => 7,
            Self::RFinger => 8,
            Self::LFinger => 9,
        }
    }

    /// Accessories live in their own set directories and availability file.
    pub fn is_accessory(self) -> bool {
        self.to_index() >= 5
    }

    /// File-name suffix used in model and material names for this slot.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Head => "met",
            Self::Body => "top",
            Self::Hands => "glv",
            Self::Legs => "dwn",
            Self::Feet => "sho",
            Self::Ears => "ear",
            Self::Neck => "nek",
            Self::Wrists => "wrs",
            Self::RFinger => "rir",
            Self::LFinger => "ril",
        }
    }

    /// Index of this slot inside its variant-table part block.
    ///
    /// Equipment and accessory tables each hold five parts in draw order.
    pub fn imc_part_index(self) -> usize {
        (self.to_index() % 5) as usize
    }
}

impl fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}
