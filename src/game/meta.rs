//! Override metadata tables consumed by the resolver.
//!
//! A collection's meta cache answers two questions during path resolution:
//! whether a set has race-specific model data for a slot (equipment
//! availability), and which skeleton set a customization or equipment set
//! maps to (extra skeletons). Both are read-only lookups; building the
//! tables is the host's concern.

use crate::game::race::GenderRace;
use crate::game::slot::{EquipSlot, SetId};

/// Equipment-availability bitmask for one race and set.
///
/// Five parts of two bits each, in draw order within the equipment or
/// accessory group: bit 0 of a part is the material flag, bit 1 the model
/// flag.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EqdpEntry(pub u16);

/// Material/model availability flags for a single slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EqdpSlotBits {
    pub material: bool,
    pub model: bool,
}

impl EqdpEntry {
    /// Availability flags for `slot`.
    pub fn to_bits(self, slot: EquipSlot) -> EqdpSlotBits {
        let offset = 2 * slot.imc_part_index();
        EqdpSlotBits {
            material: self.0 & (1 << offset) != 0,
            model: self.0 & (1 << (offset + 1)) != 0,
        }
    }

    /// Entry with both flags set for `slot`, for table construction.
    pub fn with_slot(self, slot: EquipSlot) -> Self {
        Self(self.0 | (0b11 << (2 * slot.imc_part_index())))
    }
}

/// Body parts covered by the extra-skeleton table.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum EstType {
    Face,
    Hair,
    Head,
    Body,
}

impl EstType {
    /// Directory name of this part in skeleton paths.
    pub fn slot_name(self) -> &'static str {
        match self {
            Self::Face => "face",
            Self::Hair => "hair",
            Self::Head => "met",
            Self::Body => "top",
        }
    }
}

/// Read-only metadata lookups exposed by a collection.
///
/// Implementations must tolerate concurrent reads; the resolver performs at
/// most two availability lookups per call and never writes.
pub trait MetaCache {
    /// Equipment-availability entry for a race and set. Unknown keys return
    /// the empty entry.
    fn eqdp_entry(&self, race: GenderRace, accessory: bool, set: SetId) -> EqdpEntry;

    /// Extra-skeleton set bound to `(type, race, set)`; 0 means none.
    fn est_entry(&self, ty: EstType, race: GenderRace, set: SetId) -> u16;
}
