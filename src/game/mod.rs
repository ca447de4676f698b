//! Game-data primitives shared by the resolver and the metadata interfaces:
//! race/gender codes, equipment slots, override metadata tables, the
//! variant-table view, and fixed-capacity virtual paths.

pub mod imc;
pub mod meta;
pub mod path;
pub mod race;
pub mod slot;

pub use imc::{ImcData, ImcEntry};
pub use meta::{EqdpEntry, EqdpSlotBits, EstType, MetaCache};
pub use path::{GamePath, PATH_CAPACITY};
pub use race::GenderRace;
pub use slot::{EquipSlot, EquipmentDescriptor, SetId, Variant};
