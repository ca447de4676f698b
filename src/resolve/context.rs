//! Resolution context over one character-model descriptor.
//!
//! The context bundles the read-only descriptor, the native fallback
//! resolver, and the collection bound to the character. Every resolution
//! is a stateless computation over these plus the collection's metadata
//! cache; nothing here blocks or allocates beyond the inline path buffers.

use crate::collection::storage::Collection;
use crate::game::meta::MetaCache;
use crate::game::path::{self, GamePath};
use crate::game::race::GenderRace;
use crate::game::slot::{EquipSlot, EquipmentDescriptor, SetId};
use anyhow::Result;

/// Kind of the draw object being resolved.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ModelKind {
    Human,
    DemiHuman,
    Weapon,
    Monster,
    /// Anything else; always resolved natively.
    Other,
}

/// Customization byte indices the resolver reads.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CustomizeIndex {
    Race,
    Gender,
    BodyType,
    Height,
    Tribe,
}

impl CustomizeIndex {
    pub fn to_index(self) -> usize {
        match self {
            Self::Race => 0,
            Self::Gender => 1,
            Self::BodyType => 2,
            Self::Height => 3,
            Self::Tribe => 4,
        }
    }
}

/// Read-only view of the character model in game memory.
///
/// The hooking layer maps the raw draw-object struct to this interface;
/// the resolver never touches game memory itself. One descriptor lives for
/// exactly one resolution call.
pub trait ModelDescriptor {
    fn model_kind(&self) -> ModelKind;

    /// The character's combined race/gender code.
    fn race_code(&self) -> GenderRace;

    /// One byte of the customization array.
    fn customize(&self, index: CustomizeIndex) -> u8;

    fn face_id(&self) -> u16;

    fn hair_id(&self) -> u16;

    /// Set and variant equipped in `slot`.
    fn armor(&self, slot: EquipSlot) -> EquipmentDescriptor;

    /// Monster body variant; monsters carry it outside the equipment
    /// descriptor.
    fn monster_body_variant(&self) -> u8;

    /// Raw bytes of the model's variant-table resource; empty when the
    /// resource has no usable data.
    fn imc_data(&self) -> &[u8];

    /// Address of the underlying draw object, for diagnostics only.
    fn raw_address(&self) -> usize;
}

/// The game's own path resolution, used for everything this core does not
/// override. Faults inside the game's code surface as errors and are
/// caught at the resolver boundary.
pub trait NativeResolver {
    fn mdl_path(&self, slot_index: u32) -> Result<Vec<u8>>;

    fn mtrl_path(&self, slot_index: u32, file_name: &[u8]) -> Result<Vec<u8>>;

    fn sklb_path(&self, partial_index: u32) -> Result<Vec<u8>>;

    fn skp_path(&self, partial_index: u32) -> Result<Vec<u8>>;
}

/// Per-call resolution context.
pub struct ResolveContext<'a> {
    pub(crate) model: &'a dyn ModelDescriptor,
    pub(crate) native: &'a dyn NativeResolver,
    pub(crate) collection: &'a Collection,
    pub(crate) slot_index: u32,
    pub(crate) equipment: EquipmentDescriptor,
}

impl<'a> ResolveContext<'a> {
    pub fn new(
        model: &'a dyn ModelDescriptor,
        native: &'a dyn NativeResolver,
        collection: &'a Collection,
        slot_index: u32,
        equipment: EquipmentDescriptor,
    ) -> Self {
        Self {
            model,
            native,
            collection,
            slot_index,
            equipment,
        }
    }

    pub(crate) fn meta_cache(&self) -> Option<&dyn MetaCache> {
        self.collection.meta_cache()
    }

    /// Virtual path of the model in the context's slot.
    ///
    /// Human equipment models can take race-specific overrides through the
    /// availability table; everything else resolves natively.
    pub fn resolve_model_path(&self) -> GamePath {
        match self.model.model_kind() {
            ModelKind::Human if self.slot_index < EquipSlot::COUNT => {
                self.resolve_equipment_model_path()
            }
            _ => self.resolve_model_path_native(),
        }
    }

    fn resolve_equipment_model_path(&self) -> GamePath {
        let Some(slot) = EquipSlot::from_index(self.slot_index) else {
            return GamePath::empty();
        };
        let race = self.resolve_eqdp_race_code(slot, self.equipment.set);
        if slot.is_accessory() {
            path::accessory_mdl_path(self.equipment.set, race, slot)
        } else {
            path::equipment_mdl_path(self.equipment.set, race, slot)
        }
    }

    /// Race code whose model data the game will actually load for a slot.
    ///
    /// At most two availability lookups: the character's own code, then
    /// its one-step fallback; anything else lands on the base code.
    pub fn resolve_eqdp_race_code(&self, slot: EquipSlot, set: SetId) -> GenderRace {
        if self.model.model_kind() != ModelKind::Human {
            return GenderRace::BASE;
        }

        let race = self.model.race_code();
        if race == GenderRace::BASE {
            return GenderRace::BASE;
        }

        let accessory = slot.is_accessory();
        if !race.is_adult() && accessory {
            return GenderRace::BASE;
        }

        let Some(meta) = self.meta_cache() else {
            return GenderRace::BASE;
        };

        if meta.eqdp_entry(race, accessory, set).to_bits(slot).model {
            return race;
        }

        let fallback = race.fallback();
        if fallback == GenderRace::BASE {
            return GenderRace::BASE;
        }
        if meta
            .eqdp_entry(fallback, accessory, set)
            .to_bits(slot)
            .model
        {
            return fallback;
        }

        GenderRace::BASE
    }

    fn resolve_model_path_native(&self) -> GamePath {
        match self.native.mdl_path(self.slot_index) {
            Ok(bytes) => GamePath::from_bytes(&bytes),
            Err(err) => {
                log::error!(
                    "Native model path resolution failed\nDraw object: {:#x} (of kind {:?})\nSlot index: {}\nError: {err:#}",
                    self.model.raw_address(),
                    self.model.model_kind(),
                    self.slot_index,
                );
                GamePath::empty()
            }
        }
    }
}
