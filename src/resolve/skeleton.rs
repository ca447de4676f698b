//! Skeleton and skeleton-parameter path resolution.

use crate::game::meta::EstType;
use crate::game::path::{self, GamePath};
use crate::game::race::GenderRace;
use crate::game::slot::{EquipSlot, SetId};
use crate::resolve::context::{CustomizeIndex, ModelKind, ResolveContext};

/// Resolved skeleton selector for one human body part.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SkeletonData {
    pub race: GenderRace,
    pub slot_name: &'static str,
    /// Skeleton set; 0 means no override, fall through to native.
    pub set: u16,
}

impl ResolveContext<'_> {
    /// Virtual skeleton path for one partial-skeleton index.
    ///
    /// Human skeletons go through the extra-skeleton table; everything
    /// else resolves natively.
    pub fn resolve_skeleton_path(&self, partial_index: u32) -> GamePath {
        match self.model.model_kind() {
            ModelKind::Human => self.resolve_human_skeleton_path(partial_index),
            _ => self.resolve_skeleton_path_native(partial_index),
        }
    }

    /// Virtual skeleton-parameter path for one partial-skeleton index.
    pub fn resolve_skeleton_parameter_path(&self, partial_index: u32) -> GamePath {
        match self.model.model_kind() {
            ModelKind::Human => self.resolve_human_skeleton_parameter_path(partial_index),
            _ => self.resolve_skeleton_parameter_path_native(partial_index),
        }
    }

    fn resolve_human_skeleton_path(&self, partial_index: u32) -> GamePath {
        let data = self.resolve_human_skeleton_data(partial_index);
        if data.set == 0 {
            return GamePath::empty();
        }
        path::skeleton_sklb_path(data.race, data.slot_name, data.set)
    }

    fn resolve_human_skeleton_parameter_path(&self, partial_index: u32) -> GamePath {
        let data = self.resolve_human_skeleton_data(partial_index);
        if data.set == 0 {
            return GamePath::empty();
        }
        path::skeleton_skp_path(data.race, data.slot_name, data.set)
    }

    /// Skeleton selector for one of the five human partial skeletons.
    ///
    /// Indices: 0 base, 1 face, 2 hair, 3 head equipment, 4 body
    /// equipment. Any other index yields set 0.
    pub fn resolve_human_skeleton_data(&self, partial_index: u32) -> SkeletonData {
        let race = self.model.race_code();
        match partial_index {
            0 => SkeletonData {
                race,
                slot_name: "base",
                set: 1,
            },
            1 => {
                let mut face_id = self.model.face_id();
                let tribe = self.model.customize(CustomizeIndex::Tribe);
                let body_type = self.model.customize(CustomizeIndex::BodyType);
                // Faces below 201 duplicate the 1xx range for these clans.
                if face_id < 201 {
                    let offset = match tribe {
                        0xB if body_type == 4 => 100,
                        0xE | 0xF => 100,
                        _ => 0,
                    };
                    face_id = face_id.saturating_sub(offset);
                }
                self.resolve_extra_skeleton_data(race, EstType::Face, SetId(face_id))
            }
            2 => self.resolve_extra_skeleton_data(race, EstType::Hair, SetId(self.model.hair_id())),
            3 => self.resolve_equipment_skeleton_data(EquipSlot::Head, EstType::Head),
            4 => self.resolve_equipment_skeleton_data(EquipSlot::Body, EstType::Body),
            _ => SkeletonData {
                race,
                slot_name: "",
                set: 0,
            },
        }
    }

    fn resolve_equipment_skeleton_data(&self, slot: EquipSlot, ty: EstType) -> SkeletonData {
        let equipment = self.model.armor(slot);
        let race = self.resolve_eqdp_race_code(slot, equipment.set);
        self.resolve_extra_skeleton_data(race, ty, equipment.set)
    }

    fn resolve_extra_skeleton_data(
        &self,
        race: GenderRace,
        ty: EstType,
        set: SetId,
    ) -> SkeletonData {
        let skeleton_set = self
            .meta_cache()
            .map_or(0, |meta| meta.est_entry(ty, race, set));
        SkeletonData {
            race,
            slot_name: ty.slot_name(),
            set: skeleton_set,
        }
    }

    fn resolve_skeleton_path_native(&self, partial_index: u32) -> GamePath {
        match self.native.sklb_path(partial_index) {
            Ok(bytes) => GamePath::from_bytes(&bytes),
            Err(err) => {
                log::error!(
                    "Native skeleton path resolution failed\nDraw object: {:#x} (of kind {:?})\nPartial index: {partial_index}\nError: {err:#}",
                    self.model.raw_address(),
                    self.model.model_kind(),
                );
                GamePath::empty()
            }
        }
    }

    fn resolve_skeleton_parameter_path_native(&self, partial_index: u32) -> GamePath {
        match self.native.skp_path(partial_index) {
            Ok(bytes) => GamePath::from_bytes(&bytes),
            Err(err) => {
                log::error!(
                    "Native skeleton parameter path resolution failed\nDraw object: {:#x} (of kind {:?})\nPartial index: {partial_index}\nError: {err:#}",
                    self.model.raw_address(),
                    self.model.model_kind(),
                );
                GamePath::empty()
            }
        }
    }
}
