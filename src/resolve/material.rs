//! Material path resolution, including the hand-coded weapon sharing
//! rules.
//!
//! The numeric family codes and the mirroring threshold are authoritative
//! game data observed from the shipped assets; they are preserved as-is,
//! not derived.

use crate::game::imc::ImcData;
use crate::game::path::{self, GamePath, PATH_CAPACITY};
use crate::game::slot::{EquipSlot, Variant};
use crate::resolve::context::{ModelKind, ResolveContext};

/// Marker byte distinguishing body ("skin") materials from equipment
/// materials in a human material file name.
const BODY_MATERIAL_MARKER: u8 = b'b';
/// Offset of that marker within the file name (`mt_cXXXX?...`).
const MATERIAL_CATEGORY_OFFSET: usize = 8;
/// Offset of the material suffix letter in a weapon file name
/// (`mt_wXXXXbXXXX_?`).
const WEAPON_SUFFIX_OFFSET: usize = 14;
/// Offset and width of the 4-digit set id in a weapon file name.
const WEAPON_SET_RANGE: std::ops::Range<usize> = 4..8;
/// Longest weapon material file name the mirroring buffer accepts.
const WEAPON_FILE_NAME_CAPACITY: usize = 32;

impl ResolveContext<'_> {
    /// Virtual path of a material belonging to `model_path`.
    ///
    /// Dispatches on the model kind; human body materials and unknown
    /// kinds resolve natively.
    pub fn resolve_material_path(&self, model_path: &GamePath, file_name: &[u8]) -> GamePath {
        match self.model.model_kind() {
            ModelKind::Human
                if self.slot_index < EquipSlot::COUNT
                    && file_name.get(MATERIAL_CATEGORY_OFFSET) != Some(&BODY_MATERIAL_MARKER) =>
            {
                self.resolve_equipment_material_path(model_path, file_name)
            }
            ModelKind::DemiHuman => self.resolve_equipment_material_path(model_path, file_name),
            ModelKind::Weapon => self.resolve_weapon_material_path(model_path, file_name),
            ModelKind::Monster => self.resolve_monster_material_path(model_path, file_name),
            _ => self.resolve_material_path_native(file_name),
        }
    }

    fn resolve_equipment_material_path(&self, model_path: &GamePath, file_name: &[u8]) -> GamePath {
        let variant = self.resolve_material_variant(self.equipment.variant);
        self.assemble(model_path, variant, file_name)
    }

    fn resolve_weapon_material_path(&self, model_path: &GamePath, file_name: &[u8]) -> GamePath {
        let set = self.equipment.set.0;
        let set_family = set / 100;

        // Every family-20 weapon shares one material C; the assets are
        // byte-identical across the whole family.
        if set_family == 20 && file_name.get(WEAPON_SUFFIX_OFFSET) == Some(&b'c') {
            return path::weapon_mtrl_path(2001, 1, 1, 'c');
        }

        // Families 3, 16, 18 and 26 model offhands as set + 50 and share
        // the mainhand's materials.
        if matches!(set_family, 3 | 16 | 18 | 26) && set % 100 > 50 {
            return self.resolve_mirrored_weapon_material_path(model_path, file_name, set - 50);
        }

        self.resolve_equipment_material_path(model_path, file_name)
    }

    fn resolve_mirrored_weapon_material_path(
        &self,
        model_path: &GamePath,
        file_name: &[u8],
        mirrored_set: u16,
    ) -> GamePath {
        if file_name.len() < WEAPON_SET_RANGE.end || file_name.len() > WEAPON_FILE_NAME_CAPACITY {
            return GamePath::empty();
        }

        let variant = self.resolve_material_variant(self.equipment.variant);

        let mut mirrored_name = [0u8; WEAPON_FILE_NAME_CAPACITY];
        mirrored_name[..file_name.len()].copy_from_slice(file_name);
        path::write_zero_padded(&mut mirrored_name[WEAPON_SET_RANGE], mirrored_set);

        let mut buffer = [0u8; PATH_CAPACITY];
        let Some(assembled_len) = path::assemble_material_path(
            &mut buffer,
            model_path.as_bytes(),
            variant,
            &mirrored_name[..file_name.len()],
        )
        .map(<[u8]>::len) else {
            return GamePath::empty();
        };

        // The directory part still names the offhand set; mirror it too.
        if let Some(weapon_position) = path::find_subslice(&buffer[..assembled_len], b"/weapon/w")
        {
            path::write_zero_padded(
                &mut buffer[weapon_position + 9..weapon_position + 13],
                mirrored_set,
            );
        }

        GamePath::from_bytes(&buffer[..assembled_len])
    }

    fn resolve_monster_material_path(&self, model_path: &GamePath, file_name: &[u8]) -> GamePath {
        let variant = self.resolve_material_variant(Variant(self.model.monster_body_variant()));
        self.assemble(model_path, variant, file_name)
    }

    /// Material id for `variant` from the model's variant table.
    ///
    /// Empty table data is logged once per call and falls back to the raw
    /// variant, as does a missing entry.
    pub(crate) fn resolve_material_variant(&self, variant: Variant) -> u8 {
        let imc = ImcData::new(self.model.imc_data());
        if imc.is_empty() {
            log::warn!(
                "variant table of draw object {:#x} has no valid data, using raw variant {}",
                self.model.raw_address(),
                variant.0,
            );
            return variant.0;
        }
        match imc.entry(self.imc_part_index(), variant) {
            Some(entry) => entry.material_id,
            None => variant.0,
        }
    }

    fn imc_part_index(&self) -> usize {
        match self.model.model_kind() {
            ModelKind::Human | ModelKind::DemiHuman => EquipSlot::from_index(self.slot_index)
                .map_or(0, EquipSlot::imc_part_index),
            _ => 0,
        }
    }

    fn assemble(&self, model_path: &GamePath, variant: u8, file_name: &[u8]) -> GamePath {
        let mut buffer = [0u8; PATH_CAPACITY];
        match path::assemble_material_path(&mut buffer, model_path.as_bytes(), variant, file_name)
        {
            Some(assembled) => GamePath::from_bytes(assembled),
            None => GamePath::empty(),
        }
    }

    fn resolve_material_path_native(&self, file_name: &[u8]) -> GamePath {
        match self.native.mtrl_path(self.slot_index, file_name) {
            Ok(bytes) => GamePath::from_bytes(&bytes),
            Err(err) => {
                log::error!(
                    "Native material path resolution failed\nDraw object: {:#x} (of kind {:?})\nSlot index: {}\nMaterial file name: {}\nError: {err:#}",
                    self.model.raw_address(),
                    self.model.model_kind(),
                    self.slot_index,
                    String::from_utf8_lossy(file_name),
                );
                GamePath::empty()
            }
        }
    }
}
