//! Fixed-capacity virtual paths and the path formatters for each asset
//! family.
//!
//! Path assembly runs on the game's resource-load context, so everything
//! here writes into 260-byte stack buffers with explicit bounds checks
//! instead of allocating. A failed assembly (marker not found, buffer
//! overflow, malformed bytes) produces the empty path, which callers treat
//! as "fall through to native resolution".

use crate::game::race::GenderRace;
use crate::game::slot::{EquipSlot, SetId};
use std::fmt::{self, Write};
use std::str;

/// Capacity of every path buffer in the resolver.
pub const PATH_CAPACITY: usize = 260;

/// A virtual asset path held inline, at most [`PATH_CAPACITY`] bytes.
#[derive(Clone, Copy)]
pub struct GamePath {
    len: usize,
    buf: [u8; PATH_CAPACITY],
}

impl GamePath {
    /// The empty path, the resolver's sentinel for "no override".
    pub fn empty() -> Self {
        Self {
            len: 0,
            buf: [0; PATH_CAPACITY],
        }
    }

    /// Path from raw bytes; empty when over capacity or not valid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.len() > PATH_CAPACITY || str::from_utf8(bytes).is_err() {
            return Self::empty();
        }
        let mut buf = [0; PATH_CAPACITY];
        buf[..bytes.len()].copy_from_slice(bytes);
        Self {
            len: bytes.len(),
            buf,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn as_str(&self) -> &str {
        // Invariant: construction only admits valid UTF-8.
        str::from_utf8(self.as_bytes()).unwrap_or("")
    }
}

impl PartialEq for GamePath {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for GamePath {}

impl fmt::Display for GamePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for GamePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GamePath({:?})", self.as_str())
    }
}

/// `fmt::Write` sink over an inline buffer; errors instead of growing.
struct PathWriter {
    len: usize,
    buf: [u8; PATH_CAPACITY],
}

impl Write for PathWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        if self.len + bytes.len() > PATH_CAPACITY {
            return Err(fmt::Error);
        }
        self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        Ok(())
    }
}

fn format_path(args: fmt::Arguments<'_>) -> GamePath {
    let mut writer = PathWriter {
        len: 0,
        buf: [0; PATH_CAPACITY],
    };
    match writer.write_fmt(args) {
        Ok(()) => GamePath {
            len: writer.len,
            buf: writer.buf,
        },
        Err(_) => GamePath::empty(),
    }
}

/// Model path for an equipment piece.
pub fn equipment_mdl_path(set: SetId, race: GenderRace, slot: EquipSlot) -> GamePath {
    format_path(format_args!(
        "chara/equipment/e{set:04}/model/c{race:04}e{set:04}_{suffix}.mdl",
        set = set.0,
        race = race.0,
        suffix = slot.suffix(),
    ))
}

/// Model path for an accessory piece.
pub fn accessory_mdl_path(set: SetId, race: GenderRace, slot: EquipSlot) -> GamePath {
    format_path(format_args!(
        "chara/accessory/a{set:04}/model/c{race:04}a{set:04}_{suffix}.mdl",
        set = set.0,
        race = race.0,
        suffix = slot.suffix(),
    ))
}

/// Material path for a weapon body part.
pub fn weapon_mtrl_path(weapon: u16, body: u16, variant: u8, suffix: char) -> GamePath {
    format_path(format_args!(
        "chara/weapon/w{weapon:04}/obj/body/b{body:04}/material/v{variant:04}/mt_w{weapon:04}b{body:04}_{suffix}.mtrl",
    ))
}

/// Skeleton path for a human body part.
pub fn skeleton_sklb_path(race: GenderRace, slot_name: &str, set: u16) -> GamePath {
    let prefix = slot_name.as_bytes().first().copied().unwrap_or(b'b') as char;
    format_path(format_args!(
        "chara/human/c{race:04}/skeleton/{slot_name}/{prefix}{set:04}/skl_c{race:04}{prefix}{set:04}.sklb",
        race = race.0,
    ))
}

/// Skeleton-parameter path for a human body part.
pub fn skeleton_skp_path(race: GenderRace, slot_name: &str, set: u16) -> GamePath {
    let prefix = slot_name.as_bytes().first().copied().unwrap_or(b'b') as char;
    format_path(format_args!(
        "chara/human/c{race:04}/skeleton/{slot_name}/{prefix}{set:04}/skl_c{race:04}{prefix}{set:04}.skp",
        race = race.0,
    ))
}

/// First occurrence of `needle` in `haystack`.
pub fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// Write `number` into `destination` as zero-padded decimal digits,
/// right-to-left over the full width.
pub fn write_zero_padded(destination: &mut [u8], mut number: u16) {
    for slot in destination.iter_mut().rev() {
        *slot = b'0' + (number % 10) as u8;
        number /= 10;
    }
}

/// Material path next to `model_path`: everything before the `/model/`
/// marker, then `/material/v<variant>/<file_name>`.
///
/// Returns the filled prefix of `buffer`, or `None` when the marker is
/// missing or the result would not fit.
pub fn assemble_material_path<'a>(
    buffer: &'a mut [u8],
    model_path: &[u8],
    variant: u8,
    file_name: &[u8],
) -> Option<&'a [u8]> {
    const MODEL_MARKER: &[u8] = b"/model/";
    const MATERIAL_MARKER: &[u8] = b"/material/v";

    let model_position = find_subslice(model_path, MODEL_MARKER)?;
    let base = &model_path[..model_position];

    let total = base.len() + MATERIAL_MARKER.len() + 4 + 1 + file_name.len();
    if total > buffer.len() {
        return None;
    }

    buffer[..base.len()].copy_from_slice(base);
    let mut at = base.len();
    buffer[at..at + MATERIAL_MARKER.len()].copy_from_slice(MATERIAL_MARKER);
    at += MATERIAL_MARKER.len();
    write_zero_padded(&mut buffer[at..at + 4], u16::from(variant));
    at += 4;
    buffer[at] = b'/';
    at += 1;
    buffer[at..at + file_name.len()].copy_from_slice(file_name);

    Some(&buffer[..total])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::path;

    #[test]
    fn assembles_material_next_to_model() {
        let mut buffer = [0u8; PATH_CAPACITY];
        let assembled = assemble_material_path(
            &mut buffer,
            b"chara/equipment/e0001/model/c0101e0001_top.mdl",
            3,
            b"c0101e0001_top_a.mtrl",
        )
        .unwrap();
        assert_eq!(
            assembled,
            b"chara/equipment/e0001/material/v0003/c0101e0001_top_a.mtrl"
        );
    }

    #[test]
    fn missing_marker_fails_assembly() {
        let mut buffer = [0u8; PATH_CAPACITY];
        assert!(assemble_material_path(&mut buffer, b"chara/equipment/e0001", 1, b"x.mtrl").is_none());
    }

    #[test]
    fn oversized_assembly_fails() {
        let mut buffer = [0u8; PATH_CAPACITY];
        let long_model = [b'a'; 300];
        assert!(
            assemble_material_path(&mut buffer, &long_model, 1, b"x.mtrl").is_none(),
            "marker absent and over capacity"
        );
        let mut model = Vec::new();
        model.extend_from_slice(&[b'a'; 250]);
        model.extend_from_slice(b"/model/x.mdl");
        assert!(assemble_material_path(&mut buffer, &model, 1, b"file.mtrl").is_none());
    }

    #[test]
    fn zero_padding_writes_right_to_left() {
        let mut digits = [0u8; 4];
        write_zero_padded(&mut digits, 7);
        assert_eq!(&digits, b"0007");
        write_zero_padded(&mut digits, 2001);
        assert_eq!(&digits, b"2001");
    }

    #[test]
    fn formatter_outputs() {
        assert_eq!(
            path::equipment_mdl_path(SetId(1), GenderRace::MIDLANDER_MALE, EquipSlot::Body)
                .as_str(),
            "chara/equipment/e0001/model/c0101e0001_top.mdl"
        );
        assert_eq!(
            path::accessory_mdl_path(SetId(21), GenderRace::VIERA_FEMALE, EquipSlot::Ears)
                .as_str(),
            "chara/accessory/a0021/model/c1801a0021_ear.mdl"
        );
        assert_eq!(
            path::weapon_mtrl_path(2001, 1, 1, 'c').as_str(),
            "chara/weapon/w2001/obj/body/b0001/material/v0001/mt_w2001b0001_c.mtrl"
        );
        assert_eq!(
            path::skeleton_sklb_path(GenderRace::MIDLANDER_MALE, "base", 1).as_str(),
            "chara/human/c0101/skeleton/base/b0001/skl_c0101b0001.sklb"
        );
        assert_eq!(
            path::skeleton_skp_path(GenderRace::AURA_FEMALE, "met", 42).as_str(),
            "chara/human/c1401/skeleton/met/m0042/skl_c1401m0042.skp"
        );
    }

    #[test]
    fn game_path_round_trips_bytes() {
        let path = GamePath::from_bytes(b"chara/equipment/e0001/model/c0101e0001_top.mdl");
        assert!(!path.is_empty());
        assert_eq!(path.as_str(), "chara/equipment/e0001/model/c0101e0001_top.mdl");

        let oversized = [b'a'; PATH_CAPACITY + 1];
        assert!(GamePath::from_bytes(&oversized).is_empty());
    }
}
