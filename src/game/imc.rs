//! Zero-copy view over a variant-table ("IMC") resource.
//!
//! The table starts with a four-byte header (variant count, part mask)
//! followed by six-byte entries grouped per part: one block of defaults,
//! then one block per variant. Lookups never allocate and treat any
//! out-of-bounds access as a missing entry.

use crate::game::slot::Variant;

/// Size of one serialized entry.
const ENTRY_SIZE: usize = 6;
/// Offset of the first entry block past the header.
const HEADER_SIZE: usize = 4;

/// One row of the variant table.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ImcEntry {
    pub material_id: u8,
    pub decal_id: u8,
    pub attribute_and_sound: u16,
    pub vfx_id: u8,
    pub material_animation_id: u8,
}

impl ImcEntry {
    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            material_id: bytes[0],
            decal_id: bytes[1],
            attribute_and_sound: u16::from_le_bytes([bytes[2], bytes[3]]),
            vfx_id: bytes[4],
            material_animation_id: bytes[5],
        }
    }
}

/// Borrowed variant-table bytes, as handed over by the resource system.
#[derive(Clone, Copy, Debug)]
pub struct ImcData<'a> {
    data: &'a [u8],
}

impl<'a> ImcData<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn is_empty(&self) -> bool {
        self.data.len() < HEADER_SIZE
    }

    /// Number of variants past the default block.
    pub fn variant_count(&self) -> u16 {
        if self.is_empty() {
            return 0;
        }
        u16::from_le_bytes([self.data[0], self.data[1]])
    }

    fn part_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        u16::from_le_bytes([self.data[2], self.data[3]]).count_ones() as usize
    }

    /// Entry for `part_index` at `variant`, with variant 0 addressing the
    /// default block. Missing parts, variants past the declared count, and
    /// truncated data all yield `None`.
    pub fn entry(&self, part_index: usize, variant: Variant) -> Option<ImcEntry> {
        let parts = self.part_count();
        if part_index >= parts {
            return None;
        }
        if u16::from(variant.0) > self.variant_count() {
            return None;
        }
        let offset = HEADER_SIZE + (parts * usize::from(variant.0) + part_index) * ENTRY_SIZE;
        self.data
            .get(offset..offset + ENTRY_SIZE)
            .map(ImcEntry::from_bytes)
    }
}
