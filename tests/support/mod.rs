//! Shared in-memory fakes for the integration suite: the naming service,
//! metadata cache, notifier, model descriptor and native resolver the
//! host would normally supply.

use anyhow::{Result, anyhow};
use reskin::{
    CustomizeIndex, EqdpEntry, EquipSlot, EquipmentDescriptor, EstType, GenderRace, MetaCache,
    ModelDescriptor, ModelKind, NamingService, NativeResolver, NotificationType, Notifier,
    NpcKind, OneShotEvent, SetId,
};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// Naming service backed by static tables, optionally starting unready.
pub struct FakeNaming {
    ready: Cell<bool>,
    ready_event: OneShotEvent,
    companions: BTreeMap<u32, String>,
    mounts: BTreeMap<u32, String>,
    battle_npcs: BTreeMap<u32, String>,
    event_npcs: BTreeMap<u32, String>,
    worlds: BTreeMap<u16, String>,
}

impl FakeNaming {
    pub fn ready() -> Self {
        let naming = Self::initializing();
        naming.ready.set(true);
        naming
    }

    pub fn initializing() -> Self {
        Self {
            ready: Cell::new(false),
            ready_event: OneShotEvent::new(),
            companions: BTreeMap::new(),
            mounts: BTreeMap::new(),
            battle_npcs: BTreeMap::new(),
            event_npcs: BTreeMap::new(),
            worlds: BTreeMap::from([(34, "Brynhildr".to_string())]),
        }
    }

    pub fn make_ready(&self) {
        self.ready.set(true);
        self.ready_event.fire();
    }

    pub fn with_npc(mut self, kind: NpcKind, data_id: u32, name: &str) -> Self {
        let table = match kind {
            NpcKind::Companion => &mut self.companions,
            NpcKind::Mount => &mut self.mounts,
            NpcKind::BattleNpc => &mut self.battle_npcs,
            NpcKind::EventNpc => &mut self.event_npcs,
        };
        table.insert(data_id, name.to_string());
        self
    }
}

impl NamingService for FakeNaming {
    fn is_ready(&self) -> bool {
        self.ready.get()
    }

    fn subscribe_ready(&self, callback: Box<dyn FnOnce()>) {
        if self.ready.get() {
            callback();
        } else {
            self.ready_event.subscribe(callback);
        }
    }

    fn npc_names(&self, kind: NpcKind) -> &BTreeMap<u32, String> {
        match kind {
            NpcKind::Companion => &self.companions,
            NpcKind::Mount => &self.mounts,
            NpcKind::BattleNpc => &self.battle_npcs,
            NpcKind::EventNpc => &self.event_npcs,
        }
    }

    fn world_name(&self, world_id: u16) -> Option<String> {
        self.worlds.get(&world_id).cloned()
    }
}

/// Metadata cache backed by explicit table entries.
#[derive(Default)]
pub struct FakeMeta {
    eqdp: BTreeMap<(GenderRace, bool, SetId), EqdpEntry>,
    est: BTreeMap<(EstType, GenderRace, SetId), u16>,
}

impl FakeMeta {
    /// Mark `(race, slot, set)` as having race-specific model data.
    pub fn with_eqdp(mut self, race: GenderRace, slot: EquipSlot, set: SetId) -> Self {
        let entry = self
            .eqdp
            .entry((race, slot.is_accessory(), set))
            .or_default();
        *entry = entry.with_slot(slot);
        self
    }

    pub fn with_est(mut self, ty: EstType, race: GenderRace, set: SetId, skeleton: u16) -> Self {
        self.est.insert((ty, race, set), skeleton);
        self
    }
}

impl MetaCache for FakeMeta {
    fn eqdp_entry(&self, race: GenderRace, accessory: bool, set: SetId) -> EqdpEntry {
        self.eqdp
            .get(&(race, accessory, set))
            .copied()
            .unwrap_or_default()
    }

    fn est_entry(&self, ty: EstType, race: GenderRace, set: SetId) -> u16 {
        self.est.get(&(ty, race, set)).copied().unwrap_or(0)
    }
}

/// Notifier recording every message for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<(NotificationType, String)>>,
}

impl RecordingNotifier {
    pub fn count(&self) -> usize {
        self.messages.borrow().len()
    }

    pub fn messages(&self) -> Vec<(NotificationType, String)> {
        self.messages.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, ty: NotificationType, message: &str) {
        self.messages.borrow_mut().push((ty, message.to_string()));
    }
}

/// Model descriptor with directly settable fields.
pub struct FakeModel {
    pub kind: ModelKind,
    pub race: GenderRace,
    pub customize: [u8; 8],
    pub face_id: u16,
    pub hair_id: u16,
    pub armor: [EquipmentDescriptor; 10],
    pub monster_variant: u8,
    pub imc: Vec<u8>,
}

impl FakeModel {
    pub fn new(kind: ModelKind, race: GenderRace) -> Self {
        Self {
            kind,
            race,
            customize: [0; 8],
            face_id: 0,
            hair_id: 0,
            armor: [EquipmentDescriptor::default(); 10],
            monster_variant: 0,
            imc: Vec::new(),
        }
    }
}

impl ModelDescriptor for FakeModel {
    fn model_kind(&self) -> ModelKind {
        self.kind
    }

    fn race_code(&self) -> GenderRace {
        self.race
    }

    fn customize(&self, index: CustomizeIndex) -> u8 {
        self.customize[index.to_index()]
    }

    fn face_id(&self) -> u16 {
        self.face_id
    }

    fn hair_id(&self) -> u16 {
        self.hair_id
    }

    fn armor(&self, slot: EquipSlot) -> EquipmentDescriptor {
        self.armor[slot.to_index() as usize]
    }

    fn monster_body_variant(&self) -> u8 {
        self.monster_variant
    }

    fn imc_data(&self) -> &[u8] {
        &self.imc
    }

    fn raw_address(&self) -> usize {
        0x1000
    }
}

/// Native resolver answering from fixed byte strings; unset paths error
/// like a faulting game call.
#[derive(Default)]
pub struct FakeNative {
    pub mdl: Option<Vec<u8>>,
    pub mtrl: Option<Vec<u8>>,
    pub sklb: Option<Vec<u8>>,
    pub skp: Option<Vec<u8>>,
}

impl FakeNative {
    fn answer(path: &Option<Vec<u8>>) -> Result<Vec<u8>> {
        path.clone()
            .ok_or_else(|| anyhow!("access violation in native resolution"))
    }
}

impl NativeResolver for FakeNative {
    fn mdl_path(&self, _slot_index: u32) -> Result<Vec<u8>> {
        Self::answer(&self.mdl)
    }

    fn mtrl_path(&self, _slot_index: u32, _file_name: &[u8]) -> Result<Vec<u8>> {
        Self::answer(&self.mtrl)
    }

    fn sklb_path(&self, _partial_index: u32) -> Result<Vec<u8>> {
        Self::answer(&self.sklb)
    }

    fn skp_path(&self, _partial_index: u32) -> Result<Vec<u8>> {
        Self::answer(&self.skp)
    }
}

/// Serialized variant table: four-byte header then six-byte entries.
pub fn imc_table(count: u16, part_mask: u16, entries: &[[u8; 6]]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&count.to_le_bytes());
    data.extend_from_slice(&part_mask.to_le_bytes());
    for entry in entries {
        data.extend_from_slice(entry);
    }
    data
}
