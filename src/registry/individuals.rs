//! The assignment registry: which override profile applies to which actor.
//!
//! Assignments are held in insertion order for persistence, with a derived
//! identifier index for overlap checks and lookup. Loading is two-phase:
//! when the naming service is still initializing, the raw records travel
//! into a one-shot readiness subscription and the registry reports itself
//! not yet loaded until that fires. Every per-record failure during load is
//! a data-repair event: drop the record, notify, keep going.

use crate::actor::identity::{ActorIdentifier, IdentityGroup, NpcKind};
use crate::actor::naming::{NamingService, abbreviate_player_name, verify_player_name};
use crate::collection::storage::{Collection, CollectionStorage};
use crate::notify::{NotificationType, Notifier, OneShotEvent};
use crate::registry::saved::SavedAssignment;
use anyhow::{Context, Result};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Placeholder home world for migrated player names whose world is
/// unknown; resolved lazily once the player is actually seen.
pub const UNKNOWN_HOME_WORLD: u16 = u16::MAX;

/// One identity group bound to a collection.
#[derive(Clone, Debug)]
pub struct Assignment {
    pub display_name: String,
    pub group: IdentityGroup,
    pub collection: Rc<Collection>,
}

/// Outcome of a load call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadState {
    /// Load ran synchronously; `changes` reports whether any record was
    /// repaired, so the caller can persist the corrected set.
    Complete { changes: bool },
    /// The naming service was not ready; loading completes from its
    /// readiness callback and the `loaded` event fires afterwards.
    Deferred,
}

/// Per-entry tallies from a legacy-format migration.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MigrationReport {
    pub migrated: usize,
    pub failed: usize,
}

/// Registry of individual assignments.
pub struct IndividualAssignments {
    naming: Rc<dyn NamingService>,
    notifier: Rc<dyn Notifier>,
    assignments: Vec<Assignment>,
    by_identifier: BTreeMap<ActorIdentifier, usize>,
    is_loaded: bool,
    loaded: OneShotEvent,
}

impl IndividualAssignments {
    pub fn new(naming: Rc<dyn NamingService>, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            naming,
            notifier,
            assignments: Vec::new(),
            by_identifier: BTreeMap::new(),
            is_loaded: false,
            loaded: OneShotEvent::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Whether the persisted assignments have been read in.
    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    /// The one-shot event fired when loading completes.
    pub fn loaded_event(&self) -> OneShotEvent {
        self.loaded.clone()
    }

    /// Expand one identifier into its equivalence group.
    pub fn get_group(&self, identifier: &ActorIdentifier) -> IdentityGroup {
        IdentityGroup::expand(self.naming.as_ref(), identifier)
    }

    /// Collection bound to an identifier, if any of the stored groups
    /// contains it.
    pub fn individual(&self, identifier: &ActorIdentifier) -> Option<Rc<Collection>> {
        self.by_identifier
            .get(identifier)
            .map(|&index| Rc::clone(&self.assignments[index].collection))
    }

    /// Insert an assignment unless its group overlaps an existing one.
    pub fn add(
        &mut self,
        display_name: impl Into<String>,
        group: IdentityGroup,
        collection: Rc<Collection>,
    ) -> bool {
        if !group.is_valid() {
            return false;
        }
        if group
            .iter()
            .any(|identifier| self.by_identifier.contains_key(identifier))
        {
            return false;
        }
        let index = self.assignments.len();
        for identifier in group.iter() {
            self.by_identifier.insert(identifier.clone(), index);
        }
        self.assignments.push(Assignment {
            display_name: display_name.into(),
            group,
            collection,
        });
        true
    }

    /// Remove the assignment whose group contains `identifier`.
    pub fn remove(&mut self, identifier: &ActorIdentifier) -> bool {
        let Some(&index) = self.by_identifier.get(identifier) else {
            return false;
        };
        self.assignments.remove(index);
        self.reindex();
        true
    }

    /// Rebind the assignment containing `identifier` to another collection.
    pub fn change_collection(
        &mut self,
        identifier: &ActorIdentifier,
        collection: Rc<Collection>,
    ) -> bool {
        let Some(&index) = self.by_identifier.get(identifier) else {
            return false;
        };
        self.assignments[index].collection = collection;
        true
    }

    fn reindex(&mut self) {
        self.by_identifier.clear();
        for (index, assignment) in self.assignments.iter().enumerate() {
            for identifier in assignment.group.iter() {
                self.by_identifier.insert(identifier.clone(), index);
            }
        }
    }

    /// Serializable records in insertion order, each carrying the group's
    /// first identifier, the collection name, and the display name.
    pub fn to_saved(&self) -> Vec<SavedAssignment> {
        self.assignments
            .iter()
            .filter_map(|assignment| {
                let identifier = assignment.group.first()?.clone();
                Some(SavedAssignment {
                    identifier,
                    collection: assignment.collection.name().to_string(),
                    display: assignment.display_name.clone(),
                })
            })
            .collect()
    }

    /// The persisted form as a JSON array.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self.to_saved()).unwrap_or_else(|_| Value::Array(Vec::new()))
    }

    /// Read persisted records, deferring until the naming service is ready.
    ///
    /// When deferred, the raw records are captured by the one-shot
    /// readiness subscription; the completion persists through `save` if
    /// any repair occurred, marks the registry loaded, and fires the
    /// `loaded` event exactly once. Re-entrant readiness signals are
    /// harmless: the subscription is consumed before any work runs.
    pub fn load(
        this: &Rc<RefCell<Self>>,
        data: Option<Vec<Value>>,
        storage: &Rc<RefCell<CollectionStorage>>,
        save: Rc<dyn Fn(&Self)>,
    ) -> LoadState {
        let naming = Rc::clone(&this.borrow().naming);
        if naming.is_ready() {
            let changes = {
                let storage = storage.borrow();
                this.borrow_mut().load_records(data.as_deref(), &storage)
            };
            Self::finish_load(this);
            return LoadState::Complete { changes };
        }

        log::debug!(
            "[collections] Delayed reading individual assignments until the naming service is ready..."
        );
        let this = Rc::clone(this);
        let storage = Rc::clone(storage);
        naming.subscribe_ready(Box::new(move || {
            let changes = {
                let storage = storage.borrow();
                this.borrow_mut().load_records(data.as_deref(), &storage)
            };
            if changes {
                save(&this.borrow());
            }
            Self::finish_load(&this);
        }));
        LoadState::Deferred
    }

    fn finish_load(this: &Rc<RefCell<Self>>) {
        let loaded = {
            let mut registry = this.borrow_mut();
            registry.is_loaded = true;
            registry.loaded.clone()
        };
        // Fired outside the borrow so subscribers may query the registry.
        loaded.fire();
    }

    fn load_records(&mut self, data: Option<&[Value]>, storage: &CollectionStorage) -> bool {
        log::debug!("[collections] Reading individual assignments...");
        let mut changes = false;
        for record in data.unwrap_or_default() {
            match self.load_record(record, storage) {
                Ok(kept) => changes |= !kept,
                Err(err) => {
                    changes = true;
                    self.notifier.notify(
                        NotificationType::Error,
                        &format!("Could not load an unknown individual assignment, removed: {err:#}."),
                    );
                }
            }
        }
        log::debug!(
            "[collections] Finished reading {} individual assignments.",
            self.len()
        );
        changes
    }

    /// Process one record; `Ok(false)` marks a handled drop, `Err` an
    /// unexpected one. Both count as repairs.
    fn load_record(&mut self, record: &Value, storage: &CollectionStorage) -> Result<bool> {
        let saved: SavedAssignment =
            serde_json::from_value(record.clone()).context("parsing assignment record")?;
        let identifier = self.naming.validate(&saved.identifier);
        let group = self.get_group(&identifier);
        if !group.is_valid() {
            self.notifier.notify(
                NotificationType::Error,
                "Could not load an unknown individual assignment, removed.",
            );
            return Ok(false);
        }

        if saved.collection.is_empty() {
            self.notifier.notify(
                NotificationType::Warning,
                &format!("Individual assignment for {identifier} names no collection, removed."),
            );
            return Ok(false);
        }
        let Some(collection) = storage.by_name(&saved.collection) else {
            self.notifier.notify(
                NotificationType::Warning,
                &format!(
                    "Could not load the collection \"{}\" as individual assignment for {identifier}, removed.",
                    saved.collection
                ),
            );
            return Ok(false);
        };

        let display = if saved.display.is_empty() {
            identifier.to_string()
        } else {
            saved.display
        };
        if !self.add(display, group, collection) {
            self.notifier.notify(
                NotificationType::Warning,
                &format!("Could not add an individual assignment for {identifier}, removed."),
            );
            return Ok(false);
        }
        Ok(true)
    }

    /// One-shot upgrade from the legacy display-name-keyed format.
    ///
    /// NPC tables are matched before player-name parsing; the curated
    /// tables are small, so matching them first avoids false positives
    /// against common player names.
    pub fn migrate_name_keyed(&mut self, legacy: &[(String, Rc<Collection>)]) -> MigrationReport {
        let mut report = MigrationReport::default();
        for (name, collection) in legacy {
            if self.migrate_entry(name, collection) {
                report.migrated += 1;
            } else {
                report.failed += 1;
            }
        }
        log::info!(
            "[collections] Migrated {} legacy assignments, {} failed.",
            report.migrated,
            report.failed
        );
        report
    }

    fn migrate_entry(&mut self, name: &str, collection: &Rc<Collection>) -> bool {
        let matched = NpcKind::ALL.iter().find_map(|&kind| {
            find_data_id(self.naming.npc_names(kind), name).map(|data_id| (kind, data_id))
        });

        if let Some((kind, data_id)) = matched {
            let identifier = self.naming.create_npc(kind, data_id);
            let group = self.get_group(&identifier);
            let ids = group
                .iter()
                .filter_map(|member| match member {
                    ActorIdentifier::Npc { data_id, .. } => Some(data_id.to_string()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(", ");
            let display = format!(
                "{} ({kind})",
                self.naming
                    .npc_name(kind, data_id)
                    .unwrap_or_else(|| name.to_string())
            );
            if self.add(display, group, Rc::clone(collection)) {
                log::info!("Migrated {name} ({kind}) to NPC identifiers [{ids}].");
                return true;
            }
            self.notifier.notify(
                NotificationType::Error,
                &format!(
                    "Could not migrate {name}, assumed to be a {kind} with ids [{ids}]; check your individual assignments."
                ),
            );
            return false;
        }

        if verify_player_name(name) {
            let identifier = self.naming.create_player(name, UNKNOWN_HOME_WORLD);
            let group = self.get_group(&identifier);
            let world = self
                .naming
                .world_name(UNKNOWN_HOME_WORLD)
                .unwrap_or_else(|| "Any World".to_string());
            // Success logs carry initials only; failure notifications keep
            // the full name so the user can recognize the entry.
            let short_name = abbreviate_player_name(name);
            if self.add(format!("{name} ({world})"), group, Rc::clone(collection)) {
                log::info!("Migrated {short_name} to a player identifier.");
                return true;
            }
            self.notifier.notify(
                NotificationType::Error,
                &format!("Could not migrate {name}; check your individual assignments."),
            );
            return false;
        }

        self.notifier.notify(
            NotificationType::Error,
            &format!(
                "Could not migrate {name}: not a known NPC name and not a valid player name."
            ),
        );
        false
    }
}

fn find_data_id(table: &BTreeMap<u32, String>, name: &str) -> Option<u32> {
    table
        .iter()
        .find(|(_, candidate)| candidate.eq_ignore_ascii_case(name))
        .map(|(&data_id, _)| data_id)
}
