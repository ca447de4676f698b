//! Actor identities and equivalence groups.
//!
//! An identifier denotes one in-game subject: a player character by name
//! and home world, or an NPC by kind and data id. Some subjects have
//! several near-duplicate identifiers (a companion may appear under more
//! than one data id); an [`IdentityGroup`] collapses those into one ordered
//! set so an assignment covers every representation at once.

use crate::actor::naming::NamingService;
use serde::{Deserialize, Serialize};
use std::fmt;

/// NPC kinds the registry can bind collections to.
///
/// The order is the migration match priority: curated companion and mount
/// tables first, the larger battle/event tables after.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum NpcKind {
    Companion,
    Mount,
    BattleNpc,
    EventNpc,
}

impl NpcKind {
    pub const ALL: [Self; 4] = [Self::Companion, Self::Mount, Self::BattleNpc, Self::EventNpc];

    pub fn name(self) -> &'static str {
        match self {
            Self::Companion => "Companion",
            Self::Mount => "Mount",
            Self::BattleNpc => "Battle NPC",
            Self::EventNpc => "Event NPC",
        }
    }
}

impl fmt::Display for NpcKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of one in-game actor.
///
/// The serialized form is the canonical persisted representation: a `Type`
/// tag plus the kind-specific fields. `Invalid` marks identifiers that
/// failed validation against live identity data and is never persisted.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(tag = "Type")]
pub enum ActorIdentifier {
    Player {
        #[serde(rename = "Name")]
        name: String,
        #[serde(rename = "HomeWorld")]
        home_world: u16,
    },
    Npc {
        #[serde(rename = "Kind")]
        kind: NpcKind,
        #[serde(rename = "DataId")]
        data_id: u32,
    },
    #[serde(skip)]
    Invalid,
}

impl ActorIdentifier {
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

impl fmt::Display for ActorIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player { name, home_world } => write!(f, "{name} ({home_world})"),
            Self::Npc { kind, data_id } => write!(f, "{kind} #{data_id}"),
            Self::Invalid => f.write_str("Invalid"),
        }
    }
}

/// Ordered, non-empty set of equivalent identifiers for one subject.
///
/// A group is only usable when every member is individually valid; the
/// empty group doubles as the rejection marker for failed expansion.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IdentityGroup(Vec<ActorIdentifier>);

impl IdentityGroup {
    pub fn new(identifiers: Vec<ActorIdentifier>) -> Self {
        Self(identifiers)
    }

    pub fn singleton(identifier: ActorIdentifier) -> Self {
        Self(vec![identifier])
    }

    /// Expand one identifier into its equivalence group.
    ///
    /// Companions and mounts are curated under possibly several data ids
    /// sharing one display name; all of them join the group, in id order.
    /// Every other subject is its own singleton. Invalid identifiers and
    /// identifiers unknown to the naming service expand to the empty group.
    pub fn expand(naming: &dyn NamingService, identifier: &ActorIdentifier) -> Self {
        match identifier {
            ActorIdentifier::Invalid => Self::default(),
            ActorIdentifier::Player { .. } => Self::singleton(identifier.clone()),
            ActorIdentifier::Npc { kind, data_id } => match kind {
                NpcKind::Companion | NpcKind::Mount => {
                    let Some(name) = naming.npc_name(*kind, *data_id) else {
                        return Self::default();
                    };
                    let members = naming
                        .npc_names(*kind)
                        .iter()
                        .filter(|(_, candidate)| candidate.eq_ignore_ascii_case(&name))
                        .map(|(id, _)| naming.create_npc(*kind, *id))
                        .collect();
                    Self(members)
                }
                NpcKind::BattleNpc | NpcKind::EventNpc => Self::singleton(identifier.clone()),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Non-empty and every member valid.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(ActorIdentifier::is_valid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActorIdentifier> {
        self.0.iter()
    }

    /// The canonical member used for persistence.
    pub fn first(&self) -> Option<&ActorIdentifier> {
        self.0.first()
    }

    pub fn contains(&self, identifier: &ActorIdentifier) -> bool {
        self.0.contains(identifier)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identifier_serde_round_trips() {
        let player = ActorIdentifier::Player {
            name: "Aya Brea".to_string(),
            home_world: 34,
        };
        let value = serde_json::to_value(&player).unwrap();
        assert_eq!(
            value,
            json!({"Type": "Player", "Name": "Aya Brea", "HomeWorld": 34})
        );
        let back: ActorIdentifier = serde_json::from_value(value).unwrap();
        assert_eq!(back, player);

        let npc = ActorIdentifier::Npc {
            kind: NpcKind::Mount,
            data_id: 71,
        };
        let value = serde_json::to_value(&npc).unwrap();
        assert_eq!(value, json!({"Type": "Npc", "Kind": "Mount", "DataId": 71}));
        let back: ActorIdentifier = serde_json::from_value(value).unwrap();
        assert_eq!(back, npc);
    }

    #[test]
    fn invalid_never_deserializes() {
        let parsed: Result<ActorIdentifier, _> =
            serde_json::from_value(json!({"Type": "Invalid"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn group_validity() {
        assert!(!IdentityGroup::default().is_valid());
        assert!(IdentityGroup::singleton(ActorIdentifier::Npc {
            kind: NpcKind::BattleNpc,
            data_id: 3,
        })
        .is_valid());
        assert!(!IdentityGroup::new(vec![
            ActorIdentifier::Npc {
                kind: NpcKind::BattleNpc,
                data_id: 3,
            },
            ActorIdentifier::Invalid,
        ])
        .is_valid());
    }
}
