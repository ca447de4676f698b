//! Interface to the host's identity-naming service.
//!
//! The service owns the curated name tables (companions, mounts, battle and
//! event NPCs) and the world list, and may still be initializing when the
//! registry loads; readiness is observed through a one-shot subscription.
//! Identifier construction goes through the service so identifiers are
//! validated against live data, not just their syntax.

use crate::actor::identity::{ActorIdentifier, NpcKind};
use std::collections::BTreeMap;

/// Longest allowed full player name, forename and surname combined.
const MAX_PLAYER_NAME_LEN: usize = 20;

/// Live identity data and identifier construction.
pub trait NamingService {
    /// Whether the name tables are available yet.
    fn is_ready(&self) -> bool;

    /// Register a one-shot callback invoked when the service becomes ready.
    ///
    /// The callback fires at most once; services that are already ready
    /// invoke it immediately.
    fn subscribe_ready(&self, callback: Box<dyn FnOnce()>);

    /// Curated data-id-to-name table for one NPC kind.
    fn npc_names(&self, kind: NpcKind) -> &BTreeMap<u32, String>;

    /// Name of a world, if the id is known.
    fn world_name(&self, world_id: u16) -> Option<String>;

    /// Name of an NPC, if the data id is known.
    fn npc_name(&self, kind: NpcKind, data_id: u32) -> Option<String> {
        self.npc_names(kind).get(&data_id).cloned()
    }

    /// NPC identifier validated against the name tables.
    fn create_npc(&self, kind: NpcKind, data_id: u32) -> ActorIdentifier {
        if self.npc_names(kind).contains_key(&data_id) {
            ActorIdentifier::Npc { kind, data_id }
        } else {
            ActorIdentifier::Invalid
        }
    }

    /// Player identifier validated for name syntax.
    ///
    /// The home world is not checked against the world list; migration uses
    /// a placeholder world for names whose world is unknown.
    fn create_player(&self, name: &str, home_world: u16) -> ActorIdentifier {
        if verify_player_name(name) {
            ActorIdentifier::Player {
                name: name.to_string(),
                home_world,
            }
        } else {
            ActorIdentifier::Invalid
        }
    }

    /// Re-validate a parsed identifier against live data.
    fn validate(&self, identifier: &ActorIdentifier) -> ActorIdentifier {
        match identifier {
            ActorIdentifier::Player { name, home_world } => self.create_player(name, *home_world),
            ActorIdentifier::Npc { kind, data_id } => self.create_npc(*kind, *data_id),
            ActorIdentifier::Invalid => ActorIdentifier::Invalid,
        }
    }
}

/// Syntactic check for a full player name.
///
/// Forename and surname separated by a single space, each 2 to 15
/// characters, starting with an uppercase ASCII letter followed by
/// lowercase letters, apostrophes or hyphens, never ending in a separator,
/// with the full name at most 20 characters.
pub fn verify_player_name(name: &str) -> bool {
    if name.len() > MAX_PLAYER_NAME_LEN {
        return false;
    }
    let mut parts = name.split(' ');
    let (Some(first), Some(last), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    verify_name_part(first) && verify_name_part(last)
}

fn verify_name_part(part: &str) -> bool {
    let bytes = part.as_bytes();
    if bytes.len() < 2 || bytes.len() > 15 {
        return false;
    }
    if !bytes[0].is_ascii_uppercase() {
        return false;
    }
    if !bytes[1..]
        .iter()
        .all(|b| b.is_ascii_lowercase() || matches!(b, b'\'' | b'-'))
    {
        return false;
    }
    !matches!(bytes[bytes.len() - 1], b'\'' | b'-')
}

/// Redact a player name to initials for logging.
pub fn abbreviate_player_name(name: &str) -> String {
    let initials: Vec<String> = name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .map(|initial| format!("{initial}."))
        .collect();
    initials.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        assert!(verify_player_name("Aya Brea"));
        assert!(verify_player_name("Rk'aya Tia"));
        assert!(verify_player_name("Jean-luc Moreau"));
    }

    #[test]
    fn rejects_malformed_names() {
        assert!(!verify_player_name("Aya"));
        assert!(!verify_player_name("aya brea"));
        assert!(!verify_player_name("A Brea"));
        assert!(!verify_player_name("Aya  Brea"));
        assert!(!verify_player_name("Aya Brea Third"));
        assert!(!verify_player_name("Aya Brea-"));
        assert!(!verify_player_name("Ayaveryveryverylong Brea"));
        assert!(!verify_player_name("Absolutelyfar Toolongsurnames"));
    }

    #[test]
    fn abbreviation_keeps_initials_only() {
        assert_eq!(abbreviate_player_name("Aya Brea"), "A. B.");
        assert_eq!(abbreviate_player_name("Solo"), "S.");
    }
}
