//! Actor identity model: identifiers, equivalence groups, and the naming
//! service interface they are validated against.

pub mod identity;
pub mod naming;

pub use identity::{ActorIdentifier, IdentityGroup, NpcKind};
pub use naming::{NamingService, abbreviate_player_name, verify_player_name};
