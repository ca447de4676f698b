//! Resolution core of a game-asset override manager.
//!
//! Two subsystems form the crate: the assignment registry, a persisted
//! mapping from actor identity to an override profile ("collection"), and
//! the path resolver, which reconstructs the virtual asset path the game
//! should load for a character's models, materials and skeletons. The
//! public traits here are the contract with the host plugin: it supplies
//! the naming service, the native fallback resolver, the model descriptor
//! mapping, and the collections with their metadata caches; this crate
//! supplies the resolution and registry semantics.

pub mod actor;
pub mod collection;
pub mod game;
pub mod notify;
pub mod registry;
pub mod resolve;

pub use actor::{
    ActorIdentifier, IdentityGroup, NamingService, NpcKind, abbreviate_player_name,
    verify_player_name,
};
pub use collection::{Collection, CollectionStorage};
pub use game::{
    EqdpEntry, EqdpSlotBits, EquipSlot, EquipmentDescriptor, EstType, GamePath, GenderRace,
    ImcData, ImcEntry, MetaCache, PATH_CAPACITY, SetId, Variant,
};
pub use notify::{LogNotifier, NotificationType, Notifier, OneShotEvent};
pub use registry::{
    Assignment, IndividualAssignments, LoadState, MigrationReport, SavedAssignment,
    UNKNOWN_HOME_WORLD,
};
pub use resolve::{
    CustomizeIndex, ModelDescriptor, ModelKind, NativeResolver, ResolveContext, SkeletonData,
};
