//! Serializable form of one persisted assignment record.
//!
//! The on-disk file is an ordered array of these objects. Each record is
//! the canonical identifier fields of the group's first member with two
//! added keys: the bound collection's name and an advisory display name.
//! Absent or `null` top-level data means "no assignments".

use crate::actor::identity::ActorIdentifier;
use serde::{Deserialize, Serialize};

/// One persisted assignment record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedAssignment {
    #[serde(flatten)]
    pub identifier: ActorIdentifier,
    #[serde(rename = "Collection")]
    pub collection: String,
    /// Advisory only; never used for lookup.
    #[serde(rename = "Display", default)]
    pub display: String,
}
