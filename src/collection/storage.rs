//! Collections and the name-keyed store the registry resolves them from.
//!
//! A collection is an opaque override profile: the resolver only needs its
//! meta cache, the registry only its name. Creation and destruction are
//! driven by an external storage component; everything here holds shared
//! references and never owns a collection's lifecycle.

use crate::game::meta::MetaCache;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Named override profile with an optional metadata cache.
pub struct Collection {
    name: String,
    meta: Option<Rc<dyn MetaCache>>,
}

impl Collection {
    pub fn new(name: impl Into<String>, meta: Option<Rc<dyn MetaCache>>) -> Self {
        Self {
            name: name.into(),
            meta,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The collection's metadata cache, when one has been built.
    ///
    /// Absence is not an error; resolution falls back to base behavior.
    pub fn meta_cache(&self) -> Option<&dyn MetaCache> {
        self.meta.as_deref()
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.name)
            .field("meta", &self.meta.is_some())
            .finish()
    }
}

/// In-memory store of collections, looked up case-insensitively by name.
#[derive(Default)]
pub struct CollectionStorage {
    by_name: BTreeMap<String, Rc<Collection>>,
}

impl CollectionStorage {
    /// Register a collection for later lookup, replacing any previous
    /// collection with the same name.
    pub fn register(&mut self, collection: Rc<Collection>) {
        self.by_name
            .insert(collection.name().to_lowercase(), collection);
    }

    /// Remove a collection by name.
    pub fn remove(&mut self, name: &str) -> Option<Rc<Collection>> {
        self.by_name.remove(&name.to_lowercase())
    }

    /// Fetch a collection by name, if present.
    pub fn by_name(&self, name: &str) -> Option<Rc<Collection>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
