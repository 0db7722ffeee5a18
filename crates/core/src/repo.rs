use crate::error::{BuildError, Result};
use crate::model::ClassInfo;
use classmeta_api::to_qualified_name;
use dashmap::DashMap;
use once_cell::sync::{Lazy, OnceCell};
use std::sync::Arc;

/// Per-identity cell of the repository. Pending until the class's builder
/// publishes it, then fixed for the rest of the run.
#[derive(Debug)]
pub struct ClassSlot {
    qualified_name: String,
    info: OnceCell<Arc<ClassInfo>>,
}

pub type ClassRef = Arc<ClassSlot>;

impl ClassSlot {
    fn pending(qualified_name: String) -> Self {
        Self {
            qualified_name,
            info: OnceCell::new(),
        }
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// The finished class, or `None` while it is still being built (or was
    /// only ever referenced).
    pub fn get(&self) -> Option<&Arc<ClassInfo>> {
        self.info.get()
    }

    pub fn is_built(&self) -> bool {
        self.info.get().is_some()
    }

    pub(crate) fn publish(&self, info: Arc<ClassInfo>) -> Result<()> {
        self.info
            .set(info)
            .map_err(|_| BuildError::AlreadyBuilt(self.qualified_name.clone()))
    }
}

static GLOBAL: Lazy<ClassInfoRepo> = Lazy::new(ClassInfoRepo::new);

/// Lookup table from class identity to its slot, shared by every builder of
/// one extraction run. Cloning shares the table.
///
/// Identities may be given in internal (`com/acme/Bench`) or qualified
/// (`com.acme.Bench`) form; both address the same slot.
#[derive(Debug, Clone, Default)]
pub struct ClassInfoRepo {
    slots: Arc<DashMap<String, ClassRef>>,
}

impl ClassInfoRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide repository. It is never cleared.
    pub fn global() -> &'static ClassInfoRepo {
        &GLOBAL
    }

    /// Returns the slot for `identity`, registering a pending one on first
    /// request. Every caller gets the same `Arc`.
    pub fn get_or_create(&self, identity: &str) -> ClassRef {
        let key = to_qualified_name(identity);
        let entry = self.slots.entry(key.clone()).or_insert_with(|| {
            tracing::trace!("registering class slot {}", key);
            Arc::new(ClassSlot::pending(key))
        });
        Arc::clone(entry.value())
    }

    /// Looks up a slot without registering it.
    pub fn get(&self, identity: &str) -> Option<ClassRef> {
        self.slots
            .get(&to_qualified_name(identity))
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.slots.contains_key(&to_qualified_name(identity))
    }

    /// The finished class for `identity`, if it has been built.
    pub fn resolve(&self, identity: &str) -> Option<Arc<ClassInfo>> {
        self.get(identity).and_then(|slot| slot.get().cloned())
    }

    /// All finished classes, ordered by qualified name.
    pub fn built(&self) -> Vec<Arc<ClassInfo>> {
        let mut classes: Vec<Arc<ClassInfo>> = self
            .slots
            .iter()
            .filter_map(|entry| entry.value().get().cloned())
            .collect();
        classes.sort_by(|a, b| a.qualified_name().cmp(b.qualified_name()));
        classes
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
