// EntityWatch: a local alive flag for one entity.
//
// Creating a watch registers an `AtomicBool` keyed by entity id. When the host
// destroys the entity it calls back into `notify_entity_destroyed`, which
// clears the flag, so `is_alive()` is a memory read instead of a boundary call.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use shado_ffi::EntityId;

use crate::entity::EntityRef;
use crate::error::{ShadoError, ShadoResult};
use crate::lock_or_recover;

// ---------------------------------------------------------------------------
// Alive registry: entity id -> flags of every live watch on it
// ---------------------------------------------------------------------------

type Flags = Vec<Arc<AtomicBool>>;

fn alive_registry() -> &'static Mutex<HashMap<EntityId, Flags>> {
    static REGISTRY: OnceLock<Mutex<HashMap<EntityId, Flags>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Called from the host (via `ShadoRustCallbacks`) when an entity is
/// destroyed. Every watch on it reports dead from then on.
pub fn notify_entity_destroyed(id: EntityId) {
    if let Some(flags) = lock_or_recover(alive_registry()).remove(&id) {
        for flag in flags {
            flag.store(false, Ordering::Relaxed);
        }
    }
}

/// Mark every watch dead and forget them. Called during on_shutdown.
pub fn clear_all() {
    let mut registry = lock_or_recover(alive_registry());
    for flag in registry.values().flatten() {
        flag.store(false, Ordering::Relaxed);
    }
    registry.clear();
}

/// Number of entities with at least one live watch.
pub fn watched_count() -> usize {
    lock_or_recover(alive_registry()).len()
}

// ---------------------------------------------------------------------------
// EntityWatch
// ---------------------------------------------------------------------------

/// Tracks whether an entity has been destroyed without asking the host.
///
/// - `!Clone`: each watch owns one registry slot.
/// - `Drop` unregisters the flag.
pub struct EntityWatch {
    entity: EntityRef,
    alive: Arc<AtomicBool>,
}

impl EntityWatch {
    /// Start watching `entity`. Fails if it is already stale.
    pub fn new(entity: EntityRef) -> ShadoResult<Self> {
        if !entity.is_valid() {
            return Err(ShadoError::StaleEntity);
        }
        let alive = Arc::new(AtomicBool::new(true));
        lock_or_recover(alive_registry())
            .entry(entity.id())
            .or_default()
            .push(alive.clone());
        Ok(EntityWatch { entity, alive })
    }

    /// Local read; no boundary call.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn entity(&self) -> EntityRef {
        self.entity
    }

    /// The entity while the watch reports it alive.
    pub fn checked(&self) -> ShadoResult<EntityRef> {
        if self.is_alive() { Ok(self.entity) } else { Err(ShadoError::StaleEntity) }
    }
}

impl Drop for EntityWatch {
    fn drop(&mut self) {
        let mut registry = lock_or_recover(alive_registry());
        if let Some(flags) = registry.get_mut(&self.entity.id()) {
            flags.retain(|f| !Arc::ptr_eq(f, &self.alive));
            if flags.is_empty() {
                registry.remove(&self.entity.id());
            }
        }
    }
}

impl std::fmt::Debug for EntityWatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityWatch")
            .field("entity", &self.entity)
            .field("alive", &self.is_alive())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{setup, spawn};

    #[test]
    fn destroy_notification_clears_the_flag() {
        let _guard = setup();
        let e = spawn("watched");
        let watch = e.watch().unwrap();
        assert!(watch.is_alive());

        let before = shado_sim::boundary_calls();
        assert!(watch.is_alive());
        assert_eq!(shado_sim::boundary_calls(), before);

        notify_entity_destroyed(e.id());
        assert!(!watch.is_alive());
        assert_eq!(watch.checked(), Err(ShadoError::StaleEntity));
    }

    #[test]
    fn stale_entity_cannot_be_watched() {
        let _guard = setup();
        let e = spawn("gone");
        e.destroy().unwrap();
        assert_eq!(EntityWatch::new(e).unwrap_err(), ShadoError::StaleEntity);
        assert_eq!(EntityWatch::new(EntityRef::NONE).unwrap_err(), ShadoError::StaleEntity);
    }

    #[test]
    fn two_watches_on_one_entity() {
        let _guard = setup();
        let e = spawn("twice");
        let a = e.watch().unwrap();
        let b = e.watch().unwrap();
        drop(a);
        assert_eq!(watched_count(), 1);
        notify_entity_destroyed(e.id());
        assert!(!b.is_alive());
        drop(b);
        assert_eq!(watched_count(), 0);
    }

    #[test]
    fn drop_unregisters_and_clear_all_kills() {
        let _guard = setup();
        let e = spawn("short");
        drop(e.watch().unwrap());
        assert_eq!(watched_count(), 0);

        let w = spawn("long").watch().unwrap();
        clear_all();
        assert!(!w.is_alive());
        assert_eq!(watched_count(), 0);
    }
}
