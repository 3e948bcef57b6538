// Script registry: Rust script types and the live instance attached to each
// scripted entity.
//
// Two registries:
// 1. Type registry: maps class name -> constructor
// 2. Instances: maps entity id -> boxed script plus failure bookkeeping
//
// Hooks never run under a lock. The instance is taken out of its slot, the
// hook runs, and the instance is put back, so a hook may freely call into the
// host (which can re-enter this registry, e.g. by destroying an entity or
// creating a new script on it). Each slot carries a generation; an instance
// whose slot was destroyed or replaced while it was out gets its `on_destroy`
// when it comes back instead of being restored.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};

use shado_ffi::{EntityId, LogLevel, RawEvent};

use crate::editor::EditorField;
use crate::entity::EntityRef;
use crate::error::ShadoResult;
use crate::event::{Collision2DInfo, Event};
use crate::ffi_guard::panic_message;
use crate::traits::AsAny;
use crate::{lock_or_recover, logging};

/// Behaviour attached to an entity through its Script component.
///
/// Every hook has a default, so a script implements only what it needs.
/// A hook that returns `Err` or panics is logged and counted as a failure;
/// the rest of the frame carries on.
pub trait Script: AsAny + Send {
    fn on_create(&mut self, _entity: EntityRef) -> ShadoResult<()> {
        Ok(())
    }

    fn on_update(&mut self, _entity: EntityRef, _ts: f32) -> ShadoResult<()> {
        Ok(())
    }

    /// Return `Ok(true)` to mark the event handled.
    fn on_event(&mut self, _entity: EntityRef, _event: &Event) -> ShadoResult<bool> {
        Ok(false)
    }

    /// `other` started touching this entity's body.
    fn on_collision_enter(&mut self, _entity: EntityRef, _info: &Collision2DInfo, _other: EntityRef) -> ShadoResult<()> {
        Ok(())
    }

    /// `other` stopped touching this entity's body.
    fn on_collision_leave(&mut self, _entity: EntityRef, _info: &Collision2DInfo, _other: EntityRef) -> ShadoResult<()> {
        Ok(())
    }

    fn on_destroy(&mut self, _entity: EntityRef) -> ShadoResult<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Inventory-based auto-registration
// ---------------------------------------------------------------------------

/// Submitted by `#[script]`: class name, constructor and editor fields.
pub struct ScriptRegistration {
    pub name: &'static str,
    pub construct: fn() -> Box<dyn Script>,
    pub fields: &'static [EditorField],
}
inventory::collect!(ScriptRegistration);

/// Register every `#[script]` type linked into the binary. Returns the count.
pub fn register_all_from_inventory() -> usize {
    let mut count = 0;
    for reg in inventory::iter::<ScriptRegistration> {
        register(reg.name, reg.construct);
        count += 1;
    }
    tracing::info!(count, "registered script types");
    count
}

// ---------------------------------------------------------------------------
// Statics
// ---------------------------------------------------------------------------

struct Slot {
    class: &'static str,
    generation: u64,
    /// `None` while a hook is running.
    script: Option<Box<dyn Script>>,
    failures: u32,
    disabled: bool,
    /// The host destroyed the entity while a hook was running.
    destroy_pending: bool,
}

static FAILURE_LIMIT: AtomicU32 = AtomicU32::new(0);
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);
/// Bumped by `clear_instances`, so an instance that was out during a clear
/// is dropped quietly.
static CLEAR_EPOCH: AtomicU64 = AtomicU64::new(0);

fn type_registry() -> &'static Mutex<HashMap<&'static str, fn() -> Box<dyn Script>>> {
    static REGISTRY: OnceLock<Mutex<HashMap<&'static str, fn() -> Box<dyn Script>>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

fn instances() -> &'static Mutex<HashMap<EntityId, Slot>> {
    static INSTANCES: OnceLock<Mutex<HashMap<EntityId, Slot>>> = OnceLock::new();
    INSTANCES.get_or_init(|| Mutex::new(HashMap::new()))
}

// ---------------------------------------------------------------------------
// Type registry
// ---------------------------------------------------------------------------

/// Register a script type under `name`. A later registration replaces an
/// earlier one.
pub fn register(name: &'static str, construct: fn() -> Box<dyn Script>) {
    if lock_or_recover(type_registry()).insert(name, construct).is_some() {
        tracing::warn!(script = name, "script type registered twice");
    }
}

pub fn is_registered(name: &str) -> bool {
    lock_or_recover(type_registry()).contains_key(name)
}

/// Sorted names of every registered script type.
pub fn registered_scripts() -> Vec<&'static str> {
    let mut names: Vec<_> = lock_or_recover(type_registry()).keys().copied().collect();
    names.sort_unstable();
    names
}

/// Disable an instance after `limit` consecutive failed hooks. 0 never
/// disables.
pub fn set_failure_limit(limit: u32) {
    FAILURE_LIMIT.store(limit, Ordering::Relaxed);
}

// ---------------------------------------------------------------------------
// Instances
// ---------------------------------------------------------------------------

/// Construct `class_name` for `entity` and run its `on_create`. An existing
/// instance on the entity is destroyed first; when one of its hooks is
/// running, it is destroyed as soon as that hook returns. Returns false when
/// the class is unknown or construction or `on_create` failed.
pub fn create_instance(entity: EntityId, class_name: &str) -> bool {
    let Some((class, construct)) = lock_or_recover(type_registry())
        .get_key_value(class_name)
        .map(|(name, construct)| (*name, *construct))
    else {
        logging::log(LogLevel::Error, &format!("[Shado] unknown script class '{class_name}' on {entity}"));
        return false;
    };

    destroy_instance(entity);

    let script = match std::panic::catch_unwind(construct) {
        Ok(script) => script,
        Err(payload) => {
            logging::log(LogLevel::Error, &format!("{} (constructing {class})", panic_message(payload.as_ref())));
            return false;
        }
    };
    lock_or_recover(instances()).insert(
        entity,
        Slot {
            class,
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
            script: Some(script),
            failures: 0,
            disabled: false,
            destroy_pending: false,
        },
    );
    tracing::debug!(entity = %entity, script = class, "script instance created");

    run_hook(entity, "on_create", |s| s.on_create(EntityRef::from_id(entity))).is_some()
}

/// Run `on_update` for the entity's instance. Skipped for disabled or absent
/// instances.
pub fn update(entity: EntityId, ts: f32) {
    run_hook(entity, "on_update", |s| s.on_update(EntityRef::from_id(entity), ts));
}

/// Decode `raw` and offer it to the entity's instance. Returns whether the
/// event is handled afterwards.
pub fn dispatch_event(entity: EntityId, raw: &RawEvent) -> bool {
    let event = match Event::decode(raw) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(entity = %entity, "dropping event: {e}");
            return raw.handled;
        }
    };
    let handled = run_hook(entity, "on_event", |s| s.on_event(EntityRef::from_id(entity), &event));
    raw.handled || handled.unwrap_or(false)
}

/// Offer a collision start to the entity's instance.
pub fn collision_enter(entity: EntityId, info: &Collision2DInfo, other: EntityId) {
    run_hook(entity, "on_collision_enter", |s| {
        s.on_collision_enter(EntityRef::from_id(entity), info, EntityRef::from_id(other))
    });
}

/// Offer a collision end to the entity's instance.
pub fn collision_leave(entity: EntityId, info: &Collision2DInfo, other: EntityId) {
    run_hook(entity, "on_collision_leave", |s| {
        s.on_collision_leave(EntityRef::from_id(entity), info, EntityRef::from_id(other))
    });
}

/// Run `on_destroy` and drop the instance. No-op when none exists.
pub fn destroy_instance(entity: EntityId) {
    let taken = {
        let mut map = lock_or_recover(instances());
        match map.get_mut(&entity) {
            None => return,
            // A hook is running on it; the hook's caller finishes the job.
            Some(slot) if slot.script.is_none() => {
                slot.destroy_pending = true;
                return;
            }
            Some(_) => map.remove(&entity),
        }
    };
    if let Some(slot) = taken {
        finish_destroy(entity, slot.class, slot.script);
    }
}

fn finish_destroy(entity: EntityId, class: &'static str, script: Option<Box<dyn Script>>) {
    let Some(mut script) = script else { return };
    let result = std::panic::catch_unwind(AssertUnwindSafe(|| script.on_destroy(EntityRef::from_id(entity))));
    report(entity, class, "on_destroy", result);
    tracing::debug!(entity = %entity, script = class, "script instance destroyed");
}

/// Run `f` against the entity's instance when it is an `S`. `None` when there
/// is no instance, it has another type, or one of its own hooks is running.
pub fn with_instance<S: Script, R>(entity: EntityId, f: impl FnOnce(&mut S) -> R) -> Option<R> {
    let (taken, mut script) = take(entity, false)?;
    let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
        <dyn Script as AsAny>::as_any_mut(&mut *script).downcast_mut::<S>().map(f)
    }));
    restore(entity, taken, script, None);
    match result {
        Ok(value) => value,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

pub fn has_instance(entity: EntityId) -> bool {
    lock_or_recover(instances()).contains_key(&entity)
}

/// Class name of the entity's instance.
pub fn instance_class(entity: EntityId) -> Option<&'static str> {
    lock_or_recover(instances()).get(&entity).map(|slot| slot.class)
}

pub fn is_disabled(entity: EntityId) -> bool {
    lock_or_recover(instances()).get(&entity).is_some_and(|slot| slot.disabled)
}

/// Consecutive failed hooks since the last success.
pub fn failure_count(entity: EntityId) -> u32 {
    lock_or_recover(instances()).get(&entity).map_or(0, |slot| slot.failures)
}

pub fn instance_count() -> usize {
    lock_or_recover(instances()).len()
}

/// Drop every instance without running hooks.
pub fn clear_instances() {
    let mut map = lock_or_recover(instances());
    CLEAR_EPOCH.fetch_add(1, Ordering::AcqRel);
    map.clear();
}

/// Forget every instance and registered type. Called during on_shutdown.
pub fn clear_all() {
    clear_instances();
    lock_or_recover(type_registry()).clear();
}

// ---------------------------------------------------------------------------
// Hook execution
// ---------------------------------------------------------------------------

/// Where a taken instance came from.
struct Taken {
    class: &'static str,
    generation: u64,
    epoch: u64,
}

/// Take the instance out of its slot. `None` when there is none, it is
/// already out, or (with `skip_disabled`) it has been disabled.
fn take(entity: EntityId, skip_disabled: bool) -> Option<(Taken, Box<dyn Script>)> {
    let mut map = lock_or_recover(instances());
    let slot = map.get_mut(&entity)?;
    if skip_disabled && slot.disabled {
        return None;
    }
    let script = slot.script.take()?;
    let taken = Taken { class: slot.class, generation: slot.generation, epoch: CLEAR_EPOCH.load(Ordering::Acquire) };
    Some((taken, script))
}

/// Take the instance out, run `hook`, put it back, and book the outcome.
/// `None` when the hook did not run or did not succeed.
fn run_hook<R>(
    entity: EntityId,
    hook: &'static str,
    f: impl FnOnce(&mut dyn Script) -> ShadoResult<R>,
) -> Option<R> {
    let (taken, mut script) = take(entity, true)?;

    let result = std::panic::catch_unwind(AssertUnwindSafe(|| f(&mut *script)));
    let succeeded = result.as_ref().is_ok_and(|r| r.is_ok());
    let value = report(entity, taken.class, hook, result);

    restore(entity, taken, script, Some(succeeded));
    value
}

/// Return a taken instance to its slot, booking `outcome` when given. When
/// the slot was destroyed or replaced meanwhile, the instance is destroyed
/// instead.
fn restore(entity: EntityId, taken: Taken, script: Box<dyn Script>, outcome: Option<bool>) {
    let leftover = {
        let mut map = lock_or_recover(instances());
        match map.get_mut(&entity) {
            Some(slot) if slot.generation == taken.generation && !slot.destroy_pending => {
                if let Some(succeeded) = outcome {
                    book(entity, slot, succeeded);
                }
                slot.script = Some(script);
                return;
            }
            Some(slot) if slot.generation == taken.generation => {
                map.remove(&entity);
                Some(script)
            }
            // Replaced by a newer instance, which stays.
            Some(_) => Some(script),
            None if CLEAR_EPOCH.load(Ordering::Acquire) == taken.epoch => Some(script),
            None => None,
        }
    };
    if let Some(script) = leftover {
        finish_destroy(entity, taken.class, Some(script));
    }
}

/// Log a failed hook and unwrap a successful one.
fn report<R>(
    entity: EntityId,
    class: &str,
    hook: &str,
    result: std::thread::Result<ShadoResult<R>>,
) -> Option<R> {
    match result {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            logging::log(LogLevel::Error, &format!("[Shado] {class}::{hook} failed on {entity}: {e}"));
            None
        }
        Err(payload) => {
            logging::log(
                LogLevel::Error,
                &format!("{} ({class}::{hook} on {entity})", panic_message(payload.as_ref())),
            );
            None
        }
    }
}

fn book(entity: EntityId, slot: &mut Slot, succeeded: bool) {
    if succeeded {
        slot.failures = 0;
        return;
    }
    slot.failures += 1;
    let limit = FAILURE_LIMIT.load(Ordering::Relaxed);
    if limit > 0 && slot.failures >= limit {
        slot.disabled = true;
        logging::log(
            LogLevel::Warn,
            &format!("[Shado] {} on {entity} disabled after {} consecutive failures", slot.class, slot.failures),
        );
    }
}
