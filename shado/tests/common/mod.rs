// Shared fixture for the integration suites: runs `shado::init` once against
// the sim's API table and serializes tests around the global registries.

#![allow(dead_code)]

use std::sync::{Mutex, MutexGuard, OnceLock};

use shado::ffi::ShadoRustCallbacks;
use shado::runtime::{lock_or_recover, script_registry, EntityRef};

static CALLBACKS: OnceLock<&'static ShadoRustCallbacks> = OnceLock::new();
static SERIAL: Mutex<()> = Mutex::new(());

/// Callback table returned by `shado::init`.
pub fn callbacks() -> &'static ShadoRustCallbacks {
    CALLBACKS.get_or_init(|| {
        let ptr = shado::init(shado_sim::api_table());
        assert!(!ptr.is_null(), "shado::init failed");
        unsafe { &*ptr }
    })
}

/// Fresh scene, empty instance table, every `#[script]` type registered.
pub fn setup() -> MutexGuard<'static, ()> {
    let cb = callbacks();
    let guard = lock_or_recover(&SERIAL);
    (cb.on_shutdown)();
    script_registry::register_all_from_inventory();
    script_registry::set_failure_limit(0);
    shado_sim::reset();
    shado_sim::set_callbacks(cb);
    guard
}

pub fn spawn(name: &str) -> EntityRef {
    shado::runtime::scene::create_entity(name).unwrap()
}

/// Host-side create_script call.
pub fn create_script(entity: EntityRef, class: &str) -> bool {
    (callbacks().create_script)(entity.id(), class.as_ptr(), class.len() as u32)
}
