// Shared fixture for unit tests: the sim's API table plus serialized access
// to the process-wide registries.

use std::sync::{Mutex, MutexGuard, Once};

use crate::entity::EntityRef;
use crate::{lock_or_recover, script_registry, task_registry, watch};

static INIT: Once = Once::new();
static SERIAL: Mutex<()> = Mutex::new(());

/// Install the sim table once, then give the calling test a fresh scene and
/// empty registries. Hold the guard for the whole test.
pub(crate) fn setup() -> MutexGuard<'static, ()> {
    INIT.call_once(|| crate::api::init_api(shado_sim::api_table()));
    let guard = lock_or_recover(&SERIAL);
    shado_sim::reset();
    watch::clear_all();
    script_registry::clear_all();
    script_registry::set_failure_limit(0);
    task_registry::shutdown_all();
    guard
}

/// Create a named entity in the current scene.
pub(crate) fn spawn(name: &str) -> EntityRef {
    crate::scene::create_entity(name).unwrap()
}
