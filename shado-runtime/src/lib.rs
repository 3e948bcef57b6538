// shado-runtime: Safe Rust API wrapping shado-ffi.
// All unsafe FFI calls are confined to this crate. Macro-generated code and
// user scripts interact only with the safe types exported here.

pub mod api;
pub mod error;
pub mod traits;
pub mod math;
pub mod entity;
pub mod component;
pub mod components;
pub mod hierarchy;
pub mod prefab;
pub mod scene;
pub mod asset;
pub mod event;
pub mod input;
pub mod watch;
pub mod script_registry;
pub mod task_registry;
pub mod editor;
pub mod config;
pub mod logging;
pub mod ffi_guard;

mod buffers;

#[cfg(test)]
mod test_support;

use std::sync::{Mutex, MutexGuard, PoisonError};

use shado_ffi::{ComponentKind, LogLevel};

// Re-export the primary public API surface.
pub use api::{api, init_api, is_api_initialized, scene_lock, ApiGuard};
pub use error::{check_ffi, check_ffi_ctx, ShadoError, ShadoResult};
pub use traits::{AsAny, Collider2D, Coloured, Component, SpriteLike};
pub use entity::EntityRef;
pub use component::ComponentView;
pub use components::*;
pub use prefab::Prefab;
pub use asset::{Font, Shader, Texture2D};
pub use event::{Collision2DInfo, Event, EventCategory, EventType};
pub use input::KeyCode;
pub use watch::EntityWatch;
pub use script_registry::{Script, ScriptRegistration};
pub use task_registry::{spawn_task, CancelToken, TaskHandle};
pub use editor::{EditorField, EditorValue, FieldKind};
pub use config::RuntimeConfig;
pub use math::{ApproxEq, Colour, Transform, DEFAULT_EPSILON};
pub use ffi_guard::ffi_boundary;

// Re-export FFI types that appear in the public API.
pub use shado_ffi::{BodyType, CameraType, EntityId, PrefabId, ShadoErrorCode};

/// Lock a registry mutex, recovering the data if a panicking hook poisoned it.
pub fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Ask the host which component kinds it has registered. Logs an error for
/// each missing kind and returns them.
pub fn verify_component_kinds() -> Vec<ComponentKind> {
    let missing: Vec<ComponentKind> = ComponentKind::ALL
        .into_iter()
        .filter(|kind| !unsafe { ((*api().entity).is_kind_registered)(*kind) })
        .collect();
    for kind in &missing {
        logging::log(LogLevel::Error, &format!("[Shado] component kind {kind} is not registered by the host"));
    }
    missing
}
