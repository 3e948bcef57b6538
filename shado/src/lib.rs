// shado: User-facing library crate. Game crates depend on this and use
// `shado::entry!()` to generate the library entry points in their own cdylib.

// Re-exports for proc macro path resolution and user access.
pub use shado_ffi as ffi;
pub use shado_runtime as runtime;
pub use shado_macros::script;
pub use shado_runtime::slog;

// For proc macro generated inventory::submit! invocations.
#[doc(hidden)]
pub extern crate inventory as __inventory;

pub mod prelude;

// Re-export glam for convenience.
pub use glam;

use std::path::Path;

use ffi::LogLevel;
use runtime::config::{self, RuntimeConfig, CONFIG_FILE};

// ---------------------------------------------------------------------------
// Callbacks (shared between init and entry! macro)
// ---------------------------------------------------------------------------

extern "C" fn real_create_script(entity: ffi::EntityId, class_name: *const u8, class_name_len: u32) -> bool {
    runtime::ffi_boundary(false, || {
        if class_name.is_null() {
            return false;
        }
        // SAFETY: the host passes a buffer of `class_name_len` bytes that
        // stays valid for the duration of the call.
        let bytes = unsafe { std::slice::from_raw_parts(class_name, class_name_len as usize) };
        match std::str::from_utf8(bytes) {
            Ok(name) => runtime::script_registry::create_instance(entity, name),
            Err(_) => {
                slog!(LogLevel::Error, "[Shado] script class name on {entity} is not valid UTF-8");
                false
            }
        }
    })
}

extern "C" fn real_update_script(entity: ffi::EntityId, timestep: f32) {
    runtime::ffi_boundary((), || {
        runtime::script_registry::update(entity, timestep);
    });
}

extern "C" fn real_dispatch_event(entity: ffi::EntityId, event: *const ffi::RawEvent) -> bool {
    runtime::ffi_boundary(false, || {
        // SAFETY: a non-null event pointer is valid for the duration of the call.
        match unsafe { event.as_ref() } {
            Some(raw) => runtime::script_registry::dispatch_event(entity, raw),
            None => false,
        }
    })
}

fn collision(
    entity: ffi::EntityId,
    info: *const ffi::FfiCollision2DInfo,
    other: ffi::EntityId,
    dispatch: fn(ffi::EntityId, &runtime::Collision2DInfo, ffi::EntityId),
) {
    // SAFETY: a non-null info pointer is valid for the duration of the call.
    let info = unsafe { info.as_ref() }.copied().unwrap_or_default();
    dispatch(entity, &info.into(), other);
}

extern "C" fn real_collision_enter(entity: ffi::EntityId, info: *const ffi::FfiCollision2DInfo, other: ffi::EntityId) {
    runtime::ffi_boundary((), || collision(entity, info, other, runtime::script_registry::collision_enter));
}

extern "C" fn real_collision_leave(entity: ffi::EntityId, info: *const ffi::FfiCollision2DInfo, other: ffi::EntityId) {
    runtime::ffi_boundary((), || collision(entity, info, other, runtime::script_registry::collision_leave));
}

extern "C" fn real_destroy_script(entity: ffi::EntityId) {
    runtime::ffi_boundary((), || {
        runtime::script_registry::destroy_instance(entity);
    });
}

extern "C" fn real_notify_entity_destroyed(entity: ffi::EntityId) {
    runtime::ffi_boundary((), || {
        runtime::watch::notify_entity_destroyed(entity);
        runtime::script_registry::destroy_instance(entity);
    });
}

extern "C" fn real_on_shutdown() {
    runtime::ffi_boundary((), || {
        runtime::task_registry::shutdown_all();
        runtime::script_registry::clear_all();
        runtime::watch::clear_all();
    });
}

#[doc(hidden)]
pub static __CALLBACKS: ffi::ShadoRustCallbacks = ffi::ShadoRustCallbacks {
    create_script: real_create_script,
    update_script: real_update_script,
    dispatch_event: real_dispatch_event,
    collision_enter: real_collision_enter,
    collision_leave: real_collision_leave,
    destroy_script: real_destroy_script,
    notify_entity_destroyed: real_notify_entity_destroyed,
    on_shutdown: real_on_shutdown,
};

// ---------------------------------------------------------------------------
// Init / Shutdown (called from entry!() generated code)
// ---------------------------------------------------------------------------

/// Initialize the Shado runtime. Called by the `entry!()` generated
/// `shado_init`.
///
/// Stores the API table, reads `shado.toml`, installs logging, checks the
/// host's component kinds, registers all `#[script]` types, and returns the
/// callback table pointer. Returns null on failure.
pub fn init(api_table: *const ffi::ShadoApiTable) -> *const ffi::ShadoRustCallbacks {
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        if api_table.is_null() {
            return std::ptr::null();
        }

        runtime::init_api(api_table);

        let config = match RuntimeConfig::load(Path::new(CONFIG_FILE)) {
            Ok(config) => config,
            Err(e) => {
                slog!(LogLevel::Error, "[Shado] {e}; using default configuration");
                RuntimeConfig::default()
            }
        };
        if let Err(e) = runtime::logging::install_subscriber(&config.logging.filter) {
            slog!(LogLevel::Warn, "[Shado] {e}");
        }
        runtime::script_registry::set_failure_limit(config.scripts.max_consecutive_failures);
        config::install(config);

        slog!(LogLevel::Info, "[Shado] Rust side initialized (API v{})", ffi::SHADO_API_VERSION);
        runtime::verify_component_kinds();
        runtime::script_registry::register_all_from_inventory();
        &__CALLBACKS as *const ffi::ShadoRustCallbacks
    }))
    .unwrap_or(std::ptr::null())
}

/// Shut down the Shado runtime. Called by the `entry!()` generated
/// `shado_shutdown`.
pub fn shutdown() {
    let _ = std::panic::catch_unwind(|| {
        (__CALLBACKS.on_shutdown)();
    });
    tracing::info!("runtime shut down");
}

/// Generates the library exports for the Shado runtime entry points.
///
/// Place this at the top of your cdylib crate's `lib.rs`:
/// ```ignore
/// shado::entry!();
/// ```
///
/// Generates `shado_init` / `shado_shutdown` exports.
#[macro_export]
macro_rules! entry {
    () => {
        mod __shado_native_entry {
            #[unsafe(no_mangle)]
            pub extern "C" fn shado_init(
                api_table: *const $crate::ffi::ShadoApiTable,
            ) -> *const $crate::ffi::ShadoRustCallbacks {
                $crate::init(api_table)
            }

            #[unsafe(no_mangle)]
            pub extern "C" fn shado_shutdown() {
                $crate::shutdown()
            }
        }
    };
}
