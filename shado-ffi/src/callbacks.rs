use crate::handles::EntityId;
use crate::types::{FfiCollision2DInfo, RawEvent};

/// Callback table filled by Rust and returned to the host from `shado_init`.
/// The host calls into Rust through these function pointers.
#[repr(C)]
pub struct ShadoRustCallbacks {
    /// Create the script instance named by a ScriptComponent's class name.
    /// Returns false when no script type of that name is registered.
    pub create_script: extern "C" fn(entity: EntityId, class_name: *const u8, class_name_len: u32) -> bool,

    /// Per-frame update for one entity's script instance.
    pub update_script: extern "C" fn(entity: EntityId, timestep: f32),

    /// Forward an input/window event to one entity's script. Returns whether
    /// the script marked it handled.
    pub dispatch_event: extern "C" fn(entity: EntityId, event: *const RawEvent) -> bool,

    /// Two bodies started touching. Called once per entity of the pair, with
    /// `other` set to the opposite entity.
    pub collision_enter: extern "C" fn(entity: EntityId, info: *const FfiCollision2DInfo, other: EntityId),

    /// Two bodies stopped touching. Same pairing as `collision_enter`.
    pub collision_leave: extern "C" fn(entity: EntityId, info: *const FfiCollision2DInfo, other: EntityId),

    /// Run the script's destroy hook and drop the instance.
    pub destroy_script: extern "C" fn(entity: EntityId),

    /// Called by the host whenever an entity leaves the scene for any reason
    /// (explicit destroy, scene unload).
    pub notify_entity_destroyed: extern "C" fn(entity: EntityId),

    /// Shutdown notification: Rust must release all resources and stop all
    /// background tasks before returning.
    pub on_shutdown: extern "C" fn(),
}
