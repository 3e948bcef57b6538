// shado-sim: a reference implementation of the native side of the Shado
// API table, backed by a plain in-memory scene.
//
// State is thread-local, so every test thread sees its own scene. The scene
// must not be borrowed (via `with_scene`) while a runtime call is in flight:
// the table functions borrow it too, and a double borrow inside an
// `extern "C"` function aborts the process.

mod scene;
mod table;

use std::cell::{Cell, RefCell};

use shado_ffi::{EntityId, FfiCollision2DInfo, LogLevel, ShadoApiTable, ShadoRustCallbacks};

pub use scene::{
    CameraData, CircleData, ColliderData, LineData, RigidBodyData, SimEntity, SimScene,
    SpriteData, TextData, SCENE_EXTENSION,
};

thread_local! {
    static SCENE: RefCell<SimScene> = RefCell::new(SimScene::new());
    static CALLBACKS: Cell<Option<&'static ShadoRustCallbacks>> = const { Cell::new(None) };
}

/// The static API table pointing at this crate's implementations.
pub fn api_table() -> &'static ShadoApiTable {
    &table::TABLE
}

/// Replace the calling thread's scene with an empty one.
pub fn reset() {
    SCENE.with(|s| *s.borrow_mut() = SimScene::new());
}

/// Run `f` against the calling thread's scene.
pub fn with_scene<R>(f: impl FnOnce(&mut SimScene) -> R) -> R {
    SCENE.with(|s| f(&mut s.borrow_mut()))
}

/// Number of boundary calls served on this thread since the last reset.
pub fn boundary_calls() -> u64 {
    with_scene(|s| s.calls())
}

/// Messages received through the logging table on this thread.
pub fn logs() -> Vec<(LogLevel, String)> {
    with_scene(|s| s.logs().to_vec())
}

/// Give the sim the callback table returned by `shado_init`, so it can raise
/// physics contacts on this thread. Survives `reset`.
pub fn set_callbacks(callbacks: &'static ShadoRustCallbacks) {
    CALLBACKS.with(|c| c.set(Some(callbacks)));
}

type ContactFn = extern "C" fn(EntityId, *const FfiCollision2DInfo, EntityId);

/// Raise the start of a contact between `a` and `b`. Like the engine's contact
/// listener, each entity of the pair is told about the other, and nothing is
/// sent unless both are alive. Returns whether callbacks were made.
pub fn begin_contact(a: EntityId, b: EntityId, info: FfiCollision2DInfo) -> bool {
    contact(a, b, info, |cb| cb.collision_enter)
}

/// Raise the end of a contact between `a` and `b`.
pub fn end_contact(a: EntityId, b: EntityId, info: FfiCollision2DInfo) -> bool {
    contact(a, b, info, |cb| cb.collision_leave)
}

fn contact(a: EntityId, b: EntityId, info: FfiCollision2DInfo, pick: fn(&ShadoRustCallbacks) -> ContactFn) -> bool {
    let Some(callbacks) = CALLBACKS.with(Cell::get) else {
        return false;
    };
    // No scene borrow may be held across the callbacks.
    if !with_scene(|s| s.entity(a).is_some() && s.entity(b).is_some()) {
        return false;
    }
    let raise = pick(callbacks);
    raise(a, &info, b);
    raise(b, &info, a);
    true
}

/// Used by the table functions: counts the call, then borrows the scene.
pub(crate) fn boundary<R>(f: impl FnOnce(&mut SimScene) -> R) -> R {
    with_scene(|s| {
        s.count_call();
        f(s)
    })
}
