use crate::error::ShadoErrorCode;
use crate::handles::*;
use crate::kinds::*;
use crate::types::*;

// String convention used throughout: strings cross as UTF-8 (ptr, len), never
// null-terminated. Native-to-Rust strings are written into a caller buffer;
// `out_len` always receives the full length, and a buffer shorter than that
// yields `BufferTooSmall` with nothing written.
//
// Id-list convention (`get_children`, `get_all`): `out_count` receives the
// total number of ids and at most `buf_len` of them are written. Passing a
// null buffer with `buf_len == 0` is the way to ask for the count.

// ---------------------------------------------------------------------------
// Main API table
// ---------------------------------------------------------------------------

/// The table passed from the native engine to Rust at init time. Each
/// sub-table groups one call family; pointers stay valid until shutdown.
#[repr(C)]
pub struct ShadoApiTable {
    pub version: u32,

    pub entity: *const ShadoEntityApi,
    pub transform: *const ShadoTransformApi,
    pub render: *const ShadoRenderApi,
    pub physics: *const ShadoPhysicsApi,
    pub camera: *const ShadoCameraApi,
    pub text: *const ShadoTextApi,
    pub script: *const ShadoScriptApi,
    pub scene: *const ShadoSceneApi,
    pub asset: *const ShadoAssetApi,
    pub input: *const ShadoInputApi,
    pub logging: *const ShadoLoggingApi,
}

unsafe impl Send for ShadoApiTable {}
unsafe impl Sync for ShadoApiTable {}

// ---------------------------------------------------------------------------
// ShadoEntityApi
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct ShadoEntityApi {
    /// Liveness query against the active scene.
    pub is_valid: unsafe extern "C" fn(entity: EntityId) -> bool,

    /// Whether the native registry knows how to add/has/remove this kind.
    pub is_kind_registered: unsafe extern "C" fn(kind: ComponentKind) -> bool,

    /// False for stale entities and absent kinds.
    pub has_component: unsafe extern "C" fn(entity: EntityId, kind: ComponentKind) -> bool,

    /// No-op (returns `Ok`) when the component already exists.
    pub add_component: unsafe extern "C" fn(entity: EntityId, kind: ComponentKind) -> ShadoErrorCode,

    /// Returns whether a component was actually removed.
    pub remove_component: unsafe extern "C" fn(entity: EntityId, kind: ComponentKind) -> bool,

    /// Create an empty entity (Tag + Transform). Returns `EntityId::NONE` on failure.
    pub create: unsafe extern "C" fn(name: *const u8, name_len: u32) -> EntityId,

    pub destroy: unsafe extern "C" fn(entity: EntityId) -> ShadoErrorCode,

    /// Returns `EntityId::NONE` when no entity carries that tag.
    pub find_by_name: unsafe extern "C" fn(name: *const u8, name_len: u32) -> EntityId,

    pub get_tag: unsafe extern "C" fn(
        entity: EntityId,
        buf: *mut u8,
        buf_len: u32,
        out_len: *mut u32,
    ) -> ShadoErrorCode,
    pub set_tag: unsafe extern "C" fn(entity: EntityId, tag: *const u8, tag_len: u32) -> ShadoErrorCode,

    /// Writes `EntityId::NONE` for roots.
    pub get_parent: unsafe extern "C" fn(entity: EntityId, out: *mut EntityId) -> ShadoErrorCode,

    /// `parent == EntityId::NONE` detaches to root.
    pub set_parent: unsafe extern "C" fn(entity: EntityId, parent: EntityId) -> ShadoErrorCode,

    pub get_children: unsafe extern "C" fn(
        entity: EntityId,
        buf: *mut EntityId,
        buf_len: u32,
        out_count: *mut u32,
    ) -> ShadoErrorCode,

    /// Every live entity in the active scene.
    pub get_all: unsafe extern "C" fn(
        buf: *mut EntityId,
        buf_len: u32,
        out_count: *mut u32,
    ) -> ShadoErrorCode,
}

// ---------------------------------------------------------------------------
// ShadoTransformApi
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct ShadoTransformApi {
    pub get_transform: unsafe extern "C" fn(entity: EntityId, out: *mut FfiTransform) -> ShadoErrorCode,
    /// Overwrites translation, rotation and scale together.
    pub set_transform: unsafe extern "C" fn(entity: EntityId, value: *const FfiTransform) -> ShadoErrorCode,
}

// ---------------------------------------------------------------------------
// ShadoRenderApi
// ---------------------------------------------------------------------------

/// Renderer properties. `kind` selects the native field layout: colour is
/// shared by SpriteRenderer, CircleRenderer, LineRenderer and Text; texture
/// and tiling by SpriteRenderer and CircleRenderer.
#[repr(C)]
pub struct ShadoRenderApi {
    pub get_colour: unsafe extern "C" fn(entity: EntityId, kind: ComponentKind, out: *mut FfiVec4) -> ShadoErrorCode,
    pub set_colour: unsafe extern "C" fn(entity: EntityId, kind: ComponentKind, value: *const FfiVec4) -> ShadoErrorCode,

    pub get_tiling_factor: unsafe extern "C" fn(entity: EntityId, kind: ComponentKind, out: *mut f32) -> ShadoErrorCode,
    pub set_tiling_factor: unsafe extern "C" fn(entity: EntityId, kind: ComponentKind, value: f32) -> ShadoErrorCode,

    pub get_texture: unsafe extern "C" fn(entity: EntityId, kind: ComponentKind, out: *mut TextureHandle) -> ShadoErrorCode,
    pub set_texture: unsafe extern "C" fn(entity: EntityId, kind: ComponentKind, value: TextureHandle) -> ShadoErrorCode,

    pub get_circle_f32: unsafe extern "C" fn(entity: EntityId, field: CircleField, out: *mut f32) -> ShadoErrorCode,
    pub set_circle_f32: unsafe extern "C" fn(entity: EntityId, field: CircleField, value: f32) -> ShadoErrorCode,

    pub get_line_target: unsafe extern "C" fn(entity: EntityId, out: *mut FfiVec3) -> ShadoErrorCode,
    pub set_line_target: unsafe extern "C" fn(entity: EntityId, value: *const FfiVec3) -> ShadoErrorCode,
}

// ---------------------------------------------------------------------------
// ShadoPhysicsApi
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct ShadoPhysicsApi {
    /// Writes the raw `BodyType` discriminant.
    pub get_body_type: unsafe extern "C" fn(entity: EntityId, out: *mut i32) -> ShadoErrorCode,
    pub set_body_type: unsafe extern "C" fn(entity: EntityId, value: i32) -> ShadoErrorCode,

    pub get_linear_velocity: unsafe extern "C" fn(entity: EntityId, out: *mut FfiVec2) -> ShadoErrorCode,

    pub apply_linear_impulse: unsafe extern "C" fn(
        entity: EntityId,
        impulse: *const FfiVec2,
        world_point: *const FfiVec2,
        wake: bool,
    ) -> ShadoErrorCode,
    pub apply_linear_impulse_to_center: unsafe extern "C" fn(
        entity: EntityId,
        impulse: *const FfiVec2,
        wake: bool,
    ) -> ShadoErrorCode,

    /// Collider accessors. `kind` is BoxCollider2D or CircleCollider2D.
    pub collider_get_f32: unsafe extern "C" fn(
        entity: EntityId,
        kind: ComponentKind,
        field: ColliderField,
        out: *mut f32,
    ) -> ShadoErrorCode,
    pub collider_set_f32: unsafe extern "C" fn(
        entity: EntityId,
        kind: ComponentKind,
        field: ColliderField,
        value: f32,
    ) -> ShadoErrorCode,
    pub collider_get_vec2: unsafe extern "C" fn(
        entity: EntityId,
        kind: ComponentKind,
        field: ColliderField,
        out: *mut FfiVec2,
    ) -> ShadoErrorCode,
    pub collider_set_vec2: unsafe extern "C" fn(
        entity: EntityId,
        kind: ComponentKind,
        field: ColliderField,
        value: *const FfiVec2,
    ) -> ShadoErrorCode,
}

// ---------------------------------------------------------------------------
// ShadoCameraApi
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct ShadoCameraApi {
    pub get_primary: unsafe extern "C" fn(entity: EntityId, out: *mut bool) -> ShadoErrorCode,
    pub set_primary: unsafe extern "C" fn(entity: EntityId, value: bool) -> ShadoErrorCode,
    /// Writes the raw `CameraType` discriminant.
    pub get_camera_type: unsafe extern "C" fn(entity: EntityId, out: *mut i32) -> ShadoErrorCode,
    pub set_camera_type: unsafe extern "C" fn(entity: EntityId, value: i32) -> ShadoErrorCode,
    pub set_viewport: unsafe extern "C" fn(entity: EntityId, width: u32, height: u32) -> ShadoErrorCode,
}

// ---------------------------------------------------------------------------
// ShadoTextApi
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct ShadoTextApi {
    pub get_text: unsafe extern "C" fn(
        entity: EntityId,
        buf: *mut u8,
        buf_len: u32,
        out_len: *mut u32,
    ) -> ShadoErrorCode,
    pub set_text: unsafe extern "C" fn(entity: EntityId, text: *const u8, text_len: u32) -> ShadoErrorCode,
    pub get_f32: unsafe extern "C" fn(entity: EntityId, field: TextField, out: *mut f32) -> ShadoErrorCode,
    pub set_f32: unsafe extern "C" fn(entity: EntityId, field: TextField, value: f32) -> ShadoErrorCode,
    pub get_font: unsafe extern "C" fn(entity: EntityId, out: *mut FontHandle) -> ShadoErrorCode,
    pub set_font: unsafe extern "C" fn(entity: EntityId, value: FontHandle) -> ShadoErrorCode,
}

// ---------------------------------------------------------------------------
// ShadoScriptApi
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct ShadoScriptApi {
    pub get_class_name: unsafe extern "C" fn(
        entity: EntityId,
        buf: *mut u8,
        buf_len: u32,
        out_len: *mut u32,
    ) -> ShadoErrorCode,
    pub set_class_name: unsafe extern "C" fn(entity: EntityId, name: *const u8, name_len: u32) -> ShadoErrorCode,
}

// ---------------------------------------------------------------------------
// ShadoSceneApi
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct ShadoSceneApi {
    /// Switch to the named scene file. Writes the resolved path.
    pub load_scene: unsafe extern "C" fn(
        name: *const u8,
        name_len: u32,
        out_buf: *mut u8,
        buf_len: u32,
        out_len: *mut u32,
    ) -> ShadoErrorCode,

    /// Returns `EntityId::NONE` for unknown prefab ids or when the scene refuses.
    pub instantiate_prefab: unsafe extern "C" fn(prefab: PrefabId, position: *const FfiVec3) -> EntityId,
}

// ---------------------------------------------------------------------------
// ShadoAssetApi
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct ShadoAssetApi {
    /// Paths are relative to the project directory. A zero handle means failure.
    pub texture_create: unsafe extern "C" fn(path: *const u8, path_len: u32) -> TextureHandle,
    pub shader_create: unsafe extern "C" fn(path: *const u8, path_len: u32) -> ShaderHandle,
    pub font_create: unsafe extern "C" fn(path: *const u8, path_len: u32) -> FontHandle,
    pub is_texture_loaded: unsafe extern "C" fn(texture: TextureHandle) -> bool,
}

// ---------------------------------------------------------------------------
// ShadoInputApi
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct ShadoInputApi {
    pub is_key_pressed: unsafe extern "C" fn(key_code: i32) -> bool,
    pub is_mouse_button_pressed: unsafe extern "C" fn(button: i32) -> bool,
    pub get_mouse_position: unsafe extern "C" fn(out: *mut FfiVec2),
}

// ---------------------------------------------------------------------------
// ShadoLoggingApi
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct ShadoLoggingApi {
    /// Bridge to the engine logger. `level` is a `LogLevel` bit value.
    /// `msg` is a UTF-8 byte slice (not null-terminated).
    pub log: unsafe extern "C" fn(level: LogLevel, msg: *const u8, msg_len: u32),
}
