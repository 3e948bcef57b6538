// Prelude: one-import access to the most commonly used Shado types.
//
// Usage: `use shado::prelude::*;`

// Core runtime types
pub use shado_runtime::{
    EntityRef, ComponentView, EntityWatch, Prefab,
    ShadoResult, ShadoError, Component,
    Script, Event, EventType, EventCategory, Collision2DInfo, KeyCode,
    Texture2D, Shader, Font,
    CancelToken, TaskHandle, spawn_task,
};

// Component markers
pub use shado_runtime::components::{
    TagComponent, TransformComponent, SpriteRendererComponent, CircleRendererComponent,
    LineRendererComponent, RigidBody2DComponent, BoxCollider2DComponent,
    CircleCollider2DComponent, CameraComponent, ScriptComponent, NativeScriptComponent,
    TextComponent,
};

// Math
pub use shado_runtime::{ApproxEq, Colour, Transform};

// Free-function modules
pub use shado_runtime::{hierarchy, input, scene};

// FFI enums
pub use shado_ffi::{BodyType, CameraType, LogLevel};

// Proc macros and logging
pub use shado_macros::script;
pub use shado_runtime::slog;

// glam re-exports (common math types scripts interact with)
pub use glam::{Vec2, Vec3, Vec4, Quat, Mat4};
