// Component marker types and their property accessors.
//
// Each marker is a zero-sized type naming one `ComponentKind`. Accessors are
// inherent methods on `ComponentView<Marker>`; shared native layouts are
// covered once through the family traits in `crate::traits`.

mod camera;
mod physics;
mod render;
mod script;
mod tag;
mod text;
mod transform;

use shado_ffi::ComponentKind;

use crate::traits::{Collider2D, Coloured, Component, SpriteLike};

macro_rules! component_markers {
    ($($(#[$meta:meta])* $name:ident => $kind:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
            pub struct $name;

            impl Component for $name {
                const KIND: ComponentKind = ComponentKind::$kind;
            }
        )*
    };
}

component_markers! {
    /// Entity name.
    TagComponent => Tag;
    /// Translation, Euler rotation and scale.
    TransformComponent => Transform;
    SpriteRendererComponent => SpriteRenderer;
    /// Sprite layout plus thickness and fade.
    CircleRendererComponent => CircleRenderer;
    LineRendererComponent => LineRenderer;
    RigidBody2DComponent => RigidBody2D;
    BoxCollider2DComponent => BoxCollider2D;
    CircleCollider2DComponent => CircleCollider2D;
    CameraComponent => Camera;
    /// Binds an entity to a script type by class name.
    ScriptComponent => Script;
    /// Marker only: the native side drives the behaviour.
    NativeScriptComponent => NativeScript;
    TextComponent => Text;
}

impl Coloured for SpriteRendererComponent {}
impl Coloured for CircleRendererComponent {}
impl Coloured for LineRendererComponent {}
impl Coloured for TextComponent {}

impl SpriteLike for SpriteRendererComponent {}
impl SpriteLike for CircleRendererComponent {}

impl Collider2D for BoxCollider2DComponent {}
impl Collider2D for CircleCollider2DComponent {}
