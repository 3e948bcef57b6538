// Wire enums. Every discriminant here is part of the contract with the
// native engine: reordering or renumbering breaks interoperability.

use std::fmt;

/// Closed set of component kinds an entity may carry. The discriminant is
/// the token passed across the boundary and must match the native registry.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Tag = 0,
    Transform = 1,
    SpriteRenderer = 2,
    CircleRenderer = 3,
    LineRenderer = 4,
    RigidBody2D = 5,
    BoxCollider2D = 6,
    CircleCollider2D = 7,
    Camera = 8,
    Script = 9,
    NativeScript = 10,
    Text = 11,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 12] = [
        ComponentKind::Tag,
        ComponentKind::Transform,
        ComponentKind::SpriteRenderer,
        ComponentKind::CircleRenderer,
        ComponentKind::LineRenderer,
        ComponentKind::RigidBody2D,
        ComponentKind::BoxCollider2D,
        ComponentKind::CircleCollider2D,
        ComponentKind::Camera,
        ComponentKind::Script,
        ComponentKind::NativeScript,
        ComponentKind::Text,
    ];

    #[inline]
    pub const fn token(self) -> u32 {
        self as u32
    }

    pub fn from_token(token: u32) -> Option<Self> {
        Self::ALL.get(token as usize).copied()
    }

    /// Name used by the native registry and the editor.
    pub const fn name(self) -> &'static str {
        match self {
            ComponentKind::Tag => "TagComponent",
            ComponentKind::Transform => "TransformComponent",
            ComponentKind::SpriteRenderer => "SpriteRendererComponent",
            ComponentKind::CircleRenderer => "CircleRendererComponent",
            ComponentKind::LineRenderer => "LineRendererComponent",
            ComponentKind::RigidBody2D => "RigidBody2DComponent",
            ComponentKind::BoxCollider2D => "BoxCollider2DComponent",
            ComponentKind::CircleCollider2D => "CircleCollider2DComponent",
            ComponentKind::Camera => "CameraComponent",
            ComponentKind::Script => "ScriptComponent",
            ComponentKind::NativeScript => "NativeScriptComponent",
            ComponentKind::Text => "TextComponent",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// RigidBody2D simulation mode.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BodyType {
    #[default]
    Static = 0,
    Kinematic = 1,
    Dynamic = 2,
}

impl BodyType {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(BodyType::Static),
            1 => Some(BodyType::Kinematic),
            2 => Some(BodyType::Dynamic),
            _ => None,
        }
    }
}

/// Projection used by a CameraComponent.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CameraType {
    #[default]
    Orthographic = 0,
    Orbit = 1,
}

impl CameraType {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(CameraType::Orthographic),
            1 => Some(CameraType::Orbit),
            _ => None,
        }
    }
}

/// Field selector for the shared BoxCollider2D / CircleCollider2D layout.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColliderField {
    Density = 0,
    Friction = 1,
    Restitution = 2,
    RestitutionThreshold = 3,
    Offset = 4,
    Size = 5,
    Radius = 6,
}

/// Field selector for CircleRenderer float properties.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CircleField {
    Thickness = 0,
    Fade = 1,
}

/// Field selector for TextComponent float properties.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextField {
    LineSpacing = 0,
    Kerning = 1,
}

/// Host log severity. Bit values match the native logger.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 1 << 0,
    Debug = 1 << 1,
    Info = 1 << 2,
    Warn = 1 << 3,
    Error = 1 << 4,
    Critical = 1 << 5,
}
