// Plain-old-data structs passed by pointer across the boundary.

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FfiVec2 {
    pub x: f32,
    pub y: f32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FfiVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FfiVec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

/// Transform as stored by the native TransformComponent. Rotation is Euler
/// angles in radians. Get and set always move all three fields together.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FfiTransform {
    pub translation: FfiVec3,
    pub rotation: FfiVec3,
    pub scale: FfiVec3,
}

/// Flat event record sent by the host. Every field has its own storage;
/// `kind` (an event type ordinal) says which of them are meaningful.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawEvent {
    pub kind: i32,
    pub category_flags: i32,
    pub width: u32,
    pub height: u32,
    pub x: f32,
    pub y: f32,
    pub button: i32,
    pub key_code: i32,
    pub repeat_count: i32,
    pub handled: bool,
}

/// Contact data for a 2D collision, from the physics world manifold.
/// Only as many points as the contact has are meaningful; the rest are zero.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FfiCollision2DInfo {
    pub normal: FfiVec2,
    pub points: [FfiVec2; 2],
    pub separations: [f32; 2],
}
