// Math value types layered on glam, plus conversions to the boundary structs.
//
// Vector equality is component-wise. `ApproxEq` gives the tolerance-based
// comparison that transform round trips need.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4};
use shado_ffi::{FfiTransform, FfiVec2, FfiVec3, FfiVec4};

/// Tolerance used by the `approx_eq` helpers when callers have no better value.
pub const DEFAULT_EPSILON: f32 = 1e-5;

// ---------------------------------------------------------------------------
// ApproxEq
// ---------------------------------------------------------------------------

/// Component-wise comparison within an absolute tolerance.
pub trait ApproxEq {
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl ApproxEq for f32 {
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() <= epsilon
    }
}

impl ApproxEq for Vec2 {
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.abs_diff_eq(*other, epsilon)
    }
}

impl ApproxEq for Vec3 {
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.abs_diff_eq(*other, epsilon)
    }
}

impl ApproxEq for Vec4 {
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.abs_diff_eq(*other, epsilon)
    }
}

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

/// Local transform of an entity. `rotation` holds Euler angles in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn new(translation: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Transform { translation, rotation, scale }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Transform { translation, ..Self::IDENTITY }
    }

    /// Rotation as a quaternion, applied X then Y then Z.
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::ZYX, self.rotation.z, self.rotation.y, self.rotation.x)
    }

    /// Local-to-parent matrix: translate * rotate * scale.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.translation)
    }
}

impl ApproxEq for Transform {
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.translation.approx_eq(&other.translation, epsilon)
            && self.rotation.approx_eq(&other.rotation, epsilon)
            && self.scale.approx_eq(&other.scale, epsilon)
    }
}

impl From<FfiTransform> for Transform {
    fn from(t: FfiTransform) -> Transform {
        Transform {
            translation: vec3_from_ffi(t.translation),
            rotation: vec3_from_ffi(t.rotation),
            scale: vec3_from_ffi(t.scale),
        }
    }
}

impl From<Transform> for FfiTransform {
    fn from(t: Transform) -> FfiTransform {
        FfiTransform {
            translation: vec3_to_ffi(t.translation),
            rotation: vec3_to_ffi(t.rotation),
            scale: vec3_to_ffi(t.scale),
        }
    }
}

// ---------------------------------------------------------------------------
// Colour
// ---------------------------------------------------------------------------

/// Linear colour (float RGBA, 0.0-1.0 range).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colour {
    pub const BLACK: Colour = Colour { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: Colour = Colour { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const RED: Colour = Colour { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const GREEN: Colour = Colour { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };
    pub const BLUE: Colour = Colour { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };
    pub const TRANSPARENT: Colour = Colour { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Colour { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Colour { a, ..self }
    }
}

impl Default for Colour {
    fn default() -> Self {
        Colour::WHITE
    }
}

impl ApproxEq for Colour {
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        Vec4::from(*self).approx_eq(&Vec4::from(*other), epsilon)
    }
}

impl From<Colour> for Vec4 {
    fn from(c: Colour) -> Vec4 {
        Vec4::new(c.r, c.g, c.b, c.a)
    }
}

impl From<Vec4> for Colour {
    fn from(v: Vec4) -> Colour {
        Colour { r: v.x, g: v.y, b: v.z, a: v.w }
    }
}

impl From<FfiVec4> for Colour {
    fn from(v: FfiVec4) -> Colour {
        Colour { r: v.x, g: v.y, b: v.z, a: v.w }
    }
}

impl From<Colour> for FfiVec4 {
    fn from(c: Colour) -> FfiVec4 {
        FfiVec4 { x: c.r, y: c.g, z: c.b, w: c.a }
    }
}

// ---------------------------------------------------------------------------
// Boundary vector conversions
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn vec2_from_ffi(v: FfiVec2) -> Vec2 {
    Vec2::new(v.x, v.y)
}

#[inline]
pub(crate) fn vec2_to_ffi(v: Vec2) -> FfiVec2 {
    FfiVec2 { x: v.x, y: v.y }
}

#[inline]
pub(crate) fn vec3_from_ffi(v: FfiVec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub(crate) fn vec3_to_ffi(v: Vec3) -> FfiVec3 {
    FfiVec3 { x: v.x, y: v.y, z: v.z }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_length_vectors_are_not_equal() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        assert!(!a.approx_eq(&b, DEFAULT_EPSILON));
        assert!(a.approx_eq(&Vec3::new(1.0, 0.0, 1e-7), DEFAULT_EPSILON));
    }

    #[test]
    fn identity_matrix_for_identity_transform() {
        assert!(Transform::IDENTITY.to_matrix().abs_diff_eq(Mat4::IDENTITY, DEFAULT_EPSILON));
    }

    #[test]
    fn matrix_applies_scale_before_translation() {
        let t = Transform::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::splat(2.0));
        let p = t.to_matrix().transform_point3(Vec3::ONE);
        assert!(p.approx_eq(&Vec3::new(3.0, 4.0, 5.0), DEFAULT_EPSILON));
    }

    #[test]
    fn z_rotation_turns_x_into_y() {
        let t = Transform::new(Vec3::ZERO, Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2), Vec3::ONE);
        let p = t.to_matrix().transform_point3(Vec3::X);
        assert!(p.approx_eq(&Vec3::Y, 1e-5));
    }

    #[test]
    fn ffi_transform_conversion_keeps_fields_apart() {
        let t = Transform::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.1, 0.2, 0.3), Vec3::new(4.0, 5.0, 6.0));
        let ffi = FfiTransform::from(t);
        assert_eq!(ffi.rotation, FfiVec3 { x: 0.1, y: 0.2, z: 0.3 });
        assert_eq!(Transform::from(ffi), t);
    }

    #[test]
    fn colour_vec4_roundtrip() {
        let c = Colour::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(Colour::from(Vec4::from(c)), c);
    }
}
