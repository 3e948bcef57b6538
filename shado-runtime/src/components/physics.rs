// RigidBody2D and the two collider kinds. Body type crosses as its exact
// integer discriminant.

use glam::Vec2;
use shado_ffi::{BodyType, ColliderField, FfiVec2};

use crate::api::api;
use crate::component::ComponentView;
use crate::error::{ShadoError, ShadoResult};
use crate::math::{vec2_from_ffi, vec2_to_ffi};
use crate::traits::Collider2D;

use super::{BoxCollider2DComponent, CircleCollider2DComponent, RigidBody2DComponent};

impl ComponentView<RigidBody2DComponent> {
    pub fn body_type(&self) -> ShadoResult<BodyType> {
        let raw: i32 = self.read(|id, out| unsafe { ((*api().physics).get_body_type)(id, out) })?;
        BodyType::from_raw(raw).ok_or_else(|| ShadoError::Internal(format!("unknown body type {raw}")))
    }

    pub fn set_body_type(&self, body_type: BodyType) -> ShadoResult<()> {
        self.write(|id| unsafe { ((*api().physics).set_body_type)(id, body_type as i32) })
    }

    pub fn linear_velocity(&self) -> ShadoResult<Vec2> {
        let v: FfiVec2 = self.read(|id, out| unsafe { ((*api().physics).get_linear_velocity)(id, out) })?;
        Ok(vec2_from_ffi(v))
    }

    pub fn apply_linear_impulse(&self, impulse: Vec2, world_point: Vec2, wake: bool) -> ShadoResult<()> {
        let (impulse, point) = (vec2_to_ffi(impulse), vec2_to_ffi(world_point));
        self.write(|id| unsafe { ((*api().physics).apply_linear_impulse)(id, &impulse, &point, wake) })
    }

    pub fn apply_linear_impulse_to_center(&self, impulse: Vec2, wake: bool) -> ShadoResult<()> {
        let impulse = vec2_to_ffi(impulse);
        self.write(|id| unsafe { ((*api().physics).apply_linear_impulse_to_center)(id, &impulse, wake) })
    }
}

impl<T: Collider2D> ComponentView<T> {
    fn get_f32(&self, field: ColliderField) -> ShadoResult<f32> {
        self.read(|id, out| unsafe { ((*api().physics).collider_get_f32)(id, T::KIND, field, out) })
    }

    fn set_f32(&self, field: ColliderField, value: f32) -> ShadoResult<()> {
        self.write(|id| unsafe { ((*api().physics).collider_set_f32)(id, T::KIND, field, value) })
    }

    fn get_vec2(&self, field: ColliderField) -> ShadoResult<Vec2> {
        let v: FfiVec2 =
            self.read(|id, out| unsafe { ((*api().physics).collider_get_vec2)(id, T::KIND, field, out) })?;
        Ok(vec2_from_ffi(v))
    }

    fn set_vec2(&self, field: ColliderField, value: Vec2) -> ShadoResult<()> {
        let value = vec2_to_ffi(value);
        self.write(|id| unsafe { ((*api().physics).collider_set_vec2)(id, T::KIND, field, &value) })
    }

    pub fn offset(&self) -> ShadoResult<Vec2> {
        self.get_vec2(ColliderField::Offset)
    }

    pub fn set_offset(&self, offset: Vec2) -> ShadoResult<()> {
        self.set_vec2(ColliderField::Offset, offset)
    }

    pub fn density(&self) -> ShadoResult<f32> {
        self.get_f32(ColliderField::Density)
    }

    pub fn set_density(&self, density: f32) -> ShadoResult<()> {
        self.set_f32(ColliderField::Density, density)
    }

    pub fn friction(&self) -> ShadoResult<f32> {
        self.get_f32(ColliderField::Friction)
    }

    pub fn set_friction(&self, friction: f32) -> ShadoResult<()> {
        self.set_f32(ColliderField::Friction, friction)
    }

    pub fn restitution(&self) -> ShadoResult<f32> {
        self.get_f32(ColliderField::Restitution)
    }

    pub fn set_restitution(&self, restitution: f32) -> ShadoResult<()> {
        self.set_f32(ColliderField::Restitution, restitution)
    }

    pub fn restitution_threshold(&self) -> ShadoResult<f32> {
        self.get_f32(ColliderField::RestitutionThreshold)
    }

    pub fn set_restitution_threshold(&self, threshold: f32) -> ShadoResult<()> {
        self.set_f32(ColliderField::RestitutionThreshold, threshold)
    }
}

impl ComponentView<BoxCollider2DComponent> {
    pub fn size(&self) -> ShadoResult<Vec2> {
        self.get_vec2(ColliderField::Size)
    }

    pub fn set_size(&self, size: Vec2) -> ShadoResult<()> {
        self.set_vec2(ColliderField::Size, size)
    }
}

impl ComponentView<CircleCollider2DComponent> {
    pub fn radius(&self) -> ShadoResult<f32> {
        self.get_f32(ColliderField::Radius)
    }

    pub fn set_radius(&self, radius: f32) -> ShadoResult<()> {
        self.set_f32(ColliderField::Radius, radius)
    }
}
