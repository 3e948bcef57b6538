// The native TransformComponent is fetched and stored as one struct. Single
// field setters re-read the other two fields first so they are not clobbered.

use glam::Vec3;
use shado_ffi::FfiTransform;

use crate::api::api;
use crate::component::ComponentView;
use crate::error::ShadoResult;
use crate::math::Transform;

use super::TransformComponent;

impl ComponentView<TransformComponent> {
    pub fn transform(&self) -> ShadoResult<Transform> {
        let value: FfiTransform = self.read(|id, out| unsafe { ((*api().transform).get_transform)(id, out) })?;
        Ok(value.into())
    }

    pub fn set_transform(&self, transform: Transform) -> ShadoResult<()> {
        let value = FfiTransform::from(transform);
        self.write(|id| unsafe { ((*api().transform).set_transform)(id, &value) })
    }

    /// Read-modify-write of the whole struct.
    pub fn update(&self, f: impl FnOnce(&mut Transform)) -> ShadoResult<()> {
        let mut t = self.transform()?;
        f(&mut t);
        self.set_transform(t)
    }

    pub fn position(&self) -> ShadoResult<Vec3> {
        Ok(self.transform()?.translation)
    }

    pub fn set_position(&self, position: Vec3) -> ShadoResult<()> {
        self.update(|t| t.translation = position)
    }

    /// Euler angles in radians.
    pub fn rotation(&self) -> ShadoResult<Vec3> {
        Ok(self.transform()?.rotation)
    }

    pub fn set_rotation(&self, rotation: Vec3) -> ShadoResult<()> {
        self.update(|t| t.rotation = rotation)
    }

    pub fn scale(&self) -> ShadoResult<Vec3> {
        Ok(self.transform()?.scale)
    }

    pub fn set_scale(&self, scale: Vec3) -> ShadoResult<()> {
        self.update(|t| t.scale = scale)
    }
}
