// Renderer properties. SpriteRenderer and CircleRenderer share one native
// layout, so the kind token travels with every call to select it.

use glam::Vec3;
use shado_ffi::{CircleField, FfiVec3, FfiVec4, TextureHandle};

use crate::api::api;
use crate::asset::Texture2D;
use crate::component::ComponentView;
use crate::error::ShadoResult;
use crate::math::{vec3_from_ffi, vec3_to_ffi, Colour};
use crate::traits::{Coloured, SpriteLike};

use super::{CircleRendererComponent, LineRendererComponent};

impl<T: Coloured> ComponentView<T> {
    pub fn colour(&self) -> ShadoResult<Colour> {
        let c: FfiVec4 = self.read(|id, out| unsafe { ((*api().render).get_colour)(id, T::KIND, out) })?;
        Ok(c.into())
    }

    pub fn set_colour(&self, colour: Colour) -> ShadoResult<()> {
        let value = FfiVec4::from(colour);
        self.write(|id| unsafe { ((*api().render).set_colour)(id, T::KIND, &value) })
    }
}

impl<T: SpriteLike> ComponentView<T> {
    /// `None` when no texture is assigned.
    pub fn texture(&self) -> ShadoResult<Option<Texture2D>> {
        let handle: TextureHandle =
            self.read(|id, out| unsafe { ((*api().render).get_texture)(id, T::KIND, out) })?;
        Ok(Texture2D::from_handle(handle))
    }

    /// Copies the handle value; the texture itself stays with the host.
    pub fn set_texture(&self, texture: Option<&Texture2D>) -> ShadoResult<()> {
        let handle = texture.map_or(TextureHandle(0), Texture2D::handle);
        self.write(|id| unsafe { ((*api().render).set_texture)(id, T::KIND, handle) })
    }

    pub fn tiling_factor(&self) -> ShadoResult<f32> {
        self.read(|id, out| unsafe { ((*api().render).get_tiling_factor)(id, T::KIND, out) })
    }

    pub fn set_tiling_factor(&self, factor: f32) -> ShadoResult<()> {
        self.write(|id| unsafe { ((*api().render).set_tiling_factor)(id, T::KIND, factor) })
    }
}

impl ComponentView<CircleRendererComponent> {
    pub fn thickness(&self) -> ShadoResult<f32> {
        self.read(|id, out| unsafe { ((*api().render).get_circle_f32)(id, CircleField::Thickness, out) })
    }

    pub fn set_thickness(&self, thickness: f32) -> ShadoResult<()> {
        self.write(|id| unsafe { ((*api().render).set_circle_f32)(id, CircleField::Thickness, thickness) })
    }

    pub fn fade(&self) -> ShadoResult<f32> {
        self.read(|id, out| unsafe { ((*api().render).get_circle_f32)(id, CircleField::Fade, out) })
    }

    pub fn set_fade(&self, fade: f32) -> ShadoResult<()> {
        self.write(|id| unsafe { ((*api().render).set_circle_f32)(id, CircleField::Fade, fade) })
    }
}

impl ComponentView<LineRendererComponent> {
    /// End point of the line, relative to the entity.
    pub fn target(&self) -> ShadoResult<Vec3> {
        let v: FfiVec3 = self.read(|id, out| unsafe { ((*api().render).get_line_target)(id, out) })?;
        Ok(vec3_from_ffi(v))
    }

    pub fn set_target(&self, target: Vec3) -> ShadoResult<()> {
        let value = vec3_to_ffi(target);
        self.write(|id| unsafe { ((*api().render).set_line_target)(id, &value) })
    }
}
