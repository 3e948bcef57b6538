use shado_ffi::CameraType;

use crate::api::api;
use crate::component::ComponentView;
use crate::error::{ShadoError, ShadoResult};

use super::CameraComponent;

impl ComponentView<CameraComponent> {
    pub fn primary(&self) -> ShadoResult<bool> {
        self.read(|id, out| unsafe { ((*api().camera).get_primary)(id, out) })
    }

    pub fn set_primary(&self, primary: bool) -> ShadoResult<()> {
        self.write(|id| unsafe { ((*api().camera).set_primary)(id, primary) })
    }

    pub fn camera_type(&self) -> ShadoResult<CameraType> {
        let raw: i32 = self.read(|id, out| unsafe { ((*api().camera).get_camera_type)(id, out) })?;
        CameraType::from_raw(raw).ok_or_else(|| ShadoError::Internal(format!("unknown camera type {raw}")))
    }

    pub fn set_camera_type(&self, camera_type: CameraType) -> ShadoResult<()> {
        self.write(|id| unsafe { ((*api().camera).set_camera_type)(id, camera_type as i32) })
    }

    pub fn set_viewport(&self, width: u32, height: u32) -> ShadoResult<()> {
        self.write(|id| unsafe { ((*api().camera).set_viewport)(id, width, height) })
    }
}

#[cfg(test)]
mod tests {
    use shado_ffi::CameraType;

    use crate::components::CameraComponent;
    use crate::test_support::{setup, spawn};

    #[test]
    fn camera_properties_round_trip() {
        let _guard = setup();
        let e = spawn("cam");
        let cam = e.add_component::<CameraComponent>().unwrap();
        assert!(cam.primary().unwrap());
        cam.set_primary(false).unwrap();
        cam.set_camera_type(CameraType::Orbit).unwrap();
        cam.set_viewport(1280, 720).unwrap();
        assert!(!cam.primary().unwrap());
        assert_eq!(cam.camera_type().unwrap(), CameraType::Orbit);
        let viewport = shado_sim::with_scene(|s| s.entity(e.id()).unwrap().camera.as_ref().unwrap().viewport);
        assert_eq!(viewport, (1280, 720));
    }
}
