// Prefab instantiation. A request either yields a live, positioned entity or
// fails with `InvalidPrefab`; no zero handle ever escapes.

use glam::Vec3;
use shado_ffi::PrefabId;

use crate::api::api;
use crate::entity::EntityRef;
use crate::error::{ShadoError, ShadoResult};
use crate::math::vec3_to_ffi;

/// A reference to a prefab template known to the host.
/// The default is prefab 0, which never instantiates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Prefab {
    id: PrefabId,
}

impl Prefab {
    pub const fn new(id: PrefabId) -> Self {
        Prefab { id }
    }

    pub const fn id(&self) -> PrefabId {
        self.id
    }

    /// Spawn an instance at `position`. Id 0 fails without a boundary call;
    /// a host refusal fails the same way on every attempt.
    pub fn instantiate(&self, position: Vec3) -> ShadoResult<EntityRef> {
        if self.id.is_none() {
            return Err(ShadoError::InvalidPrefab(self.id));
        }
        let position = vec3_to_ffi(position);
        let id = unsafe { ((*api().scene).instantiate_prefab)(self.id, &position) };
        if id.is_none() {
            tracing::debug!(prefab = %self.id, "host refused prefab instantiation");
            return Err(ShadoError::InvalidPrefab(self.id));
        }
        Ok(EntityRef::from_id(id))
    }
}

impl From<PrefabId> for Prefab {
    fn from(id: PrefabId) -> Self {
        Prefab::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{RigidBody2DComponent, TransformComponent};
    use crate::math::ApproxEq;
    use crate::test_support::setup;

    #[test]
    fn valid_prefab_spawns_positioned_entity() {
        let _guard = setup();
        shado_sim::with_scene(|s| {
            let template = shado_sim::SimEntity::named("Bullet").with(shado_ffi::ComponentKind::RigidBody2D);
            s.register_prefab(PrefabId(42), template);
        });

        let e = Prefab::new(PrefabId(42)).instantiate(Vec3::new(1.0, 2.0, 3.0)).unwrap();
        assert!(!e.id().is_none());
        assert!(e.is_valid());
        assert!(e.has_component::<RigidBody2DComponent>());
        let position = e.get_component::<TransformComponent>().unwrap().position().unwrap();
        assert!(position.approx_eq(&Vec3::new(1.0, 2.0, 3.0), 1e-5));
    }

    #[test]
    fn zero_prefab_fails_without_crossing() {
        let _guard = setup();
        let before = shado_sim::boundary_calls();
        for _ in 0..3 {
            assert_eq!(
                Prefab::new(PrefabId::NONE).instantiate(Vec3::ZERO),
                Err(ShadoError::InvalidPrefab(PrefabId::NONE))
            );
        }
        assert_eq!(shado_sim::boundary_calls(), before);
    }

    #[test]
    fn unknown_prefab_fails_identically_every_time() {
        let _guard = setup();
        let prefab = Prefab::new(PrefabId(999));
        let first = prefab.instantiate(Vec3::ONE);
        assert_eq!(first, Err(ShadoError::InvalidPrefab(PrefabId(999))));
        for _ in 0..3 {
            assert_eq!(prefab.instantiate(Vec3::ONE), first);
        }
        assert!(shado_sim::with_scene(|s| s.is_empty()));
    }
}
