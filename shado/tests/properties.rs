// End-to-end checks of the entity/component contract through the public API.

mod common;

use common::{setup, spawn};
use shado::prelude::*;
use shado::ffi::{ComponentKind, PrefabId};
use shado_sim::SimEntity;

#[test]
fn null_handle_never_crosses_the_boundary() {
    let _guard = setup();
    let before = shado_sim::boundary_calls();
    let none = EntityRef::NONE;
    assert!(!none.is_valid());
    assert!(!none.has_component::<TagComponent>());
    assert!(!none.has_component::<TransformComponent>());
    assert!(!none.has_component::<RigidBody2DComponent>());
    assert!(!none.has_component::<TextComponent>());
    assert_eq!(shado_sim::boundary_calls(), before);
}

#[test]
fn add_is_idempotent_and_keeps_values() {
    let _guard = setup();
    let e = spawn("crate");
    let sprite = e.add_component::<SpriteRendererComponent>().unwrap();
    sprite.set_colour(Colour::RED).unwrap();
    sprite.set_tiling_factor(3.0).unwrap();

    let again = e.add_component::<SpriteRendererComponent>().unwrap();
    assert!(e.has_component::<SpriteRendererComponent>());
    assert_eq!(again.colour().unwrap(), Colour::RED);
    assert_eq!(again.tiling_factor().unwrap(), 3.0);
}

#[test]
fn remove_reports_true_once_per_add() {
    let _guard = setup();
    let e = spawn("body");
    e.add_component::<CircleCollider2DComponent>().unwrap();
    assert!(e.remove_component::<CircleCollider2DComponent>());
    assert!(!e.remove_component::<CircleCollider2DComponent>());
    assert!(!e.remove_component::<CircleCollider2DComponent>());
    e.add_component::<CircleCollider2DComponent>().unwrap();
    assert!(e.remove_component::<CircleCollider2DComponent>());
}

#[test]
fn transform_round_trips_within_tolerance() {
    let _guard = setup();
    let e = spawn("spinner");
    let t = e.get_component::<TransformComponent>().unwrap();
    let cases = [
        Transform::new(Vec3::new(1.5, -2.25, 3.0), Vec3::new(0.1, 0.2, 0.3), Vec3::new(1.0, 2.0, 0.5)),
        Transform::new(Vec3::splat(-1000.0), Vec3::new(0.0, 0.0, std::f32::consts::PI), Vec3::ONE),
        Transform::new(Vec3::ZERO, Vec3::ZERO, Vec3::splat(1e-3)),
    ];
    for value in cases {
        t.set_transform(value).unwrap();
        assert!(t.transform().unwrap().approx_eq(&value, shado::runtime::DEFAULT_EPSILON), "{value:?}");
    }
}

#[test]
fn setting_position_keeps_rotation_and_scale() {
    let _guard = setup();
    let e = spawn("mover");
    let t = e.get_component::<TransformComponent>().unwrap();
    t.set_rotation(Vec3::new(0.0, 0.0, 1.25)).unwrap();
    t.set_scale(Vec3::new(2.0, 3.0, 1.0)).unwrap();
    t.set_position(Vec3::new(7.0, 8.0, 9.0)).unwrap();

    let now = t.transform().unwrap();
    assert_eq!(now.translation, Vec3::new(7.0, 8.0, 9.0));
    assert_eq!(now.rotation, Vec3::new(0.0, 0.0, 1.25));
    assert_eq!(now.scale, Vec3::new(2.0, 3.0, 1.0));
}

#[test]
fn missing_name_is_not_found() {
    let _guard = setup();
    spawn("somebody");
    assert_eq!(scene::find_entity_by_name("nonexistent"), None);
    assert!(scene::find_entity_by_name("somebody").is_some());
}

#[test]
fn prefab_instantiates_at_the_requested_position() {
    let _guard = setup();
    shado_sim::with_scene(|s| s.register_prefab(PrefabId(7), SimEntity::named("Coin").with(ComponentKind::CircleRenderer)));
    let coin = Prefab::new(PrefabId(7)).instantiate(Vec3::new(1.0, 2.0, 3.0)).unwrap();
    assert!(!coin.is_none());
    assert!(coin.is_valid());
    assert!(coin.translation().unwrap().approx_eq(&Vec3::new(1.0, 2.0, 3.0), 1e-5));
    assert!(coin.has_component::<CircleRendererComponent>());
}

#[test]
fn prefab_failure_is_deterministic() {
    let _guard = setup();
    for _ in 0..3 {
        assert_eq!(
            Prefab::new(PrefabId(0)).instantiate(Vec3::ONE),
            Err(ShadoError::InvalidPrefab(PrefabId(0)))
        );
        assert_eq!(
            Prefab::new(PrefabId(404)).instantiate(Vec3::ONE),
            Err(ShadoError::InvalidPrefab(PrefabId(404)))
        );
    }
    assert!(scene::all_entities().unwrap().is_empty());
}

#[test]
fn parent_set_and_cleared() {
    let _guard = setup();
    let parent = spawn("parent");
    let child = spawn("child");
    child.set_parent(Some(parent)).unwrap();
    assert_eq!(child.parent(), Some(parent));
    child.set_parent(None).unwrap();
    assert_eq!(child.parent(), None);
}

#[test]
fn body_type_uses_the_wire_integers() {
    let _guard = setup();
    let e = spawn("rb");
    let rb = e.add_component::<RigidBody2DComponent>().unwrap();
    for (body_type, wire) in [(BodyType::Static, 0), (BodyType::Kinematic, 1), (BodyType::Dynamic, 2)] {
        rb.set_body_type(body_type).unwrap();
        assert_eq!(shado_sim::with_scene(|s| s.raw_body_type(e.id())), Some(wire));
        assert_eq!(rb.body_type().unwrap(), body_type);
        assert_eq!(body_type as i32, wire);
    }
}
