// Script lifecycle through the host callback table: creation by class name,
// per-frame updates, event dispatch, failure isolation and shutdown.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::{callbacks, create_script, setup, spawn};
use shado::ffi::{FfiCollision2DInfo, FfiVec2, RawEvent};
use shado::prelude::*;
use shado::runtime::{editor, script_registry, task_registry, FieldKind};

#[script]
#[derive(Default)]
pub struct Mover {
    #[show_in_editor(display_name = "Speed")]
    speed: f32,
    #[show_in_editor(read_only)]
    ticks: u32,
    jumps: u32,
}

impl Script for Mover {
    fn on_create(&mut self, _entity: EntityRef) -> ShadoResult<()> {
        self.speed = 2.0;
        Ok(())
    }

    fn on_update(&mut self, entity: EntityRef, ts: f32) -> ShadoResult<()> {
        let position = entity.translation()?;
        entity.set_translation(position + Vec3::X * self.speed * ts)?;
        self.ticks += 1;
        Ok(())
    }

    fn on_event(&mut self, _entity: EntityRef, event: &Event) -> ShadoResult<bool> {
        match event {
            Event::Key { kind: EventType::KeyPressed, key_code, .. } if *key_code == KeyCode::SPACE => {
                self.jumps += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Fails whenever its entity has no RigidBody2D.
#[script(name = "Game.Faulty")]
#[derive(Default)]
pub struct Faulty;

impl Script for Faulty {
    fn on_update(&mut self, entity: EntityRef, _ts: f32) -> ShadoResult<()> {
        entity
            .get_component::<RigidBody2DComponent>()
            .ok_or_else(|| ShadoError::AbsentComponent("RigidBody2DComponent".into()))?
            .apply_linear_impulse_to_center(Vec2::Y, true)
    }
}

#[script]
#[derive(Default)]
pub struct Exploder;

impl Script for Exploder {
    fn on_update(&mut self, _entity: EntityRef, _ts: f32) -> ShadoResult<()> {
        panic!("exploded");
    }
}

/// Counts bodies currently touching it.
#[script]
#[derive(Default)]
pub struct Bumper {
    touching: Vec<EntityRef>,
    hits: u32,
    normal: Vec2,
}

impl Script for Bumper {
    fn on_collision_enter(&mut self, _entity: EntityRef, info: &Collision2DInfo, other: EntityRef) -> ShadoResult<()> {
        self.touching.push(other);
        self.hits += 1;
        self.normal = info.normal;
        Ok(())
    }

    fn on_collision_leave(&mut self, _entity: EntityRef, _info: &Collision2DInfo, other: EntityRef) -> ShadoResult<()> {
        self.touching.retain(|e| *e != other);
        Ok(())
    }
}

fn key_event(key: KeyCode) -> RawEvent {
    RawEvent {
        kind: EventType::KeyPressed as i32,
        category_flags: EventType::KeyPressed.categories().bits(),
        key_code: key.0,
        ..Default::default()
    }
}

#[test]
fn create_and_update_by_class_name() {
    let _guard = setup();
    let e = spawn("player");
    assert!(create_script(e, "Mover"));
    for _ in 0..4 {
        (callbacks().update_script)(e.id(), 0.5);
    }
    assert!(e.translation().unwrap().approx_eq(&Vec3::new(4.0, 0.0, 0.0), 1e-5));
    assert_eq!(e.script(|m: &mut Mover| m.ticks), Some(4));
}

#[test]
fn unknown_class_is_refused() {
    let _guard = setup();
    let e = spawn("player");
    assert!(!create_script(e, "Nobody"));
    assert!(!script_registry::has_instance(e.id()));
    assert!(shado_sim::logs().iter().any(|(level, msg)| *level == LogLevel::Error && msg.contains("Nobody")));
}

#[test]
fn renamed_script_registers_under_its_name() {
    let _guard = setup();
    assert!(script_registry::is_registered("Game.Faulty"));
    assert!(!script_registry::is_registered("Faulty"));
}

#[test]
fn events_are_decoded_and_reported_handled() {
    let _guard = setup();
    let e = spawn("player");
    assert!(create_script(e, "Mover"));

    let space = key_event(KeyCode::SPACE);
    assert!((callbacks().dispatch_event)(e.id(), &space));
    let other = key_event(KeyCode::A);
    assert!(!(callbacks().dispatch_event)(e.id(), &other));
    assert!(!(callbacks().dispatch_event)(e.id(), std::ptr::null()));
    assert_eq!(e.script(|m: &mut Mover| m.jumps), Some(1));
}

#[test]
fn failing_scripts_do_not_stop_the_frame() {
    let _guard = setup();
    let good = spawn("good");
    let faulty = spawn("faulty");
    let exploder = spawn("exploder");
    assert!(create_script(good, "Mover"));
    assert!(create_script(faulty, "Game.Faulty"));
    assert!(create_script(exploder, "Exploder"));

    for _ in 0..2 {
        for e in [faulty, exploder, good] {
            (callbacks().update_script)(e.id(), 1.0);
        }
    }
    assert_eq!(good.script(|m: &mut Mover| m.ticks), Some(2));
    assert_eq!(script_registry::failure_count(faulty.id()), 2);
    assert_eq!(script_registry::failure_count(exploder.id()), 2);

    let errors: Vec<_> = shado_sim::logs().into_iter().filter(|(level, _)| *level == LogLevel::Error).collect();
    assert_eq!(errors.len(), 4, "{errors:?}");
    assert!(errors.iter().any(|(_, msg)| msg.contains("Game.Faulty::on_update")));
    assert!(errors.iter().any(|(_, msg)| msg.contains("exploded")));

    // Fixing the cause clears the streak.
    faulty.add_component::<RigidBody2DComponent>().unwrap();
    (callbacks().update_script)(faulty.id(), 1.0);
    assert_eq!(script_registry::failure_count(faulty.id()), 0);
}

#[test]
fn failure_limit_disables_a_script() {
    let _guard = setup();
    script_registry::set_failure_limit(3);
    let e = spawn("exploder");
    create_script(e, "Exploder");
    for _ in 0..5 {
        (callbacks().update_script)(e.id(), 1.0);
    }
    assert!(script_registry::is_disabled(e.id()));
    assert_eq!(script_registry::failure_count(e.id()), 3);
}

#[test]
fn destroy_notification_tears_down_script_and_watch() {
    let _guard = setup();
    let e = spawn("doomed");
    create_script(e, "Mover");
    let watch = e.watch().unwrap();

    e.destroy().unwrap();
    (callbacks().notify_entity_destroyed)(e.id());
    assert!(!watch.is_alive());
    assert!(!script_registry::has_instance(e.id()));

    // A second destroy from the host is harmless.
    (callbacks().destroy_script)(e.id());
}

#[test]
fn shutdown_joins_background_tasks() {
    let _guard = setup();
    let finished = Arc::new(AtomicUsize::new(0));
    for i in 0..2 {
        let finished = finished.clone();
        spawn_task(&format!("worker{i}"), move |token| {
            while !token.is_cancelled() {
                std::thread::sleep(Duration::from_millis(1));
            }
            finished.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    }
    let e = spawn("player");
    create_script(e, "Mover");
    let watch = e.watch().unwrap();

    (callbacks().on_shutdown)();
    assert_eq!(finished.load(Ordering::SeqCst), 2);
    assert_eq!(task_registry::active_count(), 0);
    assert_eq!(script_registry::instance_count(), 0);
    assert!(!watch.is_alive());
}

#[test]
fn editor_fields_come_from_the_attribute() {
    let _guard = setup();
    assert!(editor::scripts().contains(&"Mover"));
    let fields = editor::fields_for("Mover").unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!((fields[0].name, fields[0].display_name), ("speed", "Speed"));
    assert_eq!(fields[0].kind, FieldKind::Float);
    assert!(!fields[0].read_only);
    assert_eq!((fields[1].name, fields[1].display_name), ("ticks", "ticks"));
    assert_eq!(fields[1].kind, FieldKind::Int);
    assert!(fields[1].read_only);
    assert_eq!(editor::fields_for("Game.Faulty"), Some(&[][..]));
}

#[test]
fn contacts_reach_both_scripts_of_the_pair() {
    let _guard = setup();
    let ball = spawn("ball");
    let paddle = spawn("paddle");
    let wall = spawn("wall");
    assert!(create_script(ball, "Bumper"));
    assert!(create_script(paddle, "Bumper"));

    let info = FfiCollision2DInfo { normal: FfiVec2 { x: 0.0, y: 1.0 }, ..Default::default() };
    assert!(shado_sim::begin_contact(ball.id(), paddle.id(), info));
    assert!(shado_sim::begin_contact(ball.id(), wall.id(), info));
    assert_eq!(ball.script(|b: &mut Bumper| (b.touching.clone(), b.normal)), Some((vec![paddle, wall], Vec2::Y)));
    assert_eq!(paddle.script(|b: &mut Bumper| b.touching.clone()), Some(vec![ball]));

    assert!(shado_sim::end_contact(ball.id(), paddle.id(), info));
    assert_eq!(ball.script(|b: &mut Bumper| b.touching.clone()), Some(vec![wall]));
    assert_eq!(paddle.script(|b: &mut Bumper| b.touching.len()), Some(0));

    // A destroyed body raises nothing.
    wall.destroy().unwrap();
    assert!(!shado_sim::begin_contact(ball.id(), wall.id(), info));
    assert_eq!(ball.script(|b: &mut Bumper| b.hits), Some(2));
}

#[test]
fn null_collision_info_reads_as_zeroed() {
    let _guard = setup();
    let a = spawn("a");
    let b = spawn("b");
    assert!(create_script(a, "Bumper"));
    (callbacks().collision_enter)(a.id(), std::ptr::null(), b.id());
    assert_eq!(a.script(|s: &mut Bumper| (s.hits, s.normal)), Some((1, Vec2::ZERO)));
}
