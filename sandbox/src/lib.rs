// Sandbox game: a handful of scripts exercising the Shado runtime.
// Built as a cdylib the engine loads; `entry!` provides shado_init/shutdown.

use shado::prelude::*;

shado::entry!();

/// WASD movement plus a jump on Space.
#[script]
pub struct Player {
    #[show_in_editor(display_name = "Move speed")]
    speed: f32,
    #[show_in_editor(display_name = "Jump impulse")]
    jump: f32,
    #[show_in_editor(read_only)]
    jumps: u32,
}

impl Default for Player {
    fn default() -> Self {
        Player { speed: 3.0, jump: 5.0, jumps: 0 }
    }
}

impl Script for Player {
    fn on_create(&mut self, entity: EntityRef) -> ShadoResult<()> {
        let body = entity.add_component::<RigidBody2DComponent>()?;
        body.set_body_type(BodyType::Dynamic)?;
        slog!(LogLevel::Info, "player ready on {entity}");
        Ok(())
    }

    fn on_update(&mut self, entity: EntityRef, ts: f32) -> ShadoResult<()> {
        let mut dir = Vec3::ZERO;
        if input::is_key_pressed(KeyCode::W) {
            dir.y += 1.0;
        }
        if input::is_key_pressed(KeyCode::S) {
            dir.y -= 1.0;
        }
        if input::is_key_pressed(KeyCode::A) {
            dir.x -= 1.0;
        }
        if input::is_key_pressed(KeyCode::D) {
            dir.x += 1.0;
        }
        if dir != Vec3::ZERO {
            let position = entity.translation()?;
            entity.set_translation(position + dir.normalize() * self.speed * ts)?;
        }
        Ok(())
    }

    fn on_event(&mut self, entity: EntityRef, event: &Event) -> ShadoResult<bool> {
        let Event::Key { kind: EventType::KeyPressed, key_code: KeyCode::SPACE, repeat_count: 0 } = event else {
            return Ok(false);
        };
        if let Some(body) = entity.get_component::<RigidBody2DComponent>() {
            body.apply_linear_impulse_to_center(Vec2::new(0.0, self.jump), true)?;
            self.jumps += 1;
        }
        Ok(true)
    }
}

/// Spawns a prefab at its own position on a fixed interval.
#[script]
pub struct Spawner {
    #[show_in_editor]
    prefab: Prefab,
    #[show_in_editor(display_name = "Interval (s)")]
    interval: f32,
    #[show_in_editor(display_name = "Max spawned")]
    max_spawned: u32,
    timer: f32,
    spawned: Vec<EntityWatch>,
}

impl Default for Spawner {
    fn default() -> Self {
        Spawner { prefab: Prefab::default(), interval: 1.0, max_spawned: 8, timer: 0.0, spawned: Vec::new() }
    }
}

impl Spawner {
    /// Entities spawned by this script that are still alive.
    pub fn alive(&self) -> usize {
        self.spawned.iter().filter(|w| w.is_alive()).count()
    }
}

impl Script for Spawner {
    fn on_update(&mut self, entity: EntityRef, ts: f32) -> ShadoResult<()> {
        self.spawned.retain(|w| w.is_alive());
        self.timer += ts;
        if self.timer < self.interval || self.spawned.len() as u32 >= self.max_spawned {
            return Ok(());
        }
        self.timer = 0.0;
        let spawned = self.prefab.instantiate(entity.translation()?)?;
        spawned.set_parent(Some(entity))?;
        self.spawned.push(spawned.watch()?);
        Ok(())
    }
}

/// Moves toward the entity named `target`, easing by `stiffness`.
#[script]
pub struct Follower {
    #[show_in_editor(display_name = "Target name")]
    target: String,
    #[show_in_editor]
    stiffness: f32,
    watch: Option<EntityWatch>,
}

impl Default for Follower {
    fn default() -> Self {
        Follower { target: "Player".to_string(), stiffness: 4.0, watch: None }
    }
}

impl Script for Follower {
    fn on_update(&mut self, entity: EntityRef, ts: f32) -> ShadoResult<()> {
        if !self.watch.as_ref().is_some_and(EntityWatch::is_alive) {
            self.watch = scene::find_entity_by_name(&self.target).map(|e| e.watch()).transpose()?;
        }
        let Some(target) = self.watch.as_ref().map(EntityWatch::entity) else {
            return Ok(());
        };
        let here = entity.translation()?;
        let there = target.translation()?;
        let t = (self.stiffness * ts).clamp(0.0, 1.0);
        entity.set_translation(here.lerp(there, t))
    }
}

#[cfg(test)]
mod tests {
    use shado::ffi::{ComponentKind, PrefabId};
    use shado::runtime::script_registry;
    use shado_sim::SimEntity;

    use super::*;

    #[test]
    fn sandbox_scripts_play_a_few_frames() {
        let callbacks = unsafe { &*shado::init(shado_sim::api_table()) };
        let create = |e: EntityRef, class: &str| (callbacks.create_script)(e.id(), class.as_ptr(), class.len() as u32);

        shado_sim::with_scene(|s| s.register_prefab(PrefabId(1), SimEntity::named("Crate").with(ComponentKind::SpriteRenderer)));
        let player = scene::create_entity("Player").unwrap();
        let spawner = scene::create_entity("Spawner").unwrap();
        let follower = scene::create_entity("Camera").unwrap();
        follower.set_translation(Vec3::new(10.0, 0.0, 0.0)).unwrap();
        assert!(create(player, "Player"));
        assert!(create(spawner, "Spawner"));
        assert!(create(follower, "Follower"));
        spawner.script(|s: &mut Spawner| s.prefab = Prefab::new(PrefabId(1)));

        shado_sim::with_scene(|s| s.press_key(KeyCode::D.0));
        for _ in 0..10 {
            for e in [player, spawner, follower] {
                (callbacks.update_script)(e.id(), 0.25);
            }
        }

        assert!(player.translation().unwrap().x > 0.0);
        assert!(follower.translation().unwrap().x < 10.0);
        assert_eq!(spawner.script(|s: &mut Spawner| s.alive()), Some(2));
        assert_eq!(spawner.children().len(), 2);

        let jump = shado::ffi::RawEvent { kind: EventType::KeyPressed as i32, key_code: KeyCode::SPACE.0, ..Default::default() };
        assert!((callbacks.dispatch_event)(player.id(), &jump));
        assert_eq!(player.script(|p: &mut Player| p.jumps), Some(1));

        (callbacks.on_shutdown)();
        assert_eq!(script_registry::instance_count(), 0);
    }
}
