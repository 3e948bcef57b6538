// In-memory scene model. Operations return `Result<_, ShadoErrorCode>` so the
// table layer only has to marshal.

use std::collections::{BTreeMap, HashMap, HashSet};

use shado_ffi::{
    CameraType, ComponentKind, EntityId, FfiTransform, FfiVec2, FfiVec3, FfiVec4,
    FontHandle, LogLevel, PrefabId, ShadoErrorCode, TextureHandle,
};

pub const SCENE_EXTENSION: &str = ".shadoscene";

const WHITE: FfiVec4 = FfiVec4 { x: 1.0, y: 1.0, z: 1.0, w: 1.0 };

#[derive(Clone, Debug, PartialEq)]
pub struct SpriteData {
    pub colour: FfiVec4,
    pub texture: TextureHandle,
    pub tiling_factor: f32,
}

impl Default for SpriteData {
    fn default() -> Self {
        SpriteData { colour: WHITE, texture: TextureHandle(0), tiling_factor: 1.0 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CircleData {
    pub sprite: SpriteData,
    pub thickness: f32,
    pub fade: f32,
}

impl Default for CircleData {
    fn default() -> Self {
        CircleData { sprite: SpriteData::default(), thickness: 1.0, fade: 0.005 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineData {
    pub target: FfiVec3,
    pub colour: FfiVec4,
}

impl Default for LineData {
    fn default() -> Self {
        LineData { target: FfiVec3 { x: 1.0, y: 0.0, z: 0.0 }, colour: WHITE }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RigidBodyData {
    /// Raw discriminant, exactly as received.
    pub body_type: i32,
    pub velocity: FfiVec2,
    pub awake: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColliderData {
    pub offset: FfiVec2,
    pub size: FfiVec2,
    pub radius: f32,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
    pub restitution_threshold: f32,
}

impl Default for ColliderData {
    fn default() -> Self {
        ColliderData {
            offset: FfiVec2::default(),
            size: FfiVec2 { x: 0.5, y: 0.5 },
            radius: 0.5,
            density: 1.0,
            friction: 0.5,
            restitution: 0.0,
            restitution_threshold: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraData {
    pub primary: bool,
    pub camera_type: i32,
    pub viewport: (u32, u32),
}

impl Default for CameraData {
    fn default() -> Self {
        CameraData { primary: true, camera_type: CameraType::Orthographic as i32, viewport: (0, 0) }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextData {
    pub text: String,
    pub colour: FfiVec4,
    pub line_spacing: f32,
    pub kerning: f32,
    pub font: FontHandle,
}

impl Default for TextData {
    fn default() -> Self {
        TextData {
            text: String::new(),
            colour: WHITE,
            line_spacing: 0.0,
            kerning: 0.0,
            font: FontHandle(0),
        }
    }
}

fn identity() -> FfiTransform {
    FfiTransform {
        translation: FfiVec3::default(),
        rotation: FfiVec3::default(),
        scale: FfiVec3 { x: 1.0, y: 1.0, z: 1.0 },
    }
}

/// One entity and every component it may carry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimEntity {
    pub tag: Option<String>,
    pub transform: Option<FfiTransform>,
    pub sprite: Option<SpriteData>,
    pub circle: Option<CircleData>,
    pub line: Option<LineData>,
    pub rigid_body: Option<RigidBodyData>,
    pub box_collider: Option<ColliderData>,
    pub circle_collider: Option<ColliderData>,
    pub camera: Option<CameraData>,
    pub script: Option<String>,
    pub native_script: bool,
    pub text: Option<TextData>,
    pub parent: EntityId,
    pub children: Vec<EntityId>,
}

impl SimEntity {
    /// What a freshly created scene entity carries: Tag and Transform.
    pub fn named(name: &str) -> Self {
        SimEntity {
            tag: Some(name.to_owned()),
            transform: Some(identity()),
            ..SimEntity::default()
        }
    }

    pub fn with(mut self, kind: ComponentKind) -> Self {
        self.add(kind);
        self
    }

    pub fn has(&self, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Tag => self.tag.is_some(),
            ComponentKind::Transform => self.transform.is_some(),
            ComponentKind::SpriteRenderer => self.sprite.is_some(),
            ComponentKind::CircleRenderer => self.circle.is_some(),
            ComponentKind::LineRenderer => self.line.is_some(),
            ComponentKind::RigidBody2D => self.rigid_body.is_some(),
            ComponentKind::BoxCollider2D => self.box_collider.is_some(),
            ComponentKind::CircleCollider2D => self.circle_collider.is_some(),
            ComponentKind::Camera => self.camera.is_some(),
            ComponentKind::Script => self.script.is_some(),
            ComponentKind::NativeScript => self.native_script,
            ComponentKind::Text => self.text.is_some(),
        }
    }

    /// Adds a default-valued component. Existing components are left untouched.
    pub fn add(&mut self, kind: ComponentKind) {
        match kind {
            ComponentKind::Tag => {
                self.tag.get_or_insert_with(String::new);
            }
            ComponentKind::Transform => {
                self.transform.get_or_insert_with(identity);
            }
            ComponentKind::SpriteRenderer => {
                self.sprite.get_or_insert_with(SpriteData::default);
            }
            ComponentKind::CircleRenderer => {
                self.circle.get_or_insert_with(CircleData::default);
            }
            ComponentKind::LineRenderer => {
                self.line.get_or_insert_with(LineData::default);
            }
            ComponentKind::RigidBody2D => {
                self.rigid_body.get_or_insert_with(RigidBodyData::default);
            }
            ComponentKind::BoxCollider2D => {
                self.box_collider.get_or_insert_with(ColliderData::default);
            }
            ComponentKind::CircleCollider2D => {
                self.circle_collider.get_or_insert_with(ColliderData::default);
            }
            ComponentKind::Camera => {
                self.camera.get_or_insert_with(CameraData::default);
            }
            ComponentKind::Script => {
                self.script.get_or_insert_with(String::new);
            }
            ComponentKind::NativeScript => self.native_script = true,
            ComponentKind::Text => {
                self.text.get_or_insert_with(TextData::default);
            }
        }
    }

    /// Returns whether the component was present.
    pub fn remove(&mut self, kind: ComponentKind) -> bool {
        let had = self.has(kind);
        match kind {
            ComponentKind::Tag => self.tag = None,
            ComponentKind::Transform => self.transform = None,
            ComponentKind::SpriteRenderer => self.sprite = None,
            ComponentKind::CircleRenderer => self.circle = None,
            ComponentKind::LineRenderer => self.line = None,
            ComponentKind::RigidBody2D => self.rigid_body = None,
            ComponentKind::BoxCollider2D => self.box_collider = None,
            ComponentKind::CircleCollider2D => self.circle_collider = None,
            ComponentKind::Camera => self.camera = None,
            ComponentKind::Script => self.script = None,
            ComponentKind::NativeScript => self.native_script = false,
            ComponentKind::Text => self.text = None,
        }
        had
    }

    pub(crate) fn sprite_layout(&mut self, kind: ComponentKind) -> Result<&mut SpriteData, ShadoErrorCode> {
        match kind {
            ComponentKind::SpriteRenderer => self.sprite.as_mut(),
            ComponentKind::CircleRenderer => self.circle.as_mut().map(|c| &mut c.sprite),
            _ => return Err(ShadoErrorCode::InvalidArgument),
        }
        .ok_or(ShadoErrorCode::AbsentComponent)
    }

    pub(crate) fn colour_slot(&mut self, kind: ComponentKind) -> Result<&mut FfiVec4, ShadoErrorCode> {
        match kind {
            ComponentKind::SpriteRenderer | ComponentKind::CircleRenderer => {
                self.sprite_layout(kind).map(|s| &mut s.colour)
            }
            ComponentKind::LineRenderer => {
                self.line.as_mut().map(|l| &mut l.colour).ok_or(ShadoErrorCode::AbsentComponent)
            }
            ComponentKind::Text => {
                self.text.as_mut().map(|t| &mut t.colour).ok_or(ShadoErrorCode::AbsentComponent)
            }
            _ => Err(ShadoErrorCode::InvalidArgument),
        }
    }

    pub(crate) fn collider(&mut self, kind: ComponentKind) -> Result<&mut ColliderData, ShadoErrorCode> {
        match kind {
            ComponentKind::BoxCollider2D => self.box_collider.as_mut(),
            ComponentKind::CircleCollider2D => self.circle_collider.as_mut(),
            _ => return Err(ShadoErrorCode::InvalidArgument),
        }
        .ok_or(ShadoErrorCode::AbsentComponent)
    }
}

/// The whole reference scene.
#[derive(Debug)]
pub struct SimScene {
    entities: BTreeMap<EntityId, SimEntity>,
    next_id: u64,
    prefabs: HashMap<PrefabId, SimEntity>,
    textures: HashMap<TextureHandle, String>,
    next_asset: u64,
    unregistered: HashSet<ComponentKind>,
    scene_files: Vec<String>,
    current_scene: Option<String>,
    keys_down: HashSet<i32>,
    mouse_buttons_down: HashSet<i32>,
    mouse_position: FfiVec2,
    logs: Vec<(LogLevel, String)>,
    calls: u64,
}

impl Default for SimScene {
    fn default() -> Self {
        Self::new()
    }
}

impl SimScene {
    pub fn new() -> Self {
        SimScene {
            entities: BTreeMap::new(),
            next_id: 1,
            prefabs: HashMap::new(),
            textures: HashMap::new(),
            next_asset: 1,
            unregistered: HashSet::new(),
            scene_files: Vec::new(),
            current_scene: None,
            keys_down: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            mouse_position: FfiVec2::default(),
            logs: Vec::new(),
            calls: 0,
        }
    }

    // ---- bookkeeping -----------------------------------------------------

    pub(crate) fn count_call(&mut self) {
        self.calls += 1;
    }

    pub fn calls(&self) -> u64 {
        self.calls
    }

    pub fn logs(&self) -> &[(LogLevel, String)] {
        &self.logs
    }

    pub(crate) fn push_log(&mut self, level: LogLevel, msg: String) {
        self.logs.push((level, msg));
    }

    // ---- entities --------------------------------------------------------

    pub fn spawn(&mut self, name: &str) -> EntityId {
        self.insert(SimEntity::named(name))
    }

    pub fn insert(&mut self, mut entity: SimEntity) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        entity.parent = EntityId::NONE;
        entity.children.clear();
        self.entities.insert(id, entity);
        id
    }

    /// Remove an entity. Its children become roots and its parent forgets it.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let Some(entity) = self.entities.remove(&id) else {
            return false;
        };
        if let Some(parent) = self.entities.get_mut(&entity.parent) {
            parent.children.retain(|c| *c != id);
        }
        for child in entity.children {
            if let Some(c) = self.entities.get_mut(&child) {
                c.parent = EntityId::NONE;
            }
        }
        true
    }

    pub fn entity(&self, id: EntityId) -> Option<&SimEntity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut SimEntity> {
        self.entities.get_mut(&id)
    }

    pub(crate) fn get(&mut self, id: EntityId) -> Result<&mut SimEntity, ShadoErrorCode> {
        self.entities.get_mut(&id).ok_or(ShadoErrorCode::StaleEntity)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.keys().copied().collect()
    }

    pub fn find_by_name(&self, name: &str) -> EntityId {
        self.entities
            .iter()
            .find(|(_, e)| e.tag.as_deref() == Some(name))
            .map(|(id, _)| *id)
            .unwrap_or(EntityId::NONE)
    }

    // ---- components ------------------------------------------------------

    /// Pretend the native registry does not know `kind`.
    pub fn unregister_kind(&mut self, kind: ComponentKind) {
        self.unregistered.insert(kind);
    }

    pub fn is_kind_registered(&self, kind: ComponentKind) -> bool {
        !self.unregistered.contains(&kind)
    }

    pub(crate) fn add_component(&mut self, id: EntityId, kind: ComponentKind) -> Result<(), ShadoErrorCode> {
        if !self.is_kind_registered(kind) {
            return Err(ShadoErrorCode::UnknownComponentKind);
        }
        self.get(id)?.add(kind);
        Ok(())
    }

    pub(crate) fn remove_component(&mut self, id: EntityId, kind: ComponentKind) -> bool {
        if !self.is_kind_registered(kind) {
            return false;
        }
        self.entities.get_mut(&id).is_some_and(|e| e.remove(kind))
    }

    pub(crate) fn has_component(&self, id: EntityId, kind: ComponentKind) -> bool {
        self.is_kind_registered(kind) && self.entities.get(&id).is_some_and(|e| e.has(kind))
    }

    /// Raw body type discriminant as stored, for wire-encoding assertions.
    pub fn raw_body_type(&self, id: EntityId) -> Option<i32> {
        self.entities.get(&id)?.rigid_body.as_ref().map(|rb| rb.body_type)
    }

    // ---- hierarchy -------------------------------------------------------

    /// Re-link `child` under `parent` (`NONE` = root). Cycles are not rejected.
    pub(crate) fn set_parent(&mut self, child: EntityId, parent: EntityId) -> Result<(), ShadoErrorCode> {
        if !parent.is_none() && !self.entities.contains_key(&parent) {
            return Err(ShadoErrorCode::StaleEntity);
        }
        let old = self.get(child)?.parent;
        if let Some(p) = self.entities.get_mut(&old) {
            p.children.retain(|c| *c != child);
        }
        self.get(child)?.parent = parent;
        if let Some(p) = self.entities.get_mut(&parent) {
            p.children.push(child);
        }
        Ok(())
    }

    // ---- prefabs ---------------------------------------------------------

    pub fn register_prefab(&mut self, id: PrefabId, template: SimEntity) {
        self.prefabs.insert(id, template);
    }

    pub(crate) fn instantiate(&mut self, prefab: PrefabId, position: FfiVec3) -> EntityId {
        if prefab.is_none() {
            return EntityId::NONE;
        }
        let Some(template) = self.prefabs.get(&prefab).cloned() else {
            return EntityId::NONE;
        };
        let mut entity = template;
        let transform = entity.transform.get_or_insert_with(identity);
        transform.translation = position;
        self.insert(entity)
    }

    // ---- scenes ----------------------------------------------------------

    /// Make a scene file available to `load_scene`.
    pub fn add_scene_file(&mut self, path: &str) {
        self.scene_files.push(path.to_owned());
    }

    pub fn current_scene(&self) -> Option<&str> {
        self.current_scene.as_deref()
    }

    /// Resolve `name` against known scene files by file name. Loading a scene
    /// unloads every entity of the previous one.
    pub(crate) fn load_scene(&mut self, name: &str) -> Result<String, ShadoErrorCode> {
        if name.is_empty() {
            return Err(ShadoErrorCode::InvalidArgument);
        }
        let path = self
            .scene_files
            .iter()
            .find(|p| p.rsplit(['/', '\\']).next() == Some(name))
            .cloned()
            .ok_or(ShadoErrorCode::NotFound)?;
        self.entities.clear();
        self.current_scene = Some(path.clone());
        Ok(path)
    }

    // ---- assets ----------------------------------------------------------

    pub(crate) fn create_asset(&mut self, path: &str) -> u64 {
        if path.is_empty() {
            return 0;
        }
        let handle = self.next_asset;
        self.next_asset += 1;
        self.textures.insert(TextureHandle(handle), path.to_owned());
        handle
    }

    pub fn is_texture_loaded(&self, handle: TextureHandle) -> bool {
        self.textures.contains_key(&handle)
    }

    // ---- input -----------------------------------------------------------

    pub fn press_key(&mut self, key_code: i32) {
        self.keys_down.insert(key_code);
    }

    pub fn release_key(&mut self, key_code: i32) {
        self.keys_down.remove(&key_code);
    }

    pub fn press_mouse_button(&mut self, button: i32) {
        self.mouse_buttons_down.insert(button);
    }

    pub fn move_mouse(&mut self, x: f32, y: f32) {
        self.mouse_position = FfiVec2 { x, y };
    }

    pub(crate) fn is_key_pressed(&self, key_code: i32) -> bool {
        self.keys_down.contains(&key_code)
    }

    pub(crate) fn is_mouse_button_pressed(&self, button: i32) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    pub(crate) fn mouse_position(&self) -> FfiVec2 {
        self.mouse_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn despawn_detaches_both_endpoints() {
        let mut scene = SimScene::new();
        let parent = scene.spawn("parent");
        let child = scene.spawn("child");
        scene.set_parent(child, parent).unwrap();
        assert_eq!(scene.entity(parent).unwrap().children, vec![child]);

        assert!(scene.despawn(parent));
        assert_eq!(scene.entity(child).unwrap().parent, EntityId::NONE);
    }

    #[test]
    fn reparent_moves_child_between_lists() {
        let mut scene = SimScene::new();
        let a = scene.spawn("a");
        let b = scene.spawn("b");
        let c = scene.spawn("c");
        scene.set_parent(c, a).unwrap();
        scene.set_parent(c, b).unwrap();
        assert!(scene.entity(a).unwrap().children.is_empty());
        assert_eq!(scene.entity(b).unwrap().children, vec![c]);
    }

    #[test]
    fn add_keeps_existing_values() {
        let mut e = SimEntity::named("e").with(ComponentKind::RigidBody2D);
        e.rigid_body.as_mut().unwrap().body_type = 2;
        e.add(ComponentKind::RigidBody2D);
        assert_eq!(e.rigid_body.unwrap().body_type, 2);
    }

    #[test]
    fn unknown_prefab_yields_none() {
        let mut scene = SimScene::new();
        assert_eq!(scene.instantiate(PrefabId(9), FfiVec3::default()), EntityId::NONE);
        assert_eq!(scene.instantiate(PrefabId::NONE, FfiVec3::default()), EntityId::NONE);
    }
}
