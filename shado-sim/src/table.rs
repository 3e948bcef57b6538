// `unsafe extern "C"` implementations of every API sub-table, backed by the
// thread-local `SimScene`.

use shado_ffi::*;

use crate::boundary;
use crate::scene::SimScene;

// ---------------------------------------------------------------------------
// Marshalling helpers
// ---------------------------------------------------------------------------

fn code(result: Result<(), ShadoErrorCode>) -> ShadoErrorCode {
    match result {
        Ok(()) => ShadoErrorCode::Ok,
        Err(e) => e,
    }
}

unsafe fn read_str(ptr: *const u8, len: u32) -> Result<String, ShadoErrorCode> {
    if len == 0 {
        return Ok(String::new());
    }
    if ptr.is_null() {
        return Err(ShadoErrorCode::InvalidArgument);
    }
    let bytes = unsafe { std::slice::from_raw_parts(ptr, len as usize) };
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|_| ShadoErrorCode::InvalidArgument)
}

unsafe fn write_str(s: &str, buf: *mut u8, buf_len: u32, out_len: *mut u32) -> ShadoErrorCode {
    if out_len.is_null() {
        return ShadoErrorCode::InvalidArgument;
    }
    unsafe { *out_len = s.len() as u32 };
    if (buf_len as usize) < s.len() {
        return ShadoErrorCode::BufferTooSmall;
    }
    if !s.is_empty() {
        if buf.is_null() {
            return ShadoErrorCode::InvalidArgument;
        }
        unsafe { std::ptr::copy_nonoverlapping(s.as_ptr(), buf, s.len()) };
    }
    ShadoErrorCode::Ok
}

unsafe fn write_ids(ids: &[EntityId], buf: *mut EntityId, buf_len: u32, out_count: *mut u32) -> ShadoErrorCode {
    if out_count.is_null() {
        return ShadoErrorCode::InvalidArgument;
    }
    unsafe { *out_count = ids.len() as u32 };
    let n = ids.len().min(buf_len as usize);
    if n > 0 {
        if buf.is_null() {
            return ShadoErrorCode::InvalidArgument;
        }
        unsafe { std::ptr::copy_nonoverlapping(ids.as_ptr(), buf, n) };
    }
    ShadoErrorCode::Ok
}

unsafe fn write_out<T>(out: *mut T, value: T) -> ShadoErrorCode {
    if out.is_null() {
        return ShadoErrorCode::InvalidArgument;
    }
    unsafe { *out = value };
    ShadoErrorCode::Ok
}

unsafe fn read_in<T: Copy>(value: *const T) -> Result<T, ShadoErrorCode> {
    if value.is_null() {
        return Err(ShadoErrorCode::InvalidArgument);
    }
    Ok(unsafe { *value })
}

/// Run a mutation against the scene and flatten it to a status code.
fn update(f: impl FnOnce(&mut SimScene) -> Result<(), ShadoErrorCode>) -> ShadoErrorCode {
    code(boundary(f))
}

/// Run a getter against the scene and write its value through `out`.
unsafe fn get_with<T>(
    out: *mut T,
    f: impl FnOnce(&mut SimScene) -> Result<T, ShadoErrorCode>,
) -> ShadoErrorCode {
    match boundary(f) {
        Ok(v) => unsafe { write_out(out, v) },
        Err(e) => e,
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

unsafe extern "C" fn entity_is_valid(entity: EntityId) -> bool {
    boundary(|s| s.entity(entity).is_some())
}

unsafe extern "C" fn entity_is_kind_registered(kind: ComponentKind) -> bool {
    boundary(|s| s.is_kind_registered(kind))
}

unsafe extern "C" fn entity_has_component(entity: EntityId, kind: ComponentKind) -> bool {
    boundary(|s| s.has_component(entity, kind))
}

unsafe extern "C" fn entity_add_component(entity: EntityId, kind: ComponentKind) -> ShadoErrorCode {
    boundary(|s| code(s.add_component(entity, kind)))
}

unsafe extern "C" fn entity_remove_component(entity: EntityId, kind: ComponentKind) -> bool {
    boundary(|s| s.remove_component(entity, kind))
}

unsafe extern "C" fn entity_create(name: *const u8, name_len: u32) -> EntityId {
    match unsafe { read_str(name, name_len) } {
        Ok(name) => boundary(|s| s.spawn(&name)),
        Err(_) => EntityId::NONE,
    }
}

unsafe extern "C" fn entity_destroy(entity: EntityId) -> ShadoErrorCode {
    boundary(|s| {
        if s.despawn(entity) {
            ShadoErrorCode::Ok
        } else {
            ShadoErrorCode::StaleEntity
        }
    })
}

unsafe extern "C" fn entity_find_by_name(name: *const u8, name_len: u32) -> EntityId {
    match unsafe { read_str(name, name_len) } {
        Ok(name) => boundary(|s| s.find_by_name(&name)),
        Err(_) => EntityId::NONE,
    }
}

unsafe extern "C" fn entity_get_tag(entity: EntityId, buf: *mut u8, buf_len: u32, out_len: *mut u32) -> ShadoErrorCode {
    let tag = boundary(|s| s.get(entity).and_then(|e| e.tag.clone().ok_or(ShadoErrorCode::AbsentComponent)));
    match tag {
        Ok(tag) => unsafe { write_str(&tag, buf, buf_len, out_len) },
        Err(e) => e,
    }
}

unsafe extern "C" fn entity_set_tag(entity: EntityId, tag: *const u8, tag_len: u32) -> ShadoErrorCode {
    let tag = match unsafe { read_str(tag, tag_len) } {
        Ok(t) => t,
        Err(e) => return e,
    };
    update(|s| {
        let slot = s.get(entity)?.tag.as_mut().ok_or(ShadoErrorCode::AbsentComponent)?;
        *slot = tag;
        Ok(())
    })
}

unsafe extern "C" fn entity_get_parent(entity: EntityId, out: *mut EntityId) -> ShadoErrorCode {
    unsafe { get_with(out, |s| Ok(s.get(entity)?.parent)) }
}

unsafe extern "C" fn entity_set_parent(entity: EntityId, parent: EntityId) -> ShadoErrorCode {
    boundary(|s| code(s.set_parent(entity, parent)))
}

unsafe extern "C" fn entity_get_children(
    entity: EntityId,
    buf: *mut EntityId,
    buf_len: u32,
    out_count: *mut u32,
) -> ShadoErrorCode {
    match boundary(|s| s.get(entity).map(|e| e.children.clone())) {
        Ok(children) => unsafe { write_ids(&children, buf, buf_len, out_count) },
        Err(e) => e,
    }
}

unsafe extern "C" fn entity_get_all(buf: *mut EntityId, buf_len: u32, out_count: *mut u32) -> ShadoErrorCode {
    let ids = boundary(|s| s.ids());
    unsafe { write_ids(&ids, buf, buf_len, out_count) }
}

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

unsafe extern "C" fn transform_get(entity: EntityId, out: *mut FfiTransform) -> ShadoErrorCode {
    unsafe { get_with(out, |s| s.get(entity)?.transform.ok_or(ShadoErrorCode::AbsentComponent)) }
}

unsafe extern "C" fn transform_set(entity: EntityId, value: *const FfiTransform) -> ShadoErrorCode {
    let value = match unsafe { read_in(value) } {
        Ok(v) => v,
        Err(e) => return e,
    };
    update(|s| {
        let slot = s.get(entity)?.transform.as_mut().ok_or(ShadoErrorCode::AbsentComponent)?;
        *slot = value;
        Ok(())
    })
}

// ---------------------------------------------------------------------------
// Render
// ---------------------------------------------------------------------------

unsafe extern "C" fn render_get_colour(entity: EntityId, kind: ComponentKind, out: *mut FfiVec4) -> ShadoErrorCode {
    unsafe { get_with(out, |s| s.get(entity)?.colour_slot(kind).map(|c| *c)) }
}

unsafe extern "C" fn render_set_colour(entity: EntityId, kind: ComponentKind, value: *const FfiVec4) -> ShadoErrorCode {
    let value = match unsafe { read_in(value) } {
        Ok(v) => v,
        Err(e) => return e,
    };
    boundary(|s| code(s.get(entity).and_then(|e| e.colour_slot(kind)).map(|c| *c = value)))
}

unsafe extern "C" fn render_get_tiling_factor(entity: EntityId, kind: ComponentKind, out: *mut f32) -> ShadoErrorCode {
    unsafe { get_with(out, |s| s.get(entity)?.sprite_layout(kind).map(|sp| sp.tiling_factor)) }
}

unsafe extern "C" fn render_set_tiling_factor(entity: EntityId, kind: ComponentKind, value: f32) -> ShadoErrorCode {
    boundary(|s| code(s.get(entity).and_then(|e| e.sprite_layout(kind)).map(|sp| sp.tiling_factor = value)))
}

unsafe extern "C" fn render_get_texture(entity: EntityId, kind: ComponentKind, out: *mut TextureHandle) -> ShadoErrorCode {
    unsafe { get_with(out, |s| s.get(entity)?.sprite_layout(kind).map(|sp| sp.texture)) }
}

unsafe extern "C" fn render_set_texture(entity: EntityId, kind: ComponentKind, value: TextureHandle) -> ShadoErrorCode {
    boundary(|s| code(s.get(entity).and_then(|e| e.sprite_layout(kind)).map(|sp| sp.texture = value)))
}

unsafe extern "C" fn render_get_circle_f32(entity: EntityId, field: CircleField, out: *mut f32) -> ShadoErrorCode {
    unsafe {
        get_with(out, |s| {
            let c = s.get(entity)?.circle.as_ref().ok_or(ShadoErrorCode::AbsentComponent)?;
            Ok(match field {
                CircleField::Thickness => c.thickness,
                CircleField::Fade => c.fade,
            })
        })
    }
}

unsafe extern "C" fn render_set_circle_f32(entity: EntityId, field: CircleField, value: f32) -> ShadoErrorCode {
    update(|s| {
        let c = s.get(entity)?.circle.as_mut().ok_or(ShadoErrorCode::AbsentComponent)?;
        match field {
            CircleField::Thickness => c.thickness = value,
            CircleField::Fade => c.fade = value,
        }
        Ok(())
    })
}

unsafe extern "C" fn render_get_line_target(entity: EntityId, out: *mut FfiVec3) -> ShadoErrorCode {
    unsafe {
        get_with(out, |s| {
            s.get(entity)?.line.as_ref().map(|l| l.target).ok_or(ShadoErrorCode::AbsentComponent)
        })
    }
}

unsafe extern "C" fn render_set_line_target(entity: EntityId, value: *const FfiVec3) -> ShadoErrorCode {
    let value = match unsafe { read_in(value) } {
        Ok(v) => v,
        Err(e) => return e,
    };
    update(|s| {
        let line = s.get(entity)?.line.as_mut().ok_or(ShadoErrorCode::AbsentComponent)?;
        line.target = value;
        Ok(())
    })
}

// ---------------------------------------------------------------------------
// Physics
// ---------------------------------------------------------------------------

unsafe extern "C" fn physics_get_body_type(entity: EntityId, out: *mut i32) -> ShadoErrorCode {
    unsafe {
        get_with(out, |s| {
            s.get(entity)?.rigid_body.as_ref().map(|rb| rb.body_type).ok_or(ShadoErrorCode::AbsentComponent)
        })
    }
}

unsafe extern "C" fn physics_set_body_type(entity: EntityId, value: i32) -> ShadoErrorCode {
    update(|s| {
        let rb = s.get(entity)?.rigid_body.as_mut().ok_or(ShadoErrorCode::AbsentComponent)?;
        rb.body_type = value;
        Ok(())
    })
}

unsafe extern "C" fn physics_get_linear_velocity(entity: EntityId, out: *mut FfiVec2) -> ShadoErrorCode {
    unsafe {
        get_with(out, |s| {
            s.get(entity)?.rigid_body.as_ref().map(|rb| rb.velocity).ok_or(ShadoErrorCode::AbsentComponent)
        })
    }
}

// Unit mass: an impulse adds straight to velocity. The application point
// only matters for angular motion, which the sim does not model.
fn apply_impulse(s: &mut SimScene, entity: EntityId, impulse: FfiVec2, wake: bool) -> Result<(), ShadoErrorCode> {
    let rb = s.get(entity)?.rigid_body.as_mut().ok_or(ShadoErrorCode::AbsentComponent)?;
    rb.velocity.x += impulse.x;
    rb.velocity.y += impulse.y;
    rb.awake |= wake;
    Ok(())
}

unsafe extern "C" fn physics_apply_linear_impulse(
    entity: EntityId,
    impulse: *const FfiVec2,
    world_point: *const FfiVec2,
    wake: bool,
) -> ShadoErrorCode {
    let (impulse, _point) = match unsafe { read_in(impulse).and_then(|i| Ok((i, read_in(world_point)?))) } {
        Ok(v) => v,
        Err(e) => return e,
    };
    boundary(|s| code(apply_impulse(s, entity, impulse, wake)))
}

unsafe extern "C" fn physics_apply_linear_impulse_to_center(
    entity: EntityId,
    impulse: *const FfiVec2,
    wake: bool,
) -> ShadoErrorCode {
    let impulse = match unsafe { read_in(impulse) } {
        Ok(v) => v,
        Err(e) => return e,
    };
    boundary(|s| code(apply_impulse(s, entity, impulse, wake)))
}

unsafe extern "C" fn physics_collider_get_f32(
    entity: EntityId,
    kind: ComponentKind,
    field: ColliderField,
    out: *mut f32,
) -> ShadoErrorCode {
    unsafe {
        get_with(out, |s| {
            let c = s.get(entity)?.collider(kind)?;
            match (kind, field) {
                (_, ColliderField::Density) => Ok(c.density),
                (_, ColliderField::Friction) => Ok(c.friction),
                (_, ColliderField::Restitution) => Ok(c.restitution),
                (_, ColliderField::RestitutionThreshold) => Ok(c.restitution_threshold),
                (ComponentKind::CircleCollider2D, ColliderField::Radius) => Ok(c.radius),
                _ => Err(ShadoErrorCode::InvalidArgument),
            }
        })
    }
}

unsafe extern "C" fn physics_collider_set_f32(
    entity: EntityId,
    kind: ComponentKind,
    field: ColliderField,
    value: f32,
) -> ShadoErrorCode {
    update(|s| {
        let c = s.get(entity)?.collider(kind)?;
        let slot = match (kind, field) {
            (_, ColliderField::Density) => &mut c.density,
            (_, ColliderField::Friction) => &mut c.friction,
            (_, ColliderField::Restitution) => &mut c.restitution,
            (_, ColliderField::RestitutionThreshold) => &mut c.restitution_threshold,
            (ComponentKind::CircleCollider2D, ColliderField::Radius) => &mut c.radius,
            _ => return Err(ShadoErrorCode::InvalidArgument),
        };
        *slot = value;
        Ok(())
    })
}

unsafe extern "C" fn physics_collider_get_vec2(
    entity: EntityId,
    kind: ComponentKind,
    field: ColliderField,
    out: *mut FfiVec2,
) -> ShadoErrorCode {
    unsafe {
        get_with(out, |s| {
            let c = s.get(entity)?.collider(kind)?;
            match (kind, field) {
                (_, ColliderField::Offset) => Ok(c.offset),
                (ComponentKind::BoxCollider2D, ColliderField::Size) => Ok(c.size),
                _ => Err(ShadoErrorCode::InvalidArgument),
            }
        })
    }
}

unsafe extern "C" fn physics_collider_set_vec2(
    entity: EntityId,
    kind: ComponentKind,
    field: ColliderField,
    value: *const FfiVec2,
) -> ShadoErrorCode {
    let value = match unsafe { read_in(value) } {
        Ok(v) => v,
        Err(e) => return e,
    };
    update(|s| {
        let c = s.get(entity)?.collider(kind)?;
        let slot = match (kind, field) {
            (_, ColliderField::Offset) => &mut c.offset,
            (ComponentKind::BoxCollider2D, ColliderField::Size) => &mut c.size,
            _ => return Err(ShadoErrorCode::InvalidArgument),
        };
        *slot = value;
        Ok(())
    })
}

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

unsafe extern "C" fn camera_get_primary(entity: EntityId, out: *mut bool) -> ShadoErrorCode {
    unsafe {
        get_with(out, |s| {
            s.get(entity)?.camera.as_ref().map(|c| c.primary).ok_or(ShadoErrorCode::AbsentComponent)
        })
    }
}

unsafe extern "C" fn camera_set_primary(entity: EntityId, value: bool) -> ShadoErrorCode {
    update(|s| {
        let c = s.get(entity)?.camera.as_mut().ok_or(ShadoErrorCode::AbsentComponent)?;
        c.primary = value;
        Ok(())
    })
}

unsafe extern "C" fn camera_get_type(entity: EntityId, out: *mut i32) -> ShadoErrorCode {
    unsafe {
        get_with(out, |s| {
            s.get(entity)?.camera.as_ref().map(|c| c.camera_type).ok_or(ShadoErrorCode::AbsentComponent)
        })
    }
}

unsafe extern "C" fn camera_set_type(entity: EntityId, value: i32) -> ShadoErrorCode {
    update(|s| {
        let c = s.get(entity)?.camera.as_mut().ok_or(ShadoErrorCode::AbsentComponent)?;
        c.camera_type = value;
        Ok(())
    })
}

unsafe extern "C" fn camera_set_viewport(entity: EntityId, width: u32, height: u32) -> ShadoErrorCode {
    update(|s| {
        let c = s.get(entity)?.camera.as_mut().ok_or(ShadoErrorCode::AbsentComponent)?;
        c.viewport = (width, height);
        Ok(())
    })
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

unsafe extern "C" fn text_get_text(entity: EntityId, buf: *mut u8, buf_len: u32, out_len: *mut u32) -> ShadoErrorCode {
    let text = boundary(|s| {
        s.get(entity)
            .and_then(|e| e.text.as_ref().map(|t| t.text.clone()).ok_or(ShadoErrorCode::AbsentComponent))
    });
    match text {
        Ok(text) => unsafe { write_str(&text, buf, buf_len, out_len) },
        Err(e) => e,
    }
}

unsafe extern "C" fn text_set_text(entity: EntityId, text: *const u8, text_len: u32) -> ShadoErrorCode {
    let text = match unsafe { read_str(text, text_len) } {
        Ok(t) => t,
        Err(e) => return e,
    };
    update(|s| {
        let t = s.get(entity)?.text.as_mut().ok_or(ShadoErrorCode::AbsentComponent)?;
        t.text = text;
        Ok(())
    })
}

unsafe extern "C" fn text_get_f32(entity: EntityId, field: TextField, out: *mut f32) -> ShadoErrorCode {
    unsafe {
        get_with(out, |s| {
            let t = s.get(entity)?.text.as_ref().ok_or(ShadoErrorCode::AbsentComponent)?;
            Ok(match field {
                TextField::LineSpacing => t.line_spacing,
                TextField::Kerning => t.kerning,
            })
        })
    }
}

unsafe extern "C" fn text_set_f32(entity: EntityId, field: TextField, value: f32) -> ShadoErrorCode {
    update(|s| {
        let t = s.get(entity)?.text.as_mut().ok_or(ShadoErrorCode::AbsentComponent)?;
        match field {
            TextField::LineSpacing => t.line_spacing = value,
            TextField::Kerning => t.kerning = value,
        }
        Ok(())
    })
}

unsafe extern "C" fn text_get_font(entity: EntityId, out: *mut FontHandle) -> ShadoErrorCode {
    unsafe {
        get_with(out, |s| {
            s.get(entity)?.text.as_ref().map(|t| t.font).ok_or(ShadoErrorCode::AbsentComponent)
        })
    }
}

unsafe extern "C" fn text_set_font(entity: EntityId, value: FontHandle) -> ShadoErrorCode {
    update(|s| {
        let t = s.get(entity)?.text.as_mut().ok_or(ShadoErrorCode::AbsentComponent)?;
        t.font = value;
        Ok(())
    })
}

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

unsafe extern "C" fn script_get_class_name(
    entity: EntityId,
    buf: *mut u8,
    buf_len: u32,
    out_len: *mut u32,
) -> ShadoErrorCode {
    let name = boundary(|s| s.get(entity).and_then(|e| e.script.clone().ok_or(ShadoErrorCode::AbsentComponent)));
    match name {
        Ok(name) => unsafe { write_str(&name, buf, buf_len, out_len) },
        Err(e) => e,
    }
}

unsafe extern "C" fn script_set_class_name(entity: EntityId, name: *const u8, name_len: u32) -> ShadoErrorCode {
    let name = match unsafe { read_str(name, name_len) } {
        Ok(n) => n,
        Err(e) => return e,
    };
    update(|s| {
        let slot = s.get(entity)?.script.as_mut().ok_or(ShadoErrorCode::AbsentComponent)?;
        *slot = name;
        Ok(())
    })
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

unsafe extern "C" fn scene_load(
    name: *const u8,
    name_len: u32,
    out_buf: *mut u8,
    buf_len: u32,
    out_len: *mut u32,
) -> ShadoErrorCode {
    let name = match unsafe { read_str(name, name_len) } {
        Ok(n) => n,
        Err(e) => return e,
    };
    match boundary(|s| s.load_scene(&name)) {
        Ok(path) => unsafe { write_str(&path, out_buf, buf_len, out_len) },
        Err(e) => e,
    }
}

unsafe extern "C" fn scene_instantiate_prefab(prefab: PrefabId, position: *const FfiVec3) -> EntityId {
    match unsafe { read_in(position) } {
        Ok(position) => boundary(|s| s.instantiate(prefab, position)),
        Err(_) => EntityId::NONE,
    }
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

unsafe fn create_asset(path: *const u8, path_len: u32) -> u64 {
    match unsafe { read_str(path, path_len) } {
        Ok(path) => boundary(|s| s.create_asset(&path)),
        Err(_) => 0,
    }
}

unsafe extern "C" fn asset_texture_create(path: *const u8, path_len: u32) -> TextureHandle {
    TextureHandle(unsafe { create_asset(path, path_len) })
}

unsafe extern "C" fn asset_shader_create(path: *const u8, path_len: u32) -> ShaderHandle {
    ShaderHandle(unsafe { create_asset(path, path_len) })
}

unsafe extern "C" fn asset_font_create(path: *const u8, path_len: u32) -> FontHandle {
    FontHandle(unsafe { create_asset(path, path_len) })
}

unsafe extern "C" fn asset_is_texture_loaded(texture: TextureHandle) -> bool {
    boundary(|s| s.is_texture_loaded(texture))
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

unsafe extern "C" fn input_is_key_pressed(key_code: i32) -> bool {
    boundary(|s| s.is_key_pressed(key_code))
}

unsafe extern "C" fn input_is_mouse_button_pressed(button: i32) -> bool {
    boundary(|s| s.is_mouse_button_pressed(button))
}

unsafe extern "C" fn input_get_mouse_position(out: *mut FfiVec2) {
    let pos = boundary(|s| s.mouse_position());
    unsafe { write_out(out, pos) };
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

unsafe extern "C" fn logging_log(level: LogLevel, msg: *const u8, msg_len: u32) {
    let msg = unsafe { read_str(msg, msg_len) }.unwrap_or_else(|_| String::from("<invalid utf-8>"));
    boundary(|s| s.push_log(level, msg));
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

static ENTITY_API: ShadoEntityApi = ShadoEntityApi {
    is_valid: entity_is_valid,
    is_kind_registered: entity_is_kind_registered,
    has_component: entity_has_component,
    add_component: entity_add_component,
    remove_component: entity_remove_component,
    create: entity_create,
    destroy: entity_destroy,
    find_by_name: entity_find_by_name,
    get_tag: entity_get_tag,
    set_tag: entity_set_tag,
    get_parent: entity_get_parent,
    set_parent: entity_set_parent,
    get_children: entity_get_children,
    get_all: entity_get_all,
};

static TRANSFORM_API: ShadoTransformApi = ShadoTransformApi {
    get_transform: transform_get,
    set_transform: transform_set,
};

static RENDER_API: ShadoRenderApi = ShadoRenderApi {
    get_colour: render_get_colour,
    set_colour: render_set_colour,
    get_tiling_factor: render_get_tiling_factor,
    set_tiling_factor: render_set_tiling_factor,
    get_texture: render_get_texture,
    set_texture: render_set_texture,
    get_circle_f32: render_get_circle_f32,
    set_circle_f32: render_set_circle_f32,
    get_line_target: render_get_line_target,
    set_line_target: render_set_line_target,
};

static PHYSICS_API: ShadoPhysicsApi = ShadoPhysicsApi {
    get_body_type: physics_get_body_type,
    set_body_type: physics_set_body_type,
    get_linear_velocity: physics_get_linear_velocity,
    apply_linear_impulse: physics_apply_linear_impulse,
    apply_linear_impulse_to_center: physics_apply_linear_impulse_to_center,
    collider_get_f32: physics_collider_get_f32,
    collider_set_f32: physics_collider_set_f32,
    collider_get_vec2: physics_collider_get_vec2,
    collider_set_vec2: physics_collider_set_vec2,
};

static CAMERA_API: ShadoCameraApi = ShadoCameraApi {
    get_primary: camera_get_primary,
    set_primary: camera_set_primary,
    get_camera_type: camera_get_type,
    set_camera_type: camera_set_type,
    set_viewport: camera_set_viewport,
};

static TEXT_API: ShadoTextApi = ShadoTextApi {
    get_text: text_get_text,
    set_text: text_set_text,
    get_f32: text_get_f32,
    set_f32: text_set_f32,
    get_font: text_get_font,
    set_font: text_set_font,
};

static SCRIPT_API: ShadoScriptApi = ShadoScriptApi {
    get_class_name: script_get_class_name,
    set_class_name: script_set_class_name,
};

static SCENE_API: ShadoSceneApi = ShadoSceneApi {
    load_scene: scene_load,
    instantiate_prefab: scene_instantiate_prefab,
};

static ASSET_API: ShadoAssetApi = ShadoAssetApi {
    texture_create: asset_texture_create,
    shader_create: asset_shader_create,
    font_create: asset_font_create,
    is_texture_loaded: asset_is_texture_loaded,
};

static INPUT_API: ShadoInputApi = ShadoInputApi {
    is_key_pressed: input_is_key_pressed,
    is_mouse_button_pressed: input_is_mouse_button_pressed,
    get_mouse_position: input_get_mouse_position,
};

static LOGGING_API: ShadoLoggingApi = ShadoLoggingApi { log: logging_log };

pub(crate) static TABLE: ShadoApiTable = ShadoApiTable {
    version: SHADO_API_VERSION,
    entity: &ENTITY_API,
    transform: &TRANSFORM_API,
    render: &RENDER_API,
    physics: &PHYSICS_API,
    camera: &CAMERA_API,
    text: &TEXT_API,
    script: &SCRIPT_API,
    scene: &SCENE_API,
    asset: &ASSET_API,
    input: &INPUT_API,
    logging: &LOGGING_API,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_buffer_reports_full_length() {
        crate::reset();
        let id = crate::with_scene(|s| s.spawn("a-long-name"));
        let mut buf = [0u8; 4];
        let mut len = 0u32;
        let rc = unsafe { entity_get_tag(id, buf.as_mut_ptr(), buf.len() as u32, &mut len) };
        assert_eq!(rc, ShadoErrorCode::BufferTooSmall);
        assert_eq!(len, 11);
    }

    #[test]
    fn id_list_count_query() {
        crate::reset();
        crate::with_scene(|s| {
            s.spawn("a");
            s.spawn("b");
        });
        let mut count = 0u32;
        let rc = unsafe { entity_get_all(std::ptr::null_mut(), 0, &mut count) };
        assert_eq!(rc, ShadoErrorCode::Ok);
        assert_eq!(count, 2);
    }

    #[test]
    fn circle_collider_has_no_size() {
        crate::reset();
        let id = crate::with_scene(|s| {
            let id = s.spawn("c");
            s.entity_mut(id).unwrap().add(ComponentKind::CircleCollider2D);
            id
        });
        let mut out = FfiVec2::default();
        let rc = unsafe {
            physics_collider_get_vec2(id, ComponentKind::CircleCollider2D, ColliderField::Size, &mut out)
        };
        assert_eq!(rc, ShadoErrorCode::InvalidArgument);
    }
}
