// Scene-level queries: lookup by name, entity creation and destruction, and
// scene switching.

use crate::api::api;
use crate::buffers::{read_ids, read_string, str_arg};
use crate::entity::EntityRef;
use crate::error::{ShadoError, ShadoResult};

/// File extension the host expects on scene files.
pub const SCENE_EXTENSION: &str = ".shadoscene";

/// First entity whose tag equals `name`. Never errors.
pub fn find_entity_by_name(name: &str) -> Option<EntityRef> {
    let (ptr, len) = str_arg(name);
    let id = unsafe { ((*api().entity).find_by_name)(ptr, len) };
    (!id.is_none()).then_some(EntityRef::from_id(id))
}

/// Create an empty entity (Tag + Transform) in the active scene.
pub fn create_entity(name: &str) -> ShadoResult<EntityRef> {
    let (ptr, len) = str_arg(name);
    let id = unsafe { ((*api().entity).create)(ptr, len) };
    if id.is_none() {
        return Err(ShadoError::NoActiveScene);
    }
    Ok(EntityRef::from_id(id))
}

pub fn destroy_entity(entity: EntityRef) -> ShadoResult<()> {
    entity.destroy()
}

/// Snapshot of every live entity.
pub fn all_entities() -> ShadoResult<Vec<EntityRef>> {
    let ids = read_ids(|buf, len, out| unsafe { ((*api().entity).get_all)(buf, len, out) })?;
    Ok(ids.into_iter().map(EntityRef::from_id).collect())
}

/// Append the scene extension unless `name` already carries it.
pub fn normalize_scene_name(name: &str) -> String {
    if name.ends_with(SCENE_EXTENSION) {
        name.to_owned()
    } else {
        format!("{name}{SCENE_EXTENSION}")
    }
}

/// Switch the host to another scene and return its resolved path. Handles to
/// entities of the previous scene go stale.
pub fn load_scene(name: &str) -> ShadoResult<String> {
    if name.is_empty() {
        return Err(ShadoError::InvalidArgument("scene name is empty".into()));
    }
    let file = normalize_scene_name(name);
    let (ptr, len) = str_arg(&file);
    let path = read_string(&file, |buf, buf_len, out| unsafe {
        ((*api().scene).load_scene)(ptr, len, buf, buf_len, out)
    })
    .map_err(|e| match e {
        ShadoError::BufferTooSmall | ShadoError::Internal(_) => e,
        _ => ShadoError::NotFound(file.clone()),
    })?;
    tracing::info!(scene = %path, "scene loaded");
    Ok(path)
}
