// Parent/child queries over the host's scene graph.
//
// The host does not promise acyclicity, so every walk toward the root is
// bounded by `hierarchy.max_depth` and stops on the first revisited entity.

use std::collections::HashSet;

use glam::Mat4;
use shado_ffi::EntityId;

use crate::api::api;
use crate::buffers::read_ids;
use crate::component::ComponentView;
use crate::components::TransformComponent;
use crate::config;
use crate::entity::EntityRef;
use crate::error::{check_ffi, ShadoError, ShadoResult};
use crate::math::Transform;

/// Parent of `entity`; `None` for roots and for invalid handles.
pub fn parent(entity: EntityRef) -> Option<EntityRef> {
    try_parent(entity).ok().flatten()
}

/// Like [`parent`], but tells a root (`Ok(None)`) from a stale handle.
pub fn try_parent(entity: EntityRef) -> ShadoResult<Option<EntityRef>> {
    let id = entity.non_null()?;
    let mut out = EntityId::NONE;
    check_ffi(unsafe { ((*api().entity).get_parent)(id, &mut out) })?;
    Ok((!out.is_none()).then_some(EntityRef::from_id(out)))
}

/// Re-parent `entity`. `None` (or the null entity) detaches it to the root.
pub fn set_parent(entity: EntityRef, parent: Option<EntityRef>) -> ShadoResult<()> {
    let id = entity.non_null()?;
    let parent_id = parent.map_or(EntityId::NONE, |p| p.id());
    if parent_id == id {
        return Err(ShadoError::InvalidArgument(format!("{entity} cannot be its own parent")));
    }
    check_ffi(unsafe { ((*api().entity).set_parent)(id, parent_id) })
}

/// Snapshot of the direct children. Empty for invalid handles.
pub fn children(entity: EntityRef) -> Vec<EntityRef> {
    try_children(entity).unwrap_or_default()
}

pub fn try_children(entity: EntityRef) -> ShadoResult<Vec<EntityRef>> {
    let id = entity.non_null()?;
    let ids = read_ids(|buf, len, out| unsafe { ((*api().entity).get_children)(id, buf, len, out) })?;
    Ok(ids.into_iter().map(EntityRef::from_id).collect())
}

/// Walk from `entity`'s parent toward the root.
pub fn ancestors(entity: EntityRef) -> Ancestors {
    Ancestors::new(entity, config::get().hierarchy.max_depth)
}

/// Iterator over the parent chain. Ends at the root, at a stale link, on a
/// revisit, or after `max_depth` steps; the last two count as a cycle.
#[derive(Debug)]
pub struct Ancestors {
    next: Option<EntityRef>,
    visited: HashSet<EntityId>,
    remaining: usize,
    cycle_at: Option<EntityId>,
}

impl Ancestors {
    pub fn new(entity: EntityRef, max_depth: usize) -> Self {
        let mut visited = HashSet::new();
        visited.insert(entity.id());
        Ancestors {
            next: parent(entity),
            visited,
            remaining: max_depth,
            cycle_at: None,
        }
    }

    /// True once the walk hit a revisit or the depth bound.
    pub fn cycle_detected(&self) -> bool {
        self.cycle_at.is_some()
    }

    /// The entity at which the walk was cut short.
    pub fn cycle_at(&self) -> Option<EntityId> {
        self.cycle_at
    }
}

impl Iterator for Ancestors {
    type Item = EntityRef;

    fn next(&mut self) -> Option<EntityRef> {
        let current = self.next.take()?;
        if self.remaining == 0 || !self.visited.insert(current.id()) {
            self.cycle_at = Some(current.id());
            return None;
        }
        self.remaining -= 1;
        self.next = parent(current);
        Some(current)
    }
}

/// Collect `entity` and its ancestors, child first, failing on a cycle.
fn chain(entity: EntityRef) -> ShadoResult<Vec<EntityRef>> {
    let entity = entity.checked()?;
    let mut walk = ancestors(entity);
    let mut chain = vec![entity];
    chain.extend(walk.by_ref());
    match walk.cycle_at() {
        Some(at) => {
            tracing::warn!(entity = %entity, at = %at, "parent chain does not terminate");
            Err(ShadoError::HierarchyCycle(at))
        }
        None => Ok(chain),
    }
}

/// Topmost ancestor (the entity itself for roots).
pub fn root_of(entity: EntityRef) -> ShadoResult<EntityRef> {
    let chain = chain(entity)?;
    Ok(*chain.last().unwrap_or(&entity))
}

/// Compose local transforms from the root down. Entities without a
/// Transform contribute identity.
pub fn world_matrix(entity: EntityRef) -> ShadoResult<Mat4> {
    let mut world = Mat4::IDENTITY;
    for e in chain(entity)?.into_iter().rev() {
        let local = match ComponentView::<TransformComponent>::new(e).transform() {
            Ok(t) => t,
            Err(ShadoError::AbsentComponent(_)) => Transform::IDENTITY,
            Err(err) => return Err(err),
        };
        world *= local.to_matrix();
    }
    Ok(world)
}

impl EntityRef {
    pub fn parent(&self) -> Option<EntityRef> {
        parent(*self)
    }

    pub fn set_parent(&self, parent: Option<EntityRef>) -> ShadoResult<()> {
        set_parent(*self, parent)
    }

    pub fn children(&self) -> Vec<EntityRef> {
        children(*self)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::math::{ApproxEq, DEFAULT_EPSILON};
    use crate::test_support::{setup, spawn};

    #[test]
    fn set_and_clear_parent() {
        let _guard = setup();
        let parent_e = spawn("parent");
        let child = spawn("child");

        set_parent(child, Some(parent_e)).unwrap();
        assert_eq!(parent(child), Some(parent_e));
        assert_eq!(children(parent_e), vec![child]);

        set_parent(child, None).unwrap();
        assert_eq!(parent(child), None);
        assert!(children(parent_e).is_empty());

        set_parent(child, Some(parent_e)).unwrap();
        set_parent(child, Some(EntityRef::NONE)).unwrap();
        assert_eq!(child.parent(), None);
    }

    #[test]
    fn self_parenting_is_rejected() {
        let _guard = setup();
        let e = spawn("narcissus");
        assert!(matches!(set_parent(e, Some(e)), Err(ShadoError::InvalidArgument(_))));
    }

    #[test]
    fn stale_handles_have_no_parent() {
        let _guard = setup();
        let e = spawn("gone");
        e.destroy().unwrap();
        assert_eq!(parent(e), None);
        assert_eq!(try_parent(e), Err(ShadoError::StaleEntity));
        assert!(children(e).is_empty());
        assert_eq!(parent(EntityRef::NONE), None);
    }

    #[test]
    fn children_are_a_snapshot() {
        let _guard = setup();
        let p = spawn("p");
        let a = spawn("a");
        a.set_parent(Some(p)).unwrap();
        let snapshot = p.children();
        let b = spawn("b");
        b.set_parent(Some(p)).unwrap();
        assert_eq!(snapshot, vec![a]);
        assert_eq!(p.children(), vec![a, b]);
    }

    #[test]
    fn ancestors_walk_to_root() {
        let _guard = setup();
        let root = spawn("root");
        let mid = spawn("mid");
        let leaf = spawn("leaf");
        mid.set_parent(Some(root)).unwrap();
        leaf.set_parent(Some(mid)).unwrap();

        let mut walk = ancestors(leaf);
        assert_eq!(walk.by_ref().collect::<Vec<_>>(), vec![mid, root]);
        assert!(!walk.cycle_detected());
        assert_eq!(root_of(leaf).unwrap(), root);
        assert_eq!(root_of(root).unwrap(), root);
    }

    #[test]
    fn cyclic_chain_terminates() {
        let _guard = setup();
        let a = spawn("a");
        let b = spawn("b");
        let c = spawn("c");
        // The host accepts this; only self-parenting is refused locally.
        a.set_parent(Some(b)).unwrap();
        b.set_parent(Some(c)).unwrap();
        c.set_parent(Some(a)).unwrap();

        let mut walk = ancestors(a);
        assert_eq!(walk.by_ref().collect::<Vec<_>>(), vec![b, c]);
        assert!(walk.cycle_detected());
        assert_eq!(walk.cycle_at(), Some(a.id()));
        assert_eq!(root_of(a), Err(ShadoError::HierarchyCycle(a.id())));
        assert!(matches!(world_matrix(b), Err(ShadoError::HierarchyCycle(_))));
    }

    #[test]
    fn depth_bound_counts_as_cycle() {
        let _guard = setup();
        let mut chain = vec![spawn("e0")];
        for i in 1..6 {
            let e = spawn(&format!("e{i}"));
            e.set_parent(Some(chain[i - 1])).unwrap();
            chain.push(e);
        }
        let mut walk = Ancestors::new(chain[5], 3);
        assert_eq!(walk.by_ref().count(), 3);
        assert!(walk.cycle_detected());
        let mut full = Ancestors::new(chain[5], 5);
        assert_eq!(full.by_ref().count(), 5);
        assert!(!full.cycle_detected());
    }

    #[test]
    fn world_matrix_composes_parent_first() {
        let _guard = setup();
        let parent_e = spawn("parent");
        let child = spawn("child");
        child.set_parent(Some(parent_e)).unwrap();
        parent_e
            .get_component::<TransformComponent>()
            .unwrap()
            .set_transform(Transform::new(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO, Vec3::splat(2.0)))
            .unwrap();
        child.set_translation(Vec3::new(1.0, 1.0, 0.0)).unwrap();

        let p = world_matrix(child).unwrap().transform_point3(Vec3::ZERO);
        assert!(p.approx_eq(&Vec3::new(12.0, 2.0, 0.0), DEFAULT_EPSILON));
    }
}
