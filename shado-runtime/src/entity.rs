// EntityRef: lightweight 8-byte Copy handle to an entity in the native scene.
//
// Holding one keeps nothing alive. Every query is a fresh boundary call, and
// any answer may be stale once control returns to the host (next frame, or
// after any call that can destroy entities).

use glam::Vec3;
use shado_ffi::{ComponentKind, EntityId};

use crate::api::api;
use crate::buffers::{read_string, str_arg};
use crate::component::ComponentView;
use crate::components::{TagComponent, TransformComponent};
use crate::error::{check_ffi, check_ffi_kind, ShadoError, ShadoResult};
use crate::script_registry::{self, Script};
use crate::traits::Component;
use crate::watch::EntityWatch;

/// A non-owning reference to an entity.
///
/// - `Copy`, compared and hashed by id.
/// - Id 0 is the null entity: it is never valid and queries on it return
///   without crossing the boundary.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct EntityRef {
    id: EntityId,
}

impl EntityRef {
    /// The null entity.
    pub const NONE: EntityRef = EntityRef { id: EntityId::NONE };

    #[inline]
    pub const fn from_id(id: EntityId) -> Self {
        EntityRef { id }
    }

    #[inline]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    pub const fn is_none(&self) -> bool {
        self.id.is_none()
    }

    /// Whether the entity still exists in the active scene.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.id.is_none() && unsafe { ((*api().entity).is_valid)(self.id) }
    }

    /// Validate liveness, returning `Err(StaleEntity)` for dead or null handles.
    #[inline]
    pub fn checked(&self) -> ShadoResult<EntityRef> {
        if self.is_valid() { Ok(*self) } else { Err(ShadoError::StaleEntity) }
    }

    /// Raw id for calls that need a non-null entity. Does not cross the boundary.
    #[inline]
    pub(crate) fn non_null(&self) -> ShadoResult<EntityId> {
        if self.id.is_none() { Err(ShadoError::StaleEntity) } else { Ok(self.id) }
    }

    // -- components ---------------------------------------------------------

    /// False for stale handles and absent kinds.
    #[inline]
    pub fn has_component<T: Component>(&self) -> bool {
        self.has_kind(T::KIND)
    }

    pub fn has_kind(&self, kind: ComponentKind) -> bool {
        !self.id.is_none() && unsafe { ((*api().entity).has_component)(self.id, kind) }
    }

    /// Attach `T` if absent. An existing component is returned as-is with its
    /// values untouched.
    pub fn add_component<T: Component>(&self) -> ShadoResult<ComponentView<T>> {
        let id = self.non_null()?;
        check_ffi_kind(unsafe { ((*api().entity).add_component)(id, T::KIND) }, T::KIND)?;
        Ok(ComponentView::new(*self))
    }

    /// Returns true exactly when a component was removed.
    pub fn remove_component<T: Component>(&self) -> bool {
        !self.id.is_none() && unsafe { ((*api().entity).remove_component)(self.id, T::KIND) }
    }

    /// A view of `T`, or `None` when the entity is stale or lacks it.
    pub fn get_component<T: Component>(&self) -> Option<ComponentView<T>> {
        self.has_component::<T>().then(|| ComponentView::new(*self))
    }

    /// Every component kind currently attached.
    pub fn components(&self) -> Vec<ComponentKind> {
        if !self.is_valid() {
            return Vec::new();
        }
        ComponentKind::ALL.into_iter().filter(|k| self.has_kind(*k)).collect()
    }

    // -- shorthands ---------------------------------------------------------

    pub fn tag(&self) -> ShadoResult<String> {
        ComponentView::<TagComponent>::new(*self).tag()
    }

    pub fn set_tag(&self, tag: &str) -> ShadoResult<()> {
        ComponentView::<TagComponent>::new(*self).set_tag(tag)
    }

    pub fn translation(&self) -> ShadoResult<Vec3> {
        ComponentView::<TransformComponent>::new(*self).position()
    }

    pub fn set_translation(&self, translation: Vec3) -> ShadoResult<()> {
        ComponentView::<TransformComponent>::new(*self).set_position(translation)
    }

    /// Remove the entity from the scene.
    pub fn destroy(self) -> ShadoResult<()> {
        let id = self.non_null()?;
        check_ffi(unsafe { ((*api().entity).destroy)(id) })
    }

    /// Run `f` against this entity's Rust script instance when it is an `S`.
    pub fn script<S: Script, R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        script_registry::with_instance(self.id, f)
    }

    /// Register a local alive flag for this entity.
    pub fn watch(&self) -> ShadoResult<EntityWatch> {
        EntityWatch::new(*self)
    }

    /// Name lookup shared by `tag()` and scene queries.
    pub(crate) fn fetch_tag(id: EntityId) -> ShadoResult<String> {
        read_string(TagComponent::KIND.name(), |buf, len, out| unsafe {
            ((*api().entity).get_tag)(id, buf, len, out)
        })
    }

    pub(crate) fn store_tag(id: EntityId, tag: &str) -> ShadoResult<()> {
        let (ptr, len) = str_arg(tag);
        check_ffi_kind(unsafe { ((*api().entity).set_tag)(id, ptr, len) }, TagComponent::KIND)
    }
}

impl From<EntityId> for EntityRef {
    fn from(id: EntityId) -> Self {
        EntityRef::from_id(id)
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.id, f)
    }
}

// Debug stays local: printing a handle must not cross the boundary.
impl std::fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityRef").field("id", &self.id.0).finish()
    }
}
