// ComponentView<T>: stateless accessor for one component kind on one entity.
//
// A view holds only the entity handle. It caches nothing, so every property
// read or write is a boundary round trip and reflects the host's current
// state. Property accessors live in `components/*`, grouped by kind.

use std::marker::PhantomData;

use shado_ffi::{ComponentKind, EntityId, ShadoErrorCode};

use crate::entity::EntityRef;
use crate::error::{check_ffi_kind, ShadoResult};
use crate::traits::Component;

pub struct ComponentView<T: Component> {
    entity: EntityRef,
    _marker: PhantomData<fn() -> T>,
}

// Manual impls: derives would put bounds on `T`, which is only a marker.
impl<T: Component> Clone for ComponentView<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Component> Copy for ComponentView<T> {}

impl<T: Component> PartialEq for ComponentView<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entity == other.entity
    }
}

impl<T: Component> Eq for ComponentView<T> {}

impl<T: Component> std::fmt::Debug for ComponentView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentView")
            .field("kind", &T::KIND)
            .field("entity", &self.entity)
            .finish()
    }
}

impl<T: Component> ComponentView<T> {
    #[inline]
    pub(crate) fn new(entity: EntityRef) -> Self {
        ComponentView { entity, _marker: PhantomData }
    }

    /// The entity this view is bound to.
    #[inline]
    pub fn entity(&self) -> EntityRef {
        self.entity
    }

    #[inline]
    pub fn kind(&self) -> ComponentKind {
        T::KIND
    }

    /// Whether the component is still attached (a fresh boundary query).
    pub fn is_present(&self) -> bool {
        self.entity.has_component::<T>()
    }

    /// Read a plain value through an out-pointer call.
    pub(crate) fn read<V: Default>(
        &self,
        call: impl FnOnce(EntityId, *mut V) -> ShadoErrorCode,
    ) -> ShadoResult<V> {
        let id = self.entity.non_null()?;
        let mut out = V::default();
        check_ffi_kind(call(id, &mut out), T::KIND)?;
        Ok(out)
    }

    /// Issue a write call and surface its status.
    pub(crate) fn write(&self, call: impl FnOnce(EntityId) -> ShadoErrorCode) -> ShadoResult<()> {
        let id = self.entity.non_null()?;
        check_ffi_kind(call(id), T::KIND)
    }
}
