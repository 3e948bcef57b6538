use std::fmt;

/// Identifier of an entity in the native scene. `0` never names a live entity.
///
/// Ids are plain values assigned by the native side; holding one keeps
/// nothing alive.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl EntityId {
    pub const NONE: EntityId = EntityId(0);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Identifier of a prefab template known to the native scene. `0` = no prefab.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct PrefabId(pub u64);

impl PrefabId {
    pub const NONE: PrefabId = PrefabId(0);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for PrefabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Prefab({})", self.0)
    }
}

/// Opaque handle to a native texture. `0` = no texture.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct TextureHandle(pub u64);

/// Opaque handle to a native shader program. `0` = none.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct ShaderHandle(pub u64);

/// Opaque handle to a native font atlas. `0` = none.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct FontHandle(pub u64);
