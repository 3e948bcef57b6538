// Error types for the Shado runtime.

use shado_ffi::{ComponentKind, EntityId, PrefabId, ShadoErrorCode};

/// Rich error type for Shado operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShadoError {
    /// The entity no longer exists in the active scene (or never did).
    #[error("entity is no longer alive")]
    StaleEntity,

    /// The entity is alive but does not carry the requested component.
    #[error("component not present: {0}")]
    AbsentComponent(String),

    /// A caller-supplied argument was rejected before or at the boundary.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid prefab: {0}")]
    InvalidPrefab(PrefabId),

    #[error("not found: {0}")]
    NotFound(String),

    /// The host registry does not know this component kind.
    #[error("component kind not registered with the host: {0}")]
    UnregisteredKind(String),

    /// A parent chain revisited an entity or exceeded the configured depth.
    #[error("hierarchy cycle detected at {0}")]
    HierarchyCycle(EntityId),

    #[error("buffer too small")]
    BufferTooSmall,

    #[error("no active scene")]
    NoActiveScene,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience alias used throughout the runtime.
pub type ShadoResult<T> = Result<T, ShadoError>;

/// Convert a boundary error code to a `ShadoResult<()>`.
/// `Ok` maps to `Ok(())`, all others map to the corresponding `ShadoError`.
pub fn check_ffi(code: ShadoErrorCode) -> ShadoResult<()> {
    match code {
        ShadoErrorCode::Ok => Ok(()),
        other => Err(ShadoError::from(other)),
    }
}

/// Like `check_ffi`, but enriches errors that carry a name with `context`.
pub fn check_ffi_ctx(code: ShadoErrorCode, context: &str) -> ShadoResult<()> {
    match code {
        ShadoErrorCode::Ok => Ok(()),
        ShadoErrorCode::AbsentComponent => Err(ShadoError::AbsentComponent(context.into())),
        ShadoErrorCode::InvalidArgument => Err(ShadoError::InvalidArgument(context.into())),
        ShadoErrorCode::NotFound => Err(ShadoError::NotFound(context.into())),
        ShadoErrorCode::UnknownComponentKind => Err(ShadoError::UnregisteredKind(context.into())),
        other => Err(ShadoError::from(other)),
    }
}

/// `check_ffi_ctx` keyed by a component kind, the common case for views.
#[inline]
pub fn check_ffi_kind(code: ShadoErrorCode, kind: ComponentKind) -> ShadoResult<()> {
    check_ffi_ctx(code, kind.name())
}

impl From<ShadoErrorCode> for ShadoError {
    fn from(code: ShadoErrorCode) -> Self {
        match code {
            ShadoErrorCode::Ok => {
                // Callers should not convert Ok into an error. If they do,
                // treat it as an internal logic bug.
                ShadoError::Internal("unexpected Ok error code".into())
            }
            ShadoErrorCode::StaleEntity => ShadoError::StaleEntity,
            ShadoErrorCode::AbsentComponent => ShadoError::AbsentComponent(String::new()),
            ShadoErrorCode::InvalidPrefab => ShadoError::InvalidPrefab(PrefabId::NONE),
            ShadoErrorCode::InvalidArgument => ShadoError::InvalidArgument(String::new()),
            ShadoErrorCode::NotFound => ShadoError::NotFound(String::new()),
            ShadoErrorCode::UnknownComponentKind => ShadoError::UnregisteredKind(String::new()),
            ShadoErrorCode::BufferTooSmall => ShadoError::BufferTooSmall,
            ShadoErrorCode::NoActiveScene => ShadoError::NoActiveScene,
            ShadoErrorCode::InternalError => ShadoError::Internal(String::new()),
        }
    }
}
