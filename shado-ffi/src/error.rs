/// FFI error codes shared between Rust and the native engine.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadoErrorCode {
    Ok = 0,
    StaleEntity = 1,
    AbsentComponent = 2,
    InvalidPrefab = 3,
    InvalidArgument = 4,
    NotFound = 5,
    UnknownComponentKind = 6,
    BufferTooSmall = 7,
    NoActiveScene = 8,
    InternalError = 9,
}
