// shado-ffi: #[repr(C)] types, handle types, API table definition.
// Zero external dependencies. This crate defines the complete Rust <-> native contract.

pub mod handles;
pub mod error;
pub mod kinds;
pub mod types;
pub mod api_table;
pub mod callbacks;

pub use handles::*;
pub use error::*;
pub use kinds::*;
pub use types::*;
pub use api_table::*;
pub use callbacks::*;

/// Version stamped into [`ShadoApiTable::version`]. The runtime refuses a
/// table with a different major contract.
pub const SHADO_API_VERSION: u32 = 1;
