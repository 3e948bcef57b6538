// Global API table storage. Initialized once during library load, then read-only.
//
// The native scene is not thread-safe, and scripts may run work on task
// threads. Every boundary call therefore goes through `api()`, which holds the
// process-wide scene lock for the rest of the calling statement. The lock is
// reentrant: the host may call back into Rust (destroy notifications, script
// hooks) while a call is in flight on the same thread.

use std::ops::Deref;
use std::sync::OnceLock;

use parking_lot::{const_reentrant_mutex, ReentrantMutex, ReentrantMutexGuard};
use shado_ffi::{ShadoApiTable, SHADO_API_VERSION};

/// Wrapper so a raw pointer can live inside OnceLock (which requires Send+Sync).
/// SAFETY: The API table is created by the host before `shado_init` and lives
/// for the entire library lifetime. Access is read-only after init.
struct ApiRef(*const ShadoApiTable);
unsafe impl Send for ApiRef {}
unsafe impl Sync for ApiRef {}

static API: OnceLock<ApiRef> = OnceLock::new();

static SCENE_LOCK: ReentrantMutex<()> = const_reentrant_mutex(());

/// Store the API table pointer. Called once by `shado_init`.
/// Panics if called more than once or with a table of another version.
pub fn init_api(table: *const ShadoApiTable) {
    assert!(!table.is_null(), "init_api called with null pointer");
    let version = unsafe { (*table).version };
    assert_eq!(
        version, SHADO_API_VERSION,
        "host API table version {version} does not match runtime version {SHADO_API_VERSION}"
    );
    if API.set(ApiRef(table)).is_err() {
        panic!("init_api called more than once");
    }
}

/// The API table, borrowed under the scene lock.
pub struct ApiGuard {
    table: &'static ShadoApiTable,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl Deref for ApiGuard {
    type Target = ShadoApiTable;

    #[inline(always)]
    fn deref(&self) -> &ShadoApiTable {
        self.table
    }
}

/// Access the global API table. Panics if called before `init_api`.
///
/// Blocks while another thread holds the scene lock.
#[inline(always)]
pub fn api() -> ApiGuard {
    // SAFETY: The pointer was validated non-null in init_api, and the host
    // guarantees the table outlives the library.
    let table = unsafe { &*API.get().expect("shado API not initialized").0 };
    ApiGuard { table, _lock: SCENE_LOCK.lock() }
}

/// Hold the scene lock across several boundary calls, so a task thread can
/// read and write as one step. Reentrant on the holding thread.
pub fn scene_lock() -> ReentrantMutexGuard<'static, ()> {
    SCENE_LOCK.lock()
}

/// Returns true if the API table has been initialized.
#[inline]
pub fn is_api_initialized() -> bool {
    API.get().is_some()
}
