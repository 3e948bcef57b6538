// FFI boundary guard: wraps Rust callbacks to catch panics before they
// cross into the host (which is undefined behavior).

use shado_ffi::LogLevel;

use crate::logging;

/// Execute `f` and catch any panic, returning `default` on failure.
///
/// Every `extern "C"` function the host calls wraps its body in this guard.
/// The panic message goes to the host log at `Critical` when the API table
/// is installed; before that it is dropped.
pub fn ffi_boundary<F, R>(default: R, f: F) -> R
where
    F: FnOnce() -> R + std::panic::UnwindSafe,
{
    match std::panic::catch_unwind(f) {
        Ok(value) => value,
        Err(payload) => {
            logging::log(LogLevel::Critical, &panic_message(payload.as_ref()));
            default
        }
    }
}

/// Extract a human-readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("[Shado] Rust panic: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("[Shado] Rust panic: {s}")
    } else {
        "[Shado] Rust panic (unknown payload)".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup;

    #[test]
    fn ffi_boundary_returns_value_on_success() {
        let result = ffi_boundary(0i32, || 42);
        assert_eq!(result, 42);
    }

    #[test]
    fn ffi_boundary_returns_default_on_panic() {
        let result = ffi_boundary(-1i32, || {
            panic!("test panic");
        });
        assert_eq!(result, -1);
    }

    #[test]
    fn ffi_boundary_returns_default_on_string_panic() {
        let result = ffi_boundary(false, || -> bool {
            panic!("{}", "formatted panic");
        });
        assert!(!result);
    }

    #[test]
    fn panic_is_logged_to_the_host() {
        let _guard = setup();
        ffi_boundary((), || panic!("kaboom"));
        assert_eq!(
            shado_sim::logs(),
            vec![(LogLevel::Critical, "[Shado] Rust panic: kaboom".to_string())]
        );
    }
}
