// Two-call helpers for the string and id-list conventions of the API table.

use shado_ffi::{EntityId, ShadoErrorCode};

use crate::error::{check_ffi, check_ffi_ctx, ShadoError, ShadoResult};

/// Stack buffer size for the first string attempt. Tags, class names and
/// scene paths fit in practice; longer strings take a second call.
const INLINE_STRING: usize = 256;

/// Fetch a string through a `(buf, buf_len, out_len)` call. `context` names
/// the property for error messages.
pub(crate) fn read_string(
    context: &str,
    mut call: impl FnMut(*mut u8, u32, *mut u32) -> ShadoErrorCode,
) -> ShadoResult<String> {
    let mut buf = [0u8; INLINE_STRING];
    let mut out_len: u32 = 0;
    let code = call(buf.as_mut_ptr(), buf.len() as u32, &mut out_len);
    if code != ShadoErrorCode::BufferTooSmall {
        check_ffi_ctx(code, context)?;
        return utf8(&buf[..(out_len as usize).min(buf.len())], context);
    }

    // Second call with the exact size reported by the first.
    let mut heap = vec![0u8; out_len as usize];
    let mut actual: u32 = 0;
    check_ffi_ctx(call(heap.as_mut_ptr(), heap.len() as u32, &mut actual), context)?;
    heap.truncate(actual as usize);
    utf8(&heap, context)
}

fn utf8(bytes: &[u8], context: &str) -> ShadoResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|_| ShadoError::Internal(format!("{context} is not valid UTF-8")))
}

/// Fetch an id list through a `(buf, buf_len, out_count)` call: count first,
/// then fill.
pub(crate) fn read_ids(
    mut call: impl FnMut(*mut EntityId, u32, *mut u32) -> ShadoErrorCode,
) -> ShadoResult<Vec<EntityId>> {
    let mut count: u32 = 0;
    check_ffi(call(std::ptr::null_mut(), 0, &mut count))?;
    if count == 0 {
        return Ok(Vec::new());
    }

    let mut ids = vec![EntityId::NONE; count as usize];
    let mut actual: u32 = 0;
    check_ffi(call(ids.as_mut_ptr(), count, &mut actual))?;
    // The list may have shrunk between the two calls.
    ids.truncate(actual.min(count) as usize);
    Ok(ids)
}

/// Split a string into the `(ptr, len)` pair the boundary expects.
#[inline]
pub(crate) fn str_arg(s: &str) -> (*const u8, u32) {
    (s.as_ptr(), s.len() as u32)
}
