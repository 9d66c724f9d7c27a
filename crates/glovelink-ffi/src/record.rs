use glovelink_record::{decode, encode, InputRecord, RECORD_SIZE};

use crate::error;
use crate::types::{GlInputRecord, GlResult};

/// Encode `record` into `out`. Exactly `GL_RECORD_SIZE` bytes are written.
///
/// # Safety
/// `record` must be null or point to a readable `GlInputRecord`; `out` must be
/// null or point to at least `out_len` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn gl_encode(
    record: *const GlInputRecord,
    out: *mut u8,
    out_len: usize,
) -> GlResult {
    crate::ffi_boundary(GlResult::Internal, || {
        error::clear_error_state();

        if record.is_null() {
            return error::set_invalid_argument("record cannot be null");
        }
        if out.is_null() {
            return error::set_invalid_argument("output buffer cannot be null");
        }
        if out_len < RECORD_SIZE {
            return error::set_invalid_argument(format!(
                "output buffer holds {out_len} bytes, need {RECORD_SIZE}"
            ));
        }

        let record = {
            // SAFETY: Non-null checked above; readability guaranteed by the caller.
            InputRecord::from(unsafe { &*record })
        };
        let wire = encode(&record);
        let out = {
            // SAFETY: Non-null and length checked above.
            unsafe { std::slice::from_raw_parts_mut(out, RECORD_SIZE) }
        };
        out.copy_from_slice(&wire);
        GlResult::Ok
    })
}

/// Decode exactly `len` bytes at `data` into `out`.
///
/// Any `len` other than `GL_RECORD_SIZE` is `GlResult::MalformedRecord` and
/// leaves `out` untouched.
///
/// # Safety
/// `data` must be null or point to `len` readable bytes; `out` must be null or
/// point to a writable `GlInputRecord`.
#[no_mangle]
pub unsafe extern "C" fn gl_decode(
    data: *const u8,
    len: usize,
    out: *mut GlInputRecord,
) -> GlResult {
    crate::ffi_boundary(GlResult::Internal, || {
        error::clear_error_state();

        if data.is_null() {
            return error::set_invalid_argument("data cannot be null");
        }
        if out.is_null() {
            return error::set_invalid_argument("output record cannot be null");
        }

        let bytes = {
            // SAFETY: Non-null checked above; length guaranteed by the caller.
            unsafe { std::slice::from_raw_parts(data, len) }
        };
        match decode(bytes) {
            Ok(record) => {
                // SAFETY: Non-null checked above; writability guaranteed by the caller.
                unsafe {
                    *out = GlInputRecord::from(&record);
                }
                GlResult::Ok
            }
            Err(err) => error::map_record_error(&err),
        }
    })
}

#[cfg(test)]
mod tests {
    use std::ffi::CStr;

    use super::*;

    fn last_error() -> String {
        // SAFETY: gl_last_error returns a pointer to a thread-local CString.
        unsafe { CStr::from_ptr(crate::gl_last_error()) }
            .to_str()
            .unwrap()
            .to_string()
    }

    fn sample() -> GlInputRecord {
        let mut raw = GlInputRecord::default();
        raw.flexion[3] = 0.75;
        raw.splay[1] = -0.5;
        raw.joy_x = 0.1;
        raw.pinch = 1;
        raw.trg_value = 0.9;
        raw
    }

    #[test]
    fn encode_matches_rust_codec() {
        let raw = sample();
        let mut out = [0u8; RECORD_SIZE];
        // SAFETY: Both pointers reference live stack values of the right size.
        let rc = unsafe { gl_encode(&raw, out.as_mut_ptr(), out.len()) };
        assert_eq!(rc, GlResult::Ok);
        assert_eq!(out, encode(&InputRecord::from(&raw)));
    }

    #[test]
    fn encode_rejects_short_buffer() {
        let raw = sample();
        let mut out = [0xEEu8; RECORD_SIZE - 1];
        // SAFETY: Both pointers reference live stack values; length is passed truthfully.
        let rc = unsafe { gl_encode(&raw, out.as_mut_ptr(), out.len()) };
        assert_eq!(rc, GlResult::InvalidArgument);
        assert!(out.iter().all(|&b| b == 0xEE));
        assert!(last_error().contains("need"));
    }

    #[test]
    fn decode_reads_back_encoded_bytes() {
        let raw = sample();
        let wire = encode(&InputRecord::from(&raw));
        let mut out = GlInputRecord::default();
        // SAFETY: Both pointers reference live stack values.
        let rc = unsafe { gl_decode(wire.as_ptr(), wire.len(), &mut out) };
        assert_eq!(rc, GlResult::Ok);
        assert_eq!(out, raw);
    }

    #[test]
    fn decode_normalizes_button_bytes() {
        let mut wire = [0u8; RECORD_SIZE];
        wire[112] = 0x7F;
        let mut out = GlInputRecord::default();
        // SAFETY: Both pointers reference live stack values.
        let rc = unsafe { gl_decode(wire.as_ptr(), wire.len(), &mut out) };
        assert_eq!(rc, GlResult::Ok);
        assert_eq!(out.grab, 1);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let wire = [0u8; RECORD_SIZE + 1];
        let mut out = sample();
        // SAFETY: Both pointers reference live stack values.
        let rc = unsafe { gl_decode(wire.as_ptr(), wire.len(), &mut out) };
        assert_eq!(rc, GlResult::MalformedRecord);
        assert_eq!(out, sample());
        assert!(last_error().contains("malformed record"));
    }

    #[test]
    fn null_pointers_are_invalid_arguments() {
        let raw = sample();
        let mut out = GlInputRecord::default();
        let mut buf = [0u8; RECORD_SIZE];
        // SAFETY: Null pointers are explicitly handled.
        unsafe {
            assert_eq!(
                gl_encode(std::ptr::null(), buf.as_mut_ptr(), buf.len()),
                GlResult::InvalidArgument
            );
            assert_eq!(
                gl_encode(&raw, std::ptr::null_mut(), RECORD_SIZE),
                GlResult::InvalidArgument
            );
            assert_eq!(
                gl_decode(std::ptr::null(), RECORD_SIZE, &mut out),
                GlResult::InvalidArgument
            );
            assert_eq!(
                gl_decode(buf.as_ptr(), buf.len(), std::ptr::null_mut()),
                GlResult::InvalidArgument
            );
        }
    }
}
