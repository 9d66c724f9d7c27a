//! glovelink-ffi: C-ABI exports for the glove record codec and channel client.

mod client;
mod error;
mod record;
mod types;

use std::panic::AssertUnwindSafe;

pub use client::{
    gl_client_free, gl_client_is_connected, gl_client_open, gl_client_relax, gl_client_write,
    gl_record_relaxed,
};
pub use record::{gl_decode, gl_encode};
pub use types::{GlClientHandle, GlInputRecord, GlResult, GL_HAND_LEFT, GL_HAND_RIGHT};

/// Encoded record length in bytes.
pub const GL_RECORD_SIZE: usize = glovelink_record::RECORD_SIZE;

fn ffi_boundary<T>(on_panic: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            error::set_panic_error();
            on_panic
        }
    }
}

#[no_mangle]
pub extern "C" fn gl_record_size() -> usize {
    GL_RECORD_SIZE
}

#[no_mangle]
pub extern "C" fn gl_last_error() -> *const std::os::raw::c_char {
    ffi_boundary(std::ptr::null(), error::last_error_ptr)
}
