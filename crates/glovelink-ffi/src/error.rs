use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;

use glovelink_client::ChannelError;
use glovelink_record::RecordError;

use crate::types::GlResult;

thread_local! {
    static LAST_ERROR: RefCell<CString> = RefCell::new(CString::default());
}

pub(crate) fn clear_error_state() {
    LAST_ERROR.with(|state| {
        *state.borrow_mut() = CString::default();
    });
}

pub(crate) fn set_error_message(message: impl Into<String>) {
    let sanitized = message.into().replace('\0', "?");
    LAST_ERROR.with(|state| {
        *state.borrow_mut() = CString::new(sanitized).unwrap_or_default();
    });
}

pub(crate) fn set_invalid_argument(message: impl Into<String>) -> GlResult {
    set_error_message(message);
    GlResult::InvalidArgument
}

pub(crate) fn set_panic_error() {
    set_error_message("panic across FFI boundary");
}

pub(crate) fn map_channel_error(err: &ChannelError) -> GlResult {
    set_error_message(err.to_string());
    match err {
        ChannelError::TransportFailure(_)
        | ChannelError::Connect(_)
        | ChannelError::ConnectTimeout { .. } => GlResult::TransportFailure,
    }
}

pub(crate) fn map_record_error(err: &RecordError) -> GlResult {
    set_error_message(err.to_string());
    GlResult::MalformedRecord
}

pub(crate) fn last_error_ptr() -> *const c_char {
    LAST_ERROR.with(|state| state.borrow().as_ptr())
}
