use std::time::Duration;

use glovelink_client::{ChannelClient, ChannelConfig, Endpoint};
use glovelink_record::InputRecord;

use crate::error;
use crate::types::{
    ClientHandle, GlClientHandle, GlInputRecord, GlResult, GL_HAND_LEFT, GL_HAND_RIGHT,
};

fn with_client_mut<T>(
    handle: GlClientHandle,
    on_error: T,
    f: impl FnOnce(&mut ClientHandle) -> T,
) -> T {
    if handle.is_null() {
        let _ = error::set_invalid_argument("client handle cannot be null");
        return on_error;
    }

    let client_handle = {
        // SAFETY: Pointer validity is guaranteed by the caller.
        unsafe { &mut *(handle as *mut ClientHandle) }
    };

    f(client_handle)
}

fn endpoint_arg(hand: i32) -> Option<Endpoint> {
    match hand {
        GL_HAND_LEFT => Some(Endpoint::Left),
        GL_HAND_RIGHT => Some(Endpoint::Right),
        _ => None,
    }
}

/// Open a client for `hand` (`GL_HAND_LEFT` / `GL_HAND_RIGHT`).
///
/// Environment overrides from `ChannelConfig::from_env` apply, except the
/// timeout, which is always `timeout_ms`. Returns null only for an invalid
/// hand. A client that could not reach the driver is still returned; check
/// `gl_client_is_connected`.
#[no_mangle]
pub extern "C" fn gl_client_open(hand: i32, timeout_ms: u32) -> GlClientHandle {
    crate::ffi_boundary(std::ptr::null_mut(), || {
        error::clear_error_state();

        let Some(endpoint) = endpoint_arg(hand) else {
            let _ = error::set_invalid_argument(format!("invalid hand {hand}"));
            return std::ptr::null_mut();
        };

        let config = ChannelConfig::from_env()
            .with_connect_timeout(Duration::from_millis(timeout_ms.into()));
        let client = ChannelClient::open_with_config(endpoint, &config);
        if let Some(err) = client.connect_error() {
            error::set_error_message(err.to_string());
        }
        Box::into_raw(Box::new(ClientHandle { client })) as GlClientHandle
    })
}

/// Whether the client's writes reach the driver.
///
/// # Safety
/// `client` must be null or a handle returned by `gl_client_open`.
#[no_mangle]
pub unsafe extern "C" fn gl_client_is_connected(client: GlClientHandle) -> bool {
    crate::ffi_boundary(false, || {
        with_client_mut(client, false, |handle| handle.client.is_connected())
    })
}

/// Send one record. A disconnected client drops it and returns `GlResult::Ok`.
///
/// # Safety
/// `client` must be a handle returned by `gl_client_open`; `record` must be
/// null or point to a readable `GlInputRecord`.
#[no_mangle]
pub unsafe extern "C" fn gl_client_write(
    client: GlClientHandle,
    record: *const GlInputRecord,
) -> GlResult {
    crate::ffi_boundary(GlResult::Internal, || {
        error::clear_error_state();

        if record.is_null() {
            return error::set_invalid_argument("record cannot be null");
        }
        let record = {
            // SAFETY: Non-null checked above; readability guaranteed by the caller.
            InputRecord::from(unsafe { &*record })
        };

        with_client_mut(client, GlResult::InvalidArgument, |handle| {
            match handle.client.write(&record) {
                Ok(()) => GlResult::Ok,
                Err(err) => error::map_channel_error(&err),
            }
        })
    })
}

/// Send the relaxed record.
///
/// # Safety
/// `client` must be a handle returned by `gl_client_open`.
#[no_mangle]
pub unsafe extern "C" fn gl_client_relax(client: GlClientHandle) -> GlResult {
    crate::ffi_boundary(GlResult::Internal, || {
        error::clear_error_state();
        with_client_mut(client, GlResult::InvalidArgument, |handle| {
            match handle.client.relax() {
                Ok(()) => GlResult::Ok,
                Err(err) => error::map_channel_error(&err),
            }
        })
    })
}

/// Close the channel and free the handle.
///
/// # Safety
/// `client` must be null or a handle returned by `gl_client_open` that has
/// not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn gl_client_free(client: GlClientHandle) {
    crate::ffi_boundary((), || {
        if client.is_null() {
            return;
        }
        // SAFETY: Handle was allocated by `gl_client_open` via Box::into_raw.
        unsafe {
            drop(Box::from_raw(client as *mut ClientHandle));
        }
    });
}

/// The relaxed record.
#[no_mangle]
pub extern "C" fn gl_record_relaxed() -> GlInputRecord {
    GlInputRecord::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_hand_returns_null() {
        let handle = gl_client_open(7, 0);
        assert!(handle.is_null());
    }

    #[test]
    fn null_handles_are_rejected() {
        let record = gl_record_relaxed();
        // SAFETY: Null handles are explicitly handled.
        unsafe {
            assert!(!gl_client_is_connected(std::ptr::null_mut()));
            assert_eq!(
                gl_client_write(std::ptr::null_mut(), &record),
                GlResult::InvalidArgument
            );
            assert_eq!(gl_client_relax(std::ptr::null_mut()), GlResult::InvalidArgument);
            gl_client_free(std::ptr::null_mut());
        }
    }

    #[test]
    fn unreachable_driver_gives_inert_client() {
        let handle = gl_client_open(GL_HAND_LEFT, 0);
        assert!(!handle.is_null());
        let record = gl_record_relaxed();

        // SAFETY: `handle` is a live client handle from `gl_client_open`.
        unsafe {
            assert!(!gl_client_is_connected(handle));
            assert_eq!(gl_client_write(handle, &record), GlResult::Ok);
            assert_eq!(
                gl_client_write(handle, std::ptr::null()),
                GlResult::InvalidArgument
            );
            assert_eq!(gl_client_relax(handle), GlResult::Ok);
            gl_client_free(handle);
        }
    }
}
