use std::path::Path;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{Result, TransportError};
use crate::stream::IpcStream;

/// Pause between connect attempts while the listener is not up yet.
pub const CONNECT_RETRY_INTERVAL: Duration = Duration::from_millis(50);

/// Connect to a named channel, waiting up to `timeout` for a listener.
///
/// The channel is owned by another process and may not exist yet, so
/// "not found" and "refused" are retried until the deadline. Any other error
/// fails immediately. At least one attempt is always made, even with a zero
/// timeout.
pub fn connect_with_timeout(path: impl AsRef<Path>, timeout: Duration) -> Result<IpcStream> {
    let path = path.as_ref();
    let start = Instant::now();

    loop {
        match try_connect(path, timeout.saturating_sub(start.elapsed())) {
            Ok(stream) => {
                debug!(?path, transport = stream.transport_name(), "channel connected");
                return Ok(stream);
            }
            Err(err) if is_retryable_connect_error(&err) => {
                let remaining = timeout.saturating_sub(start.elapsed());
                if remaining.is_zero() {
                    return Err(TransportError::ConnectTimeout {
                        path: path.to_path_buf(),
                        timeout,
                    });
                }
                std::thread::sleep(CONNECT_RETRY_INTERVAL.min(remaining));
            }
            Err(err) => {
                return Err(TransportError::Connect {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        }
    }
}

#[cfg(unix)]
fn try_connect(path: &Path, _remaining: Duration) -> std::io::Result<IpcStream> {
    std::os::unix::net::UnixStream::connect(path).map(IpcStream::from_unix)
}

#[cfg(windows)]
fn try_connect(path: &Path, remaining: Duration) -> std::io::Result<IpcStream> {
    use std::os::windows::ffi::OsStrExt;

    use windows_sys::Win32::Foundation::ERROR_PIPE_BUSY;
    use windows_sys::Win32::System::Pipes::WaitNamedPipeW;

    match std::fs::OpenOptions::new().write(true).open(path) {
        Ok(file) => Ok(IpcStream::from_pipe(file)),
        Err(err) if err.raw_os_error() == Some(ERROR_PIPE_BUSY as i32) => {
            // All server instances are busy; block until one frees up or the
            // deadline passes, then let the caller retry the open.
            let wait_ms = u32::try_from(remaining.as_millis()).unwrap_or(u32::MAX);
            let wide: Vec<u16> = path
                .as_os_str()
                .encode_wide()
                .chain(std::iter::once(0))
                .collect();
            // SAFETY: `wide` is a NUL-terminated UTF-16 buffer that outlives the call.
            unsafe { WaitNamedPipeW(wide.as_ptr(), wait_ms) };
            Err(err)
        }
        Err(err) => Err(err),
    }
}

fn is_retryable_connect_error(err: &std::io::Error) -> bool {
    #[cfg(windows)]
    {
        if err.raw_os_error() == Some(windows_sys::Win32::Foundation::ERROR_PIPE_BUSY as i32) {
            return true;
        }
    }

    matches!(
        err.kind(),
        std::io::ErrorKind::NotFound | std::io::ErrorKind::ConnectionRefused
    )
}
