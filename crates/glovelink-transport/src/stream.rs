use std::io::{Read, Write};
use std::time::Duration;

use crate::error::Result;

/// A connected IPC stream implementing Read + Write.
///
/// Glove channels are write-only from the client side; `Read` exists for the
/// listening end used by tests and the monitor command.
/// On Unix, this wraps a Unix domain socket stream.
/// On Windows, this wraps a named pipe file handle.
pub struct IpcStream {
    inner: IpcStreamInner,
}

enum IpcStreamInner {
    #[cfg(unix)]
    Unix(std::os::unix::net::UnixStream),
    #[cfg(windows)]
    Pipe(std::fs::File),
}

impl Read for IpcStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match &mut self.inner {
            #[cfg(unix)]
            IpcStreamInner::Unix(stream) => stream.read(buf),
            #[cfg(windows)]
            IpcStreamInner::Pipe(file) => file.read(buf),
        }
    }
}

impl Write for IpcStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.inner {
            #[cfg(unix)]
            IpcStreamInner::Unix(stream) => stream.write(buf),
            #[cfg(windows)]
            IpcStreamInner::Pipe(file) => file.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.inner {
            #[cfg(unix)]
            IpcStreamInner::Unix(stream) => stream.flush(),
            #[cfg(windows)]
            IpcStreamInner::Pipe(file) => file.flush(),
        }
    }
}

impl IpcStream {
    /// Create an IpcStream from a Unix domain socket stream.
    #[cfg(unix)]
    pub(crate) fn from_unix(stream: std::os::unix::net::UnixStream) -> Self {
        Self {
            inner: IpcStreamInner::Unix(stream),
        }
    }

    /// Create an IpcStream from an opened named pipe client handle.
    #[cfg(windows)]
    pub(crate) fn from_pipe(file: std::fs::File) -> Self {
        Self {
            inner: IpcStreamInner::Pipe(file),
        }
    }

    /// Set write timeout on the underlying stream.
    ///
    /// Named pipe handles opened for synchronous I/O have no per-call
    /// timeout; the setting is ignored there.
    pub fn set_write_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        match &self.inner {
            #[cfg(unix)]
            IpcStreamInner::Unix(stream) => stream.set_write_timeout(timeout).map_err(Into::into),
            #[cfg(windows)]
            IpcStreamInner::Pipe(_) => {
                if timeout.is_some() {
                    tracing::debug!("write timeout not supported on named pipes; ignoring");
                }
                Ok(())
            }
        }
    }

    /// Transport name for diagnostics.
    pub fn transport_name(&self) -> &'static str {
        match &self.inner {
            #[cfg(unix)]
            IpcStreamInner::Unix(_) => "unix-domain-socket",
            #[cfg(windows)]
            IpcStreamInner::Pipe(_) => "named-pipe",
        }
    }
}

impl std::fmt::Debug for IpcStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IpcStream")
            .field("type", &self.transport_name())
            .finish()
    }
}
