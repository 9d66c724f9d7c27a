use std::fmt;
use std::io;

use glovelink_client::ChannelError;
use glovelink_record::RecordError;
use glovelink_transport::TransportError;

// Process exit codes.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

fn io_code(kind: io::ErrorKind) -> i32 {
    match kind {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::ConnectionRefused => FAILURE,
        io::ErrorKind::BrokenPipe
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::WriteZero => TRANSPORT_ERROR,
        _ => INTERNAL,
    }
}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    CliError::new(io_code(err.kind()), format!("{context}: {err}"))
}

pub fn transport_error(context: &str, err: &TransportError) -> CliError {
    let code = match err {
        TransportError::Bind { source, .. }
        | TransportError::Connect { source, .. }
        | TransportError::Accept(source)
        | TransportError::Io(source) => io_code(source.kind()),
        TransportError::ConnectTimeout { .. } => TIMEOUT,
        TransportError::PathTooLong { .. } => USAGE,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn channel_error(context: &str, err: &ChannelError) -> CliError {
    match err {
        ChannelError::ConnectTimeout { .. } => CliError::new(TIMEOUT, format!("{context}: {err}")),
        ChannelError::Connect(inner) => transport_error(context, inner),
        ChannelError::TransportFailure(_) => {
            CliError::new(TRANSPORT_ERROR, format!("{context}: {err}"))
        }
    }
}

pub fn record_error(context: &str, err: &RecordError) -> CliError {
    CliError::new(DATA_INVALID, format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use glovelink_client::Endpoint;

    use super::*;

    #[test]
    fn connect_timeout_maps_to_timeout() {
        let err = ChannelError::ConnectTimeout {
            endpoint: Endpoint::Left,
            timeout: Duration::from_millis(200),
        };
        let cli = channel_error("connect failed", &err);
        assert_eq!(cli.code, TIMEOUT);
        assert!(cli.message.starts_with("connect failed: left"));
    }

    #[test]
    fn broken_pipe_is_transport_error() {
        let err = ChannelError::TransportFailure(io::Error::from(io::ErrorKind::BrokenPipe));
        assert_eq!(channel_error("write failed", &err).code, TRANSPORT_ERROR);
    }

    #[test]
    fn connect_errors_follow_io_kind() {
        let err = ChannelError::Connect(TransportError::Connect {
            path: PathBuf::from("/tmp/x"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        });
        assert_eq!(channel_error("connect failed", &err).code, PERMISSION_DENIED);
    }

    #[test]
    fn malformed_record_is_data_invalid() {
        let err = RecordError::MalformedRecord { len: 3 };
        assert_eq!(record_error("decode failed", &err).code, DATA_INVALID);
    }
}
