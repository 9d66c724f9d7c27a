use std::time::Duration;

use glovelink_transport::TransportError;

use crate::endpoint::Endpoint;

/// Errors that can occur in channel client operations.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The driver did not accept the connection in time.
    #[error("{endpoint} hand channel not available after {timeout:?}")]
    ConnectTimeout { endpoint: Endpoint, timeout: Duration },

    /// Connecting failed for a reason other than the timeout.
    #[error("connect failed: {0}")]
    Connect(#[source] TransportError),

    /// Writing to an established channel failed, e.g. the driver exited.
    #[error("transport failure: {0}")]
    TransportFailure(#[source] std::io::Error),
}

impl ChannelError {
    pub(crate) fn from_connect(endpoint: Endpoint, err: TransportError) -> Self {
        match err {
            TransportError::ConnectTimeout { timeout, .. } => {
                ChannelError::ConnectTimeout { endpoint, timeout }
            }
            other => ChannelError::Connect(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChannelError>;
