use std::path::{Path, PathBuf};
use std::time::Duration;

use glovelink_record::InputRecord;
use glovelink_transport::{connect_with_timeout, IpcStream};
use tracing::{debug, info, trace, warn};

use crate::config::ChannelConfig;
use crate::endpoint::Endpoint;
use crate::error::{ChannelError, Result};
use crate::writer::RecordWriter;

/// Connection lifecycle of a [`ChannelClient`].
///
/// `Unconnected` and `Connecting` are only observable while `open` runs;
/// a constructed client is always `Connected` or `Failed`. `Failed` is
/// terminal: nothing reconnects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Unconnected,
    Connecting,
    Connected,
    Failed,
}

/// Outbound connection to one hand's driver channel.
///
/// The connection is attempted once, eagerly, when the client is opened.
/// A client that could not connect (or whose channel later broke) silently
/// drops every write. This matches what existing driver integrations expect;
/// callers that need to know should check [`ChannelClient::is_connected`].
///
/// Not internally synchronized. Wrap it in a `Mutex` to share across threads.
#[derive(Debug)]
pub struct ChannelClient {
    endpoint: Endpoint,
    address: PathBuf,
    state: ChannelState,
    writer: Option<RecordWriter<IpcStream>>,
    connect_error: Option<ChannelError>,
    records_written: u64,
}

impl ChannelClient {
    /// Connect to `endpoint`, waiting at most `timeout` for the driver.
    ///
    /// Never fails. On timeout or error the failure is logged and the returned
    /// client is in [`ChannelState::Failed`].
    pub fn open(endpoint: Endpoint, timeout: Duration) -> Self {
        Self::open_with_config(
            endpoint,
            &ChannelConfig::default().with_connect_timeout(timeout),
        )
    }

    /// Connect with explicit configuration.
    pub fn open_with_config(endpoint: Endpoint, config: &ChannelConfig) -> Self {
        let mut client = Self {
            endpoint,
            address: config.address_for(endpoint),
            state: ChannelState::Unconnected,
            writer: None,
            connect_error: None,
            records_written: 0,
        };
        client.connect(config);
        client
    }

    fn connect(&mut self, config: &ChannelConfig) {
        self.state = ChannelState::Connecting;
        info!(
            hand = %self.endpoint,
            address = ?self.address,
            timeout_ms = config.connect_timeout.as_millis() as u64,
            "connecting to glove channel"
        );

        let connected = connect_with_timeout(&self.address, config.connect_timeout)
            .and_then(|stream| {
                stream
                    .set_write_timeout(config.write_timeout)
                    .map(|()| stream)
            });

        match connected {
            Ok(stream) => {
                info!(hand = %self.endpoint, "glove channel connected");
                self.writer = Some(RecordWriter::new(stream));
                self.state = ChannelState::Connected;
            }
            Err(err) => {
                let err = ChannelError::from_connect(self.endpoint, err);
                warn!(
                    hand = %self.endpoint,
                    error = %err,
                    "glove channel connection failed; writes will be dropped"
                );
                self.connect_error = Some(err);
                self.state = ChannelState::Failed;
            }
        }
    }

    /// Send one record to the driver.
    ///
    /// Returns `Ok(())` without sending anything when the client is not
    /// connected. A failed write closes the channel and moves the client to
    /// [`ChannelState::Failed`]; later writes are then dropped.
    pub fn write(&mut self, record: &InputRecord) -> Result<()> {
        let Some(writer) = self.writer.as_mut() else {
            trace!(hand = %self.endpoint, "glove channel not connected; record dropped");
            return Ok(());
        };

        match writer.write_record(record) {
            Ok(()) => {
                self.records_written += 1;
                Ok(())
            }
            Err(err) => {
                debug!(hand = %self.endpoint, error = %err, "glove channel write failed; closing");
                self.writer = None;
                self.state = ChannelState::Failed;
                Err(err)
            }
        }
    }

    /// Send the relaxed record (all zero, nothing pressed).
    pub fn relax(&mut self) -> Result<()> {
        self.write(&InputRecord::zeroed())
    }

    /// Whether writes currently reach the driver.
    pub fn is_connected(&self) -> bool {
        self.state == ChannelState::Connected
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Platform address the client connected (or tried to connect) to.
    pub fn address(&self) -> &Path {
        &self.address
    }

    /// Why the connect phase failed, if it did.
    pub fn connect_error(&self) -> Option<&ChannelError> {
        self.connect_error.as_ref()
    }

    /// Records delivered to the channel so far. Dropped writes do not count.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }
}
