//! One-way glove input channel client.
//!
//! Open a [`ChannelClient`] for the left or right hand, then push
//! [`InputRecord`]s to the driver. Connection problems never abort the
//! caller: a client that failed to connect stays usable but inert, and its
//! writes are dropped. Check [`ChannelClient::is_connected`] when that
//! matters.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod writer;

pub use client::{ChannelClient, ChannelState};
pub use config::{ChannelConfig, CONNECT_TIMEOUT_ENV, DEFAULT_CONNECT_TIMEOUT, PIPE_ROOT_ENV};
pub use endpoint::{Endpoint, ParseEndpointError, PIPE_NAMESPACE};
pub use error::{ChannelError, Result};
pub use glovelink_record::InputRecord;
pub use writer::RecordWriter;
