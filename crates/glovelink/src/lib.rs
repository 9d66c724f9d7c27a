//! Glove input records and the one-way channel that carries them to the driver.
//!
//! A hand-tracking source builds an [`record::InputRecord`] per frame and
//! pushes it through a [`client::ChannelClient`] opened for the left or right
//! hand. The driver reads fixed 120-byte records from a named pipe (Windows)
//! or a Unix domain socket.
//!
//! # Crate Structure
//!
//! - [`record`]: the record type, wire layout and codec
//! - [`client`]: endpoint naming, configuration and the channel client
//! - [`transport`]: platform stream and timed connect

/// Re-export transport types.
pub mod transport {
    pub use glovelink_transport::*;
}

/// Re-export record types.
pub mod record {
    pub use glovelink_record::*;
}

/// Re-export client types.
pub mod client {
    pub use glovelink_client::*;
}
