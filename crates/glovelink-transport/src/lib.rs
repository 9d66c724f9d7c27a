//! Cross-platform transport for glove input channels.
//!
//! Provides a unified outbound stream over:
//! - Unix domain sockets (Linux/macOS)
//! - Named pipes (Windows)
//!
//! This is the lowest layer of glovelink. The channel client builds on the
//! [`IpcStream`] and [`connect_with_timeout`] provided here.

pub mod connect;
pub mod error;
pub mod stream;

#[cfg(unix)]
pub mod uds;

pub use connect::{connect_with_timeout, CONNECT_RETRY_INTERVAL};
pub use error::{Result, TransportError};
pub use stream::IpcStream;

#[cfg(unix)]
pub use uds::UnixDomainSocket;
