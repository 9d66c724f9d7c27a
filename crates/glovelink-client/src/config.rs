use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::endpoint::Endpoint;

/// Default bound on the connect phase: 5 seconds.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Environment override for the connect timeout, in milliseconds.
pub const CONNECT_TIMEOUT_ENV: &str = "GLOVELINK_CONNECT_TIMEOUT_MS";

/// Environment override for the Unix directory holding the channel namespace.
pub const PIPE_ROOT_ENV: &str = "GLOVELINK_PIPE_ROOT";

/// Controls how a channel client connects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Upper bound on waiting for the driver's channel. Does not apply to writes.
    pub connect_timeout: Duration,
    /// Directory under which the Unix socket namespace lives.
    ///
    /// `None` uses `$XDG_RUNTIME_DIR`, falling back to the temp dir. Ignored on
    /// Windows, where pipes always live under `\\.\pipe\`.
    pub namespace_root: Option<PathBuf>,
    /// Optional bound on each blocking write (Unix only). Default: none.
    pub write_timeout: Option<Duration>,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            namespace_root: None,
            write_timeout: None,
        }
    }
}

impl ChannelConfig {
    /// Defaults with overrides from [`CONNECT_TIMEOUT_ENV`] and [`PIPE_ROOT_ENV`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(CONNECT_TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.connect_timeout = Duration::from_millis(ms),
                Err(_) => warn!(
                    var = CONNECT_TIMEOUT_ENV,
                    value = %raw,
                    "ignoring unparseable connect timeout"
                ),
            }
        }

        if let Some(root) = lookup(PIPE_ROOT_ENV).filter(|v| !v.is_empty()) {
            config.namespace_root = Some(PathBuf::from(root));
        }

        config
    }

    /// Replace the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Replace the Unix namespace root.
    pub fn with_namespace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.namespace_root = Some(root.into());
        self
    }

    /// Concrete platform address of an endpoint's channel.
    #[cfg(windows)]
    pub fn address_for(&self, endpoint: Endpoint) -> PathBuf {
        PathBuf::from(format!(r"\\.\pipe\{}", endpoint.name_segments().join(r"\")))
    }

    /// Concrete platform address of an endpoint's channel.
    #[cfg(not(windows))]
    pub fn address_for(&self, endpoint: Endpoint) -> PathBuf {
        let root = self
            .namespace_root
            .clone()
            .unwrap_or_else(default_namespace_root);
        endpoint
            .name_segments()
            .iter()
            .fold(root, |path, segment| path.join(segment))
    }
}

#[cfg(not(windows))]
fn default_namespace_root() -> PathBuf {
    std::env::var_os("XDG_RUNTIME_DIR")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}
