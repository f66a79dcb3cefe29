//! Client configuration.

use serde::{Deserialize, Serialize};

/// Hostnames on which every emitted event is dumped at debug level.
pub const DEFAULT_LOGGING_HOSTNAMES: [&str; 2] = ["localhost", "127.0.0.1"];

/// Settings fixed at client construction.
///
/// Deserializable so hosts can embed it in their own configuration files;
/// every field has a default.
///
/// ```rust,ignore
/// let config: ClientConfig = serde_json::from_str(r#"{ "logging_hostnames": ["dev.local"] }"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Hostnames where each event is also written to the `tracklet::event` log target.
    pub logging_hostnames: Vec<String>,
    /// Publish the client to the process-wide debug slot when it is built.
    pub publish_debug_handle: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            logging_hostnames: DEFAULT_LOGGING_HOSTNAMES.map(String::from).to_vec(),
            publish_debug_handle: false,
        }
    }
}

impl ClientConfig {
    /// Whether events emitted on `hostname` should be logged.
    pub fn logs_on(&self, hostname: &str) -> bool {
        self.logging_hostnames.iter().any(|h| h == hostname)
    }
}
