//! Console provider - dumps every event to a diagnostic writer.

use std::{
    io::Write,
    sync::{Mutex, PoisonError},
};
use tracklet_core::{BoxError, Event, Provider};

/// A provider that writes the full event as pretty JSON.
///
/// Writes go to stdout unless another writer is supplied. The provider never
/// fails: a write error is logged and swallowed.
///
/// # Example
///
/// ```rust,ignore
/// let client = AnalyticsClient::builder()
///     .provider(ConsoleProvider::new())
///     .build(environment);
/// ```
pub struct ConsoleProvider {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleProvider {
    /// Identifier reported for this provider.
    pub const ID: &'static str = "console";

    /// Create a console provider writing to stdout.
    pub fn new() -> Self {
        Self::with_writer(std::io::stdout())
    }

    /// Create a console provider writing to `out`.
    pub fn with_writer(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }

    fn write(&self, event: &Event) -> std::io::Result<()> {
        let rendered = serde_json::to_string_pretty(event)?;
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out, "{rendered}")?;
        out.flush()
    }
}

impl Default for ConsoleProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for ConsoleProvider {
    fn id(&self) -> &str {
        Self::ID
    }

    async fn send(&self, event: &Event) -> Result<(), BoxError> {
        if let Err(error) = self.write(event) {
            tracing::warn!(%error, "console provider could not write event");
        }
        Ok(())
    }
}
