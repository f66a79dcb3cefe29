//! Tag-manager provider - forwards events to an externally installed tag function.

use std::sync::Arc;
use tracklet_core::{BoxError, Event, Provider};

/// The host's tag function, e.g. a bridge to a web tag manager.
///
/// Any `Fn(&str, &Event)` closure is a tag function.
pub trait TagFunction: Send + Sync + 'static {
    /// Record one event under a display name.
    fn event(&self, name: &str, event: &Event);
}

impl<F> TagFunction for F
where
    F: Fn(&str, &Event) + Send + Sync + 'static,
{
    fn event(&self, name: &str, event: &Event) {
        self(name, event)
    }
}

type TagLookup = Box<dyn Fn() -> Option<Arc<dyn TagFunction>> + Send + Sync>;

/// A provider that hands events to a tag function when one is installed.
///
/// The tag function is looked up on every send, so a host may install it
/// after the client was built. When nothing is installed the provider logs a
/// warning and drops the event; it never fails.
pub struct TagManagerProvider {
    lookup: TagLookup,
}

impl TagManagerProvider {
    /// Identifier reported for this provider.
    pub const ID: &'static str = "google";

    /// Create a provider bound to a fixed tag function.
    pub fn new(tag: impl TagFunction) -> Self {
        let tag: Arc<dyn TagFunction> = Arc::new(tag);
        Self::with_lookup(move || Some(Arc::clone(&tag)))
    }

    /// Create a provider that resolves its tag function on each send.
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn() -> Option<Arc<dyn TagFunction>> + Send + Sync + 'static,
    {
        Self {
            lookup: Box::new(lookup),
        }
    }

    /// Create a provider with no tag function; every send is dropped.
    pub fn unavailable() -> Self {
        Self::with_lookup(|| None)
    }
}

impl Default for TagManagerProvider {
    fn default() -> Self {
        Self::unavailable()
    }
}

impl Provider for TagManagerProvider {
    fn id(&self) -> &str {
        Self::ID
    }

    async fn send(&self, event: &Event) -> Result<(), BoxError> {
        match (self.lookup)() {
            Some(tag) => tag.event(&display_name(event), event),
            None => tracing::warn!("tag manager is not available"),
        }
        Ok(())
    }
}

/// Space-joined `boundary name action`, skipping empty or absent parts.
pub fn display_name(event: &Event) -> String {
    [
        event.boundary.as_deref(),
        event.name.as_deref(),
        Some(event.action.as_str()),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}
