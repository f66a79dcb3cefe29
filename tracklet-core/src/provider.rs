//! # Delivery Sinks (Provider)
//!
//! A provider receives every event the client emits and forwards it
//! somewhere: a log, a tag manager, a collector endpoint.
//!
//! Providers are handed to the client once, at construction, and the list is
//! never changed afterwards. Each send runs concurrently with the others; a
//! failing provider is reported on its own and never affects its siblings.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Provider`] uses native `async fn` for zero-cost static dispatch. The
//! client keeps its providers as `Arc<dyn DynProvider>`, which every
//! [`Provider`] implements through a blanket impl.

use crate::{error::BoxError, event::Event};
use std::{future::Future, pin::Pin};

/// A delivery sink for analytics events.
///
/// # Example
///
/// ```rust,ignore
/// struct Collector { endpoint: String }
///
/// impl Provider for Collector {
///     fn id(&self) -> &str {
///         "collector"
///     }
///
///     async fn send(&self, event: &Event) -> Result<(), BoxError> {
///         post_json(&self.endpoint, event).await?;
///         Ok(())
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an analytics `Provider`",
    label = "missing `Provider` implementation",
    note = "Providers must implement `id` and `send`."
)]
pub trait Provider: Send + Sync + 'static {
    /// Unique identifier, used to tag delivery failures.
    fn id(&self) -> &str;

    /// Deliver one event.
    fn send(&self, event: &Event) -> impl Future<Output = Result<(), BoxError>> + Send;

    /// One-time initialisation.
    ///
    /// Called by the host application when it integrates the provider. The
    /// client never calls this on its own.
    fn setup(&self) {}
}

/// Object-safe version of [`Provider`].
pub trait DynProvider: Send + Sync + 'static {
    /// Unique identifier (dynamic dispatch version).
    fn id_dyn(&self) -> &str;

    /// Deliver one event (dynamic dispatch version).
    fn send_dyn<'a>(
        &'a self,
        event: &'a Event,
    ) -> Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'a>>;

    /// One-time initialisation (dynamic dispatch version).
    fn setup_dyn(&self);
}

impl<T: Provider> DynProvider for T {
    fn id_dyn(&self) -> &str {
        self.id()
    }

    fn send_dyn<'a>(
        &'a self,
        event: &'a Event,
    ) -> Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'a>> {
        Box::pin(self.send(event))
    }

    fn setup_dyn(&self) {
        self.setup()
    }
}

impl std::fmt::Debug for dyn DynProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider").field("id", &self.id_dyn()).finish()
    }
}
