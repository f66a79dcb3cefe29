//! Closure-backed providers for custom sinks.

use std::future::Future;
use tracklet_core::{BoxError, Event, Provider};

type SetupFn = Box<dyn Fn() + Send + Sync>;

/// A provider built from an id and an async closure.
///
/// The closure receives an owned copy of each event so that the returned
/// future does not borrow from the client.
///
/// # Example
///
/// ```rust,ignore
/// let collector = provider_fn("collector", |event| async move {
///     http_post("/collect", &flatten_event(&event, None)).await?;
///     Ok(())
/// });
/// ```
pub struct FnProvider<F> {
    id: String,
    send: F,
    setup: Option<SetupFn>,
}

impl<F> FnProvider<F> {
    /// Create a new closure-backed provider.
    pub fn new(id: impl Into<String>, send: F) -> Self {
        Self {
            id: id.into(),
            send,
            setup: None,
        }
    }

    /// Attach a setup routine run by [`Provider::setup`].
    pub fn with_setup(mut self, setup: impl Fn() + Send + Sync + 'static) -> Self {
        self.setup = Some(Box::new(setup));
        self
    }
}

/// Shorthand for [`FnProvider::new`].
pub fn provider_fn<F, Fut>(id: impl Into<String>, send: F) -> FnProvider<F>
where
    F: Fn(Event) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send,
{
    FnProvider::new(id, send)
}

impl<F, Fut> Provider for FnProvider<F>
where
    F: Fn(Event) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send,
{
    fn id(&self) -> &str {
        &self.id
    }

    async fn send(&self, event: &Event) -> Result<(), BoxError> {
        (self.send)(event.clone()).await
    }

    fn setup(&self) {
        if let Some(setup) = &self.setup {
            setup();
        }
    }
}
