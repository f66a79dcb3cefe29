//! # Analytics Client
//!
//! The client owns a fixed list of providers. [`AnalyticsClient::emit`] builds
//! an [`Event`], attaches the ambient context unless asked not to, and fans
//! the event out to every provider concurrently.
//!
//! Delivery starts before `emit` returns and runs on the client's
//! [`Spawner`]. It is isolated per provider: an error or a panic in one
//! `send` is logged with that provider's id and recorded in the
//! [`DeliveryReport`], and never touches the others. The returned
//! [`Emission`] only observes the outcome; dropping it cancels nothing.
//!
//! A client built in a non-interactive [`Environment`] is disabled: it logs a
//! warning once, drops its providers and turns every emission into a no-op.

use crate::{
    config::ClientConfig,
    debug,
    environment::Environment,
    spawn::{Spawner, default_spawner},
};
use futures::{
    FutureExt,
    channel::oneshot,
    future::{BoxFuture, join_all},
};
use std::{
    any::Any,
    future::Future,
    panic::AssertUnwindSafe,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tracing::Instrument;
use tracklet_core::{
    Attributes, DeliveryError, DynProvider, Event, EventOptions, Provider, Version,
};

/// A shared handle to a configured analytics client.
///
/// Cloning is cheap; clones share providers and configuration.
#[derive(Clone)]
pub struct AnalyticsClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    providers: Arc<[Arc<dyn DynProvider>]>,
    environment: Arc<dyn Environment>,
    spawner: Arc<dyn Spawner>,
    config: ClientConfig,
    enabled: bool,
}

impl AnalyticsClient {
    /// Create a client from its parts, delivering on the default spawner.
    ///
    /// Interactivity of `environment` is checked here, once.
    pub fn new(
        providers: Vec<Arc<dyn DynProvider>>,
        config: ClientConfig,
        environment: Arc<dyn Environment>,
    ) -> Self {
        Self::with_spawner(providers, config, environment, default_spawner())
    }

    /// Create a client that runs deliveries on `spawner`.
    pub fn with_spawner(
        providers: Vec<Arc<dyn DynProvider>>,
        config: ClientConfig,
        environment: Arc<dyn Environment>,
        spawner: Arc<dyn Spawner>,
    ) -> Self {
        let enabled = environment.is_interactive();
        let providers: Arc<[Arc<dyn DynProvider>]> = if enabled {
            providers.into()
        } else {
            tracing::warn!("analytics client is not available outside an interactive environment");
            Vec::new().into()
        };

        let client = Self {
            inner: Arc::new(ClientInner {
                providers,
                environment,
                spawner,
                config,
                enabled,
            }),
        };

        if client.inner.enabled && client.inner.config.publish_debug_handle {
            debug::publish(&client);
        }

        client
    }

    /// Start building a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Whether this client delivers anything at all.
    pub fn is_enabled(&self) -> bool {
        self.inner.enabled
    }

    /// The providers, in delivery order. Empty for a disabled client.
    pub fn providers(&self) -> &[Arc<dyn DynProvider>] {
        &self.inner.providers
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Run every provider's setup routine.
    ///
    /// The client never does this on its own; call it once when integrating.
    pub fn setup_providers(&self) {
        for provider in self.providers() {
            provider.setup_dyn();
        }
    }

    /// Returns `true` if both handles point at the same client.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Emit an event to every provider.
    ///
    /// The event, including its context snapshot, is built and handed to the
    /// spawner before this returns. Callers need not keep the [`Emission`].
    pub fn emit(
        &self,
        action: &str,
        name: Option<&str>,
        boundary: Option<&str>,
        attributes: Option<Attributes>,
        options: EventOptions,
    ) -> Emission {
        if !self.inner.enabled {
            return Emission::ready(DeliveryReport::default());
        }

        let event = Event {
            version: Version,
            action: action.to_string(),
            name: name.map(str::to_string),
            boundary: boundary.map(str::to_string),
            attributes: attributes.unwrap_or_default(),
            context: (!options.omit_context).then(|| self.inner.environment.capture()),
        };

        let logs_here = self
            .inner
            .environment
            .hostname()
            .is_some_and(|hostname| self.inner.config.logs_on(hostname));
        if logs_here {
            tracing::debug!(target: "tracklet::event", ?event, "analytics event");
        }

        let (report_tx, report_rx) = oneshot::channel();
        let delivery = deliver(Arc::clone(&self.inner.providers), event)
            .map(move |report| {
                let _ = report_tx.send(report);
            })
            .instrument(tracing::Span::current());
        self.inner.spawner.spawn(delivery.boxed());

        Emission::new(report_rx.map(Result::unwrap_or_default))
    }
}

impl std::fmt::Debug for AnalyticsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsClient")
            .field("enabled", &self.inner.enabled)
            .field("providers", &self.inner.providers)
            .finish()
    }
}

/// Create a client with the default configuration.
pub fn create_client(
    providers: Vec<Arc<dyn DynProvider>>,
    environment: impl Environment,
) -> AnalyticsClient {
    AnalyticsClient::new(providers, ClientConfig::default(), Arc::new(environment))
}

/// Builder for constructing an [`AnalyticsClient`].
#[derive(Default)]
pub struct ClientBuilder {
    providers: Vec<Arc<dyn DynProvider>>,
    config: ClientConfig,
    spawner: Option<Arc<dyn Spawner>>,
}

impl ClientBuilder {
    /// Add a provider.
    pub fn provider<P: Provider>(mut self, provider: P) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Add an already shared provider.
    pub fn shared_provider(mut self, provider: Arc<dyn DynProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Hostnames on which events are logged.
    pub fn logging_hostnames<I, S>(mut self, hostnames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.logging_hostnames = hostnames.into_iter().map(Into::into).collect();
        self
    }

    /// Publish the built client to the debug slot.
    pub fn publish_debug_handle(mut self, publish: bool) -> Self {
        self.config.publish_debug_handle = publish;
        self
    }

    /// Run deliveries on `spawner` instead of the default pool.
    pub fn spawner(mut self, spawner: Arc<dyn Spawner>) -> Self {
        self.spawner = Some(spawner);
        self
    }

    /// Run deliveries through `spawn`, e.g. a closure around `tokio::spawn`.
    pub fn spawn_with<F>(self, spawn: F) -> Self
    where
        F: Fn(BoxFuture<'static, ()>) + Send + Sync + 'static,
    {
        self.spawner(Arc::new(spawn))
    }

    /// Build the client.
    pub fn build(self, environment: impl Environment) -> AnalyticsClient {
        self.build_shared(Arc::new(environment))
    }

    /// Build the client on a shared environment.
    pub fn build_shared(self, environment: Arc<dyn Environment>) -> AnalyticsClient {
        let spawner = self.spawner.unwrap_or_else(default_spawner);
        AnalyticsClient::with_spawner(self.providers, self.config, environment, spawner)
    }
}

/// One provider that did not accept an event.
#[derive(Debug)]
pub struct DeliveryFailure {
    /// Id of the failing provider.
    pub provider_id: String,
    /// What went wrong.
    pub error: DeliveryError,
}

/// Outcome of a single emission.
///
/// For diagnostics and tests only; emission never fails as a whole.
#[derive(Debug, Default)]
pub struct DeliveryReport {
    /// Providers that accepted the event.
    pub delivered: usize,
    /// Providers that failed, in provider order.
    pub failures: Vec<DeliveryFailure>,
}

impl DeliveryReport {
    /// Returns `true` if no provider failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns `true` if the provider with `id` failed.
    pub fn failed(&self, id: &str) -> bool {
        self.failures.iter().any(|f| f.provider_id == id)
    }
}

/// Handle on a delivery already in flight.
///
/// Resolves to a [`DeliveryReport`] once every provider has settled. For
/// diagnostics and tests; dropping it does not stop delivery.
pub struct Emission {
    inner: BoxFuture<'static, DeliveryReport>,
}

impl Emission {
    pub(crate) fn new(future: impl Future<Output = DeliveryReport> + Send + 'static) -> Self {
        Self {
            inner: future.boxed(),
        }
    }

    /// An emission that has already settled.
    pub fn ready(report: DeliveryReport) -> Self {
        Self::new(futures::future::ready(report))
    }
}

impl Future for Emission {
    type Output = DeliveryReport;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl std::fmt::Debug for Emission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emission").finish_non_exhaustive()
    }
}

async fn deliver(providers: Arc<[Arc<dyn DynProvider>]>, event: Event) -> DeliveryReport {
    let outcomes = join_all(providers.iter().map(|provider| {
        let event = &event;
        async move {
            let sent = AssertUnwindSafe(async { provider.send_dyn(event).await })
                .catch_unwind()
                .await;
            let error = match sent {
                Ok(Ok(())) => return None,
                Ok(Err(error)) => DeliveryError::Failed(error),
                Err(panic) => DeliveryError::Panicked(panic_message(panic)),
            };
            tracing::error!(
                provider = provider.id_dyn(),
                event = ?event,
                %error,
                "analytics provider failed"
            );
            Some(DeliveryFailure {
                provider_id: provider.id_dyn().to_string(),
                error,
            })
        }
    }))
    .await;

    let mut report = DeliveryReport::default();
    for outcome in outcomes {
        match outcome {
            Some(failure) => report.failures.push(failure),
            None => report.delivered += 1,
        }
    }
    report
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
