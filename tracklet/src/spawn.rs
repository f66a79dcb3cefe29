//! Where deliveries run.
//!
//! [`AnalyticsClient::emit`](crate::AnalyticsClient::emit) hands each
//! delivery to a [`Spawner`] before returning, so events reach providers
//! whether or not the caller keeps the returned emission.
//!
//! Without an explicit spawner the client shares a small background pool.
//! Hosts that already run an executor plug it in instead:
//!
//! ```rust,ignore
//! let client = AnalyticsClient::builder()
//!     .spawn_with(|task| {
//!         tokio::spawn(task);
//!     })
//!     .build(environment);
//! ```

use futures::{executor::ThreadPool, future::BoxFuture};
use std::sync::{Arc, OnceLock};

/// Runs detached delivery tasks.
///
/// Any `Fn(BoxFuture<'static, ()>)` closure is a spawner.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot run analytics deliveries",
    label = "expected a `Spawner` or a `Fn(BoxFuture<'static, ()>)` closure"
)]
pub trait Spawner: Send + Sync + 'static {
    /// Start `task` and return without waiting for it.
    fn spawn(&self, task: BoxFuture<'static, ()>);
}

impl<F> Spawner for F
where
    F: Fn(BoxFuture<'static, ()>) + Send + Sync + 'static,
{
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        self(task)
    }
}

struct DeliveryPool(ThreadPool);

impl Spawner for DeliveryPool {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        self.0.spawn_ok(task);
    }
}

/// Drives each task to completion on the calling thread.
struct Inline;

impl Spawner for Inline {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        futures::executor::block_on(task);
    }
}

/// The process-wide default spawner.
///
/// Falls back to delivering inline when the pool cannot be started.
pub(crate) fn default_spawner() -> Arc<dyn Spawner> {
    static DEFAULT: OnceLock<Arc<dyn Spawner>> = OnceLock::new();

    let spawner = DEFAULT.get_or_init(|| {
        let pool = ThreadPool::builder()
            .pool_size(1)
            .name_prefix("tracklet-delivery-")
            .create();
        match pool {
            Ok(pool) => Arc::new(DeliveryPool(pool)),
            Err(error) => {
                tracing::warn!(%error, "analytics delivery pool unavailable, delivering inline");
                Arc::new(Inline)
            }
        }
    });
    Arc::clone(spawner)
}
