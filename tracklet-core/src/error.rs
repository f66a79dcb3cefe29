//! Error types for Tracklet.
//!
//! - [`ProviderError`] - Errors a provider may report from `send`
//! - [`DeliveryError`] - Errors recorded by the client for a single provider
//! - [`VersionError`] - Errors from decoding a foreign event version

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors a provider can report while sending an event.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The sink received the event and refused it.
    #[error("provider rejected event: {0}")]
    Rejected(String),
}

/// How delivery to a single provider failed.
///
/// Produced at the dispatch boundary; never propagated to the caller of
/// `emit`.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The provider's `send` resolved to an error.
    #[error("send failed: {0}")]
    Failed(#[source] BoxError),

    /// The provider panicked while sending.
    #[error("provider panicked: {0}")]
    Panicked(String),
}

/// The event carried a version tag other than the one this crate speaks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported event version {found:?}, expected {expected:?}")]
pub struct VersionError {
    /// Version found on the wire.
    pub found: String,
    /// Version this crate produces.
    pub expected: &'static str,
}
