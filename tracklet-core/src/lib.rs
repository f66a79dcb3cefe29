//! # tracklet-core
//!
//! Core types for the Tracklet analytics client.
//!
//! This crate has minimal dependencies and is meant to be imported by
//! provider crates that only need to receive events, not emit them.
//!
//! # Pieces
//!
//! ## Event model ([`Event`])
//!
//! The wire shape every provider receives. The [`Version`] tag pins the shape
//! so that consumers can detect schema drift; deserializing an event carrying
//! any other version fails.
//!
//! ## Provider contract ([`Provider`])
//!
//! A delivery sink. Implement [`Provider`] with a native `async fn`; the
//! client stores providers as [`DynProvider`] trait objects, which every
//! [`Provider`] gets for free.
//!
//! # Error Types
//!
//! - [`ProviderError`] - Typed failures for built-in providers
//! - [`DeliveryError`] - How a single provider's delivery failed
//! - [`VersionError`] - Event version mismatch

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod event;
mod provider;

// Re-exports
pub use error::{BoxError, DeliveryError, ProviderError, VersionError};
pub use event::{Attributes, EVENT_VERSION, Event, EventOptions, GlobalContext, Version};
pub use provider::{DynProvider, Provider};
