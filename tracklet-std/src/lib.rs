//! # tracklet-std
//!
//! Standard implementations for the Tracklet analytics client.
//!
//! This crate provides:
//! - **Providers**: [`ConsoleProvider`], [`TagManagerProvider`], [`FnProvider`]
//! - **Flattening**: [`flatten_event`] with an optional [`KeyTransform`]
//! - **Testing**: recording and failing providers for test suites
//!
//! [`ConsoleProvider`]: providers::ConsoleProvider
//! [`TagManagerProvider`]: providers::TagManagerProvider
//! [`FnProvider`]: providers::FnProvider
//! [`flatten_event`]: flatten::flatten_event
//! [`KeyTransform`]: flatten::KeyTransform

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use tracklet_core;

// Modules
pub mod flatten;
pub mod providers;
pub mod testing;
