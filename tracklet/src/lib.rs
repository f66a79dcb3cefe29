//! # tracklet - Scoped Analytics Events
//!
//! `tracklet` lets components of a UI tree emit named analytics events that
//! are tagged with a hierarchical boundary path and merged attributes, and
//! forwards them to pluggable providers.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tracklet::prelude::*;
//!
//! let client = AnalyticsClient::builder()
//!     .provider(ConsoleProvider::new())
//!     .build(StaticEnvironment::localhost());
//!
//! // The root of the tree supplies the client.
//! let root = Scope::root(Some(client));
//!
//! // Boundaries name regions of the tree.
//! let mut node = BoundaryNode::mount();
//! let rendered = node.render(
//!     &root,
//!     &Boundary::new("checkout").attribute("step", 2),
//!     Children::scoped(|scope| {
//!         // Leaf code takes an emitter from the scope it renders in.
//!         scope.emitter(None)
//!     }),
//! );
//!
//! // checkout / clicked pay {step: 2}
//! // Delivery is already under way; awaiting only yields the report.
//! let _ = rendered.output.emit("clicked", Some("pay"), None, EventOptions::default());
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod boundary;
mod client;
mod config;
pub mod debug;
mod emitter;
mod environment;
mod scope;
mod spawn;

pub use boundary::{Boundary, BoundaryNode, Children, Rendered, VIEWED_ACTION};
pub use client::{
    AnalyticsClient, ClientBuilder, DeliveryFailure, DeliveryReport, Emission, create_client,
};
pub use config::{ClientConfig, DEFAULT_LOGGING_HOSTNAMES};
pub use emitter::Emitter;
pub use environment::{Environment, Headless, StaticEnvironment};
pub use scope::{BoundaryContext, Scope};
pub use spawn::Spawner;

pub use tracklet_core::{
    Attributes, BoxError, DeliveryError, DynProvider, EVENT_VERSION, Event, EventOptions,
    GlobalContext, Provider, ProviderError, Version, VersionError,
};

/// Built-in providers.
pub mod providers {
    pub use tracklet_std::providers::{
        ConsoleProvider, FnProvider, TagFunction, TagManagerProvider, display_name, provider_fn,
    };
}

/// Event flattening for flat key/value sinks.
pub mod flatten {
    pub use tracklet_std::flatten::{KeyTransform, Replacement, flatten_event};
}

/// Testing utilities.
pub mod testing {
    pub use tracklet_std::testing::{
        FailingProvider, PanickingProvider, RecordingProvider, RecordingTag, SharedWriter,
    };
}

/// Prelude module - common imports for Tracklet.
///
/// # Usage
///
/// ```rust,ignore
/// use tracklet::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        AnalyticsClient, Attributes, Boundary, BoundaryNode, Children, ClientConfig, Emitter,
        Environment, Event, EventOptions, Provider, Scope, StaticEnvironment,
        providers::{ConsoleProvider, TagManagerProvider},
    };
}
