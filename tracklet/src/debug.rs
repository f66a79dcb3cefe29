//! Opt-in, process-wide slot holding the most recently published client.
//!
//! Meant for test harnesses and debugging tools that cannot be handed a
//! client through a [`Scope`](crate::Scope). Not part of the supported
//! programmatic API. Publication is last-writer-wins and unsynchronized with
//! client construction elsewhere.

use crate::client::AnalyticsClient;
use std::sync::{PoisonError, RwLock};

static SLOT: RwLock<Option<AnalyticsClient>> = RwLock::new(None);

/// Publish `client`, replacing whatever was there.
pub fn publish(client: &AnalyticsClient) {
    *SLOT.write().unwrap_or_else(PoisonError::into_inner) = Some(client.clone());
}

/// The most recently published client.
pub fn published() -> Option<AnalyticsClient> {
    SLOT.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Empty the slot.
pub fn clear() {
    SLOT.write().unwrap_or_else(PoisonError::into_inner).take();
}
