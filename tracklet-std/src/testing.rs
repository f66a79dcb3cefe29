//! Testing utilities for Tracklet.
//!
//! This module provides providers and sinks that make it easy to assert on
//! what a client delivered.
//!
//! # Features
//!
//! - [`RecordingProvider`]: A provider that records every event it receives
//! - [`FailingProvider`]: A provider whose `send` always fails
//! - [`PanickingProvider`]: A provider whose `send` panics
//! - [`RecordingTag`]: A tag function that records its calls
//! - [`SharedWriter`]: An in-memory writer for the console provider

use crate::providers::TagFunction;
use std::{
    io::Write,
    sync::{Arc, Mutex},
};
use tracklet_core::{BoxError, Event, Provider, ProviderError};

// ============================================================================
// Recording Provider
// ============================================================================

/// A provider that records all events it receives.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingProvider::new();
/// let client = AnalyticsClient::builder()
///     .provider(recorder.clone())
///     .build(environment);
///
/// client.emit("clicked", None, None, None, EventOptions::default()).await;
///
/// assert_eq!(recorder.count(), 1);
/// ```
pub struct RecordingProvider {
    id: String,
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingProvider {
    /// Create a recording provider with the id `recording`.
    pub fn new() -> Self {
        Self::named("recording")
    }

    /// Create a recording provider with a custom id.
    pub fn named(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded events.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Get the most recent event.
    pub fn last(&self) -> Option<Event> {
        self.events.lock().unwrap().last().cloned()
    }

    /// Get the number of recorded events.
    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl Default for RecordingProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RecordingProvider {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            events: self.events.clone(),
        }
    }
}

impl Provider for RecordingProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn send(&self, event: &Event) -> Result<(), BoxError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

// ============================================================================
// Failing Providers
// ============================================================================

/// A provider whose `send` always rejects the event.
pub struct FailingProvider {
    id: String,
}

impl FailingProvider {
    /// Create a failing provider with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Provider for FailingProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn send(&self, _event: &Event) -> Result<(), BoxError> {
        Err(Box::new(ProviderError::Rejected(format!(
            "{} always fails",
            self.id
        ))))
    }
}

/// A provider whose `send` panics.
pub struct PanickingProvider {
    id: String,
}

impl PanickingProvider {
    /// Create a panicking provider with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Provider for PanickingProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn send(&self, _event: &Event) -> Result<(), BoxError> {
        panic!("{} panicked while sending", self.id)
    }
}

// ============================================================================
// Recording Tag
// ============================================================================

/// A tag function that records `(display name, event)` pairs.
#[derive(Clone, Default)]
pub struct RecordingTag {
    calls: Arc<Mutex<Vec<(String, Event)>>>,
}

impl RecordingTag {
    /// Create a new recording tag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clone of the recorded calls.
    pub fn calls(&self) -> Vec<(String, Event)> {
        self.calls.lock().unwrap().clone()
    }
}

impl TagFunction for RecordingTag {
    fn event(&self, name: &str, event: &Event) {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), event.clone()));
    }
}

// ============================================================================
// Shared Writer
// ============================================================================

/// A cloneable in-memory writer.
#[derive(Clone, Default)]
pub struct SharedWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl SharedWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }
}

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
