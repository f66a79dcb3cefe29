#![allow(dead_code)]

use serde_json::Value;
use std::time::Duration;
use tracklet::{AnalyticsClient, Attributes, StaticEnvironment, testing::RecordingProvider};

// ============================================================================
// Fixtures
// ============================================================================

pub fn attrs(value: Value) -> Attributes {
    match value {
        Value::Object(map) => map,
        other => panic!("attributes must be a JSON object, got {other}"),
    }
}

pub fn environment() -> StaticEnvironment {
    StaticEnvironment::new("http://localhost:3000/shop", 1280, 720, "tracklet-tests")
}

pub fn recording_client() -> (AnalyticsClient, RecordingProvider) {
    let recorder = RecordingProvider::new();
    let client = AnalyticsClient::builder()
        .provider(recorder.clone())
        .build(environment());
    (client, recorder)
}

/// Wait until `recorder` has seen `count` events, without holding any emission.
pub async fn wait_for_events(recorder: &RecordingProvider, count: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while recorder.count() < count {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("events were never delivered");
}
