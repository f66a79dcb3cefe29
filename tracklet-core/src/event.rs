//! The analytics event and its delivery options.

use crate::error::VersionError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Version tag written on every event.
pub const EVENT_VERSION: &str = "2025-05-29";

/// A free-form attribute mapping.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// The pinned wire version of [`Event`].
///
/// Zero-sized: it always serializes as [`EVENT_VERSION`] and refuses to
/// deserialize from anything else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Version;

impl Version {
    /// The literal tag.
    pub const fn as_str(&self) -> &'static str {
        EVENT_VERSION
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(EVENT_VERSION)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(EVENT_VERSION)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let found = String::deserialize(deserializer)?;
        if found == EVENT_VERSION {
            Ok(Version)
        } else {
            Err(serde::de::Error::custom(VersionError {
                found,
                expected: EVENT_VERSION,
            }))
        }
    }
}

/// Ambient environment snapshot captured at emission time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalContext {
    /// Full URL of the current page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Viewport width in CSS pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_width: Option<u32>,
    /// Viewport height in CSS pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_height: Option<u32>,
    /// User-agent string of the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl GlobalContext {
    /// Returns `true` if no field is populated.
    pub fn is_empty(&self) -> bool {
        self.href.is_none()
            && self.window_width.is_none()
            && self.window_height.is_none()
            && self.user_agent.is_none()
    }
}

/// Per-call delivery tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOptions {
    /// Leave `context` off the event entirely.
    pub omit_context: bool,
}

impl EventOptions {
    /// Options that omit the ambient context.
    pub const fn omit_context() -> Self {
        Self { omit_context: true }
    }
}

/// An analytics event as delivered to providers.
///
/// Built fresh for every emission and never mutated afterwards. `attributes`
/// is always present, even when nothing in the emitting chain supplied any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Pinned wire version.
    pub version: Version,
    /// What happened, e.g. `clicked` or `viewed`.
    pub action: String,
    /// What it happened to, e.g. `button`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Dot-joined boundary path, outermost first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary: Option<String>,
    /// Merged attributes.
    #[serde(default)]
    pub attributes: Attributes,
    /// Ambient context, absent when the caller asked to omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<GlobalContext>,
}

impl Event {
    /// Create an event with only an action.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            version: Version,
            action: action.into(),
            name: None,
            boundary: None,
            attributes: Attributes::new(),
            context: None,
        }
    }

    /// Set the event name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the boundary path.
    pub fn with_boundary(mut self, boundary: impl Into<String>) -> Self {
        self.boundary = Some(boundary.into());
        self
    }

    /// Replace the attributes.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Attach an ambient context.
    pub fn with_context(mut self, context: GlobalContext) -> Self {
        self.context = Some(context);
        self
    }
}
