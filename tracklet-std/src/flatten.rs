//! Event flattening for providers that accept only flat key/value payloads.
//!
//! [`flatten_event`] lifts `attributes` and `context` to the top level next to
//! `version`, `boundary`, `name` and `action`. Merge order is fixed: event
//! fields, then attributes, then context, later keys overwriting earlier ones.
//!
//! A [`KeyTransform`] rewrites every resulting key with a regex, for sinks with
//! restrictive key grammars:
//!
//! ```rust,ignore
//! // "windowWidth" -> "window_width"
//! let snake = KeyTransform::with_fn("[A-Z]", |m| format!("_{}", m.to_lowercase()))?.all();
//! let flat = flatten_event(&event, Some(&snake));
//! ```

use regex::{Captures, NoExpand, Regex};
use serde_json::Value;
use std::sync::Arc;
use tracklet_core::{Attributes, Event};

/// Replacement applied to each regex match.
#[derive(Clone)]
pub enum Replacement {
    /// Inserted verbatim. `$` has no special meaning; use [`Replacement::Computed`]
    /// to build the replacement from the match.
    Literal(String),
    /// Computed from the matched text. Also applied to string values.
    Computed(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl std::fmt::Debug for Replacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Replacement::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Replacement::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A regex-driven key rewrite.
///
/// Replaces only the first match unless [`KeyTransform::all`] is set.
#[derive(Debug, Clone)]
pub struct KeyTransform {
    pattern: Regex,
    replacement: Replacement,
    all: bool,
}

impl KeyTransform {
    /// Create a transform from a compiled pattern.
    pub fn new(pattern: Regex, replacement: Replacement) -> Self {
        Self {
            pattern,
            replacement,
            all: false,
        }
    }

    /// Compile `pattern` and replace matches with literal text.
    pub fn literal(pattern: &str, replacement: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self::new(
            Regex::new(pattern)?,
            Replacement::Literal(replacement.into()),
        ))
    }

    /// Compile `pattern` and replace matches with the result of `f`.
    pub fn with_fn<F>(pattern: &str, f: F) -> Result<Self, regex::Error>
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Ok(Self::new(Regex::new(pattern)?, Replacement::Computed(Arc::new(f))))
    }

    /// Replace every match instead of only the first.
    pub fn all(mut self) -> Self {
        self.all = true;
        self
    }

    /// Apply the rewrite to `input`.
    pub fn apply(&self, input: &str) -> String {
        let limit = if self.all { 0 } else { 1 };
        match &self.replacement {
            Replacement::Literal(text) => self
                .pattern
                .replacen(input, limit, NoExpand(text))
                .into_owned(),
            Replacement::Computed(f) => self
                .pattern
                .replacen(input, limit, |caps: &Captures<'_>| f(&caps[0]))
                .into_owned(),
        }
    }

    fn rewrites_values(&self) -> bool {
        matches!(self.replacement, Replacement::Computed(_))
    }
}

/// Flatten an event into a single-level mapping.
///
/// Absent `boundary` and `name` are left out. Context keys overwrite
/// attribute keys of the same name.
pub fn flatten_event(event: &Event, transform: Option<&KeyTransform>) -> Attributes {
    let mut out = Attributes::new();
    out.insert("version".into(), Value::from(event.version.as_str()));
    if let Some(boundary) = &event.boundary {
        out.insert("boundary".into(), Value::from(boundary.as_str()));
    }
    if let Some(name) = &event.name {
        out.insert("name".into(), Value::from(name.as_str()));
    }
    out.insert("action".into(), Value::from(event.action.as_str()));

    out.extend(event.attributes.clone());

    if let Some(context) = &event.context {
        if let Ok(Value::Object(context)) = serde_json::to_value(context) {
            out.extend(context);
        }
    }

    let Some(transform) = transform else {
        return out;
    };

    out.into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(text) if transform.rewrites_values() => {
                    Value::String(transform.apply(&text))
                }
                other => other,
            };
            (transform.apply(&key), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracklet_core::GlobalContext;

    fn sample() -> Event {
        let mut attributes = Attributes::new();
        attributes.insert("x".into(), json!(1));
        Event::new("clicked")
            .with_attributes(attributes)
            .with_context(GlobalContext {
                href: Some("u".into()),
                ..Default::default()
            })
    }

    #[test]
    fn test_flatten_lifts_nested_maps() {
        let flat = flatten_event(&sample(), None);
        assert_eq!(
            Value::Object(flat),
            json!({ "version": "2025-05-29", "action": "clicked", "x": 1, "href": "u" })
        );
    }

    #[test]
    fn test_context_overwrites_attributes() {
        let mut attributes = Attributes::new();
        attributes.insert("href".into(), json!("from-attributes"));
        let event = Event::new("viewed")
            .with_boundary("page")
            .with_name("hero")
            .with_attributes(attributes)
            .with_context(GlobalContext {
                href: Some("from-context".into()),
                ..Default::default()
            });

        let flat = flatten_event(&event, None);
        assert_eq!(flat["href"], json!("from-context"));
        assert_eq!(flat["boundary"], json!("page"));
        assert_eq!(flat["name"], json!("hero"));
    }

    #[test]
    fn test_literal_transform_renames_keys_only() {
        let transform = KeyTransform::literal("^", "ev_").unwrap();
        let flat = flatten_event(&sample(), Some(&transform));

        assert_eq!(flat["ev_action"], json!("clicked"));
        assert_eq!(flat["ev_x"], json!(1));
        assert_eq!(flat["ev_href"], json!("u"));
        assert!(!flat.contains_key("action"));
    }

    #[test]
    fn test_fn_transform_rewrites_string_values() {
        let transform = KeyTransform::with_fn("[A-Z]", |m| format!("_{}", m.to_lowercase()))
            .unwrap()
            .all();
        let mut attributes = Attributes::new();
        attributes.insert("pageTitle".into(), json!("HomePage"));
        attributes.insert("itemCount".into(), json!(3));
        let event = Event::new("viewed").with_attributes(attributes);

        let flat = flatten_event(&event, Some(&transform));
        assert_eq!(flat["page_title"], json!("_home_page"));
        assert_eq!(flat["item_count"], json!(3));
    }

    #[test]
    fn test_transform_replaces_first_match_by_default() {
        let transform = KeyTransform::literal("a", "_").unwrap();
        assert_eq!(transform.apply("banana"), "b_nana");
        assert_eq!(transform.all().apply("banana"), "b_n_n_");
    }

    #[test]
    fn test_literal_replacement_is_not_expanded() {
        let transform = KeyTransform::literal("(Id)$", "$1a$&").unwrap();
        assert_eq!(transform.apply("userId"), "user$1a$&");
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        assert!(KeyTransform::literal("(", "x").is_err());
    }
}
