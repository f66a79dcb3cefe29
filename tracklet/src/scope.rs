//! # Scopes
//!
//! A [`Scope`] is what a component tree would otherwise propagate implicitly:
//! the nearest analytics client and the nearest boundary. It is an immutable
//! linked record; entering a boundary or shadowing the client produces a new
//! scope that points at its parent, so snapshots taken by interleaved renders
//! never observe each other.
//!
//! ```rust,ignore
//! let root = Scope::root(Some(client));
//! let page = root.enter_boundary("checkout", &attributes);
//! let form = page.enter_boundary("payment", &Attributes::new());
//!
//! assert_eq!(form.boundary().unwrap().name, "checkout.payment");
//! ```

use crate::{client::AnalyticsClient, emitter::Emitter};
use std::sync::Arc;
use tracklet_core::Attributes;

/// The composed identity of a boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryContext {
    /// Dot-joined path, outermost first.
    pub name: String,
    /// Attributes merged from every enclosing boundary, innermost winning.
    pub attributes: Attributes,
}

#[derive(Debug)]
struct BoundaryFrame {
    segment: String,
    context: Arc<BoundaryContext>,
    parent: Option<Arc<BoundaryFrame>>,
}

/// The ambient analytics context at one point of a component tree.
///
/// Cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    client: Option<AnalyticsClient>,
    boundary: Option<Arc<BoundaryFrame>>,
}

impl Scope {
    /// A scope with neither client nor boundary.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The root scope of a subtree, supplying `client` to every descendant.
    pub fn root(client: Option<AnalyticsClient>) -> Self {
        Self {
            client,
            boundary: None,
        }
    }

    /// A child scope whose client fully shadows this one's.
    ///
    /// Boundaries are kept; providers of the two clients are never merged.
    pub fn with_client(&self, client: Option<AnalyticsClient>) -> Self {
        Self {
            client,
            boundary: self.boundary.clone(),
        }
    }

    /// The nearest client, if any.
    pub fn client(&self) -> Option<&AnalyticsClient> {
        self.client.as_ref()
    }

    /// The nearest boundary's composed identity, if any.
    pub fn boundary(&self) -> Option<&BoundaryContext> {
        self.boundary.as_deref().map(|frame| frame.context.as_ref())
    }

    pub(crate) fn boundary_context(&self) -> Option<Arc<BoundaryContext>> {
        self.boundary.as_ref().map(|frame| Arc::clone(&frame.context))
    }

    /// The local name of every enclosing boundary, outermost first.
    pub fn boundary_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut frame = self.boundary.as_deref();
        while let Some(current) = frame {
            path.push(current.segment.as_str());
            frame = current.parent.as_deref();
        }
        path.reverse();
        path
    }

    /// A child scope inside a boundary named `name`.
    ///
    /// The composed name is the parent's name and `name` joined with `.`, or
    /// `name` alone at the top. An empty `name` still adds a segment. The
    /// composed attributes are the parent's overlaid with `attributes`.
    pub fn enter_boundary(&self, name: &str, attributes: &Attributes) -> Self {
        let (composed_name, mut composed_attributes) = match self.boundary() {
            Some(parent) => (
                format!("{}.{}", parent.name, name),
                parent.attributes.clone(),
            ),
            None => (name.to_string(), Attributes::new()),
        };
        composed_attributes.extend(attributes.clone());

        Self {
            client: self.client.clone(),
            boundary: Some(Arc::new(BoundaryFrame {
                segment: name.to_string(),
                context: Arc::new(BoundaryContext {
                    name: composed_name,
                    attributes: composed_attributes,
                }),
                parent: self.boundary.clone(),
            })),
        }
    }

    /// An emitter bound to this scope.
    ///
    /// Events carry the nearest boundary's name; attributes merge as
    /// boundary, then `hook_attributes`, then the attributes of each call.
    /// Without a client every emission is a no-op.
    pub fn emitter(&self, hook_attributes: Option<Attributes>) -> Emitter {
        Emitter::hook(self, hook_attributes.unwrap_or_default())
    }
}
