//! # Boundaries
//!
//! A boundary names a region of the component tree. Nested boundaries build a
//! dot-joined path and merge their attributes downwards, so that every event
//! emitted inside carries where it came from without the call site spelling
//! it out.
//!
//! The host drives a [`BoundaryNode`] through its lifecycle:
//!
//! 1. [`BoundaryNode::mount`] once, when the boundary enters the tree.
//! 2. [`BoundaryNode::render`] on every render pass. Pure; composes the scope
//!    for the children and renders them.
//! 3. [`BoundaryNode::commit`] after each render pass. The only place a
//!    `viewed` event can come from, and only on the first commit.
//! 4. [`BoundaryNode::unmount`] when it leaves the tree. Emits nothing.
//!
//! ```rust,ignore
//! let props = Boundary::new("checkout").send_viewed_event(true);
//! let mut node = BoundaryNode::mount();
//!
//! let rendered = node.render(&scope, &props, Children::with_emitter(|_, emit| {
//!     Button::new("Pay").on_click({
//!         let emit = emit.clone();
//!         move || {
//!             let _ = emit.emit("clicked", Some("pay"), None, EventOptions::default());
//!         }
//!     })
//! }));
//! // Sends `viewed` on the first commit; the handle is only a receipt.
//! let _ = node.commit(&rendered);
//! ```

use crate::{
    client::Emission,
    emitter::Emitter,
    scope::{BoundaryContext, Scope},
};
use serde_json::Value;
use tracklet_core::{Attributes, EventOptions};

/// Action emitted on a boundary's first commit when asked to.
pub const VIEWED_ACTION: &str = "viewed";

/// Props of a boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Boundary {
    name: String,
    attributes: Attributes,
    send_viewed_event: bool,
}

impl Boundary {
    /// A boundary named `name`, without attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Replace the local attributes.
    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set a single local attribute.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Emit `viewed` on the first commit.
    pub fn send_viewed_event(mut self, send: bool) -> Self {
        self.send_viewed_event = send;
        self
    }

    /// The local name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The local attributes.
    pub fn local_attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Whether `viewed` is requested.
    pub fn sends_viewed_event(&self) -> bool {
        self.send_viewed_event
    }
}

/// What a boundary renders.
pub enum Children<'a, T> {
    /// Content that needs no analytics context.
    Static(T),
    /// A subtree rendered inside the boundary's scope.
    Scoped(Box<dyn FnOnce(&Scope) -> T + 'a>),
    /// A subtree that also receives an emitter bound to this boundary.
    WithEmitter(Box<dyn FnOnce(&Scope, &Emitter) -> T + 'a>),
}

impl<'a, T> Children<'a, T> {
    /// Wrap a subtree renderer.
    pub fn scoped(render: impl FnOnce(&Scope) -> T + 'a) -> Self {
        Children::Scoped(Box::new(render))
    }

    /// Wrap a renderer that receives this boundary's emitter.
    pub fn with_emitter(render: impl FnOnce(&Scope, &Emitter) -> T + 'a) -> Self {
        Children::WithEmitter(Box::new(render))
    }
}

/// Result of one render pass.
#[derive(Debug)]
pub struct Rendered<T> {
    /// Whatever the children rendered to.
    pub output: T,
    /// The scope handed to the children.
    pub scope: Scope,
    /// The emitter bound to this boundary.
    pub emitter: Emitter,
    send_viewed_event: bool,
}

impl<T> Rendered<T> {
    /// This boundary's composed identity.
    pub fn context(&self) -> Option<&BoundaryContext> {
        self.scope.boundary()
    }
}

/// One mounted boundary.
///
/// Holds the only state a boundary has: whether it has been committed yet.
#[derive(Debug, Default)]
pub struct BoundaryNode {
    activated: bool,
}

impl BoundaryNode {
    /// Mount a fresh node.
    pub fn mount() -> Self {
        Self::default()
    }

    /// Whether the first commit has happened.
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Render the children inside this boundary.
    ///
    /// Reads `parent` once, composes this boundary's name and attributes, and
    /// emits nothing.
    pub fn render<T>(&self, parent: &Scope, props: &Boundary, children: Children<'_, T>) -> Rendered<T> {
        let scope = parent.enter_boundary(&props.name, &props.attributes);
        let emitter = Emitter::with_boundary_override(&scope, scope.boundary_context());

        let output = match children {
            Children::Static(output) => output,
            Children::Scoped(render) => render(&scope),
            Children::WithEmitter(render) => render(&scope, &emitter),
        };

        Rendered {
            output,
            scope,
            emitter,
            send_viewed_event: props.send_viewed_event,
        }
    }

    /// Run the post-render effect of `rendered`.
    ///
    /// Sends `viewed` on the first commit of a boundary that asked for one and
    /// returns its [`Emission`]. Every other commit returns `None`.
    pub fn commit<T>(&mut self, rendered: &Rendered<T>) -> Option<Emission> {
        if self.activated {
            return None;
        }
        self.activated = true;

        rendered.send_viewed_event.then(|| {
            rendered
                .emitter
                .emit(VIEWED_ACTION, None, None, EventOptions::default())
        })
    }

    /// Tear the node down.
    pub fn unmount(self) {}
}
