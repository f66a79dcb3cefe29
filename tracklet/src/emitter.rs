//! # Emitters
//!
//! The per-call-site entry point. An [`Emitter`] captures the client and
//! boundary of the scope it was taken from, merges attributes, and forwards
//! to [`AnalyticsClient::emit`].
//!
//! Two bindings exist:
//!
//! - **Hook** ([`Scope::emitter`]): reports the ambient boundary and merges
//!   boundary attributes, then hook attributes, then call attributes.
//! - **Boundary**: used only by [`BoundaryNode`](crate::BoundaryNode) for the
//!   emitter it hands to its children. An explicit boundary override replaces
//!   the ambient boundary wholesale, name and attributes alike.

use crate::{
    client::{AnalyticsClient, DeliveryReport, Emission},
    scope::{BoundaryContext, Scope},
};
use std::sync::Arc;
use tracklet_core::{Attributes, EventOptions};

#[derive(Debug, Clone)]
enum Binding {
    Hook(Attributes),
    Boundary,
}

/// Emits events on behalf of one call site.
#[derive(Debug, Clone)]
pub struct Emitter {
    client: Option<AnalyticsClient>,
    boundary: Option<Arc<BoundaryContext>>,
    binding: Binding,
}

impl Emitter {
    pub(crate) fn hook(scope: &Scope, hook_attributes: Attributes) -> Self {
        Self {
            client: scope.client().cloned(),
            boundary: scope.boundary_context(),
            binding: Binding::Hook(hook_attributes),
        }
    }

    /// Emitter for a boundary's own children. Not for general use.
    pub(crate) fn with_boundary_override(
        scope: &Scope,
        boundary_override: Option<Arc<BoundaryContext>>,
    ) -> Self {
        Self {
            client: scope.client().cloned(),
            boundary: boundary_override.or_else(|| scope.boundary_context()),
            binding: Binding::Boundary,
        }
    }

    /// The boundary events from this emitter are attributed to.
    pub fn boundary(&self) -> Option<&BoundaryContext> {
        self.boundary.as_deref()
    }

    /// Emit one event.
    ///
    /// Never fails. Without a client the emission settles immediately with an
    /// empty report.
    pub fn emit(
        &self,
        action: &str,
        name: Option<&str>,
        attributes: Option<Attributes>,
        options: EventOptions,
    ) -> Emission {
        let Some(client) = &self.client else {
            return Emission::ready(DeliveryReport::default());
        };

        let mut merged = self
            .boundary
            .as_ref()
            .map(|boundary| boundary.attributes.clone())
            .unwrap_or_default();
        match &self.binding {
            Binding::Hook(hook_attributes) => {
                merged.extend(hook_attributes.clone());
                merged.extend(attributes.unwrap_or_default());
            }
            Binding::Boundary => {
                merged.extend(attributes.unwrap_or_default());
            }
        }

        client.emit(
            action,
            name,
            self.boundary.as_ref().map(|boundary| boundary.name.as_str()),
            Some(merged),
            options,
        )
    }
}
