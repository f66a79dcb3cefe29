//! # Host Environment
//!
//! The client needs three things from its host: whether it is running in an
//! interactive, page-like environment at all, the current hostname, and a
//! snapshot of the ambient context (URL, viewport, user agent).
//!
//! - [`Headless`] is for server-side rendering, batch jobs and tests of the
//!   disabled path. A client built on it is a no-op.
//! - [`StaticEnvironment`] is a fixed snapshot, for native hosts that know
//!   their context up front and for tests.
//!
//! Hosts with live state (a webview, a browser binding) implement
//! [`Environment`] themselves so that [`Environment::capture`] reads the
//! current values on every emission.

use tracklet_core::GlobalContext;

/// The host a client runs in.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an analytics `Environment`",
    label = "missing `Environment` implementation",
    note = "Environments must report interactivity, hostname and ambient context."
)]
pub trait Environment: Send + Sync + 'static {
    /// Whether this is an interactive, page-like host. Checked once per client.
    fn is_interactive(&self) -> bool;

    /// Hostname of the current location, if any.
    fn hostname(&self) -> Option<&str>;

    /// Snapshot of the ambient context, taken per emission.
    fn capture(&self) -> GlobalContext;
}

/// A non-interactive host.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl Environment for Headless {
    fn is_interactive(&self) -> bool {
        false
    }

    fn hostname(&self) -> Option<&str> {
        None
    }

    fn capture(&self) -> GlobalContext {
        GlobalContext::default()
    }
}

/// An interactive host with a fixed context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticEnvironment {
    context: GlobalContext,
    hostname: Option<String>,
}

impl StaticEnvironment {
    /// Create a snapshot environment. The hostname is parsed from `href`.
    pub fn new(
        href: impl Into<String>,
        window_width: u32,
        window_height: u32,
        user_agent: impl Into<String>,
    ) -> Self {
        let href = href.into();
        let hostname = parse_hostname(&href).map(str::to_string);
        Self {
            context: GlobalContext {
                href: Some(href),
                window_width: Some(window_width),
                window_height: Some(window_height),
                user_agent: Some(user_agent.into()),
            },
            hostname,
        }
    }

    /// A local development page.
    pub fn localhost() -> Self {
        Self::new(
            "http://localhost:3000/",
            1024,
            768,
            concat!("tracklet/", env!("CARGO_PKG_VERSION")),
        )
    }
}

impl Environment for StaticEnvironment {
    fn is_interactive(&self) -> bool {
        true
    }

    fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    fn capture(&self) -> GlobalContext {
        self.context.clone()
    }
}

/// Extract the host part of an absolute URL.
fn parse_hostname(href: &str) -> Option<&str> {
    let (_, rest) = href.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);

    let host = if let Some(bracketed) = host_port.strip_prefix('[') {
        bracketed.split_once(']').map(|(ip, _)| ip)?
    } else {
        host_port.split(':').next()?
    };

    (!host.is_empty()).then_some(host)
}
