//! Built-in providers.

pub mod callback;
pub mod console;
pub mod tag_manager;

pub use callback::{FnProvider, provider_fn};
pub use console::ConsoleProvider;
pub use tag_manager::{TagFunction, TagManagerProvider, display_name};
