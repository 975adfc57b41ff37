//! Infrastructure layer for consilium
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the HTTP model invoker, the filesystem session
//! store, context providers, and configuration file loading.

pub mod config;
pub mod context;
pub mod invoker;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig};
pub use context::{PubMedHighlights, WebSearchHighlights};
pub use invoker::{HttpInvokerConfig, HttpModelInvoker};
pub use store::FsSessionStore;
