//! Model invoker adapters.

pub mod http;

pub use http::{HttpInvokerConfig, HttpModelInvoker};
