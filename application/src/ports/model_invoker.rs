//! Model invoker port
//!
//! Defines the interface for issuing one model call: system text plus user
//! text in, response text out. Implementations (adapters) live in the
//! infrastructure layer; the engine never inspects provider response
//! structure beyond "text content or failure".

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a model invocation
#[derive(Error, Debug)]
pub enum InvocationError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Response carried no content")]
    EmptyContent,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Capability for one synchronous model call
///
/// `model` selects the backend model; implementations may translate the
/// identifier (compatibility aliases) before dispatch. Every invocation
/// must be bounded by the adapter's own timeout; the orchestrator treats a
/// timeout like any other failure.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(
        &self,
        model: &str,
        system: &str,
        user: &str,
    ) -> Result<String, InvocationError>;
}
