//! Application layer for consilium
//!
//! This crate contains the advisory orchestration engine: ports, use
//! cases, the round cache, the rate limiter, and the service entry points.
//! It depends only on the domain layer.

pub mod cache;
pub mod config;
pub mod ports;
pub mod rate_limiter;
pub mod service;
pub mod use_cases;

// Re-export commonly used types
pub use cache::TtlCache;
pub use config::{MAX_MEMBER_CONCURRENCY, ServiceLimits};
pub use ports::{
    context_provider::ContextProvider,
    model_invoker::{InvocationError, ModelInvoker},
    progress::{NoProgress, RoundProgressNotifier, RoundStage},
    session_store::{PersistedSession, SessionStore, StoreError},
};
pub use rate_limiter::RateLimiter;
pub use service::{AdvisoryError, AdvisoryService};
pub use use_cases::clarify::{ClarifyInput, ClarifyQuestionsUseCase};
pub use use_cases::run_round::RunRoundUseCase;
