//! Ports (interfaces) consumed by the application layer.

pub mod context_provider;
pub mod model_invoker;
pub mod progress;
pub mod session_store;

pub use context_provider::ContextProvider;
pub use model_invoker::{InvocationError, ModelInvoker};
pub use progress::{NoProgress, RoundProgressNotifier, RoundStage};
pub use session_store::{PersistedSession, SessionStore, StoreError};
