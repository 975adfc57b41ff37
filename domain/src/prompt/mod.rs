//! Prompt construction for advisor, lead, and intake calls.

pub mod template;

pub use template::{Guardrails, PromptTemplate};
