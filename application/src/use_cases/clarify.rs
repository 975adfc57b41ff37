//! Clarify Questions use case
//!
//! One intake call: ask a model for clarifying questions about a case
//! description, then parse the free-text response into structured data.

use crate::ports::model_invoker::{InvocationError, ModelInvoker};
use consilium_domain::{PromptTemplate, extract_questions, preview};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Input for the [`ClarifyQuestionsUseCase`]
#[derive(Debug, Clone, Serialize)]
pub struct ClarifyInput {
    pub case_text: String,
    pub max_questions: usize,
    pub model: String,
    /// Domain label passed through to the intake prompt
    pub category: String,
}

impl ClarifyInput {
    pub fn new(
        case_text: impl Into<String>,
        max_questions: usize,
        model: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            case_text: case_text.into(),
            max_questions,
            model: model.into(),
            category: category.into(),
        }
    }

    /// Memoization key: every field participates
    pub fn cache_key(&self) -> String {
        serde_json::to_string(self).expect("clarify input serializes")
    }
}

/// Use case for generating clarifying intake questions
pub struct ClarifyQuestionsUseCase {
    invoker: Arc<dyn ModelInvoker>,
}

impl ClarifyQuestionsUseCase {
    pub fn new(invoker: Arc<dyn ModelInvoker>) -> Self {
        Self { invoker }
    }

    /// Issue the intake call and extract up to `max_questions` questions.
    ///
    /// Fewer questions than requested is a normal outcome; the list is
    /// never padded.
    pub async fn execute(&self, input: &ClarifyInput) -> Result<Vec<String>, InvocationError> {
        info!(
            "Generating up to {} clarifying questions for: {}",
            input.max_questions,
            preview(&input.case_text, 80),
        );

        let user = PromptTemplate::intake_user(&input.case_text, input.max_questions, &input.category);
        let response = self
            .invoker
            .invoke(&input.model, PromptTemplate::intake_system(), &user)
            .await?;

        let questions = extract_questions(&response, input.max_questions);
        debug!("Extracted {} questions", questions.len());
        Ok(questions)
    }
}
