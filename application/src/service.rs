//! Advisory service entry points.
//!
//! The surface the embedding application calls: admission control, round
//! memoization, orchestration, and best-effort persistence composed into
//! two operations, run-a-round and generate-clarifying-questions.

use crate::cache::TtlCache;
use crate::config::ServiceLimits;
use crate::ports::model_invoker::{InvocationError, ModelInvoker};
use crate::ports::progress::{NoProgress, RoundProgressNotifier};
use crate::ports::session_store::SessionStore;
use crate::rate_limiter::RateLimiter;
use crate::use_cases::clarify::{ClarifyInput, ClarifyQuestionsUseCase};
use crate::use_cases::run_round::RunRoundUseCase;
use consilium_domain::{DomainError, Guardrails, RoundRequest, RoundResult, preview};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Rejections surfaced to the caller before any model invocation
#[derive(Error, Debug)]
pub enum AdvisoryError {
    #[error("Rate limit reached; wait before trying again")]
    RateLimited,

    #[error(transparent)]
    Input(#[from] DomainError),

    #[error("Intake call failed: {0}")]
    Intake(#[from] InvocationError),
}

/// The advisory consensus engine
///
/// Owns the only mutable shared state of the system: the round cache and
/// the per-identity rate windows. Both are internally sharded, so
/// concurrent rounds for different fingerprints or identities never block
/// one another.
pub struct AdvisoryService {
    invoker: Arc<dyn ModelInvoker>,
    rounds: RunRoundUseCase,
    clarify: ClarifyQuestionsUseCase,
    round_cache: TtlCache<RoundResult>,
    question_cache: TtlCache<Vec<String>>,
    limiter: RateLimiter,
    limits: ServiceLimits,
    store: Option<Arc<dyn SessionStore>>,
}

impl AdvisoryService {
    pub fn new(invoker: Arc<dyn ModelInvoker>, limits: ServiceLimits) -> Self {
        Self {
            rounds: RunRoundUseCase::new(Arc::clone(&invoker)).with_limits(&limits),
            clarify: ClarifyQuestionsUseCase::new(Arc::clone(&invoker)),
            invoker,
            round_cache: TtlCache::new(limits.cache_ttl()),
            question_cache: TtlCache::new(limits.cache_ttl()),
            limiter: RateLimiter::new(limits.rate_window(), limits.rate_max_calls),
            limits,
            store: None,
        }
    }

    /// Attach a session store; without one, rounds are not persisted
    pub fn with_session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the default guardrail clauses
    pub fn with_guardrails(mut self, guardrails: Guardrails) -> Self {
        self.rounds = RunRoundUseCase::new(Arc::clone(&self.invoker))
            .with_limits(&self.limits)
            .with_guardrails(guardrails);
        self
    }

    /// Run one advisory round for `identity`.
    ///
    /// Checks admission, consults the round cache by fingerprint (when
    /// `use_cache` is set), orchestrates on a miss, then persists the
    /// result under a freshly assigned session name. Persistence failures
    /// degrade to a warning: the in-memory result is returned regardless.
    pub async fn run_round(
        &self,
        request: RoundRequest,
        identity: &str,
        use_cache: bool,
        progress: &dyn RoundProgressNotifier,
    ) -> Result<RoundResult, AdvisoryError> {
        if !self.limiter.admit(&format!("{identity}:run")) {
            return Err(AdvisoryError::RateLimited);
        }

        let fingerprint = request.fingerprint();
        let mut result = match use_cache.then(|| self.round_cache.get(&fingerprint)).flatten() {
            Some(hit) => {
                info!("Round cache hit ({})", preview(&fingerprint, 12));
                hit
            }
            None => {
                let result = self.rounds.execute_with_progress(request, progress).await;
                if use_cache {
                    self.round_cache.put(fingerprint, result.clone());
                }
                result
            }
        };

        if let Some(store) = &self.store {
            match store.persist_new(&result).await {
                Ok(name) => {
                    info!("Round persisted as session {}", name);
                    result.request.session_name = name;
                }
                Err(e) => warn!("Failed to persist round: {}", e),
            }
        }

        Ok(result)
    }

    /// Convenience wrapper without progress reporting
    pub async fn run_round_quiet(
        &self,
        request: RoundRequest,
        identity: &str,
        use_cache: bool,
    ) -> Result<RoundResult, AdvisoryError> {
        self.run_round(request, identity, use_cache, &NoProgress).await
    }

    /// Generate clarifying intake questions for a case description.
    ///
    /// Draws from its own admission quota (`:clarify` suffix) so intake
    /// usage never exhausts the round quota, and memoizes results by the
    /// full input.
    pub async fn clarifying_questions(
        &self,
        input: ClarifyInput,
        identity: &str,
        use_cache: bool,
    ) -> Result<Vec<String>, AdvisoryError> {
        if !self.limiter.admit(&format!("{identity}:clarify")) {
            return Err(AdvisoryError::RateLimited);
        }
        if input.case_text.trim().is_empty() {
            return Err(AdvisoryError::Input(DomainError::EmptyAgenda));
        }

        let key = input.cache_key();
        if use_cache && let Some(hit) = self.question_cache.get(&key) {
            info!("Question cache hit");
            return Ok(hit);
        }

        let questions = self.clarify.execute(&input).await?;
        if use_cache {
            self.question_cache.put(key, questions.clone());
        }
        Ok(questions)
    }
}
