//! Run Round use case
//!
//! Orchestrates one advisory round: fan the agenda out to every panel
//! member, collect opinions with per-member failure isolation, then run a
//! single lead synthesis over the surviving opinions.

use crate::config::ServiceLimits;
use crate::ports::model_invoker::ModelInvoker;
use crate::ports::progress::{NoProgress, RoundProgressNotifier, RoundStage};
use consilium_domain::{
    FALLBACK_SUMMARY, Guardrails, MemberResult, PromptTemplate, RoundRequest, RoundResult, preview,
};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Use case for executing advisory rounds
///
/// A round never fails structurally: member invocation errors are recorded
/// as failed [`MemberResult`]s, and a failed or empty lead synthesis falls
/// back to a placeholder summary. The result always carries exactly one
/// member entry per roster member, in roster order.
pub struct RunRoundUseCase {
    invoker: Arc<dyn ModelInvoker>,
    guardrails: Guardrails,
    limits: ServiceLimits,
}

impl RunRoundUseCase {
    pub fn new(invoker: Arc<dyn ModelInvoker>) -> Self {
        Self {
            invoker,
            guardrails: Guardrails::default(),
            limits: ServiceLimits::default(),
        }
    }

    /// Replace the default guardrail clauses
    pub fn with_guardrails(mut self, guardrails: Guardrails) -> Self {
        self.guardrails = guardrails;
        self
    }

    /// Bound member fan-out per the configured limits
    pub fn with_limits(mut self, limits: &ServiceLimits) -> Self {
        self.limits = limits.clone();
        self
    }

    /// Execute with default (no-op) progress
    pub async fn execute(&self, request: RoundRequest) -> RoundResult {
        self.execute_with_progress(request, &NoProgress).await
    }

    /// Execute all deliberation rounds of the request.
    ///
    /// `round_count > 1` repeats the fan-out/fan-in primitive, feeding each
    /// prior consensus back in as an additional context block. The returned
    /// result reflects the final round.
    pub async fn execute_with_progress(
        &self,
        request: RoundRequest,
        progress: &dyn RoundProgressNotifier,
    ) -> RoundResult {
        info!(
            "Starting advisory round with {} members: {}",
            request.roster.member_count(),
            preview(request.agenda.text(), 80),
        );

        let mut contexts = request.contexts.clone();
        let mut member_results = Vec::new();
        let mut summary = String::new();

        for round in 1..=request.round_count {
            debug!("Deliberation round {}/{}", round, request.round_count);
            let (results, round_summary) = self.run_single(&request, &contexts, progress).await;
            member_results = results;
            summary = round_summary;

            if round < request.round_count {
                contexts.push(format!("Prior round consensus:\n{}", summary));
            }
        }

        RoundResult::new(summary, member_results, request)
    }

    /// One fan-out/fan-in pass: all members concurrently, then the lead.
    async fn run_single(
        &self,
        request: &RoundRequest,
        contexts: &[String],
        progress: &dyn RoundProgressNotifier,
    ) -> (Vec<MemberResult>, String) {
        let members = &request.roster.members;
        progress.on_stage_start(RoundStage::MemberFanOut, members.len());

        let user_prompt = PromptTemplate::member_user(
            request.agenda.text(),
            &request.questions,
            &request.rules,
            contexts,
        );

        let width = self.limits.fan_out_width(members.len());
        let semaphore = Arc::new(Semaphore::new(width));
        let mut join_set = JoinSet::new();

        for (index, spec) in members.iter().cloned().enumerate() {
            let invoker = Arc::clone(&self.invoker);
            let semaphore = Arc::clone(&semaphore);
            let system = PromptTemplate::member_system(&spec, &self.guardrails);
            let user = user_prompt.clone();

            join_set.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("fan-out semaphore never closed");
                let outcome = invoker.invoke(&spec.model, &system, &user).await;
                (index, spec, outcome)
            });
        }

        // Reassemble by roster index, not completion order.
        let mut slots: Vec<Option<MemberResult>> = members.iter().map(|_| None).collect();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, spec, Ok(output))) if !output.trim().is_empty() => {
                    debug!("Advisor {} responded ({} bytes)", spec.title, output.len());
                    progress.on_advisor_settled(RoundStage::MemberFanOut, &spec.title, true);
                    slots[index] = Some(MemberResult::success(spec, output));
                }
                Ok((index, spec, Ok(_))) => {
                    warn!("Advisor {} returned an empty opinion", spec.title);
                    progress.on_advisor_settled(RoundStage::MemberFanOut, &spec.title, false);
                    slots[index] = Some(MemberResult::failure(spec));
                }
                Ok((index, spec, Err(e))) => {
                    warn!("Advisor {} failed: {}", spec.title, e);
                    progress.on_advisor_settled(RoundStage::MemberFanOut, &spec.title, false);
                    slots[index] = Some(MemberResult::failure(spec));
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        // A join error leaves a hole; fill it from the roster so the
        // one-entry-per-member guarantee holds.
        let member_results: Vec<MemberResult> = slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| slot.unwrap_or_else(|| MemberResult::failure(members[i].clone())))
            .collect();

        progress.on_stage_complete(RoundStage::MemberFanOut);

        let summary = self
            .synthesize(request, contexts, &member_results, progress)
            .await;

        (member_results, summary)
    }

    /// Lead synthesis; strictly after every member call has settled.
    async fn synthesize(
        &self,
        request: &RoundRequest,
        contexts: &[String],
        member_results: &[MemberResult],
        progress: &dyn RoundProgressNotifier,
    ) -> String {
        let lead = &request.roster.lead;
        progress.on_stage_start(RoundStage::LeadSynthesis, 1);

        let usable: Vec<(usize, &str)> = member_results
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_usable())
            .map(|(i, r)| (i, r.output.as_str()))
            .collect();

        if usable.is_empty() {
            warn!("No usable member opinions; synthesizing from agenda alone");
        }

        let system = PromptTemplate::lead_system(lead, &self.guardrails);
        let user = PromptTemplate::lead_user(request.agenda.text(), contexts, &usable);

        let summary = match self.invoker.invoke(&lead.model, &system, &user).await {
            Ok(text) if !text.trim().is_empty() => {
                progress.on_advisor_settled(RoundStage::LeadSynthesis, &lead.title, true);
                text
            }
            Ok(_) => {
                warn!("Lead {} returned an empty summary", lead.title);
                progress.on_advisor_settled(RoundStage::LeadSynthesis, &lead.title, false);
                FALLBACK_SUMMARY.to_string()
            }
            Err(e) => {
                warn!("Lead synthesis failed: {}", e);
                progress.on_advisor_settled(RoundStage::LeadSynthesis, &lead.title, false);
                FALLBACK_SUMMARY.to_string()
            }
        };

        progress.on_stage_complete(RoundStage::LeadSynthesis);
        summary
    }
}
