// SPDX-License-Identifier: GPL-3.0-or-later

//! Batch evaluation of candidate releases.
//!
//! Each batch runs against one point-in-time snapshot of the store. Candidates
//! are evaluated on the blocking pool with bounded concurrency and a
//! per-candidate timeout. The caller can abort a batch through a watch channel.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use gamarr_config::DecisionConfig;
use gamarr_domain::{Game, RemoteGame};
use gamarr_infrastructure::{CandidateSource, InMemoryStore};
use thiserror::Error;
use tokio::sync::{watch, Semaphore};
use tokio::task::{JoinError, JoinSet};
use tracing::{info, warn};

use crate::decision_maker::{DecisionMaker, DownloadDecision};
use crate::events::{publish_decisions, EventPublisher};
use crate::prioritization::DownloadDecisionComparer;
use crate::specifications::{EvaluationContext, SpecificationReaders};

#[derive(Debug, Error)]
pub enum DecisionServiceError {
    #[error("batch evaluation aborted")]
    Aborted,
    #[error("evaluation task failed: {0}")]
    Join(#[from] JoinError),
    #[error("candidate source failed: {0}")]
    Source(anyhow::Error),
    #[error("failed to snapshot library state: {0}")]
    Snapshot(anyhow::Error),
}

pub type DecisionServiceResult<T> = Result<T, DecisionServiceError>;

pub struct DecisionService<P: EventPublisher> {
    config: DecisionConfig,
    store: InMemoryStore,
    publisher: P,
}

impl<P: EventPublisher> DecisionService<P> {
    pub fn new(config: DecisionConfig, store: InMemoryStore, publisher: P) -> Self {
        Self {
            config,
            store,
            publisher,
        }
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Evaluates `candidates` with the default specification set. Decisions
    /// come back in input order.
    pub async fn evaluate_batch(
        &self,
        candidates: Vec<RemoteGame>,
        context: &EvaluationContext,
        abort: watch::Receiver<bool>,
    ) -> DecisionServiceResult<Vec<DownloadDecision>> {
        if *abort.borrow() {
            return Err(DecisionServiceError::Aborted);
        }

        let snapshot = self
            .store
            .snapshot()
            .map_err(DecisionServiceError::Snapshot)?;
        let readers = SpecificationReaders::from_snapshot(snapshot);
        let maker = DecisionMaker::with_default_specifications(&self.config, &readers);

        self.evaluate_with(Arc::new(maker), candidates, context, abort)
            .await
    }

    pub(crate) async fn evaluate_with(
        &self,
        maker: Arc<DecisionMaker>,
        candidates: Vec<RemoteGame>,
        context: &EvaluationContext,
        mut abort: watch::Receiver<bool>,
    ) -> DecisionServiceResult<Vec<DownloadDecision>> {
        let total = candidates.len();
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_evaluations.max(1)));
        let timeout = Duration::from_millis(self.config.evaluation_timeout_ms);
        let mut tasks = JoinSet::new();

        // Kept so a failed evaluation can still report on its candidate.
        let originals = candidates.clone();
        let mut slots: Vec<Option<DownloadDecision>> = (0..total).map(|_| None).collect();

        for (index, remote) in candidates.into_iter().enumerate() {
            let permit = tokio::select! {
                biased;
                _ = abort_requested(&mut abort) => {
                    tasks.abort_all();
                    return Err(DecisionServiceError::Aborted);
                }
                permit = semaphore.clone().acquire_owned() => {
                    permit.map_err(|_| DecisionServiceError::Aborted)?
                }
            };

            let maker = Arc::clone(&maker);
            let context = *context;
            tasks.spawn(async move {
                // The permit lives with the blocking work, which keeps running
                // after a timeout drops its handle.
                let evaluation = tokio::task::spawn_blocking(move || {
                    let _permit = permit;
                    maker.evaluate(remote, &context)
                });
                (index, tokio::time::timeout(timeout, evaluation).await)
            });
        }

        loop {
            tokio::select! {
                biased;
                _ = abort_requested(&mut abort) => {
                    tasks.abort_all();
                    return Err(DecisionServiceError::Aborted);
                }
                joined = tasks.join_next() => match joined {
                    None => break,
                    Some(Ok((index, Ok(Ok(decision))))) => slots[index] = Some(decision),
                    Some(Ok((index, Ok(Err(error))))) => {
                        warn!(
                            target: "decision",
                            release = %originals[index].release.title,
                            error = %error,
                            "release evaluation panicked"
                        );
                    }
                    Some(Ok((index, Err(_)))) => {
                        warn!(
                            target: "decision",
                            release = %originals[index].release.title,
                            timeout_ms = self.config.evaluation_timeout_ms,
                            "release evaluation timed out"
                        );
                    }
                    Some(Err(error)) => return Err(DecisionServiceError::Join(error)),
                },
            }
        }

        let decisions: Vec<DownloadDecision> = slots
            .into_iter()
            .zip(originals)
            .map(|(slot, original)| slot.unwrap_or_else(|| DownloadDecision::error(original)))
            .collect();

        let approved = decisions
            .iter()
            .filter(|decision| decision.is_approved())
            .count();
        info!(
            target: "decision",
            total,
            approved,
            rejected = total - approved,
            source = %context.release_source(),
            "batch evaluated"
        );

        Ok(decisions)
    }

    /// Orders decisions best first per game, rejected decisions last.
    pub fn rank(&self, decisions: Vec<DownloadDecision>, now: DateTime<Utc>) -> Vec<DownloadDecision> {
        DownloadDecisionComparer::new(&self.config, now).prioritize(decisions)
    }

    /// Fetches candidates for `game`, evaluates and ranks them, then publishes
    /// one event per decision.
    pub async fn search_and_rank(
        &self,
        source: &dyn CandidateSource,
        game: &Game,
        context: &EvaluationContext,
        abort: watch::Receiver<bool>,
    ) -> DecisionServiceResult<Vec<DownloadDecision>> {
        let candidates = source
            .fetch_candidates(game)
            .await
            .map_err(DecisionServiceError::Source)?;
        info!(
            target: "decision",
            game_id = %game.id,
            title = %game.title,
            candidates = candidates.len(),
            "fetched candidates"
        );

        let decisions = self.evaluate_batch(candidates, context, abort).await?;
        let ranked = self.rank(decisions, context.now);
        publish_decisions(&self.publisher, &ranked);
        Ok(ranked)
    }
}

/// Resolves once an abort is requested. A dropped sender can never abort.
async fn abort_requested(abort: &mut watch::Receiver<bool>) {
    if abort.wait_for(|aborted| *aborted).await.is_err() {
        std::future::pending::<()>().await;
    }
}
