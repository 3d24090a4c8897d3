// SPDX-License-Identifier: GPL-3.0-or-later
use std::sync::Arc;

use chrono::Duration;
use gamarr_config::DecisionConfig;
use gamarr_domain::{HistoryEventType, RemoteGame};
use gamarr_infrastructure::HistoryReader;
use tracing::debug;

use super::{
    DecisionSpecification, DownloadRejectionReason, EvaluationContext, SpecDecision,
    SpecificationPriority,
};
use crate::upgradable::{UpgradeEvaluator, UpgradeInput};

/// Recency guard for RSS: a game grabbed within the recency window (or at any
/// time when completed download handling is off) only accepts upgrades over
/// that grab.
pub struct HistorySpecification {
    evaluator: UpgradeEvaluator,
    completed_download_handling: bool,
    recency: Duration,
    history: Arc<dyn HistoryReader>,
}

impl HistorySpecification {
    pub fn new(config: &DecisionConfig, history: Arc<dyn HistoryReader>) -> Self {
        Self {
            evaluator: UpgradeEvaluator::from_config(config),
            completed_download_handling: config.enable_completed_download_handling,
            recency: Duration::try_hours(config.history_recency_hours).unwrap_or(Duration::MAX),
            history,
        }
    }
}

impl DecisionSpecification for HistorySpecification {
    fn name(&self) -> &'static str {
        "History"
    }

    fn priority(&self) -> SpecificationPriority {
        SpecificationPriority::Database
    }

    fn is_satisfied_by(
        &self,
        remote: &RemoteGame,
        context: &EvaluationContext,
    ) -> anyhow::Result<SpecDecision> {
        if context.is_search() {
            debug!(target: "specification", "skipping history check during search");
            return Ok(SpecDecision::Accept);
        }
        let (Some(game), Some(candidate)) = (&remote.game, UpgradeInput::from_remote(remote))
        else {
            return Ok(SpecDecision::Accept);
        };

        let Some(recent) = self.history.most_recent_for_game(game.id)? else {
            return Ok(SpecDecision::Accept);
        };
        if recent.event_type != HistoryEventType::Grabbed {
            return Ok(SpecDecision::Accept);
        }

        let is_recent = context.now - recent.date < self.recency;
        if !is_recent && self.completed_download_handling {
            return Ok(SpecDecision::Accept);
        }

        let profile = &game.quality_profile;
        let incumbent = UpgradeInput::from_history(&recent);

        let cutoff_not_met =
            self.evaluator
                .cutoff_not_met(profile, &incumbent, Some(candidate.quality));
        let version_upgrade =
            UpgradeEvaluator::is_version_upgrade(incumbent.game_version, candidate.game_version);

        if !cutoff_not_met && !version_upgrade {
            debug!(target: "specification", game_id = %game.id, recent = is_recent, "grabbed history meets cutoff");
            return Ok(if is_recent {
                SpecDecision::reject(
                    DownloadRejectionReason::HistoryRecentCutoffMet,
                    "Recent grab event in history already meets cutoff",
                )
            } else {
                SpecDecision::reject(
                    DownloadRejectionReason::HistoryCdhDisabledCutoffMet,
                    "CDH is disabled and grab event in history already meets cutoff",
                )
            });
        }

        if !self.evaluator.is_upgrade(profile, &incumbent, &candidate) {
            debug!(target: "specification", game_id = %game.id, recent = is_recent, "grabbed history is preferred");
            return Ok(if is_recent {
                SpecDecision::reject(
                    DownloadRejectionReason::HistoryHigherPreference,
                    format!("Recent grab event in history is of equal or higher preference: {}", recent.quality),
                )
            } else {
                SpecDecision::reject(
                    DownloadRejectionReason::HistoryCdhDisabledHigherPreference,
                    format!("CDH is disabled and grab event in history is of equal or higher preference: {}", recent.quality),
                )
            });
        }

        Ok(SpecDecision::Accept)
    }
}
