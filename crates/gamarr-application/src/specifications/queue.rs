// SPDX-License-Identifier: GPL-3.0-or-later
use std::sync::Arc;

use gamarr_config::DecisionConfig;
use gamarr_domain::{RemoteGame, TrackedDownloadState};
use gamarr_infrastructure::QueueReader;
use tracing::debug;

use super::{
    DecisionSpecification, DownloadRejectionReason, EvaluationContext, SpecDecision,
};
use crate::upgradable::{UpgradeEvaluator, UpgradeInput, UpgradeOutcome, UpgradeableRejectReason};

/// A candidate must beat everything already queued for the game. Downloads
/// awaiting failure handling are ignored.
pub struct QueueSpecification {
    evaluator: UpgradeEvaluator,
    queue: Arc<dyn QueueReader>,
}

impl QueueSpecification {
    pub fn new(config: &DecisionConfig, queue: Arc<dyn QueueReader>) -> Self {
        Self {
            evaluator: UpgradeEvaluator::from_config(config),
            queue,
        }
    }
}

impl DecisionSpecification for QueueSpecification {
    fn name(&self) -> &'static str {
        "Queue"
    }

    fn is_satisfied_by(
        &self,
        remote: &RemoteGame,
        _context: &EvaluationContext,
    ) -> anyhow::Result<SpecDecision> {
        let (Some(game), Some(candidate)) = (&remote.game, UpgradeInput::from_remote(remote))
        else {
            return Ok(SpecDecision::Accept);
        };
        let profile = &game.quality_profile;

        for item in self
            .queue
            .queue_for_game(game.id)?
            .iter()
            .filter(|item| item.state != TrackedDownloadState::FailedPending)
        {
            let incumbent = UpgradeInput::from_queue(item);
            debug!(target: "specification", queued = %item.title, quality = %item.quality, "checking queued release");

            let cutoff_not_met =
                self.evaluator
                    .cutoff_not_met(profile, &incumbent, Some(candidate.quality));
            if !cutoff_not_met
                && !UpgradeEvaluator::is_version_upgrade(
                    incumbent.game_version,
                    candidate.game_version,
                )
            {
                return Ok(SpecDecision::reject(
                    DownloadRejectionReason::QueueCutoffMet,
                    format!("Release in queue already meets cutoff: {}", item.quality),
                ));
            }

            match self.evaluator.evaluate(profile, &incumbent, &candidate) {
                UpgradeOutcome::Upgrade(_) => {}
                UpgradeOutcome::NotUpgrade(UpgradeableRejectReason::UpgradesNotAllowed) => {
                    return Ok(SpecDecision::reject(
                        DownloadRejectionReason::QueueUpgradesNotAllowed,
                        "Release in queue and quality profile does not allow upgrades",
                    ));
                }
                UpgradeOutcome::NotUpgrade(_) => {
                    return Ok(SpecDecision::reject(
                        DownloadRejectionReason::QueueHigherPreference,
                        format!("Release in queue is of equal or higher preference: {}", item.quality),
                    ));
                }
            }
        }

        Ok(SpecDecision::Accept)
    }
}
