// SPDX-License-Identifier: GPL-3.0-or-later
use chrono::Duration;
use gamarr_config::{DecisionConfig, ProperDownloadTypes};
use gamarr_domain::RemoteGame;
use tracing::debug;

use super::{DecisionSpecification, DownloadRejectionReason, EvaluationContext, SpecDecision};
use crate::upgradable::UpgradeEvaluator;

/// RSS-only guard for propers against the file on disk.
pub struct ProperSpecification {
    propers: ProperDownloadTypes,
    max_file_age: Duration,
}

impl ProperSpecification {
    pub fn new(config: &DecisionConfig) -> Self {
        Self {
            propers: config.download_propers_and_repacks,
            max_file_age: Duration::try_days(config.proper_max_file_age_days)
                .unwrap_or(Duration::MAX),
        }
    }
}

impl DecisionSpecification for ProperSpecification {
    fn name(&self) -> &'static str {
        "Proper"
    }

    fn is_satisfied_by(
        &self,
        remote: &RemoteGame,
        context: &EvaluationContext,
    ) -> anyhow::Result<SpecDecision> {
        if context.is_search() || self.propers == ProperDownloadTypes::DoNotPrefer {
            return Ok(SpecDecision::Accept);
        }
        let (Some(game), Some(parsed)) = (&remote.game, &remote.parsed) else {
            return Ok(SpecDecision::Accept);
        };
        let Some(file) = &game.game_file else {
            return Ok(SpecDecision::Accept);
        };

        if !UpgradeEvaluator::is_revision_upgrade(&file.quality, &parsed.quality) {
            return Ok(SpecDecision::Accept);
        }

        if self.propers == ProperDownloadTypes::DoNotUpgrade {
            debug!(target: "specification", release = %remote.release.title, "proper downloading disabled");
            return Ok(SpecDecision::reject(
                DownloadRejectionReason::PropersDisabled,
                "Proper downloading is disabled",
            ));
        }

        let oldest_allowed = context.now.checked_sub_signed(self.max_file_age);
        if oldest_allowed.is_some_and(|oldest| file.date_added < oldest) {
            debug!(target: "specification", release = %remote.release.title, added = %file.date_added, "proper for old file");
            return Ok(SpecDecision::reject(
                DownloadRejectionReason::ProperForOldFile,
                "Proper for old file",
            ));
        }

        Ok(SpecDecision::Accept)
    }
}
