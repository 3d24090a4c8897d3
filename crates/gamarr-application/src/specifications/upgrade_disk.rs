// SPDX-License-Identifier: GPL-3.0-or-later
use gamarr_config::DecisionConfig;
use gamarr_domain::RemoteGame;
use tracing::debug;

use super::{
    DecisionSpecification, DownloadRejectionReason, EvaluationContext, SpecDecision,
    SpecificationPriority,
};
use crate::upgradable::{UpgradeEvaluator, UpgradeInput, UpgradeOutcome, UpgradeableRejectReason};

/// The candidate must be an upgrade over the file already on disk. A newer
/// game version is accepted even when the existing file meets every cutoff.
pub struct UpgradeDiskSpecification {
    evaluator: UpgradeEvaluator,
}

impl UpgradeDiskSpecification {
    pub fn new(config: &DecisionConfig) -> Self {
        Self {
            evaluator: UpgradeEvaluator::from_config(config),
        }
    }
}

impl DecisionSpecification for UpgradeDiskSpecification {
    fn name(&self) -> &'static str {
        "UpgradeDisk"
    }

    fn priority(&self) -> SpecificationPriority {
        SpecificationPriority::Disk
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
        let Some(file) = &game.game_file else {
            debug!(target: "specification", game_id = %game.id, "no file on disk");
            return Ok(SpecDecision::Accept);
        };

        let profile = &game.quality_profile;
        let incumbent = UpgradeInput::from_file(file);

        if !self
            .evaluator
            .cutoff_not_met(profile, &incumbent, Some(candidate.quality))
            && !UpgradeEvaluator::is_version_upgrade(incumbent.game_version, candidate.game_version)
        {
            let cutoff = profile
                .cutoff_index()
                .and_then(|index| profile.items.get(index))
                .map(|item| item.quality.to_string())
                .unwrap_or_default();
            debug!(target: "specification", game_id = %game.id, %cutoff, "existing file meets cutoff");
            return Ok(SpecDecision::reject(
                DownloadRejectionReason::DiskCutoffMet,
                format!("Existing file meets cutoff: {cutoff}"),
            ));
        }

        let reason = match self.evaluator.evaluate(profile, &incumbent, &candidate) {
            UpgradeOutcome::Upgrade(kind) => {
                debug!(target: "specification", game_id = %game.id, ?kind, "upgrade over existing file");
                return Ok(SpecDecision::Accept);
            }
            UpgradeOutcome::NotUpgrade(reason) => reason,
        };

        let decision = match reason {
            UpgradeableRejectReason::BetterQuality => SpecDecision::reject(
                DownloadRejectionReason::DiskHigherPreference,
                format!("Existing file on disk is of equal or higher preference: {}", file.quality),
            ),
            UpgradeableRejectReason::BetterRevision => SpecDecision::reject(
                DownloadRejectionReason::DiskHigherRevision,
                format!(
                    "Existing file on disk is of equal or higher revision: {}",
                    file.quality.revision
                ),
            ),
            UpgradeableRejectReason::QualityCutoff => SpecDecision::reject(
                DownloadRejectionReason::DiskCutoffMet,
                format!("Existing file on disk meets quality cutoff: {}", profile.cutoff),
            ),
            UpgradeableRejectReason::CustomFormatCutoff => SpecDecision::reject(
                DownloadRejectionReason::DiskCustomFormatCutoffMet,
                format!(
                    "Existing file on disk meets Custom Format cutoff: {}",
                    profile.cutoff_format_score
                ),
            ),
            UpgradeableRejectReason::CustomFormatScore => SpecDecision::reject(
                DownloadRejectionReason::DiskCustomFormatScore,
                format!(
                    "Existing file on disk has a equal or higher Custom Format score: {}",
                    profile.calculate_custom_format_score(&file.custom_formats)
                ),
            ),
            UpgradeableRejectReason::MinCustomFormatScore => SpecDecision::reject(
                DownloadRejectionReason::DiskCustomFormatScoreIncrement,
                format!(
                    "Existing file on disk has Custom Format score within Custom Format score increment: {}",
                    profile.min_upgrade_format_score
                ),
            ),
            UpgradeableRejectReason::UpgradesNotAllowed => SpecDecision::reject(
                DownloadRejectionReason::DiskUpgradesNotAllowed,
                format!(
                    "Existing file on disk and Quality Profile '{}' does not allow upgrades",
                    profile.name
                ),
            ),
        };
        Ok(decision)
    }
}
