// SPDX-License-Identifier: GPL-3.0-or-later
use gamarr_config::{DecisionConfig, ProperDownloadTypes};
use gamarr_domain::RemoteGame;
use tracing::debug;

use super::{DecisionSpecification, DownloadRejectionReason, EvaluationContext, SpecDecision};
use crate::upgradable::UpgradeEvaluator;

/// A repack replaces the existing file of the same quality only when it comes
/// from the release group that produced that file.
pub struct RepackSpecification {
    propers: ProperDownloadTypes,
}

impl RepackSpecification {
    pub fn new(config: &DecisionConfig) -> Self {
        Self {
            propers: config.download_propers_and_repacks,
        }
    }
}

fn is_blank(group: Option<&str>) -> bool {
    group.map(|group| group.trim().is_empty()).unwrap_or(true)
}

impl DecisionSpecification for RepackSpecification {
    fn name(&self) -> &'static str {
        "Repack"
    }

    fn is_satisfied_by(
        &self,
        remote: &RemoteGame,
        _context: &EvaluationContext,
    ) -> anyhow::Result<SpecDecision> {
        let (Some(game), Some(parsed)) = (&remote.game, &remote.parsed) else {
            return Ok(SpecDecision::Accept);
        };
        if !parsed.quality.revision.is_repack {
            return Ok(SpecDecision::Accept);
        }
        let Some(file) = &game.game_file else {
            return Ok(SpecDecision::Accept);
        };

        if self.propers == ProperDownloadTypes::DoNotPrefer {
            debug!(target: "specification", "repacks are not preferred, skipping check");
            return Ok(SpecDecision::Accept);
        }
        if !UpgradeEvaluator::is_revision_upgrade(&file.quality, &parsed.quality) {
            return Ok(SpecDecision::Accept);
        }
        if self.propers == ProperDownloadTypes::DoNotUpgrade {
            debug!(target: "specification", release = %remote.release.title, "repack upgrades disabled");
            return Ok(SpecDecision::reject(
                DownloadRejectionReason::RepackDisabled,
                "Repack downloading is disabled",
            ));
        }

        let file_group = file.release_group.as_deref();
        let release_group = parsed.release_group.as_deref();

        if is_blank(file_group) {
            return Ok(SpecDecision::reject(
                DownloadRejectionReason::RepackUnknownReleaseGroup,
                "Existing file's release group is unknown",
            ));
        }
        if is_blank(release_group) {
            return Ok(SpecDecision::reject(
                DownloadRejectionReason::RepackUnknownReleaseGroup,
                "Release group is unknown",
            ));
        }

        match (file_group, release_group) {
            (Some(existing), Some(release)) if existing.eq_ignore_ascii_case(release) => {
                Ok(SpecDecision::Accept)
            }
            (existing, release) => {
                debug!(
                    target: "specification",
                    existing = existing.unwrap_or_default(),
                    release = release.unwrap_or_default(),
                    "repack release group mismatch"
                );
                Ok(SpecDecision::reject(
                    DownloadRejectionReason::RepackReleaseGroupDoesNotMatch,
                    format!(
                        "Existing file's release group does not match {}",
                        release.unwrap_or_default()
                    ),
                ))
            }
        }
    }
}
