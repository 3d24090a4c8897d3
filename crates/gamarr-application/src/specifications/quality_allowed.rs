// SPDX-License-Identifier: GPL-3.0-or-later
use gamarr_domain::RemoteGame;
use tracing::debug;

use super::{
    DecisionSpecification, DownloadRejectionReason, EvaluationContext, SpecDecision,
    SpecificationPriority,
};

pub struct QualityAllowedSpecification;

impl DecisionSpecification for QualityAllowedSpecification {
    fn name(&self) -> &'static str {
        "QualityAllowedByProfile"
    }

    fn priority(&self) -> SpecificationPriority {
        SpecificationPriority::Parsing
    }

    fn is_satisfied_by(
        &self,
        remote: &RemoteGame,
        _context: &EvaluationContext,
    ) -> anyhow::Result<SpecDecision> {
        let (Some(game), Some(parsed)) = (&remote.game, &remote.parsed) else {
            return Ok(SpecDecision::Accept);
        };

        let quality = parsed.quality.quality;
        if game.quality_profile.is_allowed(quality) {
            return Ok(SpecDecision::Accept);
        }

        debug!(target: "specification", release = %remote.release.title, %quality, "quality not wanted");
        Ok(SpecDecision::reject(
            DownloadRejectionReason::QualityNotWanted,
            format!("{quality} is not wanted in profile"),
        ))
    }
}
