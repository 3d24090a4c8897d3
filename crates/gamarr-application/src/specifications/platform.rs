// SPDX-License-Identifier: GPL-3.0-or-later
use gamarr_domain::{PlatformFamily, RemoteGame};
use tracing::debug;

use super::{
    DecisionSpecification, DownloadRejectionReason, EvaluationContext, SpecDecision,
    SpecificationPriority,
};

pub struct PlatformSpecification;

impl DecisionSpecification for PlatformSpecification {
    fn name(&self) -> &'static str {
        "Platform"
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

        let preferred = &game.quality_profile.preferred_platforms;
        if preferred.is_empty()
            || parsed.platform == PlatformFamily::Unknown
            || preferred.contains(&parsed.platform)
        {
            return Ok(SpecDecision::Accept);
        }

        debug!(
            target: "specification",
            release = %remote.release.title,
            platform = %parsed.platform,
            "platform not preferred"
        );
        Ok(SpecDecision::reject(
            DownloadRejectionReason::PlatformNotPreferred,
            format!("{} is not a preferred platform", parsed.platform),
        ))
    }
}
