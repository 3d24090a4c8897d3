// SPDX-License-Identifier: GPL-3.0-or-later
use gamarr_domain::RemoteGame;
use tracing::debug;

use super::{DecisionSpecification, DownloadRejectionReason, EvaluationContext, SpecDecision};

pub struct CustomFormatAllowedSpecification;

impl DecisionSpecification for CustomFormatAllowedSpecification {
    fn name(&self) -> &'static str {
        "CustomFormatAllowedByProfile"
    }

    fn is_satisfied_by(
        &self,
        remote: &RemoteGame,
        _context: &EvaluationContext,
    ) -> anyhow::Result<SpecDecision> {
        let Some(game) = &remote.game else {
            return Ok(SpecDecision::Accept);
        };

        let minimum = game.quality_profile.min_format_score;
        let score = remote.custom_format_score;
        if score >= minimum {
            return Ok(SpecDecision::Accept);
        }

        debug!(target: "specification", release = %remote.release.title, score, minimum, "custom format score too low");
        Ok(SpecDecision::reject(
            DownloadRejectionReason::CustomFormatMinimumScore,
            format!("Custom Formats score of {score} is below the profile minimum {minimum}"),
        ))
    }
}
