// SPDX-License-Identifier: GPL-3.0-or-later
use gamarr_domain::RemoteGame;
use tracing::debug;

use super::{
    DecisionSpecification, DownloadRejectionReason, EvaluationContext, SpecDecision,
    SpecificationPriority,
};

/// Unmonitored games only download through a user-invoked search.
pub struct MonitoredGameSpecification;

impl DecisionSpecification for MonitoredGameSpecification {
    fn name(&self) -> &'static str {
        "MonitoredGame"
    }

    fn priority(&self) -> SpecificationPriority {
        SpecificationPriority::Parsing
    }

    fn is_satisfied_by(
        &self,
        remote: &RemoteGame,
        context: &EvaluationContext,
    ) -> anyhow::Result<SpecDecision> {
        let Some(game) = &remote.game else {
            return Ok(SpecDecision::Accept);
        };

        if game.monitored || context.is_user_invoked() {
            return Ok(SpecDecision::Accept);
        }

        debug!(target: "specification", game_id = %game.id, "game is not monitored");
        Ok(SpecDecision::reject(
            DownloadRejectionReason::GameNotMonitored,
            "Game is not monitored",
        ))
    }
}
