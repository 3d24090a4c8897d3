// SPDX-License-Identifier: GPL-3.0-or-later
use std::sync::Arc;

use gamarr_domain::RemoteGame;
use gamarr_infrastructure::BlocklistReader;
use tracing::debug;

use super::{
    DecisionSpecification, DownloadRejectionReason, EvaluationContext, RejectionType,
    SpecDecision, SpecificationPriority,
};

pub struct BlocklistSpecification {
    blocklist: Arc<dyn BlocklistReader>,
}

impl BlocklistSpecification {
    pub fn new(blocklist: Arc<dyn BlocklistReader>) -> Self {
        Self { blocklist }
    }
}

impl DecisionSpecification for BlocklistSpecification {
    fn name(&self) -> &'static str {
        "Blocklist"
    }

    fn priority(&self) -> SpecificationPriority {
        SpecificationPriority::Database
    }

    fn rejection_type(&self) -> RejectionType {
        RejectionType::Permanent
    }

    fn is_satisfied_by(
        &self,
        remote: &RemoteGame,
        _context: &EvaluationContext,
    ) -> anyhow::Result<SpecDecision> {
        let Some(game) = &remote.game else {
            return Ok(SpecDecision::Accept);
        };

        if !self.blocklist.is_blocklisted(game.id, &remote.release)? {
            return Ok(SpecDecision::Accept);
        }

        debug!(target: "specification", game_id = %game.id, release = %remote.release.title, "release blocklisted");
        Ok(SpecDecision::reject(
            DownloadRejectionReason::Blocklisted,
            "Release is blocklisted",
        ))
    }
}
