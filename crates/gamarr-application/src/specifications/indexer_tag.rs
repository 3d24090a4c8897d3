// SPDX-License-Identifier: GPL-3.0-or-later
use std::sync::Arc;

use gamarr_domain::RemoteGame;
use gamarr_infrastructure::IndexerReader;
use tracing::{debug, warn};

use super::{
    DecisionSpecification, DownloadRejectionReason, EvaluationContext, RejectionType,
    SpecDecision, SpecificationPriority,
};

/// A tagged indexer only serves games sharing one of its tags.
pub struct IndexerTagSpecification {
    indexers: Arc<dyn IndexerReader>,
}

impl IndexerTagSpecification {
    pub fn new(indexers: Arc<dyn IndexerReader>) -> Self {
        Self { indexers }
    }
}

impl DecisionSpecification for IndexerTagSpecification {
    fn name(&self) -> &'static str {
        "IndexerTag"
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
        let (Some(game), Some(indexer_id)) = (&remote.game, remote.release.indexer_id) else {
            return Ok(SpecDecision::Accept);
        };

        let indexer = match self.indexers.indexer(indexer_id) {
            Ok(Some(indexer)) => indexer,
            Ok(None) => return Ok(SpecDecision::Accept),
            Err(err) => {
                warn!(target: "specification", indexer_id = %indexer_id, error = %err, "indexer lookup failed");
                return Ok(SpecDecision::Accept);
            }
        };

        if indexer.tags.is_empty() || indexer.tags.iter().any(|tag| game.tags.contains(tag)) {
            return Ok(SpecDecision::Accept);
        }

        debug!(target: "specification", game_id = %game.id, indexer = %indexer.name, "no matching tag");
        Ok(SpecDecision::reject(
            DownloadRejectionReason::NoMatchingTag,
            "Game tags do not match any of the indexer tags",
        ))
    }
}
