// SPDX-License-Identifier: GPL-3.0-or-later
use std::sync::Arc;

use gamarr_domain::RemoteGame;
use gamarr_infrastructure::IndexerReader;
use tracing::{debug, warn};

use super::{
    DecisionSpecification, DownloadRejectionReason, EvaluationContext, RejectionType,
    SpecDecision,
};

/// Requires at least one of the indexer's required flags. A missing or
/// unreadable indexer definition never blocks the release.
pub struct RequiredIndexerFlagsSpecification {
    indexers: Arc<dyn IndexerReader>,
}

impl RequiredIndexerFlagsSpecification {
    pub fn new(indexers: Arc<dyn IndexerReader>) -> Self {
        Self { indexers }
    }
}

impl DecisionSpecification for RequiredIndexerFlagsSpecification {
    fn name(&self) -> &'static str {
        "RequiredIndexerFlags"
    }

    fn rejection_type(&self) -> RejectionType {
        RejectionType::Permanent
    }

    fn is_satisfied_by(
        &self,
        remote: &RemoteGame,
        _context: &EvaluationContext,
    ) -> anyhow::Result<SpecDecision> {
        let Some(indexer_id) = remote.release.indexer_id else {
            return Ok(SpecDecision::Accept);
        };

        let indexer = match self.indexers.indexer(indexer_id) {
            Ok(Some(indexer)) => indexer,
            Ok(None) => return Ok(SpecDecision::Accept),
            Err(err) => {
                warn!(
                    target: "specification",
                    indexer_id = %indexer_id,
                    error = %err,
                    "indexer lookup failed, skipping required flag check"
                );
                return Ok(SpecDecision::Accept);
            }
        };

        if indexer.required_flags.is_empty()
            || indexer
                .required_flags
                .iter()
                .any(|flag| remote.release.indexer_flags.contains(flag))
        {
            return Ok(SpecDecision::Accept);
        }

        let required = indexer
            .required_flags
            .iter()
            .map(|flag| flag.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        debug!(target: "specification", indexer = %indexer.name, %required, "required flags missing");
        Ok(SpecDecision::reject(
            DownloadRejectionReason::RequiredFlags,
            format!("Indexer {} requires one of: {required}", indexer.name),
        ))
    }
}
