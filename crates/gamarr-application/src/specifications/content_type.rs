// SPDX-License-Identifier: GPL-3.0-or-later
use gamarr_domain::{ReleaseContentType, RemoteGame};
use tracing::debug;

use super::{
    DecisionSpecification, DownloadRejectionReason, EvaluationContext, SpecDecision,
    SpecificationPriority,
};

/// Rejects partial content: DLC, updates and season passes on their own.
/// Without parsed info the release cannot be classified and passes.
pub struct ContentTypeSpecification;

impl DecisionSpecification for ContentTypeSpecification {
    fn name(&self) -> &'static str {
        "ContentClassification"
    }

    fn priority(&self) -> SpecificationPriority {
        SpecificationPriority::Parsing
    }

    fn is_satisfied_by(
        &self,
        remote: &RemoteGame,
        _context: &EvaluationContext,
    ) -> anyhow::Result<SpecDecision> {
        let Some(parsed) = &remote.parsed else {
            return Ok(SpecDecision::Accept);
        };

        let reason = match parsed.content_type {
            ReleaseContentType::DlcOnly => DownloadRejectionReason::DlcOnly,
            ReleaseContentType::UpdateOnly => DownloadRejectionReason::UpdateOnly,
            ReleaseContentType::SeasonPass => DownloadRejectionReason::SeasonPassOnly,
            ReleaseContentType::Unknown
            | ReleaseContentType::BaseGame
            | ReleaseContentType::BaseGameWithAllDlc
            | ReleaseContentType::Expansion => return Ok(SpecDecision::Accept),
        };

        debug!(
            target: "specification",
            release = %remote.release.title,
            content = %parsed.content_type,
            "partial content rejected"
        );
        Ok(SpecDecision::reject(reason, parsed.content_type.to_string()))
    }
}
