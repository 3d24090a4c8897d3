// SPDX-License-Identifier: GPL-3.0-or-later
use gamarr_domain::RemoteGame;

use super::{DecisionSpecification, EvaluationContext, SpecDecision, SpecificationPriority};

/// Size gating is disabled for games; kept so size limits can slot in later.
pub struct AcceptableSizeSpecification;

impl DecisionSpecification for AcceptableSizeSpecification {
    fn name(&self) -> &'static str {
        "AcceptableSize"
    }

    fn priority(&self) -> SpecificationPriority {
        SpecificationPriority::Parsing
    }

    fn is_satisfied_by(
        &self,
        _remote: &RemoteGame,
        _context: &EvaluationContext,
    ) -> anyhow::Result<SpecDecision> {
        Ok(SpecDecision::Accept)
    }
}
