// SPDX-License-Identifier: GPL-3.0-or-later
use gamarr_domain::{Language, RemoteGame};
use tracing::debug;

use super::{
    DecisionSpecification, DownloadRejectionReason, EvaluationContext, SpecDecision,
    SpecificationPriority,
};

/// Release must carry the profile's language. `Original` resolves to the
/// game's original language; a release without detected languages passes.
pub struct LanguageSpecification;

impl DecisionSpecification for LanguageSpecification {
    fn name(&self) -> &'static str {
        "Language"
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

        let wanted = match game.quality_profile.language {
            Language::Any => return Ok(SpecDecision::Accept),
            Language::Original => game.original_language,
            language => language,
        };

        if parsed.languages.is_empty() || parsed.languages.contains(&wanted) {
            return Ok(SpecDecision::Accept);
        }

        debug!(
            target: "specification",
            release = %remote.release.title,
            wanted = %wanted,
            "wanted language missing"
        );
        Ok(SpecDecision::reject(
            DownloadRejectionReason::WantedLanguage,
            format!("Language {wanted} is wanted"),
        ))
    }
}
