// SPDX-License-Identifier: GPL-3.0-or-later

//! Fail-fast evaluation of candidate releases against the specification set.

use std::sync::Arc;

use gamarr_config::DecisionConfig;
use gamarr_domain::RemoteGame;
use tracing::{debug, warn};

use crate::specifications::{
    default_specifications, DecisionSpecification, DownloadRejectionReason, EvaluationContext,
    RejectionType, SpecDecision, SpecificationPriority, SpecificationReaders,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRejection {
    pub reason: DownloadRejectionReason,
    pub message: String,
    pub rejection_type: RejectionType,
    pub priority: SpecificationPriority,
    /// Name of the rejecting specification; `None` for pipeline-level rejections.
    pub specification: Option<&'static str>,
}

impl std::fmt::Display for DownloadRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.rejection_type, self.message)
    }
}

/// Final verdict for one candidate.
#[derive(Debug, Clone)]
pub struct DownloadDecision {
    pub remote_game: RemoteGame,
    pub rejection: Option<DownloadRejection>,
}

impl DownloadDecision {
    pub fn approved(remote_game: RemoteGame) -> Self {
        Self {
            remote_game,
            rejection: None,
        }
    }

    pub fn rejected(remote_game: RemoteGame, rejection: DownloadRejection) -> Self {
        Self {
            remote_game,
            rejection: Some(rejection),
        }
    }

    /// Unexpected failure while processing the candidate.
    pub fn error(remote_game: RemoteGame) -> Self {
        Self::rejected(
            remote_game,
            DownloadRejection {
                reason: DownloadRejectionReason::Error,
                message: "Unexpected error processing release".into(),
                rejection_type: RejectionType::Temporary,
                priority: SpecificationPriority::Default,
                specification: None,
            },
        )
    }

    pub fn is_approved(&self) -> bool {
        self.rejection.is_none()
    }

    pub fn is_temporarily_rejected(&self) -> bool {
        matches!(
            &self.rejection,
            Some(rejection) if rejection.rejection_type == RejectionType::Temporary
        )
    }

    pub fn is_permanently_rejected(&self) -> bool {
        matches!(
            &self.rejection,
            Some(rejection) if rejection.rejection_type == RejectionType::Permanent
        )
    }
}

/// Runs the specification set in priority order and stops at the first rejection.
#[derive(Clone)]
pub struct DecisionMaker {
    specifications: Vec<Arc<dyn DecisionSpecification>>,
}

impl DecisionMaker {
    pub fn new(mut specifications: Vec<Arc<dyn DecisionSpecification>>) -> Self {
        specifications.sort_by_key(|spec| spec.priority());
        Self { specifications }
    }

    pub fn with_default_specifications(
        config: &DecisionConfig,
        readers: &SpecificationReaders,
    ) -> Self {
        Self::new(default_specifications(config, readers))
    }

    pub fn specification_names(&self) -> Vec<&'static str> {
        self.specifications.iter().map(|spec| spec.name()).collect()
    }

    pub fn evaluate(&self, mut remote: RemoteGame, context: &EvaluationContext) -> DownloadDecision {
        remote.release_source = context.release_source();

        let Some(game_id) = remote.game.as_ref().map(|game| game.id) else {
            let message = if context.pushed_release {
                "Unknown Game. Unable to match to existing game in Library using release title."
            } else {
                "Unknown Game. Unable to match to correct game using release title."
            };
            debug!(target: "decision", release = %remote.release.title, "unknown game");
            return DownloadDecision::rejected(
                remote,
                pipeline_rejection(DownloadRejectionReason::UnknownGame, message, RejectionType::Permanent),
            );
        };

        if remote.parsed.is_none() {
            debug!(target: "decision", release = %remote.release.title, "unable to parse release");
            return DownloadDecision::rejected(
                remote,
                pipeline_rejection(
                    DownloadRejectionReason::UnableToParse,
                    "Unable to parse release",
                    RejectionType::Permanent,
                ),
            );
        }

        for spec in &self.specifications {
            let rejection = match spec.is_satisfied_by(&remote, context) {
                Ok(SpecDecision::Accept) => continue,
                Ok(SpecDecision::Reject { reason, message }) => DownloadRejection {
                    reason,
                    message,
                    rejection_type: spec.rejection_type(),
                    priority: spec.priority(),
                    specification: Some(spec.name()),
                },
                Err(err) => {
                    warn!(
                        target: "decision",
                        specification = spec.name(),
                        release = %remote.release.title,
                        error = %err,
                        "couldn't evaluate decision"
                    );
                    DownloadRejection {
                        reason: DownloadRejectionReason::DecisionError,
                        message: format!("{}: {}", spec.name(), err),
                        rejection_type: RejectionType::Temporary,
                        priority: spec.priority(),
                        specification: Some(spec.name()),
                    }
                }
            };

            debug!(
                target: "decision",
                game_id = %game_id,
                release = %remote.release.title,
                specification = spec.name(),
                reason = ?rejection.reason,
                "release rejected"
            );
            return DownloadDecision::rejected(remote, rejection);
        }

        debug!(
            target: "decision",
            game_id = %game_id,
            release = %remote.release.title,
            source = %remote.release_source,
            "release accepted"
        );
        DownloadDecision::approved(remote)
    }

    pub fn evaluate_all(
        &self,
        candidates: Vec<RemoteGame>,
        context: &EvaluationContext,
    ) -> Vec<DownloadDecision> {
        candidates
            .into_iter()
            .map(|remote| self.evaluate(remote, context))
            .collect()
    }
}

fn pipeline_rejection(
    reason: DownloadRejectionReason,
    message: &str,
    rejection_type: RejectionType,
) -> DownloadRejection {
    DownloadRejection {
        reason,
        message: message.to_string(),
        rejection_type,
        priority: SpecificationPriority::Parsing,
        specification: None,
    }
}
