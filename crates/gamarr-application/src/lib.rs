// SPDX-License-Identifier: GPL-3.0-or-later
use gamarr_config::AppConfig;
pub mod decision_maker;
pub mod decision_service;
pub mod events;
pub mod prioritization;
pub mod specifications;
pub mod upgradable;

#[cfg(test)]
mod prioritization_tests;
#[cfg(test)]
pub(crate) mod test_support;

pub use decision_maker::{DecisionMaker, DownloadDecision, DownloadRejection};
pub use decision_service::{DecisionService, DecisionServiceError, DecisionServiceResult};
pub use events::{publish_decisions, EventPublisher, InMemoryEventBus};
pub use prioritization::{DownloadDecisionComparer, RankKey};
pub use specifications::{
    DecisionSpecification, DownloadRejectionReason, EvaluationContext, RejectionType,
    SearchCriteria, SpecDecision, SpecificationPriority, SpecificationReaders,
};
pub use upgradable::{UpgradeEvaluator, UpgradeInput, UpgradeOutcome, UpgradeableRejectReason};

use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn on_start(&self) {
        info!(
            target: "application",
            propers = %self.config.decision.download_propers_and_repacks,
            delay_profiles = self.config.decision.delay_profiles.len(),
            "application state initialized"
        );
    }
}
