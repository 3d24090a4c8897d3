// SPDX-License-Identifier: GPL-3.0-or-later
use std::sync::Arc;

use gamarr_config::DecisionConfig;
use gamarr_domain::{HistoryEventType, RemoteGame};
use gamarr_infrastructure::HistoryReader;
use tracing::debug;

use super::{
    DecisionSpecification, DownloadRejectionReason, EvaluationContext, RejectionType,
    SpecDecision, SpecificationPriority,
};

/// Guards against grabbing a release again after it was already grabbed and
/// imported under a different quality than it was grabbed as.
pub struct AlreadyImportedSpecification {
    completed_download_handling: bool,
    history: Arc<dyn HistoryReader>,
}

impl AlreadyImportedSpecification {
    pub fn new(config: &DecisionConfig, history: Arc<dyn HistoryReader>) -> Self {
        Self {
            completed_download_handling: config.enable_completed_download_handling,
            history,
        }
    }
}

impl DecisionSpecification for AlreadyImportedSpecification {
    fn name(&self) -> &'static str {
        "AlreadyImported"
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
        if !self.completed_download_handling {
            return Ok(SpecDecision::Accept);
        }
        let Some(game) = &remote.game else {
            return Ok(SpecDecision::Accept);
        };
        if game.game_file.is_none() {
            return Ok(SpecDecision::Accept);
        }

        let history = self.history.history_for_game(game.id)?;
        let Some(grabbed) = history
            .iter()
            .find(|entry| entry.event_type == HistoryEventType::Grabbed)
        else {
            return Ok(SpecDecision::Accept);
        };
        let Some(download_id) = grabbed.download_id.as_deref() else {
            return Ok(SpecDecision::Accept);
        };

        let imported = history.iter().find(|entry| {
            entry.event_type == HistoryEventType::DownloadFolderImported
                && entry
                    .download_id
                    .as_deref()
                    .map(|id| id.eq_ignore_ascii_case(download_id))
                    .unwrap_or(false)
        });
        let Some(imported) = imported else {
            return Ok(SpecDecision::Accept);
        };

        // Same quality on both sides means the import went as expected.
        if imported.quality == grabbed.quality {
            return Ok(SpecDecision::Accept);
        }

        if remote
            .release
            .download_identity()
            .map(|identity| identity.eq_ignore_ascii_case(download_id))
            .unwrap_or(false)
        {
            debug!(target: "specification", game_id = %game.id, %download_id, "same hash already imported");
            return Ok(SpecDecision::reject(
                DownloadRejectionReason::AlreadyImportedSameHash,
                "Has same torrent hash as a grabbed and imported release",
            ));
        }

        if grabbed.source_title == remote.release.title {
            debug!(target: "specification", game_id = %game.id, release = %remote.release.title, "same name already imported");
            return Ok(SpecDecision::reject(
                DownloadRejectionReason::AlreadyImportedSameName,
                "Has same release name as a grabbed and imported release",
            ));
        }

        Ok(SpecDecision::Accept)
    }
}
