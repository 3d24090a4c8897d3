// SPDX-License-Identifier: GPL-3.0-or-later
use gamarr_config::{DecisionConfig, ProperDownloadTypes};
use gamarr_domain::RemoteGame;
use tracing::debug;

use super::{
    protocol_preference, DecisionSpecification, DownloadRejectionReason, EvaluationContext,
    SpecDecision,
};
use crate::upgradable::UpgradeEvaluator;

/// Holds back fresh releases for the delay configured on the game's delay
/// profile, so a better release has a chance to show up first.
pub struct DelaySpecification {
    config: DecisionConfig,
}

impl DelaySpecification {
    pub fn new(config: &DecisionConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl DecisionSpecification for DelaySpecification {
    fn name(&self) -> &'static str {
        "Delay"
    }

    fn is_satisfied_by(
        &self,
        remote: &RemoteGame,
        context: &EvaluationContext,
    ) -> anyhow::Result<SpecDecision> {
        if context.is_user_invoked() {
            debug!(target: "specification", "user invoked search, skipping delay");
            return Ok(SpecDecision::Accept);
        }
        let (Some(game), Some(parsed)) = (&remote.game, &remote.parsed) else {
            return Ok(SpecDecision::Accept);
        };
        let Some(protocol) = protocol_preference(remote.release.download_protocol) else {
            return Ok(SpecDecision::Accept);
        };

        let delay_profile = self.config.delay_profile_for_tags(&game.tags);
        let delay = i64::from(delay_profile.delay_minutes(protocol));
        if delay == 0 {
            return Ok(SpecDecision::Accept);
        }
        let preferred = protocol == delay_profile.preferred_protocol;
        let profile = &game.quality_profile;

        if preferred
            && self.config.download_propers_and_repacks == ProperDownloadTypes::PreferAndUpgrade
        {
            if let Some(file) = &game.game_file {
                if UpgradeEvaluator::is_revision_upgrade(&file.quality, &parsed.quality) {
                    debug!(target: "specification", release = %remote.release.title, "proper for existing file, skipping delay");
                    return Ok(SpecDecision::Accept);
                }
            }
        }

        if preferred && delay_profile.bypass_if_highest_quality {
            let best = profile
                .last_allowed_quality()
                .and_then(|quality| profile.rank_of(quality));
            let current = profile.rank_of(parsed.quality.quality);
            if let (Some(best), Some(current)) = (best, current) {
                if current >= best {
                    debug!(target: "specification", release = %remote.release.title, "highest quality in profile, skipping delay");
                    return Ok(SpecDecision::Accept);
                }
            }
        }

        if preferred
            && delay_profile.bypass_if_above_custom_format_score
            && remote.custom_format_score >= delay_profile.minimum_custom_format_score
        {
            debug!(target: "specification", release = %remote.release.title, score = remote.custom_format_score, "custom format score above threshold, skipping delay");
            return Ok(SpecDecision::Accept);
        }

        let age = remote.release.age_minutes(context.now);
        if age < delay {
            debug!(target: "specification", release = %remote.release.title, age, delay, "waiting for delay to expire");
            return Ok(SpecDecision::reject(
                DownloadRejectionReason::MinimumAgeDelay,
                "Waiting for better quality release",
            ));
        }

        Ok(SpecDecision::Accept)
    }
}
