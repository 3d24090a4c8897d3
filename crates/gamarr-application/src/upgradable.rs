// SPDX-License-Identifier: GPL-3.0-or-later

//! Decides whether a candidate release is strictly better than what the
//! library already holds (on disk, queued, or recently grabbed).
//!
//! The decision is made in two layers:
//! 1. A base comparison of quality rank, revision and custom-format score,
//!    bounded by the profile's quality cutoff and format ceiling.
//! 2. An independent override: a strictly newer semantic game version is
//!    always an upgrade, unless the profile is locked.
//!
//! A locked profile (`upgrade_allowed == false`) never upgrades.

use std::cmp::Ordering;

use gamarr_config::{DecisionConfig, FormatCeilingPolicy, ProperDownloadTypes};
use gamarr_domain::{
    CustomFormat, GameFile, GameHistory, GameVersion, QualityModel, QualityProfile, QueueItem,
    RemoteGame,
};
use tracing::trace;

/// One side of an upgrade comparison.
#[derive(Debug, Clone, Copy)]
pub struct UpgradeInput<'a> {
    pub quality: &'a QualityModel,
    pub custom_formats: &'a [CustomFormat],
    pub game_version: Option<&'a GameVersion>,
}

impl<'a> UpgradeInput<'a> {
    pub fn new(
        quality: &'a QualityModel,
        custom_formats: &'a [CustomFormat],
        game_version: Option<&'a GameVersion>,
    ) -> Self {
        Self {
            quality,
            custom_formats,
            game_version,
        }
    }

    pub fn from_file(file: &'a GameFile) -> Self {
        Self::new(
            &file.quality,
            &file.custom_formats,
            file.game_version.as_ref(),
        )
    }

    pub fn from_queue(item: &'a QueueItem) -> Self {
        Self::new(
            &item.quality,
            &item.custom_formats,
            item.game_version.as_ref(),
        )
    }

    pub fn from_history(entry: &'a GameHistory) -> Self {
        Self::new(
            &entry.quality,
            &entry.custom_formats,
            entry.game_version.as_ref(),
        )
    }

    /// `None` when the candidate has no parsed info.
    pub fn from_remote(remote: &'a RemoteGame) -> Option<Self> {
        let parsed = remote.parsed.as_ref()?;
        Some(Self::new(
            &parsed.quality,
            &remote.custom_formats,
            parsed.game_version.as_ref(),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeKind {
    BetterQuality,
    BetterRevision,
    BetterFormatScore,
    NewerVersion,
}

/// Why a candidate is not an upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeableRejectReason {
    UpgradesNotAllowed,
    /// The incumbent has the better quality.
    BetterQuality,
    /// Same standing, but the incumbent has the better revision.
    BetterRevision,
    /// Candidate quality is higher but the incumbent already meets the cutoff.
    QualityCutoff,
    CustomFormatCutoff,
    CustomFormatScore,
    MinCustomFormatScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeOutcome {
    Upgrade(UpgradeKind),
    NotUpgrade(UpgradeableRejectReason),
}

impl UpgradeOutcome {
    pub fn is_upgrade(self) -> bool {
        matches!(self, Self::Upgrade(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeEvaluator {
    propers: ProperDownloadTypes,
    ceiling: FormatCeilingPolicy,
}

impl Default for UpgradeEvaluator {
    fn default() -> Self {
        Self::new(ProperDownloadTypes::default(), FormatCeilingPolicy::default())
    }
}

impl UpgradeEvaluator {
    pub fn new(propers: ProperDownloadTypes, ceiling: FormatCeilingPolicy) -> Self {
        Self { propers, ceiling }
    }

    pub fn from_config(config: &DecisionConfig) -> Self {
        Self::new(
            config.download_propers_and_repacks,
            config.format_ceiling_policy,
        )
    }

    pub fn propers(&self) -> ProperDownloadTypes {
        self.propers
    }

    pub fn is_upgrade(
        &self,
        profile: &QualityProfile,
        incumbent: &UpgradeInput<'_>,
        candidate: &UpgradeInput<'_>,
    ) -> bool {
        self.evaluate(profile, incumbent, candidate).is_upgrade()
    }

    pub fn evaluate(
        &self,
        profile: &QualityProfile,
        incumbent: &UpgradeInput<'_>,
        candidate: &UpgradeInput<'_>,
    ) -> UpgradeOutcome {
        if !profile.upgrade_allowed {
            return UpgradeOutcome::NotUpgrade(UpgradeableRejectReason::UpgradesNotAllowed);
        }

        let outcome = match self.compare(profile, incumbent, candidate) {
            UpgradeOutcome::NotUpgrade(_)
                if Self::is_version_upgrade(incumbent.game_version, candidate.game_version) =>
            {
                UpgradeOutcome::Upgrade(UpgradeKind::NewerVersion)
            }
            outcome => outcome,
        };

        trace!(
            target: "upgrade",
            incumbent = %incumbent.quality,
            candidate = %candidate.quality,
            outcome = ?outcome,
            "upgrade evaluated"
        );
        outcome
    }

    fn compare(
        &self,
        profile: &QualityProfile,
        incumbent: &UpgradeInput<'_>,
        candidate: &UpgradeInput<'_>,
    ) -> UpgradeOutcome {
        use UpgradeOutcome::{NotUpgrade, Upgrade};

        let quality_cutoff_met = Self::quality_cutoff_met(profile, incumbent.quality);
        let incumbent_score = profile.calculate_custom_format_score(incumbent.custom_formats);
        let candidate_score = profile.calculate_custom_format_score(candidate.custom_formats);

        let revision = candidate.quality.revision.cmp(&incumbent.quality.revision);
        let revision_gain =
            self.propers == ProperDownloadTypes::PreferAndUpgrade && revision == Ordering::Greater;
        let revision_loss =
            self.propers != ProperDownloadTypes::DoNotPrefer && revision == Ordering::Less;
        let format_gain = self.format_gain(profile, incumbent_score, candidate_score);

        match rank(profile, candidate.quality).cmp(&rank(profile, incumbent.quality)) {
            Ordering::Greater => {
                if !quality_cutoff_met {
                    Upgrade(UpgradeKind::BetterQuality)
                } else if revision_gain {
                    Upgrade(UpgradeKind::BetterRevision)
                } else if format_gain.is_ok() {
                    Upgrade(UpgradeKind::BetterFormatScore)
                } else {
                    NotUpgrade(UpgradeableRejectReason::QualityCutoff)
                }
            }
            Ordering::Equal => {
                if revision_loss {
                    NotUpgrade(UpgradeableRejectReason::BetterRevision)
                } else if revision_gain {
                    Upgrade(UpgradeKind::BetterRevision)
                } else {
                    match format_gain {
                        Ok(()) => Upgrade(UpgradeKind::BetterFormatScore),
                        Err(reason) => NotUpgrade(reason),
                    }
                }
            }
            Ordering::Less => {
                // Lower quality may only win past the quality cutoff, by carrying
                // a format score above the profile ceiling the incumbent has not reached.
                if quality_cutoff_met
                    && !revision_loss
                    && candidate_score > profile.cutoff_format_score
                    && format_gain.is_ok()
                {
                    Upgrade(UpgradeKind::BetterFormatScore)
                } else {
                    NotUpgrade(UpgradeableRejectReason::BetterQuality)
                }
            }
        }
    }

    fn format_gain(
        &self,
        profile: &QualityProfile,
        incumbent_score: i32,
        candidate_score: i32,
    ) -> Result<(), UpgradeableRejectReason> {
        if self.format_cutoff_met(profile, incumbent_score) {
            return Err(UpgradeableRejectReason::CustomFormatCutoff);
        }
        if candidate_score <= incumbent_score {
            return Err(UpgradeableRejectReason::CustomFormatScore);
        }
        if candidate_score.saturating_sub(incumbent_score) < profile.min_upgrade_format_score {
            return Err(UpgradeableRejectReason::MinCustomFormatScore);
        }
        Ok(())
    }

    /// Incumbent rank is at or above the profile's cutoff rank.
    pub fn quality_cutoff_met(profile: &QualityProfile, quality: &QualityModel) -> bool {
        match (profile.cutoff_index(), profile.rank_of(quality.quality)) {
            (Some(cutoff), Some(current)) => current >= cutoff,
            _ => false,
        }
    }

    pub fn format_cutoff_met(&self, profile: &QualityProfile, score: i32) -> bool {
        match self.ceiling {
            FormatCeilingPolicy::MetAtCeiling => score >= profile.cutoff_format_score,
            FormatCeilingPolicy::ClimbAtCeiling => score > profile.cutoff_format_score,
        }
    }

    /// True while the incumbent still leaves room for improvement: below the
    /// quality cutoff, below the format ceiling, or beaten by a proper of the
    /// same quality.
    pub fn cutoff_not_met(
        &self,
        profile: &QualityProfile,
        incumbent: &UpgradeInput<'_>,
        candidate_quality: Option<&QualityModel>,
    ) -> bool {
        if !Self::quality_cutoff_met(profile, incumbent.quality) {
            return true;
        }

        let incumbent_score = profile.calculate_custom_format_score(incumbent.custom_formats);
        if !self.format_cutoff_met(profile, incumbent_score) {
            return true;
        }

        self.propers != ProperDownloadTypes::DoNotPrefer
            && candidate_quality
                .map(|candidate| Self::is_revision_upgrade(incumbent.quality, candidate))
                .unwrap_or(false)
    }

    pub fn is_revision_upgrade(incumbent: &QualityModel, candidate: &QualityModel) -> bool {
        incumbent.quality == candidate.quality && candidate.revision > incumbent.revision
    }

    pub fn is_version_upgrade(
        incumbent: Option<&GameVersion>,
        candidate: Option<&GameVersion>,
    ) -> bool {
        GameVersion::is_upgrade(incumbent, candidate)
    }
}

fn rank(profile: &QualityProfile, quality: &QualityModel) -> i64 {
    profile
        .rank_of(quality.quality)
        .map(|index| index as i64)
        .unwrap_or(-1)
}
