// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::Path;

use anyhow::{ensure, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

/// Global propers/repacks preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProperDownloadTypes {
    #[default]
    PreferAndUpgrade,
    DoNotUpgrade,
    DoNotPrefer,
}

impl std::fmt::Display for ProperDownloadTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PreferAndUpgrade => write!(f, "prefer_and_upgrade"),
            Self::DoNotUpgrade => write!(f, "do_not_upgrade"),
            Self::DoNotPrefer => write!(f, "do_not_prefer"),
        }
    }
}

/// How an incumbent whose format score sits exactly on the profile's
/// cutoff format score is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FormatCeilingPolicy {
    /// Equality means the ceiling is reached; no further format climbing.
    #[default]
    MetAtCeiling,
    /// Equality still leaves room to climb.
    ClimbAtCeiling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolPreference {
    #[default]
    Usenet,
    Torrent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayProfileConfig {
    pub order: i32,
    pub tags: Vec<u32>,
    pub preferred_protocol: ProtocolPreference,
    pub usenet_delay_minutes: u32,
    pub torrent_delay_minutes: u32,
    pub bypass_if_highest_quality: bool,
    pub bypass_if_above_custom_format_score: bool,
    pub minimum_custom_format_score: i32,
}

impl Default for DelayProfileConfig {
    fn default() -> Self {
        Self {
            order: i32::MAX,
            tags: Vec::new(),
            preferred_protocol: ProtocolPreference::Usenet,
            usenet_delay_minutes: 0,
            torrent_delay_minutes: 0,
            bypass_if_highest_quality: false,
            bypass_if_above_custom_format_score: false,
            minimum_custom_format_score: 0,
        }
    }
}

impl DelayProfileConfig {
    pub fn delay_minutes(&self, protocol: ProtocolPreference) -> u32 {
        match protocol {
            ProtocolPreference::Usenet => self.usenet_delay_minutes,
            ProtocolPreference::Torrent => self.torrent_delay_minutes,
        }
    }
}

/// Upper bound for `history_recency_hours` (100 years).
pub const MAX_HISTORY_RECENCY_HOURS: i64 = 24 * 365 * 100;
/// Upper bound for `proper_max_file_age_days` (100 years).
pub const MAX_PROPER_FILE_AGE_DAYS: i64 = 365 * 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionConfig {
    pub download_propers_and_repacks: ProperDownloadTypes,
    pub enable_completed_download_handling: bool,
    pub prefer_indexer_flags: bool,
    pub format_ceiling_policy: FormatCeilingPolicy,
    pub history_recency_hours: i64,
    pub proper_max_file_age_days: i64,
    pub max_concurrent_evaluations: usize,
    pub evaluation_timeout_ms: u64,
    pub delay_profiles: Vec<DelayProfileConfig>,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            download_propers_and_repacks: ProperDownloadTypes::PreferAndUpgrade,
            enable_completed_download_handling: true,
            prefer_indexer_flags: false,
            format_ceiling_policy: FormatCeilingPolicy::MetAtCeiling,
            history_recency_hours: 12,
            proper_max_file_age_days: 7,
            max_concurrent_evaluations: 8,
            evaluation_timeout_ms: 5_000,
            delay_profiles: Vec::new(),
        }
    }
}

impl DecisionConfig {
    /// Rejects windows and batch bounds the engine cannot honour.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=MAX_HISTORY_RECENCY_HOURS).contains(&self.history_recency_hours),
            "decision.history_recency_hours must be between 1 and {MAX_HISTORY_RECENCY_HOURS}, got {}",
            self.history_recency_hours
        );
        ensure!(
            (1..=MAX_PROPER_FILE_AGE_DAYS).contains(&self.proper_max_file_age_days),
            "decision.proper_max_file_age_days must be between 1 and {MAX_PROPER_FILE_AGE_DAYS}, got {}",
            self.proper_max_file_age_days
        );
        ensure!(
            self.max_concurrent_evaluations > 0,
            "decision.max_concurrent_evaluations must be at least 1"
        );
        ensure!(
            self.evaluation_timeout_ms > 0,
            "decision.evaluation_timeout_ms must be at least 1"
        );
        Ok(())
    }

    /// Delay profile for a tag set: the lowest-ordered tagged profile sharing a
    /// tag with `tags`, else the untagged default, else an implicit zero-delay profile.
    pub fn delay_profile_for_tags(&self, tags: &[u32]) -> DelayProfileConfig {
        let mut profiles: Vec<&DelayProfileConfig> = self.delay_profiles.iter().collect();
        profiles.sort_by_key(|profile| profile.order);

        profiles
            .iter()
            .find(|profile| {
                !profile.tags.is_empty() && profile.tags.iter().any(|tag| tags.contains(tag))
            })
            .or_else(|| profiles.iter().find(|profile| profile.tags.is_empty()))
            .map(|profile| (*profile).clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub telemetry: TelemetryConfig,
    pub decision: DecisionConfig,
}

/// Load configuration from defaults, optional TOML file, and environment overrides (prefix: GAMARR_).
pub fn load(config_path: Option<&Path>) -> Result<AppConfig> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("GAMARR_").split("__"));

    let config: AppConfig = figment.extract()?;
    config.decision.validate()?;
    info!(
        target: "config",
        propers = %config.decision.download_propers_and_repacks,
        delay_profiles = config.decision.delay_profiles.len(),
        "configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_decision_engine_expectations() {
        let config = AppConfig::default();
        assert_eq!(
            config.decision.download_propers_and_repacks,
            ProperDownloadTypes::PreferAndUpgrade
        );
        assert!(config.decision.enable_completed_download_handling);
        assert_eq!(config.decision.history_recency_hours, 12);
        assert_eq!(config.decision.proper_max_file_age_days, 7);
        assert_eq!(
            config.decision.format_ceiling_policy,
            FormatCeilingPolicy::MetAtCeiling
        );
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file should be created");
        writeln!(
            file,
            r#"
[decision]
download_propers_and_repacks = "do_not_prefer"
prefer_indexer_flags = true
format_ceiling_policy = "climb_at_ceiling"

[[decision.delay_profiles]]
order = 1
tags = [7]
preferred_protocol = "torrent"
usenet_delay_minutes = 60
torrent_delay_minutes = 0
bypass_if_highest_quality = true
bypass_if_above_custom_format_score = false
minimum_custom_format_score = 0
"#
        )
        .expect("config should be written");

        let config = load(Some(file.path())).expect("config should load");
        assert_eq!(
            config.decision.download_propers_and_repacks,
            ProperDownloadTypes::DoNotPrefer
        );
        assert!(config.decision.prefer_indexer_flags);
        assert_eq!(
            config.decision.format_ceiling_policy,
            FormatCeilingPolicy::ClimbAtCeiling
        );
        assert_eq!(config.decision.delay_profiles.len(), 1);
        assert_eq!(
            config.decision.delay_profiles[0].preferred_protocol,
            ProtocolPreference::Torrent
        );
        // untouched sections keep their defaults
        assert_eq!(config.decision.history_recency_hours, 12);
    }

    #[test]
    fn defaults_pass_validation() {
        assert!(DecisionConfig::default().validate().is_ok());
    }

    #[test]
    fn out_of_range_windows_fail_validation() {
        let oversized = DecisionConfig {
            history_recency_hours: 10_000_000_000_000,
            ..DecisionConfig::default()
        };
        let error = oversized.validate().expect_err("oversized recency should be rejected");
        assert!(error.to_string().contains("history_recency_hours"));

        let negative = DecisionConfig {
            proper_max_file_age_days: -1,
            ..DecisionConfig::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn zero_batch_bounds_fail_validation() {
        let no_workers = DecisionConfig {
            max_concurrent_evaluations: 0,
            ..DecisionConfig::default()
        };
        assert!(no_workers.validate().is_err());

        let no_time = DecisionConfig {
            evaluation_timeout_ms: 0,
            ..DecisionConfig::default()
        };
        assert!(no_time.validate().is_err());
    }

    #[test]
    fn load_rejects_invalid_decision_settings() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file should be created");
        writeln!(
            file,
            r#"
[decision]
history_recency_hours = 10000000000000
"#
        )
        .expect("config should be written");

        let error = load(Some(file.path())).expect_err("invalid config should not load");
        assert!(error.to_string().contains("history_recency_hours"));
    }

    #[test]
    fn delay_profile_lookup_prefers_matching_tags() {
        let tagged = DelayProfileConfig {
            order: 1,
            tags: vec![3],
            preferred_protocol: ProtocolPreference::Torrent,
            torrent_delay_minutes: 30,
            ..DelayProfileConfig::default()
        };
        let fallback = DelayProfileConfig {
            order: 99,
            usenet_delay_minutes: 120,
            ..DelayProfileConfig::default()
        };
        let config = DecisionConfig {
            delay_profiles: vec![fallback, tagged],
            ..DecisionConfig::default()
        };

        let matched = config.delay_profile_for_tags(&[3, 9]);
        assert_eq!(matched.preferred_protocol, ProtocolPreference::Torrent);
        assert_eq!(matched.delay_minutes(ProtocolPreference::Torrent), 30);

        let unmatched = config.delay_profile_for_tags(&[42]);
        assert_eq!(unmatched.delay_minutes(ProtocolPreference::Usenet), 120);
    }

    #[test]
    fn delay_profile_lookup_without_profiles_is_zero_delay() {
        let profile = DecisionConfig::default().delay_profile_for_tags(&[1]);
        assert_eq!(profile.preferred_protocol, ProtocolPreference::Usenet);
        assert_eq!(profile.delay_minutes(ProtocolPreference::Usenet), 0);
        assert_eq!(profile.delay_minutes(ProtocolPreference::Torrent), 0);
    }
}
