// SPDX-License-Identifier: GPL-3.0-or-later

//! Independent accept/reject predicates evaluated by the decision pipeline.
//!
//! Each specification looks at one aspect of a candidate release and either
//! accepts it or rejects it with a reason. Specifications never mutate state;
//! the ones that consult history, blocklist, queue or indexers read them
//! through [`SpecificationReaders`], normally backed by one point-in-time
//! snapshot per batch.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use gamarr_config::{DecisionConfig, ProtocolPreference};
use gamarr_domain::{DownloadProtocol, ReleaseSourceType, RemoteGame};
use gamarr_infrastructure::{
    BlocklistReader, HistoryReader, IndexerReader, QueueReader, StateSnapshot,
};

mod acceptable_size;
mod already_imported;
mod blocklist;
mod content_type;
mod custom_format_allowed;
mod delay;
mod history;
mod indexer_tag;
mod language;
mod monitored;
mod platform;
mod proper;
mod quality_allowed;
mod queue;
mod repack;
mod required_indexer_flags;
mod upgrade_disk;


pub use acceptable_size::AcceptableSizeSpecification;
pub use already_imported::AlreadyImportedSpecification;
pub use blocklist::BlocklistSpecification;
pub use content_type::ContentTypeSpecification;
pub use custom_format_allowed::CustomFormatAllowedSpecification;
pub use delay::DelaySpecification;
pub use history::HistorySpecification;
pub use indexer_tag::IndexerTagSpecification;
pub use language::LanguageSpecification;
pub use monitored::MonitoredGameSpecification;
pub use platform::PlatformSpecification;
pub use proper::ProperSpecification;
pub use quality_allowed::QualityAllowedSpecification;
pub use queue::QueueSpecification;
pub use repack::RepackSpecification;
pub use required_indexer_flags::RequiredIndexerFlagsSpecification;
pub use upgrade_disk::UpgradeDiskSpecification;

// ============================================================================
// Ordering & Rejection Types
// ============================================================================

/// Evaluation order. Cheap checks on parsed data run first, database-backed
/// checks next, and comparisons against the file on disk last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpecificationPriority {
    Parsing,
    Database,
    Default,
    Disk,
}

/// A permanent rejection is never retried for the same release identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionType {
    Permanent,
    Temporary,
}

impl std::fmt::Display for RejectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Permanent => write!(f, "permanent"),
            Self::Temporary => write!(f, "temporary"),
        }
    }
}

// ============================================================================
// Rejection Reasons
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DownloadRejectionReason {
    UnknownGame,
    UnableToParse,
    Error,
    DecisionError,
    Blocklisted,
    RequiredFlags,
    GameNotMonitored,
    PlatformNotPreferred,
    WantedLanguage,
    QualityNotWanted,
    CustomFormatMinimumScore,
    DlcOnly,
    UpdateOnly,
    SeasonPassOnly,
    AlreadyImportedSameHash,
    AlreadyImportedSameName,
    HistoryRecentCutoffMet,
    HistoryCdhDisabledCutoffMet,
    HistoryHigherPreference,
    HistoryCdhDisabledHigherPreference,
    QueueCutoffMet,
    QueueHigherPreference,
    QueueUpgradesNotAllowed,
    RepackDisabled,
    RepackUnknownReleaseGroup,
    RepackReleaseGroupDoesNotMatch,
    DiskCutoffMet,
    DiskHigherPreference,
    DiskHigherRevision,
    DiskCustomFormatCutoffMet,
    DiskCustomFormatScore,
    DiskCustomFormatScoreIncrement,
    DiskUpgradesNotAllowed,
    MinimumAgeDelay,
    NoMatchingTag,
    PropersDisabled,
    ProperForOldFile,
}

impl std::fmt::Display for DownloadRejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            Self::UnknownGame => "unknown_game",
            Self::UnableToParse => "unable_to_parse",
            Self::Error => "error",
            Self::DecisionError => "decision_error",
            Self::Blocklisted => "blocklisted",
            Self::RequiredFlags => "required_flags",
            Self::GameNotMonitored => "game_not_monitored",
            Self::PlatformNotPreferred => "platform_not_preferred",
            Self::WantedLanguage => "wanted_language",
            Self::QualityNotWanted => "quality_not_wanted",
            Self::CustomFormatMinimumScore => "custom_format_minimum_score",
            Self::DlcOnly => "dlc_only",
            Self::UpdateOnly => "update_only",
            Self::SeasonPassOnly => "season_pass_only",
            Self::AlreadyImportedSameHash => "already_imported_same_hash",
            Self::AlreadyImportedSameName => "already_imported_same_name",
            Self::HistoryRecentCutoffMet => "history_recent_cutoff_met",
            Self::HistoryCdhDisabledCutoffMet => "history_cdh_disabled_cutoff_met",
            Self::HistoryHigherPreference => "history_higher_preference",
            Self::HistoryCdhDisabledHigherPreference => "history_cdh_disabled_higher_preference",
            Self::QueueCutoffMet => "queue_cutoff_met",
            Self::QueueHigherPreference => "queue_higher_preference",
            Self::QueueUpgradesNotAllowed => "queue_upgrades_not_allowed",
            Self::RepackDisabled => "repack_disabled",
            Self::RepackUnknownReleaseGroup => "repack_unknown_release_group",
            Self::RepackReleaseGroupDoesNotMatch => "repack_release_group_does_not_match",
            Self::DiskCutoffMet => "disk_cutoff_met",
            Self::DiskHigherPreference => "disk_higher_preference",
            Self::DiskHigherRevision => "disk_higher_revision",
            Self::DiskCustomFormatCutoffMet => "disk_custom_format_cutoff_met",
            Self::DiskCustomFormatScore => "disk_custom_format_score",
            Self::DiskCustomFormatScoreIncrement => "disk_custom_format_score_increment",
            Self::DiskUpgradesNotAllowed => "disk_upgrades_not_allowed",
            Self::MinimumAgeDelay => "minimum_age_delay",
            Self::NoMatchingTag => "no_matching_tag",
            Self::PropersDisabled => "propers_disabled",
            Self::ProperForOldFile => "proper_for_old_file",
        };
        write!(f, "{code}")
    }
}

/// Outcome of a single specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecDecision {
    Accept,
    Reject {
        reason: DownloadRejectionReason,
        message: String,
    },
}

impl SpecDecision {
    pub fn reject(reason: DownloadRejectionReason, message: impl Into<String>) -> Self {
        Self::Reject {
            reason,
            message: message.into(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

// ============================================================================
// Evaluation Context
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchCriteria {
    pub user_invoked_search: bool,
    pub interactive_search: bool,
}

/// How a batch of candidates reached the engine, plus the instant the
/// evaluation is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationContext {
    pub search: Option<SearchCriteria>,
    pub pushed_release: bool,
    pub now: DateTime<Utc>,
}

impl EvaluationContext {
    pub fn rss(now: DateTime<Utc>) -> Self {
        Self {
            search: None,
            pushed_release: false,
            now,
        }
    }

    pub fn search(criteria: SearchCriteria, now: DateTime<Utc>) -> Self {
        Self {
            search: Some(criteria),
            pushed_release: false,
            now,
        }
    }

    pub fn pushed(now: DateTime<Utc>) -> Self {
        Self {
            search: None,
            pushed_release: true,
            now,
        }
    }

    pub fn is_search(&self) -> bool {
        self.search.is_some()
    }

    pub fn is_user_invoked(&self) -> bool {
        self.search
            .map(|criteria| criteria.user_invoked_search)
            .unwrap_or(false)
    }

    pub fn release_source(&self) -> ReleaseSourceType {
        match self.search {
            Some(criteria) if criteria.interactive_search => ReleaseSourceType::InteractiveSearch,
            Some(criteria) if criteria.user_invoked_search => ReleaseSourceType::UserInvokedSearch,
            Some(_) => ReleaseSourceType::Search,
            None if self.pushed_release => ReleaseSourceType::ReleasePush,
            None => ReleaseSourceType::Rss,
        }
    }
}

/// Delay profiles only know the two transports a release can use.
pub(crate) fn protocol_preference(protocol: DownloadProtocol) -> Option<ProtocolPreference> {
    match protocol {
        DownloadProtocol::Usenet => Some(ProtocolPreference::Usenet),
        DownloadProtocol::Torrent => Some(ProtocolPreference::Torrent),
        DownloadProtocol::Unknown => None,
    }
}

// ============================================================================
// Specification Trait
// ============================================================================

pub trait DecisionSpecification: Send + Sync {
    fn name(&self) -> &'static str;

    fn priority(&self) -> SpecificationPriority {
        SpecificationPriority::Default
    }

    fn rejection_type(&self) -> RejectionType {
        RejectionType::Temporary
    }

    /// `Err` is reserved for unexpected failures such as an unavailable store;
    /// expected missing data accepts.
    fn is_satisfied_by(
        &self,
        remote: &RemoteGame,
        context: &EvaluationContext,
    ) -> anyhow::Result<SpecDecision>;
}

/// Read-only collaborators shared by the database-backed specifications.
#[derive(Clone)]
pub struct SpecificationReaders {
    pub history: Arc<dyn HistoryReader>,
    pub blocklist: Arc<dyn BlocklistReader>,
    pub queue: Arc<dyn QueueReader>,
    pub indexers: Arc<dyn IndexerReader>,
}

impl SpecificationReaders {
    pub fn from_snapshot(snapshot: Arc<StateSnapshot>) -> Self {
        Self {
            history: snapshot.clone(),
            blocklist: snapshot.clone(),
            queue: snapshot.clone(),
            indexers: snapshot,
        }
    }
}

/// The full specification set in registration order. The pipeline sorts it
/// by priority.
pub fn default_specifications(
    config: &DecisionConfig,
    readers: &SpecificationReaders,
) -> Vec<Arc<dyn DecisionSpecification>> {
    vec![
        Arc::new(MonitoredGameSpecification),
        Arc::new(PlatformSpecification),
        Arc::new(LanguageSpecification),
        Arc::new(QualityAllowedSpecification),
        Arc::new(ContentTypeSpecification),
        Arc::new(AcceptableSizeSpecification),
        Arc::new(BlocklistSpecification::new(readers.blocklist.clone())),
        Arc::new(RequiredIndexerFlagsSpecification::new(
            readers.indexers.clone(),
        )),
        Arc::new(IndexerTagSpecification::new(readers.indexers.clone())),
        Arc::new(AlreadyImportedSpecification::new(
            config,
            readers.history.clone(),
        )),
        Arc::new(HistorySpecification::new(config, readers.history.clone())),
        Arc::new(QueueSpecification::new(config, readers.queue.clone())),
        Arc::new(CustomFormatAllowedSpecification),
        Arc::new(RepackSpecification::new(config)),
        Arc::new(DelaySpecification::new(config)),
        Arc::new(ProperSpecification::new(config)),
        Arc::new(UpgradeDiskSpecification::new(config)),
    ]
}
