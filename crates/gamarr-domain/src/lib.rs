// SPDX-License-Identifier: GPL-3.0-or-later
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod quality;

pub use quality::{GameVersion, GameVersionParseError, Quality, QualityModel, Revision};

// ============================================================================
// Value Objects & IDs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub Uuid);

impl GameId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameFileId(pub Uuid);

impl GameFileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for GameFileId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GameFileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub Uuid);

impl ProfileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomFormatId(pub Uuid);

impl CustomFormatId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for CustomFormatId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CustomFormatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexerId(pub Uuid);

impl IndexerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for IndexerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for IndexerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DownloadProtocol {
    #[default]
    Unknown,
    Usenet,
    Torrent,
}

impl std::fmt::Display for DownloadProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Usenet => write!(f, "usenet"),
            Self::Torrent => write!(f, "torrent"),
        }
    }
}

/// What a release actually contains relative to the full game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseContentType {
    #[default]
    Unknown,
    BaseGame,
    BaseGameWithAllDlc,
    Expansion,
    DlcOnly,
    UpdateOnly,
    SeasonPass,
}

impl std::fmt::Display for ReleaseContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::BaseGame => write!(f, "base game"),
            Self::BaseGameWithAllDlc => write!(f, "base game with all DLC"),
            Self::Expansion => write!(f, "expansion"),
            Self::DlcOnly => write!(f, "DLC only"),
            Self::UpdateOnly => write!(f, "update only"),
            Self::SeasonPass => write!(f, "season pass"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    #[default]
    Unknown,
    Pc,
    Mac,
    Linux,
    PlayStation,
    Xbox,
    Nintendo,
}

impl std::fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Pc => write!(f, "pc"),
            Self::Mac => write!(f, "mac"),
            Self::Linux => write!(f, "linux"),
            Self::PlayStation => write!(f, "playstation"),
            Self::Xbox => write!(f, "xbox"),
            Self::Nintendo => write!(f, "nintendo"),
        }
    }
}

/// `Any` and `Original` are only meaningful on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Unknown,
    Any,
    Original,
    English,
    French,
    German,
    Spanish,
    Italian,
    Portuguese,
    Russian,
    Polish,
    Japanese,
    Chinese,
    Korean,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Unknown => "Unknown",
            Self::Any => "Any",
            Self::Original => "Original",
            Self::English => "English",
            Self::French => "French",
            Self::German => "German",
            Self::Spanish => "Spanish",
            Self::Italian => "Italian",
            Self::Portuguese => "Portuguese",
            Self::Russian => "Russian",
            Self::Polish => "Polish",
            Self::Japanese => "Japanese",
            Self::Chinese => "Chinese",
            Self::Korean => "Korean",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexerFlag {
    Freeleech,
    Halfleech,
    DoubleUpload,
    Internal,
    Scene,
    Approved,
    Golden,
}

impl std::fmt::Display for IndexerFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Freeleech => write!(f, "freeleech"),
            Self::Halfleech => write!(f, "halfleech"),
            Self::DoubleUpload => write!(f, "double_upload"),
            Self::Internal => write!(f, "internal"),
            Self::Scene => write!(f, "scene"),
            Self::Approved => write!(f, "approved"),
            Self::Golden => write!(f, "golden"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryEventType {
    Unknown,
    Grabbed,
    DownloadFolderImported,
    DownloadFailed,
    GameFileDeleted,
    GameFileRenamed,
    DownloadIgnored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedDownloadState {
    Downloading,
    ImportBlocked,
    ImportPending,
    Importing,
    Imported,
    FailedPending,
    Failed,
    Ignored,
}

/// Where a release under evaluation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseSourceType {
    #[default]
    Unknown,
    Rss,
    Search,
    UserInvokedSearch,
    InteractiveSearch,
    ReleasePush,
}

impl std::fmt::Display for ReleaseSourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Rss => write!(f, "rss"),
            Self::Search => write!(f, "search"),
            Self::UserInvokedSearch => write!(f, "user_invoked_search"),
            Self::InteractiveSearch => write!(f, "interactive_search"),
            Self::ReleasePush => write!(f, "release_push"),
        }
    }
}

// ============================================================================
// Profiles & Custom Formats
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomFormat {
    pub id: CustomFormatId,
    pub name: String,
}

impl CustomFormat {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CustomFormatId::new(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for CustomFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFormatItem {
    pub format: CustomFormatId,
    pub score: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityProfileItem {
    pub quality: Quality,
    pub allowed: bool,
}

/// Ordered quality preferences for a library item. Position in `items` is
/// the quality's rank: later entries are preferred over earlier ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityProfile {
    pub id: ProfileId,
    pub name: String,
    pub items: Vec<QualityProfileItem>,
    pub cutoff: Quality,
    pub upgrade_allowed: bool,
    pub format_items: Vec<ProfileFormatItem>,
    pub min_format_score: i32,
    pub cutoff_format_score: i32,
    pub min_upgrade_format_score: i32,
    pub language: Language,
    pub preferred_platforms: Vec<PlatformFamily>,
    /// Preferred size in megabytes per minute of game runtime.
    pub preferred_size_mb_per_minute: Option<f64>,
}

impl QualityProfile {
    /// Every quality allowed, in catalogue order, cutoff on the best one.
    pub fn new(name: impl Into<String>) -> Self {
        let items: Vec<QualityProfileItem> = Quality::ALL
            .iter()
            .map(|quality| QualityProfileItem {
                quality: *quality,
                allowed: true,
            })
            .collect();
        Self::with_items(name, items, Quality::MultiLanguage)
    }

    pub fn with_items(
        name: impl Into<String>,
        items: Vec<QualityProfileItem>,
        cutoff: Quality,
    ) -> Self {
        Self {
            id: ProfileId::new(),
            name: name.into(),
            items,
            cutoff,
            upgrade_allowed: true,
            format_items: Vec::new(),
            min_format_score: 0,
            cutoff_format_score: 0,
            min_upgrade_format_score: 1,
            language: Language::Any,
            preferred_platforms: Vec::new(),
            preferred_size_mb_per_minute: None,
        }
    }

    pub fn rank_of(&self, quality: Quality) -> Option<usize> {
        self.items.iter().position(|item| item.quality == quality)
    }

    pub fn is_allowed(&self, quality: Quality) -> bool {
        self.items
            .iter()
            .any(|item| item.quality == quality && item.allowed)
    }

    pub fn first_allowed_quality(&self) -> Option<Quality> {
        self.items
            .iter()
            .find(|item| item.allowed)
            .map(|item| item.quality)
    }

    pub fn last_allowed_quality(&self) -> Option<Quality> {
        self.items
            .iter()
            .rev()
            .find(|item| item.allowed)
            .map(|item| item.quality)
    }

    /// Rank at or above which the profile is satisfied. A locked profile is
    /// satisfied by its first allowed quality.
    pub fn cutoff_index(&self) -> Option<usize> {
        let cutoff = if self.upgrade_allowed {
            Some(self.cutoff)
        } else {
            self.first_allowed_quality()
        };
        cutoff.and_then(|quality| self.rank_of(quality))
    }

    pub fn format_score(&self, format: CustomFormatId) -> i32 {
        self.format_items
            .iter()
            .find(|item| item.format == format)
            .map(|item| item.score)
            .unwrap_or(0)
    }

    /// Sum of weights for matched formats; formats absent from the table count as zero.
    pub fn calculate_custom_format_score(&self, formats: &[CustomFormat]) -> i32 {
        formats
            .iter()
            .map(|format| self.format_score(format.id))
            .sum()
    }
}

// ============================================================================
// Entities
// ============================================================================

/// A file already present in the library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameFile {
    pub id: GameFileId,
    pub quality: QualityModel,
    pub custom_formats: Vec<CustomFormat>,
    pub game_version: Option<GameVersion>,
    pub release_group: Option<String>,
    pub size_bytes: u64,
    pub date_added: DateTime<Utc>,
}

impl GameFile {
    pub fn new(quality: QualityModel) -> Self {
        Self {
            id: GameFileId::new(),
            quality,
            custom_formats: Vec::new(),
            game_version: None,
            release_group: None,
            size_bytes: 0,
            date_added: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub title: String,
    pub monitored: bool,
    pub quality_profile: QualityProfile,
    pub tags: Vec<u32>,
    pub original_language: Language,
    /// Typical play-through length in minutes, used for preferred-size targets.
    pub runtime_minutes: u32,
    pub game_file: Option<GameFile>,
}

impl Game {
    pub fn new(title: impl Into<String>, quality_profile: QualityProfile) -> Self {
        Self {
            id: GameId::new(),
            title: title.into(),
            monitored: true,
            quality_profile,
            tags: Vec::new(),
            original_language: Language::English,
            runtime_minutes: 0,
            game_file: None,
        }
    }
}

/// A release as reported by an indexer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseInfo {
    pub guid: String,
    pub title: String,
    pub size_bytes: u64,
    pub publish_date: DateTime<Utc>,
    pub download_protocol: DownloadProtocol,
    pub indexer_id: Option<IndexerId>,
    pub indexer: String,
    /// Lower values are preferred.
    pub indexer_priority: i32,
    #[serde(default)]
    pub indexer_flags: Vec<IndexerFlag>,
    pub seeders: Option<u32>,
    pub peers: Option<u32>,
    pub info_hash: Option<String>,
    pub download_client_id: Option<String>,
}

impl ReleaseInfo {
    pub fn new(
        title: impl Into<String>,
        download_protocol: DownloadProtocol,
        publish_date: DateTime<Utc>,
    ) -> Self {
        let title = title.into();
        Self {
            guid: title.clone(),
            title,
            size_bytes: 0,
            publish_date,
            download_protocol,
            indexer_id: None,
            indexer: String::new(),
            indexer_priority: 25,
            indexer_flags: Vec::new(),
            seeders: None,
            peers: None,
            info_hash: None,
            download_client_id: None,
        }
    }

    /// Age relative to `now`, clamped at zero for releases dated in the future.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        let age = now - self.publish_date;
        if age < Duration::zero() {
            Duration::zero()
        } else {
            age
        }
    }

    pub fn age_minutes(&self, now: DateTime<Utc>) -> i64 {
        self.age(now).num_minutes()
    }

    /// Identity used to correlate a grab with later history entries.
    pub fn download_identity(&self) -> Option<&str> {
        self.info_hash
            .as_deref()
            .or(self.download_client_id.as_deref())
    }
}

/// Information recovered from a release title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedGameInfo {
    pub game_title: String,
    pub quality: QualityModel,
    #[serde(default)]
    pub content_type: ReleaseContentType,
    #[serde(default)]
    pub platform: PlatformFamily,
    #[serde(default)]
    pub languages: Vec<Language>,
    pub game_version: Option<GameVersion>,
    pub release_group: Option<String>,
}

impl ParsedGameInfo {
    pub fn new(game_title: impl Into<String>, quality: QualityModel) -> Self {
        Self {
            game_title: game_title.into(),
            quality,
            content_type: ReleaseContentType::Unknown,
            platform: PlatformFamily::Unknown,
            languages: Vec::new(),
            game_version: None,
            release_group: None,
        }
    }
}

/// A candidate release mapped onto a library item. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteGame {
    pub release: ReleaseInfo,
    pub parsed: Option<ParsedGameInfo>,
    pub game: Option<Game>,
    pub custom_formats: Vec<CustomFormat>,
    pub custom_format_score: i32,
    pub release_source: ReleaseSourceType,
}

impl RemoteGame {
    /// Builds the candidate and scores its matched formats against the game's profile.
    pub fn new(
        release: ReleaseInfo,
        parsed: Option<ParsedGameInfo>,
        game: Option<Game>,
        custom_formats: Vec<CustomFormat>,
    ) -> Self {
        let custom_format_score = game
            .as_ref()
            .map(|game| {
                game.quality_profile
                    .calculate_custom_format_score(&custom_formats)
            })
            .unwrap_or(0);

        Self {
            release,
            parsed,
            game,
            custom_formats,
            custom_format_score,
            release_source: ReleaseSourceType::Unknown,
        }
    }

    pub fn quality(&self) -> Option<&QualityModel> {
        self.parsed.as_ref().map(|parsed| &parsed.quality)
    }

    pub fn game_version(&self) -> Option<&GameVersion> {
        self.parsed
            .as_ref()
            .and_then(|parsed| parsed.game_version.as_ref())
    }
}

// ============================================================================
// History, Blocklist & Queue Records
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameHistory {
    pub game_id: GameId,
    pub event_type: HistoryEventType,
    pub source_title: String,
    pub quality: QualityModel,
    #[serde(default)]
    pub custom_formats: Vec<CustomFormat>,
    pub game_version: Option<GameVersion>,
    pub download_id: Option<String>,
    pub date: DateTime<Utc>,
}

/// Publish-date tolerance when matching usenet releases against the blocklist.
pub const BLOCKLIST_PUBLISH_TOLERANCE_MINUTES: i64 = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlocklistEntry {
    pub game_id: GameId,
    pub source_title: String,
    pub protocol: DownloadProtocol,
    pub indexer: Option<String>,
    pub info_hash: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub date: DateTime<Utc>,
}

impl BlocklistEntry {
    pub fn matches(&self, release: &ReleaseInfo) -> bool {
        if let (Some(blocked), Some(candidate)) = (&self.info_hash, &release.info_hash) {
            return blocked.eq_ignore_ascii_case(candidate);
        }

        if !self.source_title.eq_ignore_ascii_case(&release.title) {
            return false;
        }

        match release.download_protocol {
            DownloadProtocol::Torrent => match &self.indexer {
                Some(indexer) => indexer.eq_ignore_ascii_case(&release.indexer),
                None => true,
            },
            _ => match self.published {
                Some(published) => {
                    (published - release.publish_date).num_minutes().abs()
                        <= BLOCKLIST_PUBLISH_TOLERANCE_MINUTES
                }
                None => true,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueItem {
    pub game_id: GameId,
    pub title: String,
    pub quality: QualityModel,
    #[serde(default)]
    pub custom_formats: Vec<CustomFormat>,
    pub game_version: Option<GameVersion>,
    pub state: TrackedDownloadState,
    pub download_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexerDefinition {
    pub id: IndexerId,
    pub name: String,
    #[serde(default)]
    pub required_flags: Vec<IndexerFlag>,
    #[serde(default)]
    pub tags: Vec<u32>,
    pub priority: i32,
}

// ============================================================================
// Domain Validation
// ============================================================================

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

pub trait Validate {
    fn validate(&self) -> Result<(), Vec<ValidationError>>;
}

impl Validate for QualityProfile {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(ValidationError {
                field: "name",
                message: "name cannot be empty".into(),
            });
        }
        if !self.items.iter().any(|item| item.allowed) {
            errors.push(ValidationError {
                field: "items",
                message: "at least one quality must be allowed".into(),
            });
        }
        if self.upgrade_allowed && !self.is_allowed(self.cutoff) {
            errors.push(ValidationError {
                field: "cutoff",
                message: "cutoff must be an allowed quality".into(),
            });
        }
        if self.min_upgrade_format_score < 1 {
            errors.push(ValidationError {
                field: "min_upgrade_format_score",
                message: "minimum upgrade score must be >= 1".into(),
            });
        }
        if let Some(size) = self.preferred_size_mb_per_minute {
            if !size.is_finite() || size <= 0.0 {
                errors.push(ValidationError {
                    field: "preferred_size_mb_per_minute",
                    message: "preferred size must be positive when provided".into(),
                });
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Validate for Game {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(ValidationError {
                field: "title",
                message: "title cannot be empty".into(),
            });
        }
        if let Err(profile_errors) = self.quality_profile.validate() {
            errors.extend(profile_errors);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Validate for ReleaseInfo {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(ValidationError {
                field: "title",
                message: "title cannot be empty".into(),
            });
        }
        if self.download_protocol != DownloadProtocol::Torrent
            && (self.seeders.is_some() || self.peers.is_some())
        {
            errors.push(ValidationError {
                field: "seeders",
                message: "swarm counts are only valid for torrents".into(),
            });
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// ============================================================================
// Domain Events (lightweight scaffolding)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent<TPayload> {
    pub name: &'static str,
    pub occurred_at: DateTime<Utc>,
    pub payload: TPayload,
}

impl<TPayload> DomainEvent<TPayload> {
    pub fn new(name: &'static str, payload: TPayload) -> Self {
        Self {
            name,
            occurred_at: Utc::now(),
            payload,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseApprovedPayload {
    pub game_id: GameId,
    pub title: String,
    pub rank: usize,
    pub custom_format_score: i32,
    pub source: ReleaseSourceType,
}

pub type ReleaseApproved = DomainEvent<ReleaseApprovedPayload>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseRejectedPayload {
    pub game_id: Option<GameId>,
    pub title: String,
    pub reason: String,
    pub message: String,
    pub permanent: bool,
}

pub type ReleaseRejected = DomainEvent<ReleaseRejectedPayload>;

// ============================================================================
// Tests
// ============================================================================
