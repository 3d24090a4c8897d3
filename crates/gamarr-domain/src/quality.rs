// SPDX-License-Identifier: GPL-3.0-or-later

//! Quality catalogue, revisions and semantic game versions.
//!
//! A [`Quality`] is a fixed identity with a profile-independent weight. Profiles
//! reorder qualities for their own purposes, see `QualityProfile::rank_of`.

use std::cmp::Ordering;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Unknown,
    Scene,
    SceneCracked,
    Gog,
    Steam,
    Epic,
    Origin,
    Uplay,
    Repack,
    RepackAllDlc,
    Iso,
    Retail,
    Portable,
    Preload,
    UpdateOnly,
    MultiLanguage,
}

impl Quality {
    pub const ALL: [Quality; 16] = [
        Quality::Unknown,
        Quality::Scene,
        Quality::SceneCracked,
        Quality::Gog,
        Quality::Steam,
        Quality::Epic,
        Quality::Origin,
        Quality::Uplay,
        Quality::Repack,
        Quality::RepackAllDlc,
        Quality::Iso,
        Quality::Retail,
        Quality::Portable,
        Quality::Preload,
        Quality::UpdateOnly,
        Quality::MultiLanguage,
    ];

    pub fn id(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Scene => 1,
            Self::SceneCracked => 2,
            Self::Gog => 3,
            Self::Steam => 4,
            Self::Epic => 5,
            Self::Origin => 6,
            Self::Uplay => 7,
            Self::Repack => 8,
            Self::RepackAllDlc => 9,
            Self::Iso => 10,
            Self::Retail => 11,
            Self::Portable => 12,
            Self::Preload => 13,
            Self::UpdateOnly => 14,
            Self::MultiLanguage => 15,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|quality| quality.id() == id)
    }

    /// Profile-independent weight; higher is better.
    pub fn weight(self) -> u8 {
        match self {
            Self::Unknown => 1,
            Self::Preload => 2,
            Self::UpdateOnly => 3,
            Self::Scene => 4,
            Self::SceneCracked => 5,
            Self::Repack => 6,
            Self::RepackAllDlc => 7,
            Self::Gog => 8,
            Self::Steam => 9,
            Self::Epic => 10,
            Self::Origin => 11,
            Self::Uplay => 12,
            Self::Iso => 13,
            Self::Retail => 14,
            Self::Portable => 15,
            Self::MultiLanguage => 16,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Scene => "Scene",
            Self::SceneCracked => "Scene Cracked",
            Self::Gog => "GOG",
            Self::Steam => "Steam",
            Self::Epic => "Epic",
            Self::Origin => "Origin",
            Self::Uplay => "Uplay",
            Self::Repack => "Repack",
            Self::RepackAllDlc => "Repack All DLC",
            Self::Iso => "ISO",
            Self::Retail => "Retail",
            Self::Portable => "Portable",
            Self::Preload => "Preload",
            Self::UpdateOnly => "Update Only",
            Self::MultiLanguage => "Multi-Language",
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Re-release marker for a given quality: version counts propers, `real`
/// counts REAL tags, `is_repack` marks a repack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Revision {
    pub version: u32,
    pub real: u32,
    pub is_repack: bool,
}

impl Revision {
    pub fn new(version: u32, real: u32, is_repack: bool) -> Self {
        Self {
            version,
            real,
            is_repack,
        }
    }
}

impl Default for Revision {
    fn default() -> Self {
        Self::new(1, 0, false)
    }
}

impl PartialOrd for Revision {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Revision {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version
            .cmp(&other.version)
            .then_with(|| self.real.cmp(&other.real))
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.version)?;
        if self.real > 0 {
            write!(f, " real:{}", self.real)?;
        }
        if self.is_repack {
            write!(f, " repack")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualityModel {
    pub quality: Quality,
    #[serde(default)]
    pub revision: Revision,
}

impl QualityModel {
    pub fn new(quality: Quality) -> Self {
        Self {
            quality,
            revision: Revision::default(),
        }
    }

    pub fn with_revision(quality: Quality, revision: Revision) -> Self {
        Self { quality, revision }
    }
}

impl std::fmt::Display for QualityModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.quality, self.revision)
    }
}

// ============================================================================
// Game Version
// ============================================================================

lazy_static! {
    static ref DOTTED_VERSION: Regex =
        Regex::new(r"^v?(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:\.(\d+))?$").expect("valid regex");
    static ref BUILD_VERSION: Regex =
        Regex::new(r"(?i)^(?:build|b)[\s.]?(\d+)$").expect("valid regex");
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised game version: {0}")]
pub struct GameVersionParseError(pub String);

/// Semantic version of a game release. Ordering is lexicographic over
/// (major, minor, patch, build).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct GameVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub build: u32,
}

impl GameVersion {
    pub fn new(major: u32, minor: u32, patch: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            build,
        }
    }

    pub fn parse(input: &str) -> Result<Self, GameVersionParseError> {
        let trimmed = input.trim();

        if let Some(caps) = BUILD_VERSION.captures(trimmed) {
            let build = caps[1]
                .parse()
                .map_err(|_| GameVersionParseError(input.to_string()))?;
            return Ok(Self::new(0, 0, 0, build));
        }

        let caps = DOTTED_VERSION
            .captures(trimmed)
            .ok_or_else(|| GameVersionParseError(input.to_string()))?;

        let component = |index: usize| -> Result<u32, GameVersionParseError> {
            caps.get(index)
                .map(|m| m.as_str().parse::<u32>())
                .transpose()
                .map(|value| value.unwrap_or(0))
                .map_err(|_| GameVersionParseError(input.to_string()))
        };

        Ok(Self::new(component(1)?, component(2)?, component(3)?, component(4)?))
    }

    pub fn is_empty(&self) -> bool {
        self.major == 0 && self.minor == 0 && self.patch == 0 && self.build == 0
    }

    /// True when `candidate` is strictly newer than `incumbent`, or the incumbent
    /// carries no usable version at all. A missing or empty candidate never is.
    pub fn is_upgrade(incumbent: Option<&GameVersion>, candidate: Option<&GameVersion>) -> bool {
        match (incumbent, candidate) {
            (_, None) => false,
            (None, Some(candidate)) => !candidate.is_empty(),
            (Some(current), Some(candidate)) if current.is_empty() => !candidate.is_empty(),
            (Some(current), Some(candidate)) => candidate > current,
        }
    }
}

impl std::str::FromStr for GameVersion {
    type Err = GameVersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for GameVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.major == 0 && self.minor == 0 && self.patch == 0 && self.build > 0 {
            return write!(f, "Build {}", self.build);
        }
        if self.build > 0 {
            write!(f, "v{}.{}.{}.{}", self.major, self.minor, self.patch, self.build)
        } else if self.patch > 0 {
            write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
        } else {
            write!(f, "v{}.{}", self.major, self.minor)
        }
    }
}
