// SPDX-License-Identifier: GPL-3.0-or-later

//! Ordering of accepted releases for the same game.
//!
//! Every release is reduced to a [`RankKey`] whose fields are compared in
//! declaration order. Near-equal sizes, ages and swarm counts are quantised
//! into buckets first, so small differences fall through to the next field
//! and the ordering remains a total preorder.

use std::cmp::{Ordering, Reverse};

use chrono::{DateTime, Utc};
use gamarr_config::{DecisionConfig, ProperDownloadTypes};
use gamarr_domain::{
    DownloadProtocol, GameId, IndexerFlag, ReleaseContentType, RemoteGame, Revision,
};
use tracing::debug;

use crate::decision_maker::DownloadDecision;
use crate::specifications::protocol_preference;

/// Relative width of an age bucket. This is a bucket width, not a tie radius:
/// ages in one bucket are always within ten percent of each other, but two
/// ages closer than that can still fall on either side of a boundary.
pub const AGE_SIMILARITY_RATIO: f64 = 0.10;
/// Sizes are rounded down to 200 MiB before comparison.
pub const SIZE_BUCKET_BYTES: u64 = 200 * 1024 * 1024;
/// Distances to the preferred size are compared in steps of five percent of the target.
pub const SIZE_PROXIMITY_RATIO: f64 = 0.05;
/// Relative width of a seeder or peer bucket. Like [`AGE_SIMILARITY_RATIO`] it
/// bounds the spread inside a bucket; 20 and 21 seeders still land in
/// different buckets.
pub const SWARM_SIMILARITY_RATIO: f64 = 0.10;

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Geometric bucket of `value`: bucket `k` covers `1 + value` in
/// `[(1 + ratio)^k, (1 + ratio)^(k + 1))`. Non-positive values map to bucket zero.
pub fn similarity_bucket(value: f64, ratio: f64) -> i64 {
    if value <= 0.0 || ratio <= 0.0 {
        return 0;
    }
    (value.ln_1p() / ratio.ln_1p()).floor() as i64
}

/// Comparable summary of one release. Greater keys rank first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RankKey {
    /// `(real, version, repack)` when propers are preferred, otherwise `(score, 0, 0)`.
    lead: (i64, i64, i64),
    quality_weight: u8,
    format_score: i64,
    completeness: u8,
    /// `(-age bucket, size bucket)`; zeroed when a preferred size applies.
    freshness: (i64, i64),
    /// Negated distance bucket to the preferred size; zero when none applies.
    proximity: i64,
    /// Revision compared after size when propers are not preferred.
    deferred_revision: (i64, i64),
    preferred_protocol: bool,
    swarm: (i64, i64),
    indexer_priority: i64,
    indexer_flags: i64,
}

/// Ranks accepted decisions. Built once per batch from the active configuration.
#[derive(Debug, Clone)]
pub struct DownloadDecisionComparer {
    config: DecisionConfig,
    now: DateTime<Utc>,
}

impl DownloadDecisionComparer {
    pub fn new(config: &DecisionConfig, now: DateTime<Utc>) -> Self {
        Self {
            config: config.clone(),
            now,
        }
    }

    pub fn rank_key(&self, remote: &RemoteGame) -> RankKey {
        let prefer_propers =
            self.config.download_propers_and_repacks != ProperDownloadTypes::DoNotPrefer;
        let revision = remote
            .quality()
            .map(|quality| quality.revision)
            .unwrap_or_default();
        let score = i64::from(remote.custom_format_score);

        let (lead, format_score, deferred_revision) = if prefer_propers {
            (revision_lead(&revision), score, (0, 0))
        } else {
            (
                (score, 0, 0),
                0,
                (i64::from(revision.version), i64::from(revision.real)),
            )
        };

        let (freshness, proximity) = match self.preferred_size_bytes(remote) {
            Some(target) => ((0, 0), -proximity_bucket(remote.release.size_bytes, target)),
            None => (
                (
                    -similarity_bucket(
                        remote.release.age_minutes(self.now) as f64,
                        AGE_SIMILARITY_RATIO,
                    ),
                    (remote.release.size_bytes / SIZE_BUCKET_BYTES) as i64,
                ),
                0,
            ),
        };

        RankKey {
            lead,
            quality_weight: remote
                .quality()
                .map(|quality| quality.quality.weight())
                .unwrap_or(0),
            format_score,
            completeness: remote
                .parsed
                .as_ref()
                .map(|parsed| completeness_score(parsed.content_type))
                .unwrap_or(0),
            freshness,
            proximity,
            deferred_revision,
            preferred_protocol: self.is_preferred_protocol(remote),
            swarm: swarm_buckets(remote),
            indexer_priority: -i64::from(remote.release.indexer_priority),
            indexer_flags: if self.config.prefer_indexer_flags {
                indexer_flag_score(&remote.release.indexer_flags)
            } else {
                0
            },
        }
    }

    /// `Greater` when `left` should be grabbed ahead of `right`.
    pub fn compare(&self, left: &RemoteGame, right: &RemoteGame) -> Ordering {
        self.rank_key(left).cmp(&self.rank_key(right))
    }

    /// Approved decisions grouped per game (first-seen group order), best
    /// first within each group, followed by rejected decisions in input order.
    pub fn prioritize(&self, decisions: Vec<DownloadDecision>) -> Vec<DownloadDecision> {
        let total = decisions.len();
        let (approved, rejected): (Vec<_>, Vec<_>) = decisions
            .into_iter()
            .partition(DownloadDecision::is_approved);

        let mut groups: Vec<(Option<GameId>, Vec<DownloadDecision>)> = Vec::new();
        for decision in approved {
            let game_id = decision.remote_game.game.as_ref().map(|game| game.id);
            match groups.iter_mut().find(|(id, _)| *id == game_id) {
                Some((_, group)) => group.push(decision),
                None => groups.push((game_id, vec![decision])),
            }
        }

        let mut ordered = Vec::with_capacity(total);
        for (game_id, mut group) in groups {
            group.sort_by_cached_key(|decision| Reverse(self.rank_key(&decision.remote_game)));
            if let Some(best) = group.first() {
                debug!(
                    target: "prioritization",
                    game_id = ?game_id,
                    candidates = group.len(),
                    best = %best.remote_game.release.title,
                    "ranked approved releases"
                );
            }
            ordered.extend(group);
        }
        ordered.extend(rejected);
        ordered
    }

    fn preferred_size_bytes(&self, remote: &RemoteGame) -> Option<f64> {
        let game = remote.game.as_ref()?;
        let per_minute = game.quality_profile.preferred_size_mb_per_minute?;
        let target = per_minute * f64::from(game.runtime_minutes) * BYTES_PER_MEGABYTE;
        (target > 0.0).then_some(target)
    }

    fn is_preferred_protocol(&self, remote: &RemoteGame) -> bool {
        let tags = remote
            .game
            .as_ref()
            .map(|game| game.tags.as_slice())
            .unwrap_or(&[]);
        let preferred = self.config.delay_profile_for_tags(tags).preferred_protocol;
        protocol_preference(remote.release.download_protocol) == Some(preferred)
    }
}

fn revision_lead(revision: &Revision) -> (i64, i64, i64) {
    (
        i64::from(revision.real),
        i64::from(revision.version),
        i64::from(revision.is_repack),
    )
}

fn proximity_bucket(size_bytes: u64, target: f64) -> i64 {
    let distance = (size_bytes as f64 - target).abs();
    (distance / (SIZE_PROXIMITY_RATIO * target)).floor() as i64
}

fn completeness_score(content_type: ReleaseContentType) -> u8 {
    match content_type {
        ReleaseContentType::BaseGameWithAllDlc => 2,
        ReleaseContentType::BaseGame
        | ReleaseContentType::Unknown
        | ReleaseContentType::Expansion => 1,
        ReleaseContentType::DlcOnly
        | ReleaseContentType::UpdateOnly
        | ReleaseContentType::SeasonPass => 0,
    }
}

// Only torrents carry swarm counts; other protocols tie here.
fn swarm_buckets(remote: &RemoteGame) -> (i64, i64) {
    if remote.release.download_protocol != DownloadProtocol::Torrent {
        return (0, 0);
    }
    let bucket = |count: Option<u32>| {
        similarity_bucket(f64::from(count.unwrap_or(0)), SWARM_SIMILARITY_RATIO)
    };
    (bucket(remote.release.seeders), bucket(remote.release.peers))
}

fn indexer_flag_score(flags: &[IndexerFlag]) -> i64 {
    flags
        .iter()
        .map(|flag| match flag {
            IndexerFlag::DoubleUpload
            | IndexerFlag::Freeleech
            | IndexerFlag::Approved
            | IndexerFlag::Golden
            | IndexerFlag::Internal => 2,
            IndexerFlag::Halfleech => 1,
            IndexerFlag::Scene => 0,
        })
        .sum()
}
