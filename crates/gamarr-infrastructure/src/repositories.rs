// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::Result;
use gamarr_domain::{
    BlocklistEntry, Game, GameHistory, GameId, IndexerDefinition, IndexerId, QueueItem,
    ReleaseInfo, RemoteGame,
};

// ============================================================================
// Reader Traits
// ============================================================================
//
// Point-in-time readers consumed by the decision engine. They are synchronous:
// implementations are expected to answer from memory or a snapshot.

/// Download history keyed by library item.
pub trait HistoryReader: Send + Sync {
    /// All history for a game, newest first.
    fn history_for_game(&self, game_id: GameId) -> Result<Vec<GameHistory>>;

    fn most_recent_for_game(&self, game_id: GameId) -> Result<Option<GameHistory>> {
        Ok(self.history_for_game(game_id)?.into_iter().next())
    }
}

pub trait BlocklistReader: Send + Sync {
    fn blocklist_for_game(&self, game_id: GameId) -> Result<Vec<BlocklistEntry>>;

    fn is_blocklisted(&self, game_id: GameId, release: &ReleaseInfo) -> Result<bool> {
        Ok(self
            .blocklist_for_game(game_id)?
            .iter()
            .any(|entry| entry.matches(release)))
    }
}

/// Active download queue.
pub trait QueueReader: Send + Sync {
    fn queue(&self) -> Result<Vec<QueueItem>>;

    fn queue_for_game(&self, game_id: GameId) -> Result<Vec<QueueItem>> {
        Ok(self
            .queue()?
            .into_iter()
            .filter(|item| item.game_id == game_id)
            .collect())
    }
}

pub trait IndexerReader: Send + Sync {
    fn indexer(&self, id: IndexerId) -> Result<Option<IndexerDefinition>>;
}

// ============================================================================
// Candidate Source
// ============================================================================

/// Produces candidates for a library item, already parsed and format-matched.
#[async_trait::async_trait]
pub trait CandidateSource: Send + Sync {
    async fn fetch_candidates(&self, game: &Game) -> Result<Vec<RemoteGame>>;
}
