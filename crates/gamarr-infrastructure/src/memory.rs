// SPDX-License-Identifier: GPL-3.0-or-later
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::{anyhow, Result};
use gamarr_domain::{
    BlocklistEntry, GameHistory, GameId, IndexerDefinition, IndexerId, QueueItem,
};
use tracing::debug;

use crate::repositories::{BlocklistReader, HistoryReader, IndexerReader, QueueReader};

#[derive(Debug, Clone, Default)]
struct StoreState {
    history: Vec<GameHistory>,
    blocklist: Vec<BlocklistEntry>,
    queue: Vec<QueueItem>,
    indexers: HashMap<IndexerId, IndexerDefinition>,
}

/// Frozen copy of the store. Every reader call on a snapshot sees the same state.
#[derive(Debug, Clone, Default)]
pub struct StateSnapshot {
    state: StoreState,
}

/// Mutable library state shared between writers and the decision engine.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_history(&self, entry: GameHistory) -> Result<()> {
        self.write()?.history.push(entry);
        Ok(())
    }

    pub fn blocklist(&self, entry: BlocklistEntry) -> Result<()> {
        self.write()?.blocklist.push(entry);
        Ok(())
    }

    pub fn replace_queue(&self, queue: Vec<QueueItem>) -> Result<()> {
        self.write()?.queue = queue;
        Ok(())
    }

    pub fn upsert_indexer(&self, indexer: IndexerDefinition) -> Result<()> {
        self.write()?.indexers.insert(indexer.id, indexer);
        Ok(())
    }

    pub fn snapshot(&self) -> Result<Arc<StateSnapshot>> {
        let state = self.read()?.clone();
        debug!(
            target: "infrastructure",
            history = state.history.len(),
            blocklist = state.blocklist.len(),
            queue = state.queue.len(),
            indexers = state.indexers.len(),
            "state snapshot taken"
        );
        Ok(Arc::new(StateSnapshot { state }))
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, StoreState>> {
        self.inner
            .read()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, StoreState>> {
        self.inner
            .write()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))
    }
}

fn history_for(state: &StoreState, game_id: GameId) -> Vec<GameHistory> {
    let mut history: Vec<GameHistory> = state
        .history
        .iter()
        .filter(|entry| entry.game_id == game_id)
        .cloned()
        .collect();
    history.sort_by(|a, b| b.date.cmp(&a.date));
    history
}

fn blocklist_for(state: &StoreState, game_id: GameId) -> Vec<BlocklistEntry> {
    state
        .blocklist
        .iter()
        .filter(|entry| entry.game_id == game_id)
        .cloned()
        .collect()
}

impl HistoryReader for StateSnapshot {
    fn history_for_game(&self, game_id: GameId) -> Result<Vec<GameHistory>> {
        Ok(history_for(&self.state, game_id))
    }
}

impl BlocklistReader for StateSnapshot {
    fn blocklist_for_game(&self, game_id: GameId) -> Result<Vec<BlocklistEntry>> {
        Ok(blocklist_for(&self.state, game_id))
    }
}

impl QueueReader for StateSnapshot {
    fn queue(&self) -> Result<Vec<QueueItem>> {
        Ok(self.state.queue.clone())
    }
}

impl IndexerReader for StateSnapshot {
    fn indexer(&self, id: IndexerId) -> Result<Option<IndexerDefinition>> {
        Ok(self.state.indexers.get(&id).cloned())
    }
}

impl HistoryReader for InMemoryStore {
    fn history_for_game(&self, game_id: GameId) -> Result<Vec<GameHistory>> {
        Ok(history_for(&*self.read()?, game_id))
    }
}

impl BlocklistReader for InMemoryStore {
    fn blocklist_for_game(&self, game_id: GameId) -> Result<Vec<BlocklistEntry>> {
        Ok(blocklist_for(&*self.read()?, game_id))
    }
}

impl QueueReader for InMemoryStore {
    fn queue(&self) -> Result<Vec<QueueItem>> {
        Ok(self.read()?.queue.clone())
    }
}

impl IndexerReader for InMemoryStore {
    fn indexer(&self, id: IndexerId) -> Result<Option<IndexerDefinition>> {
        Ok(self.read()?.indexers.get(&id).cloned())
    }
}
