// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::Path;

use anyhow::Result;
use gamarr_domain::{
    BlocklistEntry, CustomFormat, Game, GameHistory, GameId, IndexerDefinition, ParsedGameInfo,
    QueueItem, ReleaseInfo, RemoteGame, Validate,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::memory::InMemoryStore;
use crate::repositories::CandidateSource;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse fixture: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid game '{title}': {messages}")]
    InvalidGame { title: String, messages: String },
}

/// A release as delivered by discovery, before it is mapped onto a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCandidate {
    pub game_id: Option<GameId>,
    pub release: ReleaseInfo,
    pub parsed: Option<ParsedGameInfo>,
    #[serde(default)]
    pub custom_formats: Vec<CustomFormat>,
}

/// Library state plus pending candidates, as stored in a JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub games: Vec<Game>,
    pub history: Vec<GameHistory>,
    pub blocklist: Vec<BlocklistEntry>,
    pub queue: Vec<QueueItem>,
    pub indexers: Vec<IndexerDefinition>,
    pub candidates: Vec<FixtureCandidate>,
}

impl Fixture {
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        let fixture: Fixture = serde_json::from_str(json)?;
        for game in &fixture.games {
            if let Err(errors) = game.validate() {
                let messages = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(FixtureError::InvalidGame {
                    title: game.title.clone(),
                    messages,
                });
            }
        }
        Ok(fixture)
    }

    pub fn game(&self, id: GameId) -> Option<&Game> {
        self.games.iter().find(|game| game.id == id)
    }

    /// Seeds a store with this fixture's history, blocklist, queue and indexers.
    pub fn seed(&self, store: &InMemoryStore) -> Result<()> {
        for entry in &self.history {
            store.record_history(entry.clone())?;
        }
        for entry in &self.blocklist {
            store.blocklist(entry.clone())?;
        }
        store.replace_queue(self.queue.clone())?;
        for indexer in &self.indexers {
            store.upsert_indexer(indexer.clone())?;
        }
        Ok(())
    }

    /// Every candidate mapped onto its game; unmatched candidates carry no game.
    pub fn remote_games(&self) -> Vec<RemoteGame> {
        self.candidates
            .iter()
            .map(|candidate| {
                let game = candidate
                    .game_id
                    .and_then(|id| self.game(id))
                    .cloned();
                if candidate.game_id.is_some() && game.is_none() {
                    warn!(
                        target: "infrastructure",
                        release = %candidate.release.title,
                        "candidate references a game missing from the fixture"
                    );
                }
                RemoteGame::new(
                    candidate.release.clone(),
                    candidate.parsed.clone(),
                    game,
                    candidate.custom_formats.clone(),
                )
            })
            .collect()
    }
}

pub fn load_fixture(path: &Path) -> Result<Fixture, FixtureError> {
    let json = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let fixture = Fixture::from_json(&json)?;
    info!(
        target: "infrastructure",
        path = %path.display(),
        games = fixture.games.len(),
        candidates = fixture.candidates.len(),
        "fixture loaded"
    );
    Ok(fixture)
}

/// Serves a fixture's candidates as if they had just been discovered.
#[derive(Debug, Clone)]
pub struct FixtureCandidateSource {
    fixture: Fixture,
}

impl FixtureCandidateSource {
    pub fn new(fixture: Fixture) -> Self {
        Self { fixture }
    }
}

#[async_trait::async_trait]
impl CandidateSource for FixtureCandidateSource {
    async fn fetch_candidates(&self, game: &Game) -> Result<Vec<RemoteGame>> {
        Ok(self
            .fixture
            .candidates
            .iter()
            .filter(|candidate| candidate.game_id == Some(game.id))
            .map(|candidate| {
                RemoteGame::new(
                    candidate.release.clone(),
                    candidate.parsed.clone(),
                    Some(game.clone()),
                    candidate.custom_formats.clone(),
                )
            })
            .collect())
    }
}
