// SPDX-License-Identifier: GPL-3.0-or-later
pub mod fixtures;
pub mod memory;
pub mod repositories;

pub use fixtures::{load_fixture, Fixture, FixtureCandidate, FixtureCandidateSource, FixtureError};
pub use memory::{InMemoryStore, StateSnapshot};
pub use repositories::{BlocklistReader, CandidateSource, HistoryReader, IndexerReader, QueueReader};

use std::path::Path;

use anyhow::Result;
use tracing::info;

/// Builds a store seeded from a fixture file and returns both.
pub fn init_store(fixture_path: &Path) -> Result<(InMemoryStore, Fixture)> {
    info!(target: "infrastructure", path = %fixture_path.display(), "initializing store");

    let fixture = load_fixture(fixture_path)?;
    let store = InMemoryStore::new();
    fixture.seed(&store)?;

    info!(target: "infrastructure", "store initialized successfully");
    Ok((store, fixture))
}
