// SPDX-License-Identifier: GPL-3.0-or-later
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use gamarr_domain::{
    DomainEvent, GameId, ReleaseApproved, ReleaseApprovedPayload, ReleaseRejected,
    ReleaseRejectedPayload,
};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::decision_maker::DownloadDecision;
use crate::specifications::RejectionType;

pub const RELEASE_APPROVED: &str = "release.approved";
pub const RELEASE_REJECTED: &str = "release.rejected";

/// Event publisher abstraction
pub trait EventPublisher: Send + Sync {
    fn publish<T>(&self, event: &DomainEvent<T>)
    where
        T: Serialize + Send + Sync + 'static;
}

/// A minimal in-memory event bus that stores serialized events.
#[derive(Clone, Default)]
pub struct InMemoryEventBus {
    inner: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Vec::new())),
        }
    }

    // A panic while holding the lock leaves the Vec intact, so keep using it.
    fn events(&self) -> MutexGuard<'_, Vec<serde_json::Value>> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn len(&self) -> usize {
        self.events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retrieve and clear all captured events
    pub fn drain(&self) -> Vec<serde_json::Value> {
        std::mem::take(&mut *self.events())
    }
}

impl EventPublisher for InMemoryEventBus {
    fn publish<T>(&self, event: &DomainEvent<T>)
    where
        T: Serialize + Send + Sync + 'static,
    {
        let value = json!({
            "name": event.name,
            "occurred_at": event.occurred_at,
            "payload": event.payload,
        });
        self.events().push(value);
    }
}

/// Emits one event per decision. Approved releases carry their 1-based rank
/// within their game, so `decisions` should already be prioritized.
pub fn publish_decisions<P: EventPublisher>(publisher: &P, decisions: &[DownloadDecision]) {
    let mut ranks: HashMap<Option<GameId>, usize> = HashMap::new();

    for decision in decisions {
        let remote = &decision.remote_game;
        let game_id = remote.game.as_ref().map(|game| game.id);

        match &decision.rejection {
            None => {
                let rank = ranks.entry(game_id).or_insert(0);
                *rank += 1;
                let Some(game_id) = game_id else {
                    continue;
                };
                let event: ReleaseApproved = DomainEvent::new(
                    RELEASE_APPROVED,
                    ReleaseApprovedPayload {
                        game_id,
                        title: remote.release.title.clone(),
                        rank: *rank,
                        custom_format_score: remote.custom_format_score,
                        source: remote.release_source,
                    },
                );
                publisher.publish(&event);
            }
            Some(rejection) => {
                let event: ReleaseRejected = DomainEvent::new(
                    RELEASE_REJECTED,
                    ReleaseRejectedPayload {
                        game_id,
                        title: remote.release.title.clone(),
                        reason: rejection.reason.to_string(),
                        message: rejection.message.clone(),
                        permanent: rejection.rejection_type == RejectionType::Permanent,
                    },
                );
                publisher.publish(&event);
            }
        }
    }

    debug!(target: "decision", events = decisions.len(), "published decision events");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision_maker::DownloadRejection;
    use crate::specifications::{DownloadRejectionReason, SpecificationPriority};
    use crate::test_support::{game, remote};
    use gamarr_domain::Quality;

    #[test]
    fn publish_and_drain_events() {
        let bus = InMemoryEventBus::new();
        assert!(bus.is_empty());

        let payload = ReleaseRejectedPayload {
            game_id: None,
            title: "Disco.Elysium-GROUP".to_string(),
            reason: "unknown_game".to_string(),
            message: "Unknown Game".to_string(),
            permanent: true,
        };
        let evt: ReleaseRejected = DomainEvent::new(RELEASE_REJECTED, payload);

        bus.publish(&evt);
        assert_eq!(bus.len(), 1);

        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        let v = &drained[0];
        assert_eq!(v["name"], "release.rejected");
        assert!(v["payload"]["title"]
            .as_str()
            .expect("Failed to get title")
            .starts_with("Disco"));
        assert!(bus.is_empty());
    }

    #[test]
    fn decisions_are_published_with_per_game_rank() {
        let bus = InMemoryEventBus::new();
        let game = game();
        let mut second = remote(&game, Quality::Scene);
        second.release.title = "Disco.Elysium-SECOND".into();
        let mut rejected = remote(&game, Quality::Scene);
        rejected.release.title = "Disco.Elysium-BLOCKED".into();

        let decisions = vec![
            DownloadDecision::approved(remote(&game, Quality::Retail)),
            DownloadDecision::approved(second),
            DownloadDecision::rejected(
                rejected,
                DownloadRejection {
                    reason: DownloadRejectionReason::Blocklisted,
                    message: "Release is blocklisted".into(),
                    rejection_type: RejectionType::Permanent,
                    priority: SpecificationPriority::Database,
                    specification: Some("Blocklist"),
                },
            ),
        ];

        publish_decisions(&bus, &decisions);

        let events = bus.drain();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0]["name"], RELEASE_APPROVED);
        assert_eq!(events[0]["payload"]["rank"], 1);
        assert_eq!(events[1]["payload"]["rank"], 2);
        assert_eq!(events[1]["payload"]["title"], "Disco.Elysium-SECOND");
        assert_eq!(events[2]["name"], RELEASE_REJECTED);
        assert_eq!(events[2]["payload"]["reason"], "blocklisted");
        assert_eq!(events[2]["payload"]["permanent"], true);
    }
}
