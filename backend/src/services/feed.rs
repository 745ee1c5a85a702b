//! Publish/subscribe channel for freshly computed snapshots.
//!
//! The engine itself keeps no shared state; a feed is created by the
//! presentation layer and handed to whoever wants to push or observe
//! snapshots.

use tokio::sync::broadcast;

use crate::api::{AnalyticsSnapshot, CreatorId};

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct SnapshotFeed {
    sender: broadcast::Sender<AnalyticsSnapshot>,
}

impl Default for SnapshotFeed {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl SnapshotFeed {
    /// `capacity` snapshots are buffered per slow subscriber before the
    /// oldest are dropped.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Send a snapshot to every current subscriber and return how many
    /// received it.
    pub fn publish(&self, snapshot: AnalyticsSnapshot) -> usize {
        match self.sender.send(snapshot) {
            Ok(receivers) => receivers,
            Err(_) => {
                log::debug!("Snapshot published with no subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AnalyticsSnapshot> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Whether a published snapshot concerns `creator_id`.
pub fn is_for_creator(snapshot: &AnalyticsSnapshot, creator_id: CreatorId) -> bool {
    snapshot.creator_id == creator_id
}
