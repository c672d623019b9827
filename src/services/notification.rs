//! Vote update notification implementation
//!
//! The vote recorder announces vote changes through an abstract channel so
//! the hosting application can fan them out to connected clients over
//! whatever transport it uses. Delivery and ordering guarantees belong to
//! the transport, not to this crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;
use crate::utils::errors::Result;

/// Announcement that the votes of a show changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteUpdate {
    pub show_id: i64,
}

/// Abstract channel for vote update announcements
#[async_trait]
pub trait VoteUpdateChannel: Send + Sync {
    async fn publish(&self, update: VoteUpdate) -> Result<()>;
}

/// In-process channel backed by a tokio broadcast sender
///
/// Subscribers that fall behind lose the oldest announcements, which is
/// acceptable for a feed whose consumers re-read the tally anyway.
#[derive(Debug, Clone)]
pub struct BroadcastChannel {
    sender: broadcast::Sender<VoteUpdate>,
}

impl BroadcastChannel {
    /// Create a new channel holding up to `capacity` undelivered updates
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to vote updates
    pub fn subscribe(&self) -> broadcast::Receiver<VoteUpdate> {
        self.sender.subscribe()
    }
}

#[async_trait]
impl VoteUpdateChannel for BroadcastChannel {
    async fn publish(&self, update: VoteUpdate) -> Result<()> {
        // A send error only means nobody is subscribed right now
        let receivers = self.sender.send(update).unwrap_or(0);
        debug!(show_id = update.show_id, receivers = receivers, "Published vote update");
        Ok(())
    }
}

/// Channel that drops all announcements, for embedders without live updates
#[derive(Debug, Clone, Default)]
pub struct NullChannel;

#[async_trait]
impl VoteUpdateChannel for NullChannel {
    async fn publish(&self, _update: VoteUpdate) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_broadcast_channel_delivers_to_subscriber() {
        let channel = BroadcastChannel::new(16);
        let mut receiver = channel.subscribe();

        channel.publish(VoteUpdate { show_id: 7 }).await.unwrap();

        let update = receiver.recv().await.unwrap();
        assert_eq!(update, VoteUpdate { show_id: 7 });
    }

    #[tokio::test]
    async fn test_broadcast_channel_without_subscribers_is_ok() {
        let channel = BroadcastChannel::new(16);
        assert!(channel.publish(VoteUpdate { show_id: 1 }).await.is_ok());
    }

    #[tokio::test]
    async fn test_null_channel_accepts_updates() {
        let channel = NullChannel;
        assert!(channel.publish(VoteUpdate { show_id: 1 }).await.is_ok());
    }
}
