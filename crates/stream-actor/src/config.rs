//! Tunables for actor mailboxes, subscriber channels, and heartbeats.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration shared by every actor a directory spawns.
///
/// Serde-derived so a host can load it from a config file or environment
/// alongside its own settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorConfig {
    /// Capacity of the actor's request mailbox. Senders queue when full.
    pub mailbox_capacity: usize,
    /// Capacity of each subscriber's frame channel. A subscriber that lets
    /// this fill up is treated as failed and pruned.
    pub subscriber_capacity: usize,
    /// Period between keepalive frames; also the worst-case time to reclaim
    /// a dead subscriber.
    pub heartbeat_interval: Duration,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 64,
            subscriber_capacity: 32,
            heartbeat_interval: Duration::from_secs(30),
        }
    }
}
