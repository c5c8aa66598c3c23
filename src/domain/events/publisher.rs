use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::trace;

use super::WalletEvent;
use crate::domain::error::DomainResult;

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish_event(&self, event: WalletEvent) -> DomainResult<()>;
}

pub type DynEventPublisher = Arc<dyn EventPublisher>;

#[derive(Default)]
pub struct NoopEventPublisher;

#[async_trait]
impl EventPublisher for NoopEventPublisher {
    async fn publish_event(&self, _event: WalletEvent) -> DomainResult<()> {
        Ok(())
    }
}

/// Fans events out to every live subscriber. Slow subscribers lag and lose
/// the oldest events; publishing without subscribers is not an error.
#[derive(Debug, Clone)]
pub struct BroadcastEventPublisher {
    sender: broadcast::Sender<WalletEvent>,
}

impl BroadcastEventPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.sender.subscribe()
    }
}

#[async_trait]
impl EventPublisher for BroadcastEventPublisher {
    async fn publish_event(&self, event: WalletEvent) -> DomainResult<()> {
        if self.sender.send(event).is_err() {
            trace!("No subscribers for wallet event");
        }
        Ok(())
    }
}
