use crate::domain::{
    entities::PersonIdentifier,
    error::{DomainError, DomainResult},
    events::{DynEventPublisher, WalletEvent},
    repositories::{AcknowledgeOutcome, DynNotificationStateRepository},
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tracing::{debug, info, warn};

type AcknowledgmentKey = (String, String);

/// Marks per-person wallet notifications as seen.
///
/// Writes for the same `(person, identifier)` pair are serialized; pairs that
/// differ never wait on each other. Only the first acknowledgment of a pair
/// publishes an event.
pub struct NotificationAcknowledger {
    repository: DynNotificationStateRepository,
    event_publisher: DynEventPublisher,
    key_locks: Mutex<HashMap<AcknowledgmentKey, Weak<tokio::sync::Mutex<()>>>>,
}

impl NotificationAcknowledger {
    pub fn new(
        repository: DynNotificationStateRepository,
        event_publisher: DynEventPublisher,
    ) -> Self {
        Self {
            repository,
            event_publisher,
            key_locks: Mutex::new(HashMap::new()),
        }
    }

    pub async fn acknowledge(
        &self,
        person_identifier: &PersonIdentifier,
        identifier: &str,
    ) -> DomainResult<AcknowledgeOutcome> {
        self.acknowledge_code(&person_identifier.code(), identifier)
            .await
    }

    pub async fn acknowledge_code(
        &self,
        person_identifier_code: &str,
        identifier: &str,
    ) -> DomainResult<AcknowledgeOutcome> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(DomainError::ValidationError(
                "Notification identifier must not be blank".to_string(),
            ));
        }

        let key_lock = self.key_lock((person_identifier_code.to_string(), identifier.to_string()));
        let _guard = key_lock.lock().await;

        let outcome = self
            .repository
            .acknowledge(person_identifier_code, identifier)
            .await?;

        match outcome {
            AcknowledgeOutcome::Acknowledged => {
                info!(
                    "Acknowledged notification {} for person {}",
                    identifier, person_identifier_code
                );
                let event = WalletEvent::notification_acknowledged(
                    person_identifier_code.to_string(),
                    identifier.to_string(),
                );
                if let Err(error) = self.event_publisher.publish_event(event).await {
                    warn!("Failed to publish acknowledgment event: {}", error);
                }
            }
            AcknowledgeOutcome::AlreadyAcknowledged => {
                debug!(
                    "Notification {} for person {} already acknowledged",
                    identifier, person_identifier_code
                );
            }
        }

        Ok(outcome)
    }

    pub async fn is_acknowledged(
        &self,
        person_identifier: &PersonIdentifier,
        identifier: &str,
    ) -> DomainResult<bool> {
        self.repository
            .is_acknowledged(&person_identifier.code(), identifier.trim())
            .await
    }

    pub async fn acknowledged_identifiers(
        &self,
        person_identifier: &PersonIdentifier,
    ) -> DomainResult<Vec<String>> {
        self.repository
            .acknowledged_identifiers(&person_identifier.code())
            .await
    }

    fn key_lock(&self, key: AcknowledgmentKey) -> Arc<tokio::sync::Mutex<()>> {
        let mut key_locks = self.key_locks.lock();
        if let Some(existing) = key_locks.get(&key).and_then(Weak::upgrade) {
            return existing;
        }
        key_locks.retain(|_, lock| lock.strong_count() > 0);
        let lock = Arc::new(tokio::sync::Mutex::new(()));
        key_locks.insert(key, Arc::downgrade(&lock));
        lock
    }
}
