use crate::domain::error::DomainResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AcknowledgeOutcome {
    Acknowledged,
    AlreadyAcknowledged,
}

/// Persisted seen/unseen flag per `(person code, notification identifier)`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NotificationStateRepository: Send + Sync {
    /// Compare-and-set from unseen to seen. Must report
    /// [`AcknowledgeOutcome::AlreadyAcknowledged`] without touching stored
    /// state when the pair was seen before.
    async fn acknowledge(
        &self,
        person_identifier_code: &str,
        identifier: &str,
    ) -> DomainResult<AcknowledgeOutcome>;
    async fn is_acknowledged(
        &self,
        person_identifier_code: &str,
        identifier: &str,
    ) -> DomainResult<bool>;
    async fn acknowledged_identifiers(
        &self,
        person_identifier_code: &str,
    ) -> DomainResult<Vec<String>>;
}

pub type DynNotificationStateRepository = Arc<dyn NotificationStateRepository>;
