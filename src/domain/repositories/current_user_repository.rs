use crate::domain::{entities::PersonIdentifier, error::DomainResult};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;

#[cfg(test)]
use mockall::automock;

/// Persisted "who owns this device" preference.
///
/// `changes` lets observers react to updates without reading the value, so
/// the value itself is only fetched when it is actually needed.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CurrentUserRepository: Send + Sync {
    async fn get(&self) -> DomainResult<Option<PersonIdentifier>>;
    async fn set(&self, person_identifier: PersonIdentifier) -> DomainResult<()>;
    async fn clear(&self) -> DomainResult<()>;
    fn changes(&self) -> watch::Receiver<u64>;
}

pub type DynCurrentUserRepository = Arc<dyn CurrentUserRepository>;
