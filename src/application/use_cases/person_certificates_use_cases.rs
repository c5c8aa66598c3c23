use crate::domain::{
    entities::{PersonCertificates, PersonIdentifier},
    error::{DomainError, DomainResult},
    repositories::{AcknowledgeOutcome, DynCurrentUserRepository},
    services::{
        DetailsState, NotificationAcknowledger, NotificationDetailsCoordinator,
        PersonCertificatesProvider, PersonCertificatesSet,
    },
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// Compact row for person overviews.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonSummary {
    pub person_identifier_code: String,
    pub display_name: Option<String>,
    pub certificate_count: usize,
    pub badge_count: usize,
    pub is_current_user: bool,
}

impl From<&PersonCertificates> for PersonSummary {
    fn from(person: &PersonCertificates) -> Self {
        Self {
            person_identifier_code: person.code(),
            display_name: person.display_name().map(str::to_string),
            certificate_count: person.certificates.len(),
            badge_count: person.badge_count,
            is_current_user: person.is_current_user,
        }
    }
}

pub struct PersonCertificatesUseCases {
    provider: Arc<PersonCertificatesProvider>,
    acknowledger: Arc<NotificationAcknowledger>,
    details: NotificationDetailsCoordinator,
    current_user: DynCurrentUserRepository,
}

impl PersonCertificatesUseCases {
    pub fn new(
        provider: Arc<PersonCertificatesProvider>,
        acknowledger: Arc<NotificationAcknowledger>,
        current_user: DynCurrentUserRepository,
    ) -> Self {
        let details =
            NotificationDetailsCoordinator::new(provider.person_certificates(), acknowledger.clone());
        Self {
            provider,
            acknowledger,
            details,
            current_user,
        }
    }

    pub fn person_groups(&self) -> watch::Receiver<PersonCertificatesSet> {
        self.provider.person_certificates()
    }

    pub fn persons_badge_count(&self) -> watch::Receiver<usize> {
        self.provider.persons_badge_count()
    }

    pub fn person_summaries(&self) -> Vec<PersonSummary> {
        self.provider
            .current()
            .iter()
            .map(PersonSummary::from)
            .collect()
    }

    pub fn person_details(&self, person_identifier_code: &str) -> DomainResult<PersonCertificates> {
        self.provider
            .find_person(person_identifier_code)
            .ok_or_else(|| {
                DomainError::NotFoundError(format!(
                    "Person with code {} not found",
                    person_identifier_code
                ))
            })
    }

    pub fn current_user(&self) -> Option<PersonCertificates> {
        self.provider
            .current()
            .iter()
            .find(|person| person.is_current_user)
            .cloned()
    }

    /// Records which person owns the device; the person view follows.
    pub async fn select_current_user(&self, person_identifier_code: &str) -> DomainResult<()> {
        let person = self.person_details(person_identifier_code)?;
        self.current_user.set(person.person_identifier).await
    }

    pub async fn acknowledge(
        &self,
        person_identifier: &PersonIdentifier,
        identifier: &str,
    ) -> DomainResult<AcknowledgeOutcome> {
        self.acknowledger.acknowledge(person_identifier, identifier).await
    }

    pub async fn acknowledge_by_code(
        &self,
        person_identifier_code: &str,
        identifier: &str,
    ) -> DomainResult<AcknowledgeOutcome> {
        self.acknowledger
            .acknowledge_code(person_identifier_code, identifier)
            .await
    }

    pub fn observe_notification(
        &self,
        person_identifier_code: impl Into<String>,
    ) -> watch::Receiver<DetailsState> {
        self.details.observe(person_identifier_code)
    }
}
