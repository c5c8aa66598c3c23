use super::{acknowledgment::NotificationAcknowledger, PersonCertificatesSet};
use crate::domain::entities::{PersonCertificates, WalletNotification};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationUiState {
    pub title_text: String,
    pub subtitle_text: String,
    pub long_text: String,
    pub faq_anchor: Option<String>,
}

impl From<&WalletNotification> for NotificationUiState {
    fn from(notification: &WalletNotification) -> Self {
        let faq_anchor = notification.faq_anchor.trim();
        Self {
            title_text: notification.title_text.clone(),
            subtitle_text: notification.subtitle_text.clone(),
            long_text: notification.long_text.clone(),
            faq_anchor: (!faq_anchor.is_empty()).then(|| faq_anchor.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailsState {
    Loading,
    Ready(NotificationUiState),
    /// Terminal: the view should close. Nothing follows it.
    Closed,
}

#[derive(Error, Debug, PartialEq)]
pub enum DetailsError {
    #[error("No person found for {0}")]
    PersonNotFound(String),
    #[error("No wallet notification for {0}")]
    NotificationUnavailable(String),
}

/// Derives the notification details of one person and acknowledges the
/// notification as seen while doing so.
#[derive(Clone)]
pub struct NotificationDetailsCoordinator {
    persons: watch::Receiver<PersonCertificatesSet>,
    acknowledger: Arc<NotificationAcknowledger>,
}

impl NotificationDetailsCoordinator {
    pub fn new(
        persons: watch::Receiver<PersonCertificatesSet>,
        acknowledger: Arc<NotificationAcknowledger>,
    ) -> Self {
        Self {
            persons,
            acknowledger,
        }
    }

    /// One derivation over an aggregated view.
    ///
    /// A failing acknowledgment write is logged and does not hold back the
    /// state; the next derivation retries it.
    pub async fn derive_and_acknowledge(
        &self,
        persons: &[PersonCertificates],
        person_identifier_code: &str,
    ) -> Result<NotificationUiState, DetailsError> {
        let person = persons
            .iter()
            .find(|person| person.code() == person_identifier_code)
            .ok_or_else(|| DetailsError::PersonNotFound(person_identifier_code.to_string()))?;

        let notification = person
            .wallet_info
            .as_ref()
            .and_then(|info| info.notification.as_ref())
            .ok_or_else(|| {
                DetailsError::NotificationUnavailable(person_identifier_code.to_string())
            })?;

        if let Some(identifier) = notification.acknowledgeable_identifier() {
            if let Err(error) = self
                .acknowledger
                .acknowledge(&person.person_identifier, identifier)
                .await
            {
                warn!(
                    "Failed to acknowledge notification {} for {}: {}",
                    identifier, person_identifier_code, error
                );
            }
        }

        Ok(NotificationUiState::from(notification))
    }

    /// Follows one person. The returned channel starts at
    /// [`DetailsState::Loading`], then carries a state per aggregated view and
    /// ends with [`DetailsState::Closed`] once the person can no longer be
    /// shown. Dropping the receiver stops the observation.
    pub fn observe(&self, person_identifier_code: impl Into<String>) -> watch::Receiver<DetailsState> {
        let person_identifier_code = person_identifier_code.into();
        let (state_tx, state_rx) = watch::channel(DetailsState::Loading);
        let coordinator = self.clone();

        tokio::spawn(async move {
            let mut persons = coordinator.persons.clone();
            loop {
                let snapshot = persons.borrow_and_update().clone();
                match coordinator
                    .derive_and_acknowledge(&snapshot, &person_identifier_code)
                    .await
                {
                    Ok(state) => {
                        state_tx.send_replace(DetailsState::Ready(state));
                    }
                    Err(error) => {
                        // Previous screens only link persons that exist.
                        debug!("Closing notification details: {}", error);
                        state_tx.send_replace(DetailsState::Closed);
                        break;
                    }
                }

                tokio::select! {
                    _ = state_tx.closed() => break,
                    changed = persons.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        state_rx
    }
}
