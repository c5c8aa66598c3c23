use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-person notification produced by the rule engine. Opaque to the wallet
/// apart from `identifier`, which drives acknowledgment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletNotification {
    pub identifier: Option<String>,
    pub title_text: String,
    pub subtitle_text: String,
    pub long_text: String,
    pub faq_anchor: String,
}

impl WalletNotification {
    /// Identifier worth acknowledging; blank identifiers count as absent.
    pub fn acknowledgeable_identifier(&self) -> Option<&str> {
        self.identifier
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonWalletInfo {
    /// [`PersonIdentifier::code`](super::PersonIdentifier::code) of the owner.
    pub person_identifier_code: String,
    pub notification: Option<WalletNotification>,
    pub updated_at: DateTime<Utc>,
}

impl PersonWalletInfo {
    pub fn new(person_identifier_code: String, notification: Option<WalletNotification>) -> Self {
        Self {
            person_identifier_code,
            notification,
            updated_at: Utc::now(),
        }
    }
}
