use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum WalletEvent {
    NotificationAcknowledged {
        person_identifier_code: String,
        identifier: String,
        acknowledged_at: DateTime<Utc>,
    },
    PersonsRecomputed {
        person_count: usize,
        badge_count: usize,
        computed_at: DateTime<Utc>,
    },
}

impl WalletEvent {
    pub fn notification_acknowledged(person_identifier_code: String, identifier: String) -> Self {
        Self::NotificationAcknowledged {
            person_identifier_code,
            identifier,
            acknowledged_at: Utc::now(),
        }
    }

    pub fn persons_recomputed(person_count: usize, badge_count: usize) -> Self {
        Self::PersonsRecomputed {
            person_count,
            badge_count,
            computed_at: Utc::now(),
        }
    }
}
