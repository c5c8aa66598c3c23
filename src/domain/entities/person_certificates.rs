use super::{
    certificate::Certificate, person_identifier::PersonIdentifier, wallet_info::PersonWalletInfo,
};
use serde::{Deserialize, Serialize};

/// All certificates attributed to one person, as produced by one aggregation
/// pass. Recomputed, never mutated, whenever an input changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonCertificates {
    pub person_identifier: PersonIdentifier,
    pub certificates: Vec<Certificate>,
    pub is_current_user: bool,
    pub badge_count: usize,
    pub wallet_info: Option<PersonWalletInfo>,
}

impl PersonCertificates {
    pub fn new(person_identifier: PersonIdentifier) -> Self {
        Self {
            person_identifier,
            certificates: Vec::new(),
            is_current_user: false,
            badge_count: 0,
            wallet_info: None,
        }
    }

    pub(crate) fn push(&mut self, certificate: Certificate) {
        if certificate.has_notification_badge {
            self.badge_count += 1;
        }
        self.certificates.push(certificate);
    }

    pub fn code(&self) -> String {
        self.person_identifier.code()
    }

    /// Holder name of the first certificate, which is how the person is shown.
    pub fn display_name(&self) -> Option<&str> {
        self.certificates.first().map(|c| c.holder_name.as_str())
    }
}

pub fn persons_badge_count(persons: &[PersonCertificates]) -> usize {
    persons.iter().map(|person| person.badge_count).sum()
}
