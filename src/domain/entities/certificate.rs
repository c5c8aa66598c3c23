use super::person_identifier::PersonIdentifier;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VaccinationDetails {
    pub vaccinated_on: NaiveDate,
    pub medical_product: String,
    pub manufacturer: String,
    pub dose_number: u32,
    pub total_series_of_doses: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestDetails {
    pub sample_collected_at: DateTime<Utc>,
    pub test_type: String,
    pub test_result: String,
    pub testing_center: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecoveryDetails {
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    pub first_positive_test_on: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CertificateKind {
    Vaccination(VaccinationDetails),
    Test(TestDetails),
    Recovery(RecoveryDetails),
}

impl fmt::Display for CertificateKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CertificateKind::Vaccination(_) => write!(f, "Vaccination"),
            CertificateKind::Test(_) => write!(f, "Test"),
            CertificateKind::Recovery(_) => write!(f, "Recovery"),
        }
    }
}

/// A decoded health certificate as handed over by its owning repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Certificate {
    pub id: Uuid,
    pub holder_name: String,
    pub date_of_birth: NaiveDate,
    pub person_identifier: PersonIdentifier,
    pub has_notification_badge: bool,
    pub kind: CertificateKind,
}

impl Certificate {
    pub fn new(holder_name: String, date_of_birth: NaiveDate, kind: CertificateKind) -> Self {
        let person_identifier = PersonIdentifier::new(&holder_name, date_of_birth);
        Self {
            id: Uuid::new_v4(),
            holder_name,
            date_of_birth,
            person_identifier,
            has_notification_badge: false,
            kind,
        }
    }

    pub fn vaccination(holder_name: &str, date_of_birth: NaiveDate, details: VaccinationDetails) -> Self {
        Self::new(
            holder_name.to_string(),
            date_of_birth,
            CertificateKind::Vaccination(details),
        )
    }

    pub fn test(holder_name: &str, date_of_birth: NaiveDate, details: TestDetails) -> Self {
        Self::new(
            holder_name.to_string(),
            date_of_birth,
            CertificateKind::Test(details),
        )
    }

    pub fn recovery(holder_name: &str, date_of_birth: NaiveDate, details: RecoveryDetails) -> Self {
        Self::new(
            holder_name.to_string(),
            date_of_birth,
            CertificateKind::Recovery(details),
        )
    }

    pub fn with_badge(mut self, has_notification_badge: bool) -> Self {
        self.has_notification_badge = has_notification_badge;
        self
    }

    /// Date shown next to the certificate: vaccination day, sample collection
    /// day or start of recovery validity.
    pub fn relevant_date(&self) -> NaiveDate {
        match &self.kind {
            CertificateKind::Vaccination(details) => details.vaccinated_on,
            CertificateKind::Test(details) => details.sample_collected_at.date_naive(),
            CertificateKind::Recovery(details) => details.valid_from,
        }
    }

    pub fn set_notification_badge(&mut self, has_notification_badge: bool) {
        self.has_notification_badge = has_notification_badge;
    }
}
