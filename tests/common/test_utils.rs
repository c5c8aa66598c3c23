use cert_wallet_lib::{
    domain::{
        entities::{
            Certificate, PersonIdentifier, PersonWalletInfo, RecoveryDetails, TestDetails,
            VaccinationDetails, WalletNotification,
        },
        events::DynEventPublisher,
        repositories::DynCurrentUserRepository,
        services::{PersonCertificatesProvider, PersonCertificatesSet, PersonCertificatesSources},
    },
    infrastructure::{LiveCertificateRepository, LiveWalletInfoRepository},
};
use chrono::{NaiveDate, TimeZone, Utc};
use std::{sync::Arc, time::Duration};
use tokio::sync::watch;

pub const WAIT: Duration = Duration::from_secs(2);

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn vaccination(name: &str, date_of_birth: NaiveDate, vaccinated_on: NaiveDate) -> Certificate {
    Certificate::vaccination(
        name,
        date_of_birth,
        VaccinationDetails {
            vaccinated_on,
            medical_product: "EU/1/20/1528".to_string(),
            manufacturer: "ORG-100030215".to_string(),
            dose_number: 2,
            total_series_of_doses: 2,
        },
    )
}

pub fn test_certificate(name: &str, date_of_birth: NaiveDate, collected_on: NaiveDate) -> Certificate {
    Certificate::test(
        name,
        date_of_birth,
        TestDetails {
            sample_collected_at: Utc
                .from_utc_datetime(&collected_on.and_hms_opt(8, 15, 0).unwrap()),
            test_type: "LP217198-3".to_string(),
            test_result: "260415000".to_string(),
            testing_center: Some("Testzentrum Berlin".to_string()),
        },
    )
}

pub fn recovery(name: &str, date_of_birth: NaiveDate, valid_from: NaiveDate) -> Certificate {
    Certificate::recovery(
        name,
        date_of_birth,
        RecoveryDetails {
            valid_from,
            valid_until: valid_from + chrono::Duration::days(180),
            first_positive_test_on: valid_from - chrono::Duration::days(11),
        },
    )
}

pub fn wallet_notification(identifier: Option<&str>) -> WalletNotification {
    WalletNotification {
        identifier: identifier.map(str::to_string),
        title_text: "Booster vaccination".to_string(),
        subtitle_text: "Recommended by STIKO".to_string(),
        long_text: "Based on your certificates you may be eligible for a booster.".to_string(),
        faq_anchor: "dcc_admission_state".to_string(),
    }
}

pub fn wallet_info(person: &PersonIdentifier, identifier: Option<&str>) -> PersonWalletInfo {
    PersonWalletInfo::new(person.code(), Some(wallet_notification(identifier)))
}

/// In-memory sources a test can mutate while a provider observes them.
#[derive(Clone, Default)]
pub struct LiveSources {
    pub vaccinations: Arc<LiveCertificateRepository>,
    pub tests: Arc<LiveCertificateRepository>,
    pub recoveries: Arc<LiveCertificateRepository>,
    pub wallet_infos: Arc<LiveWalletInfoRepository>,
}

impl LiveSources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sources(&self) -> PersonCertificatesSources {
        PersonCertificatesSources {
            vaccinations: self.vaccinations.clone(),
            tests: self.tests.clone(),
            recoveries: self.recoveries.clone(),
            wallet_infos: self.wallet_infos.clone(),
        }
    }

    pub async fn start(
        &self,
        current_user: DynCurrentUserRepository,
        event_publisher: DynEventPublisher,
    ) -> PersonCertificatesProvider {
        PersonCertificatesProvider::start(self.sources(), current_user, event_publisher).await
    }
}

/// Waits until the person view satisfies `predicate`.
pub async fn wait_for_persons<F>(
    persons: &mut watch::Receiver<PersonCertificatesSet>,
    predicate: F,
) -> PersonCertificatesSet
where
    F: FnMut(&PersonCertificatesSet) -> bool,
{
    let view = tokio::time::timeout(WAIT, persons.wait_for(predicate))
        .await
        .expect("timed out waiting for person view")
        .expect("person view closed");
    view.clone()
}

/// Polls `condition` until it holds or the wait times out.
pub async fn eventually<F, Fut>(mut condition: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + WAIT;
    while tokio::time::Instant::now() < deadline {
        if condition().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
