use cert_wallet_lib::{
    domain::{
        entities::{Certificate, CertificateKind},
        error::{DomainError, DomainResult},
        services::PersonCertificatesSources,
    },
    infrastructure::{logging, LiveCertificateRepository, LiveWalletInfoRepository, WalletConfig},
    WalletServices,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// One certificate of a wallet export file.
#[derive(Debug, Deserialize)]
struct CertificateRecord {
    holder_name: String,
    date_of_birth: NaiveDate,
    #[serde(default)]
    has_notification_badge: bool,
    kind: CertificateKind,
}

impl From<CertificateRecord> for Certificate {
    fn from(record: CertificateRecord) -> Self {
        Certificate::new(record.holder_name, record.date_of_birth, record.kind)
            .with_badge(record.has_notification_badge)
    }
}

fn load_sources(path: &str) -> DomainResult<PersonCertificatesSources> {
    let records: Vec<CertificateRecord> = serde_json::from_str(&std::fs::read_to_string(path)?)?;

    let (mut vaccinations, mut tests, mut recoveries) = (Vec::new(), Vec::new(), Vec::new());
    for certificate in records.into_iter().map(Certificate::from) {
        match certificate.kind {
            CertificateKind::Vaccination(_) => vaccinations.push(certificate),
            CertificateKind::Test(_) => tests.push(certificate),
            CertificateKind::Recovery(_) => recoveries.push(certificate),
        }
    }

    Ok(PersonCertificatesSources {
        vaccinations: Arc::new(LiveCertificateRepository::new(vaccinations)),
        tests: Arc::new(LiveCertificateRepository::new(tests)),
        recoveries: Arc::new(LiveCertificateRepository::new(recoveries)),
        wallet_infos: Arc::new(LiveWalletInfoRepository::default()),
    })
}

#[tokio::main]
async fn main() -> DomainResult<()> {
    // Load environment variables
    let config = WalletConfig::from_env();
    logging::init(&config.log_filter);

    let path = std::env::args().nth(1).ok_or_else(|| {
        DomainError::ValidationError("usage: cert-wallet <certificates.json>".to_string())
    })?;

    let services = WalletServices::start(&config, load_sources(&path)?).await?;
    let summaries = services.use_cases.person_summaries();
    info!("Grouped certificates into {} persons", summaries.len());
    println!("{}", serde_json::to_string_pretty(&summaries)?);

    services.shutdown().await;
    Ok(())
}
