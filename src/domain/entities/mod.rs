pub mod certificate;
pub mod name;
pub mod person_certificates;
pub mod person_identifier;
pub mod wallet_info;

pub use certificate::{
    Certificate, CertificateKind, RecoveryDetails, TestDetails, VaccinationDetails,
};

pub use name::normalize;
pub use person_certificates::{persons_badge_count, PersonCertificates};
pub use person_identifier::PersonIdentifier;
pub use wallet_info::{PersonWalletInfo, WalletNotification};
