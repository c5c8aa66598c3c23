pub mod entities;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

pub use entities::{
    normalize, Certificate, CertificateKind, PersonCertificates, PersonIdentifier,
    PersonWalletInfo, RecoveryDetails, TestDetails, VaccinationDetails, WalletNotification,
};

pub use error::{DomainError, DomainResult};

pub use repositories::{
    AcknowledgeOutcome, CertificateRepository, CurrentUserRepository,
    DynCertificateRepository, DynCurrentUserRepository, DynNotificationStateRepository,
    DynWalletInfoRepository, NotificationStateRepository, WalletInfoRepository,
};

pub use services::{
    NotificationAcknowledger, NotificationDetailsCoordinator, PersonCertificatesProvider,
    PersonCertificatesSources,
};
