pub mod certificate_repository;
pub mod current_user_repository;
pub mod notification_state_repository;
pub mod wallet_info_repository;

pub use certificate_repository::{
    CertificateCollection, CertificateRepository, DynCertificateRepository,
};
pub use current_user_repository::{CurrentUserRepository, DynCurrentUserRepository};
pub use notification_state_repository::{
    AcknowledgeOutcome, DynNotificationStateRepository, NotificationStateRepository,
};
pub use wallet_info_repository::{
    DynWalletInfoRepository, WalletInfoCollection, WalletInfoRepository,
};

#[cfg(test)]
pub use current_user_repository::MockCurrentUserRepository;

#[cfg(test)]
pub use notification_state_repository::MockNotificationStateRepository;
