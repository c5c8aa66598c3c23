pub mod acknowledgment;
pub mod aggregation;
pub mod notification_details;
pub mod person_certificates_provider;

pub use acknowledgment::NotificationAcknowledger;
pub use aggregation::{aggregate, group_certificates, resolve_current_user, SourceSnapshot};
pub use notification_details::{
    DetailsError, DetailsState, NotificationDetailsCoordinator, NotificationUiState,
};
pub use person_certificates_provider::{
    PersonCertificatesProvider, PersonCertificatesSet, PersonCertificatesSources,
};
