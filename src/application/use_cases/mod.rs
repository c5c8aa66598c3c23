pub mod person_certificates_use_cases;

pub use person_certificates_use_cases::{PersonCertificatesUseCases, PersonSummary};
