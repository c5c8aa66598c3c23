use crate::domain::entities::Certificate;
use std::sync::Arc;
use tokio::sync::watch;

/// Latest complete collection a live source holds. Sources replace the whole
/// collection on change; observers only ever see the newest one.
pub type CertificateCollection = Arc<Vec<Certificate>>;

/// A push-based certificate source (vaccination, test or recovery) owned by
/// another subsystem.
pub trait CertificateRepository: Send + Sync {
    fn certificates(&self) -> watch::Receiver<CertificateCollection>;
}

pub type DynCertificateRepository = Arc<dyn CertificateRepository>;
