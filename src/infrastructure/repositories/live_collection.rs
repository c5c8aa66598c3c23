use crate::domain::{
    entities::{Certificate, PersonWalletInfo},
    repositories::{
        CertificateCollection, CertificateRepository, WalletInfoCollection, WalletInfoRepository,
    },
};
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

/// Whole-collection value observers can subscribe to. Every mutation
/// publishes a fresh `Arc<Vec<T>>`; observers that fall behind only see the
/// newest one.
#[derive(Debug)]
pub struct LiveCollection<T> {
    sender: watch::Sender<Arc<Vec<T>>>,
}

impl<T> Default for LiveCollection<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> LiveCollection<T> {
    pub fn new(items: Vec<T>) -> Self {
        let (sender, _) = watch::channel(Arc::new(items));
        Self { sender }
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<T>>> {
        self.sender.subscribe()
    }

    pub fn current(&self) -> Arc<Vec<T>> {
        self.sender.borrow().clone()
    }

    pub fn replace(&self, items: Vec<T>) {
        self.sender.send_replace(Arc::new(items));
    }
}

impl<T: Clone> LiveCollection<T> {
    /// Applies `change` to a copy of the current items and publishes the
    /// result when `change` reports a modification.
    pub fn update<F>(&self, change: F) -> bool
    where
        F: FnOnce(&mut Vec<T>) -> bool,
    {
        self.sender.send_if_modified(|items| {
            let mut updated = items.as_ref().clone();
            if change(&mut updated) {
                *items = Arc::new(updated);
                true
            } else {
                false
            }
        })
    }
}

/// Certificate source kept in memory, standing in for a repository that
/// owns vaccination, test or recovery certificates.
#[derive(Debug, Default)]
pub struct LiveCertificateRepository {
    certificates: LiveCollection<Certificate>,
}

impl LiveCertificateRepository {
    pub fn new(certificates: Vec<Certificate>) -> Self {
        Self {
            certificates: LiveCollection::new(certificates),
        }
    }

    pub fn current(&self) -> CertificateCollection {
        self.certificates.current()
    }

    pub fn replace(&self, certificates: Vec<Certificate>) {
        self.certificates.replace(certificates);
    }

    /// Replaces the certificate with the same id or appends it.
    pub fn upsert(&self, certificate: Certificate) {
        self.certificates.update(|certificates| {
            match certificates.iter_mut().find(|c| c.id == certificate.id) {
                Some(existing) => *existing = certificate,
                None => certificates.push(certificate),
            }
            true
        });
    }

    pub fn remove(&self, id: Uuid) -> bool {
        self.certificates.update(|certificates| {
            let before = certificates.len();
            certificates.retain(|c| c.id != id);
            certificates.len() != before
        })
    }

    pub fn set_notification_badge(&self, id: Uuid, has_notification_badge: bool) -> bool {
        self.certificates.update(|certificates| {
            match certificates
                .iter_mut()
                .find(|c| c.id == id && c.has_notification_badge != has_notification_badge)
            {
                Some(certificate) => {
                    certificate.set_notification_badge(has_notification_badge);
                    true
                }
                None => false,
            }
        })
    }
}

impl CertificateRepository for LiveCertificateRepository {
    fn certificates(&self) -> watch::Receiver<CertificateCollection> {
        self.certificates.subscribe()
    }
}

#[derive(Debug, Default)]
pub struct LiveWalletInfoRepository {
    wallets: LiveCollection<PersonWalletInfo>,
}

impl LiveWalletInfoRepository {
    pub fn new(wallets: Vec<PersonWalletInfo>) -> Self {
        Self {
            wallets: LiveCollection::new(wallets),
        }
    }

    pub fn replace(&self, wallets: Vec<PersonWalletInfo>) {
        self.wallets.replace(wallets);
    }

    /// Stores the wallet info for its person, replacing an older one.
    pub fn upsert(&self, wallet: PersonWalletInfo) {
        self.wallets.update(|wallets| {
            wallets.retain(|w| w.person_identifier_code != wallet.person_identifier_code);
            wallets.push(wallet);
            true
        });
    }
}

impl WalletInfoRepository for LiveWalletInfoRepository {
    fn person_wallets(&self) -> watch::Receiver<WalletInfoCollection> {
        self.wallets.subscribe()
    }
}
