use super::aggregation::{aggregate, SourceSnapshot};
use crate::domain::{
    entities::{persons_badge_count, PersonCertificates},
    events::{DynEventPublisher, WalletEvent},
    repositories::{
        CertificateCollection, DynCertificateRepository, DynCurrentUserRepository,
        DynWalletInfoRepository, WalletInfoCollection,
    },
};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::{sync::watch, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub type PersonCertificatesSet = Arc<Vec<PersonCertificates>>;

/// The live collaborators the provider merges.
#[derive(Clone)]
pub struct PersonCertificatesSources {
    pub vaccinations: DynCertificateRepository,
    pub tests: DynCertificateRepository,
    pub recoveries: DynCertificateRepository,
    pub wallet_infos: DynWalletInfoRepository,
}

struct SourceReceivers {
    vaccinations: watch::Receiver<CertificateCollection>,
    tests: watch::Receiver<CertificateCollection>,
    recoveries: watch::Receiver<CertificateCollection>,
    wallet_infos: watch::Receiver<WalletInfoCollection>,
    current_user_changes: watch::Receiver<u64>,
}

impl SourceReceivers {
    fn subscribe(sources: &PersonCertificatesSources, current_user: &DynCurrentUserRepository) -> Self {
        Self {
            vaccinations: sources.vaccinations.certificates(),
            tests: sources.tests.certificates(),
            recoveries: sources.recoveries.certificates(),
            wallet_infos: sources.wallet_infos.person_wallets(),
            current_user_changes: current_user.changes(),
        }
    }

    /// Takes the latest value of every source and marks it seen, so changes
    /// that arrived together trigger one pass only.
    fn snapshot(&mut self) -> SourceSnapshot {
        self.current_user_changes.borrow_and_update();
        SourceSnapshot {
            vaccinations: self.vaccinations.borrow_and_update().clone(),
            tests: self.tests.borrow_and_update().clone(),
            recoveries: self.recoveries.borrow_and_update().clone(),
            wallet_infos: self.wallet_infos.borrow_and_update().clone(),
        }
    }
}

/// Which sources can still emit. A closed source keeps contributing its
/// last value.
struct OpenSources {
    vaccinations: bool,
    tests: bool,
    recoveries: bool,
    wallet_infos: bool,
    current_user: bool,
}

impl OpenSources {
    fn any(&self) -> bool {
        self.vaccinations || self.tests || self.recoveries || self.wallet_infos || self.current_user
    }
}

/// Keeps the per-person view of all certificates up to date.
///
/// The first view is computed before [`start`](Self::start) returns; after
/// that a background task recomputes on every emission of any source and
/// publishes the result to all observers, latest value wins.
pub struct PersonCertificatesProvider {
    persons: watch::Receiver<PersonCertificatesSet>,
    badge_count: watch::Receiver<usize>,
    shutdown: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for PersonCertificatesProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersonCertificatesProvider")
            .field("persons", &self.persons.borrow().len())
            .field("badge_count", &*self.badge_count.borrow())
            .finish()
    }
}

impl PersonCertificatesProvider {
    pub async fn start(
        sources: PersonCertificatesSources,
        current_user: DynCurrentUserRepository,
        event_publisher: DynEventPublisher,
    ) -> Self {
        let mut receivers = SourceReceivers::subscribe(&sources, &current_user);
        let persons = aggregate(&receivers.snapshot(), current_user.as_ref()).await;
        let badge_count = persons_badge_count(&persons);
        info!(
            "Initial person view computed. Persons: {}, Badges: {}",
            persons.len(),
            badge_count
        );

        let (persons_tx, persons_rx) = watch::channel(Arc::new(persons));
        let (badge_tx, badge_rx) = watch::channel(badge_count);
        let shutdown = CancellationToken::new();

        let task = tokio::spawn(Self::run(
            receivers,
            current_user,
            event_publisher,
            persons_tx,
            badge_tx,
            shutdown.clone(),
        ));

        Self {
            persons: persons_rx,
            badge_count: badge_rx,
            shutdown,
            task: Mutex::new(Some(task)),
        }
    }

    /// Live ordered person view.
    pub fn person_certificates(&self) -> watch::Receiver<PersonCertificatesSet> {
        self.persons.clone()
    }

    /// Live sum of all badge counts.
    pub fn persons_badge_count(&self) -> watch::Receiver<usize> {
        self.badge_count.clone()
    }

    pub fn current(&self) -> PersonCertificatesSet {
        self.persons.borrow().clone()
    }

    pub fn find_person(&self, person_identifier_code: &str) -> Option<PersonCertificates> {
        self.persons
            .borrow()
            .iter()
            .find(|person| person.code() == person_identifier_code)
            .cloned()
    }

    /// Stops recomputing. Observers keep the last published view.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        let task = self.task.lock().take();
        if let Some(task) = task {
            if let Err(error) = task.await {
                warn!("Person aggregation task ended abnormally: {}", error);
            }
        }
    }

    async fn run(
        mut receivers: SourceReceivers,
        current_user: DynCurrentUserRepository,
        event_publisher: DynEventPublisher,
        persons_tx: watch::Sender<PersonCertificatesSet>,
        badge_tx: watch::Sender<usize>,
        shutdown: CancellationToken,
    ) {
        let mut open = OpenSources {
            vaccinations: true,
            tests: true,
            recoveries: true,
            wallet_infos: true,
            current_user: true,
        };

        while open.any() {
            let changed = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                result = receivers.vaccinations.changed(), if open.vaccinations => {
                    open.vaccinations = result.is_ok();
                    result.is_ok()
                }
                result = receivers.tests.changed(), if open.tests => {
                    open.tests = result.is_ok();
                    result.is_ok()
                }
                result = receivers.recoveries.changed(), if open.recoveries => {
                    open.recoveries = result.is_ok();
                    result.is_ok()
                }
                result = receivers.wallet_infos.changed(), if open.wallet_infos => {
                    open.wallet_infos = result.is_ok();
                    result.is_ok()
                }
                result = receivers.current_user_changes.changed(), if open.current_user => {
                    open.current_user = result.is_ok();
                    result.is_ok()
                }
            };
            if !changed {
                continue;
            }

            let snapshot = receivers.snapshot();
            let persons = aggregate(&snapshot, current_user.as_ref()).await;
            let badge_count = persons_badge_count(&persons);
            debug!(
                "Person view recomputed. Certificates: {}, Persons: {}, Badges: {}",
                snapshot.certificate_count(),
                persons.len(),
                badge_count
            );

            let person_count = persons.len();
            persons_tx.send_replace(Arc::new(persons));
            badge_tx.send_if_modified(|current| {
                if *current == badge_count {
                    false
                } else {
                    *current = badge_count;
                    true
                }
            });

            if let Err(error) = event_publisher
                .publish_event(WalletEvent::persons_recomputed(person_count, badge_count))
                .await
            {
                warn!("Failed to publish recompute event: {}", error);
            }
        }

        info!("Person aggregation stopped");
    }
}

impl Drop for PersonCertificatesProvider {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
