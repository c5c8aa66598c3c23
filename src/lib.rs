pub mod application;
pub mod domain;
pub mod infrastructure;

use application::PersonCertificatesUseCases;
use domain::{
    error::DomainResult,
    events::{BroadcastEventPublisher, DynEventPublisher},
    repositories::{DynCurrentUserRepository, DynNotificationStateRepository},
    services::{NotificationAcknowledger, PersonCertificatesProvider, PersonCertificatesSources},
};
use infrastructure::{
    repositories::{
        open_connection, SqliteCurrentUserRepository, SqliteNotificationStateRepository,
        SqliteRepository,
    },
    WalletConfig,
};
use std::sync::Arc;
use tracing::info;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Everything a host application needs from the wallet core, wired together.
pub struct WalletServices {
    pub use_cases: Arc<PersonCertificatesUseCases>,
    pub provider: Arc<PersonCertificatesProvider>,
    pub acknowledger: Arc<NotificationAcknowledger>,
    pub current_user: Arc<SqliteCurrentUserRepository>,
    pub events: BroadcastEventPublisher,
}

impl WalletServices {
    /// Opens persisted state and starts merging `sources`.
    pub async fn start(config: &WalletConfig, sources: PersonCertificatesSources) -> DomainResult<Self> {
        // Separate connections: preference reads must not queue behind
        // acknowledgment writes.
        let database_path = config.database_path.as_deref();
        let current_user =
            Arc::new(SqliteCurrentUserRepository::new(open_connection(database_path)?).await?);
        let notification_state =
            Arc::new(SqliteNotificationStateRepository::new(open_connection(database_path)?).await?);
        let acknowledged_count = notification_state.count().await?;
        let notification_state = notification_state as DynNotificationStateRepository;

        let events = BroadcastEventPublisher::new(EVENT_CHANNEL_CAPACITY);
        let event_publisher = Arc::new(events.clone()) as DynEventPublisher;

        let provider = Arc::new(
            PersonCertificatesProvider::start(
                sources,
                current_user.clone() as DynCurrentUserRepository,
                event_publisher.clone(),
            )
            .await,
        );
        let acknowledger = Arc::new(NotificationAcknowledger::new(
            notification_state,
            event_publisher,
        ));
        let use_cases = Arc::new(PersonCertificatesUseCases::new(
            provider.clone(),
            acknowledger.clone(),
            current_user.clone(),
        ));

        info!(
            "Wallet services started. Persistent: {}, Acknowledged notifications: {}",
            config.database_path.is_some(),
            acknowledged_count
        );

        Ok(Self {
            use_cases,
            provider,
            acknowledger,
            current_user,
            events,
        })
    }

    pub async fn shutdown(&self) {
        self.provider.shutdown().await;
        info!("Wallet services stopped");
    }
}
