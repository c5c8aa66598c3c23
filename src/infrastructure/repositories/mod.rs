pub mod live_collection;
pub mod sqlite_base;
pub mod sqlite_current_user_repository;
pub mod sqlite_notification_state_repository;

pub use live_collection::{LiveCertificateRepository, LiveCollection, LiveWalletInfoRepository};
pub use sqlite_base::{open_connection, SharedConnection, SqliteRepository};
pub use sqlite_current_user_repository::SqliteCurrentUserRepository;
pub use sqlite_notification_state_repository::SqliteNotificationStateRepository;
