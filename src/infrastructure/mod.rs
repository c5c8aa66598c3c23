pub mod config;
pub mod env;
pub mod logging;
pub mod repositories;

pub use config::WalletConfig;
pub use repositories::{
    LiveCertificateRepository, LiveWalletInfoRepository, SqliteCurrentUserRepository,
    SqliteNotificationStateRepository,
};
