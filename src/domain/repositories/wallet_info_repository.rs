use crate::domain::entities::PersonWalletInfo;
use std::sync::Arc;
use tokio::sync::watch;

pub type WalletInfoCollection = Arc<Vec<PersonWalletInfo>>;

/// Live per-person notification payloads from the rule engine.
pub trait WalletInfoRepository: Send + Sync {
    fn person_wallets(&self) -> watch::Receiver<WalletInfoCollection>;
}

pub type DynWalletInfoRepository = Arc<dyn WalletInfoRepository>;
