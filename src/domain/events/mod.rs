pub mod publisher;
pub mod wallet_events;

pub use publisher::{
    BroadcastEventPublisher, DynEventPublisher, EventPublisher, NoopEventPublisher,
};
pub use wallet_events::WalletEvent;
