use std::sync::Once;
use tracing_subscriber::{self, fmt::format::FmtSpan};

pub use mock::*;

// Test utilities
pub mod test_utils;
pub use test_utils::*;

static INIT: Once = Once::new();

pub fn init() {
    INIT.call_once(|| {
        dotenv::dotenv().ok();

        if std::env::var("CERT_WALLET_LOG").is_err() {
            std::env::set_var("CERT_WALLET_LOG", "debug");
        }

        // Try to initialize tracing, ignore if it's already initialized
        let _ = tracing_subscriber::fmt()
            .with_env_filter(std::env::var("CERT_WALLET_LOG").unwrap_or_else(|_| "debug".into()))
            .with_span_events(FmtSpan::CLOSE)
            .with_test_writer()
            .compact()
            .try_init();
    });
}
