use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` subscriber. Returns `false` when a subscriber
/// was already installed, which is not an error.
pub fn init(filter: &str) -> bool {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(false)
        .try_init()
        .is_ok()
}
