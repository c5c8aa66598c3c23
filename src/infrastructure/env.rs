use std::env;

/// Returns the value of an environment variable or a default value if it is
/// unset or not valid unicode.
///
/// # Examples
///
/// ```rust
/// let filter = cert_wallet_lib::infrastructure::env::get_env_or("CERT_WALLET_LOG", "info");
/// assert!(!filter.is_empty());
/// ```
pub fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Like [`get_env_or`] but treats an empty value as unset.
pub fn get_non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
