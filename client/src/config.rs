//! Supabase connection configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Configuration values for the Supabase project connection.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SUPABASE")]
pub struct SupabaseSettings {
    /// Project URL, e.g. `https://<ref>.supabase.co`.
    pub url: String,
    /// Anonymous API key used before a session is established.
    pub anon_key: String,
    /// Per-request timeout in seconds.
    pub request_timeout_seconds: Option<u64>,
}

impl SupabaseSettings {
    /// Return the configured request timeout, falling back to the default.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_seconds
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        )
    }
}
