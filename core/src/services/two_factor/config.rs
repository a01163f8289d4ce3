//! Configuration for the two-factor service

use std::time::Duration;

/// Default interval between background sweeps
pub const DEFAULT_SWEEP_INTERVAL_SECONDS: u64 = 60;

/// Configuration for the two-factor service
#[derive(Debug, Clone)]
pub struct TwoFactorConfig {
    /// Product name shown in email subjects and bodies
    pub service_name: String,
    /// Support address printed in the email footer
    pub support_email: String,
    /// How often the reaper sweeps expired entries
    pub sweep_interval_seconds: u64,
}

impl Default for TwoFactorConfig {
    fn default() -> Self {
        Self {
            service_name: String::from("Raven AI"),
            support_email: String::from("support@ravenai.site"),
            sweep_interval_seconds: DEFAULT_SWEEP_INTERVAL_SECONDS,
        }
    }
}

impl TwoFactorConfig {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds.max(1))
    }
}
