use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub store: StoreConfig,
    pub booking: BookingRules,
    pub verifier: VerifierConfig,
    pub payee: PayeeConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Directory the scoped key-value store writes under
    pub data_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingRules {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Fixed charge per booking
    pub amount: i32,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Upper bound on verification polls; None polls until cancelled
    #[serde(default)]
    pub max_poll_attempts: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VerifierConfig {
    #[serde(default = "default_verify_delay")]
    pub delay_ms: u64,
    #[serde(default = "default_success_rate")]
    pub success_rate: f64,
}

/// Display details for the payment prompt
#[derive(Debug, Deserialize, Clone)]
pub struct PayeeConfig {
    pub name: String,
    pub upi_id: String,
}

fn default_poll_interval() -> u64 { 3 }
fn default_currency() -> String { "INR".to_string() }
fn default_verify_delay() -> u64 { 1500 }
fn default_success_rate() -> f64 { 0.9 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Environment-specific file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `NEXUS__BOOKING__AMOUNT=150` overrides the booking amount
            .add_source(config::Environment::with_prefix("NEXUS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
