//! CLI configuration

use serde::Deserialize;

use core_kernel::CalendarDate;
use domain_pnf::EngineConfig;

/// CLI configuration
///
/// Loaded from `PNF_`-prefixed environment variables; anything unset keeps
/// the statutory default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    pub log_level: String,
    /// Legal cutover date
    pub cutover_date: Option<CalendarDate>,
    /// Months added to a claim period's end to close its notification window
    pub notification_extension_months: u32,
    /// Relevance lookback in years
    pub relevance_lookback_years: u32,
}

impl Default for CliConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            log_level: "warn".to_string(),
            cutover_date: engine.cutover_date,
            notification_extension_months: engine.notification_extension_months,
            relevance_lookback_years: engine.relevance_lookback_years,
        }
    }
}

impl CliConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("PNF").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Engine settings, with an optional cutover override
    pub fn engine_config(&self, cutover_override: Option<CalendarDate>) -> EngineConfig {
        EngineConfig {
            cutover_date: cutover_override.or(self.cutover_date),
            notification_extension_months: self.notification_extension_months,
            relevance_lookback_years: self.relevance_lookback_years,
        }
    }
}
