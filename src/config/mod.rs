pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::ports::SettingsProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "promo-periods")]
#[command(about = "Simulates coupon-granted free renewal periods on a subscription")]
pub struct CliConfig {
    /// Coupon code that activates the free renewal periods
    #[arg(long, default_value = "FREEMONTHS")]
    pub coupon_code: String,

    /// How many periods the coupon covers, counted from the signup order
    #[arg(long, default_value = "4")]
    pub periods: String,

    /// Fee-line text on waived orders; blank falls back to the built-in label
    #[arg(long, default_value = "")]
    pub line_item_label: String,

    /// Recurring charge of the simulated subscription, in cents
    #[arg(long, default_value = "1999")]
    pub charge_cents: i64,

    /// Number of renewal cycles to simulate
    #[arg(long, default_value = "6")]
    pub renewals: u32,

    /// Simulate a signup that did not use the coupon
    #[arg(long)]
    pub skip_coupon: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl SettingsProvider for CliConfig {
    fn coupon_code(&self) -> &str {
        &self.coupon_code
    }

    fn free_periods(&self) -> &str {
        &self.periods
    }

    fn line_item_label(&self) -> &str {
        &self.line_item_label
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if !self.coupon_code.is_empty() {
            validation::validate_numeric_string("periods", &self.periods)?;
        }
        validation::validate_range("charge_cents", self.charge_cents, 0, 100_000_000)?;
        validation::validate_range("renewals", self.renewals, 1, 1000)?;
        Ok(())
    }
}
