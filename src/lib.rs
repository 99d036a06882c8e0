pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::core::hooks::PromoHooks;
pub use crate::domain::model::{FeeLine, GrantOutcome, PromoSettings, RenewalOutcome};
pub use crate::utils::error::{PromoError, Result};
