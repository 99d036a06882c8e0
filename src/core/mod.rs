pub mod grantor;
pub mod hooks;
pub mod renewal;

pub use crate::domain::model::{FeeLine, GrantOutcome, PromoSettings, RenewalOutcome};
pub use crate::domain::ports::{MetadataStore, Order, SettingsProvider, Subscription};
pub use crate::utils::error::Result;
