use crate::domain::model::{FeeLine, PromoSettings};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait SettingsProvider: Send + Sync {
    fn coupon_code(&self) -> &str;
    fn free_periods(&self) -> &str;
    fn line_item_label(&self) -> &str;

    fn snapshot(&self) -> PromoSettings {
        PromoSettings {
            coupon_code: self.coupon_code().to_string(),
            periods: self.free_periods().to_string(),
            line_item_label: self.line_item_label().to_string(),
        }
    }
}

pub trait MetadataStore: Send + Sync {
    fn get_meta(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set_meta(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn delete_meta(&self, key: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait Subscription: MetadataStore {
    fn id(&self) -> u64;
    async fn add_note(&self, note: &str) -> Result<()>;
}

#[async_trait]
pub trait Order: Send + Sync {
    fn id(&self) -> u64;
    fn used_coupons(&self) -> &[String];
    fn total_cents(&self) -> i64;
    fn set_total_cents(&mut self, total_cents: i64);
    async fn add_fee_line(&mut self, fee: FeeLine) -> Result<()>;
    async fn add_note(&mut self, note: &str) -> Result<()>;
    async fn save(&mut self) -> Result<()>;
}
