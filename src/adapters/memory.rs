use crate::domain::model::FeeLine;
use crate::domain::ports::{MetadataStore, Order, Subscription};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Timestamped audit-trail entry.
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    pub at: DateTime<Utc>,
    pub text: String,
}

impl Note {
    fn now(text: &str) -> Self {
        Self {
            at: Utc::now(),
            text: text.to_string(),
        }
    }
}

/// In-memory subscription entity. Metadata and notes sit behind shared
/// locks so the same subscription can be handed to several hook calls.
#[derive(Clone)]
pub struct MemorySubscription {
    id: u64,
    meta: Arc<Mutex<HashMap<String, String>>>,
    notes: Arc<Mutex<Vec<Note>>>,
}

impl MemorySubscription {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            meta: Arc::new(Mutex::new(HashMap::new())),
            notes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn notes(&self) -> Vec<Note> {
        self.notes.lock().await.clone()
    }

    pub async fn meta_snapshot(&self) -> HashMap<String, String> {
        self.meta.lock().await.clone()
    }
}

impl MetadataStore for MemorySubscription {
    async fn get_meta(&self, key: &str) -> Result<Option<String>> {
        Ok(self.meta.lock().await.get(key).cloned())
    }

    async fn set_meta(&self, key: &str, value: &str) -> Result<()> {
        self.meta
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete_meta(&self, key: &str) -> Result<()> {
        self.meta.lock().await.remove(key);
        Ok(())
    }
}

#[async_trait]
impl Subscription for MemorySubscription {
    fn id(&self) -> u64 {
        self.id
    }

    async fn add_note(&self, note: &str) -> Result<()> {
        self.notes.lock().await.push(Note::now(note));
        Ok(())
    }
}

/// In-memory order entity covering both signup and renewal orders.
#[derive(Debug, Clone)]
pub struct MemoryOrder {
    id: u64,
    total_cents: i64,
    used_coupons: Vec<String>,
    fee_lines: Vec<FeeLine>,
    notes: Vec<Note>,
    save_count: u32,
}

impl MemoryOrder {
    pub fn new(id: u64, total_cents: i64) -> Self {
        Self::with_coupons(id, total_cents, Vec::new())
    }

    pub fn with_coupons(id: u64, total_cents: i64, used_coupons: Vec<String>) -> Self {
        Self {
            id,
            total_cents,
            used_coupons,
            fee_lines: Vec::new(),
            notes: Vec::new(),
            save_count: 0,
        }
    }

    pub fn fee_lines(&self) -> &[FeeLine] {
        &self.fee_lines
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn save_count(&self) -> u32 {
        self.save_count
    }
}

#[async_trait]
impl Order for MemoryOrder {
    fn id(&self) -> u64 {
        self.id
    }

    fn used_coupons(&self) -> &[String] {
        &self.used_coupons
    }

    fn total_cents(&self) -> i64 {
        self.total_cents
    }

    fn set_total_cents(&mut self, total_cents: i64) {
        self.total_cents = total_cents;
    }

    async fn add_fee_line(&mut self, fee: FeeLine) -> Result<()> {
        self.fee_lines.push(fee);
        Ok(())
    }

    async fn add_note(&mut self, note: &str) -> Result<()> {
        self.notes.push(Note::now(note));
        Ok(())
    }

    async fn save(&mut self) -> Result<()> {
        self.save_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_roundtrip() {
        tokio_test::block_on(async {
            let sub = MemorySubscription::new(7);
            assert_eq!(sub.get_meta("missing").await.unwrap(), None);

            sub.set_meta("promo_periods_left", "3").await.unwrap();
            assert_eq!(
                sub.get_meta("promo_periods_left").await.unwrap().as_deref(),
                Some("3")
            );

            sub.delete_meta("promo_periods_left").await.unwrap();
            assert_eq!(sub.get_meta("promo_periods_left").await.unwrap(), None);
        });
    }

    #[tokio::test]
    async fn test_notes_are_appended_in_order() {
        let sub = MemorySubscription::new(7);
        sub.add_note("first").await.unwrap();
        sub.add_note("second").await.unwrap();

        let notes = sub.notes().await;
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text, "first");
        assert_eq!(notes[1].text, "second");
        assert!(notes[0].at <= notes[1].at);
    }

    #[tokio::test]
    async fn test_order_mutations() {
        let mut order = MemoryOrder::with_coupons(42, 1500, vec!["PROMO".to_string()]);
        assert_eq!(order.used_coupons(), ["PROMO".to_string()]);

        order
            .add_fee_line(FeeLine::discount("Sign-up Promo Discount", 1500))
            .await
            .unwrap();
        order.save().await.unwrap();
        order.set_total_cents(0);

        assert_eq!(order.total_cents(), 0);
        assert_eq!(order.fee_lines().len(), 1);
        assert_eq!(order.fee_lines()[0].amount_cents, -1500);
        assert_eq!(order.save_count(), 1);
    }
}
