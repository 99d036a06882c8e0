use serde::{Deserialize, Serialize};

/// Subscription metadata key flagging an active sign-up promo.
pub const ENTITLEMENT_ACTIVE_KEY: &str = "promo_periods_active";
/// Subscription metadata key holding the remaining free renewal count.
pub const ENTITLEMENT_PERIODS_KEY: &str = "promo_periods_left";

/// Fallback fee-line label when the configured one is blank.
pub const DEFAULT_LINE_ITEM_LABEL: &str = "Sign-up Promo Discount";

/// Snapshot of the three promo settings taken at hook time, so the core
/// never reads ambient configuration state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoSettings {
    pub coupon_code: String,
    /// Kept as the raw stored string; normalization happens at grant time.
    pub periods: String,
    pub line_item_label: String,
}

impl PromoSettings {
    /// Period count usable for a grant: non-empty, numeric, non-zero,
    /// floored to a whole number and clamped at zero. `None` disables the
    /// promo entirely.
    pub fn normalized_periods(&self) -> Option<i64> {
        let raw = self.periods.trim();
        if raw.is_empty() {
            return None;
        }
        let parsed: f64 = raw.parse().ok()?;
        if !parsed.is_finite() || parsed == 0.0 {
            return None;
        }
        Some((parsed.floor() as i64).max(0))
    }

    /// Remaining free periods to store at signup. The signup order itself
    /// consumes one period, so counts above 1 are reduced by one.
    pub fn initial_periods_left(&self) -> Option<i64> {
        let total = self.normalized_periods()?;
        Some(if total > 1 { total - 1 } else { total })
    }

    pub fn resolved_label(&self) -> &str {
        if self.line_item_label.is_empty() {
            DEFAULT_LINE_ITEM_LABEL
        } else {
            &self.line_item_label
        }
    }
}

/// One extra line on an order. Amounts are integer minor units (cents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeLine {
    pub name: String,
    pub amount_cents: i64,
    pub taxable: bool,
    pub tax_cents: i64,
}

impl FeeLine {
    /// Non-taxable negative fee line waiving `amount_cents` off an order.
    pub fn discount(name: &str, amount_cents: i64) -> Self {
        Self {
            name: name.to_string(),
            amount_cents: -amount_cents,
            taxable: false,
            tax_cents: 0,
        }
    }
}

/// What the subscription-created hook did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantOutcome {
    Granted { periods_left: i64 },
    /// Empty coupon code or an unusable period count in the settings.
    NotConfigured,
    /// The signup order did not use the configured coupon.
    CouponNotUsed,
    /// A collaborator failed; logged and ignored so checkout proceeds.
    Skipped,
}

/// What the renewal-order hook did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenewalOutcome {
    /// No entitlement on this subscription; order passed through untouched.
    NotEntitled,
    /// Entitlement was present but exhausted; both metadata keys removed.
    Expired,
    Waived { amount_cents: i64, periods_left: i64 },
    /// The order was already free, so only the period count was consumed.
    AlreadyFree { periods_left: i64 },
    /// A collaborator failed; logged and ignored so billing proceeds.
    Skipped,
}
