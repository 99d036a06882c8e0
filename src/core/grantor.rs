use crate::domain::model::{
    GrantOutcome, PromoSettings, ENTITLEMENT_ACTIVE_KEY, ENTITLEMENT_PERIODS_KEY,
};
use crate::domain::ports::{Order, Subscription};
use crate::utils::error::Result;

/// Runs once when a subscription is created from a signup order. Attaches a
/// free-renewal entitlement to the subscription when the configured coupon
/// was used at checkout; otherwise leaves no trace.
pub async fn grant<S, O>(
    subscription: &S,
    signup_order: &O,
    settings: &PromoSettings,
) -> Result<GrantOutcome>
where
    S: Subscription,
    O: Order,
{
    if settings.coupon_code.is_empty() {
        return Ok(GrantOutcome::NotConfigured);
    }

    // Empty, non-numeric or zero period counts disable the promo outright.
    let Some(periods_left) = settings.initial_periods_left() else {
        return Ok(GrantOutcome::NotConfigured);
    };

    // An order can report several used coupons; every match rewrites the
    // entitlement, so the last matching coupon wins.
    let mut granted = None;
    for coupon in signup_order.used_coupons() {
        if coupon == &settings.coupon_code {
            subscription.set_meta(ENTITLEMENT_ACTIVE_KEY, "true").await?;
            subscription
                .set_meta(ENTITLEMENT_PERIODS_KEY, &periods_left.to_string())
                .await?;
            granted = Some(periods_left);
        }
    }

    match granted {
        Some(periods_left) => {
            tracing::debug!(
                "Granted sign-up promo on subscription {}: {} period(s) left",
                subscription.id(),
                periods_left
            );
            subscription
                .add_note(&format!(
                    "Sign-up promo activated: {periods_left} free renewal period(s) remaining"
                ))
                .await?;
            Ok(GrantOutcome::Granted { periods_left })
        }
        None => Ok(GrantOutcome::CouponNotUsed),
    }
}
