use crate::domain::model::{
    FeeLine, PromoSettings, RenewalOutcome, ENTITLEMENT_ACTIVE_KEY, ENTITLEMENT_PERIODS_KEY,
};
use crate::domain::ports::{Order, Subscription};
use crate::utils::error::Result;

/// Runs once per generated renewal order. Waives the charge while the
/// subscription still has free periods, consumes one period per renewal and
/// clears the entitlement on the renewal after the count reaches zero.
pub async fn apply<O, S>(
    renewal_order: &mut O,
    subscription: &S,
    settings: &PromoSettings,
) -> Result<RenewalOutcome>
where
    O: Order,
    S: Subscription,
{
    let active = subscription.get_meta(ENTITLEMENT_ACTIVE_KEY).await?;
    if active.as_deref() != Some("true") {
        return Ok(RenewalOutcome::NotEntitled);
    }

    let periods_left = subscription
        .get_meta(ENTITLEMENT_PERIODS_KEY)
        .await?
        .and_then(|raw| raw.trim().parse::<i64>().ok());

    // Exhausted (or unreadable) count: remove every trace of the promo and
    // let the order go out unchanged.
    let Some(periods_left) = periods_left.filter(|left| *left >= 1) else {
        subscription.delete_meta(ENTITLEMENT_PERIODS_KEY).await?;
        subscription.delete_meta(ENTITLEMENT_ACTIVE_KEY).await?;
        tracing::debug!(
            "Sign-up promo on subscription {} exhausted, entitlement cleared",
            subscription.id()
        );
        return Ok(RenewalOutcome::Expired);
    };

    let new_remaining = periods_left - 1;
    let total = renewal_order.total_cents();

    let outcome = if total > 0 {
        // Waive the full current total, whatever lines it carries.
        let amount = total;
        let note = format!(
            "Sign-up promo discount applied, {new_remaining} free renewal period(s) remaining"
        );

        renewal_order
            .add_fee_line(FeeLine::discount(settings.resolved_label(), amount))
            .await?;
        renewal_order.add_note(&note).await?;
        renewal_order.save().await?;
        renewal_order.set_total_cents(total - amount);

        subscription.add_note(&note).await?;

        tracing::debug!(
            "Waived {} on renewal order {} for subscription {}",
            amount,
            renewal_order.id(),
            subscription.id()
        );

        RenewalOutcome::Waived {
            amount_cents: amount,
            periods_left: new_remaining,
        }
    } else {
        // Nothing to discount on an already-free order; the period is still
        // consumed.
        RenewalOutcome::AlreadyFree {
            periods_left: new_remaining,
        }
    };

    if new_remaining == 0 {
        // The entitlement record itself is only cleared on the next renewal,
        // so this announcement fires exactly once.
        subscription
            .add_note("Sign-up promo has ended, normal charges resume with the next renewal")
            .await?;
    }

    subscription
        .set_meta(ENTITLEMENT_PERIODS_KEY, &new_remaining.to_string())
        .await?;

    Ok(outcome)
}
