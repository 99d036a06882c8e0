use crate::core::{grantor, renewal};
use crate::domain::model::{GrantOutcome, RenewalOutcome};
use crate::domain::ports::{Order, SettingsProvider, Subscription};

/// Integration surface for the host billing system. One instance is built
/// around a settings provider and invoked from the host's lifecycle hooks;
/// every call snapshots the settings so a mid-flight settings change never
/// splits one decision across two configurations.
pub struct PromoHooks<C: SettingsProvider> {
    config: C,
}

impl<C: SettingsProvider> PromoHooks<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    /// Hook point for "subscription created from a signup order".
    ///
    /// Collaborator failures are logged and mapped to `Skipped`; checkout
    /// must never fail because promo bookkeeping did.
    pub async fn on_subscription_created<S, O>(
        &self,
        subscription: &S,
        signup_order: &O,
    ) -> GrantOutcome
    where
        S: Subscription,
        O: Order,
    {
        let settings = self.config.snapshot();
        match grantor::grant(subscription, signup_order, &settings).await {
            Ok(outcome) => {
                tracing::debug!(
                    "Subscription-created hook on {} finished: {:?}",
                    subscription.id(),
                    outcome
                );
                outcome
            }
            Err(e) => {
                tracing::warn!(
                    "Entitlement grant skipped on subscription {}: {}",
                    subscription.id(),
                    e
                );
                GrantOutcome::Skipped
            }
        }
    }

    /// Hook point for "renewal order created". The order is mutated in
    /// place; on any collaborator failure it goes out exactly as the host
    /// built it.
    pub async fn on_renewal_order_created<O, S>(
        &self,
        renewal_order: &mut O,
        subscription: &S,
    ) -> RenewalOutcome
    where
        O: Order,
        S: Subscription,
    {
        let settings = self.config.snapshot();
        match renewal::apply(renewal_order, subscription, &settings).await {
            Ok(outcome) => {
                tracing::debug!(
                    "Renewal hook on order {} finished: {:?}",
                    renewal_order.id(),
                    outcome
                );
                outcome
            }
            Err(e) => {
                tracing::warn!(
                    "Renewal discount skipped on order {}: {}",
                    renewal_order.id(),
                    e
                );
                RenewalOutcome::Skipped
            }
        }
    }
}
