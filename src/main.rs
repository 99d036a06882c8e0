use clap::Parser;
use promo_periods::adapters::memory::{MemoryOrder, MemorySubscription};
use promo_periods::domain::ports::Order;
use promo_periods::utils::{logger, validation::Validate};
use promo_periods::{CliConfig, PromoHooks, RenewalOutcome};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting promo-periods simulation");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 建立訂閱與簽約訂單
    let subscription = MemorySubscription::new(1001);
    let used_coupons = if config.skip_coupon {
        Vec::new()
    } else {
        vec![config.coupon_code.clone()]
    };
    let signup_order = MemoryOrder::with_coupons(5000, config.charge_cents, used_coupons);

    let charge_cents = config.charge_cents;
    let renewals = config.renewals;
    let hooks = PromoHooks::new(config);

    let granted = hooks
        .on_subscription_created(&subscription, &signup_order)
        .await;
    println!("🧾 Signup processed: {:?}", granted);

    // 逐期產生續約訂單
    for cycle in 1..=renewals {
        let mut renewal_order = MemoryOrder::new(5000 + u64::from(cycle), charge_cents);
        let outcome = hooks
            .on_renewal_order_created(&mut renewal_order, &subscription)
            .await;

        match outcome {
            RenewalOutcome::Waived {
                amount_cents,
                periods_left,
            } => println!(
                "✅ Renewal #{cycle}: waived {}, {periods_left} free period(s) left",
                format_cents(amount_cents)
            ),
            RenewalOutcome::AlreadyFree { periods_left } => println!(
                "✅ Renewal #{cycle}: order already free, {periods_left} free period(s) left"
            ),
            RenewalOutcome::Expired => {
                println!("🧹 Renewal #{cycle}: promo exhausted, entitlement cleared")
            }
            RenewalOutcome::NotEntitled => println!(
                "💳 Renewal #{cycle}: charged {}",
                format_cents(renewal_order.total_cents())
            ),
            RenewalOutcome::Skipped => println!("⚠️ Renewal #{cycle}: promo skipped, see logs"),
        }
    }

    // 輸出稽核軌跡與最終狀態
    println!();
    println!("📋 Subscription audit trail:");
    for note in subscription.notes().await {
        println!("  [{}] {}", note.at.format("%Y-%m-%d %H:%M:%S"), note.text);
    }

    let meta = subscription.meta_snapshot().await;
    println!("🗃️ Final metadata: {}", serde_json::to_string_pretty(&meta)?);

    Ok(())
}

fn format_cents(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, (cents % 100).abs())
}
