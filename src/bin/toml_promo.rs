use anyhow::Context;
use clap::Parser;
use promo_periods::adapters::memory::{MemoryOrder, MemorySubscription};
use promo_periods::config::toml_config::TomlConfig;
use promo_periods::domain::ports::{Order, SettingsProvider};
use promo_periods::utils::{logger, validation::Validate};
use promo_periods::{PromoHooks, RenewalOutcome};

#[derive(Parser)]
#[command(name = "toml-promo")]
#[command(about = "Subscription promo simulation with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "promo-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the renewal cycle count from the config
    #[arg(long)]
    renewals: Option<u32>,

    /// Dry run - show what the promo would do without simulating
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based promo simulation");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            promo_periods::utils::error::ErrorSeverity::Low => 0,
            promo_periods::utils::error::ErrorSeverity::Medium => 2,
            promo_periods::utils::error::ErrorSeverity::High => 1,
            promo_periods::utils::error::ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    // 顯示配置摘要
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No simulation will occur");
        perform_dry_run(&config);
        return Ok(());
    }

    let charge_cents = config.charge_cents();
    let renewals = args.renewals.unwrap_or_else(|| config.renewal_cycles());
    let used_coupons = config.used_coupons();
    let currency = config.store.currency.clone();

    // 建立訂閱、簽約訂單與掛勾
    let subscription = MemorySubscription::new(1);
    let signup_order = MemoryOrder::with_coupons(100, charge_cents, used_coupons);
    let hooks = PromoHooks::new(config);

    let granted = hooks
        .on_subscription_created(&subscription, &signup_order)
        .await;
    println!("🧾 Signup processed: {:?}", granted);

    for cycle in 1..=renewals {
        let mut renewal_order = MemoryOrder::new(100 + u64::from(cycle), charge_cents);
        let outcome = hooks
            .on_renewal_order_created(&mut renewal_order, &subscription)
            .await;

        match outcome {
            RenewalOutcome::Waived {
                amount_cents,
                periods_left,
            } => println!(
                "✅ Renewal #{cycle}: waived {} {currency}, {periods_left} free period(s) left",
                format_cents(amount_cents)
            ),
            RenewalOutcome::AlreadyFree { periods_left } => println!(
                "✅ Renewal #{cycle}: order already free, {periods_left} free period(s) left"
            ),
            RenewalOutcome::Expired => {
                println!("🧹 Renewal #{cycle}: promo exhausted, entitlement cleared")
            }
            RenewalOutcome::NotEntitled => println!(
                "💳 Renewal #{cycle}: charged {} {currency}",
                format_cents(renewal_order.total_cents())
            ),
            RenewalOutcome::Skipped => println!("⚠️ Renewal #{cycle}: promo skipped, see logs"),
        }
    }

    println!();
    println!("📋 Subscription audit trail:");
    for note in subscription.notes().await {
        println!("  [{}] {}", note.at.format("%Y-%m-%d %H:%M:%S"), note.text);
    }

    println!("✅ Simulation completed successfully!");

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Store: {} ({})", config.store.name, config.store.currency);
    println!("  Coupon code: {}", config.promo.coupon_code);
    println!("  Periods: {}", config.promo.periods);
    println!(
        "  Line item label: {}",
        config.snapshot().resolved_label()
    );
    println!("  Charge: {}", format_cents(config.charge_cents()));
    println!(
        "  Renewal cycles: {}",
        args.renewals.unwrap_or_else(|| config.renewal_cycles())
    );

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    let settings = config.snapshot();

    println!("🎟️ Promo Analysis:");
    if settings.coupon_code.is_empty() {
        println!("  ❌ No coupon code configured, signups will never be granted free periods");
        return;
    }
    println!("  Coupon code: {}", settings.coupon_code);

    match settings.initial_periods_left() {
        Some(periods_left) => {
            println!(
                "  📊 A signup using the coupon starts with {} free renewal period(s)",
                periods_left
            );
            println!(
                "  📊 Renewal orders will carry the fee line: {}",
                settings.resolved_label()
            );
        }
        None => {
            println!(
                "  ❌ Period count '{}' is unusable, signups will never be granted free periods",
                settings.periods
            );
        }
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during a real run.");
}

fn format_cents(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, (cents % 100).abs())
}
