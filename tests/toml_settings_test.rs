use promo_periods::adapters::memory::{MemoryOrder, MemorySubscription};
use promo_periods::config::toml_config::TomlConfig;
use promo_periods::domain::model::DEFAULT_LINE_ITEM_LABEL;
use promo_periods::domain::ports::{Order, SettingsProvider};
use promo_periods::utils::validation::Validate;
use promo_periods::{GrantOutcome, PromoHooks, RenewalOutcome};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_toml_settings_drive_a_full_waiver_cycle() {
    let file = write_config(
        r#"
[store]
name = "Demo Shop"
description = "Subscription demo store"
currency = "USD"

[promo]
coupon_code = "WELCOME3"
periods = "3"
line_item_label = "Welcome Promo"

[simulation]
charge_cents = 2499
renewals = 4
"#,
    );

    let config = TomlConfig::from_file(file.path()).unwrap();
    config.validate().unwrap();

    let charge = config.charge_cents();
    let subscription = MemorySubscription::new(10);
    let signup = MemoryOrder::with_coupons(900, charge, config.used_coupons());
    let hooks = PromoHooks::new(config);

    let granted = hooks.on_subscription_created(&subscription, &signup).await;
    assert_eq!(granted, GrantOutcome::Granted { periods_left: 2 });

    let mut renewal = MemoryOrder::new(901, charge);
    let outcome = hooks
        .on_renewal_order_created(&mut renewal, &subscription)
        .await;

    assert_eq!(
        outcome,
        RenewalOutcome::Waived {
            amount_cents: 2499,
            periods_left: 1
        }
    );
    assert_eq!(renewal.fee_lines()[0].name, "Welcome Promo");
    assert_eq!(renewal.total_cents(), 0);
}

#[tokio::test]
async fn test_blank_label_falls_back_to_the_default() {
    let config = TomlConfig::from_toml_str(
        r#"
[store]
name = "Demo Shop"
description = "Subscription demo store"
currency = "USD"

[promo]
coupon_code = "WELCOME3"
periods = "2"
"#,
    )
    .unwrap();

    let subscription = MemorySubscription::new(11);
    let signup = MemoryOrder::with_coupons(910, 1500, config.used_coupons());
    let hooks = PromoHooks::new(config);
    hooks.on_subscription_created(&subscription, &signup).await;

    let mut renewal = MemoryOrder::new(911, 1500);
    hooks
        .on_renewal_order_created(&mut renewal, &subscription)
        .await;

    assert_eq!(renewal.fee_lines()[0].name, DEFAULT_LINE_ITEM_LABEL);
}

#[test]
fn test_absent_promo_keys_disable_the_promo() {
    let config = TomlConfig::from_toml_str(
        r#"
[store]
name = "Demo Shop"
description = "Subscription demo store"
currency = "USD"

[promo]
"#,
    )
    .unwrap();

    // Get-with-default semantics: blank code, zero periods.
    let settings = config.snapshot();
    assert_eq!(settings.coupon_code, "");
    assert_eq!(settings.periods, "0");
    assert_eq!(settings.initial_periods_left(), None);
}

#[test]
fn test_env_substitution_via_file() {
    std::env::set_var("LIFECYCLE_TEST_COUPON", "ENVCODE");
    let file = write_config(
        r#"
[store]
name = "Demo Shop"
description = "Subscription demo store"
currency = "USD"

[promo]
coupon_code = "${LIFECYCLE_TEST_COUPON}"
periods = "4"
"#,
    );

    let config = TomlConfig::from_file(file.path()).unwrap();
    assert_eq!(config.coupon_code(), "ENVCODE");
    std::env::remove_var("LIFECYCLE_TEST_COUPON");
}

#[test]
fn test_invalid_configs_are_rejected() {
    // Non-numeric periods with an active coupon.
    let config = TomlConfig::from_toml_str(
        r#"
[store]
name = "Demo Shop"
description = "Subscription demo store"
currency = "USD"

[promo]
coupon_code = "WELCOME3"
periods = "many"
"#,
    )
    .unwrap();
    assert!(config.validate().is_err());

    // Unusable currency code.
    let config = TomlConfig::from_toml_str(
        r#"
[store]
name = "Demo Shop"
description = "Subscription demo store"
currency = "DOLLARS"

[promo]
"#,
    )
    .unwrap();
    assert!(config.validate().is_err());

    // Renewal cycle count out of range.
    let config = TomlConfig::from_toml_str(
        r#"
[store]
name = "Demo Shop"
description = "Subscription demo store"
currency = "USD"

[promo]

[simulation]
renewals = 0
"#,
    )
    .unwrap();
    assert!(config.validate().is_err());
}
