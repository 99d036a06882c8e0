use crate::domain::ports::SettingsProvider;
use crate::utils::error::{PromoError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub store: StoreConfig,
    pub promo: PromoConfig,
    pub simulation: Option<SimulationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub name: String,
    pub description: String,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoConfig {
    /// 空字串代表停用促銷
    #[serde(default)]
    pub coupon_code: String,
    /// 保留原始字串,授與時才正規化
    #[serde(default = "default_periods")]
    pub periods: String,
    #[serde(default)]
    pub line_item_label: String,
}

fn default_periods() -> String {
    "0".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub charge_cents: Option<i64>,
    pub renewals: Option<u32>,
    pub used_coupons: Option<Vec<String>>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PromoError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PromoError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PROMO_CODE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        // 使用正規表達式匹配 ${VAR_NAME} 格式
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("store.name", &self.store.name)?;

        if self.store.currency.len() != 3 {
            return Err(PromoError::InvalidConfigValueError {
                field: "store.currency".to_string(),
                value: self.store.currency.clone(),
                reason: "Currency must be a 3-letter code".to_string(),
            });
        }

        // 促銷啟用時,期數必須是數字
        if !self.promo.coupon_code.is_empty() {
            validation::validate_numeric_string("promo.periods", &self.promo.periods)?;
        }

        if let Some(simulation) = &self.simulation {
            if let Some(charge) = simulation.charge_cents {
                validation::validate_range("simulation.charge_cents", charge, 0, 100_000_000)?;
            }
            if let Some(renewals) = simulation.renewals {
                validation::validate_range("simulation.renewals", renewals, 1, 1000)?;
            }
        }

        Ok(())
    }

    /// 模擬訂單金額 (cents)
    pub fn charge_cents(&self) -> i64 {
        self.simulation
            .as_ref()
            .and_then(|s| s.charge_cents)
            .unwrap_or(1999)
    }

    /// 模擬續約次數
    pub fn renewal_cycles(&self) -> u32 {
        self.simulation
            .as_ref()
            .and_then(|s| s.renewals)
            .unwrap_or(6)
    }

    /// 簽約訂單使用的優惠券
    pub fn used_coupons(&self) -> Vec<String> {
        if let Some(coupons) = self.simulation.as_ref().and_then(|s| s.used_coupons.clone()) {
            return coupons;
        }
        if self.promo.coupon_code.is_empty() {
            Vec::new()
        } else {
            vec![self.promo.coupon_code.clone()]
        }
    }
}

impl SettingsProvider for TomlConfig {
    fn coupon_code(&self) -> &str {
        &self.promo.coupon_code
    }

    fn free_periods(&self) -> &str {
        &self.promo.periods
    }

    fn line_item_label(&self) -> &str {
        &self.promo.line_item_label
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[store]
name = "Demo Shop"
description = "Test store"
currency = "USD"

[promo]
coupon_code = "FREEMONTHS"
periods = "4"

[simulation]
charge_cents = 2499
renewals = 5
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.store.name, "Demo Shop");
        assert_eq!(config.promo.coupon_code, "FREEMONTHS");
        assert_eq!(config.promo.periods, "4");
        assert_eq!(config.charge_cents(), 2499);
        assert_eq!(config.renewal_cycles(), 5);
        assert_eq!(config.used_coupons(), vec!["FREEMONTHS".to_string()]);
    }

    #[test]
    fn test_defaults_when_promo_keys_are_absent() {
        let toml_content = r#"
[store]
name = "Demo Shop"
description = "Test store"
currency = "USD"

[promo]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.promo.coupon_code, "");
        assert_eq!(config.promo.periods, "0");
        assert_eq!(config.promo.line_item_label, "");
        assert!(config.used_coupons().is_empty());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_PROMO_CODE", "WELCOME3");

        let toml_content = r#"
[store]
name = "Demo Shop"
description = "Test store"
currency = "USD"

[promo]
coupon_code = "${TEST_PROMO_CODE}"
periods = "3"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.promo.coupon_code, "WELCOME3");

        std::env::remove_var("TEST_PROMO_CODE");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[store]
name = "Demo Shop"
description = "Test store"
currency = "USD"

[promo]
coupon_code = "FREEMONTHS"
periods = "four"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[store]
name = "File Shop"
description = "File test"
currency = "EUR"

[promo]
coupon_code = "FREEMONTHS"
periods = "4"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.store.name, "File Shop");
        assert_eq!(config.store.currency, "EUR");
    }
}
