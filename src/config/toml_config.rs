use crate::domain::ports::{ConfigProvider, TableNames};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_STORE_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_AGENT_MODEL: &str = "qwen3:1.7b";
pub const DEFAULT_AGENT_TEMPERATURE: f64 = 0.75;
pub const DEFAULT_AGENT_TIMEOUT_SECONDS: u64 = 120;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub store: StoreConfig,
    pub agent: Option<AgentConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub schema: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub tables: Option<TablesConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TablesConfig {
    pub ciudades: Option<String>,
    pub balnearios: Option<String>,
    pub servicios: Option<String>,
    pub balneario_servicio: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentConfig {
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub timeout_seconds: Option<u64>,
    pub verbose: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 只有資料庫位置的最小配置
    pub fn with_store(url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            store: StoreConfig {
                url: url.into(),
                api_key,
                schema: None,
                timeout_seconds: None,
                tables: None,
            },
            agent: None,
            logging: None,
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SUPABASE_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = env_var_pattern()?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_store_url("store.url", &self.store.url)?;

        let api_key = validation::require("store.api_key", &self.store.api_key)?;
        validation::validate_not_blank("store.api_key", api_key)?;
        if env_var_pattern()?.is_match(api_key) {
            return Err(AppError::ConfigValidationError {
                field: "store.api_key".to_string(),
                message: "references an environment variable that is not set".to_string(),
            });
        }

        if let Some(timeout) = self.store.timeout_seconds {
            validation::validate_min_seconds("store.timeout_seconds", timeout, 1)?;
        }

        if let Some(schema) = &self.store.schema {
            validation::validate_not_blank("store.schema", schema)?;
        }

        if let Some(agent) = &self.agent {
            if let Some(model) = &agent.model {
                validation::validate_not_blank("agent.model", model)?;
            }
            if let Some(temperature) = agent.temperature {
                validation::validate_temperature("agent.temperature", temperature)?;
            }
            if let Some(timeout) = agent.timeout_seconds {
                validation::validate_min_seconds("agent.timeout_seconds", timeout, 1)?;
            }
        }

        Ok(())
    }

    pub fn agent(&self) -> AgentConfig {
        self.agent.clone().unwrap_or_default()
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl AgentConfig {
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_AGENT_MODEL)
    }

    pub fn temperature(&self) -> f64 {
        self.temperature.unwrap_or(DEFAULT_AGENT_TEMPERATURE)
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_AGENT_TIMEOUT_SECONDS)
    }

    pub fn verbose(&self) -> bool {
        self.verbose.unwrap_or(true)
    }
}

fn env_var_pattern() -> Result<Regex> {
    Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigValidationError {
        field: "environment_substitution".to_string(),
        message: e.to_string(),
    })
}

impl ConfigProvider for TomlConfig {
    fn store_url(&self) -> &str {
        &self.store.url
    }

    fn api_key(&self) -> Option<&str> {
        self.store.api_key.as_deref()
    }

    fn schema(&self) -> Option<&str> {
        self.store.schema.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.store
            .timeout_seconds
            .unwrap_or(DEFAULT_STORE_TIMEOUT_SECONDS)
    }

    fn tables(&self) -> TableNames {
        let defaults = TableNames::default();
        let Some(tables) = &self.store.tables else {
            return defaults;
        };

        TableNames {
            cities: tables.ciudades.clone().unwrap_or(defaults.cities),
            resorts: tables.balnearios.clone().unwrap_or(defaults.resorts),
            services: tables.servicios.clone().unwrap_or(defaults.services),
            resort_services: tables
                .balneario_servicio
                .clone()
                .unwrap_or(defaults.resort_services),
        }
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
url = "https://abc.supabase.co"
api_key = "anon-key"
timeout_seconds = 10

[agent]
model = "llama3.2"
temperature = 0.2
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.store_url(), "https://abc.supabase.co");
        assert_eq!(config.api_key(), Some("anon-key"));
        assert_eq!(config.timeout_seconds(), 10);
        assert_eq!(config.agent().model(), "llama3.2");
        assert_eq!(config.agent().temperature(), 0.2);
        assert_eq!(config.agent().timeout_seconds(), DEFAULT_AGENT_TIMEOUT_SECONDS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = TomlConfig::from_toml_str(
            r#"
[store]
url = "http://localhost:54321"
api_key = "k"
"#,
        )
        .unwrap();

        assert_eq!(config.timeout_seconds(), DEFAULT_STORE_TIMEOUT_SECONDS);
        assert_eq!(config.tables(), TableNames::default());
        assert_eq!(config.agent().model(), DEFAULT_AGENT_MODEL);
        assert!(config.agent().verbose());
        assert!(!config.verbose_logging());
        assert!(!config.json_logging());
    }

    #[test]
    fn test_table_overrides() {
        let config = TomlConfig::from_toml_str(
            r#"
[store]
url = "http://localhost:54321"
api_key = "k"

[store.tables]
balneario_servicio = "balnearios_servicios"
"#,
        )
        .unwrap();

        let tables = config.tables();
        assert_eq!(tables.resort_services, "balnearios_servicios");
        assert_eq!(tables.cities, "ciudades");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_BALNEARIOS_KEY", "secret-from-env");

        let config = TomlConfig::from_toml_str(
            r#"
[store]
url = "https://abc.supabase.co"
api_key = "${TEST_BALNEARIOS_KEY}"
"#,
        )
        .unwrap();
        assert_eq!(config.api_key(), Some("secret-from-env"));

        std::env::remove_var("TEST_BALNEARIOS_KEY");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[store]
url = "https://abc.supabase.co"
api_key = "${TEST_BALNEARIOS_UNSET_KEY}"
"#,
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, AppError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_validation() {
        let invalid_url = TomlConfig::with_store("invalid-url", Some("k".to_string()));
        assert!(invalid_url.validate().is_err());

        let missing_key = TomlConfig::with_store("https://abc.supabase.co", None);
        assert!(matches!(
            missing_key.validate().unwrap_err(),
            AppError::MissingConfigError { .. }
        ));

        let mut hot = TomlConfig::with_store("https://abc.supabase.co", Some("k".to_string()));
        hot.agent = Some(AgentConfig {
            temperature: Some(3.0),
            ..AgentConfig::default()
        });
        assert!(hot.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[store\nurl = 1").unwrap_err();
        assert!(matches!(err, AppError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[store]
url = "https://abc.supabase.co"
api_key = "anon-key"

[logging]
verbose = true
json = true
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert!(config.verbose_logging());
        assert!(config.json_logging());
    }
}
