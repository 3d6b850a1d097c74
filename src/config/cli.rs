use crate::config::toml_config::TomlConfig;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{validate_snapshot_path, Validate};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "balnearios")]
#[command(about = "Search beach resorts by city and by required amenities")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Store base URL, overrides [store].url
    #[arg(long)]
    pub store_url: Option<String>,

    /// Store API key, overrides [store].api_key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Query a JSON snapshot instead of the remote store
    #[arg(long, conflicts_with_all = ["config", "store_url", "api_key"])]
    pub fixture: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Resorts in the city whose name contains QUERY
    Ciudad { query: String },

    /// Every resort with its city
    Listar,

    /// Every city
    Ciudades,

    /// Resorts offering all the given services
    Servicios {
        #[arg(required = true)]
        servicios: Vec<String>,
    },

    /// Resorts offering all the given services, optionally within a city
    Buscar {
        #[arg(long)]
        ciudad: Option<String>,

        #[arg(required = true)]
        servicios: Vec<String>,
    },

    /// Print the agent profile and tool definitions as JSON
    Tools,

    /// Run one agent tool with JSON arguments
    Call {
        tool: String,

        #[arg(default_value = "{}")]
        args: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl CliConfig {
    /// 合併設定檔與命令列參數；使用 fixture 時回傳 `None`
    pub fn store_config(&self) -> Result<Option<TomlConfig>> {
        if let Some(fixture) = &self.fixture {
            validate_snapshot_path("fixture", fixture)?;
            return Ok(None);
        }

        let mut config = match (&self.config, &self.store_url) {
            (Some(path), _) => TomlConfig::from_file(path)?,
            (None, Some(url)) => TomlConfig::with_store(url.clone(), None),
            (None, None) => {
                return Err(AppError::MissingConfigError {
                    field: "store.url (use --config, --store-url or --fixture)".to_string(),
                })
            }
        };

        // 應用命令列覆蓋設定
        if let Some(url) = &self.store_url {
            config.store.url = url.clone();
            tracing::debug!("🔧 store.url overridden from command line");
        }
        if let Some(key) = &self.api_key {
            config.store.api_key = Some(key.clone());
            tracing::debug!("🔧 store.api_key overridden from command line");
        }

        config.validate()?;
        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_buscar_command() {
        let cli = CliConfig::parse_from([
            "balnearios",
            "--fixture",
            "data.json",
            "--format",
            "json",
            "buscar",
            "--ciudad",
            "Miramar",
            "Wi-Fi",
            "Pileta",
        ]);

        assert_eq!(cli.format, OutputFormat::Json);
        match &cli.command {
            Command::Buscar { ciudad, servicios } => {
                assert_eq!(ciudad.as_deref(), Some("Miramar"));
                assert_eq!(*servicios, vec!["Wi-Fi", "Pileta"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(cli.store_config().unwrap().is_none());
    }

    #[test]
    fn test_fixture_must_be_json_snapshot() {
        let cli = CliConfig::parse_from(["balnearios", "--fixture", "data.csv", "listar"]);
        let err = cli.store_config().unwrap_err();
        assert!(matches!(err, AppError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_fixture_conflicts_with_store_url() {
        let parsed = CliConfig::try_parse_from([
            "balnearios",
            "--fixture",
            "data.json",
            "--store-url",
            "https://abc.supabase.co",
            "ciudades",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_servicios_requires_at_least_one() {
        assert!(CliConfig::try_parse_from(["balnearios", "servicios"]).is_err());
    }

    #[test]
    fn test_command_line_overrides_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                br#"
[store]
url = "https://file.supabase.co"
api_key = "file-key"
"#,
            )
            .unwrap();

        let path = temp_file.path().to_str().unwrap();
        let cli = CliConfig::parse_from([
            "balnearios",
            "--config",
            path,
            "--api-key",
            "cli-key",
            "ciudades",
        ]);

        let config = cli.store_config().unwrap().unwrap();
        assert_eq!(config.store.url, "https://file.supabase.co");
        assert_eq!(config.store.api_key.as_deref(), Some("cli-key"));
    }

    #[test]
    fn test_store_url_without_key_fails_validation() {
        let cli = CliConfig::parse_from([
            "balnearios",
            "--store-url",
            "https://abc.supabase.co",
            "listar",
        ]);
        assert!(matches!(
            cli.store_config().unwrap_err(),
            AppError::MissingConfigError { .. }
        ));
    }

    #[test]
    fn test_no_store_at_all() {
        let cli = CliConfig::parse_from(["balnearios", "ciudades"]);
        assert!(cli.store_config().is_err());
    }
}
