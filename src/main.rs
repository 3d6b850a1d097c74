use balnearios::agent::AgentProfile;
use balnearios::utils::error::{AppError, ErrorSeverity};
use balnearios::utils::logger;
use balnearios::{app, CliConfig, MemoryStore, PostgrestStore, SearchEngine};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 載入並驗證配置（在初始化日誌之前，日誌設定可能來自設定檔）
    let store_config = match cli.store_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    // 初始化日誌
    let verbose = cli.verbose || store_config.as_ref().is_some_and(|c| c.verbose_logging());
    let json_logs = cli.log_json || store_config.as_ref().is_some_and(|c| c.json_logging());
    if json_logs {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("🚀 Starting balnearios CLI");
    if verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let profile = store_config
        .as_ref()
        .map(|c| AgentProfile::from_config(&c.agent()))
        .unwrap_or_default();

    let outcome = match (&cli.fixture, &store_config) {
        (Some(fixture), _) => {
            tracing::info!("📂 Using snapshot: {}", fixture);
            match MemoryStore::from_json_file(fixture) {
                Ok(store) => {
                    app::execute(SearchEngine::new(store), &cli.command, cli.format, &profile).await
                }
                Err(e) => Err(e),
            }
        }
        (None, Some(config)) => {
            tracing::info!("📡 Using store: {}", config.store.url);
            match PostgrestStore::new(config) {
                Ok(store) => {
                    app::execute(SearchEngine::new(store), &cli.command, cli.format, &profile).await
                }
                Err(e) => Err(e),
            }
        }
        (None, None) => Err(AppError::MissingConfigError {
            field: "store.url".to_string(),
        }),
    };

    match outcome {
        Ok(output) => println!("{}", output),
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            std::process::exit(exit_code(&e));
        }
    }
}

/// 根據錯誤嚴重程度決定退出碼
fn exit_code(e: &AppError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 4, // 輸入錯誤
        ErrorSeverity::Medium => 2, // 可重試
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
