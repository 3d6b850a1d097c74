use crate::agent::format;
use crate::agent::{AgentProfile, Toolkit};
use crate::app::render::render;
use crate::config::{Command, OutputFormat};
use crate::core::SearchEngine;
use crate::domain::ports::ResortStore;
use crate::utils::error::{AppError, Result};
use serde_json::{json, Value};

/// 執行一個 CLI 指令並回傳要輸出的文字
pub async fn execute<S: ResortStore + 'static>(
    engine: SearchEngine<S>,
    command: &Command,
    output: OutputFormat,
    profile: &AgentProfile,
) -> Result<String> {
    match command {
        Command::Ciudad { query } => {
            let resorts = engine.search_by_city(query).await?;
            render(&resorts, output, format::resort_line)
        }
        Command::Listar => {
            let results = engine.list_all_with_city().await?;
            render(&results, output, format::result_line)
        }
        Command::Ciudades => {
            let cities = engine.list_all_cities().await?;
            render(&cities, output, format::city_line)
        }
        Command::Servicios { servicios } => {
            let results = engine.filter_by_services(servicios).await?;
            render(&results, output, format::result_line)
        }
        Command::Buscar { ciudad, servicios } => {
            let results = engine
                .filter_by_city_and_services(ciudad.as_deref(), servicios)
                .await?;
            render(&results, output, format::result_line)
        }
        Command::Tools => {
            let toolkit = Toolkit::new(engine);
            Ok(serde_json::to_string_pretty(&json!({
                "agent": profile,
                "tools": toolkit.definitions(),
            }))?)
        }
        Command::Call { tool, args } => {
            let toolkit = Toolkit::new(engine);
            if toolkit.get(tool).is_none() {
                return Err(AppError::UnknownToolError { name: tool.clone() });
            }

            let args: Value = serde_json::from_str(args).map_err(|e| AppError::ValidationError {
                message: format!("tool arguments are not valid JSON: {}", e),
            })?;
            Ok(toolkit.call(tool, args).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;

    fn engine() -> SearchEngine<MemoryStore> {
        let store = MemoryStore::from_json_str(
            r#"{
                "ciudades": [{"id_ciudad": 1, "nombre": "Miramar"}],
                "balnearios": [{"id_balneario": 10, "nombre": "Sol y Mar",
                                "direccion": "Costanera 123", "id_ciudad": 1}],
                "servicios": [{"id_servicio": 100, "nombre": "Wi-Fi"}],
                "balneario_servicio": [{"id_balneario": 10, "id_servicio": 100}]
            }"#,
        )
        .unwrap();
        SearchEngine::new(store)
    }

    #[tokio::test]
    async fn test_buscar_command_table_output() {
        let command = Command::Buscar {
            ciudad: Some("mira".to_string()),
            servicios: vec!["wi".to_string()],
        };
        let text = execute(engine(), &command, OutputFormat::Table, &AgentProfile::default())
            .await
            .unwrap();
        assert_eq!(
            text,
            "Balneario: Sol y Mar, Ciudad: Miramar, Dirección: Costanera 123, Teléfono: No informado"
        );
    }

    #[tokio::test]
    async fn test_tools_command_lists_definitions() {
        let text = execute(engine(), &Command::Tools, OutputFormat::Table, &AgentProfile::default())
            .await
            .unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["tools"].as_array().unwrap().len(), 5);
        assert_eq!(value["agent"]["model"], "qwen3:1.7b");
    }

    #[tokio::test]
    async fn test_call_command() {
        let command = Command::Call {
            tool: "listarCiudades".to_string(),
            args: "{}".to_string(),
        };
        let text = execute(engine(), &command, OutputFormat::Table, &AgentProfile::default())
            .await
            .unwrap();
        assert_eq!(text, "Ciudad: Miramar");

        let unknown = Command::Call {
            tool: "borrarTodo".to_string(),
            args: "{}".to_string(),
        };
        assert!(matches!(
            execute(engine(), &unknown, OutputFormat::Table, &AgentProfile::default()).await,
            Err(AppError::UnknownToolError { .. })
        ));

        let bad_json = Command::Call {
            tool: "listarCiudades".to_string(),
            args: "{".to_string(),
        };
        assert!(matches!(
            execute(engine(), &bad_json, OutputFormat::Table, &AgentProfile::default()).await,
            Err(AppError::ValidationError { .. })
        ));
    }
}
