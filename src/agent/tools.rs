//! Search operations exposed as agent tools.
//!
//! Every tool validates its JSON arguments, calls the [`SearchEngine`] and
//! answers with plain text. Failures become text too: nothing raised here
//! reaches the agent runtime as an error.

use crate::agent::format;
use crate::core::SearchEngine;
use crate::domain::ports::ResortStore;
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

pub const SEARCH_BY_CITY: &str = "buscarBalneariosPorCiudad";
pub const LIST_RESORTS: &str = "listarBalnearios";
pub const LIST_CITIES: &str = "listarCiudades";
pub const FILTER_BY_SERVICES: &str = "filtrarBalneariosPorServicios";
pub const FILTER_BY_CITY_AND_SERVICES: &str = "filtrarBalneariosPorCiudadYServicios";

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON schema of the arguments object.
    fn parameters(&self) -> Value;

    async fn execute(&self, args: Value) -> String;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NoArgs {}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CityArgs {
    ciudad: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServicesArgs {
    servicios: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CityServicesArgs {
    #[serde(default)]
    ciudad: Option<String>,
    servicios: Vec<String>,
}

/// Deserializes tool arguments; `null` counts as `{}`.
fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|e| AppError::ValidationError {
        message: e.to_string(),
    })
}

fn required_text(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::ValidationError {
            message: format!("'{}' no puede estar vacío", field),
        });
    }
    Ok(value.to_string())
}

fn service_list(services: &[String]) -> Result<Vec<String>> {
    if services.is_empty() {
        return Err(AppError::ValidationError {
            message: "'servicios' debe tener al menos un elemento".to_string(),
        });
    }
    services
        .iter()
        .map(|s| required_text("servicios", s))
        .collect()
}

fn invalid_parameters(tool: &str, err: &AppError) -> String {
    tracing::warn!("🛠️ {} rejected arguments: {}", tool, err);
    format!("Parámetros inválidos: {}", err)
}

fn store_failure(tool: &str, prefix: &str, err: &AppError) -> String {
    tracing::error!("🛠️ {} failed: {} (severity: {:?})", tool, err, err.severity());
    format!("{}: {}", prefix, err)
}

pub struct SearchByCityTool<S: ResortStore> {
    engine: Arc<SearchEngine<S>>,
}

#[async_trait]
impl<S: ResortStore + 'static> Tool for SearchByCityTool<S> {
    fn name(&self) -> &'static str {
        SEARCH_BY_CITY
    }

    fn description(&self) -> &'static str {
        "Usa esta función para encontrar balnearios en una ciudad específica"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "ciudad": {"type": "string", "description": "El nombre de la ciudad a buscar"}
            },
            "required": ["ciudad"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, args: Value) -> String {
        let ciudad = match parse_args::<CityArgs>(args).and_then(|a| required_text("ciudad", &a.ciudad)) {
            Ok(ciudad) => ciudad,
            Err(e) => return invalid_parameters(self.name(), &e),
        };

        match self.engine.search_by_city(&ciudad).await {
            Ok(resorts) if resorts.is_empty() => {
                "No se encontraron balnearios en esa ciudad.".to_string()
            }
            Ok(resorts) => format::lines(&resorts, format::resort_line),
            Err(e) => store_failure(self.name(), "Error al buscar balnearios", &e),
        }
    }
}

pub struct ListResortsTool<S: ResortStore> {
    engine: Arc<SearchEngine<S>>,
}

#[async_trait]
impl<S: ResortStore + 'static> Tool for ListResortsTool<S> {
    fn name(&self) -> &'static str {
        LIST_RESORTS
    }

    fn description(&self) -> &'static str {
        "Muestra todos los balnearios y la ciudad donde se encuentran"
    }

    fn parameters(&self) -> Value {
        json!({"type": "object", "properties": {}, "additionalProperties": false})
    }

    async fn execute(&self, args: Value) -> String {
        if let Err(e) = parse_args::<NoArgs>(args) {
            return invalid_parameters(self.name(), &e);
        }

        match self.engine.list_all_with_city().await {
            Ok(results) if results.is_empty() => "No hay balnearios registrados.".to_string(),
            Ok(results) => format::lines(&results, format::result_line),
            Err(e) => store_failure(self.name(), "Error al listar balnearios", &e),
        }
    }
}

pub struct ListCitiesTool<S: ResortStore> {
    engine: Arc<SearchEngine<S>>,
}

#[async_trait]
impl<S: ResortStore + 'static> Tool for ListCitiesTool<S> {
    fn name(&self) -> &'static str {
        LIST_CITIES
    }

    fn description(&self) -> &'static str {
        "Muestra todas las ciudades registradas, tengan o no balnearios"
    }

    fn parameters(&self) -> Value {
        json!({"type": "object", "properties": {}, "additionalProperties": false})
    }

    async fn execute(&self, args: Value) -> String {
        if let Err(e) = parse_args::<NoArgs>(args) {
            return invalid_parameters(self.name(), &e);
        }

        match self.engine.list_all_cities().await {
            Ok(cities) if cities.is_empty() => "No hay ciudades registradas.".to_string(),
            Ok(cities) => format::lines(&cities, format::city_line),
            Err(e) => store_failure(self.name(), "Error al listar ciudades", &e),
        }
    }
}

pub struct FilterByServicesTool<S: ResortStore> {
    engine: Arc<SearchEngine<S>>,
}

#[async_trait]
impl<S: ResortStore + 'static> Tool for FilterByServicesTool<S> {
    fn name(&self) -> &'static str {
        FILTER_BY_SERVICES
    }

    fn description(&self) -> &'static str {
        "Usa esta función para encontrar balnearios que ofrezcan todos los servicios pedidos (por ejemplo Wi-Fi y pileta)"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "servicios": {
                    "type": "array",
                    "items": {"type": "string"},
                    "minItems": 1,
                    "description": "Los nombres de los servicios que el balneario debe tener"
                }
            },
            "required": ["servicios"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, args: Value) -> String {
        let servicios = match parse_args::<ServicesArgs>(args).and_then(|a| service_list(&a.servicios)) {
            Ok(servicios) => servicios,
            Err(e) => return invalid_parameters(self.name(), &e),
        };

        match self.engine.filter_by_services(&servicios).await {
            Ok(results) if results.is_empty() => {
                "No se encontraron balnearios con esos servicios.".to_string()
            }
            Ok(results) => format::lines(&results, format::result_line),
            Err(e) => store_failure(self.name(), "Error al filtrar balnearios", &e),
        }
    }
}

pub struct FilterByCityAndServicesTool<S: ResortStore> {
    engine: Arc<SearchEngine<S>>,
}

#[async_trait]
impl<S: ResortStore + 'static> Tool for FilterByCityAndServicesTool<S> {
    fn name(&self) -> &'static str {
        FILTER_BY_CITY_AND_SERVICES
    }

    fn description(&self) -> &'static str {
        "Usa esta función para encontrar balnearios de una ciudad que ofrezcan todos los servicios pedidos"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "ciudad": {
                    "type": "string",
                    "description": "El nombre de la ciudad (opcional)"
                },
                "servicios": {
                    "type": "array",
                    "items": {"type": "string"},
                    "minItems": 1,
                    "description": "Los nombres de los servicios que el balneario debe tener"
                }
            },
            "required": ["servicios"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, args: Value) -> String {
        let parsed = parse_args::<CityServicesArgs>(args)
            .and_then(|a| Ok((a.ciudad, service_list(&a.servicios)?)));
        let (ciudad, servicios) = match parsed {
            Ok(parsed) => parsed,
            Err(e) => return invalid_parameters(self.name(), &e),
        };

        match self
            .engine
            .filter_by_city_and_services(ciudad.as_deref(), &servicios)
            .await
        {
            Ok(results) if results.is_empty() => {
                "No se encontraron balnearios con esos servicios en esa ciudad.".to_string()
            }
            Ok(results) => format::lines(&results, format::result_line),
            Err(e) => store_failure(self.name(), "Error al filtrar balnearios", &e),
        }
    }
}

/// 代理可用的工具集合
pub struct Toolkit {
    tools: Vec<Box<dyn Tool>>,
}

impl Toolkit {
    pub fn new<S: ResortStore + 'static>(engine: SearchEngine<S>) -> Self {
        let engine = Arc::new(engine);
        let tools: Vec<Box<dyn Tool>> = vec![
            Box::new(SearchByCityTool {
                engine: Arc::clone(&engine),
            }),
            Box::new(ListResortsTool {
                engine: Arc::clone(&engine),
            }),
            Box::new(ListCitiesTool {
                engine: Arc::clone(&engine),
            }),
            Box::new(FilterByServicesTool {
                engine: Arc::clone(&engine),
            }),
            Box::new(FilterByCityAndServicesTool { engine }),
        ];
        Self { tools }
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    /// Runs the named tool. An unknown name answers with an error sentence.
    pub async fn call(&self, name: &str, args: Value) -> String {
        match self.get(name) {
            Some(tool) => {
                tracing::debug!("🛠️ Calling {} with {}", name, args);
                tool.execute(args).await
            }
            None => {
                let err = AppError::UnknownToolError {
                    name: name.to_string(),
                };
                tracing::warn!("🛠️ {}", err);
                format!("Error: {}", err)
            }
        }
    }
}
