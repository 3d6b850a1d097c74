//! Agent-facing surface: tool adapters, agent profile and reply handling.
//!
//! The conversational runtime (LLM client, tool-calling loop) lives outside
//! this crate; it consumes [`AgentProfile`] and [`Toolkit`].

pub mod format;
pub mod reply;
pub mod tools;

use crate::config::toml_config::AgentConfig;
use serde::Serialize;

pub use tools::{Tool, ToolDefinition, Toolkit};

pub const SYSTEM_PROMPT: &str = "\
Sos un asistente para consultar información sobre balnearios y ciudades.
Tu tarea es ayudar a consultar o mostrar datos de balnearios y la ciudad donde se encuentran.

Usá las herramientas disponibles para:
- Buscar balnearios por ciudad
- Mostrar la lista completa de balnearios con su ciudad
- Mostrar las ciudades disponibles
- Buscar balnearios que tengan todos los servicios pedidos, en cualquier ciudad o en una ciudad en particular

Respondé de forma clara y breve.";

/// Settings the agent runtime needs to drive the toolkit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentProfile {
    pub model: String,
    pub temperature: f64,
    pub timeout_seconds: u64,
    pub verbose: bool,
    pub system_prompt: String,
}

impl AgentProfile {
    pub fn from_config(config: &AgentConfig) -> Self {
        Self {
            model: config.model().to_string(),
            temperature: config.temperature(),
            timeout_seconds: config.timeout_seconds(),
            verbose: config.verbose(),
            system_prompt: SYSTEM_PROMPT.to_string(),
        }
    }
}

impl Default for AgentProfile {
    fn default() -> Self {
        Self::from_config(&AgentConfig::default())
    }
}
