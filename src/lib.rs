pub mod adapters;
pub mod agent;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{MemoryStore, PostgrestStore, Snapshot};
pub use agent::{AgentProfile, Toolkit};
pub use config::TomlConfig;
pub use core::SearchEngine;
pub use domain::model::{City, Resort, SearchResult, Service};
pub use utils::error::{AppError, Result};
