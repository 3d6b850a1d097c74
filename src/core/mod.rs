pub mod assembler;
pub mod membership;
pub mod resolver;
pub mod search;

pub use crate::domain::model::{City, Resort, SearchResult, Service};
pub use crate::domain::ports::{ConfigProvider, ResortStore};
pub use crate::utils::error::Result;
pub use search::SearchEngine;
