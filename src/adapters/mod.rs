// Adapters layer: concrete store implementations behind `ResortStore`.

pub mod memory;
pub mod postgrest;

pub use memory::{MemoryStore, Snapshot};
pub use postgrest::PostgrestStore;
