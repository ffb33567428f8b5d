// file: src/pipeline/mod.rs
// description: repository update pipeline module exports
// reference: internal module structure

pub mod executor;
pub mod mapper;
pub mod orchestrator;
pub mod staleness;

pub use executor::{UpdateAction, UpdateExecutor};
pub use mapper::map_to_target;
pub use orchestrator::{RunSummary, SyncOrchestrator};
pub use staleness::filter_stale;
