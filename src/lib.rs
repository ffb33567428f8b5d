// file: src/lib.rs
// description: library entry point and public api exports
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod mirror;
pub mod models;
pub mod pipeline;
pub mod repository;
pub mod utils;

pub use config::{Config, Shortcut, Shortcuts};
pub use error::{Result, SyncError};
pub use mirror::Mirror;
pub use models::{BackupFolder, Target};
pub use pipeline::{RunSummary, SyncOrchestrator, UpdateAction, UpdateExecutor};
pub use repository::{BackendKind, RepoDescriptor, RepoScanner};
