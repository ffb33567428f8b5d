// file: src/repository/mod.rs
// description: repository operations module exports
// reference: internal module structure

pub mod backend;
pub mod scanner;

pub use backend::{BackendKind, RepoDescriptor};
pub use scanner::RepoScanner;
