// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod backup_folder;
pub mod target;

pub use backup_folder::BackupFolder;
pub use target::Target;
