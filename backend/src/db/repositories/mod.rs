//! Repository implementations module.
//!
//! - `local`: In-memory implementation for unit testing and local development
//! - `json_file`: Reads a creator's catalog from a JSON file on disk
pub mod json_file;
pub mod local;

pub use json_file::JsonFileRepository;
pub use local::LocalRepository;
