//! Repository trait and error types.

pub mod content;
pub mod error;

pub use content::ContentRepository;
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
