//! Record source module.
//!
//! The engine reads content records through the [`ContentRepository`] trait so
//! that different sources can be swapped easily.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP layer / library callers                           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service layer (services/) - aggregation + fallback      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  ContentRepository trait                                 │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │  LocalRepository (in-memory) │
//!     │  JsonFileRepository (disk)   │
//!     └──────────────────────────────┘
//! ```
//!
//! Repositories are created by [`RepositoryFactory`] and passed explicitly to
//! the service layer; there is no process-wide instance.

pub mod factory;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::{JsonFileRepository, LocalRepository};
pub use repository::{ContentRepository, ErrorContext, RepositoryError, RepositoryResult};
