//! JSON file record source.
//!
//! Reads records from a JSON document on disk. The file is re-read on every
//! fetch so an external process can rewrite it between requests. Two layouts
//! are accepted:
//!
//! ```json
//! [ { "id": 1, "created_at": "...", ... }, ... ]
//! ```
//!
//! or, with per-content audience data:
//!
//! ```json
//! { "records": [ ... ], "audiences": { "1": { "age": [...], ... } } }
//! ```
//!
//! A file holds a single creator's catalog; the creator id is only used for
//! error context. A missing or corrupt file is a source failure.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::api::{AudienceProfile, ContentId, ContentRecord, CreatorId};
use crate::db::repository::*;

type AudienceMap = HashMap<ContentId, AudienceProfile>;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordsDocument {
    Plain(Vec<ContentRecord>),
    WithAudiences {
        records: Vec<ContentRecord>,
        // Untagged enums buffer their input, so integer map keys only survive
        // as strings.
        #[serde(default)]
        audiences: HashMap<String, AudienceProfile>,
    },
}

impl RecordsDocument {
    fn into_parts(self) -> RepositoryResult<(Vec<ContentRecord>, AudienceMap)> {
        match self {
            RecordsDocument::Plain(records) => Ok((records, HashMap::new())),
            RecordsDocument::WithAudiences { records, audiences } => {
                let audiences = audiences
                    .into_iter()
                    .map(|(key, profile)| {
                        key.trim()
                            .parse::<i64>()
                            .map(|id| (ContentId::new(id), profile))
                            .map_err(|_| {
                                RepositoryError::validation_with_context(
                                    format!("Audience key '{}' is not a content id", key),
                                    ErrorContext::default().with_entity("audience"),
                                )
                            })
                    })
                    .collect::<RepositoryResult<AudienceMap>>()?;
                Ok((records, audiences))
            }
        }
    }
}

/// Record source backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(
        &self,
        operation: &str,
        creator_id: CreatorId,
    ) -> RepositoryResult<(Vec<ContentRecord>, AudienceMap)> {
        let context = || {
            ErrorContext::new(operation)
                .with_entity("creator")
                .with_entity_id(creator_id)
        };

        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            let context = context().with_details(format!("path={}", self.path.display()));
            if e.kind() == std::io::ErrorKind::NotFound {
                RepositoryError::not_found_with_context(e.to_string(), context)
            } else {
                RepositoryError::connection_with_context(e.to_string(), context)
            }
        })?;

        let document: RecordsDocument = serde_json::from_str(&content)
            .map_err(|e| RepositoryError::from(e).with_operation(operation))?;
        document
            .into_parts()
            .map_err(|e| e.with_operation(operation))
    }
}

#[async_trait]
impl ContentRepository for JsonFileRepository {
    async fn fetch_records(&self, creator_id: CreatorId) -> RepositoryResult<Vec<ContentRecord>> {
        let (records, _) = self.load("fetch_records", creator_id).await?;
        log::debug!(
            "Loaded {} records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    async fn fetch_audience(
        &self,
        creator_id: CreatorId,
        content_id: ContentId,
    ) -> RepositoryResult<Option<AudienceProfile>> {
        let (_, mut audiences) = self.load("fetch_audience", creator_id).await?;
        Ok(audiences.remove(&content_id))
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(tokio::fs::metadata(&self.path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false))
    }
}
