use serde::{Deserialize, Serialize};

use super::snapshot::DataSource;
use crate::api::{ContentRecord, CreatorId};

/// Best performing content by views, descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopContentList {
    pub creator_id: CreatorId,
    pub source: DataSource,
    pub items: Vec<ContentRecord>,
    /// Size of the collection the items were taken from.
    pub total_available: usize,
}
