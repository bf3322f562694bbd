//! Resource trait
//!
//! Ties an entity to its collection path and id type.

use kernel::envelope::Pagination;
use kernel::id::Id;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A record type served under `/api/<collection>`
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Id marker from `kernel::id::markers`
    type Marker: Copy + Send + Sync + 'static;

    /// Collection path, e.g. `/api/players`
    const COLLECTION: &'static str;

    /// Singular name for logs and errors
    const NAME: &'static str;

    fn id(&self) -> Id<Self::Marker>;

    /// Path of a single record
    fn item_path(id: Id<Self::Marker>) -> String {
        format!("{}/{}", Self::COLLECTION, id)
    }
}

/// One page of a list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "R: Serialize", deserialize = "R: DeserializeOwned"))]
pub struct Page<R> {
    pub items: Vec<R>,
    pub pagination: Option<Pagination>,
}

impl<R> Page<R> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the backend reported a further page
    pub fn has_next(&self) -> bool {
        self.pagination.is_some_and(|p| p.has_next())
    }

    /// Total records across all pages; falls back to this page's size
    pub fn total(&self) -> u64 {
        self.pagination
            .map(|p| p.total)
            .unwrap_or(self.items.len() as u64)
    }
}
