//! Paged response types

use serde::{Deserialize, Serialize};

/// One page of a query result
///
/// ```json
/// { "total": 42, "records": [ ... ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult<T> {
    /// Number of items matching the query across all pages
    pub total: u64,
    /// Items of the requested page
    pub records: Vec<T>,
}

impl<T> PageResult<T> {
    pub fn new(total: u64, records: Vec<T>) -> Self {
        Self { total, records }
    }
}
