use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One page of list results
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Paged<T> {
    pub results: Vec<T>,
    /// Page number that was requested
    pub page: u64,
    /// Total documents matching the filter, across all pages
    pub count: u64,
    /// Page size, echoed by the offer and order endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// Envelope for a single record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Single<T> {
    pub result: T,
}

impl<T> Single<T> {
    pub fn new(result: T) -> Self {
        Self { result }
    }
}
