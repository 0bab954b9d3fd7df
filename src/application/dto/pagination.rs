use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Offset-paged listing wrapper. `page` is 1-based.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, page_size: u32) -> Self {
        let has_more = u64::from(page) * u64::from(page_size) < total;
        Self {
            items,
            total,
            page,
            page_size,
            has_more,
        }
    }
}
