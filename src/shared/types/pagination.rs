use serde::{Deserialize, Serialize};

/// Page size used by every list endpoint of the backend.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Pagination block returned next to list data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl ListMeta {
    pub fn new(total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit)) as u32
        };
        Self {
            total,
            page,
            limit,
            total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// `{ "data": [...], "meta": {...} }` list envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: ListMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let meta = ListMeta::new(41, 1, 10);
        assert_eq!(meta.total_pages, 5);
        assert!(meta.has_next());
        assert!(!meta.has_previous());
    }

    #[test]
    fn empty_list_has_no_pages() {
        let meta = ListMeta::new(0, 1, 10);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next());
    }

    #[test]
    fn meta_uses_camel_case_on_the_wire() {
        let meta: ListMeta =
            serde_json::from_str(r#"{"total":12,"page":2,"limit":10,"totalPages":2}"#).unwrap();
        assert_eq!(meta, ListMeta::new(12, 2, 10));
    }
}
