use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::application::dto::ListQuery;
use crate::shared::DEFAULT_PAGE_LIMIT;

/// Filter value meaning "no filter".
pub const ALL_FILTER: &str = "all";

const PAGE: &str = "page";
const SEARCH: &str = "search";
const STATUS: &str = "status";
const ROLE: &str = "role";
const UNIVERSITY_ID: &str = "universityId";

/// Query parameters of a data table. Parameters equal to an empty sentinel
/// (`""`, `"all"`, or no value) are removed instead of stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTableParams {
    values: BTreeMap<String, String>,
}

impl DataTableParams {
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            params.set(&key, Some(&value));
        }
        params
    }

    /// Unparseable or zero pages read as 1.
    pub fn page(&self) -> u32 {
        self.values
            .get(PAGE)
            .and_then(|p| p.parse::<u32>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1)
    }

    pub fn search(&self) -> &str {
        self.get(SEARCH).unwrap_or("")
    }

    pub fn status(&self) -> &str {
        self.get(STATUS).unwrap_or(ALL_FILTER)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: Option<&str>) {
        match value {
            None | Some("") | Some(ALL_FILTER) => {
                self.values.remove(key);
            }
            Some(v) => {
                self.values.insert(key.to_string(), v.to_string());
            }
        }
    }

    pub fn set_page(&mut self, page: u32) {
        self.set(PAGE, Some(&page.max(1).to_string()));
    }

    /// New search text starts again from the first page.
    pub fn set_search(&mut self, search: &str) {
        self.set(SEARCH, Some(search));
        self.set_page(1);
    }

    pub fn set_filter(&mut self, key: &str, value: &str) {
        self.set(key, Some(value));
        self.set_page(1);
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }

    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.values {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    pub fn href(&self, path: &str) -> String {
        let query = self.to_query();
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        }
    }

    /// Link to another page with everything else unchanged.
    pub fn page_href(&self, path: &str, page: u32) -> String {
        let mut next = self.clone();
        next.set_page(page);
        next.href(path)
    }

    pub fn to_list_query(&self) -> ListQuery {
        ListQuery {
            search: self.search().to_string(),
            page: self.page(),
            limit: DEFAULT_PAGE_LIMIT,
            status: self.get(STATUS).map(str::to_string),
            role: self.get(ROLE).map(str::to_string),
            university_id: self.get(UNIVERSITY_ID).and_then(|id| id.trim().parse().ok()),
        }
    }
}
