//! Shapes shared by several features: pagination, list queries, statuses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Pagination block returned next to list data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "first_page", alias = "totalPages")]
    pub pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

fn first_page() -> u32 {
    1
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            pages: 1,
            total: None,
            limit: None,
        }
    }
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Query parameters every list endpoint accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    /// Feature-specific filters such as `status` or `type`
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            search: String::new(),
            filters: Vec::new(),
        }
    }

    /// Set or replace a filter; an empty value removes it.
    pub fn set_filter(&mut self, key: &str, value: &str) {
        self.filters.retain(|(k, _)| k != key);
        if !value.is_empty() {
            self.filters.push((key.to_string(), value.to_string()));
        }
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Flatten into query-string pairs. Empty search is omitted.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if !self.search.trim().is_empty() {
            params.push(("search".to_string(), self.search.trim().to_string()));
        }
        params.extend(self.filters.iter().cloned());
        params
    }
}

/// A page of list data.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

/// Active/inactive switch used by most content records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActiveStatus {
    #[default]
    Active,
    Inactive,
}

impl ActiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveStatus::Active => "active",
            ActiveStatus::Inactive => "inactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Some(ActiveStatus::Active),
            "inactive" => Some(ActiveStatus::Inactive),
            _ => None,
        }
    }
}

/// Parse a backend timestamp. Accepts RFC 3339 or a bare `YYYY-MM-DD`,
/// which is read as midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Required-field check used by the form validators.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
