//! The query pipeline: filter narrowing followed by skip/top pagination.

use serde::Deserialize;

use crate::directory::model::Employee;

use super::filter::parse_filter;

/// Default page size when `$top` is absent.
pub const DEFAULT_TOP: usize = 10;

/// Query parameters of a list request, in their OData spellings.
#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
    #[serde(rename = "$skip", default)]
    pub skip: usize,
    #[serde(rename = "$top", default = "default_top")]
    pub top: usize,
    #[serde(rename = "$filter")]
    pub filter: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            skip: 0,
            top: DEFAULT_TOP,
            filter: None,
        }
    }
}

fn default_top() -> usize {
    DEFAULT_TOP
}

/// Produce one page of records matching an optional filter.
///
/// Clauses narrow the candidate set with AND semantics, preserving the
/// original relative order; pagination then slices
/// `[skip, min(skip + top, len))`. A `skip` at or past the filtered count
/// yields an empty page, not an error. No total count is reported; callers
/// that need one re-run the filter unpaginated.
pub fn query_page(
    records: &[Employee],
    skip: usize,
    top: usize,
    filter: Option<&str>,
) -> Vec<Employee> {
    let clauses = filter.map(parse_filter).unwrap_or_default();
    let filtered: Vec<&Employee> = records
        .iter()
        .filter(|e| clauses.iter().all(|clause| clause.matches(e)))
        .collect();

    if skip >= filtered.len() {
        return Vec::new();
    }
    let end = skip.saturating_add(top).min(filtered.len());
    filtered[skip..end].iter().map(|e| (*e).clone()).collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
