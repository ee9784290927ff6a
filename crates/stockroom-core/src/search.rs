//! Search filter — matches records against the search box text and renders the
//! survivors as navigable rows.
//!
//! # Algorithm
//!
//! 1. The query is lowercased.
//! 2. An empty query selects the first [`EMPTY_QUERY_LIMIT`] records; no field
//!    is read.
//! 3. Otherwise every record is scanned. For each field, in the order given,
//!    the field's search text is lowercased and tested for the query as a
//!    substring. The first matching field accepts the record. Matches keep
//!    their original order and are truncated to [`MATCH_LIMIT`].
//! 4. Each survivor becomes a [`ResultRow`] labelled `id` followed by every
//!    other requested field, targeting `{route_prefix}/{id}`.
//! 5. The destination [`ResultList`] is cleared and the rows appended in order.
//!
//! The two limits differ on purpose and are not unified.

use crate::{
    error::Result,
    record::{Record, ID_FIELD},
};

/// Records shown when the search box is empty.
pub const EMPTY_QUERY_LIMIT: usize = 5;
/// Records shown for a non-empty query.
pub const MATCH_LIMIT: usize = 6;

/// Lowercase the raw search box text.
pub fn normalize_query(raw: &str) -> String {
    raw.to_lowercase()
}

/// Select the records a query shows, in dataset order.
///
/// `query` must already be normalised. Every record is scanned even after
/// [`MATCH_LIMIT`] matches, so a malformed record anywhere in the dataset is
/// reported.
pub fn filter_records<'a>(
    records: &'a [Record],
    fields: &[String],
    query: &str,
) -> Result<Vec<&'a Record>> {
    if query.is_empty() {
        return Ok(records.iter().take(EMPTY_QUERY_LIMIT).collect());
    }

    let mut matches = Vec::new();
    for record in records {
        for field in fields {
            if record.search_text(field)?.to_lowercase().contains(query) {
                matches.push(record);
                break;
            }
        }
    }

    tracing::trace!(query, matched = matches.len(), "filter_records");
    matches.truncate(MATCH_LIMIT);
    Ok(matches)
}

/// `{route_prefix}/{id}`, unescaped.
pub fn navigation_target(route_prefix: &str, id: &str) -> String {
    format!("{route_prefix}/{id}")
}

/// Row text: the id, then every requested field except `id`, space-separated.
pub fn row_label(record: &Record, fields: &[String]) -> Result<String> {
    let mut label = record.id()?;
    for field in fields.iter().filter(|f| f.as_str() != ID_FIELD) {
        label.push(' ');
        label.push_str(&record.display_text(field)?);
    }
    Ok(label)
}

// ---------------------------------------------------------------------------
// Rendered output
// ---------------------------------------------------------------------------

/// One rendered, activatable row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    /// Display text of the record's `id`.
    pub id: String,
    pub label: String,
    /// Location the row navigates to when activated.
    pub target: String,
}

/// Destination container for rendered rows, identified by its list id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultList {
    pub id: String,
    rows: Vec<ResultRow>,
}

impl ResultList {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rows: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn append(&mut self, row: ResultRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build rows for already-filtered records.
pub fn render_rows(
    records: &[&Record],
    fields: &[String],
    route_prefix: &str,
) -> Result<Vec<ResultRow>> {
    records
        .iter()
        .map(|record| {
            let id = record.id()?;
            Ok(ResultRow {
                label: row_label(record, fields)?,
                target: navigation_target(route_prefix, &id),
                id,
            })
        })
        .collect()
}

/// Everything one search refresh needs besides the query text.
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest<'a> {
    pub records: &'a [Record],
    pub fields: &'a [String],
    pub route_prefix: &'a str,
}

/// Filter `request.records` by `raw_query` and re-render `list`.
///
/// Rows are built before `list` is touched: on error the list keeps its
/// previous contents.
pub fn get_matching_result(
    request: SearchRequest<'_>,
    raw_query: &str,
    list: &mut ResultList,
) -> Result<()> {
    let query = normalize_query(raw_query);
    let matched = filter_records(request.records, request.fields, &query)?;
    let rows = render_rows(&matched, request.fields, request.route_prefix)?;

    list.clear();
    for row in rows {
        list.append(row);
    }
    tracing::debug!(list = %list.id, query = %query, rows = list.len(), "results rendered");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
