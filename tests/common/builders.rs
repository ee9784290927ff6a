//! Test builders — ergonomic constructors for records and datasets.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use serde_json::Value;
use stockroom_core::{config::DatasetConfig, Dataset, Record};

// ---------------------------------------------------------------------------
// DatasetBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for in-memory [`Dataset`] fixtures.
///
/// # Example
///
/// ```rust
/// let ds = DatasetBuilder::new("fruit")
///     .fields(&["id", "name"])
///     .record(1, &[("name", "Apple".into())])
///     .build();
/// ```
pub struct DatasetBuilder {
    config: DatasetConfig,
    records: Vec<Record>,
}

impl DatasetBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            config: DatasetConfig {
                name: name.to_string(),
                list_id: format!("{name}-list"),
                route_prefix: format!("/warehouse/{name}"),
                fields: vec!["id".to_string(), "name".to_string()],
                path: None,
            },
            records: Vec::new(),
        }
    }

    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.config.fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn route_prefix(mut self, prefix: &str) -> Self {
        self.config.route_prefix = prefix.to_string();
        self
    }

    pub fn record(mut self, id: impl Into<Value>, fields: &[(&str, Value)]) -> Self {
        let mut record = Record::new().with("id", id);
        for (field, value) in fields {
            record = record.with(*field, value.clone());
        }
        self.records.push(record);
        self
    }

    /// One record per name, ids counting up from 1.
    pub fn named(mut self, names: &[&str]) -> Self {
        for name in names {
            let id = self.records.len() + 1;
            self = self.record(id, &[("name", Value::from(*name))]);
        }
        self
    }

    pub fn build(self) -> Dataset {
        Dataset::new(&self.config, self.records)
    }
}

/// Labels of the rows a query renders, in order.
pub fn labels(dataset: &Dataset, query: &str) -> Vec<String> {
    let mut list = dataset.result_list();
    dataset
        .search(query, &mut list)
        .unwrap_or_else(|err| panic!("search {query:?} failed: {err}"));
    list.rows().iter().map(|r| r.label.clone()).collect()
}
