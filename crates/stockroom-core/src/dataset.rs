//! Datasets — a named record list together with how it is searched and where
//! its rows navigate.
//!
//! Records arrive as a JSON array of objects, one object per row, holding the
//! columns the list page needs.

use crate::{
    config::DatasetConfig,
    demo,
    error::{Error, Result},
    record::Record,
    search::{get_matching_result, ResultList, SearchRequest},
};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub name: String,
    pub list_id: String,
    pub route_prefix: String,
    pub fields: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(config: &DatasetConfig, records: Vec<Record>) -> Self {
        Self {
            name: config.name.clone(),
            list_id: config.list_id.clone(),
            route_prefix: config.route_prefix.clone(),
            fields: config.fields.clone(),
            records,
        }
    }

    /// Load the records for `config`: from `path` when set, else from the
    /// embedded demo data, else empty.
    pub fn from_config(config: &DatasetConfig) -> Result<Self> {
        let records = match &config.path {
            Some(path) => load_records(path)?,
            None => demo::records(&config.name).transpose()?.unwrap_or_default(),
        };
        tracing::debug!(dataset = %config.name, records = records.len(), "dataset loaded");
        Ok(Self::new(config, records))
    }

    pub fn request(&self) -> SearchRequest<'_> {
        SearchRequest {
            records: &self.records,
            fields: &self.fields,
            route_prefix: &self.route_prefix,
        }
    }

    /// Re-render `list` for `raw_query`.
    pub fn search(&self, raw_query: &str, list: &mut ResultList) -> Result<()> {
        get_matching_result(self.request(), raw_query, list)
    }

    /// Empty result list carrying this dataset's list id.
    pub fn result_list(&self) -> ResultList {
        ResultList::new(self.list_id.clone())
    }

    /// Record whose `id` displays as `id`.
    pub fn find(&self, id: &str) -> Option<&Record> {
        self.records
            .iter()
            .find(|r| r.id().map(|rid| rid == id).unwrap_or(false))
    }
}

/// Parse a JSON array of objects into records.
pub fn parse_records(src: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(src)?;
    let Value::Array(items) = value else {
        return Err(Error::NotAnArray);
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(Record::from(map)),
            _ => Err(Error::NotAnObject { index }),
        })
        .collect()
}

/// Read and parse a dataset file.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let src = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&src)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
