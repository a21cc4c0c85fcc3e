use std::path::PathBuf;

use csv_lens_common::Result;

use crate::aggregate::aggregate;
use crate::filter::filter_str;
use crate::render::Output;
use crate::table::{load_with_delimiter, Table};

/// One invocation: which file, and which optional conditions to apply.
#[derive(Debug, Clone)]
pub struct Query {
    pub file: PathBuf,
    pub where_clause: Option<String>,
    pub aggregate: Option<String>,
    pub delimiter: u8,
}

impl Query {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into(), where_clause: None, aggregate: None, delimiter: b',' }
    }

    pub fn filter(mut self, condition: impl Into<String>) -> Self {
        self.where_clause = Some(condition.into());
        self
    }

    pub fn aggregate(mut self, condition: impl Into<String>) -> Self {
        self.aggregate = Some(condition.into());
        self
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Filter first, then aggregate over what is left.
pub fn apply(table: Table, where_clause: Option<&str>, aggregate_clause: Option<&str>) -> Result<Output> {
    let table = match where_clause {
        Some(cond) => filter_str(cond, &table)?,
        None => table,
    };
    match aggregate_clause {
        Some(cond) => Ok(Output::Aggregate(aggregate(cond, &table)?)),
        None => Ok(Output::Rows(table)),
    }
}

pub fn run(query: &Query) -> Result<Output> {
    let table = load_with_delimiter(&query.file, query.delimiter)?;
    apply(table, query.where_clause.as_deref(), query.aggregate.as_deref())
}
