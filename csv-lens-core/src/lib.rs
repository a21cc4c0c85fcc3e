pub mod aggregate;
pub mod condition;
pub mod filter;
pub mod pipeline;
pub mod render;
pub mod table;

pub use aggregate::{aggregate, aggregate_with, parse_number, reduce, AggregateResult};
pub use condition::{
    parse_aggregate, parse_filter, AggregateCondition, FilterCondition, Operator, Reducer,
};
pub use csv_lens_common::{CsvLensError, Result};
pub use filter::{filter, filter_str, is_numeric_comparable, Comparable};
pub use pipeline::{apply, run, Query};
pub use render::{render, to_record_batch, Output};
pub use table::{load, load_with_delimiter, Table};
