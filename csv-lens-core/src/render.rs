use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use arrow::util::pretty::pretty_format_batches;
use csv_lens_common::{CsvLensError, OutputFormat, Result};
use serde_json::{Map, Value as JsonValue};

use crate::aggregate::AggregateResult;
use crate::table::Table;

/// Whatever the pipeline hands to presentation: plain rows, or a reduction
/// whose value is still numeric.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Rows(Table),
    Aggregate(AggregateResult),
}

impl Output {
    pub fn header(&self) -> Vec<&str> {
        match self {
            Output::Rows(t) => t.header().iter().map(String::as_str).collect(),
            Output::Aggregate(a) => vec![a.column_name()],
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            Output::Rows(t) => t.len(),
            Output::Aggregate(_) => 1,
        }
    }
}

// --- arrow conversion ---

pub fn to_record_batch(output: &Output) -> Result<RecordBatch> {
    let (fields, columns): (Vec<Field>, Vec<ArrayRef>) = match output {
        Output::Rows(t) => t
            .header()
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let col: ArrayRef = Arc::new(StringArray::from(t.column(i).collect::<Vec<_>>()));
                (Field::new(name, DataType::Utf8, false), col)
            })
            .unzip(),
        Output::Aggregate(a) => (
            vec![Field::new(a.column_name(), DataType::Float64, false)],
            vec![Arc::new(Float64Array::from(vec![a.value])) as ArrayRef],
        ),
    };
    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?;
    Ok(batch)
}

// --- text output ---

pub fn render(output: &Output, format: OutputFormat, delimiter: u8) -> Result<String> {
    match format {
        OutputFormat::Table => render_table(output),
        OutputFormat::Csv => render_csv(output, delimiter),
        OutputFormat::Json => render_json(output),
    }
}

fn render_table(output: &Output) -> Result<String> {
    let batch = to_record_batch(output)?;
    Ok(pretty_format_batches(&[batch])?.to_string())
}

fn render_csv(output: &Output, delimiter: u8) -> Result<String> {
    let batch = to_record_batch(output)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    writer.write_record(output.header())?;
    for row in 0..batch.num_rows() {
        let cells = batch
            .columns()
            .iter()
            .map(|col| array_value_to_string(col.as_ref(), row))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        writer.write_record(&cells)?;
    }
    let bytes = writer.into_inner().map_err(|e| CsvLensError::Io(e.into_error()))?;
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    // only the terminator of the last record; cells may end in spaces
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// `{"columns": [...], "rows": [{...}, ...]}` so the header survives an
/// empty result.
fn render_json(output: &Output) -> Result<String> {
    let rows: Vec<JsonValue> = match output {
        Output::Rows(t) => t
            .rows()
            .iter()
            .map(|row| {
                let obj: Map<String, JsonValue> = t
                    .header()
                    .iter()
                    .zip(row)
                    .map(|(h, v)| (h.clone(), JsonValue::String(v.clone())))
                    .collect();
                JsonValue::Object(obj)
            })
            .collect(),
        Output::Aggregate(a) => {
            let mut obj = Map::new();
            obj.insert(a.column_name().to_owned(), serde_json::json!(a.value));
            vec![JsonValue::Object(obj)]
        }
    };
    let doc = serde_json::json!({ "columns": output.header(), "rows": rows });
    Ok(serde_json::to_string_pretty(&doc)?)
}
