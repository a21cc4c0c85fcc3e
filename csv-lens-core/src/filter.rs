use crate::condition::{parse_filter, FilterCondition, Operator};
use crate::table::Table;
use csv_lens_common::{CsvLensError, Result};

/// A cell/operand pair after classification. Both sides must look numeric for
/// the pair to compare as numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparable<'a> {
    Numeric(f64, f64),
    Text(&'a str, &'a str),
}

impl<'a> Comparable<'a> {
    pub fn classify(cell: &'a str, operand: &'a str) -> Self {
        if is_numeric_comparable(cell) && is_numeric_comparable(operand) {
            if let (Ok(a), Ok(b)) = (cell.parse::<f64>(), operand.parse::<f64>()) {
                return Comparable::Numeric(a, b);
            }
        }
        Comparable::Text(cell, operand)
    }
}

/// Digits with at most one `.` anywhere; no sign, exponent or separators.
pub fn is_numeric_comparable(s: &str) -> bool {
    let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
    let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    !(whole.is_empty() && frac.is_empty()) && digits(whole) && digits(frac)
}

pub fn matches(op: Operator, cell: &str, operand: &str) -> bool {
    match op {
        // equality never coerces: "4.40" != "4.4"
        Operator::Eq => cell == operand,
        Operator::Gt => match Comparable::classify(cell, operand) {
            Comparable::Numeric(a, b) => a > b,
            Comparable::Text(a, b) => a > b,
        },
        Operator::Lt => match Comparable::classify(cell, operand) {
            Comparable::Numeric(a, b) => a < b,
            Comparable::Text(a, b) => a < b,
        },
    }
}

pub fn filter(condition: &FilterCondition, table: &Table) -> Result<Table> {
    let idx = table.column_index(&condition.column)?;
    let rows: Vec<Vec<String>> = table
        .rows()
        .iter()
        .filter(|row| matches(condition.operator, &row[idx], &condition.operand))
        .cloned()
        .collect();
    log::debug!(
        "filter {}{}{} matched {} of {} rows",
        condition.column,
        condition.operator,
        condition.operand,
        rows.len(),
        table.len()
    );
    if rows.is_empty() {
        return Err(CsvLensError::NoMatch);
    }
    Ok(table.with_rows(rows))
}

/// Parse `condition` and apply it to `table`.
pub fn filter_str(condition: &str, table: &Table) -> Result<Table> {
    filter(&parse_filter(condition)?, table)
}
