use crate::condition::{parse_aggregate, AggregateCondition, Reducer};
use crate::table::Table;
use csv_lens_common::{CsvLensError, Result};

/// Single-column, single-row result of a reduction. The value stays an `f64`
/// until it is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateResult {
    pub reducer: Reducer,
    pub value: f64,
}

impl AggregateResult {
    pub fn column_name(&self) -> &'static str {
        self.reducer.name()
    }

    /// Text form, so the result can go back through the pipeline.
    pub fn to_table(&self) -> Table {
        Table::single_cell(self.column_name(), self.value.to_string())
    }
}

pub fn reduce(reducer: Reducer, values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    match reducer {
        Reducer::Avg => values.iter().sum::<f64>() / values.len() as f64,
        Reducer::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        Reducer::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

/// Trimmed `f64`, also taking `_` as a separator between two digits (`1_000`).
pub fn parse_number(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if !cell.contains('_') {
        return cell.parse().ok();
    }
    let bytes = cell.as_bytes();
    let separated = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    });
    if !separated {
        return None;
    }
    cell.replace('_', "").parse().ok()
}

pub fn aggregate_with(condition: &AggregateCondition, table: &Table) -> Result<AggregateResult> {
    let idx = table.column_index(&condition.column)?;
    let values = table
        .column(idx)
        .map(parse_number)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| CsvLensError::NonNumericColumn(condition.column.clone()))?;
    let value = reduce(condition.reducer, &values);
    log::debug!(
        "{}({}) over {} values = {value}",
        condition.reducer,
        condition.column,
        values.len()
    );
    Ok(AggregateResult { reducer: condition.reducer, value })
}

/// Parse `condition` (`column=reducer`) and reduce that column of `table`.
pub fn aggregate(condition: &str, table: &Table) -> Result<AggregateResult> {
    aggregate_with(&parse_aggregate(condition)?, table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test] fn avg() { assert_eq!(reduce(Reducer::Avg, &[1.0, 2.0, 6.0]), 3.0); }
    #[test] fn min() { assert_eq!(reduce(Reducer::Min, &[3.0, -1.5, 2.0]), -1.5); }
    #[test] fn max() { assert_eq!(reduce(Reducer::Max, &[3.0, -1.5, 2.0]), 3.0); }
    #[test] fn empty_defaults_to_zero() {
        for r in Reducer::ALL { assert_eq!(reduce(r, &[]), 0.0); }
    }

    #[test] fn digit_separators() { assert_eq!(parse_number("1_000"), Some(1000.0)); assert_eq!(parse_number(" 2_500.5 "), Some(2500.5)); }
    #[test] fn misplaced_separators() { for s in ["_1", "1_", "1__0", "1_.5", "_"] { assert_eq!(parse_number(s), None, "{s}"); } }

    #[test]
    fn separated_column_aggregates() {
        let t = Table::from_rows(&[&["n"][..], &["1_000"][..], &["3_000"][..]]).unwrap();
        assert_eq!(aggregate("n=avg", &t).unwrap().value, 2000.0);
    }

    fn scores() -> Table {
        Table::from_rows(&[&["who", "score"][..], &["a", " 10 "][..], &["b", "-2.5"][..], &["c", "1e1"][..]]).unwrap()
    }

    #[test]
    fn parses_what_filtering_would_not() {
        let r = aggregate("score=min", &scores()).unwrap();
        assert_eq!(r, AggregateResult { reducer: Reducer::Min, value: -2.5 });
        assert_eq!(aggregate("score=max", &scores()).unwrap().value, 10.0);
    }

    #[test]
    fn non_numeric_is_all_or_nothing() {
        let err = aggregate("who=avg", &scores()).unwrap_err();
        assert!(matches!(&err, CsvLensError::NonNumericColumn(c) if c == "who"));
        assert_eq!(err.to_string(), "column 'who' contains non-numeric values");
    }

    #[test]
    fn reducer_checked_before_column() {
        assert!(matches!(aggregate("nope=sum", &scores()), Err(CsvLensError::UnsupportedReducer(_))));
        assert!(matches!(aggregate("nope=max", &scores()), Err(CsvLensError::UnknownColumn(_))));
    }

    #[test]
    fn header_only_table_averages_to_zero() {
        let t = Table::from_rows(&[&["score"][..]]).unwrap();
        assert_eq!(aggregate("score=avg", &t).unwrap().value, 0.0);
    }

    #[test]
    fn result_table_shape() {
        let t = aggregate("score=max", &scores()).unwrap().to_table();
        assert_eq!(t.header(), ["max"]);
        assert_eq!(t.rows(), [vec!["10".to_string()]]);
    }

    #[test]
    fn aggregating_a_result_loses_the_source_column() {
        let once = aggregate("score=min", &scores()).unwrap().to_table();
        assert!(matches!(aggregate("score=min", &once), Err(CsvLensError::UnknownColumn(_))));
        assert_eq!(aggregate("min=max", &once).unwrap().value, -2.5);
    }
}
