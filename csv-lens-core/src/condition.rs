use csv_lens_common::{CsvLensError, Result};
use std::fmt;

// --- filter conditions ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator { Gt, Lt, Eq }

impl Operator {
    /// Detection order. A string holding several tokens takes the first listed
    /// here, wherever it sits in the string.
    pub const PRIORITY: [Operator; 3] = [Operator::Gt, Operator::Lt, Operator::Eq];

    pub fn token(self) -> char {
        match self { Operator::Gt => '>', Operator::Lt => '<', Operator::Eq => '=' }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    pub column: String,
    pub operator: Operator,
    pub operand: String,
}

pub fn parse_filter(condition: &str) -> Result<FilterCondition> {
    let operator = Operator::PRIORITY
        .into_iter()
        .find(|op| condition.contains(op.token()))
        .ok_or(CsvLensError::UnsupportedOperator)?;
    let (column, operand) = condition
        .split_once(operator.token())
        .ok_or(CsvLensError::UnsupportedOperator)?;
    let parsed = FilterCondition {
        column: column.trim().to_owned(),
        operator,
        operand: operand.trim().to_owned(),
    };
    log::debug!("filter condition {condition:?} -> {parsed:?}");
    Ok(parsed)
}

// --- aggregate conditions ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reducer { Avg, Min, Max }

impl Reducer {
    pub const ALL: [Reducer; 3] = [Reducer::Avg, Reducer::Min, Reducer::Max];

    pub fn name(self) -> &'static str {
        match self { Reducer::Avg => "avg", Reducer::Min => "min", Reducer::Max => "max" }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }
}

impl fmt::Display for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateCondition {
    pub column: String,
    pub reducer: Reducer,
}

/// `column=reducer`. Only the first `=` splits, so `a=avg=b` asks for the
/// reducer `avg=b` and is rejected.
pub fn parse_aggregate(condition: &str) -> Result<AggregateCondition> {
    let (column, reducer) = condition
        .split_once('=')
        .ok_or(CsvLensError::MalformedAggregate)?;
    let reducer = reducer.trim();
    let reducer = Reducer::from_name(reducer)
        .ok_or_else(|| CsvLensError::UnsupportedReducer(reducer.to_owned()))?;
    let parsed = AggregateCondition { column: column.trim().to_owned(), reducer };
    log::debug!("aggregate condition {condition:?} -> {parsed:?}");
    Ok(parsed)
}
