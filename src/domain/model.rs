use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// CSV 讀取時視為缺值的字串
const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Missing,
    /// Integer literals stay exact; `f64` cannot hold every `i64`.
    Integer(i64),
    Number(f64),
    Text(String),
}

impl Value {
    /// Interprets a raw CSV field. Integer literals become `Integer`, other
    /// finite numbers become `Number`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if NULL_TOKENS.contains(&trimmed) {
            return Value::Missing;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Integer(i);
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            _ => Value::Text(raw.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<Option<f64>> for Value {
    fn from(n: Option<f64>) -> Self {
        n.map_or(Value::Missing, Value::Number)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn from_optional(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self::new(name, values.into_iter().map(Value::from).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 整欄轉為數值；缺值或文字會回報所在列 (從 1 起算)
    pub fn numbers(&self) -> Result<Vec<f64>> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                value.as_f64().ok_or_else(|| EtlError::NonNumericValue {
                    column: self.name.clone(),
                    row: i + 1,
                    value: value.to_string(),
                })
            })
            .collect()
    }
}

/// Ordered, named columns of equal length. Column names are unique.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(EtlError::DuplicateColumn {
                    name: column.name().to_string(),
                });
            }
        }

        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(EtlError::LengthMismatch {
                    name: bad.name().to_string(),
                    expected,
                    actual: bad.len(),
                });
            }
        }

        Ok(Self { columns })
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name() == name)
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| EtlError::ColumnNotFound {
                name: name.to_string(),
            })
    }

    /// 依給定順序投影出新表
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        let columns = names
            .iter()
            .map(|name| self.column(name.as_ref()).cloned())
            .collect::<Result<Vec<_>>>()?;
        Table::new(columns)
    }

    /// Returns a new table with `extra` appended after the existing columns.
    pub fn with_columns(&self, extra: Vec<Column>) -> Result<Table> {
        let mut columns = self.columns.clone();
        columns.extend(extra);
        Table::new(columns)
    }

    pub fn map_values<F>(&self, f: F) -> Table
    where
        F: Fn(&Value) -> Value,
    {
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name(), c.values().iter().map(&f).collect()))
            .collect();
        Table { columns }
    }

    /// Iterates rows as cell references, in column order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> + '_ {
        (0..self.row_count()).map(move |i| self.columns.iter().map(|c| &c.values[i]).collect())
    }
}

/// 銷售分析的彙總指標
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_margin: f64,
    pub average_margin_percentage: Option<f64>,
    pub average_cost_to_revenue: Option<f64>,
    pub highest_cost_month: Option<String>,
    pub lowest_cost_month: Option<String>,
    pub highest_cost_growth: Option<f64>,
    pub average_cost_growth: Option<f64>,
    pub best_margin_month: Option<String>,
    pub worst_margin_month: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub table: Table,
    pub summary: Option<SalesSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Extract,
    Analyze,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub kind: JobKind,
    pub output_path: String,
    pub columns: usize,
    pub rows: usize,
    pub summary: Option<SalesSummary>,
    pub summary_path: Option<String>,
}

impl RunReport {
    /// Console lines announcing a successful run.
    pub fn lines(&self) -> Vec<String> {
        match self.kind {
            JobKind::Extract => vec![
                format!(
                    "Successfully extracted {} columns to {}",
                    self.columns, self.output_path
                ),
                format!("Number of rows processed: {}", self.rows),
            ],
            JobKind::Analyze => {
                let mut lines = vec![format!(
                    "Successfully analyzed {} rows to {}",
                    self.rows, self.output_path
                )];
                if let Some(path) = &self.summary_path {
                    lines.push(format!("Summary written to {}", path));
                }
                lines
            }
        }
    }
}
