//! Monthly sales metrics: margins, growth and cost ratios.

use crate::domain::model::{Column, SalesSummary, Table};
use crate::utils::error::Result;

pub const MONTH: &str = "month";
pub const REVENUE: &str = "revenue";
pub const COST: &str = "cost";

pub const MARGIN: &str = "margin";
pub const MARGIN_PERCENTAGE: &str = "margin_percentage";
pub const REVENUE_GROWTH: &str = "revenue_growth";
pub const COST_GROWTH: &str = "cost_growth";
pub const COST_TO_REVENUE_RATIO: &str = "cost_to_revenue_ratio";

/// Computes derived metrics over rows already in chronological order.
#[derive(Debug, Default, Clone, Copy)]
pub struct SalesAnalyzer;

impl SalesAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Returns the input columns followed by the five derived columns, plus the summary.
    /// The input table is left untouched.
    pub fn analyze(&self, table: &Table) -> Result<(Table, SalesSummary)> {
        let months: Vec<String> = table
            .column(MONTH)?
            .values()
            .iter()
            .map(|v| v.to_string())
            .collect();
        let revenue = table.column(REVENUE)?.numbers()?;
        let cost = table.column(COST)?.numbers()?;

        let margin: Vec<f64> = revenue.iter().zip(&cost).map(|(r, c)| r - c).collect();
        let margin_percentage: Vec<Option<f64>> = margin
            .iter()
            .zip(&revenue)
            .map(|(m, r)| percentage(*m, *r).map(round2))
            .collect();
        let revenue_growth = growth(&revenue);
        let cost_growth = growth(&cost);
        let cost_to_revenue: Vec<Option<f64>> = cost
            .iter()
            .zip(&revenue)
            .map(|(c, r)| percentage(*c, *r).map(round2))
            .collect();

        tracing::debug!("Computed derived metrics for {} rows", revenue.len());

        let label = |idx: Option<usize>| idx.map(|i| months[i].clone());
        let summary = SalesSummary {
            total_revenue: revenue.iter().sum(),
            total_cost: cost.iter().sum(),
            total_margin: margin.iter().sum(),
            average_margin_percentage: mean(&margin_percentage),
            average_cost_to_revenue: mean(&cost_to_revenue),
            highest_cost_month: label(arg_best(&cost, |a, b| a > b)),
            lowest_cost_month: label(arg_best(&cost, |a, b| a < b)),
            highest_cost_growth: cost_growth.iter().flatten().copied().reduce(f64::max),
            average_cost_growth: mean(&cost_growth),
            best_margin_month: label(arg_best(&margin, |a, b| a > b)),
            worst_margin_month: label(arg_best(&margin, |a, b| a < b)),
        };

        let enriched = table.with_columns(vec![
            Column::new(MARGIN, margin.into_iter().map(Into::into).collect()),
            Column::from_optional(MARGIN_PERCENTAGE, margin_percentage),
            Column::from_optional(REVENUE_GROWTH, revenue_growth),
            Column::from_optional(COST_GROWTH, cost_growth),
            Column::from_optional(COST_TO_REVENUE_RATIO, cost_to_revenue),
        ])?;

        Ok((enriched, summary))
    }
}

pub fn analyze_sales(table: &Table) -> Result<(Table, SalesSummary)> {
    SalesAnalyzer::new().analyze(table)
}

/// `part / whole * 100`, undefined when `whole` is zero.
fn percentage(part: f64, whole: f64) -> Option<f64> {
    if whole == 0.0 {
        None
    } else {
        Some(part / whole * 100.0)
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Period-over-period change in percent. The first row has no predecessor.
fn growth(series: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(series.len());
    if series.is_empty() {
        return out;
    }
    out.push(None);
    out.extend(
        series
            .windows(2)
            .map(|w| percentage(w[1] - w[0], w[0])),
    );
    out
}

fn mean(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        None
    } else {
        Some(present.iter().sum::<f64>() / present.len() as f64)
    }
}

/// Index of the winning value; ties keep the first occurrence.
fn arg_best(values: &[f64], beats: impl Fn(f64, f64) -> bool) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, v) in values.iter().enumerate() {
        match best {
            Some(b) if !beats(*v, values[b]) => {}
            _ => best = Some(i),
        }
    }
    best
}
