//! Chart construction: turns a trigger plus the resolved axes into a
//! ready-to-draw chart.  Nothing here touches egui; `ui::plot` draws the
//! result.

pub mod histogram;
pub mod scatter;

use std::fmt;
use std::sync::Arc;

use crate::data::columns::{AxisSelection, ColumnList, MissingColumn};
use crate::data::model::ListingTable;

pub use histogram::Histogram;
pub use scatter::Scatter;

/// Which button the user pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Histogram,
    Scatter,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Histogram => write!(f, "histogram"),
            ChartKind::Scatter => write!(f, "scatter"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Histogram(Histogram),
    Scatter(Arc<Scatter>),
}

impl Chart {
    /// Columns the chart was built from.
    pub fn columns(&self) -> Vec<&str> {
        match self {
            Chart::Histogram(h) => vec![h.column.as_str()],
            Chart::Scatter(s) => vec![s.x_column.as_str(), s.y_column.as_str()],
        }
    }

    /// One-line description shown above the chart.
    pub fn caption(&self) -> String {
        match self {
            Chart::Histogram(h) => format!("Building histogram for: {}", h.column),
            Chart::Scatter(s) => format!("Building scatter: {} vs {}", s.y_column, s.x_column),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub histogram_bins: usize,
    pub hover_columns: Vec<String>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            histogram_bins: 50,
            hover_columns: vec!["year".into(), "model".into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartError {
    #[error(transparent)]
    MissingColumn(#[from] MissingColumn),

    #[error("cannot build {kind}: missing column(s) {}. Available columns: {}", ColumnList(.missing), ColumnList(.available))]
    MissingColumns {
        kind: ChartKind,
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("column '{0}' has no numeric values to plot")]
    NoNumericData(String),

    #[error("no rows have numeric values in both '{x}' and '{y}'")]
    NoNumericPairs { x: String, y: String },
}

/// Build the chart for `kind`.  Every column the chart needs must be present
/// in `table`; otherwise the error lists the columns that are.
pub fn build_chart(
    kind: ChartKind,
    table: &ListingTable,
    axes: &AxisSelection,
    options: &ChartOptions,
) -> Result<Chart, ChartError> {
    match kind {
        ChartKind::Histogram => {
            let column = present(table, axes.x.require()?)?;
            let values = table.numeric_values(column).unwrap_or_default();
            let skipped = table.len() - values.len();
            Histogram::compute(column, &values, options.histogram_bins, skipped)
                .map(Chart::Histogram)
                .ok_or_else(|| ChartError::NoNumericData(column.to_string()))
        }
        ChartKind::Scatter => {
            let missing: Vec<String> = [&axes.x, &axes.y]
                .into_iter()
                .filter_map(|choice| match choice.require() {
                    Ok(c) if table.has_column(c) => None,
                    Ok(c) => Some(c.to_string()),
                    Err(e) => Some(e.column),
                })
                .collect();
            if !missing.is_empty() {
                return Err(ChartError::MissingColumns {
                    kind,
                    missing,
                    available: table.columns().to_vec(),
                });
            }

            let (x, y) = (axes.x.require()?, axes.y.require()?);
            let scatter = Scatter::from_table(table, x, y, &options.hover_columns)?;
            if scatter.points.is_empty() {
                return Err(ChartError::NoNumericPairs {
                    x: x.to_string(),
                    y: y.to_string(),
                });
            }
            Ok(Chart::Scatter(Arc::new(scatter)))
        }
    }
}

fn present<'a>(table: &ListingTable, column: &'a str) -> Result<&'a str, MissingColumn> {
    if table.has_column(column) {
        Ok(column)
    } else {
        Err(MissingColumn {
            column: column.to_string(),
            available: table.columns().to_vec(),
        })
    }
}
