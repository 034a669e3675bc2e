use crate::data::columns::MissingColumn;
use crate::data::model::ListingTable;

// ---------------------------------------------------------------------------
// Scatter – (x, y) point pairs with optional hover fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// `(column, value)` pairs shown when hovering the point.
    pub hover: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scatter {
    pub x_column: String,
    pub y_column: String,
    pub points: Vec<ScatterPoint>,
    /// Hover columns that actually exist in the table.
    pub hover_columns: Vec<String>,
    /// Rows where x or y was not a number.
    pub skipped: usize,
}

impl Scatter {
    /// Collect one point per row where both columns hold numbers.
    ///
    /// Fails with [`MissingColumn`] if either column is absent.
    pub fn from_table(
        table: &ListingTable,
        x_column: &str,
        y_column: &str,
        hover_candidates: &[String],
    ) -> Result<Self, MissingColumn> {
        let index_of = |column: &str| {
            table.column_index(column).ok_or_else(|| MissingColumn {
                column: column.to_string(),
                available: table.columns().to_vec(),
            })
        };
        let xi = index_of(x_column)?;
        let yi = index_of(y_column)?;

        let hover: Vec<(usize, &String)> = hover_candidates
            .iter()
            .filter_map(|c| table.column_index(c).map(|i| (i, c)))
            .collect();

        let mut points = Vec::with_capacity(table.len());
        let mut skipped = 0;
        for row in table.rows() {
            match (row[xi].as_f64(), row[yi].as_f64()) {
                (Some(x), Some(y)) => points.push(ScatterPoint {
                    x,
                    y,
                    hover: hover
                        .iter()
                        .map(|(i, name)| ((*name).clone(), row[*i].to_string()))
                        .collect(),
                }),
                _ => skipped += 1,
            }
        }

        Ok(Scatter {
            x_column: x_column.to_string(),
            y_column: y_column.to_string(),
            points,
            hover_columns: hover.into_iter().map(|(_, c)| c.clone()).collect(),
            skipped,
        })
    }

    /// The point closest to `(x, y)` in axis-normalized space, if it lies
    /// within `tolerance` (a fraction of each axis' data range).
    pub fn nearest(&self, x: f64, y: f64, tolerance: f64) -> Option<&ScatterPoint> {
        let (x_span, y_span) = self.spans();
        self.points
            .iter()
            .map(|p| {
                let dx = (p.x - x) / x_span;
                let dy = (p.y - y) / y_span;
                (p, (dx * dx + dy * dy).sqrt())
            })
            .filter(|(_, d)| *d <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(p, _)| p)
    }

    fn spans(&self) -> (f64, f64) {
        let span = |vals: &mut dyn Iterator<Item = f64>| {
            let (lo, hi) = vals.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
            let s = hi - lo;
            if s.is_finite() && s > f64::EPSILON { s } else { 1.0 }
        };
        (
            span(&mut self.points.iter().map(|p| p.x)),
            span(&mut self.points.iter().map(|p| p.y)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn table() -> ListingTable {
        ListingTable::new(
            vec!["price".into(), "odometer".into(), "year".into(), "model".into()],
            vec![
                vec![
                    CellValue::Integer(9400),
                    CellValue::Integer(145000),
                    CellValue::Integer(2011),
                    CellValue::Text("bmw x5".into()),
                ],
                vec![
                    CellValue::Integer(25500),
                    CellValue::Null,
                    CellValue::Integer(2013),
                    CellValue::Text("ford f-150".into()),
                ],
                vec![
                    CellValue::Integer(5500),
                    CellValue::Integer(110000),
                    CellValue::Null,
                    CellValue::Text("hyundai sonata".into()),
                ],
            ],
        )
    }

    #[test]
    fn rows_without_numbers_are_skipped() {
        let s = Scatter::from_table(&table(), "odometer", "price", &[]).unwrap();
        assert_eq!(s.points.len(), 2);
        assert_eq!(s.skipped, 1);
        assert_eq!((s.points[0].x, s.points[0].y), (145000.0, 9400.0));
    }

    #[test]
    fn hover_uses_only_present_columns() {
        let hover = vec!["year".to_string(), "model".to_string(), "condition".to_string()];
        let s = Scatter::from_table(&table(), "odometer", "price", &hover).unwrap();

        assert_eq!(s.hover_columns, vec!["year", "model"]);
        assert_eq!(
            s.points[1].hover,
            vec![
                ("year".to_string(), String::new()),
                ("model".to_string(), "hyundai sonata".to_string())
            ]
        );
    }

    #[test]
    fn missing_column_is_reported() {
        let err = Scatter::from_table(&table(), "odometer", "cost", &[]).unwrap_err();
        assert_eq!(err.column, "cost");
        assert_eq!(err.available, vec!["price", "odometer", "year", "model"]);
    }

    #[test]
    fn nearest_respects_tolerance() {
        let s = Scatter::from_table(&table(), "odometer", "price", &[]).unwrap();
        let hit = s.nearest(144_900.0, 9_390.0, 0.02).unwrap();
        assert_eq!(hit.y, 9400.0);
        assert!(s.nearest(127_000.0, 7_000.0, 0.02).is_none());
    }
}
