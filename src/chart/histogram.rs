// ---------------------------------------------------------------------------
// Histogram – equal-width frequency buckets over one numeric column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl Bin {
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub column: String,
    pub bins: Vec<Bin>,
    /// Rows whose cell was not a number.
    pub skipped: usize,
}

impl Histogram {
    /// Bin `values` into `n_bins` equal-width buckets spanning `[min, max]`.
    ///
    /// The maximum lands in the last bucket.  Only a constant column collapses
    /// to a single bucket of width 1 centred on the value.  Returns `None` when
    /// there are no values or `n_bins` is zero.
    pub fn compute(column: &str, values: &[f64], n_bins: usize, skipped: usize) -> Option<Self> {
        if values.is_empty() || n_bins == 0 {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if max == min {
            return Some(Histogram {
                column: column.to_string(),
                bins: vec![Bin {
                    lower: min - 0.5,
                    upper: min + 0.5,
                    count: values.len(),
                }],
                skipped,
            });
        }

        // Halved so the span stays finite even for [-f64::MAX, f64::MAX].
        let half_span = max / 2.0 - min / 2.0;
        let mut counts = vec![0usize; n_bins];
        for &v in values {
            let fraction = (v / 2.0 - min / 2.0) / half_span;
            let idx = ((fraction * n_bins as f64).floor() as usize).min(n_bins - 1);
            counts[idx] += 1;
        }

        let edge = |i: usize| {
            if i == n_bins {
                return max;
            }
            let t = i as f64 / n_bins as f64;
            min * (1.0 - t) + max * t
        };
        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| Bin {
                lower: edge(i),
                upper: edge(i + 1),
                count,
            })
            .collect();

        Some(Histogram {
            column: column.to_string(),
            bins,
            skipped,
        })
    }

    /// Total number of binned values.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_cover_every_value() {
        let values: Vec<f64> = (0..=100).map(|v| v as f64 * 1000.0).collect();
        let h = Histogram::compute("odometer", &values, 50, 0).unwrap();

        assert_eq!(h.bins.len(), 50);
        assert_eq!(h.total(), 101);
        assert_eq!(h.bins[0].lower, 0.0);
        assert_eq!(h.bins[49].upper, 100_000.0);
    }

    #[test]
    fn maximum_falls_in_last_bin() {
        let h = Histogram::compute("odometer", &[0.0, 10.0], 5, 0).unwrap();
        let counts: Vec<usize> = h.bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 0, 0, 0, 1]);
        assert_eq!(h.bins[2].width(), 2.0);
        assert_eq!(h.bins[2].center(), 5.0);
    }

    #[test]
    fn constant_column_collapses_to_one_bin() {
        let h = Histogram::compute("odometer", &[42.0, 42.0, 42.0], 50, 2).unwrap();
        assert_eq!(h.bins.len(), 1);
        assert_eq!(h.bins[0].count, 3);
        assert_eq!(h.bins[0].center(), 42.0);
        assert_eq!(h.skipped, 2);
    }

    #[test]
    fn tiny_range_still_uses_every_bin() {
        let h = Histogram::compute("odometer", &[1e-20, 2e-20], 10, 0).unwrap();
        assert_eq!(h.bins.len(), 10);
        assert_eq!(h.bins[0].count, 1);
        assert_eq!(h.bins[9].count, 1);
        assert_eq!(h.bins[9].upper, 2e-20);
    }

    #[test]
    fn extreme_range_does_not_overflow() {
        let h = Histogram::compute("odometer", &[-1e308, 0.0, 1e308], 10, 0).unwrap();
        let counts: Vec<usize> = h.bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 0, 0, 0, 0, 1, 0, 0, 0, 1]);
        assert_eq!(h.bins[0].lower, -1e308);
        assert_eq!(h.bins[9].upper, 1e308);
        assert!(h.bins.iter().all(|b| b.lower.is_finite() && b.upper.is_finite()));
    }

    #[test]
    fn empty_input_has_no_histogram() {
        assert!(Histogram::compute("odometer", &[], 50, 4).is_none());
        assert!(Histogram::compute("odometer", &[1.0], 0, 0).is_none());
    }
}
