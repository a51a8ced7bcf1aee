#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub t: f64,
    pub count: u64,
    pub cpm: f64,
}

impl Sample {
    pub fn new(t: f64, count: u64, cpm: f64) -> Self {
        Self { t, count, cpm }
    }
}

impl From<(f64, u64, f64)> for Sample {
    fn from(v: (f64, u64, f64)) -> Self {
        Sample {
            t: v.0,
            count: v.1,
            cpm: v.2,
        }
    }
}

/// Sampled metrics as three parallel columns.
///
/// Columns only grow through [`History::push`] and only shrink through
/// [`History::clear`], so they always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    elapsed: Vec<f64>,
    counts: Vec<u64>,
    speeds: Vec<f64>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: impl Into<Sample>) {
        let sample = sample.into();
        self.elapsed.push(sample.t);
        self.counts.push(sample.count);
        self.speeds.push(sample.cpm);
    }

    pub fn clear(&mut self) {
        self.elapsed.clear();
        self.counts.clear();
        self.speeds.clear();
    }

    pub fn len(&self) -> usize {
        self.elapsed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elapsed.is_empty()
    }

    pub fn elapsed(&self) -> &[f64] {
        &self.elapsed
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn speeds(&self) -> &[f64] {
        &self.speeds
    }

    /// (elapsed, count) pairs ready for a chart dataset
    pub fn count_points(&self) -> Vec<(f64, f64)> {
        self.elapsed
            .iter()
            .zip(&self.counts)
            .map(|(&t, &c)| (t, c as f64))
            .collect()
    }

    /// (elapsed, cpm) pairs ready for a chart dataset
    pub fn speed_points(&self) -> Vec<(f64, f64)> {
        self.elapsed
            .iter()
            .zip(&self.speeds)
            .map(|(&t, &s)| (t, s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_columns_aligned() {
        let mut history = History::new();
        history.push(Sample::new(1.0, 3, 90.0));
        history.push((2.0, 5, 100.0));

        assert_eq!(history.len(), 2);
        assert_eq!(history.elapsed(), &[1.0, 2.0]);
        assert_eq!(history.counts(), &[3, 5]);
        assert_eq!(history.speeds(), &[90.0, 100.0]);
    }

    #[test]
    fn test_clear_empties_every_column() {
        let mut history = History::new();
        history.push((1.0, 1, 60.0));
        history.clear();

        assert!(history.is_empty());
        assert!(history.counts().is_empty());
        assert!(history.speeds().is_empty());
        assert_eq!(history, History::new());
    }

    #[test]
    fn test_chart_points() {
        let mut history = History::new();
        history.push((1.0, 2, 120.0));
        history.push((2.5, 4, 96.0));

        assert_eq!(history.count_points(), vec![(1.0, 2.0), (2.5, 4.0)]);
        assert_eq!(history.speed_points(), vec![(1.0, 120.0), (2.5, 96.0)]);
    }
}
