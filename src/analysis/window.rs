//! Sliding-window accumulator shared by the smoother and the outlier detector.
//!
//! Moods are integers, so the running sum and sum of squares are kept as
//! exact integers. Only the final mean/deviation touches floating point.

/// Running totals over a set of defined moods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct WindowStats {
    count: i64,
    sum: i64,
    sum_sq: i128,
}

impl WindowStats {
    pub fn of(values: impl IntoIterator<Item = i32>) -> Self {
        let mut stats = Self::default();
        for v in values {
            stats.add(v);
        }
        stats
    }

    fn add(&mut self, v: i32) {
        self.count += 1;
        self.sum += i64::from(v);
        self.sum_sq += i128::from(v) * i128::from(v);
    }

    fn remove(&mut self, v: i32) {
        self.count -= 1;
        self.sum -= i64::from(v);
        self.sum_sq -= i128::from(v) * i128::from(v);
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum as f64 / self.count as f64)
    }

    /// Mean truncated toward zero, computed without rounding error.
    pub fn truncated_mean(&self) -> Option<i64> {
        (self.count > 0).then(|| self.sum / self.count)
    }

    /// Sample standard deviation (n - 1 denominator). Undefined below two values.
    pub fn sample_std(&self) -> Option<f64> {
        if self.count < 2 {
            return None;
        }
        let n = i128::from(self.count);
        let sum = i128::from(self.sum);
        // n * Σx² - (Σx)² is n² times the population variance; exact in integers.
        let scaled = (n * self.sum_sq - sum * sum).max(0);
        Some((scaled as f64 / (n * (n - 1)) as f64).sqrt())
    }
}

/// Statistics for the trailing window ending at every position.
///
/// Position `i` is `None` while the window is still warming up
/// (`i < size - 1`) or when any mood inside the window is undefined.
pub(crate) fn trailing_windows(moods: &[Option<i32>], size: usize) -> Vec<Option<WindowStats>> {
    debug_assert!(size > 0, "window size validated by caller");

    let mut out = Vec::with_capacity(moods.len());
    let mut stats = WindowStats::default();
    let mut undefined = 0usize;

    for (i, mood) in moods.iter().enumerate() {
        match mood {
            Some(v) => stats.add(*v),
            None => undefined += 1,
        }
        if i >= size {
            match moods[i - size] {
                Some(v) => stats.remove(v),
                None => undefined -= 1,
            }
        }
        let full = i + 1 >= size;
        out.push((full && undefined == 0).then_some(stats));
    }

    out
}
