/// Streaming median over a bounded, sorted buffer.
///
/// When the buffer is full, a quarter of the values is trimmed from each end,
/// which keeps the median in place while making room for new values.
#[derive(Clone, Debug)]
pub struct MedianTracker {
    sorted: Vec<f64>,
    max_points: usize,
}

impl Default for MedianTracker {
    fn default() -> Self {
        Self::new(500)
    }
}

impl MedianTracker {
    pub fn new(max_points: usize) -> Self {
        Self {
            sorted: Vec::with_capacity(max_points.min(1024)),
            max_points: max_points.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn add(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if self.sorted.len() >= self.max_points {
            self.trim();
        }
        let idx = self.sorted.partition_point(|&v| v < value);
        self.sorted.insert(idx, value);
    }

    pub fn median(&self) -> Option<f64> {
        let n = self.sorted.len();
        if n == 0 {
            return None;
        }
        if n % 2 == 1 {
            Some(self.sorted[n / 2])
        } else {
            Some(0.5 * (self.sorted[n / 2 - 1] + self.sorted[n / 2]))
        }
    }

    fn trim(&mut self) {
        let quarter = self.sorted.len() / 4;
        if quarter == 0 {
            // Too small to trim symmetrically; drop the value farthest from the median.
            if let Some(m) = self.median() {
                let first = self.sorted[0];
                let last = self.sorted[self.sorted.len() - 1];
                if (last - m).abs() >= (m - first).abs() {
                    self.sorted.pop();
                } else {
                    self.sorted.remove(0);
                }
            }
            return;
        }
        self.sorted.truncate(self.sorted.len() - quarter);
        self.sorted.drain(..quarter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_odd_and_even_counts() {
        let mut m = MedianTracker::new(10);
        assert_eq!(m.median(), None);
        for v in [5.0, 1.0, 3.0] {
            m.add(v);
        }
        assert_eq!(m.median(), Some(3.0));
        m.add(4.0);
        assert_eq!(m.median(), Some(3.5));
    }

    #[test]
    fn trimming_keeps_the_center() {
        let mut m = MedianTracker::new(8);
        for v in 0..8 {
            m.add(v as f64);
        }
        m.add(3.5);
        assert_eq!(m.len(), 5);
        assert_eq!(m.median(), Some(3.5));
    }

    #[test]
    fn ignores_non_finite_values() {
        let mut m = MedianTracker::new(4);
        m.add(f64::NAN);
        assert!(m.is_empty());
    }
}
