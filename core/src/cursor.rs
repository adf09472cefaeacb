use serde::{Deserialize, Serialize};

// Horizontal scroll position through a noise field.
// Stored as a step count so that after k advances the value is exactly
// `origin + k * increment`, however long the sketch runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanCursor {
    origin: f64,
    increment: f64,
    steps: u64,
}

impl ScanCursor {
    pub fn new(origin: f64, increment: f64) -> Self {
        Self {
            origin,
            increment,
            steps: 0,
        }
    }

    pub fn value(&self) -> f64 {
        self.origin + self.steps as f64 * self.increment
    }

    // Position `columns` increments ahead of the cursor, without moving it
    pub fn offset(&self, columns: u64) -> f64 {
        self.origin + (self.steps + columns) as f64 * self.increment
    }

    pub fn advance(&mut self) {
        self.steps += 1;
    }

    pub fn advance_by(&mut self, steps: u64) {
        self.steps += steps;
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::ScanCursor;

    #[test]
    fn cursor_no_drift() {
        let mut c = ScanCursor::new(0.0, 0.01);
        for k in 1..=100_000u64 {
            c.advance();
            assert_eq!(c.value(), 0.0 + k as f64 * 0.01);
        }
    }

    #[test]
    fn cursor_monotonic() {
        let mut c = ScanCursor::new(-3.5, 0.25);
        let mut prev = c.value();
        for _ in 0..1000 {
            c.advance();
            assert!(c.value() > prev);
            prev = c.value();
        }
        assert_eq!(c.steps(), 1000);
    }

    #[test]
    fn cursor_offset_is_read_only() {
        let mut c = ScanCursor::new(1.0, 0.5);
        c.advance_by(4);
        assert_eq!(c.offset(0), c.value());
        assert_eq!(c.offset(2), 1.0 + 6.0 * 0.5);
        assert_eq!(c.steps(), 4);
    }

    #[test]
    fn cursor_advance_by_matches_repeated_advance() {
        let mut a = ScanCursor::new(0.3, 0.01);
        let mut b = a;
        a.advance_by(37);
        for _ in 0..37 {
            b.advance();
        }
        assert_eq!(a, b);
    }
}
