use std::fmt;

/// Characters per "word" in the usual WPM convention
pub const CHARS_PER_WORD: f64 = 5.0;

/// Words per minute for `typed_char_count` characters over `elapsed_secs`.
/// Returns 0 when no time has passed.
pub fn wpm(typed_char_count: usize, elapsed_secs: f64) -> f64 {
    if elapsed_secs <= 0.0 {
        return 0.0;
    }

    (typed_char_count as f64 / CHARS_PER_WORD) / (elapsed_secs / 60.0)
}

/// Percentage of correct keystrokes. No keystrokes yet counts as 100%.
pub fn accuracy(correct_char_count: usize, total_typed_char_count: usize) -> f64 {
    if total_typed_char_count == 0 {
        return 100.0;
    }

    100.0 * correct_char_count as f64 / total_typed_char_count as f64
}

/// Derived view of a session at one point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSnapshot {
    pub wpm: f64,
    pub accuracy: f64,
    pub elapsed_secs: f64,
}

impl StatsSnapshot {
    pub fn from_counts(
        typed_char_count: usize,
        correct_keystrokes: usize,
        total_keystrokes: usize,
        elapsed_secs: f64,
    ) -> Self {
        Self {
            wpm: wpm(typed_char_count, elapsed_secs),
            accuracy: accuracy(correct_keystrokes, total_keystrokes),
            elapsed_secs: elapsed_secs.max(0.0),
        }
    }
}

impl Default for StatsSnapshot {
    fn default() -> Self {
        Self {
            wpm: 0.0,
            accuracy: 100.0,
            elapsed_secs: 0.0,
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WPM: {:.1} | Accuracy: {:.1}% | Time: {:.1}s",
            self.wpm, self.accuracy, self.elapsed_secs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wpm_zero_chars() {
        assert_eq!(wpm(0, 60.0), 0.0);
    }

    #[test]
    fn test_wpm_one_minute() {
        assert_eq!(wpm(300, 60.0), 60.0);
    }

    #[test]
    fn test_wpm_half_minute() {
        assert_eq!(wpm(50, 30.0), 20.0);
    }

    #[test]
    fn test_wpm_no_elapsed_time() {
        assert_eq!(wpm(100, 0.0), 0.0);
        assert_eq!(wpm(100, -1.0), 0.0);
    }

    #[test]
    fn test_accuracy_no_attempts() {
        assert_eq!(accuracy(0, 0), 100.0);
    }

    #[test]
    fn test_accuracy_partial() {
        assert_eq!(accuracy(95, 100), 95.0);
        assert_eq!(accuracy(3, 4), 75.0);
    }

    #[test]
    fn test_accuracy_all_wrong() {
        assert_eq!(accuracy(0, 7), 0.0);
    }

    #[test]
    fn test_snapshot_from_counts() {
        let snapshot = StatsSnapshot::from_counts(300, 95, 100, 60.0);

        assert_eq!(snapshot.wpm, 60.0);
        assert_eq!(snapshot.accuracy, 95.0);
        assert_eq!(snapshot.elapsed_secs, 60.0);
    }

    #[test]
    fn test_snapshot_display() {
        let snapshot = StatsSnapshot {
            wpm: 42.26,
            accuracy: 97.5,
            elapsed_secs: 12.34,
        };

        assert_eq!(
            snapshot.to_string(),
            "WPM: 42.3 | Accuracy: 97.5% | Time: 12.3s"
        );
    }

    #[test]
    fn test_default_snapshot_is_vacuous() {
        let snapshot = StatsSnapshot::default();
        assert_eq!(snapshot.wpm, 0.0);
        assert_eq!(snapshot.accuracy, 100.0);
    }
}
