//! Output comparison
//!
//! `compare` is a pure function of its three inputs: no state, no locale.

use serde::{Deserialize, Serialize};

/// How actual output is checked against expected output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ComparisonMode {
    /// Byte equality after stripping a single trailing newline
    Exact,
    /// Token sequences compared, splitting on arbitrary whitespace
    WhitespaceInsensitive,
    /// Tokens compared numerically within `epsilon` where both parse as
    /// numbers, falling back to string equality otherwise
    FloatTolerant { epsilon: f64 },
}

impl Default for ComparisonMode {
    fn default() -> Self {
        Self::WhitespaceInsensitive
    }
}

/// Check whether `actual` matches `expected` under the given mode
pub fn compare(expected: &str, actual: &str, mode: ComparisonMode) -> bool {
    match mode {
        ComparisonMode::Exact => strip_trailing_newline(expected) == strip_trailing_newline(actual),
        ComparisonMode::WhitespaceInsensitive => {
            let mut e = expected.split_whitespace();
            let mut a = actual.split_whitespace();
            loop {
                match (e.next(), a.next()) {
                    (None, None) => return true,
                    (Some(x), Some(y)) if x == y => {}
                    _ => return false,
                }
            }
        }
        ComparisonMode::FloatTolerant { epsilon } => {
            let e: Vec<&str> = expected.split_whitespace().collect();
            let a: Vec<&str> = actual.split_whitespace().collect();
            if e.len() != a.len() {
                return false;
            }
            e.iter()
                .zip(a.iter())
                .all(|(x, y)| tokens_match(x, y, epsilon))
        }
    }
}

fn strip_trailing_newline(s: &str) -> &str {
    s.strip_suffix('\n').unwrap_or(s)
}

fn tokens_match(expected: &str, actual: &str, epsilon: f64) -> bool {
    match (expected.parse::<f64>(), actual.parse::<f64>()) {
        // NaN never satisfies the epsilon check against itself; compare
        // such tokens as strings
        (Ok(e), Ok(a)) if !e.is_nan() && !a.is_nan() => (e - a).abs() <= epsilon,
        _ => expected == actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_strips_single_trailing_newline() {
        assert!(compare("55\n", "55", ComparisonMode::Exact));
        assert!(compare("55", "55\n", ComparisonMode::Exact));
        assert!(!compare("55\n\n", "55", ComparisonMode::Exact));
        assert!(!compare("55 ", "55", ComparisonMode::Exact));
    }

    #[test]
    fn whitespace_insensitive_ignores_layout() {
        let mode = ComparisonMode::WhitespaceInsensitive;
        assert!(compare("1 2 3", "1\n2\n3\n", mode));
        assert!(compare("1 2 3", "  1\t2  3 \n\n", mode));
        assert!(!compare("1 2 3", "1 2", mode));
        assert!(!compare("1 2 3", "1 2 4", mode));
    }

    #[test]
    fn trailing_blank_lines_ignored_by_default_mode() {
        assert!(compare("hello", "hello\n\n\n", ComparisonMode::default()));
    }

    #[test]
    fn float_tolerant_compares_numbers_within_epsilon() {
        let mode = ComparisonMode::FloatTolerant { epsilon: 1e-6 };
        assert!(compare("3.141592", "3.1415925", mode));
        assert!(!compare("3.141592", "3.15", mode));
    }

    #[test]
    fn float_tolerant_falls_back_to_string_equality() {
        let mode = ComparisonMode::FloatTolerant { epsilon: 1e-6 };
        assert!(compare("yes 1.0", "yes 1.0000001", mode));
        assert!(!compare("yes", "no", mode));
        assert!(!compare("1.0 2.0", "1.0", mode));
    }

    #[test]
    fn float_tolerant_compares_nan_tokens_as_strings() {
        let mode = ComparisonMode::FloatTolerant { epsilon: 1e-6 };
        assert!(compare("nan", "nan", mode));
        assert!(compare("NaN", "NaN", mode));
        assert!(!compare("nan", "NaN", mode));
        assert!(!compare("nan", "1.0", mode));
    }

    #[test]
    fn compare_is_pure() {
        let mode = ComparisonMode::FloatTolerant { epsilon: 0.5 };
        let first = compare("1.2", "1.4", mode);
        let second = compare("1.2", "1.4", mode);
        assert_eq!(first, second);
        assert!(first);
    }
}
