//! Test case model

use serde::{Deserialize, Serialize};

/// A single test case, read-only to the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub expected_output: String,
    /// Hidden test cases are still judged but excluded from example display
    #[serde(default)]
    pub hidden: bool,
    /// Points contributed under partial-credit scoring
    #[serde(default)]
    pub points: Option<u32>,
}

impl TestCase {
    /// Get a preview of the input (truncated)
    pub fn input_preview(&self, max_len: usize) -> String {
        truncate(&self.input, max_len)
    }

    /// Get a preview of the expected output (truncated)
    pub fn output_preview(&self, max_len: usize) -> String {
        truncate(&self.expected_output, max_len)
    }
}

/// Truncate at a char boundary, marking elision
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let mut end = max_len;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}
