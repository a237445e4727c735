//! # Source Position
//!
//! Location of a raw node in the source program. Only the start line is read
//! by the transformer (for diagnostics); the rest is carried for consumers
//! that map back to source.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Line and byte-offset range of a raw node, as reported by the parser.
///
/// Lines follow the parser's own numbering and are never adjusted.
///
/// # Example
///
/// ```rust
/// use ruby_cst::SourcePosition;
///
/// let pos = SourcePosition::line(3);
/// assert_eq!(pos.start_line, 3);
/// assert_eq!(pos.to_string(), "line 3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourcePosition {
    #[serde(default)]
    pub start_line: usize,
    #[serde(default)]
    pub end_line: usize,
    #[serde(default)]
    pub start_offset: usize,
    #[serde(default)]
    pub end_offset: usize,
}

impl SourcePosition {
    /// Creates a position spanning a single line with no offsets.
    #[inline]
    pub fn line(line: usize) -> Self {
        Self {
            start_line: line,
            end_line: line,
            ..Self::default()
        }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.end_line > self.start_line {
            write!(f, "lines {}-{}", self.start_line, self.end_line)
        } else {
            write!(f, "line {}", self.start_line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_line_zero() {
        let pos = SourcePosition::default();
        assert_eq!(pos.start_line, 0);
        assert_eq!(pos.start_offset, 0);
    }

    #[test]
    fn test_display_range() {
        let pos = SourcePosition {
            start_line: 2,
            end_line: 5,
            ..SourcePosition::default()
        };
        assert_eq!(pos.to_string(), "lines 2-5");
    }
}
