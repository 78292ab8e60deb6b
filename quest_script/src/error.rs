/// Errors raised while parsing a quest source.
///
/// Every variant carries the byte offset of the offending token; use
/// [`line_col`] to turn it into something a content author can find.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected {expected} but found {found} (byte {offset})")]
    UnexpectedToken {
        expected: String,
        found: String,
        offset: usize,
    },
    #[error("unknown directive '{directive}' (byte {offset})")]
    UnknownDirective { directive: String, offset: usize },
    #[error("expected 'task' or 'event' but found '{keyword}' (byte {offset})")]
    UnknownTaskKeyword { keyword: String, offset: usize },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { offset, .. }
            | ParseError::UnknownDirective { offset, .. }
            | ParseError::UnknownTaskKeyword { offset, .. } => *offset,
        }
    }

    /// 1-based line and column of the error within `source`.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        line_col(source, self.offset())
    }
}

/// Convert a byte offset into a 1-based (line, column) pair.
///
/// ```
/// assert_eq!(quest_script::line_col("title : x\nqst :", 10), (2, 1));
/// ```
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let prefix = &source.as_bytes()[..offset.min(source.len())];
    let line = prefix.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = prefix.iter().rposition(|&b| b == b'\n').map_or(0, |pos| pos + 1);
    (line, prefix.len() - line_start + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_counts_from_one() {
        let src = "title : Intro\nfoo : bar";
        assert_eq!(line_col(src, 0), (1, 1));
        assert_eq!(line_col(src, 14), (2, 1));
        assert_eq!(line_col(src, 20), (2, 7));
        assert_eq!(line_col(src, 999), (2, 10));
    }

    #[test]
    fn offset_is_shared_by_all_variants() {
        let err = ParseError::UnknownDirective {
            directive: "foo".into(),
            offset: 14,
        };
        assert_eq!(err.offset(), 14);
        assert_eq!(err.to_string(), "unknown directive 'foo' (byte 14)");
    }
}
