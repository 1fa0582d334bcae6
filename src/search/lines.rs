use crate::error::{Result, ScribeError};

/// Number of `\n`-delimited lines. Empty content still has one line.
pub fn line_count(content: &str) -> usize {
    content.matches('\n').count() + 1
}

/// Char offset of the start of `line_number` (1-indexed)
pub fn goto_line(content: &str, line_number: usize) -> Result<usize> {
    let total = line_count(content);
    if line_number < 1 || line_number > total {
        return Err(ScribeError::LineOutOfRange {
            line: line_number,
            total,
        });
    }

    if line_number == 1 {
        return Ok(0);
    }

    let mut line = 1;
    for (offset, ch) in content.chars().enumerate() {
        if ch == '\n' {
            line += 1;
            if line == line_number {
                return Ok(offset + 1);
            }
        }
    }

    // line_count guarantees the loop above reaches line_number
    Err(ScribeError::LineOutOfRange {
        line: line_number,
        total,
    })
}

/// 1-indexed (line, column) of a char offset, clamped to the end of content
pub fn position(content: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for ch in content.chars().take(offset) {
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_count_counts_partial_last_line() {
        assert_eq!(line_count(""), 1);
        assert_eq!(line_count("abc"), 1);
        assert_eq!(line_count("a\nb\nc"), 3);
        assert_eq!(line_count("a\nb\n"), 3);
    }

    #[test]
    fn goto_line_returns_line_start() {
        let content = "a\nb\nc";
        assert_eq!(goto_line(content, 1).unwrap(), 0);
        assert_eq!(goto_line(content, 2).unwrap(), 2);
        assert_eq!(&content[2..3], "b");
        assert_eq!(goto_line(content, 3).unwrap(), 4);
    }

    #[test]
    fn goto_line_rejects_out_of_range() {
        let err = goto_line("a\nb\nc", 4).unwrap_err();
        assert!(matches!(
            err,
            ScribeError::LineOutOfRange { line: 4, total: 3 }
        ));
        assert!(matches!(
            goto_line("a", 0),
            Err(ScribeError::LineOutOfRange { line: 0, .. })
        ));
    }

    #[test]
    fn goto_line_reaches_trailing_empty_line() {
        assert_eq!(goto_line("ab\n", 2).unwrap(), 3);
    }

    #[test]
    fn goto_line_counts_chars_not_bytes() {
        assert_eq!(goto_line("é\nx", 2).unwrap(), 2);
    }

    #[test]
    fn position_maps_offsets_to_line_and_column() {
        let content = "ab\ncd";
        assert_eq!(position(content, 0), (1, 1));
        assert_eq!(position(content, 1), (1, 2));
        assert_eq!(position(content, 3), (2, 1));
        assert_eq!(position(content, 100), (2, 3));
    }
}
