use std::fmt;
use std::str::Utf8Error;

use crate::span::{LineIndex, LinePosition, LineSpan, SourcePosition, SourceSpan};

/// Error constructing a [`SourceText`] from raw bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTextError {
    source: Utf8Error,
}

impl fmt::Display for SourceTextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source is not valid UTF-8: {}", self.source)
    }
}

impl std::error::Error for SourceTextError {}

/// Owns the UTF-8 source buffer for one compilation and the precomputed
/// line-start index used to map byte offsets to (line, column) pairs.
///
/// Byte-offset arithmetic elsewhere in the front end is UTF-8-safe because
/// the lexer only ever branches on ASCII code units; multi-byte sequences
/// are always consumed as opaque runs.
#[derive(Debug)]
pub struct SourceText {
    buffer: String,
    lines: LineIndex,
}

impl SourceText {
    /// Construct from a UTF-8 byte buffer, scanning once to record
    /// line-start offsets.
    pub fn new(bytes: &[u8]) -> Result<Self, SourceTextError> {
        let buffer = std::str::from_utf8(bytes)
            .map_err(|source| SourceTextError { source })?
            .to_string();
        let lines = LineIndex::new(&buffer);
        Ok(Self { buffer, lines })
    }

    pub fn from_str(source: &str) -> Self {
        let lines = LineIndex::new(source);
        Self {
            buffer: source.to_string(),
            lines,
        }
    }

    pub fn len(&self) -> u32 {
        self.buffer.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn text(&self, span: SourceSpan) -> &str {
        &self.buffer[span.start as usize..span.end as usize]
    }

    pub fn line_index(&self, offset: SourcePosition) -> usize {
        self.lines.line_index(offset)
    }

    pub fn line_position(&self, offset: SourcePosition) -> LinePosition {
        self.lines.line_position(offset)
    }

    pub fn line_span(&self, span: SourceSpan) -> LineSpan {
        self.lines.line_span(span)
    }

    /// The full line, including its terminator (if any).
    pub fn get_line(&self, index: usize) -> &str {
        let start = self.lines.line_start(index);
        let end = self.lines.line_end(index, self.len());
        &self.buffer[start as usize..end as usize]
    }

    /// The line's content, with any `\n`/`\r\n` terminator stripped.
    pub fn get_line_content(&self, index: usize) -> &str {
        self.get_line(index)
            .trim_end_matches('\n')
            .trim_end_matches('\r')
    }

    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_utf8() {
        let bytes: &[u8] = &[0xff, 0xfe, 0xfd];
        assert!(SourceText::new(bytes).is_err());
    }

    #[test]
    fn text_returns_substring() {
        let src = SourceText::from_str("hello world");
        assert_eq!(src.text(SourceSpan::new(0, 5)), "hello");
        assert_eq!(src.text(SourceSpan::new(6, 11)), "world");
    }

    #[test]
    fn get_line_includes_terminator_get_line_content_does_not() {
        let src = SourceText::from_str("one\ntwo\n");
        assert_eq!(src.get_line(0), "one\n");
        assert_eq!(src.get_line_content(0), "one");
        assert_eq!(src.get_line(1), "two\n");
        assert_eq!(src.get_line_content(1), "two");
    }

    #[test]
    fn final_line_has_no_terminator() {
        let src = SourceText::from_str("one\ntwo");
        assert_eq!(src.get_line(1), "two");
        assert_eq!(src.get_line_content(1), "two");
    }

    #[test]
    fn empty_source_has_one_empty_line() {
        let src = SourceText::from_str("");
        assert_eq!(src.line_count(), 1);
        assert_eq!(src.get_line(0), "");
        assert!(src.is_empty());
    }

    #[test]
    fn line_span_across_multiple_lines() {
        let src = SourceText::from_str("ab\ncd\nef");
        let span = src.line_span(SourceSpan::new(1, 7));
        assert_eq!(span.start, LinePosition::new(0, 1));
        assert_eq!(span.end, LinePosition::new(2, 1));
    }
}
