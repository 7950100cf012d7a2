use std::fmt;

use serde::Serialize;

use crate::span::SourceSpan;

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Note => write!(f, "note"),
        }
    }
}

/// A single diagnostic record: `{severity, span, message}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub span: SourceSpan,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Append-only collector of [`Diagnostic`] records.
///
/// Diagnostics are appended in the order the lexer/parser produce them,
/// which is parse order, not necessarily source order: a caller that needs
/// source order must sort by span start. There is no deduplication.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    records: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, span: SourceSpan, message: impl Into<String>) {
        self.records.push(Diagnostic {
            severity: Severity::Error,
            span,
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, span: SourceSpan, message: impl Into<String>) {
        self.records.push(Diagnostic {
            severity: Severity::Warning,
            span,
            message: message.into(),
        });
    }

    pub fn add_note(&mut self, span: SourceSpan, message: impl Into<String>) {
        self.records.push(Diagnostic {
            severity: Severity::Note,
            span,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticSink {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_starts_empty() {
        let sink = DiagnosticSink::new();
        assert!(sink.is_empty());
        assert_eq!(sink.len(), 0);
    }

    #[test]
    fn sink_preserves_insertion_order() {
        let mut sink = DiagnosticSink::new();
        sink.add_error(SourceSpan::new(0, 1), "first");
        sink.add_warning(SourceSpan::new(2, 3), "second");
        sink.add_note(SourceSpan::new(4, 5), "third");

        let messages: Vec<&str> = sink.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[test]
    fn sink_no_deduplication() {
        let mut sink = DiagnosticSink::new();
        sink.add_error(SourceSpan::new(0, 1), "dup");
        sink.add_error(SourceSpan::new(0, 1), "dup");
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn diagnostic_display() {
        let diag = Diagnostic {
            severity: Severity::Error,
            span: SourceSpan::new(0, 1),
            message: "expected ';'".to_string(),
        };
        assert_eq!(diag.to_string(), "error: expected ';'");
    }
}
