//! Shared coordinate, token, and diagnostic types for the Weave compiler
//! front-end: spans and line indexing, the closed `SyntaxKind` catalog,
//! keyword lookup, the arena-free lexer token model, and diagnostics.

pub mod diagnostics;
pub mod keywords;
pub mod source_text;
pub mod span;
pub mod syntax_kind;
pub mod token;

pub use diagnostics::{Diagnostic, DiagnosticSink, Severity};
pub use source_text::{SourceText, SourceTextError};
pub use span::{LineIndex, LinePosition, LineSpan, SourcePosition, SourceSpan};
pub use syntax_kind::SyntaxKind;
pub use token::{
    CharacterPrefixKind, FloatLiteralSuffixKind, IntegerLiteralSuffixKind, LexedToken,
    NumberLiteralPrefixKind, StringPrefixKind, TokenPayload, TriviaPiece,
};
