//! Segments UTF-8 source into a finite token stream, each token carrying a
//! source span and leading/trailing trivia per the splitting rule: a
//! newline ends the trailing trivia of the preceding token, and everything
//! after (up to the next non-trivia code unit) is leading trivia of the
//! next token. The lexer is not streaming: it is handed a complete
//! in-memory buffer and runs to completion in one pass.

mod cursor;

use cursor::Cursor;

use weave_common::syntax_kind::SyntaxKind;
use weave_common::token::{
    CharacterPrefixKind, FloatLiteralSuffixKind, IntegerLiteralSuffixKind, LexedToken,
    NumberLiteralPrefixKind, StringPrefixKind, TokenPayload, TriviaPiece, TOKEN_FLAGS_NONE,
};
use weave_common::{DiagnosticSink, SourceSpan};

/// Which trivia kinds the lexer attaches to tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaMode {
    None,
    DocumentationOnly,
    All,
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Segments a complete source buffer into a token stream. Construct with
/// [`Lexer::new`] and either iterate directly or call [`Lexer::tokenize`].
pub struct Lexer<'src, 'sink> {
    cursor: Cursor<'src>,
    source: &'src str,
    sink: &'sink mut DiagnosticSink,
    trivia_mode: TriviaMode,
    emitted_eof: bool,
}

impl<'src, 'sink> Lexer<'src, 'sink> {
    pub fn new(source: &'src str, sink: &'sink mut DiagnosticSink, trivia_mode: TriviaMode) -> Self {
        Self {
            cursor: Cursor::new(source),
            source,
            sink,
            trivia_mode,
            emitted_eof: false,
        }
    }

    /// Lex a complete source buffer into its token stream, ending in an
    /// `EndOfFile` token.
    pub fn tokenize(source: &str, sink: &mut DiagnosticSink, trivia_mode: TriviaMode) -> Vec<LexedToken> {
        Lexer::new(source, sink, trivia_mode).collect()
    }

    fn wants_trivia(&self, kind: SyntaxKind) -> bool {
        match self.trivia_mode {
            TriviaMode::None => false,
            TriviaMode::DocumentationOnly => kind.is_documentation_trivia(),
            TriviaMode::All => true,
        }
    }

    // --- trivia -----------------------------------------------------------

    /// Recognize and consume exactly one trivia piece at the cursor, or
    /// return `None` if the current position does not start one.
    fn scan_trivia_piece(&mut self) -> Option<TriviaPiece> {
        let start = self.cursor.pos();
        match self.cursor.peek()? {
            ' ' | '\t' => {
                self.cursor
                    .eat_while(|c| c == ' ' || c == '\t');
                Some(self.make_trivia(SyntaxKind::WhitespaceTrivia, start))
            }
            '\n' => {
                self.cursor.advance();
                Some(self.make_trivia(SyntaxKind::EndOfLineTrivia, start))
            }
            '\r' if self.cursor.peek_next() == Some('\n') => {
                self.cursor.advance();
                self.cursor.advance();
                Some(self.make_trivia(SyntaxKind::EndOfLineTrivia, start))
            }
            '#' if self.cursor.peek_next() != Some('[') => self.scan_comment(start),
            _ => None,
        }
    }

    fn make_trivia(&self, kind: SyntaxKind, start: u32) -> TriviaPiece {
        TriviaPiece::new(kind, SourceSpan::new(start, self.cursor.pos()))
    }

    fn scan_comment(&mut self, start: u32) -> Option<TriviaPiece> {
        // Single '#' already confirmed present.
        self.cursor.advance();
        match self.cursor.peek() {
            Some('=') => {
                self.cursor.advance();
                let doc = self.cursor.peek() == Some('=');
                if doc {
                    self.cursor.advance();
                }
                self.scan_nested_block_comment(start);
                let kind = if doc {
                    SyntaxKind::MultiLineDocumentationTrivia
                } else {
                    SyntaxKind::BlockCommentTrivia
                };
                Some(self.make_trivia(kind, start))
            }
            Some('#') => {
                self.cursor.advance();
                self.cursor.eat_while(|c| c != '\n' && c != '\r');
                Some(self.make_trivia(SyntaxKind::SingleLineDocumentationTrivia, start))
            }
            _ => {
                self.cursor.eat_while(|c| c != '\n' && c != '\r');
                Some(self.make_trivia(SyntaxKind::SingleLineCommentTrivia, start))
            }
        }
    }

    /// Consume a `#=` ... `=#` block comment, honoring nested `#=`/`=#` pairs.
    fn scan_nested_block_comment(&mut self, start: u32) {
        let mut depth = 1u32;
        while depth > 0 {
            match self.cursor.peek() {
                None => {
                    self.sink.add_error(
                        SourceSpan::new(start, self.cursor.pos()),
                        "unterminated block comment",
                    );
                    return;
                }
                Some('#') if self.cursor.peek_next() == Some('=') => {
                    self.cursor.advance();
                    self.cursor.advance();
                    depth += 1;
                }
                Some('=') if self.cursor.peek_next() == Some('#') => {
                    self.cursor.advance();
                    self.cursor.advance();
                    depth -= 1;
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    fn collect_leading_trivia(&mut self) -> Vec<TriviaPiece> {
        let mut out = Vec::new();
        loop {
            let checkpoint = self.cursor.pos();
            match self.scan_trivia_piece() {
                Some(piece) => {
                    if self.wants_trivia(piece.kind) {
                        out.push(piece);
                    }
                    debug_assert!(self.cursor.pos() > checkpoint, "trivia scan made no progress");
                }
                None => break,
            }
        }
        out
    }

    /// Trailing trivia ends at (and includes) the first newline. If no
    /// newline is hit before a non-trivia code unit or EOF, it ends there
    /// instead.
    fn collect_trailing_trivia(&mut self) -> Vec<TriviaPiece> {
        let mut out = Vec::new();
        loop {
            let checkpoint = self.cursor.pos();
            match self.scan_trivia_piece() {
                Some(piece) => {
                    let is_newline = piece.kind == SyntaxKind::EndOfLineTrivia;
                    if self.wants_trivia(piece.kind) {
                        out.push(piece);
                    }
                    debug_assert!(self.cursor.pos() > checkpoint, "trivia scan made no progress");
                    if is_newline {
                        break;
                    }
                }
                None => break,
            }
        }
        out
    }

    // --- significant token classification ----------------------------------

    fn scan_significant(&mut self) -> (SyntaxKind, SourceSpan, TokenPayload) {
        let start = self.cursor.pos();
        let Some(c) = self.cursor.peek() else {
            return (SyntaxKind::EndOfFileToken, SourceSpan::new(start, start), TokenPayload::None);
        };

        if is_ident_start(c) {
            return self.scan_identifier(start);
        }
        if c.is_ascii_digit() {
            return self.scan_number(start);
        }
        if c == '"' {
            return self.scan_string(start, StringPrefixKind::Default);
        }
        if c == '\'' {
            return self.scan_character(start, CharacterPrefixKind::Default);
        }
        if (c == 'u' || c == 'U') && self.peek_string_or_char_prefix() {
            return self.scan_prefixed_literal(start, c);
        }
        if let Some((kind, len)) = self.match_punctuation() {
            for _ in 0..len {
                self.cursor.advance();
            }
            return (kind, SourceSpan::new(start, self.cursor.pos()), TokenPayload::None);
        }

        self.cursor.advance();
        let span = SourceSpan::new(start, self.cursor.pos());
        self.sink.add_error(span, format!("unexpected character '{c}'"));
        (SyntaxKind::ErrorToken, span, TokenPayload::None)
    }

    fn peek_string_or_char_prefix(&self) -> bool {
        let rest = self.remaining_from_cursor();
        let after_u8 = rest.strip_prefix("u8");
        let after_single = rest.strip_prefix('u').or_else(|| rest.strip_prefix('U'));
        after_u8
            .or(after_single)
            .is_some_and(|tail| tail.starts_with('"') || tail.starts_with('\''))
    }

    fn remaining_from_cursor(&self) -> &'src str {
        &self.source[self.cursor.pos() as usize..]
    }

    fn scan_prefixed_literal(&mut self, start: u32, first: char) -> (SyntaxKind, SourceSpan, TokenPayload) {
        self.cursor.advance(); // consume 'u'/'U'
        let prefix_str_kind;
        let prefix_char_kind;
        if first == 'U' {
            prefix_str_kind = StringPrefixKind::Utf32;
            prefix_char_kind = CharacterPrefixKind::Utf32;
        } else if self.cursor.peek() == Some('8') {
            self.cursor.advance();
            prefix_str_kind = StringPrefixKind::Utf8;
            prefix_char_kind = CharacterPrefixKind::Utf8;
        } else {
            prefix_str_kind = StringPrefixKind::Utf16;
            prefix_char_kind = CharacterPrefixKind::Utf16;
        }

        match self.cursor.peek() {
            Some('"') => self.scan_string(start, prefix_str_kind),
            Some('\'') => self.scan_character(start, prefix_char_kind),
            _ => {
                let span = SourceSpan::new(start, self.cursor.pos());
                self.sink.add_error(span, "expected string or character literal after prefix");
                (SyntaxKind::ErrorToken, span, TokenPayload::None)
            }
        }
    }

    fn scan_identifier(&mut self, start: u32) -> (SyntaxKind, SourceSpan, TokenPayload) {
        self.cursor.advance();
        self.cursor.eat_while(is_ident_continue);
        let span = SourceSpan::new(start, self.cursor.pos());
        let text = self.cursor.slice(start, self.cursor.pos());

        if let Some(keyword) = weave_common::keywords::try_map_identifier_to_keyword(text) {
            return (keyword, span, TokenPayload::None);
        }

        let contextual = weave_common::keywords::try_map_identifier_to_contextual_keyword(text);
        (
            SyntaxKind::IdentifierToken,
            span,
            TokenPayload::Identifier {
                spelling: text.to_string(),
                contextual_keyword: contextual,
            },
        )
    }

    fn scan_number(&mut self, start: u32) -> (SyntaxKind, SourceSpan, TokenPayload) {
        let mut prefix = NumberLiteralPrefixKind::Default;

        if self.cursor.peek() == Some('0') {
            match self.cursor.peek_next() {
                Some('b') | Some('B') => {
                    self.cursor.advance();
                    self.cursor.advance();
                    prefix = NumberLiteralPrefixKind::Binary;
                }
                Some('o') | Some('O') => {
                    self.cursor.advance();
                    self.cursor.advance();
                    prefix = NumberLiteralPrefixKind::Octal;
                }
                Some('x') | Some('X') => {
                    self.cursor.advance();
                    self.cursor.advance();
                    prefix = NumberLiteralPrefixKind::Hexadecimal;
                }
                _ => {}
            }
        }

        let digits_start = self.cursor.pos();
        self.eat_digit_run(prefix);
        let mut is_float = false;

        if matches!(prefix, NumberLiteralPrefixKind::Default)
            && self.cursor.peek() == Some('.')
            && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            is_float = true;
            self.cursor.advance();
            self.eat_digit_run(NumberLiteralPrefixKind::Default);
        }

        if matches!(prefix, NumberLiteralPrefixKind::Default)
            && matches!(self.cursor.peek(), Some('e') | Some('E'))
        {
            let mut lookahead = self.remaining_from_cursor().chars();
            lookahead.next();
            let signed_digit = match lookahead.next() {
                Some('+') | Some('-') => lookahead.next().is_some_and(|c| c.is_ascii_digit()),
                Some(c) => c.is_ascii_digit(),
                None => false,
            };
            if signed_digit {
                is_float = true;
                self.cursor.advance();
                if matches!(self.cursor.peek(), Some('+') | Some('-')) {
                    self.cursor.advance();
                }
                self.eat_digit_run(NumberLiteralPrefixKind::Default);
            }
        }

        let digits_end = self.cursor.pos();
        let digits = self.cursor.slice(digits_start, digits_end).to_string();

        if digits.starts_with('_') || digits.ends_with('_') || digits.is_empty() {
            self.sink.add_error(
                SourceSpan::new(start, digits_end),
                "malformed number literal",
            );
        }

        let suffix_start = self.cursor.pos();
        self.cursor.eat_while(is_ident_continue);
        let suffix_text = self.cursor.slice(suffix_start, self.cursor.pos());

        let span = SourceSpan::new(start, self.cursor.pos());
        if is_float {
            let suffix = float_suffix_from_str(suffix_text);
            (
                SyntaxKind::FloatLiteralToken,
                span,
                TokenPayload::Float { prefix, suffix, text: digits },
            )
        } else {
            let suffix = integer_suffix_from_str(suffix_text);
            (
                SyntaxKind::IntegerLiteralToken,
                span,
                TokenPayload::Integer { prefix, suffix, digits },
            )
        }
    }

    fn eat_digit_run(&mut self, prefix: NumberLiteralPrefixKind) {
        self.cursor.eat_while(|c| match prefix {
            NumberLiteralPrefixKind::Binary => c == '0' || c == '1' || c == '_',
            NumberLiteralPrefixKind::Octal => ('0'..='7').contains(&c) || c == '_',
            NumberLiteralPrefixKind::Hexadecimal => c.is_ascii_hexdigit() || c == '_',
            NumberLiteralPrefixKind::Default | NumberLiteralPrefixKind::Decimal => {
                c.is_ascii_digit() || c == '_'
            }
        });
    }

    fn scan_string(&mut self, start: u32, prefix: StringPrefixKind) -> (SyntaxKind, SourceSpan, TokenPayload) {
        self.cursor.advance(); // opening quote
        let mut value = String::new();
        loop {
            match self.cursor.peek() {
                None | Some('\n') => {
                    let span = SourceSpan::new(start, self.cursor.pos());
                    self.sink.add_error(span, "unterminated string literal");
                    return (
                        SyntaxKind::StringLiteralToken,
                        span,
                        TokenPayload::Str { prefix, value },
                    );
                }
                Some('"') => {
                    self.cursor.advance();
                    break;
                }
                Some('\\') => {
                    self.cursor.advance();
                    if let Some(decoded) = self.scan_escape() {
                        value.push(decoded);
                    }
                }
                Some(c) => {
                    self.cursor.advance();
                    value.push(c);
                }
            }
        }
        let span = SourceSpan::new(start, self.cursor.pos());
        (SyntaxKind::StringLiteralToken, span, TokenPayload::Str { prefix, value })
    }

    fn scan_character(&mut self, start: u32, prefix: CharacterPrefixKind) -> (SyntaxKind, SourceSpan, TokenPayload) {
        self.cursor.advance(); // opening quote
        let mut value = '\0';
        let mut scalars = 0u32;
        loop {
            match self.cursor.peek() {
                None | Some('\n') => {
                    let span = SourceSpan::new(start, self.cursor.pos());
                    self.sink.add_error(span, "unterminated character literal");
                    return (
                        SyntaxKind::CharacterLiteralToken,
                        span,
                        TokenPayload::Char { prefix, value },
                    );
                }
                Some('\'') => {
                    self.cursor.advance();
                    break;
                }
                Some('\\') => {
                    self.cursor.advance();
                    if let Some(decoded) = self.scan_escape() {
                        value = decoded;
                        scalars += 1;
                    }
                }
                Some(c) => {
                    self.cursor.advance();
                    value = c;
                    scalars += 1;
                }
            }
        }
        let span = SourceSpan::new(start, self.cursor.pos());
        if scalars == 0 {
            self.sink.add_error(span, "empty character literal");
        } else if scalars > 1 {
            self.sink.add_error(span, "character literal must contain exactly one scalar value");
        }
        (SyntaxKind::CharacterLiteralToken, span, TokenPayload::Char { prefix, value })
    }

    /// Consumes one escape sequence body (after the backslash) and decodes
    /// it to a scalar value, or reports an error and returns `None`.
    fn scan_escape(&mut self) -> Option<char> {
        let escape_start = self.cursor.pos();
        match self.cursor.peek() {
            Some('\\') => {
                self.cursor.advance();
                Some('\\')
            }
            Some('"') => {
                self.cursor.advance();
                Some('"')
            }
            Some('\'') => {
                self.cursor.advance();
                Some('\'')
            }
            Some('n') => {
                self.cursor.advance();
                Some('\n')
            }
            Some('r') => {
                self.cursor.advance();
                Some('\r')
            }
            Some('t') => {
                self.cursor.advance();
                Some('\t')
            }
            Some('0') => {
                self.cursor.advance();
                Some('\0')
            }
            Some('x') => {
                self.cursor.advance();
                let digits_start = self.cursor.pos();
                self.cursor.eat_while(|c| c.is_ascii_hexdigit());
                let digits = self.cursor.slice(digits_start, self.cursor.pos());
                u32::from_str_radix(digits, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .or_else(|| {
                        self.sink.add_error(
                            SourceSpan::new(escape_start, self.cursor.pos()),
                            "malformed \\x escape",
                        );
                        None
                    })
            }
            Some('u') => {
                self.cursor.advance();
                if self.cursor.peek() != Some('{') {
                    self.sink.add_error(
                        SourceSpan::new(escape_start, self.cursor.pos()),
                        "malformed \\u escape: expected '{'",
                    );
                    return None;
                }
                self.cursor.advance();
                let digits_start = self.cursor.pos();
                self.cursor.eat_while(|c| c.is_ascii_hexdigit());
                let digits = self.cursor.slice(digits_start, self.cursor.pos());
                let value = u32::from_str_radix(digits, 16).ok().and_then(char::from_u32);
                if self.cursor.peek() == Some('}') {
                    self.cursor.advance();
                }
                value.or_else(|| {
                    self.sink.add_error(
                        SourceSpan::new(escape_start, self.cursor.pos()),
                        "malformed \\u{...} escape",
                    );
                    None
                })
            }
            Some(c) => {
                self.cursor.advance();
                self.sink.add_error(
                    SourceSpan::new(escape_start, self.cursor.pos()),
                    format!("invalid escape sequence '\\{c}'"),
                );
                None
            }
            None => {
                self.sink
                    .add_error(SourceSpan::new(escape_start, escape_start), "expected escape sequence");
                None
            }
        }
    }

    /// Longest-match punctuation lookup. Returns the kind and its length in
    /// chars (all punctuation tokens are ASCII, so chars == bytes here).
    fn match_punctuation(&self) -> Option<(SyntaxKind, usize)> {
        let rest = self.remaining_from_cursor();
        let mut chars = rest.chars();
        let c0 = chars.next()?;
        let c1 = chars.next();
        let c2 = chars.next();

        use SyntaxKind::*;
        // Three-char operators first.
        match (c0, c1, c2) {
            ('<', '<', '=') => return Some((LessLessEqualsToken, 3)),
            ('>', '>', '=') => return Some((GreaterGreaterEqualsToken, 3)),
            ('.', '.', '=') => return Some((DotDotEqualsToken, 3)),
            ('?', '?', '=') => return Some((QuestionQuestionEqualsToken, 3)),
            _ => {}
        }
        match (c0, c1) {
            ('!', '[') => return Some((ExclamationOpenBracketToken, 2)),
            ('#', '[') => return Some((HashOpenBracketToken, 2)),
            ('=', '=') => return Some((EqualsEqualsToken, 2)),
            ('!', '=') => return Some((BangEqualsToken, 2)),
            ('<', '=') => return Some((LessEqualsToken, 2)),
            ('>', '=') => return Some((GreaterEqualsToken, 2)),
            ('&', '&') => return Some((AmpersandAmpersandToken, 2)),
            ('|', '|') => return Some((PipePipeToken, 2)),
            ('<', '<') => return Some((LessLessToken, 2)),
            ('>', '>') => return Some((GreaterGreaterToken, 2)),
            ('+', '+') => return Some((PlusPlusToken, 2)),
            ('-', '-') => return Some((MinusMinusToken, 2)),
            ('-', '>') => return Some((ArrowToken, 2)),
            ('=', '>') => return Some((FatArrowToken, 2)),
            (':', ':') => return Some((ColonColonToken, 2)),
            ('.', '.') => return Some((DotDotToken, 2)),
            ('?', '?') => return Some((QuestionQuestionToken, 2)),
            ('+', '=') => return Some((PlusEqualsToken, 2)),
            ('-', '=') => return Some((MinusEqualsToken, 2)),
            ('*', '=') => return Some((StarEqualsToken, 2)),
            ('/', '=') => return Some((SlashEqualsToken, 2)),
            ('%', '=') => return Some((PercentEqualsToken, 2)),
            ('&', '=') => return Some((AmpersandEqualsToken, 2)),
            ('|', '=') => return Some((PipeEqualsToken, 2)),
            ('^', '=') => return Some((CaretEqualsToken, 2)),
            _ => {}
        }
        let single = match c0 {
            '(' => OpenParenToken,
            ')' => CloseParenToken,
            '[' => OpenBracketToken,
            ']' => CloseBracketToken,
            '{' => OpenBraceToken,
            '}' => CloseBraceToken,
            ',' => CommaToken,
            ';' => SemicolonToken,
            ':' => ColonToken,
            '.' => DotToken,
            '+' => PlusToken,
            '-' => MinusToken,
            '*' => StarToken,
            '/' => SlashToken,
            '%' => PercentToken,
            '&' => AmpersandToken,
            '|' => PipeToken,
            '^' => CaretToken,
            '~' => TildeToken,
            '=' => EqualsToken,
            '!' => BangToken,
            '<' => LessToken,
            '>' => GreaterToken,
            '?' => QuestionToken,
            '@' => AtToken,
            _ => return None,
        };
        Some((single, 1))
    }
}

fn integer_suffix_from_str(s: &str) -> IntegerLiteralSuffixKind {
    use IntegerLiteralSuffixKind::*;
    match s {
        "i8" => Int8,
        "i16" => Int16,
        "i32" => Int32,
        "i64" => Int64,
        "i128" => Int128,
        "u8" => UInt8,
        "u16" => UInt16,
        "u32" => UInt32,
        "u64" => UInt64,
        "u128" => UInt128,
        "isize" => ISize,
        "usize" => USize,
        "iptr" => IntPtr,
        "uptr" => UIntPtr,
        _ => Default,
    }
}

fn float_suffix_from_str(s: &str) -> FloatLiteralSuffixKind {
    use FloatLiteralSuffixKind::*;
    match s {
        "f16" => Float16,
        "f32" => Float32,
        "f64" => Float64,
        "f128" => Float128,
        "d128" => Decimal128,
        _ => Default,
    }
}

impl<'src, 'sink> Iterator for Lexer<'src, 'sink> {
    type Item = LexedToken;

    fn next(&mut self) -> Option<LexedToken> {
        if self.emitted_eof {
            return None;
        }

        let leading = self.collect_leading_trivia();
        let (kind, span, payload) = self.scan_significant();
        let trailing = self.collect_trailing_trivia();

        if kind == SyntaxKind::EndOfFileToken {
            self.emitted_eof = true;
        }

        Some(LexedToken {
            kind,
            span,
            leading_trivia: leading,
            trailing_trivia: trailing,
            payload,
            flags: TOKEN_FLAGS_NONE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> (Vec<LexedToken>, DiagnosticSink) {
        let mut sink = DiagnosticSink::new();
        let tokens = Lexer::tokenize(source, &mut sink, TriviaMode::All);
        (tokens, sink)
    }

    #[test]
    fn lex_simple_expression() {
        let (tokens, sink) = lex("a + b");
        assert!(sink.is_empty());
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::IdentifierToken,
                SyntaxKind::PlusToken,
                SyntaxKind::IdentifierToken,
                SyntaxKind::EndOfFileToken,
            ]
        );
    }

    #[test]
    fn lex_keyword_is_reclassified() {
        let (tokens, _) = lex("return");
        assert_eq!(tokens[0].kind, SyntaxKind::ReturnKeyword);
    }

    #[test]
    fn lex_contextual_keyword_stays_identifier_but_is_tagged() {
        let (tokens, _) = lex("where");
        assert_eq!(tokens[0].kind, SyntaxKind::IdentifierToken);
        match &tokens[0].payload {
            TokenPayload::Identifier { contextual_keyword, .. } => {
                assert_eq!(*contextual_keyword, Some(SyntaxKind::WhereContextualKeyword));
            }
            _ => panic!("expected identifier payload"),
        }
    }

    #[test]
    fn lex_integer_with_prefix_and_suffix() {
        let (tokens, sink) = lex("0x1F_u8");
        assert!(sink.is_empty());
        match &tokens[0].payload {
            TokenPayload::Integer { prefix, suffix, digits } => {
                assert_eq!(*prefix, NumberLiteralPrefixKind::Hexadecimal);
                assert_eq!(*suffix, IntegerLiteralSuffixKind::UInt8);
                assert_eq!(digits, "1F");
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn lex_float_literal_with_exponent() {
        let (tokens, sink) = lex("1.5e-3");
        assert!(sink.is_empty());
        assert_eq!(tokens[0].kind, SyntaxKind::FloatLiteralToken);
    }

    #[test]
    fn lex_dot_dot_is_not_a_float() {
        let (tokens, _) = lex("1..2");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::IntegerLiteralToken,
                SyntaxKind::DotDotToken,
                SyntaxKind::IntegerLiteralToken,
                SyntaxKind::EndOfFileToken,
            ]
        );
    }

    #[test]
    fn lex_simple_string() {
        let (tokens, sink) = lex(r#""hello""#);
        assert!(sink.is_empty());
        match &tokens[0].payload {
            TokenPayload::Str { value, .. } => assert_eq!(value, "hello"),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn lex_string_with_escapes() {
        let (tokens, sink) = lex(r#""a\nb\"c""#);
        assert!(sink.is_empty());
        match &tokens[0].payload {
            TokenPayload::Str { value, .. } => assert_eq!(value, "a\nb\"c"),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn lex_unterminated_string_reports_one_error() {
        let (tokens, sink) = lex("\"abc");
        assert_eq!(sink.len(), 1);
        assert_eq!(tokens[0].kind, SyntaxKind::StringLiteralToken);
    }

    #[test]
    fn lex_character_literal() {
        let (tokens, sink) = lex("'x'");
        assert!(sink.is_empty());
        match &tokens[0].payload {
            TokenPayload::Char { value, .. } => assert_eq!(*value, 'x'),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn lex_empty_character_literal_reports_error() {
        let (_, sink) = lex("''");
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn lex_nested_block_comment() {
        let (tokens, sink) = lex("#= outer #= inner =# still outer =# x");
        assert!(sink.is_empty());
        // first token after the comment is the identifier `x`
        assert_eq!(tokens[0].kind, SyntaxKind::IdentifierToken);
        assert_eq!(tokens[0].leading_trivia[0].kind, SyntaxKind::BlockCommentTrivia);
    }

    #[test]
    fn lex_unterminated_block_comment_reports_error() {
        let (_, sink) = lex("#= never closes");
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn lex_doc_comment_attaches_as_leading_trivia_of_next_token() {
        let (tokens, _) = lex("## docs\nfn_name");
        assert_eq!(tokens[0].kind, SyntaxKind::IdentifierToken);
        assert!(tokens[0]
            .leading_trivia
            .iter()
            .any(|t| t.kind == SyntaxKind::SingleLineDocumentationTrivia));
    }

    #[test]
    fn lex_newline_ends_trailing_trivia() {
        let (tokens, _) = lex("a\nb");
        assert_eq!(tokens[0].kind, SyntaxKind::IdentifierToken);
        assert_eq!(tokens[0].trailing_trivia.len(), 1);
        assert_eq!(tokens[0].trailing_trivia[0].kind, SyntaxKind::EndOfLineTrivia);
        assert!(tokens[1].leading_trivia.is_empty());
    }

    #[test]
    fn lex_generic_and_attribute_openers() {
        let (tokens, _) = lex("![ #[");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::ExclamationOpenBracketToken,
                SyntaxKind::HashOpenBracketToken,
                SyntaxKind::EndOfFileToken,
            ]
        );
    }

    #[test]
    fn lex_empty_source_yields_only_eof() {
        let (tokens, sink) = lex("");
        assert!(sink.is_empty());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, SyntaxKind::EndOfFileToken);
        assert!(tokens[0].span.is_empty());
    }

    #[test]
    fn lex_stray_character_emits_error_token() {
        let (tokens, sink) = lex("`");
        assert_eq!(sink.len(), 1);
        assert_eq!(tokens[0].kind, SyntaxKind::ErrorToken);
    }

    #[test]
    fn lex_trivia_mode_none_attaches_nothing() {
        let mut sink = DiagnosticSink::new();
        let tokens = Lexer::tokenize("a ## doc\n b", &mut sink, TriviaMode::None);
        assert!(tokens.iter().all(|t| t.leading_trivia.is_empty() && t.trailing_trivia.is_empty()));
    }

    #[test]
    fn lex_trivia_mode_doc_only_keeps_doc_comments() {
        let mut sink = DiagnosticSink::new();
        let tokens = Lexer::tokenize("a ## doc\nb", &mut sink, TriviaMode::DocumentationOnly);
        assert!(tokens[1]
            .leading_trivia
            .iter()
            .any(|t| t.kind == SyntaxKind::SingleLineDocumentationTrivia));
        assert!(tokens[0].trailing_trivia.is_empty() || tokens[0]
            .trailing_trivia
            .iter()
            .all(|t| t.kind.is_documentation_trivia()));
    }
}
