use weave_common::diagnostics::DiagnosticSink;
use weave_common::syntax_kind::SyntaxKind;
use weave_lexer::{Lexer, TriviaMode};

fn kinds(source: &str) -> Vec<SyntaxKind> {
    let mut sink = DiagnosticSink::new();
    Lexer::tokenize(source, &mut sink, TriviaMode::None)
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn function_declaration_skeleton() {
    use SyntaxKind::*;
    let source = "function add(a: i32, b: i32) -> i32 { return a + b; }";
    let found = kinds(source);
    assert_eq!(
        found,
        vec![
            FunctionKeyword,
            IdentifierToken,
            OpenParenToken,
            IdentifierToken,
            ColonToken,
            IdentifierToken,
            CommaToken,
            IdentifierToken,
            ColonToken,
            IdentifierToken,
            CloseParenToken,
            ArrowToken,
            IdentifierToken,
            OpenBraceToken,
            ReturnKeyword,
            IdentifierToken,
            PlusToken,
            IdentifierToken,
            SemicolonToken,
            CloseBraceToken,
            EndOfFileToken,
        ]
    );
}

#[test]
fn generic_and_attribute_openers_are_single_tokens() {
    use SyntaxKind::*;
    assert_eq!(
        kinds("List![i32]"),
        vec![
            IdentifierToken,
            ExclamationOpenBracketToken,
            IdentifierToken,
            CloseBracketToken,
            EndOfFileToken,
        ]
    );
    assert_eq!(
        kinds("#[inline]"),
        vec![HashOpenBracketToken, InlineKeyword, CloseBracketToken, EndOfFileToken],
    );
}

#[test]
fn no_diagnostics_for_well_formed_source() {
    let mut sink = DiagnosticSink::new();
    Lexer::tokenize("let x: i32 = 1 + 2 * 3;", &mut sink, TriviaMode::None);
    assert!(sink.is_empty());
}

#[test]
fn every_source_lexes_to_a_terminating_eof_without_panicking() {
    let samples = [
        "",
        "   \t\n",
        "## dangling doc comment with no following token\n",
        "\"unterminated",
        "#= unterminated block comment",
        "'",
        "0x",
        "@@@@",
    ];
    for sample in samples {
        let mut sink = DiagnosticSink::new();
        let tokens = Lexer::tokenize(sample, &mut sink, TriviaMode::All);
        assert_eq!(tokens.last().unwrap().kind, SyntaxKind::EndOfFileToken);
    }
}

#[test]
fn struct_expression_and_member_access_round_trip_spans() {
    let source = "point.x";
    let mut sink = DiagnosticSink::new();
    let tokens = Lexer::tokenize(source, &mut sink, TriviaMode::None);
    let texts: Vec<&str> = tokens
        .iter()
        .map(|t| &source[t.span.start as usize..t.span.end as usize])
        .collect();
    assert_eq!(texts, vec!["point", ".", "x", ""]);
}
