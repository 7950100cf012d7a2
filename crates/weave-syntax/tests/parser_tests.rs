//! Parser integration tests using insta snapshots.
//!
//! Each test parses a complete source buffer, builds the CST, and snapshots
//! the debug tree output (plus any diagnostics) to verify tree shape,
//! precedence/associativity, and recovery behavior.

use insta::assert_snapshot;

use weave_common::diagnostics::DiagnosticSink;
use weave_syntax::tree::{Element, NodeId, Tree};

fn parse_and_debug(source: &str) -> String {
    let mut sink = DiagnosticSink::new();
    let tree = weave_syntax::parse(source, &mut sink);
    let mut out = String::new();
    format_node(&tree, tree.root.expect("parse always produces a root"), 0, &mut out);
    if !sink.is_empty() {
        out.push_str("\ndiagnostics:\n");
        for diagnostic in &sink {
            out.push_str(&format!("  - {} @{}..{}\n", diagnostic.message, diagnostic.span.start, diagnostic.span.end));
        }
    }
    out
}

fn format_node(tree: &Tree, node: NodeId, depth: usize, out: &mut String) {
    let data = tree.node(node);
    out.push_str(&format!("{}{:?}@{}..{}\n", "  ".repeat(depth), data.kind, data.span.start, data.span.end));
    for child in &data.children {
        match *child {
            Element::Token(token) => {
                let token_data = tree.token(token);
                out.push_str(&format!("{}{:?}@{}..{}\n", "  ".repeat(depth + 1), token_data.kind, token_data.span.start, token_data.span.end));
            }
            Element::Node(child_node) => format_node(tree, child_node, depth + 1, out),
        }
    }
}

// ── Literals and simple expressions ────────────────────────────────────

#[test]
fn literal_int() {
    assert_snapshot!(parse_and_debug("42;"));
}

#[test]
fn binary_add() {
    assert_snapshot!(parse_and_debug("a + b;"));
}

#[test]
fn precedence_mul_binds_tighter_than_add() {
    assert_snapshot!(parse_and_debug("a + b * c;"));
}

#[test]
fn assignment_is_right_associative() {
    assert_snapshot!(parse_and_debug("a = b = c;"));
}

#[test]
fn cast_binds_between_unary_and_multiplicative() {
    assert_snapshot!(parse_and_debug("a as i32 * b;"));
}

#[test]
fn conditional_expression_is_right_associative() {
    assert_snapshot!(parse_and_debug("a ? b : c ? d : e;"));
}

// ── Postfix chains ────────────────────────────────────────────────────

#[test]
fn call_member_and_index_chain() {
    assert_snapshot!(parse_and_debug("foo.bar(1, 2)[0];"));
}

#[test]
fn struct_literal_disambiguation() {
    assert_snapshot!(parse_and_debug("let p = Point { x: 1, y: 2 };"));
}

// ── Declarations ──────────────────────────────────────────────────────

#[test]
fn function_declaration_with_body() {
    assert_snapshot!(parse_and_debug("function add(a: i32, b: i32) -> i32 { return a + b; }"));
}

#[test]
fn variable_declaration_with_type_and_initializer() {
    assert_snapshot!(parse_and_debug("let x: i32 = 0;"));
}

#[test]
fn struct_declaration_skeleton() {
    assert_snapshot!(parse_and_debug("struct Point { var x: i32; var y: i32; }"));
}

#[test]
fn enum_declaration_skeleton() {
    assert_snapshot!(parse_and_debug("enum Color { Red, Green, Blue, }"));
}

// ── Statements ────────────────────────────────────────────────────────

#[test]
fn if_statement_has_no_parenthesized_condition() {
    assert_snapshot!(parse_and_debug("function f() { if a { return a; } }"));
}

#[test]
fn if_else_if_chain() {
    assert_snapshot!(parse_and_debug("function f() { if a { return 1; } else if b { return 2; } else { return 3; } }"));
}

#[test]
fn while_statement_has_parenthesized_condition() {
    assert_snapshot!(parse_and_debug("function f() { while (a) { b(); } }"));
}

#[test]
fn for_statement_skeleton() {
    assert_snapshot!(parse_and_debug("function f() { for (var i = 0; i < 10; i = i + 1) { } }"));
}

#[test]
fn foreach_statement_skeleton() {
    assert_snapshot!(parse_and_debug("function f() { foreach (var x in xs) { } }"));
}

// ── Error recovery ────────────────────────────────────────────────────

#[test]
fn return_followed_by_malformed_while_recovers() {
    assert_snapshot!(parse_and_debug("function f() { return while true; }"));
}

#[test]
fn unclosed_parenthesized_expression_reports_missing_close() {
    assert_snapshot!(parse_and_debug("function f() { return (a + b; }"));
}

#[test]
fn loop_progress_guard_recovers_from_stray_token() {
    assert_snapshot!(parse_and_debug("function f() { @ @ @ }"));
}
