//! Recursive-descent parser core: token lookahead, the four recovery
//! primitives (`match`, `try_match`/`try_match_any`, `match_until`,
//! `consume_unexpected`), balanced-token recovery, the loop-progress guard,
//! and the depth limit. Grammar productions live in the sibling
//! `declarations`/`statements`/`expressions`/`types`/`names` modules; this
//! module only hosts the machinery every production shares.

mod declarations;
mod expressions;
mod names;
mod patterns;
mod statements;
mod types;

use weave_common::syntax_kind::SyntaxKind;
use weave_common::{DiagnosticSink, SourceSpan};
use weave_lexer::{Lexer, TriviaMode};

use crate::factory::SyntaxFactory;
use crate::tree::{Element, NodeId, Tree};

/// Recursion ceiling for nested expressions/statements. Hitting it aborts
/// the current production into `UnexpectedNodes` rather than overflowing
/// the host stack — see `Parser::depth_guard`.
const MAX_DEPTH: u32 = 256;

/// Tracks whether a parsing loop is still making progress, so that a
/// production which can legally consume zero tokens (most recovery-aware
/// list parsers) still terminates. Call `tick` once per iteration; when it
/// returns `false`, break immediately.
pub(crate) struct LoopProgressGuard {
    last_pos: Option<usize>,
}

impl LoopProgressGuard {
    pub fn new() -> Self {
        Self { last_pos: None }
    }

    /// Returns `false` if `pos` has not advanced since the previous call,
    /// meaning the loop body consumed nothing and must stop.
    pub fn tick(&mut self, pos: usize) -> bool {
        let progressed = self.last_pos != Some(pos);
        self.last_pos = Some(pos);
        progressed
    }
}

pub struct Parser<'t, 's> {
    tokens: Vec<weave_common::token::LexedToken>,
    pos: usize,
    factory: SyntaxFactory<'t>,
    sink: &'s mut DiagnosticSink,
    depth: u32,
}

/// Parse a complete source buffer into a tree rooted at `SourceFile`,
/// collecting diagnostics along the way. The parser never fails: malformed
/// input still produces a full tree, with the damage recorded as
/// `UnexpectedNodes` clusters and missing tokens.
///
/// Lexes with `TriviaMode::All`; callers that need to drop or filter trivia
/// (e.g. a driver honoring a `--trivia` option) should use
/// [`parse_with_trivia`] instead.
pub fn parse(source: &str, sink: &mut DiagnosticSink) -> Tree {
    parse_with_trivia(source, sink, TriviaMode::All)
}

/// Same as [`parse`], lexing with the given [`TriviaMode`] instead of always
/// attaching every trivia kind.
pub fn parse_with_trivia(source: &str, sink: &mut DiagnosticSink, trivia_mode: TriviaMode) -> Tree {
    let mut tree = Tree::new();
    let tokens = Lexer::tokenize(source, sink, trivia_mode);
    {
        let factory = SyntaxFactory::new(&mut tree);
        let mut parser = Parser {
            tokens,
            pos: 0,
            factory,
            sink,
            depth: 0,
        };
        let root = parser.parse_source_file();
        parser.factory.tree_mut().root = Some(root);
    }
    tree
}

impl<'t, 's> Parser<'t, 's> {
    // --- lookahead -----------------------------------------------------

    fn nth(&self, offset: usize) -> &weave_common::token::LexedToken {
        let index = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    fn current_kind(&self) -> SyntaxKind {
        self.nth(0).kind
    }

    fn current_span(&self) -> SourceSpan {
        self.nth(0).span
    }

    fn at_end(&self) -> bool {
        self.current_kind() == SyntaxKind::EndOfFileToken
    }

    // --- recovery primitives --------------------------------------------

    /// Unconditionally consumes the current token, advancing the cursor.
    /// Never called at end of file beyond the final `EndOfFileToken` (the
    /// token stream always has one as its last element, and `at_end` guards
    /// every loop that could otherwise run past it).
    fn bump(&mut self) -> crate::tree::TokenId {
        let token = self.tokens[self.pos].clone();
        if !self.at_end() {
            self.pos += 1;
        }
        self.factory.token_from_lexed(&token)
    }

    /// `match(kind)`: consume the current token if it is `kind`; otherwise
    /// report the mismatch and synthesize a missing token at the current
    /// position, without consuming anything.
    fn match_kind(&mut self, kind: SyntaxKind) -> crate::tree::TokenId {
        if self.current_kind() == kind {
            return self.bump();
        }
        self.sink.add_error(
            self.current_span(),
            format!("expected {kind:?}, found {:?}", self.current_kind()),
        );
        self.factory.missing_token(kind, self.current_span())
    }

    fn match_contextual_keyword(&mut self, kind: SyntaxKind) -> crate::tree::TokenId {
        if self.current_kind() == SyntaxKind::IdentifierToken && self.current_contextual_keyword() == Some(kind) {
            return self.bump();
        }
        self.sink.add_error(
            self.current_span(),
            format!("expected contextual keyword {kind:?}, found {:?}", self.current_kind()),
        );
        self.factory.missing_contextual_keyword(kind, self.current_span())
    }

    fn current_contextual_keyword(&self) -> Option<SyntaxKind> {
        match &self.nth(0).payload {
            weave_common::token::TokenPayload::Identifier { contextual_keyword, .. } => *contextual_keyword,
            _ => None,
        }
    }

    /// `try_match(kind)`: consume and return the token only if it matches;
    /// otherwise leave the cursor untouched and report nothing.
    fn try_match(&mut self, kind: SyntaxKind) -> Option<crate::tree::TokenId> {
        (self.current_kind() == kind).then(|| self.bump())
    }

    /// Two-kind overload of `try_match`, returning which kind matched.
    fn try_match_any(&mut self, a: SyntaxKind, b: SyntaxKind) -> Option<(SyntaxKind, crate::tree::TokenId)> {
        let kind = self.current_kind();
        if kind == a || kind == b {
            Some((kind, self.bump()))
        } else {
            None
        }
    }

    /// Consumes tokens (respecting balanced grouping) until `stop` holds of
    /// the current kind or end of file, wrapping whatever was consumed in an
    /// `UnexpectedNodes` node. Returns `None` if nothing was consumed.
    fn consume_unexpected(&mut self, stop: impl Fn(SyntaxKind) -> bool) -> Option<NodeId> {
        let mut children = Vec::new();
        let mut guard = LoopProgressGuard::new();
        while !self.at_end() && !stop(self.current_kind()) {
            if !guard.tick(self.pos) {
                break;
            }
            if self.current_kind().is_opening_group_symbol() {
                children.push(Element::Node(self.parse_balanced_token_sequence()));
            } else {
                children.push(Element::Token(self.bump()));
            }
        }
        if children.is_empty() {
            return None;
        }
        let pos = self.current_span().start;
        Some(self.factory.create_node(SyntaxKind::UnexpectedNodes, children, pos))
    }

    /// Consumes tokens until `kind` is seen (inclusive) or end of file is
    /// reached, for recovery points that know exactly which delimiter they
    /// are resynchronizing to.
    fn match_until(&mut self, kind: SyntaxKind) -> Option<NodeId> {
        self.consume_unexpected(|k| k == kind)
    }

    /// Parses one balanced `( ... )` / `[ ... ]` / `{ ... }` group as an
    /// opaque `BalancedTokenSequence`, including the delimiters, honoring
    /// nested groups of any kind. Used only during recovery: well-formed
    /// grammar constructs parse their bracketed contents structurally
    /// instead of falling back to this.
    fn parse_balanced_token_sequence(&mut self) -> NodeId {
        let open_kind = self.current_kind();
        let close_kind = open_kind.closing_group_symbol().expect("caller checked is_opening_group_symbol");
        let start_pos = self.current_span().start;
        let mut children = vec![Element::Token(self.bump())];
        let mut guard = LoopProgressGuard::new();
        while self.current_kind() != close_kind && !self.at_end() {
            if !guard.tick(self.pos) {
                break;
            }
            if self.current_kind().is_opening_group_symbol() {
                children.push(Element::Node(self.parse_balanced_token_sequence()));
            } else {
                children.push(Element::Token(self.bump()));
            }
        }
        // `match_kind` reports the mismatch and synthesizes a zero-length
        // missing token when the group never closes (end of file, or the
        // loop-progress guard gave up on a token neither closing nor
        // openable) instead of silently dropping the closer.
        children.push(Element::Token(self.match_kind(close_kind)));
        self.factory.create_node(SyntaxKind::BalancedTokenSequence, children, start_pos)
    }

    /// Guards a recursive production against unbounded nesting. Returns
    /// `None` (having reported a diagnostic and swallowed the remaining
    /// input into `UnexpectedNodes`) when the depth limit is hit; the caller
    /// should return that in place of its usual result.
    fn depth_guard<T>(&mut self, build: impl FnOnce(&mut Self) -> T) -> Result<T, NodeId> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            tracing::warn!(depth = self.depth, "parser depth limit hit, unwinding into UnexpectedNodes");
            self.sink.add_error(self.current_span(), "expression or statement nested too deeply");
            self.depth -= 1;
            let recovered = self.consume_unexpected(|_| false).unwrap_or_else(|| {
                let pos = self.current_span().start;
                self.factory.create_node(SyntaxKind::UnexpectedNodes, vec![], pos)
            });
            return Err(recovered);
        }
        let result = build(self);
        self.depth -= 1;
        Ok(result)
    }

    // --- entry point -----------------------------------------------------

    fn parse_source_file(&mut self) -> NodeId {
        let mut items = Vec::new();
        let mut guard = LoopProgressGuard::new();
        while !self.at_end() {
            if !guard.tick(self.pos) {
                // Nothing recognized and nothing consumed: force progress so
                // the outer loop cannot spin forever on unrecognized input.
                items.push(Element::Token(self.bump()));
                continue;
            }
            match self.parse_code_block_item() {
                Some(item) => items.push(Element::Node(item)),
                None => {
                    if let Some(unexpected) = self.consume_unexpected(|k| k.is_start_of_declaration() || k == SyntaxKind::EndOfFileToken) {
                        items.push(Element::Node(unexpected));
                    }
                }
            }
        }
        let eof = self.match_kind(SyntaxKind::EndOfFileToken);
        items.push(Element::Token(eof));
        self.factory.create_node(SyntaxKind::SourceFile, items, 0)
    }

    /// Tries declaration first; if that produced nothing usable, rewinds and
    /// tries statement. Mirrors the reset-point technique the grammar uses
    /// at every block-item boundary.
    fn parse_code_block_item(&mut self) -> Option<NodeId> {
        let checkpoint = self.pos;
        if self.current_kind().is_start_of_declaration() {
            if let Some(decl) = self.parse_declaration() {
                let pos = self.factory.tree().node(decl).span.start;
                return Some(self.factory.create_node(SyntaxKind::CodeBlockItem, vec![Element::Node(decl)], pos));
            }
            self.pos = checkpoint;
        }
        if let Some(stmt) = self.parse_statement() {
            let pos = self.factory.tree().node(stmt).span.start;
            return Some(self.factory.create_node(SyntaxKind::CodeBlockItem, vec![Element::Node(stmt)], pos));
        }
        self.pos = checkpoint;
        None
    }

    /// `{ item* }`, used by function/namespace/struct bodies.
    fn parse_code_block(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let open = self.match_kind(SyntaxKind::OpenBraceToken);
        let mut children = vec![Element::Token(open)];
        let mut guard = LoopProgressGuard::new();
        while self.current_kind() != SyntaxKind::CloseBraceToken && !self.at_end() {
            if !guard.tick(self.pos) {
                break;
            }
            match self.parse_code_block_item() {
                Some(item) => children.push(Element::Node(item)),
                None => {
                    if let Some(unexpected) = self.consume_unexpected(|k| {
                        k.is_start_of_declaration() || k == SyntaxKind::CloseBraceToken || k == SyntaxKind::EndOfFileToken
                    }) {
                        children.push(Element::Node(unexpected));
                    } else {
                        break;
                    }
                }
            }
        }
        let close = self.match_kind(SyntaxKind::CloseBraceToken);
        children.push(Element::Token(close));
        self.factory.create_node(SyntaxKind::CodeBlock, children, start_pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_token_sequence_reports_missing_close_at_eof() {
        let mut tree = Tree::new();
        let mut sink = DiagnosticSink::new();
        let tokens = Lexer::tokenize("((())", &mut sink, TriviaMode::None);
        let factory = SyntaxFactory::new(&mut tree);
        let mut parser = Parser { tokens, pos: 0, factory, sink: &mut sink, depth: 0 };
        let node = parser.parse_balanced_token_sequence();
        drop(parser);
        assert_eq!(tree.node(node).kind, SyntaxKind::BalancedTokenSequence);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn balanced_token_sequence_closes_cleanly_with_no_diagnostics() {
        let mut tree = Tree::new();
        let mut sink = DiagnosticSink::new();
        let tokens = Lexer::tokenize("()", &mut sink, TriviaMode::None);
        let factory = SyntaxFactory::new(&mut tree);
        let mut parser = Parser { tokens, pos: 0, factory, sink: &mut sink, depth: 0 };
        let node = parser.parse_balanced_token_sequence();
        drop(parser);
        assert_eq!(tree.node(node).kind, SyntaxKind::BalancedTokenSequence);
        assert!(sink.is_empty());
    }

    #[test]
    fn loop_progress_guard_stops_on_stalled_position() {
        let mut guard = LoopProgressGuard::new();
        assert!(guard.tick(0));
        assert!(!guard.tick(0));
        assert!(guard.tick(1));
    }

    #[test]
    fn match_kind_synthesizes_missing_token_without_consuming() {
        let mut tree = Tree::new();
        let mut sink = DiagnosticSink::new();
        let tokens = Lexer::tokenize("true", &mut sink, TriviaMode::None);
        let factory = SyntaxFactory::new(&mut tree);
        let mut parser = Parser { tokens, pos: 0, factory, sink: &mut sink, depth: 0 };
        let missing = parser.match_kind(SyntaxKind::SemicolonToken);
        drop(parser);
        assert_eq!(tree.token(missing).kind, SyntaxKind::SemicolonToken);
        assert_eq!(tree.token(missing).span.start, tree.token(missing).span.end);
        assert_eq!(sink.len(), 1);
    }
}
