//! Pattern grammar: wildcard, slice, tuple, struct, identifier (with an
//! optional nested tuple/struct pattern), and literal patterns, plus the
//! `PatternBinding` clause (pattern + optional type + optional initializer)
//! used by `foreach` and by `let`/`match`-style bindings.

use weave_common::syntax_kind::SyntaxKind;
use weave_common::token::TokenPayload;

use super::{LoopProgressGuard, Parser};
use crate::tree::{Element, NodeId};

impl<'t, 's> Parser<'t, 's> {
    /// The catalog has no dedicated `UnderscoreToken`; a wildcard pattern is
    /// an `IdentifierToken` whose spelling is exactly `_`.
    fn current_is_wildcard(&self) -> bool {
        matches!(&self.nth(0).payload, TokenPayload::Identifier { spelling, .. } if spelling == "_")
    }

    pub(super) fn parse_pattern(&mut self) -> NodeId {
        match self.current_kind() {
            SyntaxKind::OpenBracketToken => self.parse_slice_pattern(),
            SyntaxKind::OpenParenToken => self.parse_tuple_pattern(),
            SyntaxKind::IntegerLiteralToken
            | SyntaxKind::CharacterLiteralToken
            | SyntaxKind::FloatLiteralToken
            | SyntaxKind::StringLiteralToken
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => self.parse_literal_pattern(),
            SyntaxKind::IdentifierToken if self.current_is_wildcard() => self.parse_wildcard_pattern(),
            _ => self.parse_identifier_pattern(),
        }
    }

    fn parse_wildcard_pattern(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let token = self.bump();
        self.factory.create_node(SyntaxKind::WildcardPattern, vec![Element::Token(token)], start_pos)
    }

    fn parse_literal_pattern(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let token = self.bump();
        self.factory.create_node(SyntaxKind::LiteralPattern, vec![Element::Token(token)], start_pos)
    }

    /// A qualified name, optionally followed by a nested tuple or struct
    /// pattern — e.g. `Point(x, y)` or `Point { x, y }`.
    fn parse_identifier_pattern(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let name = self.parse_qualified_name();
        let mut children = vec![Element::Node(name)];
        match self.current_kind() {
            SyntaxKind::OpenParenToken => children.push(Element::Node(self.parse_tuple_pattern())),
            SyntaxKind::OpenBraceToken => children.push(Element::Node(self.parse_struct_pattern())),
            _ => {}
        }
        self.factory.create_node(SyntaxKind::IdentifierPattern, children, start_pos)
    }

    /// `[` Pattern (`,` Pattern)* `,`? `]`
    fn parse_slice_pattern(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let open = self.match_kind(SyntaxKind::OpenBracketToken);
        let mut children = vec![Element::Token(open)];
        let mut guard = LoopProgressGuard::new();
        while self.current_kind() != SyntaxKind::CloseBracketToken && !self.at_end() {
            if !guard.tick(self.pos) {
                break;
            }
            children.push(Element::Node(self.parse_pattern()));
            match self.try_match(SyntaxKind::CommaToken) {
                Some(comma) => children.push(Element::Token(comma)),
                None => break,
            }
        }
        children.push(Element::Token(self.match_kind(SyntaxKind::CloseBracketToken)));
        self.factory.create_node(SyntaxKind::SlicePattern, children, start_pos)
    }

    /// `(` (NameColon? Pattern) (`,` (NameColon? Pattern))* `,`? `)`
    fn parse_tuple_pattern(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let open = self.match_kind(SyntaxKind::OpenParenToken);
        let mut children = vec![Element::Token(open)];
        let mut guard = LoopProgressGuard::new();
        while self.current_kind() != SyntaxKind::CloseParenToken && !self.at_end() {
            if !guard.tick(self.pos) {
                break;
            }
            if self.peek_is_name_colon_here() {
                let name_pos = self.current_span().start;
                let name = self.bump();
                let colon = self.bump();
                children.push(Element::Node(self.factory.create_node(
                    SyntaxKind::NameColon,
                    vec![Element::Token(name), Element::Token(colon)],
                    name_pos,
                )));
            }
            children.push(Element::Node(self.parse_pattern()));
            match self.try_match(SyntaxKind::CommaToken) {
                Some(comma) => children.push(Element::Token(comma)),
                None => break,
            }
        }
        children.push(Element::Token(self.match_kind(SyntaxKind::CloseParenToken)));
        self.factory.create_node(SyntaxKind::TuplePattern, children, start_pos)
    }

    /// `{` (Identifier (`:` Pattern)?) (`,` ...)* `,`? `}`
    fn parse_struct_pattern(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let open = self.match_kind(SyntaxKind::OpenBraceToken);
        let mut children = vec![Element::Token(open)];
        let mut guard = LoopProgressGuard::new();
        while self.current_kind() != SyntaxKind::CloseBraceToken && !self.at_end() {
            if !guard.tick(self.pos) {
                break;
            }
            children.push(Element::Node(self.parse_struct_pattern_field()));
            match self.try_match(SyntaxKind::CommaToken) {
                Some(comma) => children.push(Element::Token(comma)),
                None => break,
            }
        }
        children.push(Element::Token(self.match_kind(SyntaxKind::CloseBraceToken)));
        self.factory.create_node(SyntaxKind::StructPattern, children, start_pos)
    }

    fn parse_struct_pattern_field(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let name = self.match_kind(SyntaxKind::IdentifierToken);
        let mut children = vec![Element::Token(name)];
        if let Some(colon) = self.try_match(SyntaxKind::ColonToken) {
            children.push(Element::Token(colon));
            children.push(Element::Node(self.parse_pattern()));
        }
        self.factory.create_node(SyntaxKind::StructPatternField, children, start_pos)
    }

    fn peek_is_name_colon_here(&self) -> bool {
        self.current_kind() == SyntaxKind::IdentifierToken && self.nth(1).kind == SyntaxKind::ColonToken
    }

    /// Pattern, optional `: Type` clause, optional `= expr` initializer.
    /// Returns `None` only when nothing at all could be parsed, mirroring
    /// the optional-binding shape used by `foreach`/`let`-style contexts.
    pub(super) fn parse_pattern_binding(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let pattern = self.parse_pattern();
        let mut children = vec![Element::Node(pattern)];
        if let Some(colon) = self.try_match(SyntaxKind::ColonToken) {
            let ty_pos = self.factory.tree().token(colon).span.start;
            let ty = self.parse_type();
            children.push(Element::Node(self.factory.create_node(
                SyntaxKind::TypeClause,
                vec![Element::Token(colon), Element::Node(ty)],
                ty_pos,
            )));
        }
        if let Some(eq) = self.try_match(SyntaxKind::EqualsToken) {
            let init_pos = self.factory.tree().token(eq).span.start;
            let expr = self.parse_expression();
            children.push(Element::Node(self.factory.create_node(
                SyntaxKind::InitializerClause,
                vec![Element::Token(eq), Element::Node(expr)],
                init_pos,
            )));
        }
        self.factory.create_node(SyntaxKind::PatternBinding, children, start_pos)
    }
}
