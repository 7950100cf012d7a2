//! Names, generic parameter/argument lists, and parameter/argument lists —
//! shared by declarations, types, and expressions.

use weave_common::syntax_kind::SyntaxKind;

use super::{LoopProgressGuard, Parser};
use crate::tree::{Element, NodeId};

impl<'t, 's> Parser<'t, 's> {
    /// One identifier, optionally followed by a `![...]` generic argument
    /// list, producing `IdentifierName` or `GenericName`.
    pub(super) fn parse_name_segment(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let ident = self.match_kind(SyntaxKind::IdentifierToken);
        if self.current_kind() == SyntaxKind::ExclamationOpenBracketToken {
            let args = self.parse_generic_argument_list();
            return self.factory.create_node(SyntaxKind::GenericName, vec![Element::Token(ident), Element::Node(args)], start_pos);
        }
        self.factory.create_node(SyntaxKind::IdentifierName, vec![Element::Token(ident)], start_pos)
    }

    /// `Segment (:: Segment)*`, left-associative.
    pub(super) fn parse_qualified_name(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let mut left = self.parse_name_segment();
        let mut guard = LoopProgressGuard::new();
        while self.current_kind() == SyntaxKind::ColonColonToken {
            if !guard.tick(self.pos) {
                break;
            }
            let sep = self.bump();
            let right = self.parse_name_segment();
            left = self.factory.create_node(
                SyntaxKind::QualifiedName,
                vec![Element::Node(left), Element::Token(sep), Element::Node(right)],
                start_pos,
            );
        }
        left
    }

    /// `![` Type (`,` Type)* `]`
    pub(super) fn parse_generic_argument_list(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let open = self.match_kind(SyntaxKind::ExclamationOpenBracketToken);
        let mut children = vec![Element::Token(open)];
        let mut guard = LoopProgressGuard::new();
        while self.current_kind() != SyntaxKind::CloseBracketToken && !self.at_end() {
            if !guard.tick(self.pos) {
                break;
            }
            children.push(Element::Node(self.parse_type()));
            match self.try_match(SyntaxKind::CommaToken) {
                Some(comma) => children.push(Element::Token(comma)),
                None => break,
            }
        }
        children.push(Element::Token(self.match_kind(SyntaxKind::CloseBracketToken)));
        self.factory.create_node(SyntaxKind::GenericArgumentList, children, start_pos)
    }

    /// `![` GenericParameter (`,` GenericParameter)* `]`
    pub(super) fn parse_generic_parameter_list(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let open = self.match_kind(SyntaxKind::ExclamationOpenBracketToken);
        let mut children = vec![Element::Token(open)];
        let mut guard = LoopProgressGuard::new();
        while self.current_kind() != SyntaxKind::CloseBracketToken && !self.at_end() {
            if !guard.tick(self.pos) {
                break;
            }
            let param_start = self.current_span().start;
            let name = self.match_kind(SyntaxKind::IdentifierToken);
            let mut param_children = vec![Element::Token(name)];
            if let Some(colon) = self.try_match(SyntaxKind::ColonToken) {
                param_children.push(Element::Token(colon));
                param_children.push(Element::Node(self.parse_type()));
            }
            children.push(Element::Node(self.factory.create_node(SyntaxKind::GenericParameter, param_children, param_start)));
            match self.try_match(SyntaxKind::CommaToken) {
                Some(comma) => children.push(Element::Token(comma)),
                None => break,
            }
        }
        children.push(Element::Token(self.match_kind(SyntaxKind::CloseBracketToken)));
        self.factory.create_node(SyntaxKind::GenericParameterList, children, start_pos)
    }

    /// `(` Parameter (`,` Parameter)* `)`
    pub(super) fn parse_parameter_list(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let open = self.match_kind(SyntaxKind::OpenParenToken);
        let mut children = vec![Element::Token(open)];
        let mut guard = LoopProgressGuard::new();
        while self.current_kind() != SyntaxKind::CloseParenToken && !self.at_end() {
            if !guard.tick(self.pos) {
                break;
            }
            children.push(Element::Node(self.parse_parameter()));
            match self.try_match(SyntaxKind::CommaToken) {
                Some(comma) => children.push(Element::Token(comma)),
                None => break,
            }
        }
        children.push(Element::Token(self.match_kind(SyntaxKind::CloseParenToken)));
        self.factory.create_node(SyntaxKind::ParameterList, children, start_pos)
    }

    fn parse_parameter(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let mut children = self.parse_function_parameter_modifiers_list();
        children.push(Element::Token(self.match_kind(SyntaxKind::IdentifierToken)));
        let colon = self.match_kind(SyntaxKind::ColonToken);
        let ty = self.parse_type();
        let type_pos = self.factory.tree().token(colon).span.start;
        children.push(Element::Node(self.factory.create_node(
            SyntaxKind::TypeClause,
            vec![Element::Token(colon), Element::Node(ty)],
            type_pos,
        )));
        if let Some(eq) = self.try_match(SyntaxKind::EqualsToken) {
            let init_pos = self.factory.tree().token(eq).span.start;
            let default_expr = self.parse_expression();
            children.push(Element::Node(self.factory.create_node(
                SyntaxKind::InitializerClause,
                vec![Element::Token(eq), Element::Node(default_expr)],
                init_pos,
            )));
        }
        self.factory.create_node(SyntaxKind::Parameter, children, start_pos)
    }

    /// `(` Argument (`,` Argument)* `)`
    pub(super) fn parse_argument_list(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let open = self.match_kind(SyntaxKind::OpenParenToken);
        let mut children = vec![Element::Token(open)];
        let mut guard = LoopProgressGuard::new();
        while self.current_kind() != SyntaxKind::CloseParenToken && !self.at_end() {
            if !guard.tick(self.pos) {
                break;
            }
            children.push(Element::Node(self.parse_argument()));
            match self.try_match(SyntaxKind::CommaToken) {
                Some(comma) => children.push(Element::Token(comma)),
                None => break,
            }
        }
        children.push(Element::Token(self.match_kind(SyntaxKind::CloseParenToken)));
        self.factory.create_node(SyntaxKind::ArgumentList, children, start_pos)
    }

    fn parse_argument(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let mut children = Vec::new();
        if self.current_kind() == SyntaxKind::IdentifierToken && self.peek_is_name_colon() {
            let name_pos = self.current_span().start;
            let name = self.bump();
            let colon = self.bump();
            children.push(Element::Node(self.factory.create_node(
                SyntaxKind::NameColon,
                vec![Element::Token(name), Element::Token(colon)],
                name_pos,
            )));
        }
        children.extend(self.parse_function_argument_modifier_list());
        children.push(Element::Node(self.parse_expression()));
        self.factory.create_node(SyntaxKind::Argument, children, start_pos)
    }

    /// Lookahead for `identifier ':'` that is not a compound punctuation
    /// (`::`), used to recognize named arguments.
    fn peek_is_name_colon(&self) -> bool {
        self.nth(1).kind == SyntaxKind::ColonToken
    }
}
