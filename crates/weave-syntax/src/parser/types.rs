//! Type grammar: qualifiers, named/tuple/array/slice/pointer/reference
//! types.

use weave_common::syntax_kind::SyntaxKind;

use super::{LoopProgressGuard, Parser};
use crate::tree::Element;
use crate::tree::NodeId;

impl<'t, 's> Parser<'t, 's> {
    /// `qualifier* primary-type`. Leading qualifiers (`const`, `mutable`,
    /// `restrict`, `atomic`) are prepended as token children of whichever
    /// node kind the primary type resolves to — there is no separate
    /// qualified-type wrapper kind.
    pub(super) fn parse_type(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let mut children = self.parse_type_qualifiers();

        match self.current_kind() {
            SyntaxKind::StarToken => {
                children.push(Element::Token(self.bump()));
                children.push(Element::Node(self.parse_type()));
                self.factory.create_node(SyntaxKind::PointerType, children, start_pos)
            }
            SyntaxKind::AmpersandToken => {
                children.push(Element::Token(self.bump()));
                children.push(Element::Node(self.parse_type()));
                self.factory.create_node(SyntaxKind::ReferenceType, children, start_pos)
            }
            SyntaxKind::OpenBracketToken => {
                children.push(Element::Token(self.bump()));
                children.push(Element::Node(self.parse_type()));
                if let Some(semi) = self.try_match(SyntaxKind::SemicolonToken) {
                    children.push(Element::Token(semi));
                    children.push(Element::Node(self.parse_expression()));
                    children.push(Element::Token(self.match_kind(SyntaxKind::CloseBracketToken)));
                    self.factory.create_node(SyntaxKind::ArrayType, children, start_pos)
                } else {
                    children.push(Element::Token(self.match_kind(SyntaxKind::CloseBracketToken)));
                    self.factory.create_node(SyntaxKind::SliceType, children, start_pos)
                }
            }
            SyntaxKind::OpenParenToken => {
                children.push(Element::Token(self.bump()));
                let mut guard = LoopProgressGuard::new();
                while self.current_kind() != SyntaxKind::CloseParenToken && !self.at_end() {
                    if !guard.tick(self.pos) {
                        break;
                    }
                    children.push(Element::Node(self.parse_type()));
                    match self.try_match(SyntaxKind::CommaToken) {
                        Some(comma) => children.push(Element::Token(comma)),
                        None => break,
                    }
                }
                children.push(Element::Token(self.match_kind(SyntaxKind::CloseParenToken)));
                self.factory.create_node(SyntaxKind::TupleType, children, start_pos)
            }
            _ => {
                children.push(Element::Node(self.parse_qualified_name()));
                self.factory.create_node(SyntaxKind::NamedType, children, start_pos)
            }
        }
    }
}
