//! Declaration grammar: attributes/modifier lists, then dispatch over the
//! twelve declaration-starting keywords.

use weave_common::syntax_kind::SyntaxKind;

use super::{LoopProgressGuard, Parser};
use crate::tree::{Element, NodeId};

impl<'t, 's> Parser<'t, 's> {
    pub(super) fn parse_declaration(&mut self) -> Option<NodeId> {
        match self.current_kind() {
            SyntaxKind::UsingKeyword => Some(self.parse_using_declaration()),
            SyntaxKind::FunctionKeyword => Some(self.parse_function_declaration()),
            SyntaxKind::DelegateKeyword => Some(self.parse_delegate_declaration()),
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword => Some(self.parse_variable_declaration()),
            SyntaxKind::ConstKeyword => Some(self.parse_constant_declaration()),
            SyntaxKind::StructKeyword => Some(self.parse_struct_declaration()),
            SyntaxKind::ConceptKeyword => Some(self.parse_concept_declaration()),
            SyntaxKind::ExtendKeyword => Some(self.parse_extend_declaration()),
            SyntaxKind::NamespaceKeyword => Some(self.parse_namespace_declaration()),
            SyntaxKind::TypeKeyword => Some(self.parse_type_alias_declaration()),
            SyntaxKind::EnumKeyword => Some(self.parse_enum_declaration()),
            _ => None,
        }
    }

    /// `#[` Attribute (`,` Attribute)* `]` repeated; each use appends one
    /// `Attribute` node (Name plus an optional parenthesized argument list,
    /// recovered balanced if malformed) to the enclosing `AttributeList`.
    pub(super) fn parse_attributes_list(&mut self) -> Option<NodeId> {
        if self.current_kind() != SyntaxKind::HashOpenBracketToken {
            return None;
        }
        let start_pos = self.current_span().start;
        let mut children = Vec::new();
        while self.current_kind() == SyntaxKind::HashOpenBracketToken {
            let attr_start = self.current_span().start;
            let opener = self.bump();
            let name = self.parse_qualified_name();
            let args = if self.current_kind() == SyntaxKind::OpenParenToken {
                Some(self.parse_argument_list())
            } else {
                None
            };
            let close = self.match_kind(SyntaxKind::CloseBracketToken);
            let mut attr_children = vec![Element::Token(opener), Element::Node(name)];
            if let Some(args) = args {
                attr_children.push(Element::Node(args));
            }
            attr_children.push(Element::Token(close));
            children.push(Element::Node(self.factory.create_node(SyntaxKind::Attribute, attr_children, attr_start)));
        }
        Some(self.factory.create_node(SyntaxKind::AttributeList, children, start_pos))
    }

    /// Consumes a run of member-modifier keywords, returned as raw tokens —
    /// there is no dedicated modifier-list node kind; modifiers sit directly
    /// among the owning declaration's children.
    pub(super) fn parse_member_modifiers_list(&mut self) -> Vec<Element> {
        self.consume_keyword_run(SyntaxKind::is_member_modifier)
    }

    pub(super) fn parse_function_parameter_modifiers_list(&mut self) -> Vec<Element> {
        self.consume_keyword_run(SyntaxKind::is_function_parameter_modifier)
    }

    pub(super) fn parse_function_argument_modifier_list(&mut self) -> Vec<Element> {
        self.consume_keyword_run(SyntaxKind::is_function_parameter_modifier)
    }

    pub(super) fn parse_type_qualifiers(&mut self) -> Vec<Element> {
        self.consume_keyword_run(SyntaxKind::is_type_qualifier)
    }

    pub(super) fn parse_type_specifier_list(&mut self) -> Vec<Element> {
        self.consume_keyword_run(SyntaxKind::is_type_specifier)
    }

    fn consume_keyword_run(&mut self, predicate: fn(SyntaxKind) -> bool) -> Vec<Element> {
        let mut tokens = Vec::new();
        let mut guard = LoopProgressGuard::new();
        while predicate(self.current_kind()) {
            if !guard.tick(self.pos) {
                break;
            }
            tokens.push(Element::Token(self.bump()));
        }
        tokens
    }

    fn parse_using_declaration(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let mut children = vec![Element::Token(self.bump())];
        children.push(Element::Node(self.parse_qualified_name()));
        children.push(Element::Token(self.match_kind(SyntaxKind::SemicolonToken)));
        self.factory.create_node(SyntaxKind::UsingDeclaration, children, start_pos)
    }

    fn parse_function_declaration(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let attrs = self.parse_attributes_list();
        let mut children = Vec::new();
        if let Some(attrs) = attrs {
            children.push(Element::Node(attrs));
        }
        children.extend(self.parse_member_modifiers_list());
        children.push(Element::Token(self.bump())); // `function`
        children.push(Element::Token(self.match_kind(SyntaxKind::IdentifierToken)));
        if self.current_kind() == SyntaxKind::ExclamationOpenBracketToken {
            children.push(Element::Node(self.parse_generic_parameter_list()));
        }
        children.push(Element::Node(self.parse_parameter_list()));
        if let Some(arrow) = self.try_match(SyntaxKind::ArrowToken) {
            children.push(Element::Token(arrow));
            children.push(Element::Node(self.parse_type()));
        }
        match self.current_kind() {
            SyntaxKind::OpenBraceToken => children.push(Element::Node(self.parse_code_block())),
            SyntaxKind::FatArrowToken => children.push(Element::Node(self.parse_arrow_expression_clause())),
            SyntaxKind::SemicolonToken => {}
            _ => {
                if let Some(unexpected) = self.consume_unexpected(|k| {
                    matches!(k, SyntaxKind::OpenBraceToken | SyntaxKind::FatArrowToken | SyntaxKind::SemicolonToken)
                        || k == SyntaxKind::EndOfFileToken
                }) {
                    children.push(Element::Node(unexpected));
                }
            }
        }
        if let Some(semi) = self.try_match(SyntaxKind::SemicolonToken) {
            children.push(Element::Token(semi));
        }
        self.factory.create_node(SyntaxKind::FunctionDeclaration, children, start_pos)
    }

    fn parse_delegate_declaration(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let mut children = vec![Element::Token(self.bump())]; // `delegate`
        children.push(Element::Token(self.match_kind(SyntaxKind::IdentifierToken)));
        if self.current_kind() == SyntaxKind::ExclamationOpenBracketToken {
            children.push(Element::Node(self.parse_generic_parameter_list()));
        }
        children.push(Element::Node(self.parse_parameter_list()));
        if let Some(arrow) = self.try_match(SyntaxKind::ArrowToken) {
            children.push(Element::Token(arrow));
            children.push(Element::Node(self.parse_type()));
        }
        children.push(Element::Token(self.match_kind(SyntaxKind::SemicolonToken)));
        self.factory.create_node(SyntaxKind::DelegateDeclaration, children, start_pos)
    }

    /// `var`/`let` Name (`:` Type)? (`=` Init)? `;`
    fn parse_variable_declaration(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let mut children = vec![Element::Token(self.bump())];
        children.push(Element::Token(self.match_kind(SyntaxKind::IdentifierToken)));
        if let Some(colon) = self.try_match(SyntaxKind::ColonToken) {
            let ty_pos = self.factory.tree().token(colon).span.start;
            let ty = self.parse_type();
            children.push(self.wrap_type_clause(colon, ty, ty_pos));
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
        children.push(Element::Token(self.match_kind(SyntaxKind::SemicolonToken)));
        self.factory.create_node(SyntaxKind::VariableDeclaration, children, start_pos)
    }

    fn parse_constant_declaration(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let mut children = vec![Element::Token(self.bump())]; // `const`
        children.push(Element::Token(self.match_kind(SyntaxKind::IdentifierToken)));
        if let Some(colon) = self.try_match(SyntaxKind::ColonToken) {
            let ty_pos = self.factory.tree().token(colon).span.start;
            let ty = self.parse_type();
            children.push(self.wrap_type_clause(colon, ty, ty_pos));
        }
        let eq = self.match_kind(SyntaxKind::EqualsToken);
        let init_pos = self.factory.tree().token(eq).span.start;
        let expr = self.parse_expression();
        children.push(Element::Node(self.factory.create_node(
            SyntaxKind::InitializerClause,
            vec![Element::Token(eq), Element::Node(expr)],
            init_pos,
        )));
        children.push(Element::Token(self.match_kind(SyntaxKind::SemicolonToken)));
        self.factory.create_node(SyntaxKind::ConstantDeclaration, children, start_pos)
    }

    fn wrap_type_clause(&mut self, colon: crate::tree::TokenId, ty: NodeId, pos: u32) -> Element {
        Element::Node(self.factory.create_node(SyntaxKind::TypeClause, vec![Element::Token(colon), Element::Node(ty)], pos))
    }

    fn parse_struct_declaration(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let mut children = vec![Element::Token(self.bump())]; // `struct`
        children.push(Element::Token(self.match_kind(SyntaxKind::IdentifierToken)));
        if self.current_kind() == SyntaxKind::ExclamationOpenBracketToken {
            children.push(Element::Node(self.parse_generic_parameter_list()));
        }
        children.extend(self.parse_constraint_clauses());
        children.push(Element::Node(self.parse_code_block()));
        self.factory.create_node(SyntaxKind::StructDeclaration, children, start_pos)
    }

    fn parse_concept_declaration(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let mut children = vec![Element::Token(self.bump())]; // `concept`
        children.push(Element::Token(self.match_kind(SyntaxKind::IdentifierToken)));
        if self.current_kind() == SyntaxKind::ExclamationOpenBracketToken {
            children.push(Element::Node(self.parse_generic_parameter_list()));
        }
        children.push(Element::Node(self.parse_code_block()));
        self.factory.create_node(SyntaxKind::ConceptDeclaration, children, start_pos)
    }

    /// `extend` Type (`as` ConceptType)? CodeBlock
    fn parse_extend_declaration(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let mut children = vec![Element::Token(self.bump())]; // `extend`
        children.push(Element::Node(self.parse_type()));
        if let Some(as_kw) = self.try_match(SyntaxKind::AsKeyword) {
            children.push(Element::Token(as_kw));
            children.push(Element::Node(self.parse_type()));
        }
        children.push(Element::Node(self.parse_code_block()));
        self.factory.create_node(SyntaxKind::ExtendDeclaration, children, start_pos)
    }

    fn parse_namespace_declaration(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let mut children = vec![Element::Token(self.bump())]; // `namespace`
        children.push(Element::Node(self.parse_qualified_name()));
        children.push(Element::Node(self.parse_code_block()));
        self.factory.create_node(SyntaxKind::NamespaceDeclaration, children, start_pos)
    }

    fn parse_type_alias_declaration(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let mut children = vec![Element::Token(self.bump())]; // `type`
        children.push(Element::Token(self.match_kind(SyntaxKind::IdentifierToken)));
        children.push(Element::Token(self.match_kind(SyntaxKind::EqualsToken)));
        children.push(Element::Node(self.parse_type()));
        children.push(Element::Token(self.match_kind(SyntaxKind::SemicolonToken)));
        self.factory.create_node(SyntaxKind::TypeAliasDeclaration, children, start_pos)
    }

    /// `enum` Name `{` (Item (`,` Item)* `,`?)? `}`
    fn parse_enum_declaration(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let mut children = vec![Element::Token(self.bump())]; // `enum`
        children.push(Element::Token(self.match_kind(SyntaxKind::IdentifierToken)));
        children.push(Element::Token(self.match_kind(SyntaxKind::OpenBraceToken)));
        let mut guard = LoopProgressGuard::new();
        while self.current_kind() != SyntaxKind::CloseBraceToken && !self.at_end() {
            if !guard.tick(self.pos) {
                break;
            }
            let item_start = self.current_span().start;
            let name = self.match_kind(SyntaxKind::IdentifierToken);
            let mut item_children = vec![Element::Token(name)];
            if let Some(eq) = self.try_match(SyntaxKind::EqualsToken) {
                item_children.push(Element::Token(eq));
                item_children.push(Element::Node(self.parse_expression()));
            }
            children.push(Element::Node(self.factory.create_node(SyntaxKind::EnumItem, item_children, item_start)));
            match self.try_match(SyntaxKind::CommaToken) {
                Some(comma) => children.push(Element::Token(comma)),
                None => break,
            }
        }
        children.push(Element::Token(self.match_kind(SyntaxKind::CloseBraceToken)));
        self.factory.create_node(SyntaxKind::EnumDeclaration, children, start_pos)
    }

    /// `requires`/`ensures`/`invariant` clauses, zero or more, each wrapped
    /// in a `ConstraintClause` node.
    pub(super) fn parse_constraint_clauses(&mut self) -> Vec<Element> {
        let mut out = Vec::new();
        let mut guard = LoopProgressGuard::new();
        loop {
            if !guard.tick(self.pos) {
                break;
            }
            let kind = match self.current_contextual_keyword() {
                Some(k @ (SyntaxKind::RequiresContextualKeyword | SyntaxKind::EnsuresContextualKeyword | SyntaxKind::InvariantContextualKeyword)) => k,
                _ => break,
            };
            let start_pos = self.current_span().start;
            let keyword = self.match_contextual_keyword(kind);
            let expr = self.parse_expression();
            out.push(Element::Node(self.factory.create_node(
                SyntaxKind::ConstraintClause,
                vec![Element::Token(keyword), Element::Node(expr)],
                start_pos,
            )));
        }
        out
    }

    fn parse_arrow_expression_clause(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let arrow = self.match_kind(SyntaxKind::FatArrowToken);
        let expr = self.parse_expression();
        self.factory.create_node(SyntaxKind::ArrowExpressionClause, vec![Element::Token(arrow), Element::Node(expr)], start_pos)
    }
}
