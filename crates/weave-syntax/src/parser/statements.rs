//! Statement grammar: block/empty/if/while/break/continue/goto/yield/loop/
//! for/foreach/checked/unchecked/unsafe/lazy, with an expression-statement
//! fallback. Leaf statements (the ones that do not end in a `{ ... }` body)
//! consume their own trailing `;`; block-bodied statements do not.

use weave_common::syntax_kind::SyntaxKind;

use super::Parser;
use crate::tree::{Element, NodeId};

impl<'t, 's> Parser<'t, 's> {
    pub(super) fn parse_statement(&mut self) -> Option<NodeId> {
        match self.current_kind() {
            SyntaxKind::ReturnKeyword => Some(self.parse_return_statement()),
            SyntaxKind::OpenBraceToken => Some(self.parse_code_block()),
            SyntaxKind::SemicolonToken => Some(self.parse_empty_statement()),
            SyntaxKind::IfKeyword => Some(self.parse_if_statement()),
            SyntaxKind::WhileKeyword => Some(self.parse_while_statement()),
            SyntaxKind::BreakKeyword => Some(self.parse_break_statement()),
            SyntaxKind::ContinueKeyword => Some(self.parse_continue_statement()),
            SyntaxKind::GotoKeyword => Some(self.parse_goto_statement()),
            SyntaxKind::YieldKeyword => Some(self.parse_yield_statement()),
            SyntaxKind::LoopKeyword => Some(self.parse_loop_statement()),
            SyntaxKind::ForKeyword => Some(self.parse_for_statement()),
            SyntaxKind::ForeachKeyword => Some(self.parse_foreach_statement()),
            SyntaxKind::CheckedKeyword => Some(self.parse_checked_statement()),
            SyntaxKind::UncheckedKeyword => Some(self.parse_unchecked_statement()),
            SyntaxKind::UnsafeKeyword => Some(self.parse_unsafe_statement()),
            SyntaxKind::LazyKeyword => Some(self.parse_lazy_statement()),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_empty_statement(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let semicolon = self.bump();
        self.factory.create_node(SyntaxKind::EmptyStatement, vec![Element::Token(semicolon)], start_pos)
    }

    fn parse_return_statement(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let keyword = self.bump();
        let mut children = vec![Element::Token(keyword)];
        if self.current_kind() != SyntaxKind::SemicolonToken {
            children.push(Element::Node(self.parse_expression()));
        }
        children.push(Element::Token(self.match_kind(SyntaxKind::SemicolonToken)));
        self.factory.create_node(SyntaxKind::ReturnStatement, children, start_pos)
    }

    /// `if` Expression CodeBlock ElseClause? — no parenthesized condition.
    fn parse_if_statement(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let keyword = self.bump();
        let condition = self.parse_expression();
        let body = self.parse_code_block();
        let mut children = vec![Element::Token(keyword), Element::Node(condition), Element::Node(body)];
        if let Some(else_clause) = self.parse_optional_else_clause() {
            children.push(Element::Node(else_clause));
        }
        self.factory.create_node(SyntaxKind::IfStatement, children, start_pos)
    }

    /// `else` (IfStatement | CodeBlock)
    fn parse_optional_else_clause(&mut self) -> Option<NodeId> {
        let start_pos = self.current_span().start;
        let keyword = self.try_match(SyntaxKind::ElseKeyword)?;
        let continuation = if self.current_kind() == SyntaxKind::IfKeyword {
            self.parse_if_statement()
        } else {
            self.parse_code_block()
        };
        Some(self.factory.create_node(SyntaxKind::ElseClause, vec![Element::Token(keyword), Element::Node(continuation)], start_pos))
    }

    /// `while (` Expression `)` CodeBlock — parenthesized, unlike `if`.
    fn parse_while_statement(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let keyword = self.bump();
        let open = self.match_kind(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression();
        let close = self.match_kind(SyntaxKind::CloseParenToken);
        let body = self.parse_code_block();
        self.factory.create_node(
            SyntaxKind::WhileStatement,
            vec![
                Element::Token(keyword),
                Element::Token(open),
                Element::Node(condition),
                Element::Token(close),
                Element::Node(body),
            ],
            start_pos,
        )
    }

    fn parse_break_statement(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let keyword = self.bump();
        let mut children = vec![Element::Token(keyword)];
        if let Some(label) = self.try_match(SyntaxKind::IdentifierToken) {
            children.push(Element::Token(label));
        }
        children.push(Element::Token(self.match_kind(SyntaxKind::SemicolonToken)));
        self.factory.create_node(SyntaxKind::BreakStatement, children, start_pos)
    }

    fn parse_continue_statement(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let keyword = self.bump();
        let semicolon = self.match_kind(SyntaxKind::SemicolonToken);
        self.factory.create_node(SyntaxKind::ContinueStatement, vec![Element::Token(keyword), Element::Token(semicolon)], start_pos)
    }

    fn parse_goto_statement(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let keyword = self.bump();
        let label = self.match_kind(SyntaxKind::IdentifierToken);
        let semicolon = self.match_kind(SyntaxKind::SemicolonToken);
        self.factory.create_node(
            SyntaxKind::GotoStatement,
            vec![Element::Token(keyword), Element::Token(label), Element::Token(semicolon)],
            start_pos,
        )
    }

    /// `yield break;` or `yield` `return`? Expression `;`
    fn parse_yield_statement(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let keyword = self.bump();
        let mut children = vec![Element::Token(keyword)];
        if self.current_kind() == SyntaxKind::BreakKeyword {
            children.push(Element::Token(self.bump()));
        } else {
            if self.current_kind() == SyntaxKind::ReturnKeyword {
                children.push(Element::Token(self.bump()));
            }
            children.push(Element::Node(self.parse_expression()));
        }
        children.push(Element::Token(self.match_kind(SyntaxKind::SemicolonToken)));
        self.factory.create_node(SyntaxKind::YieldStatement, children, start_pos)
    }

    fn parse_loop_statement(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let keyword = self.bump();
        let body = self.parse_code_block();
        self.factory.create_node(SyntaxKind::LoopStatement, vec![Element::Token(keyword), Element::Node(body)], start_pos)
    }

    /// `for (` Expression? `;` Expression? `;` Expression? `)` CodeBlock
    fn parse_for_statement(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let keyword = self.bump();
        let mut children = vec![Element::Token(keyword)];
        if let Some(unexpected) = self.consume_unexpected(|k| k == SyntaxKind::OpenParenToken) {
            children.push(Element::Node(unexpected));
        }
        children.push(Element::Token(self.match_kind(SyntaxKind::OpenParenToken)));
        if let Some(init) = self.parse_optional_expression() {
            children.push(Element::Node(init));
        }
        children.push(Element::Token(self.match_kind(SyntaxKind::SemicolonToken)));
        if let Some(condition) = self.parse_optional_expression() {
            children.push(Element::Node(condition));
        }
        children.push(Element::Token(self.match_kind(SyntaxKind::SemicolonToken)));
        if let Some(step) = self.parse_optional_expression() {
            children.push(Element::Node(step));
        }
        if let Some(unexpected) = self.consume_unexpected(|k| k == SyntaxKind::CloseParenToken) {
            children.push(Element::Node(unexpected));
        }
        children.push(Element::Token(self.match_kind(SyntaxKind::CloseParenToken)));
        children.push(Element::Node(self.parse_code_block()));
        self.factory.create_node(SyntaxKind::ForStatement, children, start_pos)
    }

    /// `foreach (` VariableDeclaration `in` Expression `)` CodeBlock
    fn parse_foreach_statement(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let keyword = self.bump();
        let mut children = vec![Element::Token(keyword)];
        if let Some(unexpected) = self.consume_unexpected(|k| k == SyntaxKind::OpenParenToken) {
            children.push(Element::Node(unexpected));
        }
        children.push(Element::Token(self.match_kind(SyntaxKind::OpenParenToken)));
        children.push(Element::Node(self.parse_foreach_binding()));
        children.push(Element::Token(self.match_kind(SyntaxKind::InKeyword)));
        children.push(Element::Node(self.parse_expression()));
        if let Some(unexpected) = self.consume_unexpected(|k| k == SyntaxKind::CloseParenToken) {
            children.push(Element::Node(unexpected));
        }
        children.push(Element::Token(self.match_kind(SyntaxKind::CloseParenToken)));
        children.push(Element::Node(self.parse_code_block()));
        self.factory.create_node(SyntaxKind::ForeachStatement, children, start_pos)
    }

    /// `var`/`let` Name (`:` Type)?, with no trailing `;` or initializer —
    /// the `foreach` binding, unlike a full `VariableDeclaration`, ends at
    /// `in` rather than a statement terminator.
    fn parse_foreach_binding(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let binder = match self.try_match_any(SyntaxKind::VarKeyword, SyntaxKind::LetKeyword) {
            Some((_, token)) => token,
            None => self.match_kind(SyntaxKind::VarKeyword),
        };
        let name = self.match_kind(SyntaxKind::IdentifierToken);
        let mut children = vec![Element::Token(binder), Element::Token(name)];
        if let Some(colon) = self.try_match(SyntaxKind::ColonToken) {
            children.push(Element::Token(colon));
            children.push(Element::Node(self.parse_type()));
        }
        self.factory.create_node(SyntaxKind::VariableDeclaration, children, start_pos)
    }

    fn parse_checked_statement(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let keyword = self.bump();
        let body = self.parse_code_block();
        self.factory.create_node(SyntaxKind::CheckedStatement, vec![Element::Token(keyword), Element::Node(body)], start_pos)
    }

    fn parse_unchecked_statement(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let keyword = self.bump();
        let body = self.parse_code_block();
        self.factory.create_node(SyntaxKind::UncheckedStatement, vec![Element::Token(keyword), Element::Node(body)], start_pos)
    }

    fn parse_unsafe_statement(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let keyword = self.bump();
        let body = self.parse_code_block();
        self.factory.create_node(SyntaxKind::UnsafeStatement, vec![Element::Token(keyword), Element::Node(body)], start_pos)
    }

    fn parse_lazy_statement(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let keyword = self.bump();
        let body = self.parse_code_block();
        self.factory.create_node(SyntaxKind::LazyStatement, vec![Element::Token(keyword), Element::Node(body)], start_pos)
    }

    /// Fallback: an expression followed by `;`. Returns `None` (rather than
    /// synthesizing anything) when the current token cannot start an
    /// expression at all, so the caller can try recovery instead of wrapping
    /// a spurious missing-identifier expression around unrelated input.
    fn parse_expression_statement(&mut self) -> Option<NodeId> {
        let start_pos = self.current_span().start;
        let expression = self.parse_optional_expression()?;
        let semicolon = self.match_kind(SyntaxKind::SemicolonToken);
        Some(self.factory.create_node(SyntaxKind::ExpressionStatement, vec![Element::Node(expression), Element::Token(semicolon)], start_pos))
    }
}
