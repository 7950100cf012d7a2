//! Expression grammar: a precedence-climbing core over three tables
//! (prefix-unary, binary, assignment), a greedy postfix chain, the trailing
//! ternary, and struct-literal disambiguation. See `Precedence` for the
//! level ordering.

use weave_common::syntax_kind::SyntaxKind;

use super::{LoopProgressGuard, Parser};
use crate::tree::{Element, NodeId};

/// Precedence levels, lowest to highest. Declaration order is significant:
/// `next()` walks to the following variant, which is how the climbing loop
/// enforces left-associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) enum Precedence {
    Assignment,
    Conditional,
    Coalescing,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Unary,
    Cast,
    Dereference,
    AddressOf,
    Primary,
}

impl Precedence {
    fn next(self) -> Precedence {
        use Precedence::*;
        match self {
            Assignment => Conditional,
            Conditional => Coalescing,
            Coalescing => LogicalOr,
            LogicalOr => LogicalAnd,
            LogicalAnd => BitwiseOr,
            BitwiseOr => BitwiseXor,
            BitwiseXor => BitwiseAnd,
            BitwiseAnd => Equality,
            Equality => Relational,
            Relational => Shift,
            Shift => Additive,
            Additive => Multiplicative,
            Multiplicative => Unary,
            Unary => Cast,
            Cast => Dereference,
            Dereference => AddressOf,
            AddressOf => Primary,
            Primary => Primary,
        }
    }
}

/// token → (precedence, right-associative). `as` is included here even
/// though its right side is a `Type`, not an `Expression`; the climbing loop
/// special-cases it.
fn binary_precedence(kind: SyntaxKind) -> Option<(Precedence, bool)> {
    use Precedence::*;
    use SyntaxKind::*;
    Some(match kind {
        QuestionQuestionToken => (Coalescing, true),
        PipePipeToken => (LogicalOr, false),
        AmpersandAmpersandToken => (LogicalAnd, false),
        PipeToken => (BitwiseOr, false),
        CaretToken => (BitwiseXor, false),
        AmpersandToken => (BitwiseAnd, false),
        EqualsEqualsToken | BangEqualsToken => (Equality, false),
        LessToken | LessEqualsToken | GreaterToken | GreaterEqualsToken => (Relational, false),
        LessLessToken | GreaterGreaterToken => (Shift, false),
        PlusToken | MinusToken => (Additive, false),
        StarToken | SlashToken | PercentToken => (Multiplicative, false),
        AsKeyword => (Cast, false),
        _ => return None,
    })
}

fn assignment_precedence(kind: SyntaxKind) -> Option<Precedence> {
    use SyntaxKind::*;
    matches!(
        kind,
        EqualsToken
            | PlusEqualsToken
            | MinusEqualsToken
            | StarEqualsToken
            | SlashEqualsToken
            | PercentEqualsToken
            | AmpersandEqualsToken
            | PipeEqualsToken
            | CaretEqualsToken
            | LessLessEqualsToken
            | GreaterGreaterEqualsToken
            | QuestionQuestionEqualsToken
    )
    .then_some(Precedence::Assignment)
}

/// Prefix operators. `*`/`&` double as the `Multiplicative`/`BitwiseAnd`
/// infix operators — the prefix table only applies when parsing a new
/// operand, never inside the binary loop.
fn prefix_precedence(kind: SyntaxKind) -> Option<Precedence> {
    use Precedence::*;
    use SyntaxKind::*;
    match kind {
        MinusToken | BangToken | TildeToken | PlusPlusToken | MinusMinusToken => Some(Unary),
        StarToken => Some(Dereference),
        AmpersandToken => Some(AddressOf),
        _ => None,
    }
}

impl<'t, 's> Parser<'t, 's> {
    pub(super) fn parse_expression(&mut self) -> NodeId {
        self.parse_expression_prec(Precedence::Assignment)
    }

    fn parse_expression_prec(&mut self, min_prec: Precedence) -> NodeId {
        match self.depth_guard(|p| p.parse_expression_climb(min_prec)) {
            Ok(node) => node,
            Err(unexpected) => unexpected,
        }
    }

    fn parse_expression_climb(&mut self, min_prec: Precedence) -> NodeId {
        let mut left = self.parse_unary(min_prec);

        let mut guard = LoopProgressGuard::new();
        loop {
            if !guard.tick(self.pos) {
                break;
            }
            let kind = self.current_kind();

            if let Some(op_prec) = assignment_precedence(kind) {
                if op_prec < min_prec {
                    break;
                }
                let start_pos = self.factory.tree().node(left).span.start;
                let op = self.bump();
                let right = self.parse_expression_prec(op_prec);
                left = self.factory.create_node(
                    SyntaxKind::AssignmentExpression,
                    vec![Element::Node(left), Element::Token(op), Element::Node(right)],
                    start_pos,
                );
                continue;
            }

            if let Some((op_prec, right_assoc)) = binary_precedence(kind) {
                if op_prec < min_prec {
                    break;
                }
                let start_pos = self.factory.tree().node(left).span.start;
                let op = self.bump();

                if kind == SyntaxKind::AsKeyword {
                    let ty = self.parse_type();
                    left = self.factory.create_node(
                        SyntaxKind::CastExpression,
                        vec![Element::Node(left), Element::Token(op), Element::Node(ty)],
                        start_pos,
                    );
                    continue;
                }

                let next_min = if right_assoc { op_prec } else { op_prec.next() };
                let right = self.parse_expression_prec(next_min);
                left = self.factory.create_node(
                    SyntaxKind::BinaryExpression,
                    vec![Element::Node(left), Element::Token(op), Element::Node(right)],
                    start_pos,
                );
                continue;
            }

            break;
        }

        if min_prec <= Precedence::Conditional && self.current_kind() == SyntaxKind::QuestionToken {
            let start_pos = self.factory.tree().node(left).span.start;
            let question = self.bump();
            let when_true = self.parse_expression_prec(Precedence::Conditional);
            let colon = self.match_kind(SyntaxKind::ColonToken);
            let when_false = self.parse_expression_prec(Precedence::Conditional);
            left = self.factory.create_node(
                SyntaxKind::ConditionalExpression,
                vec![
                    Element::Node(left),
                    Element::Token(question),
                    Element::Node(when_true),
                    Element::Token(colon),
                    Element::Node(when_false),
                ],
                start_pos,
            );
        }

        left
    }

    fn parse_unary(&mut self, min_prec: Precedence) -> NodeId {
        if let Some(prec) = prefix_precedence(self.current_kind()) {
            if prec >= min_prec {
                let start_pos = self.current_span().start;
                let op = self.bump();
                let operand = self.parse_expression_prec(prec);
                return self.factory.create_node(
                    SyntaxKind::PrefixUnaryExpression,
                    vec![Element::Token(op), Element::Node(operand)],
                    start_pos,
                );
            }
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> NodeId {
        let mut expr = self.parse_primary();
        let mut guard = LoopProgressGuard::new();
        loop {
            if !guard.tick(self.pos) {
                break;
            }
            match self.current_kind() {
                SyntaxKind::OpenParenToken => {
                    let start_pos = self.factory.tree().node(expr).span.start;
                    let args = self.parse_argument_list();
                    expr = self.factory.create_node(
                        SyntaxKind::CallExpression,
                        vec![Element::Node(expr), Element::Node(args)],
                        start_pos,
                    );
                }
                SyntaxKind::OpenBracketToken => {
                    let start_pos = self.factory.tree().node(expr).span.start;
                    let open = self.bump();
                    let index = self.parse_expression();
                    let close = self.match_kind(SyntaxKind::CloseBracketToken);
                    expr = self.factory.create_node(
                        SyntaxKind::IndexExpression,
                        vec![Element::Node(expr), Element::Token(open), Element::Node(index), Element::Token(close)],
                        start_pos,
                    );
                }
                SyntaxKind::DotToken => {
                    let start_pos = self.factory.tree().node(expr).span.start;
                    let dot = self.bump();
                    let name = self.parse_name_segment();
                    expr = self.factory.create_node(
                        SyntaxKind::MemberAccessExpression,
                        vec![Element::Node(expr), Element::Token(dot), Element::Node(name)],
                        start_pos,
                    );
                }
                SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken => {
                    let start_pos = self.factory.tree().node(expr).span.start;
                    let op = self.bump();
                    expr = self.factory.create_node(SyntaxKind::PostfixUnaryExpression, vec![Element::Node(expr), Element::Token(op)], start_pos);
                }
                _ => break,
            }
        }
        expr
    }

    fn parse_primary(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        match self.current_kind() {
            SyntaxKind::IntegerLiteralToken
            | SyntaxKind::FloatLiteralToken
            | SyntaxKind::StringLiteralToken
            | SyntaxKind::CharacterLiteralToken
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => {
                let literal = self.bump();
                self.factory.create_node(SyntaxKind::LiteralExpression, vec![Element::Token(literal)], start_pos)
            }

            SyntaxKind::SelfKeyword => {
                let token = self.bump();
                self.factory.create_node(SyntaxKind::IdentifierNameExpression, vec![Element::Token(token)], start_pos)
            }

            SyntaxKind::IdentifierToken => {
                let name = self.parse_qualified_name();
                if self.current_kind() == SyntaxKind::OpenBraceToken {
                    return self.parse_struct_expression(name, start_pos);
                }
                self.factory.create_node(SyntaxKind::IdentifierNameExpression, vec![Element::Node(name)], start_pos)
            }

            SyntaxKind::OpenParenToken => {
                let open = self.bump();
                let inner = self.parse_expression();
                let unexpected = self.consume_unexpected(|k| k == SyntaxKind::CloseParenToken);
                let close = self.match_kind(SyntaxKind::CloseParenToken);
                let mut children = vec![Element::Token(open), Element::Node(inner)];
                if let Some(unexpected) = unexpected {
                    children.push(Element::Node(unexpected));
                }
                children.push(Element::Token(close));
                self.factory.create_node(SyntaxKind::ParenthesizedExpression, children, start_pos)
            }

            SyntaxKind::UnreachableKeyword => {
                let keyword = self.bump();
                self.factory.create_node(SyntaxKind::UnreachableExpression, vec![Element::Token(keyword)], start_pos)
            }

            SyntaxKind::EvalKeyword => {
                let keyword = self.bump();
                let body = self
                    .parse_code_block_item()
                    .unwrap_or_else(|| self.factory.create_node(SyntaxKind::UnexpectedNodes, vec![], self.current_span().start));
                self.factory.create_node(SyntaxKind::EvalExpression, vec![Element::Token(keyword), Element::Node(body)], start_pos)
            }

            SyntaxKind::AddressOfKeyword => {
                let keyword = self.bump();
                let operand = self.parse_expression_prec(Precedence::AddressOf);
                self.factory.create_node(SyntaxKind::AddressOfExpression, vec![Element::Token(keyword), Element::Node(operand)], start_pos)
            }

            kind @ (SyntaxKind::SizeOfKeyword | SyntaxKind::AlignOfKeyword | SyntaxKind::TypeOfKeyword | SyntaxKind::NameOfKeyword) => {
                let node_kind = match kind {
                    SyntaxKind::SizeOfKeyword => SyntaxKind::SizeOfExpression,
                    SyntaxKind::AlignOfKeyword => SyntaxKind::AlignOfExpression,
                    SyntaxKind::TypeOfKeyword => SyntaxKind::TypeOfExpression,
                    _ => SyntaxKind::NameOfExpression,
                };
                let keyword = self.bump();
                let open = self.match_kind(SyntaxKind::OpenParenToken);
                let operand = self.parse_expression();
                let close = self.match_kind(SyntaxKind::CloseParenToken);
                self.factory.create_node(
                    node_kind,
                    vec![Element::Token(keyword), Element::Token(open), Element::Node(operand), Element::Token(close)],
                    start_pos,
                )
            }

            _ => {
                let missing = self.match_kind(SyntaxKind::IdentifierToken);
                self.factory.create_node(SyntaxKind::IdentifierNameExpression, vec![Element::Token(missing)], start_pos)
            }
        }
    }

    /// `Name { field: expr, ... }`, entered once a qualified name in
    /// expression position is immediately followed by `{`.
    fn parse_struct_expression(&mut self, name: NodeId, start_pos: u32) -> NodeId {
        let open = self.bump();
        let mut children = vec![Element::Node(name), Element::Token(open)];
        let mut guard = LoopProgressGuard::new();
        while self.current_kind() != SyntaxKind::CloseBraceToken && !self.at_end() {
            if !guard.tick(self.pos) {
                break;
            }
            children.push(Element::Node(self.parse_struct_expression_field()));
            match self.try_match(SyntaxKind::CommaToken) {
                Some(comma) => children.push(Element::Token(comma)),
                None => break,
            }
        }
        children.push(Element::Token(self.match_kind(SyntaxKind::CloseBraceToken)));
        self.factory.create_node(SyntaxKind::StructExpression, children, start_pos)
    }

    fn parse_struct_expression_field(&mut self) -> NodeId {
        let start_pos = self.current_span().start;
        let name = self.match_kind(SyntaxKind::IdentifierToken);
        let colon = self.match_kind(SyntaxKind::ColonToken);
        let value = self.parse_expression();
        self.factory.create_node(
            SyntaxKind::StructExpressionField,
            vec![Element::Token(name), Element::Token(colon), Element::Node(value)],
            start_pos,
        )
    }

    /// Used by statement/declaration contexts that allow an absent
    /// expression (e.g. `return;`, the `for` clauses): `None` when the
    /// current token cannot start one, without consuming anything.
    pub(super) fn parse_optional_expression(&mut self) -> Option<NodeId> {
        self.current_kind().is_start_of_expression().then(|| self.parse_expression())
    }
}
