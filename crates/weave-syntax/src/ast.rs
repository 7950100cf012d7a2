//! Typed accessors over the arena tree. Each wrapper is a `NodeId` plus a
//! compile-time guarantee about its `SyntaxKind`; every accessor method still
//! takes `&Tree` explicitly since nodes here carry no reference of their own.
//! Covers the node kinds call sites most often want typed access to, not the
//! full catalog — anything else is still reachable untyped through
//! `Tree::child_node_of_kind`/`child_token_of_kind`/`child_nodes`.

use weave_common::syntax_kind::SyntaxKind;

use crate::tree::{NodeId, TokenId, Tree};

/// A typed wrapper around a node already known to carry `Self::KIND`.
pub trait AstNode: Sized + Copy {
    const KIND: SyntaxKind;

    /// Returns `Some` only if `node`'s kind matches `Self::KIND`.
    fn cast(tree: &Tree, node: NodeId) -> Option<Self>;

    fn syntax(&self) -> NodeId;
}

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(NodeId);

        impl AstNode for $name {
            const KIND: SyntaxKind = SyntaxKind::$kind;

            fn cast(tree: &Tree, node: NodeId) -> Option<Self> {
                (tree.node(node).kind == SyntaxKind::$kind).then_some(Self(node))
            }

            fn syntax(&self) -> NodeId {
                self.0
            }
        }
    };
}

/// First direct node child, in source order.
fn first_node_child(tree: &Tree, node: NodeId) -> Option<NodeId> {
    tree.child_nodes(node).next()
}

/// The `n`th direct node child (0-indexed), in source order.
fn nth_node_child(tree: &Tree, node: NodeId, n: usize) -> Option<NodeId> {
    tree.child_nodes(node).nth(n)
}

/// The lone token child of a node whose grammar carries exactly one bare
/// operator/keyword token among otherwise-node children (assignment, binary,
/// prefix and postfix unary expressions).
fn only_token_child(tree: &Tree, node: NodeId) -> Option<TokenId> {
    tree.node(node).children.iter().find_map(|e| match e {
        crate::tree::Element::Token(t) => Some(*t),
        _ => None,
    })
}

ast_node!(IfStatement, IfStatement);
ast_node!(ElseClause, ElseClause);
ast_node!(WhileStatement, WhileStatement);
ast_node!(ReturnStatement, ReturnStatement);
ast_node!(FunctionDeclaration, FunctionDeclaration);
ast_node!(VariableDeclaration, VariableDeclaration);
ast_node!(BinaryExpression, BinaryExpression);
ast_node!(CallExpression, CallExpression);
ast_node!(IdentifierNameExpression, IdentifierNameExpression);

impl IfStatement {
    pub fn if_keyword(&self, tree: &Tree) -> Option<TokenId> {
        tree.child_token_of_kind(self.0, SyntaxKind::IfKeyword)
    }

    /// No parenthesized condition in this grammar — the condition is simply
    /// the first node child.
    pub fn condition(&self, tree: &Tree) -> Option<NodeId> {
        first_node_child(tree, self.0)
    }

    pub fn body(&self, tree: &Tree) -> Option<NodeId> {
        tree.child_node_of_kind(self.0, SyntaxKind::CodeBlock)
    }

    pub fn else_clause(&self, tree: &Tree) -> Option<ElseClause> {
        tree.child_node_of_kind(self.0, SyntaxKind::ElseClause).and_then(|n| ElseClause::cast(tree, n))
    }
}

impl ElseClause {
    /// Either a nested `IfStatement` (`else if ...`) or a plain `CodeBlock`.
    pub fn continuation(&self, tree: &Tree) -> Option<NodeId> {
        first_node_child(tree, self.0)
    }
}

impl WhileStatement {
    pub fn condition(&self, tree: &Tree) -> Option<NodeId> {
        first_node_child(tree, self.0)
    }

    pub fn body(&self, tree: &Tree) -> Option<NodeId> {
        nth_node_child(tree, self.0, 1)
    }
}

impl ReturnStatement {
    /// `None` for a bare `return;`.
    pub fn expression(&self, tree: &Tree) -> Option<NodeId> {
        first_node_child(tree, self.0)
    }
}

impl FunctionDeclaration {
    pub fn name(&self, tree: &Tree) -> Option<TokenId> {
        tree.child_token_of_kind(self.0, SyntaxKind::IdentifierToken)
    }

    pub fn parameter_list(&self, tree: &Tree) -> Option<NodeId> {
        tree.child_node_of_kind(self.0, SyntaxKind::ParameterList)
    }

    /// Absent for a declaration-only signature (`function f(): i32;`).
    pub fn body(&self, tree: &Tree) -> Option<NodeId> {
        tree.child_node_of_kind(self.0, SyntaxKind::CodeBlock)
    }
}

impl VariableDeclaration {
    pub fn name(&self, tree: &Tree) -> Option<TokenId> {
        tree.child_token_of_kind(self.0, SyntaxKind::IdentifierToken)
    }

    pub fn type_clause(&self, tree: &Tree) -> Option<NodeId> {
        tree.child_node_of_kind(self.0, SyntaxKind::TypeClause)
    }

    /// The initializer's expression, unwrapped from its `InitializerClause`.
    pub fn initializer(&self, tree: &Tree) -> Option<NodeId> {
        let clause = tree.child_node_of_kind(self.0, SyntaxKind::InitializerClause)?;
        first_node_child(tree, clause)
    }
}

impl BinaryExpression {
    pub fn left(&self, tree: &Tree) -> Option<NodeId> {
        first_node_child(tree, self.0)
    }

    pub fn operator(&self, tree: &Tree) -> Option<TokenId> {
        only_token_child(tree, self.0)
    }

    pub fn right(&self, tree: &Tree) -> Option<NodeId> {
        nth_node_child(tree, self.0, 1)
    }
}

impl CallExpression {
    pub fn callee(&self, tree: &Tree) -> Option<NodeId> {
        first_node_child(tree, self.0)
    }

    pub fn argument_list(&self, tree: &Tree) -> Option<NodeId> {
        tree.child_node_of_kind(self.0, SyntaxKind::ArgumentList)
    }
}

impl IdentifierNameExpression {
    /// The wrapped qualified/generic name, absent when this wraps a bare
    /// `self` token instead.
    pub fn name(&self, tree: &Tree) -> Option<NodeId> {
        first_node_child(tree, self.0)
    }

    pub fn self_keyword(&self, tree: &Tree) -> Option<TokenId> {
        tree.child_token_of_kind(self.0, SyntaxKind::SelfKeyword)
    }
}

#[cfg(test)]
mod tests {
    use weave_common::DiagnosticSink;

    use super::*;
    use crate::parser::parse;

    fn parse_source(source: &str) -> Tree {
        let mut sink = DiagnosticSink::new();
        parse(source, &mut sink)
    }

    fn first_of_kind(tree: &Tree, kind: SyntaxKind) -> NodeId {
        fn visit(tree: &Tree, node: NodeId, kind: SyntaxKind) -> Option<NodeId> {
            if tree.node(node).kind == kind {
                return Some(node);
            }
            tree.child_nodes(node).find_map(|child| visit(tree, child, kind))
        }
        visit(tree, tree.root.expect("parsed tree has a root"), kind).unwrap_or_else(|| panic!("no {kind:?} node in tree"))
    }

    #[test]
    fn if_statement_exposes_condition_body_and_else() {
        let tree = parse_source("function f() { if a { b; } else { c; } }");
        let node = first_of_kind(&tree, SyntaxKind::IfStatement);
        let if_stmt = IfStatement::cast(&tree, node).expect("cast to IfStatement");
        assert!(if_stmt.condition(&tree).is_some());
        assert!(if_stmt.body(&tree).is_some());
        assert!(if_stmt.else_clause(&tree).is_some());
    }

    #[test]
    fn variable_declaration_exposes_name_type_and_initializer() {
        let tree = parse_source("function f() { var x: i32 = 1; }");
        let node = first_of_kind(&tree, SyntaxKind::VariableDeclaration);
        let decl = VariableDeclaration::cast(&tree, node).expect("cast to VariableDeclaration");
        let name = decl.name(&tree).expect("name token");
        assert_eq!(tree.token(name).kind, SyntaxKind::IdentifierToken);
        assert!(decl.type_clause(&tree).is_some());
        assert!(decl.initializer(&tree).is_some());
    }

    #[test]
    fn binary_expression_exposes_operands_and_operator() {
        let tree = parse_source("function f() { var x = 1 + 2; }");
        let node = first_of_kind(&tree, SyntaxKind::BinaryExpression);
        let expr = BinaryExpression::cast(&tree, node).expect("cast to BinaryExpression");
        assert!(expr.left(&tree).is_some());
        assert!(expr.right(&tree).is_some());
        let op = expr.operator(&tree).expect("operator token");
        assert_eq!(tree.token(op).kind, SyntaxKind::PlusToken);
    }

    #[test]
    fn cast_rejects_mismatched_kind() {
        let tree = parse_source("function f() { if a { } }");
        let node = first_of_kind(&tree, SyntaxKind::IfStatement);
        assert!(WhileStatement::cast(&tree, node).is_none());
    }
}
