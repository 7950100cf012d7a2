//! Source-order tree walker: one `on_<kind>` hook per node kind, plus token
//! and trivia hooks, dispatched through `on_default` by a `match` on
//! `SyntaxKind` rather than a trait-object vtable. Every hook's default body
//! delegates to `on_default`, which recurses into the node's children in
//! source order — overriding a single `on_<kind>` method is the entire
//! extension surface; a caller that wants every node still gets one by
//! leaving everything at its default.

use weave_common::syntax_kind::SyntaxKind;

use crate::tree::{Element, NodeId, TokenId, Tree, Trivia};

macro_rules! node_hooks {
    ($($kind:ident => $method:ident),+ $(,)?) => {
        pub trait Walker {
            /// Called once per token reached while walking, after its
            /// trivia has already been visited.
            fn on_token(&mut self, tree: &Tree, token: TokenId) {
                let _ = (tree, token);
            }

            /// Called once per leading/trailing trivia piece.
            fn on_trivia(&mut self, tree: &Tree, trivia: Trivia) {
                let _ = (tree, trivia);
            }

            /// Dispatch root: every node passes through here before its
            /// per-kind hook runs. The default recursion lives here, not on
            /// the hooks themselves, so `on_default` is what a hook calls to
            /// opt back into visiting its children.
            fn on_default(&mut self, tree: &Tree, node: NodeId) {
                self.walk_children(tree, node);
            }

            /// Visits every direct child of `node` in source order, routing
            /// tokens through `on_token` (and their trivia through
            /// `on_trivia`) and nodes back through `dispatch`.
            fn walk_children(&mut self, tree: &Tree, node: NodeId) {
                for child in tree.node(node).children.clone() {
                    match child {
                        Element::Token(token) => {
                            self.visit_trivia(tree, token);
                            self.on_token(tree, token);
                        }
                        Element::Node(child_node) => self.dispatch(tree, child_node),
                    }
                }
            }

            fn visit_trivia(&mut self, tree: &Tree, token: TokenId) {
                let data = tree.token(token);
                for trivia in data.leading_trivia.iter().chain(data.trailing_trivia.iter()) {
                    self.on_trivia(tree, *trivia);
                }
            }

            /// Routes `node` to its per-kind hook based on `SyntaxKind`,
            /// falling back to `on_default` directly for kinds with no
            /// dedicated hook (there are none today, but recovery nodes
            /// reached via unusual trees should still be walked rather than
            /// silently dropped).
            fn dispatch(&mut self, tree: &Tree, node: NodeId) {
                match tree.node(node).kind {
                    $(SyntaxKind::$kind => self.$method(tree, node),)+
                    _ => self.on_default(tree, node),
                }
            }

            $(
                fn $method(&mut self, tree: &Tree, node: NodeId) {
                    self.on_default(tree, node);
                }
            )+
        }
    };
}

node_hooks! {
    SourceFile => on_source_file,
    CodeBlock => on_code_block,
    CodeBlockItem => on_code_block_item,
    SyntaxList => on_syntax_list,
    UnexpectedNodes => on_unexpected_nodes,
    BalancedTokenSequence => on_balanced_token_sequence,
    UsingDeclaration => on_using_declaration,
    FunctionDeclaration => on_function_declaration,
    DelegateDeclaration => on_delegate_declaration,
    VariableDeclaration => on_variable_declaration,
    ConstantDeclaration => on_constant_declaration,
    StructDeclaration => on_struct_declaration,
    ConceptDeclaration => on_concept_declaration,
    ExtendDeclaration => on_extend_declaration,
    NamespaceDeclaration => on_namespace_declaration,
    TypeAliasDeclaration => on_type_alias_declaration,
    EnumDeclaration => on_enum_declaration,
    EnumItem => on_enum_item,
    EmptyStatement => on_empty_statement,
    ReturnStatement => on_return_statement,
    IfStatement => on_if_statement,
    ElseClause => on_else_clause,
    WhileStatement => on_while_statement,
    BreakStatement => on_break_statement,
    ContinueStatement => on_continue_statement,
    GotoStatement => on_goto_statement,
    YieldStatement => on_yield_statement,
    LoopStatement => on_loop_statement,
    ForStatement => on_for_statement,
    ForeachStatement => on_foreach_statement,
    CheckedStatement => on_checked_statement,
    UncheckedStatement => on_unchecked_statement,
    UnsafeStatement => on_unsafe_statement,
    LazyStatement => on_lazy_statement,
    ExpressionStatement => on_expression_statement,
    LabeledStatement => on_labeled_statement,
    IdentifierNameExpression => on_identifier_name_expression,
    LiteralExpression => on_literal_expression,
    ParenthesizedExpression => on_parenthesized_expression,
    PrefixUnaryExpression => on_prefix_unary_expression,
    PostfixUnaryExpression => on_postfix_unary_expression,
    BinaryExpression => on_binary_expression,
    AssignmentExpression => on_assignment_expression,
    ConditionalExpression => on_conditional_expression,
    CastExpression => on_cast_expression,
    CallExpression => on_call_expression,
    IndexExpression => on_index_expression,
    MemberAccessExpression => on_member_access_expression,
    StructExpression => on_struct_expression,
    StructExpressionField => on_struct_expression_field,
    SizeOfExpression => on_size_of_expression,
    AlignOfExpression => on_align_of_expression,
    TypeOfExpression => on_type_of_expression,
    NameOfExpression => on_name_of_expression,
    AddressOfExpression => on_address_of_expression,
    UnreachableExpression => on_unreachable_expression,
    EvalExpression => on_eval_expression,
    IdentifierName => on_identifier_name,
    QualifiedName => on_qualified_name,
    GenericName => on_generic_name,
    NamedType => on_named_type,
    TupleType => on_tuple_type,
    ArrayType => on_array_type,
    SliceType => on_slice_type,
    PointerType => on_pointer_type,
    ReferenceType => on_reference_type,
    WildcardPattern => on_wildcard_pattern,
    SlicePattern => on_slice_pattern,
    TuplePattern => on_tuple_pattern,
    StructPattern => on_struct_pattern,
    StructPatternField => on_struct_pattern_field,
    IdentifierPattern => on_identifier_pattern,
    LiteralPattern => on_literal_pattern,
    AttributeList => on_attribute_list,
    Attribute => on_attribute,
    ParameterList => on_parameter_list,
    Parameter => on_parameter,
    ArgumentList => on_argument_list,
    Argument => on_argument,
    GenericParameterList => on_generic_parameter_list,
    GenericParameter => on_generic_parameter,
    GenericArgumentList => on_generic_argument_list,
    TypeClause => on_type_clause,
    ReturnTypeClause => on_return_type_clause,
    InitializerClause => on_initializer_clause,
    ArrowExpressionClause => on_arrow_expression_clause,
    ConstraintClause => on_constraint_clause,
    NameColon => on_name_colon,
    PatternBinding => on_pattern_binding,
}

#[cfg(test)]
mod tests {
    use weave_common::DiagnosticSink;

    use super::*;
    use crate::parser::parse;

    /// Counts every node and token reached, proving the default recursion
    /// covers the whole tree without any hook overridden.
    #[derive(Default)]
    struct Counter {
        nodes: u32,
        tokens: u32,
    }

    impl Walker for Counter {
        fn on_default(&mut self, tree: &Tree, node: NodeId) {
            self.nodes += 1;
            self.walk_children(tree, node);
        }

        fn on_token(&mut self, _tree: &Tree, _token: TokenId) {
            self.tokens += 1;
        }
    }

    #[test]
    fn default_walk_visits_every_node_and_token() {
        let mut sink = DiagnosticSink::new();
        let tree = parse("function f() { var x = 1 + 2; }", &mut sink);
        let mut counter = Counter::default();
        counter.dispatch(&tree, tree.root.expect("root"));
        assert!(counter.nodes > 5);
        assert!(counter.tokens > 5);
    }

    /// Overriding a single hook still gets the default recursion for
    /// everything else, so only the targeted kind's count differs.
    #[derive(Default)]
    struct IfCounter {
        if_statements: u32,
    }

    impl Walker for IfCounter {
        fn on_if_statement(&mut self, tree: &Tree, node: NodeId) {
            self.if_statements += 1;
            self.on_default(tree, node);
        }
    }

    #[test]
    fn overriding_one_hook_still_recurses_into_children() {
        let mut sink = DiagnosticSink::new();
        let tree = parse("function f() { if a { if b { } } }", &mut sink);
        let mut counter = IfCounter::default();
        counter.dispatch(&tree, tree.root.expect("root"));
        assert_eq!(counter.if_statements, 2);
    }
}
