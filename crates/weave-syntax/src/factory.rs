//! Typed construction entry points over [`crate::tree::Tree`]: turns a
//! lexer token into a stored [`TokenData`], mints missing tokens at a
//! collapsed anchor span, and assembles node records from their children.

use weave_common::syntax_kind::SyntaxKind;
use weave_common::token::{LexedToken, TokenPayload};
use weave_common::SourceSpan;

use crate::tree::{Element, NodeData, NodeId, Payload, TokenData, TokenId, Tree, Trivia, TOKEN_FLAGS_MISSING, TOKEN_FLAGS_NONE};

pub struct SyntaxFactory<'t> {
    tree: &'t mut Tree,
}

impl<'t> SyntaxFactory<'t> {
    pub fn new(tree: &'t mut Tree) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &Tree {
        self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        self.tree
    }

    /// Copy a lexer-produced token into the arena, interning its trivia-free
    /// literal/identifier payload along the way.
    pub fn token_from_lexed(&mut self, lexed: &LexedToken) -> TokenId {
        let leading = lexed
            .leading_trivia
            .iter()
            .map(|t| Trivia { kind: t.kind, span: t.span })
            .collect();
        let trailing = lexed
            .trailing_trivia
            .iter()
            .map(|t| Trivia { kind: t.kind, span: t.span })
            .collect();
        let payload = self.intern_payload(&lexed.payload);
        self.tree.tokens.push(TokenData {
            kind: lexed.kind,
            span: lexed.span,
            leading_trivia: leading,
            trailing_trivia: trailing,
            payload,
            flags: if lexed.is_missing() { TOKEN_FLAGS_MISSING } else { TOKEN_FLAGS_NONE },
        })
    }

    fn intern_payload(&mut self, payload: &TokenPayload) -> Payload {
        match payload {
            TokenPayload::None => Payload::None,
            TokenPayload::Identifier { spelling, contextual_keyword } => Payload::Identifier {
                spelling: self.tree.strings.intern(spelling),
                contextual_keyword: *contextual_keyword,
            },
            TokenPayload::Integer { prefix, suffix, digits } => Payload::Integer {
                prefix: *prefix,
                suffix: *suffix,
                digits: self.tree.strings.intern(digits),
            },
            TokenPayload::Float { prefix, suffix, text } => Payload::Float {
                prefix: *prefix,
                suffix: *suffix,
                text: self.tree.strings.intern(text),
            },
            TokenPayload::Str { prefix, value } => Payload::Str {
                prefix: *prefix,
                value: self.tree.strings.intern(value),
            },
            TokenPayload::Char { prefix, value } => Payload::Char { prefix: *prefix, value: *value },
        }
    }

    /// A missing token of `kind`, anchored at the collapsed start of
    /// `anchor` — the factory itself enforces the zero-length invariant, not
    /// caller discipline.
    pub fn missing_token(&mut self, kind: SyntaxKind, anchor: SourceSpan) -> TokenId {
        debug_assert!(!kind.is_contextual_keyword(), "use missing_contextual_keyword for {kind:?}");
        self.tree.tokens.push(TokenData {
            kind,
            span: anchor.collapse_to_start(),
            leading_trivia: Vec::new(),
            trailing_trivia: Vec::new(),
            payload: Payload::None,
            flags: TOKEN_FLAGS_MISSING,
        })
    }

    /// A missing contextual keyword: still lexically an `IdentifierToken`
    /// carrying the contextual tag, per the tagging (not reclassification)
    /// rule that applies to present contextual keywords too.
    pub fn missing_contextual_keyword(&mut self, kind: SyntaxKind, anchor: SourceSpan) -> TokenId {
        debug_assert!(kind.is_contextual_keyword());
        let empty = self.tree.strings.intern("");
        self.tree.tokens.push(TokenData {
            kind: SyntaxKind::IdentifierToken,
            span: anchor.collapse_to_start(),
            leading_trivia: Vec::new(),
            trailing_trivia: Vec::new(),
            payload: Payload::Identifier { spelling: empty, contextual_keyword: Some(kind) },
            flags: TOKEN_FLAGS_MISSING,
        })
    }

    /// Build a node, computing its span as the merge of its children's spans
    /// (or a zero-length span at `fallback_pos` when it has none).
    pub fn create_node(&mut self, kind: SyntaxKind, children: Vec<Element>, fallback_pos: u32) -> NodeId {
        debug_assert!(kind.is_node(), "{kind:?} is not a node kind");
        let span = children
            .iter()
            .map(|e| match e {
                Element::Token(t) => self.tree.token(*t).span,
                Element::Node(n) => self.tree.node(*n).span,
            })
            .reduce(SourceSpan::merge)
            .unwrap_or_else(|| SourceSpan::empty_at(fallback_pos));
        self.tree.nodes.push(NodeData { kind, span, children })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_collapses_span_to_start() {
        let mut tree = Tree::new();
        let mut factory = SyntaxFactory::new(&mut tree);
        let id = factory.missing_token(SyntaxKind::SemicolonToken, SourceSpan::new(10, 14));
        let token = factory.tree().token(id);
        assert_eq!(token.span, SourceSpan::new(10, 10));
        assert!(token.is_missing());
    }

    #[test]
    fn missing_contextual_keyword_stays_identifier_shaped() {
        let mut tree = Tree::new();
        let mut factory = SyntaxFactory::new(&mut tree);
        let id = factory.missing_contextual_keyword(SyntaxKind::WhereContextualKeyword, SourceSpan::new(5, 5));
        let token = factory.tree().token(id);
        assert_eq!(token.kind, SyntaxKind::IdentifierToken);
        match token.payload {
            Payload::Identifier { contextual_keyword, .. } => {
                assert_eq!(contextual_keyword, Some(SyntaxKind::WhereContextualKeyword));
            }
            _ => panic!("expected identifier payload"),
        }
    }

    #[test]
    fn create_node_span_covers_all_children() {
        let mut tree = Tree::new();
        let mut factory = SyntaxFactory::new(&mut tree);
        let lexed = LexedToken::new(SyntaxKind::PlusToken, SourceSpan::new(3, 4));
        let tok = factory.token_from_lexed(&lexed);
        let node = factory.create_node(SyntaxKind::ExpressionStatement, vec![Element::Token(tok)], 0);
        assert_eq!(factory.tree().node(node).span, SourceSpan::new(3, 4));
    }

    #[test]
    fn create_node_with_no_children_falls_back_to_position() {
        let mut tree = Tree::new();
        let mut factory = SyntaxFactory::new(&mut tree);
        let node = factory.create_node(SyntaxKind::SyntaxList, vec![], 7);
        assert_eq!(factory.tree().node(node).span, SourceSpan::empty_at(7));
    }

    #[test]
    fn identical_identifier_spellings_intern_once() {
        let mut tree = Tree::new();
        let mut factory = SyntaxFactory::new(&mut tree);
        let make = |span| LexedToken {
            payload: weave_common::token::TokenPayload::Identifier {
                spelling: "x".to_string(),
                contextual_keyword: None,
            },
            ..LexedToken::new(SyntaxKind::IdentifierToken, span)
        };
        let b = factory.token_from_lexed(&make(SourceSpan::new(2, 3)));
        let c = factory.token_from_lexed(&make(SourceSpan::new(4, 5)));
        let sym_b = match factory.tree().token(b).payload {
            Payload::Identifier { spelling, .. } => spelling,
            _ => panic!(),
        };
        let sym_c = match factory.tree().token(c).payload {
            Payload::Identifier { spelling, .. } => spelling,
            _ => panic!(),
        };
        assert_eq!(sym_b, sym_c);
    }
}
