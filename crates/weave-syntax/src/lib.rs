//! Arena-backed syntax tree, factory, and recursive-descent parser for the
//! Weave compiler front-end.
//!
//! [`parser::parse`] is the public entry point: it lexes and parses a
//! complete source buffer into a [`tree::Tree`] rooted at `SourceFile`,
//! collecting diagnostics into the caller's `DiagnosticSink` rather than
//! failing outright. [`ast`] then gives typed access to the most commonly
//! needed node shapes; anything else is still reachable untyped through
//! `Tree`'s own child-lookup methods. [`visitor`] walks a tree in source
//! order for callers that want every node, not just a few typed shapes.

pub mod arena;
pub mod ast;
pub mod factory;
pub mod parser;
pub mod tree;
pub mod visitor;

pub use parser::{parse, parse_with_trivia};
pub use tree::{NodeId, Tree};
