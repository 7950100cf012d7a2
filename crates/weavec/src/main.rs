//! The Weave front-end smoke-test CLI.
//!
//! Reads one source file, runs the lex + parse pipeline, and prints either
//! the resulting tree shape or the diagnostics the parser accumulated along
//! the way.

use std::path::PathBuf;
use std::process;

use clap::{Parser as ClapParser, ValueEnum};

use weave_common::{DiagnosticSink, SourceText};
use weave_lexer::TriviaMode;
use weave_syntax::tree::{Element, NodeId, Tree};

#[derive(ClapParser)]
#[command(name = "weavec", version, about = "Weave front-end smoke-test driver")]
struct Cli {
    /// Source file to lex and parse.
    path: PathBuf,

    /// Which trivia kinds the lexer attaches to tokens.
    #[arg(long, value_enum, default_value_t = Trivia::All)]
    trivia: Trivia,

    /// How to print diagnostics: plain `path:line:col: message` lines, or a
    /// JSON array of diagnostic records.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum Trivia {
    None,
    Doc,
    All,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<Trivia> for TriviaMode {
    fn from(value: Trivia) -> Self {
        match value {
            Trivia::None => TriviaMode::None,
            Trivia::Doc => TriviaMode::DocumentationOnly,
            Trivia::All => TriviaMode::All,
        }
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(message) = run(&cli) {
        eprintln!("error: {message}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let bytes = std::fs::read(&cli.path).map_err(|e| format!("failed to read '{}': {e}", cli.path.display()))?;
    let source = SourceText::new(&bytes).map_err(|e| format!("'{}': {e}", cli.path.display()))?;

    let mut sink = DiagnosticSink::new();
    let tree = weave_syntax::parse_with_trivia(source.as_str(), &mut sink, cli.trivia.into());

    if sink.is_empty() {
        if matches!(cli.format, OutputFormat::Json) {
            println!("[]");
        } else {
            print_tree(&tree, tree.root.expect("parse always produces a root"), 0);
        }
        return Ok(());
    }

    match cli.format {
        OutputFormat::Text => {
            for diagnostic in &sink {
                let position = source.line_position(diagnostic.span.start);
                println!("{}:{}:{}: {diagnostic}", cli.path.display(), position.line + 1, position.column + 1);
            }
        }
        OutputFormat::Json => {
            let records: Vec<JsonDiagnostic> = sink
                .iter()
                .map(|diagnostic| {
                    let position = source.line_position(diagnostic.span.start);
                    JsonDiagnostic {
                        path: cli.path.display().to_string(),
                        line: position.line + 1,
                        column: position.column + 1,
                        diagnostic: diagnostic.clone(),
                    }
                })
                .collect();
            let rendered = serde_json::to_string_pretty(&records).map_err(|e| format!("failed to serialize diagnostics: {e}"))?;
            println!("{rendered}");
        }
    }

    Ok(())
}

/// One diagnostic plus the 1-based line/column `weavec` prints in text mode,
/// serialized for `--format json` consumers that want structured output
/// instead of parsing the plain-text rendering.
#[derive(serde::Serialize)]
struct JsonDiagnostic {
    path: String,
    line: usize,
    column: usize,
    #[serde(flatten)]
    diagnostic: weave_common::diagnostics::Diagnostic,
}

/// Prints each node's kind and span, indented by depth, with its direct
/// tokens shown inline.
fn print_tree(tree: &Tree, node: NodeId, depth: usize) {
    let data = tree.node(node);
    println!("{}{:?}@{}..{}", "  ".repeat(depth), data.kind, data.span.start, data.span.end);
    for child in &data.children {
        match *child {
            Element::Token(token) => {
                let token_data = tree.token(token);
                println!("{}{:?}@{}..{}", "  ".repeat(depth + 1), token_data.kind, token_data.span.start, token_data.span.end);
            }
            Element::Node(child_node) => print_tree(tree, child_node, depth + 1),
        }
    }
}
