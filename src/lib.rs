//! A front-end pipeline for a two-statement toy grammar.
//!
//! ```text
//! source → tokenize ─┬→ check_syntax
//!                    ├→ check_semantics
//!                    └→ build_tree
//! ```
//!
//! The three consumers read the same token sequence and never see each
//! other's output. Each of them reports a sequence that is too short for the
//! shape it inspects as an [`AnalysisError`] instead of indexing past its end.

pub mod diagnostics;
pub mod driver;
pub mod grammar;
pub mod parse_tree;
pub mod semantics;
pub mod symbols;
pub mod syntax;
pub mod tokenizer;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use grammar::{AnalysisError, Stage};
pub use parse_tree::{build_tree, parse_statement, render_ascii, Statement, TreeNode};
pub use semantics::{check_semantics, SemanticVerdict};
pub use symbols::{SymbolTable, TokenKind, VocabularyError};
pub use syntax::{check_syntax, SyntaxVerdict};
pub use tokenizer::{tokenize, Token, TokenList};

use crate::diagnostics::diagnostic_from_analysis_error;

/// Everything the pipeline produces for one source string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub tokens: TokenList,
    pub syntax: Result<SyntaxVerdict, AnalysisError>,
    pub semantics: Result<SemanticVerdict, AnalysisError>,
    pub tree: Result<TreeNode, AnalysisError>,
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn analyze(source: &str, symbols: &SymbolTable) -> Analysis {
    let tokens = tokenize(source, symbols);
    let syntax = check_syntax(tokens.as_slice());
    let semantics = check_semantics(tokens.as_slice());
    let tree = build_tree(tokens.as_slice());
    debug!(
        token_count = tokens.len(),
        syntax_ok = syntax.is_ok(),
        semantics_ok = semantics.is_ok(),
        tree_ok = tree.is_ok(),
        "Analyzed source"
    );
    Analysis {
        tokens,
        syntax,
        semantics,
        tree,
    }
}

impl Analysis {
    /// Plain-text report with one section per pipeline stage.
    pub fn render_report(&self) -> String {
        let mut sections = Vec::with_capacity(4);

        let mut lexical = String::from("Lexical Analysis");
        if self.tokens.is_empty() {
            lexical.push_str("\n(no tokens)");
        }
        for token in &self.tokens.tokens {
            lexical.push_str(&format!("\nLexeme: {} - Token: {}", token.lexeme, token.kind));
        }
        sections.push(lexical);

        sections.push(render_section("Syntax Analysis", &self.syntax, |v| v.to_string()));
        sections.push(render_section("Semantic Analysis", &self.semantics, |v| {
            v.to_string()
        }));
        sections.push(render_section("Parse Tree", &self.tree, |tree| {
            render_ascii(tree).trim_end().to_string()
        }));

        sections.join("\n\n")
    }
}

fn render_section<T>(
    title: &str,
    result: &Result<T, AnalysisError>,
    render: impl FnOnce(&T) -> String,
) -> String {
    let body = match result {
        Ok(value) => render(value),
        Err(err) => diagnostic_from_analysis_error(err).render_plain(),
    };
    format!("{title}\n{body}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_report() {
        let analysis = analyze("int x = 5;", SymbolTable::standard());
        insta::assert_snapshot!(analysis.render_report(), @r"
        Lexical Analysis
        Lexeme: int - Token: KEYWORD
        Lexeme: x - Token: IDENTIFIER
        Lexeme: = - Token: ASSIGNMENT_OPERATOR
        Lexeme: 5 - Token: INTEGER_LITERAL
        Lexeme: ; - Token: TERMINATOR

        Syntax Analysis
        Valid Syntax

        Semantic Analysis
        Semantically Correct: Integer assignment

        Parse Tree
        Program
        +-- Declaration
            +-- Type: int
                +-- Identifier: x
                    +-- Assignment Operator: =
                        +-- Value: 5
                            +-- Terminator: ;
        ");
    }

    #[test]
    fn short_input_reports_every_stage_independently() {
        let analysis = analyze("for ( i", SymbolTable::standard());
        assert_eq!(analysis.tokens.len(), 3);
        assert_eq!(analysis.syntax, Ok(SyntaxVerdict::ValidForLoop));
        assert!(analysis.semantics.is_err());
        assert!(analysis.tree.is_err());

        let report = analysis.render_report();
        assert!(report.contains("Valid for-loop Syntax"));
        assert!(report.contains("error[semantic:CPPSIM-SEMANTIC-001]"));
        assert!(report.contains("error[parse-tree:CPPSIM-TREE-001]"));
    }

    #[test]
    fn empty_input_does_not_panic() {
        let analysis = analyze("", SymbolTable::standard());
        assert!(analysis.tokens.is_empty());
        assert!(analysis.syntax.is_err());
        assert!(analysis.semantics.is_err());
        assert!(analysis.tree.is_err());
        assert!(analysis.render_report().contains("(no tokens)"));
    }

    #[test]
    fn analysis_serializes_results_by_variant() {
        let analysis = analyze("x = 5 ;", SymbolTable::standard());
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["syntax"]["Ok"], "SyntaxError");
        assert_eq!(json["semantics"]["Ok"], "SemanticError");
        assert_eq!(json["tree"]["Ok"]["label"], "Program");

        let short = serde_json::to_value(analyze("x", SymbolTable::standard())).unwrap();
        assert_eq!(short["syntax"]["Err"]["InsufficientTokens"]["needed"], 3);
        assert_eq!(short["syntax"]["Err"]["InsufficientTokens"]["stage"], "Syntax");
    }
}
