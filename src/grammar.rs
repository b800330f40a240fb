//! Shape matching shared by the syntax, semantic and parse-tree passes.
//!
//! The grammar knows two productions:
//!
//! ```text
//! Declaration ::= Keyword Identifier '=' Literal ';'
//! ForHeader   ::= 'for' '(' Identifier '=' Literal ';' Identifier '<' Literal ...
//! ```
//!
//! Every pass reads the token sequence through a [`TokenCursor`], which checks
//! the sequence length before any positional access and reports a short
//! sequence as [`AnalysisError::InsufficientTokens`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::symbols::TokenKind;
use crate::tokenizer::Token;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Syntax,
    Semantic,
    ParseTree,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Syntax => "syntax",
            Stage::Semantic => "semantic",
            Stage::ParseTree => "parse-tree",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum AnalysisError {
    #[error("{stage} analysis needs at least {needed} token(s), found {found}")]
    InsufficientTokens {
        stage: Stage,
        needed: usize,
        found: usize,
    },
}

impl AnalysisError {
    pub fn stage(&self) -> Stage {
        match self {
            AnalysisError::InsufficientTokens { stage, .. } => *stage,
        }
    }
}

/// One position of a production.
#[derive(Clone, Copy, Debug)]
pub enum Pattern {
    Kind(TokenKind),
    Lexeme(&'static str),
    Any,
}

impl Pattern {
    fn accepts(self, token: &Token) -> bool {
        match self {
            Pattern::Kind(kind) => token.kind == kind,
            Pattern::Lexeme(lexeme) => token.is(lexeme),
            Pattern::Any => true,
        }
    }
}

/// `Keyword Identifier '='`, the part of a declaration the syntax pass checks.
pub const DECLARATION_PREFIX: &[Pattern] = &[
    Pattern::Kind(TokenKind::Keyword),
    Pattern::Kind(TokenKind::Identifier),
    Pattern::Kind(TokenKind::AssignmentOperator),
];

/// `int Identifier _ IntegerLiteral`. The operator slot is not inspected.
pub const INTEGER_DECLARATION: &[Pattern] = &[
    Pattern::Lexeme("int"),
    Pattern::Kind(TokenKind::Identifier),
    Pattern::Any,
    Pattern::Kind(TokenKind::IntegerLiteral),
];

pub const FOR_KEYWORD: &[Pattern] = &[Pattern::Lexeme("for")];

/// Tokens in a complete declaration.
pub const DECLARATION_LEN: usize = 5;
/// Tokens up to and including the loop bound of a canonical for-header.
pub const FOR_HEADER_LEN: usize = 9;

#[derive(Clone, Copy, Debug)]
pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    stage: Stage,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: &'a [Token], stage: Stage) -> Self {
        Self { tokens, stage }
    }

    pub fn require(&self, needed: usize) -> Result<(), AnalysisError> {
        if self.tokens.len() < needed {
            return Err(AnalysisError::InsufficientTokens {
                stage: self.stage,
                needed,
                found: self.tokens.len(),
            });
        }
        Ok(())
    }

    pub fn leading(&self) -> Option<&'a Token> {
        self.tokens.first()
    }

    pub fn leading_is(&self, lexeme: &str) -> bool {
        self.leading().is_some_and(|token| token.is(lexeme))
    }

    /// True when the sequence starts with tokens accepted by `production`.
    /// A sequence shorter than the production never matches.
    pub fn matches(&self, production: &[Pattern]) -> bool {
        self.tokens.len() >= production.len()
            && production
                .iter()
                .zip(self.tokens)
                .all(|(pattern, token)| pattern.accepts(token))
    }

    /// The first `N` tokens, or an error naming how many were missing.
    pub fn fields<const N: usize>(&self) -> Result<[&'a Token; N], AnalysisError> {
        self.require(N)?;
        let tokens = self.tokens;
        Ok(std::array::from_fn(|i| &tokens[i]))
    }
}
