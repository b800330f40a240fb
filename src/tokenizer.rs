//! A whitespace tokenizer for the toy statement grammar.
//!
//! Only `( ) ; < >` are pulled apart from their neighbours before splitting.
//! Braces, `=` and the arithmetic operators are recognised only when they
//! already stand alone between whitespace, so `x=5` stays a single lexeme.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::symbols::{SymbolTable, TokenKind};

/// Characters that always become standalone lexemes.
const ISOLATED_PUNCTUATION: &str = "();<>";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub lexeme: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(lexeme: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            lexeme: lexeme.into(),
            kind,
        }
    }

    pub fn is(&self, lexeme: &str) -> bool {
        self.lexeme == lexeme
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenList {
    pub tokens: Vec<Token>,
}

impl TokenList {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }
}

fn isolate_punctuation(source: &str) -> String {
    let mut spaced = String::with_capacity(source.len() * 2);
    for c in source.chars() {
        if ISOLATED_PUNCTUATION.contains(c) {
            spaced.push(' ');
            spaced.push(c);
            spaced.push(' ');
        } else {
            spaced.push(c);
        }
    }
    spaced
}

#[tracing::instrument(level = "trace", skip_all)]
pub fn tokenize(source: &str, symbols: &SymbolTable) -> TokenList {
    let tokens = isolate_punctuation(source)
        .split_whitespace()
        .map(|word| Token::new(word, symbols.classify(word)))
        .collect::<Vec<_>>();
    trace!(token_count = tokens.len(), "Tokenized source");
    TokenList { tokens }
}
