//! The fixed vocabulary of the toy grammar.
//!
//! A [`SymbolTable`] maps literal lexemes to their [`TokenKind`]. The standard
//! table is built once per process and never mutated; callers that want a
//! different vocabulary construct their own table and pass it to the
//! tokenizer instead.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    #[serde(rename = "KEYWORD")]
    Keyword,
    #[serde(rename = "ASSIGNMENT_OPERATOR")]
    AssignmentOperator,
    #[serde(rename = "TERMINATOR")]
    Terminator,
    #[serde(rename = "LEFT_PARENTHESIS")]
    LeftParen,
    #[serde(rename = "RIGHT_PARENTHESIS")]
    RightParen,
    #[serde(rename = "LEFT_BRACE")]
    LeftBrace,
    #[serde(rename = "RIGHT_BRACE")]
    RightBrace,
    #[serde(rename = "LESS_THAN_OPERATOR")]
    LessThan,
    #[serde(rename = "GREATER_THAN_OPERATOR")]
    GreaterThan,
    #[serde(rename = "ADD_OPERATOR")]
    AddOp,
    #[serde(rename = "SUB_OPERATOR")]
    SubOp,
    #[serde(rename = "MUL_OPERATOR")]
    MulOp,
    #[serde(rename = "DIV_OPERATOR")]
    DivOp,
    #[serde(rename = "IDENTIFIER")]
    Identifier,
    #[serde(rename = "INTEGER_LITERAL")]
    IntegerLiteral,
}

impl TokenKind {
    pub const ALL: [TokenKind; 15] = [
        TokenKind::Keyword,
        TokenKind::AssignmentOperator,
        TokenKind::Terminator,
        TokenKind::LeftParen,
        TokenKind::RightParen,
        TokenKind::LeftBrace,
        TokenKind::RightBrace,
        TokenKind::LessThan,
        TokenKind::GreaterThan,
        TokenKind::AddOp,
        TokenKind::SubOp,
        TokenKind::MulOp,
        TokenKind::DivOp,
        TokenKind::Identifier,
        TokenKind::IntegerLiteral,
    ];

    /// The upper-case tag shown next to each lexeme in reports.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::AssignmentOperator => "ASSIGNMENT_OPERATOR",
            TokenKind::Terminator => "TERMINATOR",
            TokenKind::LeftParen => "LEFT_PARENTHESIS",
            TokenKind::RightParen => "RIGHT_PARENTHESIS",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::LessThan => "LESS_THAN_OPERATOR",
            TokenKind::GreaterThan => "GREATER_THAN_OPERATOR",
            TokenKind::AddOp => "ADD_OPERATOR",
            TokenKind::SubOp => "SUB_OPERATOR",
            TokenKind::MulOp => "MUL_OPERATOR",
            TokenKind::DivOp => "DIV_OPERATOR",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::IntegerLiteral => "INTEGER_LITERAL",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TokenKind {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| VocabularyError::UnknownKind(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("failed to read vocabulary file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed vocabulary: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown token kind '{0}'")]
    UnknownKind(String),
}

/// Lexeme → kind entries of the standard vocabulary.
const STANDARD_ENTRIES: &[(&str, TokenKind)] = &[
    ("int", TokenKind::Keyword),
    ("float", TokenKind::Keyword),
    ("=", TokenKind::AssignmentOperator),
    (";", TokenKind::Terminator),
    ("(", TokenKind::LeftParen),
    (")", TokenKind::RightParen),
    ("{", TokenKind::LeftBrace),
    ("}", TokenKind::RightBrace),
    ("<", TokenKind::LessThan),
    (">", TokenKind::GreaterThan),
    ("for", TokenKind::Keyword),
    ("if", TokenKind::Keyword),
    ("else", TokenKind::Keyword),
    ("+", TokenKind::AddOp),
    ("-", TokenKind::SubOp),
    ("*", TokenKind::MulOp),
    ("/", TokenKind::DivOp),
    ("i", TokenKind::Identifier),
    ("x", TokenKind::Identifier),
    ("5", TokenKind::IntegerLiteral),
    ("0", TokenKind::IntegerLiteral),
];

lazy_static! {
    static ref STANDARD: SymbolTable = SymbolTable::from_entries(STANDARD_ENTRIES.iter().copied());
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolTable {
    entries: HashMap<String, TokenKind>,
}

impl SymbolTable {
    /// The process-wide standard vocabulary.
    pub fn standard() -> &'static SymbolTable {
        &STANDARD
    }

    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, TokenKind)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(lexeme, kind)| (lexeme.to_string(), kind))
                .collect(),
        }
    }

    /// Parses a vocabulary of the form `{ "lexeme": "KIND", ... }`.
    pub fn from_json(text: &str) -> Result<Self, VocabularyError> {
        let raw: HashMap<String, String> = serde_json::from_str(text)?;
        let mut entries = HashMap::with_capacity(raw.len());
        for (lexeme, kind) in raw {
            entries.insert(lexeme, kind.parse()?);
        }
        Ok(Self { entries })
    }

    #[tracing::instrument(level = "debug")]
    pub fn load(path: &Path) -> Result<Self, VocabularyError> {
        let text = std::fs::read_to_string(path)?;
        let table = Self::from_json(&text)?;
        debug!(entries = table.len(), "Loaded vocabulary");
        Ok(table)
    }

    pub fn get(&self, lexeme: &str) -> Option<TokenKind> {
        self.entries.get(lexeme).copied()
    }

    /// Classifies a lexeme; anything the table does not know is an identifier.
    pub fn classify(&self, lexeme: &str) -> TokenKind {
        self.get(lexeme).unwrap_or(TokenKind::Identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by lexeme.
    pub fn sorted_entries(&self) -> Vec<(&str, TokenKind)> {
        let mut entries = self
            .entries
            .iter()
            .map(|(lexeme, kind)| (lexeme.as_str(), *kind))
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn to_json(&self) -> Result<String, VocabularyError> {
        let map = self
            .sorted_entries()
            .into_iter()
            .map(|(lexeme, kind)| (lexeme.to_string(), serde_json::Value::from(kind.name())))
            .collect::<serde_json::Map<_, _>>();
        Ok(serde_json::to_string_pretty(&map)?)
    }
}
