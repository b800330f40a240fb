use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::grammar::{AnalysisError, Stage, TokenCursor, FOR_KEYWORD, INTEGER_DECLARATION};
use crate::tokenizer::Token;

/// Tokens needed before the integer-assignment rule can be evaluated.
pub const MIN_SEMANTIC_TOKENS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SemanticVerdict {
    IntegerAssignment,
    ForLoop,
    SemanticError,
}

impl fmt::Display for SemanticVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SemanticVerdict::IntegerAssignment => "Semantically Correct: Integer assignment",
            SemanticVerdict::ForLoop => "Semantically Correct: for-loop",
            SemanticVerdict::SemanticError => "Semantic Error",
        };
        f.write_str(text)
    }
}

/// Checks operand types: an `int` declaration must assign an integer literal.
#[tracing::instrument(level = "trace", skip_all)]
pub fn check_semantics(tokens: &[Token]) -> Result<SemanticVerdict, AnalysisError> {
    let cursor = TokenCursor::new(tokens, Stage::Semantic);
    cursor.require(MIN_SEMANTIC_TOKENS)?;

    let verdict = if cursor.matches(INTEGER_DECLARATION) {
        SemanticVerdict::IntegerAssignment
    } else if cursor.matches(FOR_KEYWORD) {
        SemanticVerdict::ForLoop
    } else {
        SemanticVerdict::SemanticError
    };
    trace!(%verdict, "Checked semantics");
    Ok(verdict)
}
