use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::grammar::{AnalysisError, Stage, TokenCursor, DECLARATION_PREFIX, FOR_KEYWORD};
use crate::tokenizer::Token;

/// Tokens needed before the declaration rule can be evaluated.
pub const MIN_SYNTAX_TOKENS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyntaxVerdict {
    ValidDeclaration,
    ValidForLoop,
    SyntaxError,
}

impl fmt::Display for SyntaxVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SyntaxVerdict::ValidDeclaration => "Valid Syntax",
            SyntaxVerdict::ValidForLoop => "Valid for-loop Syntax",
            SyntaxVerdict::SyntaxError => "Syntax Error",
        };
        f.write_str(text)
    }
}

/// Decides whether the tokens have the shape of a declaration or a for-loop.
///
/// The declaration rule wins over the for-loop rule, so `for x = ...` is a
/// valid declaration.
#[tracing::instrument(level = "trace", skip_all)]
pub fn check_syntax(tokens: &[Token]) -> Result<SyntaxVerdict, AnalysisError> {
    let cursor = TokenCursor::new(tokens, Stage::Syntax);
    cursor.require(MIN_SYNTAX_TOKENS)?;

    let verdict = if cursor.matches(DECLARATION_PREFIX) {
        SyntaxVerdict::ValidDeclaration
    } else if cursor.matches(FOR_KEYWORD) {
        SyntaxVerdict::ValidForLoop
    } else {
        SyntaxVerdict::SyntaxError
    };
    trace!(%verdict, "Checked syntax");
    Ok(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SymbolTable;
    use crate::tokenizer::tokenize;

    fn syntax_of(source: &str) -> Result<SyntaxVerdict, AnalysisError> {
        check_syntax(tokenize(source, SymbolTable::standard()).as_slice())
    }

    #[test]
    fn integer_declaration_is_valid() {
        let verdict = syntax_of("int x = 5 ;").unwrap();
        assert_eq!(verdict, SyntaxVerdict::ValidDeclaration);
        assert_eq!(verdict.to_string(), "Valid Syntax");
    }

    #[test]
    fn any_keyword_starts_a_declaration() {
        assert_eq!(syntax_of("float x = 0;"), Ok(SyntaxVerdict::ValidDeclaration));
        assert_eq!(syntax_of("if y = z"), Ok(SyntaxVerdict::ValidDeclaration));
        assert_eq!(syntax_of("for x = 5 ;"), Ok(SyntaxVerdict::ValidDeclaration));
    }

    #[test]
    fn for_header_is_valid_for_any_operands() {
        for source in [
            "for ( i = 0 ; i < 5 ; i ++ )",
            "for ( count = 10 ; count < limit ; count ++ )",
            "for(j=1;j<n;j++)",
            "for ( )",
        ] {
            let verdict = syntax_of(source).unwrap();
            assert_eq!(verdict, SyntaxVerdict::ValidForLoop, "{source}");
            assert_eq!(verdict.to_string(), "Valid for-loop Syntax");
        }
    }

    #[test]
    fn unrelated_statements_are_errors() {
        assert_eq!(syntax_of("x = 5 ;"), Ok(SyntaxVerdict::SyntaxError));
        assert_eq!(syntax_of("int = x"), Ok(SyntaxVerdict::SyntaxError));
        assert_eq!(syntax_of("while ( x < 5 )"), Ok(SyntaxVerdict::SyntaxError));
        assert_eq!(SyntaxVerdict::SyntaxError.to_string(), "Syntax Error");
    }

    #[test]
    fn short_sequences_are_reported() {
        for (source, found) in [("", 0), ("int", 1), ("for (", 2), ("x y", 2)] {
            assert_eq!(
                syntax_of(source),
                Err(AnalysisError::InsufficientTokens {
                    stage: Stage::Syntax,
                    needed: 3,
                    found,
                }),
                "{source:?}"
            );
        }
    }
}
