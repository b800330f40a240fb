use std::fmt;

use crate::grammar::{AnalysisError, Stage};
use crate::symbols::VocabularyError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticStage {
    Vocabulary,
    Syntax,
    Semantic,
    ParseTree,
    Io,
}

impl fmt::Display for DiagnosticStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticStage::Vocabulary => "vocabulary",
            DiagnosticStage::Syntax => "syntax",
            DiagnosticStage::Semantic => "semantic",
            DiagnosticStage::ParseTree => "parse-tree",
            DiagnosticStage::Io => "io",
        };
        f.write_str(name)
    }
}

impl From<Stage> for DiagnosticStage {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Syntax => DiagnosticStage::Syntax,
            Stage::Semantic => DiagnosticStage::Semantic,
            Stage::ParseTree => DiagnosticStage::ParseTree,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: String,
    pub stage: DiagnosticStage,
    pub message: String,
    pub notes: Vec<String>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn new(
        code: impl Into<String>,
        stage: DiagnosticStage,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            stage,
            message: message.into(),
            notes: Vec::new(),
            help: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn render_plain(&self) -> String {
        let mut out = format!("error[{}:{}]: {}", self.stage, self.code, self.message);
        for note in &self.notes {
            out.push('\n');
            out.push_str("note: ");
            out.push_str(note);
        }
        if let Some(help) = &self.help {
            out.push('\n');
            out.push_str("help: ");
            out.push_str(help);
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_plain())
    }
}

fn analysis_code(stage: Stage) -> &'static str {
    match stage {
        Stage::Syntax => "CPPSIM-SYNTAX-001",
        Stage::Semantic => "CPPSIM-SEMANTIC-001",
        Stage::ParseTree => "CPPSIM-TREE-001",
    }
}

fn expected_shape(stage: Stage, needed: usize) -> &'static str {
    match (stage, needed) {
        (Stage::ParseTree, 9) => "a for-loop header needs `for ( i = 0 ; i < 5`",
        (Stage::ParseTree, 5) => "a declaration needs `int x = 5 ;`",
        (Stage::ParseTree, _) => "the parse tree needs a leading `int` or `for`",
        (Stage::Syntax, _) => "a declaration starts with `<keyword> <identifier> =`",
        (Stage::Semantic, _) => "an integer assignment needs `int <identifier> = <literal>`",
    }
}

pub fn diagnostic_from_analysis_error(error: &AnalysisError) -> Diagnostic {
    match error {
        AnalysisError::InsufficientTokens {
            stage,
            needed,
            found,
        } => Diagnostic::new(
            analysis_code(*stage),
            DiagnosticStage::from(*stage),
            "insufficient tokens",
        )
        .with_note(format!("expected at least {needed} token(s), found {found}"))
        .with_help(expected_shape(*stage, *needed)),
    }
}

pub fn diagnostic_from_vocabulary_error(error: &VocabularyError) -> Diagnostic {
    let stage = match error {
        VocabularyError::Io(_) => DiagnosticStage::Io,
        VocabularyError::Json(_) | VocabularyError::UnknownKind(_) => DiagnosticStage::Vocabulary,
    };
    let diagnostic = Diagnostic::new("CPPSIM-VOCAB-001", stage, "could not load vocabulary")
        .with_note(error.to_string());
    match error {
        VocabularyError::UnknownKind(_) => diagnostic.with_help(
            "kinds are KEYWORD, ASSIGNMENT_OPERATOR, TERMINATOR, IDENTIFIER, INTEGER_LITERAL, ...",
        ),
        _ => diagnostic,
    }
}
