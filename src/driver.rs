//! Input loading and artefact output behind the `cppsim` binary.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::diagnostics::{diagnostic_from_analysis_error, diagnostic_from_vocabulary_error};
use crate::grammar::AnalysisError;
use crate::parse_tree::{render_ascii, TreeNode};
use crate::symbols::SymbolTable;
use crate::Analysis;

pub const TOKENS_FILE: &str = "tokens.json";
pub const ANALYSIS_FILE: &str = "analysis.json";
pub const TREE_FILE: &str = "tree.txt";

/// The vocabulary at `path`, or the standard one when no path is given.
pub fn load_symbols(path: Option<&Path>) -> anyhow::Result<SymbolTable> {
    let Some(path) = path else {
        return Ok(SymbolTable::standard().clone());
    };
    let symbols = SymbolTable::load(path).map_err(|err| {
        anyhow::anyhow!(
            "{}",
            diagnostic_from_vocabulary_error(&err)
                .with_note(format!("vocabulary file: {}", path.display()))
        )
    })?;
    if symbols.is_empty() {
        warn!(path = %path.display(), "Vocabulary is empty; every lexeme will be an identifier");
    }
    Ok(symbols)
}

/// Source text from `code`, else the file at `path`, else stdin.
pub fn read_source(code: Option<&str>, path: Option<&Path>) -> anyhow::Result<String> {
    if let Some(code) = code {
        return Ok(code.to_string());
    }
    if let Some(path) = path {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .context("failed to read source from stdin")?;
    Ok(source)
}

pub fn render_output(analysis: &Analysis, json: bool) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(analysis)?)
    } else {
        Ok(analysis.render_report())
    }
}

/// The drawn tree, or the diagnostic explaining why there is none.
pub fn render_tree_artifact(tree: &Result<TreeNode, AnalysisError>) -> String {
    match tree {
        Ok(tree) => render_ascii(tree),
        Err(err) => format!("{}\n", diagnostic_from_analysis_error(err).render_plain()),
    }
}

/// Writes `tokens.json`, `analysis.json` and `tree.txt` into `dir`, replacing
/// whatever an earlier run left there.
pub fn emit_artifacts(dir: &Path, analysis: &Analysis) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let tokens_path = dir.join(TOKENS_FILE);
    std::fs::write(&tokens_path, serde_json::to_string_pretty(&analysis.tokens)?)
        .with_context(|| format!("failed to write {}", tokens_path.display()))?;
    debug!(tokens_path = %tokens_path.display(), "Wrote tokens");

    let analysis_path = dir.join(ANALYSIS_FILE);
    std::fs::write(&analysis_path, serde_json::to_string_pretty(analysis)?)
        .with_context(|| format!("failed to write {}", analysis_path.display()))?;
    debug!(analysis_path = %analysis_path.display(), "Wrote analysis");

    let tree_path = dir.join(TREE_FILE);
    std::fs::write(&tree_path, render_tree_artifact(&analysis.tree))
        .with_context(|| format!("failed to write {}", tree_path.display()))?;
    info!(tree_path = %tree_path.display(), tree_ok = analysis.tree.is_ok(), "Wrote parse tree");
    Ok(())
}
