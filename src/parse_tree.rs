//! Parse-tree construction for the two recognised statement shapes.
//!
//! Tokens are first parsed into a typed [`Statement`]. The label tree shown to
//! users is derived from it by [`Statement::to_tree`], and rendered by
//! [`render_ascii`].
//!
//! The declaration tree is a chain, not a flat list of siblings: every part of
//! `int x = 5 ;` hangs one level below the part before it.
//!
//! ```text
//! Program
//! +-- Declaration
//!     +-- Type: int
//!         +-- Identifier: x
//!             +-- Assignment Operator: =
//!                 +-- Value: 5
//!                     +-- Terminator: ;
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::grammar::{AnalysisError, Stage, TokenCursor, DECLARATION_LEN, FOR_HEADER_LEN};
use crate::tokenizer::Token;

pub const ROOT_LABEL: &str = "Program";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initialization {
    pub variable: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub variable: String,
    pub bound: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    Declaration {
        ty: String,
        name: String,
        operator: String,
        value: String,
        terminator: String,
    },
    ForLoop {
        keyword: String,
        init: Initialization,
        condition: Condition,
    },
    Unrecognized,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }
}

#[cfg(test)]
impl TreeNode {
    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes on the longest root-to-leaf path, counting the root.
    fn depth(&self) -> usize {
        1 + self.children.iter().map(TreeNode::depth).max().unwrap_or(0)
    }

    fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Labels in depth-first order.
    fn labels(&self) -> Vec<&str> {
        let mut labels = vec![self.label.as_str()];
        for child in &self.children {
            labels.extend(child.labels());
        }
        labels
    }
}

/// Nests each label one level below the previous one.
fn chain(labels: Vec<String>) -> Option<TreeNode> {
    labels.into_iter().rev().fold(None, |child, label| {
        let node = TreeNode::new(label);
        Some(match child {
            Some(child) => node.with_child(child),
            None => node,
        })
    })
}

impl Statement {
    pub fn to_tree(&self) -> TreeNode {
        let root = TreeNode::new(ROOT_LABEL);
        match self {
            Statement::Declaration {
                ty,
                name,
                operator,
                value,
                terminator,
            } => {
                let labels = vec![
                    "Declaration".to_string(),
                    format!("Type: {ty}"),
                    format!("Identifier: {name}"),
                    format!("Assignment Operator: {operator}"),
                    format!("Value: {value}"),
                    format!("Terminator: {terminator}"),
                ];
                match chain(labels) {
                    Some(declaration) => root.with_child(declaration),
                    None => root,
                }
            }
            Statement::ForLoop {
                keyword,
                init,
                condition,
            } => {
                let condition_node = TreeNode::new("Condition")
                    .with_child(TreeNode::new(format!(
                        "Initialization: {}={}",
                        init.variable, init.value
                    )))
                    .with_child(TreeNode::new(format!(
                        "Condition: {} < {}",
                        condition.variable, condition.bound
                    )));
                root.with_child(
                    TreeNode::new("For Loop").with_child(
                        TreeNode::new(format!("Keyword: {keyword}")).with_child(condition_node),
                    ),
                )
            }
            Statement::Unrecognized => root,
        }
    }
}

/// Parses the statement shape selected by the leading lexeme.
///
/// Operands are taken from their canonical positions without checking their
/// kinds. A leading lexeme other than `int` or `for` yields
/// [`Statement::Unrecognized`].
#[tracing::instrument(level = "trace", skip_all)]
pub fn parse_statement(tokens: &[Token]) -> Result<Statement, AnalysisError> {
    let cursor = TokenCursor::new(tokens, Stage::ParseTree);
    cursor.require(1)?;

    let statement = if cursor.leading_is("int") {
        let [ty, name, operator, value, terminator] = cursor.fields::<DECLARATION_LEN>()?;
        Statement::Declaration {
            ty: ty.lexeme.clone(),
            name: name.lexeme.clone(),
            operator: operator.lexeme.clone(),
            value: value.lexeme.clone(),
            terminator: terminator.lexeme.clone(),
        }
    } else if cursor.leading_is("for") {
        let [keyword, _, init_var, _, init_value, _, cond_var, _, bound] =
            cursor.fields::<FOR_HEADER_LEN>()?;
        Statement::ForLoop {
            keyword: keyword.lexeme.clone(),
            init: Initialization {
                variable: init_var.lexeme.clone(),
                value: init_value.lexeme.clone(),
            },
            condition: Condition {
                variable: cond_var.lexeme.clone(),
                bound: bound.lexeme.clone(),
            },
        }
    } else {
        Statement::Unrecognized
    };
    trace!(?statement, "Parsed statement");
    Ok(statement)
}

pub fn build_tree(tokens: &[Token]) -> Result<TreeNode, AnalysisError> {
    parse_statement(tokens).map(|statement| statement.to_tree())
}

/// Draws the tree depth-first, one line per node, with ASCII connectors.
pub fn render_ascii(root: &TreeNode) -> String {
    let mut out = String::new();
    render_node(root, "", None, &mut out);
    out
}

fn render_node(node: &TreeNode, prefix: &str, is_last: Option<bool>, out: &mut String) {
    out.push_str(prefix);
    match is_last {
        Some(true) => out.push_str("+-- "),
        Some(false) => out.push_str("|-- "),
        None => {}
    }
    out.push_str(&node.label);
    out.push('\n');

    let child_prefix = match is_last {
        Some(true) => format!("{prefix}    "),
        Some(false) => format!("{prefix}|   "),
        None => String::new(),
    };
    let count = node.children.len();
    for (index, child) in node.children.iter().enumerate() {
        render_node(child, &child_prefix, Some(index + 1 == count), out);
    }
}
