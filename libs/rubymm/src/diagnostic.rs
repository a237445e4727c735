//! Warnings collected while transforming under the permissive policy.

use ruby_cst::CstNode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw node that was left out of the model, with its location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub node_type: String,
    pub line: usize,
    pub hint: Option<String>,
}

impl Diagnostic {
    /// Records that `node` was skipped.
    pub fn skipped(node: &CstNode) -> Self {
        Self {
            message: format!("skipping {} at {}", node.node_type(), node.position),
            node_type: node.node_type().to_string(),
            line: node.line(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning: {}", self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "; {hint}")?;
        }
        Ok(())
    }
}
