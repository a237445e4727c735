use ruby_cst::{CstLoadError, CstNode};
use thiserror::Error;

/// Errors that abort a transformation run.
///
/// Every variant except [`TransformError::RootExpected`] carries the offending
/// raw node and its start line.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A raw node kind without a transformation case, under the strict policy
    #[error("Unknown node type: type={node_type}, start line: {line}")]
    UnrecognizedNodeKind {
        node_type: String,
        line: usize,
        node: Box<CstNode>,
    },

    /// The raw tree does not have the shape the transformation relies on
    #[error("Assertion failed: {message}, start line: {line}")]
    StructuralAssertionFailed {
        message: String,
        line: usize,
        node: Box<CstNode>,
    },

    /// A node kind that can never be a value was found in argument position
    #[error("Unknown node type in args: type={node_type}, start line: {line}")]
    UnrecognizedArgumentShape {
        node_type: String,
        line: usize,
        node: Box<CstNode>,
    },

    /// The tree handed to `tree_to_model` is not a program root
    #[error("Root expected but {node_type} found")]
    RootExpected { node_type: String },
}

impl TransformError {
    pub(crate) fn unrecognized(node: &CstNode) -> Self {
        TransformError::UnrecognizedNodeKind {
            node_type: node.node_type().to_string(),
            line: node.line(),
            node: Box::new(node.clone()),
        }
    }

    pub(crate) fn assertion(node: &CstNode, message: impl Into<String>) -> Self {
        TransformError::StructuralAssertionFailed {
            message: message.into(),
            line: node.line(),
            node: Box::new(node.clone()),
        }
    }

    /// Assertion failure for a node of an unexpected kind.
    pub(crate) fn kind_mismatch(node: &CstNode, expected: &str) -> Self {
        Self::assertion(
            node,
            format!("{expected} expected but {} found", node.node_type()),
        )
    }

    pub(crate) fn argument_shape(node: &CstNode) -> Self {
        TransformError::UnrecognizedArgumentShape {
            node_type: node.node_type().to_string(),
            line: node.line(),
            node: Box::new(node.clone()),
        }
    }

    /// The raw node the error is about, if any.
    pub fn node(&self) -> Option<&CstNode> {
        match self {
            TransformError::UnrecognizedNodeKind { node, .. }
            | TransformError::StructuralAssertionFailed { node, .. }
            | TransformError::UnrecognizedArgumentShape { node, .. } => Some(node.as_ref()),
            TransformError::RootExpected { .. } => None,
        }
    }

    /// Start line of the offending raw node, if any.
    pub fn line(&self) -> Option<usize> {
        self.node().map(CstNode::line)
    }
}

/// Errors of the JSON entry point: loading or transforming.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Load(#[from] CstLoadError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}
