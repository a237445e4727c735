//! # Ruby Metamodel Crate
//!
//! Converts the raw syntax tree of a Ruby program into a small, closed
//! metamodel that analysis tools traverse instead of the parser's tree.
//!
//! ## Architecture
//!
//! ```text
//! Ruby Source → external parser → Serialized CST (JSON) → ruby-cst (CstNode) → rubymm (ModelNode)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::TransformConfig;
//! use ruby_cst::build::*;
//! use rubymm::{tree_to_model, ModelNode};
//!
//! // puts 1
//! let tree = root(Some(newline(fcall("puts", Some(array(vec![fixnum(1)]))))));
//! let model = tree_to_model(&tree, &TransformConfig::default()).unwrap();
//! assert_eq!(
//!     model.root,
//!     Some(ModelNode::Call {
//!         name: "puts".into(),
//!         receiver: None,
//!         args: vec![ModelNode::int(1)],
//!         block_arg: None,
//!         implicit_receiver: true,
//!     })
//! );
//! ```
//!
//! ## Design Principles
//!
//! - **Closed Vocabulary**: every raw kind is matched exhaustively, unknown
//!   kinds go through an explicit policy
//! - **Owned Trees**: model nodes own their children, nothing points back
//!   into the raw tree
//! - **Explicit Configuration**: the policy travels with each call

pub mod diagnostic;
pub mod error;
pub mod model;
pub mod transform;

pub use diagnostic::Diagnostic;
pub use error::{ParseError, TransformError};
pub use model::{Block, Child, ClassDecl, Container, Def, ModelNode, ModuleDecl};
pub use transform::names::resolve_name;
pub use transform::{TransformResult, Transformer};

use config::constants::TransformConfig;
use ruby_cst::{CstKind, CstNode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Output of a transformation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelTree {
    /// The model of the program body; `None` for an empty program.
    pub root: Option<ModelNode>,
    /// Warnings about raw nodes skipped under the permissive policy.
    pub diagnostics: Vec<Diagnostic>,
}

/// Transforms a whole program.
///
/// # Errors
///
/// [`TransformError::RootExpected`] when `root` is not a `ROOTNODE`, or any
/// error raised while transforming its body.
pub fn tree_to_model(root: &CstNode, config: &TransformConfig) -> Result<ModelTree, TransformError> {
    let CstKind::RootNode { body } = &root.kind else {
        return Err(TransformError::RootExpected {
            node_type: root.node_type().to_string(),
        });
    };
    run(body.as_deref(), config)
}

/// Transforms any raw sub-tree.
///
/// # Errors
///
/// Any error raised while transforming `node`.
pub fn node_to_model(node: &CstNode, config: &TransformConfig) -> Result<ModelTree, TransformError> {
    run(Some(node), config)
}

/// Loads a serialized raw tree and transforms it as a whole program.
///
/// # Errors
///
/// [`ParseError::Load`] for malformed input, [`ParseError::Transform`] for
/// transformation failures.
pub fn parse_json(json: &str, config: &TransformConfig) -> Result<ModelTree, ParseError> {
    let root = ruby_cst::from_json(json)?;
    Ok(tree_to_model(&root, config)?)
}

fn run(node: Option<&CstNode>, config: &TransformConfig) -> Result<ModelTree, TransformError> {
    debug!(%config, "transforming syntax tree");
    let mut transformer = Transformer::new(config);
    let root = transformer.transform(node)?;
    let diagnostics = transformer.into_diagnostics();
    debug!(skipped = diagnostics.len(), "transformation finished");
    Ok(ModelTree { root, diagnostics })
}
