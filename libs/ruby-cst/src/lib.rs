//! # Ruby CST Crate
//!
//! The raw (concrete) syntax tree of a Ruby program, exactly as a JRuby-style
//! parser shapes it. The tree is produced outside this workspace and handed
//! over serialized; this crate is the data contract for that hand-over.
//!
//! ## Architecture
//!
//! ```text
//! Ruby Source → external parser → Serialized CST (JSON) → ruby-cst (CstNode) → rubymm (metamodel)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use ruby_cst::{from_json, CstKind};
//!
//! let json = r#"{ "type": "ROOTNODE", "body": { "type": "FIXNUMNODE", "value": 1 } }"#;
//! let root = from_json(json).unwrap();
//! assert_eq!(root.node_type(), "ROOTNODE");
//! assert!(matches!(root.kind, CstKind::RootNode { body: Some(_) }));
//! ```
//!
//! Trees can also be written in code with the [`build`] helpers.

pub mod build;
mod error;
mod node;
mod position;

pub use error::CstLoadError;
pub use node::{CstKind, CstNode, VarName};
pub use position::SourcePosition;

/// Loads a serialized raw tree.
///
/// # Errors
///
/// Returns [`CstLoadError::Json`] when the text is not valid JSON or a node
/// of a modelled kind lacks a required field. Unlisted node types load as
/// [`CstKind::Unrecognized`].
pub fn from_json(json: &str) -> Result<CstNode, CstLoadError> {
    Ok(serde_json::from_str(json)?)
}

/// Loads a serialized raw tree from any reader.
///
/// # Errors
///
/// Returns [`CstLoadError::Json`] on I/O or decoding failure.
pub fn from_reader<R: std::io::Read>(reader: R) -> Result<CstNode, CstLoadError> {
    Ok(serde_json::from_reader(reader)?)
}
