//! # Argument List Normalization
//!
//! Turns every raw shape of "a list of expressions, possibly with a splat"
//! into one ordered sequence of model nodes:
//!
//! | Raw shape                         | Result                                  |
//! |-----------------------------------|-----------------------------------------|
//! | `ARRAYNODE` / `LISTNODE`          | each element, in order                  |
//! | `ARGSNODE`                        | pre, optional, rest, post, then block   |
//! | `ARGSCATNODE` / `ARGSPUSHNODE`    | leading, splat, trailing                |
//! | any other value                   | the single transformed node             |
//!
//! The `&block` parameter is not one of the four formal segments. It is
//! appended after them so a definition's argument list keeps every declared
//! parameter, ending in a [`ModelNode::BlockReference`].
//!
//! ## Concatenation Shapes
//!
//! The parser encodes a splat in the middle of an argument list with nested
//! pairs rather than a flat list. `f(1, *xs, 2)` arrives as:
//!
//! ```text
//! ARGSPUSHNODE
//! ├── first   ARGSCATNODE
//! │           ├── first   ARRAYNODE [1]
//! │           └── second  LOCALVARNODE xs     (splatted)
//! └── second  FIXNUMNODE 2
//! ```
//!
//! and normalizes to `[1, Splat(xs), 2]`.

use super::Transformer;
use crate::error::TransformError;
use crate::model::ModelNode;
use ruby_cst::{CstKind, CstNode};

/// A concatenation shape split into its three groups.
#[derive(Debug, Default, PartialEq)]
struct RhsParts<'a> {
    /// Items before the splat.
    leading: Vec<&'a CstNode>,
    /// The splatted value, if the shape has one.
    middle: Option<&'a CstNode>,
    /// Items after the splat.
    trailing: Vec<&'a CstNode>,
}

/// Splits an `ARGSCATNODE`/`ARGSPUSHNODE` into leading items, splatted
/// value and trailing items.
fn flatten_rhs_values(node: &CstNode) -> RhsParts<'_> {
    match &node.kind {
        CstKind::ArgsCatNode { first, second } => RhsParts {
            leading: group_items(first),
            middle: Some(second),
            trailing: Vec::new(),
        },
        CstKind::ArgsPushNode { first, second } => {
            let mut parts = match &first.kind {
                CstKind::ArgsCatNode { .. } | CstKind::ArgsPushNode { .. } => {
                    flatten_rhs_values(first)
                }
                CstKind::SplatNode { .. } => RhsParts {
                    middle: Some(first),
                    ..RhsParts::default()
                },
                _ => RhsParts {
                    leading: group_items(first),
                    ..RhsParts::default()
                },
            };
            parts.trailing.push(second);
            parts
        }
        _ => RhsParts {
            leading: vec![node],
            ..RhsParts::default()
        },
    }
}

/// Elements of a list-like node, or the node itself.
fn group_items(node: &CstNode) -> Vec<&CstNode> {
    match node.list_elements() {
        Some(elements) => elements.iter().collect(),
        None => vec![node],
    }
}

impl Transformer<'_> {
    /// Normalizes an argument-like raw node into an ordered sequence.
    ///
    /// ## Errors
    ///
    /// [`TransformError::UnrecognizedArgumentShape`] for node kinds that are
    /// never values (`ROOTNODE`, `WHENNODE`, `RESCUEBODYNODE`), plus any
    /// error raised while transforming the elements.
    pub fn normalize_args(&mut self, node: &CstNode) -> Result<Vec<ModelNode>, TransformError> {
        match &node.kind {
            CstKind::ArrayNode { elements } | CstKind::ListNode { elements } => {
                self.transform_list(elements)
            }
            CstKind::ArgsNode {
                pre,
                optional,
                rest,
                post,
                block,
            } => {
                let mut args = Vec::new();
                // `block` trails the four formal segments
                for segment in [pre, optional, rest, post, block] {
                    args.extend(self.normalize_optional_args(segment.as_deref())?);
                }
                Ok(args)
            }
            CstKind::ArgsCatNode { .. } | CstKind::ArgsPushNode { .. } => {
                self.normalize_concatenation(node)
            }
            CstKind::RootNode { .. } | CstKind::WhenNode { .. } | CstKind::RescueBodyNode { .. } => {
                Err(TransformError::argument_shape(node))
            }
            _ => Ok(self.transform_node(node)?.into_iter().collect()),
        }
    }

    /// Like [`Transformer::normalize_args`], with an absent node giving an
    /// empty sequence.
    pub(crate) fn normalize_optional_args(
        &mut self,
        node: Option<&CstNode>,
    ) -> Result<Vec<ModelNode>, TransformError> {
        match node {
            Some(node) => self.normalize_args(node),
            None => Ok(Vec::new()),
        }
    }

    fn normalize_concatenation(&mut self, node: &CstNode) -> Result<Vec<ModelNode>, TransformError> {
        let RhsParts {
            leading,
            middle,
            trailing,
        } = flatten_rhs_values(node);

        let mut args = self.normalize_group(&leading)?;
        if let Some(middle) = middle {
            match middle.list_elements() {
                // a literal list in splat position needs no explicit splat
                Some(elements) => args.extend(self.transform_list(elements)?),
                None => args.extend(self.transform_node(middle)?.map(ModelNode::into_splat)),
            }
        }
        args.extend(self.normalize_group(&trailing)?);
        Ok(args)
    }

    /// Transforms the items of one group. A nested concatenation is
    /// normalized in place so its own splat is kept.
    fn normalize_group(&mut self, items: &[&CstNode]) -> Result<Vec<ModelNode>, TransformError> {
        let mut args = Vec::with_capacity(items.len());
        for item in items {
            if item.is_concatenation() {
                args.extend(self.normalize_args(item)?);
            } else {
                args.extend(self.transform_node(item)?);
            }
        }
        Ok(args)
    }

    /// `name = default`; the parser stores the default as an assignment.
    pub(super) fn optional_argument(&mut self, value: &CstNode) -> Result<ModelNode, TransformError> {
        match &value.kind {
            CstKind::LocalAsgnNode { name, value } | CstKind::DAsgnNode { name, value } => {
                Ok(ModelNode::Argument {
                    name: name.clone(),
                    default_value: self.boxed(value.as_deref())?,
                })
            }
            _ => Err(TransformError::kind_mismatch(value, "LOCALASGNNODE")),
        }
    }
}
