//! # Literal Transformation
//!
//! Interpolated strings and regular expressions, and hash literals.

use super::Transformer;
use crate::error::TransformError;
use crate::model::ModelNode;
use ruby_cst::CstNode;

/// A regular expression without interpolation.
pub(super) fn regexp(value: &str) -> ModelNode {
    ModelNode::RegExpLiteral {
        value: Some(value.to_string()),
        dynamic: false,
        pieces: Vec::new(),
    }
}

impl Transformer<'_> {
    /// `"a#{b}c"`: no `value`, the pieces in source order.
    pub(super) fn dynamic_string(&mut self, pieces: &[CstNode]) -> Result<ModelNode, TransformError> {
        Ok(ModelNode::StringLiteral {
            value: None,
            dynamic: true,
            pieces: self.transform_list(pieces)?,
        })
    }

    pub(super) fn dynamic_regexp(&mut self, pieces: &[CstNode]) -> Result<ModelNode, TransformError> {
        Ok(ModelNode::RegExpLiteral {
            value: None,
            dynamic: true,
            pieces: self.transform_list(pieces)?,
        })
    }

    /// Builds the pairs of a hash literal from the parser's flat
    /// `key, value, key, value` list.
    ///
    /// ## Example CST
    ///
    /// ```text
    /// HASHNODE
    /// └── LISTNODE
    ///     ├── SYMBOLNODE "a"   (key)
    ///     ├── FIXNUMNODE 1     (value)
    ///     ├── SYMBOLNODE "b"   (key)
    ///     └── FIXNUMNODE 2     (value)
    /// ```
    pub(super) fn hash_literal(
        &mut self,
        node: &CstNode,
        list: Option<&CstNode>,
    ) -> Result<ModelNode, TransformError> {
        let Some(list) = list else {
            return Ok(ModelNode::HashLiteral { pairs: Vec::new() });
        };
        let elements = list
            .list_elements()
            .ok_or_else(|| TransformError::kind_mismatch(list, "LISTNODE"))?;
        if elements.len() % 2 != 0 {
            return Err(TransformError::assertion(
                node,
                format!("hash with an odd number of elements ({})", elements.len()),
            ));
        }

        let mut pairs = Vec::with_capacity(elements.len() / 2);
        for pair in elements.chunks_exact(2) {
            pairs.push(ModelNode::HashPair {
                key: self.boxed(Some(&pair[0]))?,
                value: self.boxed(Some(&pair[1]))?,
            });
        }
        Ok(ModelNode::HashLiteral { pairs })
    }
}
