//! # Protected Bodies
//!
//! `begin` blocks, method bodies and inline `rescue` share one raw shape:
//!
//! ```text
//! ENSURENODE              (optional)
//! ├── RESCUENODE          (optional)
//! │   ├── body            protected statements
//! │   ├── RESCUEBODYNODE  first clause, chained through opt_rescue
//! │   └── else_node
//! └── ensure
//! ```
//!
//! The wrappers are lifted into fields of the owning model node instead of
//! being nested as blocks.

use super::Transformer;
use crate::error::TransformError;
use crate::model::{Child, ModelNode};
use ruby_cst::{CstKind, CstNode};

/// Body of a `begin` block or method, with its rescue and ensure parts.
#[derive(Debug, Default)]
pub(super) struct ProtectedBody {
    pub(super) body: Child,
    pub(super) rescue_clauses: Vec<ModelNode>,
    pub(super) else_body: Child,
    pub(super) ensure_body: Child,
}

impl Transformer<'_> {
    /// Unwraps the ensure and rescue wrappers around a body.
    ///
    /// Only a wrapper that is the direct body child is lifted. A wrapper
    /// behind a `NEWLINENODE` is a `stmt rescue value` statement and stays
    /// a [`ModelNode::RescueStatement`].
    pub(super) fn protected_body(
        &mut self,
        node: Option<&CstNode>,
    ) -> Result<ProtectedBody, TransformError> {
        let mut protected = ProtectedBody::default();
        let mut current = node;

        if let Some(CstNode {
            kind: CstKind::EnsureNode { body, ensure },
            ..
        }) = current
        {
            protected.ensure_body = self.boxed(ensure.as_deref())?;
            current = body.as_deref();
        }

        let Some(node) = current else {
            return Ok(protected);
        };
        match &node.kind {
            CstKind::RescueNode {
                body,
                rescue_node,
                else_node,
            } => {
                protected.body = self.boxed(body.as_deref())?;
                protected.rescue_clauses = self.rescue_clauses(node, rescue_node.as_deref())?;
                protected.else_body = self.boxed(else_node.as_deref())?;
            }
            _ => protected.body = self.boxed(Some(node))?,
        }
        Ok(protected)
    }

    /// `begin ... end`, with or without rescue and ensure parts.
    pub(super) fn begin_end_block(
        &mut self,
        body: Option<&CstNode>,
    ) -> Result<ModelNode, TransformError> {
        let ProtectedBody {
            body,
            rescue_clauses,
            else_body,
            ensure_body,
        } = self.protected_body(body)?;
        Ok(ModelNode::BeginEndBlock {
            body,
            rescue_clauses,
            else_body,
            ensure_body,
        })
    }

    /// `body rescue value`
    pub(super) fn inline_rescue(
        &mut self,
        node: &CstNode,
        body: Option<&CstNode>,
        rescue_body: Option<&CstNode>,
    ) -> Result<ModelNode, TransformError> {
        let rescue_body = expect_rescue_body(node, rescue_body)?;
        let CstKind::RescueBodyNode { body: value, .. } = &rescue_body.kind else {
            return Err(TransformError::kind_mismatch(rescue_body, "RESCUEBODYNODE"));
        };
        Ok(ModelNode::RescueStatement {
            body: self.boxed(body)?,
            value: self.boxed(value.as_deref())?,
        })
    }

    /// `rescue A, B => e; body`
    pub(super) fn rescue_clause(
        &mut self,
        exceptions: Option<&CstNode>,
        body: Option<&CstNode>,
    ) -> Result<ModelNode, TransformError> {
        Ok(ModelNode::RescueClause {
            exceptions: self.normalize_optional_args(exceptions)?,
            body: self.boxed(body)?,
        })
    }

    /// Follows the chain of rescue-body markers, one clause per marker.
    fn rescue_clauses(
        &mut self,
        owner: &CstNode,
        first: Option<&CstNode>,
    ) -> Result<Vec<ModelNode>, TransformError> {
        let mut clauses = Vec::new();
        let mut marker = Some(expect_rescue_body(owner, first)?);
        while let Some(node) = marker {
            let CstKind::RescueBodyNode {
                exception_nodes,
                body,
                opt_rescue,
            } = &node.kind
            else {
                return Err(TransformError::kind_mismatch(node, "RESCUEBODYNODE"));
            };
            clauses.push(self.rescue_clause(exception_nodes.as_deref(), body.as_deref())?);
            marker = opt_rescue.as_deref();
        }
        Ok(clauses)
    }
}

/// The rescue marker every `RESCUENODE` must carry.
fn expect_rescue_body<'a>(
    owner: &CstNode,
    marker: Option<&'a CstNode>,
) -> Result<&'a CstNode, TransformError> {
    marker.ok_or_else(|| {
        TransformError::assertion(owner, "RESCUEBODYNODE expected but nothing found")
    })
}
