//! # Call Transformation
//!
//! The parser has three call shapes:
//!
//! - `CALLNODE`: explicit receiver, `a.foo(1)`
//! - `FCALLNODE`: no receiver but arguments or parentheses, `foo(1)`
//! - `VCALLNODE`: a bare identifier that may be a call, `foo`
//!
//! The block of a call arrives either as a `BLOCKPASSNODE` in argument
//! position (`foo(1, &blk)`) or as an attached `ITERNODE` (`foo { }`).

use super::Transformer;
use crate::error::TransformError;
use crate::model::{Child, ModelNode};
use ruby_cst::{CstKind, CstNode};

/// Arguments and block of a call.
struct CallArgs {
    args: Vec<ModelNode>,
    block_arg: Child,
}

/// `foo`: no receiver and no arguments.
pub(super) fn variable_call(name: &str) -> ModelNode {
    ModelNode::Call {
        name: name.to_string(),
        receiver: None,
        args: Vec::new(),
        block_arg: None,
        implicit_receiver: false,
    }
}

impl Transformer<'_> {
    /// `receiver.name(args) { block }`
    pub(super) fn call(
        &mut self,
        name: &str,
        receiver: Option<&CstNode>,
        args: Option<&CstNode>,
        iter: Option<&CstNode>,
    ) -> Result<ModelNode, TransformError> {
        let receiver = self.boxed(receiver)?;
        let CallArgs { args, block_arg } = self.call_args(args, iter)?;
        Ok(ModelNode::Call {
            name: name.to_string(),
            receiver,
            args,
            block_arg,
            implicit_receiver: false,
        })
    }

    /// `name(args) { block }` with the receiver left implicit.
    pub(super) fn function_call(
        &mut self,
        name: &str,
        args: Option<&CstNode>,
        iter: Option<&CstNode>,
    ) -> Result<ModelNode, TransformError> {
        let CallArgs { args, block_arg } = self.call_args(args, iter)?;
        Ok(ModelNode::Call {
            name: name.to_string(),
            receiver: None,
            args,
            block_arg,
            implicit_receiver: true,
        })
    }

    /// `super(args)`
    pub(super) fn super_call(
        &mut self,
        args: Option<&CstNode>,
        iter: Option<&CstNode>,
    ) -> Result<ModelNode, TransformError> {
        let CallArgs { args, block_arg } = self.call_args(args, iter)?;
        Ok(ModelNode::SuperCall { args, block_arg })
    }

    /// Splits a block pass out of the argument position. An attached
    /// iterator takes precedence over it.
    fn call_args(
        &mut self,
        args: Option<&CstNode>,
        iter: Option<&CstNode>,
    ) -> Result<CallArgs, TransformError> {
        let mut call_args = match args.map(|node| (node, &node.kind)) {
            Some((pass, CstKind::BlockPassNode { args, .. })) => CallArgs {
                block_arg: self.boxed(Some(pass))?,
                args: self.normalize_optional_args(args.as_deref())?,
            },
            _ => CallArgs {
                args: self.normalize_optional_args(args)?,
                block_arg: None,
            },
        };
        if iter.is_some() {
            call_args.block_arg = self.boxed(iter)?;
        }
        Ok(call_args)
    }
}
