//! Splicing transformed bodies into container content lists.

use super::Transformer;
use crate::error::TransformError;
use crate::model::{Container, ModelNode};
use ruby_cst::CstNode;

impl Transformer<'_> {
    /// Transforms `body` and appends it to the container's contents.
    ///
    /// A `Block` result is spliced element by element so containers never
    /// hold a nested block; an absent result appends nothing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use config::constants::TransformConfig;
    /// use ruby_cst::build::*;
    /// use rubymm::{Block, Container, Transformer};
    ///
    /// let config = TransformConfig::default();
    /// let mut transformer = Transformer::new(&config);
    /// let body = block(vec![fixnum(1), fixnum(2), fixnum(3)]);
    /// let mut target = Block::default();
    /// transformer.body_node_to_contents(Some(&body), &mut target).unwrap();
    /// assert_eq!(target.contents().len(), 3);
    /// ```
    pub fn body_node_to_contents(
        &mut self,
        body: Option<&CstNode>,
        container: &mut impl Container,
    ) -> Result<(), TransformError> {
        match self.transform(body)? {
            Some(ModelNode::Block(block)) => container.contents_mut().extend(block.contents),
            Some(model) => container.contents_mut().push(model),
            None => {}
        }
        Ok(())
    }
}
