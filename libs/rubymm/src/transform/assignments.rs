//! # Assignment Transformation
//!
//! Element, attribute, logical and multiple assignments. Plain variable
//! assignments are handled directly by the dispatcher.

use super::Transformer;
use crate::error::TransformError;
use crate::model::{Child, ModelNode};
use ruby_cst::CstNode;

/// Method name the parser uses for `container[element] = value`.
const ELEMENT_SETTER: &str = "[]=";

impl Transformer<'_> {
    /// `container[element] op= value`
    pub(super) fn element_operation_assignment(
        &mut self,
        node: &CstNode,
        receiver: Option<&CstNode>,
        args: Option<&CstNode>,
        operator: &str,
        value: Option<&CstNode>,
    ) -> Result<ModelNode, TransformError> {
        let container = self.boxed(receiver)?;
        let indices = self.normalize_optional_args(args)?;
        if indices.len() > 1 {
            return Err(multiple_indices(node, indices.len()));
        }
        let element = indices.into_iter().next().map(Box::new);
        Ok(ModelNode::ElementOperationAssignment {
            container,
            element,
            value: self.boxed(value)?,
            operator: operator.to_string(),
        })
    }

    /// `container[element] = value` or `receiver.name = value`.
    ///
    /// The parser passes the assigned value as the last call argument.
    /// Only single-index element assignment has a model counterpart.
    pub(super) fn attribute_assignment(
        &mut self,
        node: &CstNode,
        receiver: Option<&CstNode>,
        name: &str,
        args: Option<&CstNode>,
    ) -> Result<ModelNode, TransformError> {
        let receiver = self.boxed(receiver)?;
        let args = self.normalize_optional_args(args)?;

        if name == ELEMENT_SETTER {
            if args.len() > 2 {
                return Err(multiple_indices(node, args.len() - 1));
            }
            let mut args = args.into_iter().map(Box::new);
            return Ok(ModelNode::ElementAssignment {
                container: receiver,
                element: args.next(),
                value: args.next(),
            });
        }

        Ok(ModelNode::AttributeAssignment {
            receiver,
            name_assigned: name.strip_suffix('=').unwrap_or(name).to_string(),
            value: args.into_iter().next().map(Box::new),
        })
    }

    /// `a ||= b` and `a &&= b`.
    ///
    /// The parser encodes the right side as a full assignment to the same
    /// target; only its value is kept.
    pub(super) fn logical_assignment(
        &mut self,
        node: &CstNode,
        first: &CstNode,
        second: &CstNode,
    ) -> Result<(Child, Child), TransformError> {
        let assigned = self.boxed(Some(first))?;
        let value = match self.transform_node(second)? {
            Some(model) => model.into_assigned_value().map_err(|found| {
                TransformError::assertion(
                    node,
                    format!("assignment expected as right operand but {found} found"),
                )
            })?,
            None => None,
        };
        Ok((assigned, value))
    }

    /// `a, *b, c = values`
    ///
    /// Targets keep their order with the rest target as a `Splat` between the
    /// leading and trailing ones. An array on the right is spread into
    /// `values`; an absent right side (block parameter destructuring) leaves
    /// `values` empty.
    pub(super) fn multiple_assignment(
        &mut self,
        pre: Option<&CstNode>,
        rest: Option<&CstNode>,
        post: Option<&CstNode>,
        value: Option<&CstNode>,
    ) -> Result<ModelNode, TransformError> {
        let mut assignments = self.normalize_optional_args(pre)?;
        if let Some(target) = self.transform(rest)? {
            assignments.push(target.into_splat());
        }
        assignments.extend(self.normalize_optional_args(post)?);

        let values = match self.transform(value)? {
            Some(ModelNode::ArrayLiteral { values }) => values,
            Some(single) => vec![single],
            None => Vec::new(),
        };
        Ok(ModelNode::MultipleAssignment {
            assignments,
            values,
        })
    }
}

fn multiple_indices(node: &CstNode, count: usize) -> TransformError {
    TransformError::assertion(
        node,
        format!("single index expected in element assignment but {count} found"),
    )
}

#[cfg(test)]
mod tests {
    use super::super::Transformer;
    use crate::error::TransformError;
    use crate::model::ModelNode;
    use config::constants::TransformConfig;
    use pretty_assertions::assert_eq;
    use ruby_cst::build::*;
    use ruby_cst::{CstKind, CstNode};

    fn transform(node: &CstNode) -> Result<Option<ModelNode>, TransformError> {
        let config = TransformConfig::default();
        Transformer::new(&config).transform_node(node)
    }

    fn boxed(model: ModelNode) -> Option<Box<ModelNode>> {
        Some(Box::new(model))
    }

    fn attr_assign(receiver: CstNode, name: &str, args: Vec<CstNode>) -> CstNode {
        CstNode::new(CstKind::AttrAssignNode {
            receiver: Some(Box::new(receiver)),
            name: name.to_string(),
            args: Some(Box::new(array(args))),
        })
    }

    fn masgn(
        pre: Option<CstNode>,
        rest: Option<CstNode>,
        post: Option<CstNode>,
        value: Option<CstNode>,
    ) -> CstNode {
        CstNode::new(CstKind::MultipleAsgn19Node {
            pre: pre.map(Box::new),
            rest: rest.map(Box::new),
            post: post.map(Box::new),
            value: value.map(Box::new),
        })
    }

    #[test]
    fn test_element_assignment() {
        // a[1] = 2
        let node = attr_assign(local_var("a"), "[]=", vec![fixnum(1), fixnum(2)]);
        assert_eq!(
            transform(&node).unwrap(),
            Some(ModelNode::ElementAssignment {
                container: boxed(ModelNode::local_var("a")),
                element: boxed(ModelNode::int(1)),
                value: boxed(ModelNode::int(2)),
            })
        );
    }

    #[test]
    fn test_element_assignment_without_args() {
        let node = CstNode::new(CstKind::AttrAssignNode {
            receiver: Some(Box::new(local_var("a"))),
            name: "[]=".to_string(),
            args: None,
        });
        assert_eq!(
            transform(&node).unwrap(),
            Some(ModelNode::ElementAssignment {
                container: boxed(ModelNode::local_var("a")),
                element: None,
                value: None,
            })
        );
    }

    #[test]
    fn test_element_assignment_rejects_multiple_indices() {
        // a[1, 2] = 3
        let node = attr_assign(local_var("a"), "[]=", vec![fixnum(1), fixnum(2), fixnum(3)]).at_line(7);
        let err = transform(&node).unwrap_err();
        assert!(matches!(
            err,
            TransformError::StructuralAssertionFailed { line: 7, .. }
        ));
        assert_eq!(
            err.to_string(),
            "Assertion failed: single index expected in element assignment but 2 found, start line: 7"
        );
    }

    #[test]
    fn test_attribute_assignment_strips_setter_suffix() {
        // a.name = 'x'
        let node = attr_assign(local_var("a"), "name=", vec![string("x")]);
        assert_eq!(
            transform(&node).unwrap(),
            Some(ModelNode::AttributeAssignment {
                receiver: boxed(ModelNode::local_var("a")),
                name_assigned: "name".to_string(),
                value: boxed(ModelNode::string("x")),
            })
        );
    }

    #[test]
    fn test_or_assignment_keeps_assigned_value() {
        // a ||= 1
        let node = CstNode::new(CstKind::OpAsgnOrNode {
            first: Box::new(local_var("a")),
            second: Box::new(local_asgn("a", Some(fixnum(1)))),
        });
        assert_eq!(
            transform(&node).unwrap(),
            Some(ModelNode::OrAssignment {
                assigned: boxed(ModelNode::local_var("a")),
                value: boxed(ModelNode::int(1)),
            })
        );
    }

    #[test]
    fn test_and_assignment_on_instance_variable() {
        // @a &&= 1
        let node = CstNode::new(CstKind::OpAsgnAndNode {
            first: Box::new(inst_var(var_name("a"))),
            second: Box::new(inst_asgn(var_name("a"), fixnum(1))),
        });
        assert_eq!(
            transform(&node).unwrap(),
            Some(ModelNode::AndAssignment {
                assigned: boxed(ModelNode::InstanceVarAccess { name: "a".into() }),
                value: boxed(ModelNode::int(1)),
            })
        );
    }

    #[test]
    fn test_or_assignment_rejects_non_assignment_operand() {
        let node = CstNode::new(CstKind::OpAsgnOrNode {
            first: Box::new(local_var("a")),
            second: Box::new(fixnum(1)),
        })
        .at_line(7);
        let err = transform(&node).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Assertion failed: assignment expected as right operand but IntLiteral found, start line: 7"
        );
    }

    #[test]
    fn test_multiple_assignment_spreads_array() {
        // a, b = 1, 2
        let node = masgn(
            Some(list(vec![local_asgn("a", None), local_asgn("b", None)])),
            None,
            None,
            Some(array(vec![fixnum(1), fixnum(2)])),
        );
        let local = |name: &str| ModelNode::LocalVarAssignment {
            name_assigned: name.to_string(),
            value: None,
        };
        assert_eq!(
            transform(&node).unwrap(),
            Some(ModelNode::MultipleAssignment {
                assignments: vec![local("a"), local("b")],
                values: vec![ModelNode::int(1), ModelNode::int(2)],
            })
        );
    }

    #[test]
    fn test_multiple_assignment_with_rest_and_post() {
        // a, *b, c = x
        let node = masgn(
            Some(list(vec![local_asgn("a", None)])),
            Some(local_asgn("b", None)),
            Some(list(vec![local_asgn("c", None)])),
            Some(local_var("x")),
        );
        let local = |name: &str| ModelNode::LocalVarAssignment {
            name_assigned: name.to_string(),
            value: None,
        };
        assert_eq!(
            transform(&node).unwrap(),
            Some(ModelNode::MultipleAssignment {
                assignments: vec![local("a"), ModelNode::splat(local("b")), local("c")],
                values: vec![ModelNode::local_var("x")],
            })
        );
    }

    #[test]
    fn test_multiple_assignment_with_anonymous_star() {
        // a, * = x
        let node = masgn(
            Some(list(vec![local_asgn("a", None)])),
            Some(CstNode::new(CstKind::StarNode {})),
            None,
            Some(local_var("x")),
        );
        let Some(ModelNode::MultipleAssignment { assignments, .. }) = transform(&node).unwrap()
        else {
            panic!("Expected MultipleAssignment");
        };
        assert_eq!(assignments[1], ModelNode::Splat { splatted: None });
    }

    #[test]
    fn test_block_parameter_destructuring_has_no_values() {
        let node = masgn(Some(list(vec![dasgn("k", None), dasgn("v", None)])), None, None, None);
        let Some(ModelNode::MultipleAssignment { assignments, values }) =
            transform(&node).unwrap()
        else {
            panic!("Expected MultipleAssignment");
        };
        assert_eq!(assignments.len(), 2);
        assert!(values.is_empty());
    }

    #[test]
    fn test_element_operation_assignment() {
        // a[0] += 1
        let node = CstNode::new(CstKind::OpElementAsgnNode {
            receiver: Some(Box::new(local_var("a"))),
            args: Some(Box::new(array(vec![fixnum(0)]))),
            operator_name: "+".to_string(),
            value: Some(Box::new(fixnum(1))),
        });
        assert_eq!(
            transform(&node).unwrap(),
            Some(ModelNode::ElementOperationAssignment {
                container: boxed(ModelNode::local_var("a")),
                element: boxed(ModelNode::int(0)),
                value: boxed(ModelNode::int(1)),
                operator: "+".to_string(),
            })
        );
    }

    #[test]
    fn test_element_operation_assignment_rejects_multiple_indices() {
        // a[0, 1] += 1
        let node = CstNode::new(CstKind::OpElementAsgnNode {
            receiver: Some(Box::new(local_var("a"))),
            args: Some(Box::new(array(vec![fixnum(0), fixnum(1)]))),
            operator_name: "+".to_string(),
            value: Some(Box::new(fixnum(1))),
        });
        assert!(matches!(
            transform(&node),
            Err(TransformError::StructuralAssertionFailed { .. })
        ));
    }
}
