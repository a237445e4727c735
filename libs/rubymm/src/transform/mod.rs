//! # CST to Metamodel Transformation
//!
//! Recursive descent over the raw tree. [`Transformer::transform_node`]
//! matches every raw node kind exhaustively; the families with more than a
//! line of logic live in the sibling modules:
//!
//! - `literals`: string, regular expression and hash literals
//! - `assignments`: compound, logical and multiple assignment
//! - `control_flow`: `begin` blocks, rescue clauses and protected bodies
//! - `calls`: method calls and `super`
//! - `declarations`: methods, classes and modules
//! - `arguments`: the argument list normalizer and optional parameters
//! - `contents`: splicing bodies into containers
//! - `names`: variable names across parser versions
//!
//! ## Example
//!
//! ```rust
//! use config::constants::TransformConfig;
//! use ruby_cst::build::*;
//! use rubymm::{ModelNode, Transformer};
//!
//! let config = TransformConfig::default();
//! let mut transformer = Transformer::new(&config);
//! let model = transformer.transform_node(&if_(fixnum(1), Some(fixnum(2)), None)).unwrap();
//! assert_eq!(model.map(|m| m.kind_name()), Some("IfStatement"));
//! ```

mod arguments;
mod assignments;
mod calls;
mod contents;
mod control_flow;
mod declarations;
mod literals;
pub(crate) mod names;

use crate::diagnostic::Diagnostic;
use crate::error::TransformError;
use crate::model::{Block, Child, ModelNode};
use config::constants::{
    TransformConfig, CLASS_VAR_SIGIL_LEN, GLOBAL_VAR_SIGIL_LEN, INSTANCE_VAR_SIGIL_LEN,
};
use names::resolve_name;
use ruby_cst::{CstKind, CstNode};
use tracing::{trace, warn};

/// Result of transforming one raw node: a model node, or nothing.
pub type TransformResult = Result<Option<ModelNode>, TransformError>;

/// State of one transformation run.
///
/// The configuration is borrowed for the whole run; diagnostics collected in
/// permissive mode are handed back with [`Transformer::into_diagnostics`].
#[derive(Debug)]
pub struct Transformer<'c> {
    config: &'c TransformConfig,
    diagnostics: Vec<Diagnostic>,
}

// =============================================================================
// PUBLIC API
// =============================================================================

impl<'c> Transformer<'c> {
    pub fn new(config: &'c TransformConfig) -> Self {
        Self {
            config,
            diagnostics: Vec::new(),
        }
    }

    /// Transforms an optional raw node. Absence stays absence.
    pub fn transform(&mut self, node: Option<&CstNode>) -> TransformResult {
        match node {
            Some(node) => self.transform_node(node),
            None => Ok(None),
        }
    }

    /// Transforms one raw node into at most one model node.
    ///
    /// ## Returns
    ///
    /// - `Ok(Some(_))` for every kind with a model counterpart
    /// - `Ok(None)` for implicit-nil markers, empty wrappers, and unknown
    ///   kinds skipped under the permissive policy
    ///
    /// ## Errors
    ///
    /// Unknown kinds under the strict policy, and raw shapes the
    /// transformation cannot make sense of.
    pub fn transform_node(&mut self, node: &CstNode) -> TransformResult {
        use CstKind as K;

        trace!(node_type = node.node_type(), line = node.line(), "transform");
        let model = match &node.kind {
            // =================================================================
            // STRUCTURE
            // =================================================================
            K::RootNode { .. } | K::ArgsNode { .. } | K::ListNode { .. } => {
                return Err(TransformError::assertion(
                    node,
                    format!("{} found in value position", node.node_type()),
                ))
            }
            K::NewlineNode { next_node } => return self.transform(next_node.as_deref()),
            K::EvStrNode { body } => return self.transform(body.as_deref()),
            K::NilImplicitNode {} => return Ok(None),
            K::BlockNode { statements } => ModelNode::Block(Block {
                contents: self.transform_list(statements)?,
            }),

            // =================================================================
            // LITERALS
            // =================================================================
            K::FloatNode { value } => ModelNode::float(*value),
            K::FixnumNode { value } => ModelNode::int(*value),
            K::StrNode { value } => ModelNode::string(value.as_str()),
            K::DStrNode { pieces } => self.dynamic_string(pieces)?,
            K::RegexpNode { value } => literals::regexp(value),
            K::DRegexpNode { pieces } => self.dynamic_regexp(pieces)?,
            K::NilNode {} => ModelNode::NilLiteral,
            K::TrueNode {} => ModelNode::BooleanLiteral { value: true },
            K::FalseNode {} => ModelNode::BooleanLiteral { value: false },
            K::SymbolNode { name } => ModelNode::symbol(name.as_str()),

            // =================================================================
            // VARIABLES
            // =================================================================
            K::LocalVarNode { name } => ModelNode::local_var(name.as_str()),
            K::DVarNode { name } => ModelNode::BlockVarAccess { name: name.clone() },
            K::GlobalVarNode(var) => ModelNode::GlobalVarAccess {
                name: resolve_name(var, GLOBAL_VAR_SIGIL_LEN),
            },
            K::ClassVarNode(var) => ModelNode::ClassVarAccess {
                name: resolve_name(var, CLASS_VAR_SIGIL_LEN),
            },
            K::InstVarNode(var) => ModelNode::InstanceVarAccess {
                name: resolve_name(var, INSTANCE_VAR_SIGIL_LEN),
            },
            K::NthRefNode { match_number } => ModelNode::NthGroupReference {
                number: *match_number,
            },
            K::LocalAsgnNode { name, value } => ModelNode::LocalVarAssignment {
                name_assigned: name.clone(),
                value: self.boxed(value.as_deref())?,
            },
            K::DAsgnNode { name, value } => ModelNode::BlockVarAssignment {
                name_assigned: name.clone(),
                value: self.boxed(value.as_deref())?,
            },
            K::GlobalAsgnNode { var, value } => ModelNode::GlobalVarAssignment {
                name_assigned: resolve_name(var, GLOBAL_VAR_SIGIL_LEN),
                value: self.boxed(value.as_deref())?,
            },
            K::ClassVarAsgnNode { var, value } | K::ClassVarDeclNode { var, value } => {
                ModelNode::ClassVarAssignment {
                    name_assigned: resolve_name(var, CLASS_VAR_SIGIL_LEN),
                    value: self.boxed(value.as_deref())?,
                }
            }
            K::InstAsgnNode { var, value } => ModelNode::InstanceVarAssignment {
                name_assigned: resolve_name(var, INSTANCE_VAR_SIGIL_LEN),
                value: self.boxed(value.as_deref())?,
            },

            // =================================================================
            // CONSTANTS
            // =================================================================
            K::ConstNode { name } => ModelNode::Constant {
                name: name.clone(),
                container: None,
            },
            K::Colon2Node { left_node, name } => ModelNode::Constant {
                name: name.clone(),
                container: self.boxed(left_node.as_deref())?,
            },
            K::Colon3Node { name } => ModelNode::GlobalScopeReference { name: name.clone() },
            K::ConstDeclNode { name, value } => ModelNode::ConstantDecl {
                name: name.clone(),
                value: self.boxed(value.as_deref())?,
            },

            // =================================================================
            // COMPOUND ASSIGNMENTS
            // =================================================================
            K::OpElementAsgnNode {
                receiver,
                args,
                operator_name,
                value,
            } => self.element_operation_assignment(
                node,
                receiver.as_deref(),
                args.as_deref(),
                operator_name,
                value.as_deref(),
            )?,
            K::AttrAssignNode {
                receiver,
                name,
                args,
            } => self.attribute_assignment(node, receiver.as_deref(), name, args.as_deref())?,
            K::OpAsgnOrNode { first, second } => {
                let (assigned, value) = self.logical_assignment(node, first, second)?;
                ModelNode::OrAssignment { assigned, value }
            }
            K::OpAsgnAndNode { first, second } => {
                let (assigned, value) = self.logical_assignment(node, first, second)?;
                ModelNode::AndAssignment { assigned, value }
            }
            K::OpAsgnNode {
                receiver,
                variable_name,
                operator_name,
                value,
            } => ModelNode::OperatorAssignment {
                container: self.boxed(receiver.as_deref())?,
                element_name: variable_name.clone(),
                operator_name: operator_name.clone(),
                value: self.boxed(value.as_deref())?,
            },
            K::MultipleAsgnNode {
                pre,
                rest,
                post,
                value,
            }
            | K::MultipleAsgn19Node {
                pre,
                rest,
                post,
                value,
            } => self.multiple_assignment(
                pre.as_deref(),
                rest.as_deref(),
                post.as_deref(),
                value.as_deref(),
            )?,
            K::StarNode {} => ModelNode::Splat { splatted: None },

            // =================================================================
            // CONTROL FLOW
            // =================================================================
            K::IfNode {
                condition,
                then_body,
                else_body,
            } => ModelNode::IfStatement {
                condition: self.boxed(condition.as_deref())?,
                then_body: self.boxed(then_body.as_deref())?,
                else_body: self.boxed(else_body.as_deref())?,
            },
            K::WhileNode { condition, body } => ModelNode::WhileStatement {
                condition: self.boxed(condition.as_deref())?,
                body: self.boxed(body.as_deref())?,
            },
            K::UntilNode { condition, body } => ModelNode::UntilStatement {
                condition: self.boxed(condition.as_deref())?,
                body: self.boxed(body.as_deref())?,
            },
            K::CaseNode {
                case_node,
                cases,
                else_node,
            } => ModelNode::CaseStatement {
                subject: self.boxed(case_node.as_deref())?,
                when_clauses: self.transform_list(cases)?,
                else_body: self.boxed(else_node.as_deref())?,
            },
            K::WhenNode { expression, body } => ModelNode::WhenClause {
                condition: self.boxed(expression.as_deref())?,
                body: self.boxed(body.as_deref())?,
            },
            K::BeginNode { body } => self.begin_end_block(body.as_deref())?,
            K::EnsureNode { .. } => self.begin_end_block(Some(node))?,
            K::RescueNode {
                body, rescue_node, ..
            } => self.inline_rescue(node, body.as_deref(), rescue_node.as_deref())?,
            K::RescueBodyNode {
                exception_nodes,
                body,
                ..
            } => self.rescue_clause(exception_nodes.as_deref(), body.as_deref())?,
            K::BreakNode { value } => ModelNode::BreakStatement {
                value: self.boxed(value.as_deref())?,
            },
            K::NextNode { value } => ModelNode::NextStatement {
                value: self.boxed(value.as_deref())?,
            },
            K::ReturnNode { value } => ModelNode::Return {
                value: self.boxed(value.as_deref())?,
            },
            K::YieldNode { args } => ModelNode::YieldStatement {
                args: self.normalize_optional_args(args.as_deref())?,
            },
            K::AliasNode { old_name, new_name } => ModelNode::AliasStatement {
                old_name: self.boxed(Some(old_name))?,
                new_name: self.boxed(Some(new_name))?,
            },
            K::UndefNode { name } => ModelNode::UndefStatement {
                name: self.boxed(Some(name))?,
            },
            K::DefinedNode { expression } => ModelNode::IsDefined {
                value: self.boxed(Some(expression))?,
            },
            K::AndNode { first, second } => ModelNode::AndOperator {
                left: self.boxed(Some(first))?,
                right: self.boxed(Some(second))?,
            },
            K::OrNode { first, second } => ModelNode::OrOperator {
                left: self.boxed(Some(first))?,
                right: self.boxed(Some(second))?,
            },
            K::NotNode { condition } => ModelNode::UnaryOperation {
                value: self.boxed(Some(condition))?,
                operator_name: "!".to_string(),
            },

            // =================================================================
            // CALLS
            // =================================================================
            K::CallNode {
                receiver,
                name,
                args,
                iter,
            } => self.call(name, receiver.as_deref(), args.as_deref(), iter.as_deref())?,
            K::FCallNode { name, args, iter } => {
                self.function_call(name, args.as_deref(), iter.as_deref())?
            }
            K::VCallNode { name } => calls::variable_call(name),
            K::SuperNode { args, iter } => self.super_call(args.as_deref(), iter.as_deref())?,
            K::ZSuperNode { iter } => ModelNode::CallToSuper {
                block_arg: self.boxed(iter.as_deref())?,
            },
            K::UnaryCallNode {
                receiver,
                lexical_name,
            } => ModelNode::UnaryOperation {
                value: self.boxed(Some(receiver))?,
                operator_name: lexical_name.clone(),
            },
            K::Match3Node { receiver, value } => ModelNode::RegexMatcher {
                checked_value: self.boxed(Some(value))?,
                regex: self.boxed(Some(receiver))?,
            },
            K::SelfNode {} => ModelNode::SelfReference,
            K::DotNode {
                begin_node,
                end_node,
                exclusive,
            } => ModelNode::Range {
                lower: self.boxed(begin_node.as_deref())?,
                upper: self.boxed(end_node.as_deref())?,
                exclusive: *exclusive,
            },
            K::LiteralNode { name } => ModelNode::literal_ref(name.as_str()),
            K::IterNode { var_node, body } => ModelNode::CodeBlock {
                args: self.normalize_optional_args(var_node.as_deref())?,
                body: self.boxed(body.as_deref())?,
            },
            K::BlockPassNode { body, .. } => ModelNode::BlockReference {
                value: self.boxed(body.as_deref())?,
            },

            // =================================================================
            // DEFINITIONS
            // =================================================================
            K::DefnNode {
                name,
                args_node,
                body,
            } => self.method_definition(name, args_node.as_deref(), body.as_deref())?,
            K::DefsNode {
                receiver,
                name,
                args_node,
                body,
            } => self.singleton_method_definition(
                name,
                receiver.as_deref(),
                args_node.as_deref(),
                body.as_deref(),
            )?,
            K::ClassNode {
                cpath,
                super_node,
                body_node,
            } => self.class_declaration(cpath, super_node.as_deref(), body_node.as_deref())?,
            K::ModuleNode { cpath, body_node } => {
                self.module_declaration(cpath, body_node.as_deref())?
            }

            // =================================================================
            // COLLECTIONS
            // =================================================================
            K::HashNode { list_node } => self.hash_literal(node, list_node.as_deref())?,
            K::ArrayNode { elements } => ModelNode::ArrayLiteral {
                values: self.transform_list(elements)?,
            },
            K::ZArrayNode {} => ModelNode::ArrayLiteral { values: Vec::new() },
            K::ArgsCatNode { .. } | K::ArgsPushNode { .. } => ModelNode::ArrayLiteral {
                values: self.normalize_args(node)?,
            },
            K::SplatNode { value } => ModelNode::Splat {
                splatted: self.boxed(value.as_deref())?,
            },

            // =================================================================
            // FORMAL PARAMETERS
            // =================================================================
            K::ArgumentNode { name } => ModelNode::Argument {
                name: name.clone(),
                default_value: None,
            },
            K::OptArgNode { value } => self.optional_argument(value)?,
            K::RestArgNode { name } => match name.as_deref().filter(|n| !n.is_empty()) {
                Some(name) => ModelNode::splat(ModelNode::Argument {
                    name: name.to_string(),
                    default_value: None,
                }),
                None => ModelNode::Splat { splatted: None },
            },
            K::BlockArgNode { name } => ModelNode::BlockReference {
                value: Some(Box::new(ModelNode::Argument {
                    name: name.clone(),
                    default_value: None,
                })),
            },

            // =================================================================
            // NO METAMODEL COUNTERPART
            // =================================================================
            K::XStrNode { .. }
            | K::DXStrNode { .. }
            | K::DSymNode { .. }
            | K::BackRefNode { .. }
            | K::Match2Node { .. }
            | K::FlipNode { .. }
            | K::RedoNode {}
            | K::RetryNode {}
            | K::SClassNode { .. }
            | K::ForNode { .. }
            | K::PreExeNode { .. }
            | K::PostExeNode { .. }
            | K::Unrecognized { .. } => return self.unknown_node(node),
        };
        Ok(Some(model))
    }

    /// Diagnostics collected so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

// =============================================================================
// SHARED HELPERS
// =============================================================================

impl Transformer<'_> {
    /// Transforms an optional child into an optional boxed child.
    pub(crate) fn boxed(&mut self, node: Option<&CstNode>) -> Result<Child, TransformError> {
        Ok(self.transform(node)?.map(Box::new))
    }

    /// Transforms a child list, dropping absent results and keeping order.
    pub(crate) fn transform_list(
        &mut self,
        nodes: &[CstNode],
    ) -> Result<Vec<ModelNode>, TransformError> {
        let mut models = Vec::with_capacity(nodes.len());
        for node in nodes {
            models.extend(self.transform_node(node)?);
        }
        Ok(models)
    }

    /// Applies the unknown-node policy to a kind without a case.
    fn unknown_node(&mut self, node: &CstNode) -> TransformResult {
        if !self.config.unknown_nodes.skips_unknown() {
            return Err(TransformError::unrecognized(node));
        }
        warn!(
            node_type = node.node_type(),
            line = node.line(),
            "skipping unknown node"
        );
        self.diagnostics.push(
            Diagnostic::skipped(node)
                .with_hint("the node has no metamodel counterpart and is left out"),
        );
        Ok(None)
    }
}
