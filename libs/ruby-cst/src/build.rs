//! # Raw Tree Builders
//!
//! Shorthand constructors for writing raw trees in code, mostly for tests and
//! for embedders that already hold a parse in another form.
//!
//! ## Example
//!
//! ```rust
//! use ruby_cst::build::*;
//!
//! // f(1, *xs, 2)
//! let call = fcall(
//!     "f",
//!     Some(args_push(args_cat(array(vec![fixnum(1)]), local_var("xs")), fixnum(2))),
//! );
//! assert_eq!(call.node_type(), "FCALLNODE");
//! ```

use crate::node::{CstKind, CstNode, VarName};

fn boxed(node: CstNode) -> Box<CstNode> {
    Box::new(node)
}

fn opt(node: Option<CstNode>) -> Option<Box<CstNode>> {
    node.map(Box::new)
}

// =============================================================================
// STRUCTURE
// =============================================================================

pub fn root(body: Option<CstNode>) -> CstNode {
    CstKind::RootNode { body: opt(body) }.into()
}

pub fn newline(next: CstNode) -> CstNode {
    CstKind::NewlineNode {
        next_node: Some(boxed(next)),
    }
    .into()
}

pub fn block(statements: Vec<CstNode>) -> CstNode {
    CstKind::BlockNode { statements }.into()
}

pub fn evstr(body: CstNode) -> CstNode {
    CstKind::EvStrNode {
        body: Some(boxed(body)),
    }
    .into()
}

pub fn nil_implicit() -> CstNode {
    CstKind::NilImplicitNode {}.into()
}

// =============================================================================
// LITERALS
// =============================================================================

pub fn fixnum(value: i64) -> CstNode {
    CstKind::FixnumNode { value }.into()
}

pub fn float(value: f64) -> CstNode {
    CstKind::FloatNode { value }.into()
}

pub fn string(value: &str) -> CstNode {
    CstKind::StrNode {
        value: value.to_string(),
    }
    .into()
}

pub fn dstr(pieces: Vec<CstNode>) -> CstNode {
    CstKind::DStrNode { pieces }.into()
}

pub fn regexp(value: &str) -> CstNode {
    CstKind::RegexpNode {
        value: value.to_string(),
    }
    .into()
}

pub fn dregexp(pieces: Vec<CstNode>) -> CstNode {
    CstKind::DRegexpNode { pieces }.into()
}

pub fn nil() -> CstNode {
    CstKind::NilNode {}.into()
}

pub fn true_() -> CstNode {
    CstKind::TrueNode {}.into()
}

pub fn false_() -> CstNode {
    CstKind::FalseNode {}.into()
}

pub fn symbol(name: &str) -> CstNode {
    CstKind::SymbolNode {
        name: name.to_string(),
    }
    .into()
}

pub fn literal(name: &str) -> CstNode {
    CstKind::LiteralNode {
        name: name.to_string(),
    }
    .into()
}

// =============================================================================
// VARIABLES
// =============================================================================

/// Variable name in the shape of a newer parser: bare name plus lexical name.
pub fn var_name(name: &str) -> VarName {
    VarName {
        name: name.to_string(),
        lexical_name: Some(name.to_string()),
    }
}

/// Variable name in the shape of an older parser: sigil-prefixed token only.
pub fn legacy_var_name(token: &str) -> VarName {
    VarName {
        name: token.to_string(),
        lexical_name: None,
    }
}

pub fn local_var(name: &str) -> CstNode {
    CstKind::LocalVarNode {
        name: name.to_string(),
    }
    .into()
}

pub fn dvar(name: &str) -> CstNode {
    CstKind::DVarNode {
        name: name.to_string(),
    }
    .into()
}

pub fn global_var(var: VarName) -> CstNode {
    CstKind::GlobalVarNode(var).into()
}

pub fn class_var(var: VarName) -> CstNode {
    CstKind::ClassVarNode(var).into()
}

pub fn inst_var(var: VarName) -> CstNode {
    CstKind::InstVarNode(var).into()
}

pub fn local_asgn(name: &str, value: Option<CstNode>) -> CstNode {
    CstKind::LocalAsgnNode {
        name: name.to_string(),
        value: opt(value),
    }
    .into()
}

pub fn dasgn(name: &str, value: Option<CstNode>) -> CstNode {
    CstKind::DAsgnNode {
        name: name.to_string(),
        value: opt(value),
    }
    .into()
}

pub fn global_asgn(var: VarName, value: CstNode) -> CstNode {
    CstKind::GlobalAsgnNode {
        var,
        value: Some(boxed(value)),
    }
    .into()
}

pub fn class_var_asgn(var: VarName, value: CstNode) -> CstNode {
    CstKind::ClassVarAsgnNode {
        var,
        value: Some(boxed(value)),
    }
    .into()
}

pub fn inst_asgn(var: VarName, value: CstNode) -> CstNode {
    CstKind::InstAsgnNode {
        var,
        value: Some(boxed(value)),
    }
    .into()
}

// =============================================================================
// CONSTANTS
// =============================================================================

pub fn constant(name: &str) -> CstNode {
    CstKind::ConstNode {
        name: name.to_string(),
    }
    .into()
}

pub fn colon2(left: Option<CstNode>, name: &str) -> CstNode {
    CstKind::Colon2Node {
        left_node: opt(left),
        name: name.to_string(),
    }
    .into()
}

pub fn colon3(name: &str) -> CstNode {
    CstKind::Colon3Node {
        name: name.to_string(),
    }
    .into()
}

// =============================================================================
// CONTROL FLOW
// =============================================================================

pub fn if_(condition: CstNode, then_body: Option<CstNode>, else_body: Option<CstNode>) -> CstNode {
    CstKind::IfNode {
        condition: Some(boxed(condition)),
        then_body: opt(then_body),
        else_body: opt(else_body),
    }
    .into()
}

pub fn while_(condition: CstNode, body: Option<CstNode>) -> CstNode {
    CstKind::WhileNode {
        condition: Some(boxed(condition)),
        body: opt(body),
    }
    .into()
}

pub fn until(condition: CstNode, body: Option<CstNode>) -> CstNode {
    CstKind::UntilNode {
        condition: Some(boxed(condition)),
        body: opt(body),
    }
    .into()
}

pub fn case(subject: Option<CstNode>, cases: Vec<CstNode>, else_node: Option<CstNode>) -> CstNode {
    CstKind::CaseNode {
        case_node: opt(subject),
        cases,
        else_node: opt(else_node),
    }
    .into()
}

pub fn when(expression: CstNode, body: Option<CstNode>) -> CstNode {
    CstKind::WhenNode {
        expression: Some(boxed(expression)),
        body: opt(body),
    }
    .into()
}

pub fn begin(body: Option<CstNode>) -> CstNode {
    CstKind::BeginNode { body: opt(body) }.into()
}

pub fn rescue(body: Option<CstNode>, rescue_body: Option<CstNode>) -> CstNode {
    CstKind::RescueNode {
        body: opt(body),
        rescue_node: opt(rescue_body),
        else_node: None,
    }
    .into()
}

pub fn rescue_body(
    exceptions: Option<CstNode>,
    body: Option<CstNode>,
    next: Option<CstNode>,
) -> CstNode {
    CstKind::RescueBodyNode {
        exception_nodes: opt(exceptions),
        body: opt(body),
        opt_rescue: opt(next),
    }
    .into()
}

pub fn ensure(body: Option<CstNode>, ensure: Option<CstNode>) -> CstNode {
    CstKind::EnsureNode {
        body: opt(body),
        ensure: opt(ensure),
    }
    .into()
}

// =============================================================================
// CALLS
// =============================================================================

pub fn call(receiver: CstNode, name: &str, args: Option<CstNode>, iter: Option<CstNode>) -> CstNode {
    CstKind::CallNode {
        receiver: Some(boxed(receiver)),
        name: name.to_string(),
        args: opt(args),
        iter: opt(iter),
    }
    .into()
}

pub fn fcall(name: &str, args: Option<CstNode>) -> CstNode {
    CstKind::FCallNode {
        name: name.to_string(),
        args: opt(args),
        iter: None,
    }
    .into()
}

pub fn vcall(name: &str) -> CstNode {
    CstKind::VCallNode {
        name: name.to_string(),
    }
    .into()
}

pub fn iter(params: Option<CstNode>, body: Option<CstNode>) -> CstNode {
    CstKind::IterNode {
        var_node: opt(params),
        body: opt(body),
    }
    .into()
}

pub fn block_pass(body: CstNode, args: Option<CstNode>) -> CstNode {
    CstKind::BlockPassNode {
        body: Some(boxed(body)),
        args: opt(args),
    }
    .into()
}

pub fn self_() -> CstNode {
    CstKind::SelfNode {}.into()
}

// =============================================================================
// DEFINITIONS
// =============================================================================

pub fn defn(name: &str, args: Option<CstNode>, body: Option<CstNode>) -> CstNode {
    CstKind::DefnNode {
        name: name.to_string(),
        args_node: opt(args),
        body: opt(body),
    }
    .into()
}

pub fn defs(receiver: CstNode, name: &str, args: Option<CstNode>, body: Option<CstNode>) -> CstNode {
    CstKind::DefsNode {
        receiver: Some(boxed(receiver)),
        name: name.to_string(),
        args_node: opt(args),
        body: opt(body),
    }
    .into()
}

pub fn class(cpath: CstNode, super_node: Option<CstNode>, body: Option<CstNode>) -> CstNode {
    CstKind::ClassNode {
        cpath: boxed(cpath),
        super_node: opt(super_node),
        body_node: opt(body),
    }
    .into()
}

pub fn module(cpath: CstNode, body: Option<CstNode>) -> CstNode {
    CstKind::ModuleNode {
        cpath: boxed(cpath),
        body_node: opt(body),
    }
    .into()
}

// =============================================================================
// COLLECTIONS AND ARGUMENTS
// =============================================================================

pub fn array(elements: Vec<CstNode>) -> CstNode {
    CstKind::ArrayNode { elements }.into()
}

pub fn list(elements: Vec<CstNode>) -> CstNode {
    CstKind::ListNode { elements }.into()
}

pub fn zarray() -> CstNode {
    CstKind::ZArrayNode {}.into()
}

/// Hash literal from key/value pairs, flattened the way the parser does.
pub fn hash(pairs: Vec<(CstNode, CstNode)>) -> CstNode {
    let elements = pairs.into_iter().flat_map(|(k, v)| [k, v]).collect();
    CstKind::HashNode {
        list_node: Some(boxed(list(elements))),
    }
    .into()
}

pub fn splat(value: CstNode) -> CstNode {
    CstKind::SplatNode {
        value: Some(boxed(value)),
    }
    .into()
}

pub fn args_cat(first: CstNode, second: CstNode) -> CstNode {
    CstKind::ArgsCatNode {
        first: boxed(first),
        second: boxed(second),
    }
    .into()
}

pub fn args_push(first: CstNode, second: CstNode) -> CstNode {
    CstKind::ArgsPushNode {
        first: boxed(first),
        second: boxed(second),
    }
    .into()
}

pub fn argument(name: &str) -> CstNode {
    CstKind::ArgumentNode {
        name: name.to_string(),
    }
    .into()
}

pub fn opt_arg(name: &str, default: CstNode) -> CstNode {
    CstKind::OptArgNode {
        value: boxed(local_asgn(name, Some(default))),
    }
    .into()
}

pub fn rest_arg(name: Option<&str>) -> CstNode {
    CstKind::RestArgNode {
        name: name.map(ToString::to_string),
    }
    .into()
}

pub fn block_arg(name: &str) -> CstNode {
    CstKind::BlockArgNode {
        name: name.to_string(),
    }
    .into()
}

/// Formal parameter group. `pre`, `optional` and `post` are wrapped in list
/// nodes when non-empty.
pub fn formal_args(
    pre: Vec<CstNode>,
    optional: Vec<CstNode>,
    rest: Option<CstNode>,
    post: Vec<CstNode>,
    block: Option<CstNode>,
) -> CstNode {
    let segment = |nodes: Vec<CstNode>| (!nodes.is_empty()).then(|| boxed(list(nodes)));
    CstKind::ArgsNode {
        pre: segment(pre),
        optional: segment(optional),
        rest: opt(rest),
        post: segment(post),
        block: opt(block),
    }
    .into()
}
