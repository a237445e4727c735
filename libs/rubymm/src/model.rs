//! # Metamodel
//!
//! The closed vocabulary every downstream consumer traverses. Each node owns
//! its children; optional children are `None` when absent and ordered lists
//! keep source order.

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// Optional, owned child of a model node.
pub type Child = Option<Box<ModelNode>>;

/// A node of the Ruby metamodel.
///
/// # Examples
/// ```
/// use rubymm::ModelNode;
///
/// let call = ModelNode::Call {
///     name: "puts".into(),
///     receiver: None,
///     args: vec![ModelNode::int(1)],
///     block_arg: None,
///     implicit_receiver: true,
/// };
/// assert_eq!(call.kind_name(), "Call");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "type")]
pub enum ModelNode {
    // =========================================================================
    // LITERALS
    // =========================================================================
    FloatLiteral {
        value: f64,
    },
    IntLiteral {
        value: i64,
    },
    /// A string literal.
    ///
    /// - `"a"` → `value: Some("a")`, `dynamic: false`
    /// - `"a#{b}"` → `value: None`, `dynamic: true`, `pieces` holds the parts
    StringLiteral {
        value: Option<String>,
        dynamic: bool,
        pieces: Vec<ModelNode>,
    },
    /// A regular expression literal, shaped like [`ModelNode::StringLiteral`].
    RegExpLiteral {
        value: Option<String>,
        dynamic: bool,
        pieces: Vec<ModelNode>,
    },
    BooleanLiteral {
        value: bool,
    },
    NilLiteral,
    Symbol {
        name: String,
    },

    // =========================================================================
    // VARIABLE ACCESS
    // =========================================================================
    LocalVarAccess {
        name: String,
    },
    /// Access to a variable scoped to a code block.
    BlockVarAccess {
        name: String,
    },
    GlobalVarAccess {
        name: String,
    },
    ClassVarAccess {
        name: String,
    },
    InstanceVarAccess {
        name: String,
    },

    // =========================================================================
    // VARIABLE ASSIGNMENT
    // =========================================================================
    LocalVarAssignment {
        name_assigned: String,
        value: Child,
    },
    BlockVarAssignment {
        name_assigned: String,
        value: Child,
    },
    GlobalVarAssignment {
        name_assigned: String,
        value: Child,
    },
    ClassVarAssignment {
        name_assigned: String,
        value: Child,
    },
    InstanceVarAssignment {
        name_assigned: String,
        value: Child,
    },
    ConstantDecl {
        name: String,
        value: Child,
    },

    // =========================================================================
    // COMPOUND ASSIGNMENT
    // =========================================================================
    /// `container[element] = value`
    ElementAssignment {
        container: Child,
        element: Child,
        value: Child,
    },
    /// `container[element] += value`
    ElementOperationAssignment {
        container: Child,
        element: Child,
        value: Child,
        operator: String,
    },
    /// `receiver.name = value`; `name_assigned` has no trailing `=`.
    AttributeAssignment {
        receiver: Child,
        name_assigned: String,
        value: Child,
    },
    /// `assigned ||= value`
    OrAssignment {
        assigned: Child,
        value: Child,
    },
    /// `assigned &&= value`
    AndAssignment {
        assigned: Child,
        value: Child,
    },
    /// `container.element_name += value`
    OperatorAssignment {
        container: Child,
        element_name: String,
        operator_name: String,
        value: Child,
    },
    /// `a, *b, c = values`. A rest target appears as a [`ModelNode::Splat`].
    MultipleAssignment {
        assignments: Vec<ModelNode>,
        values: Vec<ModelNode>,
    },

    // =========================================================================
    // CONTROL FLOW
    // =========================================================================
    /// `if`, `unless` (branches swapped) and the ternary operator.
    IfStatement {
        condition: Child,
        then_body: Child,
        else_body: Child,
    },
    WhileStatement {
        condition: Child,
        body: Child,
    },
    UntilStatement {
        condition: Child,
        body: Child,
    },
    CaseStatement {
        subject: Child,
        when_clauses: Vec<ModelNode>,
        else_body: Child,
    },
    WhenClause {
        condition: Child,
        body: Child,
    },
    /// `begin ... rescue ... else ... ensure ... end`
    BeginEndBlock {
        body: Child,
        rescue_clauses: Vec<ModelNode>,
        else_body: Child,
        ensure_body: Child,
    },
    RescueClause {
        exceptions: Vec<ModelNode>,
        body: Child,
    },
    /// Inline `body rescue value`.
    RescueStatement {
        body: Child,
        value: Child,
    },
    AliasStatement {
        old_name: Child,
        new_name: Child,
    },
    UndefStatement {
        name: Child,
    },
    BreakStatement {
        value: Child,
    },
    NextStatement {
        value: Child,
    },
    Return {
        value: Child,
    },
    YieldStatement {
        args: Vec<ModelNode>,
    },
    /// `defined?(value)`
    IsDefined {
        value: Child,
    },
    AndOperator {
        left: Child,
        right: Child,
    },
    OrOperator {
        left: Child,
        right: Child,
    },
    UnaryOperation {
        value: Child,
        operator_name: String,
    },

    // =========================================================================
    // CALLS AND DEFINITIONS
    // =========================================================================
    /// A method call.
    ///
    /// `implicit_receiver` is true only for calls written without a receiver
    /// but with arguments or parentheses (`puts 1`, `foo()`). A bare `foo`
    /// has `implicit_receiver: false` and `args: []`.
    Call {
        name: String,
        receiver: Child,
        args: Vec<ModelNode>,
        block_arg: Child,
        implicit_receiver: bool,
    },
    /// `super(args)`
    SuperCall {
        args: Vec<ModelNode>,
        block_arg: Child,
    },
    /// Bare `super`, forwarding the current arguments.
    CallToSuper {
        block_arg: Child,
    },
    /// A `do ... end` or `{ ... }` block attached to a call.
    CodeBlock {
        args: Vec<ModelNode>,
        body: Child,
    },
    Def(Def),

    // =========================================================================
    // CONTAINERS
    // =========================================================================
    Block(Block),
    ClassDecl(ClassDecl),
    ModuleDecl(ModuleDecl),

    // =========================================================================
    // REFERENCES AND COLLECTIONS
    // =========================================================================
    /// `name` or `container::name`
    Constant {
        name: String,
        container: Child,
    },
    /// `::name`
    GlobalScopeReference {
        name: String,
    },
    /// `$1`, `$2`, ...
    NthGroupReference {
        number: u32,
    },
    SelfReference,
    /// A bare method name, as in `alias new old`.
    LiteralReference {
        value: String,
    },
    Range {
        lower: Child,
        upper: Child,
        exclusive: bool,
    },
    /// `regex === checked_value`, as produced by `when /re/`.
    RegexMatcher {
        checked_value: Child,
        regex: Child,
    },
    HashLiteral {
        pairs: Vec<ModelNode>,
    },
    HashPair {
        key: Child,
        value: Child,
    },
    ArrayLiteral {
        values: Vec<ModelNode>,
    },
    /// `*splatted`; a bare `*` has no target.
    Splat {
        splatted: Child,
    },
    /// A formal parameter.
    Argument {
        name: String,
        default_value: Child,
    },
    /// `&value`, either passed to a call or declared as a parameter.
    BlockReference {
        value: Child,
    },
}

/// A method definition. `onself` marks singleton methods (`def self.x`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Def {
    pub name: String,
    pub receiver: Child,
    pub onself: bool,
    pub args: Vec<ModelNode>,
    pub body: Child,
    pub rescue_clauses: Vec<ModelNode>,
    pub else_body: Child,
    pub ensure_body: Child,
}

/// An ordered statement sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub contents: Vec<ModelNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub defname: Child,
    pub super_class: Child,
    pub contents: Vec<ModelNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleDecl {
    pub defname: Child,
    pub contents: Vec<ModelNode>,
}

/// A model node holding an ordered content list.
pub trait Container {
    fn contents(&self) -> &[ModelNode];
    fn contents_mut(&mut self) -> &mut Vec<ModelNode>;
}

macro_rules! impl_container {
    ($($ty:ty),*) => {
        $(impl Container for $ty {
            fn contents(&self) -> &[ModelNode] {
                &self.contents
            }

            fn contents_mut(&mut self) -> &mut Vec<ModelNode> {
                &mut self.contents
            }
        })*
    };
}

impl_container!(Block, ClassDecl, ModuleDecl);

impl ModelNode {
    pub fn int(value: i64) -> Self {
        ModelNode::IntLiteral { value }
    }

    pub fn float(value: f64) -> Self {
        ModelNode::FloatLiteral { value }
    }

    /// A non-interpolated string literal.
    pub fn string(value: impl Into<String>) -> Self {
        ModelNode::StringLiteral {
            value: Some(value.into()),
            dynamic: false,
            pieces: Vec::new(),
        }
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        ModelNode::Symbol { name: name.into() }
    }

    pub fn local_var(name: impl Into<String>) -> Self {
        ModelNode::LocalVarAccess { name: name.into() }
    }

    pub fn literal_ref(value: impl Into<String>) -> Self {
        ModelNode::LiteralReference {
            value: value.into(),
        }
    }

    pub fn splat(splatted: ModelNode) -> Self {
        ModelNode::Splat {
            splatted: Some(Box::new(splatted)),
        }
    }

    /// Name of the variant, e.g. `"IfStatement"`.
    #[inline]
    pub fn kind_name(&self) -> &'static str {
        self.into()
    }

    /// Wraps the node in a [`ModelNode::Splat`] unless it already is one.
    pub fn into_splat(self) -> Self {
        match self {
            splat @ ModelNode::Splat { .. } => splat,
            other => ModelNode::splat(other),
        }
    }

    /// Takes the assigned value out of an assignment-shaped node.
    ///
    /// Returns the variant name when the node is not an assignment.
    pub fn into_assigned_value(self) -> Result<Child, &'static str> {
        match self {
            ModelNode::LocalVarAssignment { value, .. }
            | ModelNode::BlockVarAssignment { value, .. }
            | ModelNode::GlobalVarAssignment { value, .. }
            | ModelNode::ClassVarAssignment { value, .. }
            | ModelNode::InstanceVarAssignment { value, .. }
            | ModelNode::ConstantDecl { value, .. }
            | ModelNode::ElementAssignment { value, .. }
            | ModelNode::AttributeAssignment { value, .. } => Ok(value),
            other => Err(other.kind_name()),
        }
    }
}
