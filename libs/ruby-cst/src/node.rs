//! # Raw Syntax-Tree Nodes
//!
//! Typed mirror of the node classes a JRuby-style Ruby parser produces.
//! The tree arrives serialized (one JSON object per node, tagged by the
//! parser's node-type name) and is only ever read, never mutated.
//!
//! ## Serialized Shape
//!
//! ```text
//! {
//!   "type": "FCALLNODE",
//!   "position": { "start_line": 0 },
//!   "name": "puts",
//!   "args": { "type": "ARRAYNODE", "elements": [ { "type": "FIXNUMNODE", "value": 1 } ] }
//! }
//! ```
//!
//! Absent children are either omitted or `null`. Fields the kind does not
//! declare are ignored, so dumps from richer parser versions still load.
//! A node type outside the modelled set loads as [`CstKind::Unrecognized`],
//! keeping its type name and position; its payload is dropped.

use crate::position::SourcePosition;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use strum::{IntoStaticStr, VariantNames};

/// A raw syntax-tree node: its position plus its kind-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CstNode {
    pub position: SourcePosition,
    pub kind: CstKind,
}

/// Name of a global, class or instance variable as exposed by the parser.
///
/// Parser versions disagree here: newer ones populate `lexical_name` and
/// expose a ready-made `name`, older ones only expose the token with its
/// sigil (`$x`, `@@x`, `@x`) in `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarName {
    pub name: String,
    #[serde(default)]
    pub lexical_name: Option<String>,
}

type Child = Option<Box<CstNode>>;

/// The closed set of raw node kinds.
///
/// Variant names are the parser's node-type names; `CstNode::node_type`
/// renders them in the parser's upper-case spelling (`CALLNODE`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IntoStaticStr, VariantNames)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum CstKind {
    // =========================================================================
    // STRUCTURE
    // =========================================================================
    RootNode {
        #[serde(default)]
        body: Child,
    },
    NewlineNode {
        #[serde(default)]
        next_node: Child,
    },
    BlockNode {
        #[serde(default)]
        statements: Vec<CstNode>,
    },
    EvStrNode {
        #[serde(default)]
        body: Child,
    },
    NilImplicitNode {},

    // =========================================================================
    // LITERALS
    // =========================================================================
    FloatNode {
        value: f64,
    },
    FixnumNode {
        value: i64,
    },
    StrNode {
        value: String,
    },
    DStrNode {
        #[serde(default)]
        pieces: Vec<CstNode>,
    },
    RegexpNode {
        value: String,
    },
    DRegexpNode {
        #[serde(default)]
        pieces: Vec<CstNode>,
    },
    NilNode {},
    TrueNode {},
    FalseNode {},
    SymbolNode {
        name: String,
    },

    // =========================================================================
    // VARIABLES
    // =========================================================================
    LocalVarNode {
        name: String,
    },
    DVarNode {
        name: String,
    },
    GlobalVarNode(VarName),
    ClassVarNode(VarName),
    InstVarNode(VarName),
    NthRefNode {
        match_number: u32,
    },
    LocalAsgnNode {
        name: String,
        #[serde(default)]
        value: Child,
    },
    DAsgnNode {
        name: String,
        #[serde(default)]
        value: Child,
    },
    GlobalAsgnNode {
        #[serde(flatten)]
        var: VarName,
        #[serde(default)]
        value: Child,
    },
    ClassVarAsgnNode {
        #[serde(flatten)]
        var: VarName,
        #[serde(default)]
        value: Child,
    },
    ClassVarDeclNode {
        #[serde(flatten)]
        var: VarName,
        #[serde(default)]
        value: Child,
    },
    InstAsgnNode {
        #[serde(flatten)]
        var: VarName,
        #[serde(default)]
        value: Child,
    },

    // =========================================================================
    // CONSTANTS
    // =========================================================================
    ConstNode {
        name: String,
    },
    Colon2Node {
        #[serde(default)]
        left_node: Child,
        name: String,
    },
    Colon3Node {
        name: String,
    },
    ConstDeclNode {
        name: String,
        #[serde(default)]
        value: Child,
    },

    // =========================================================================
    // COMPOUND ASSIGNMENTS
    // =========================================================================
    OpElementAsgnNode {
        #[serde(default)]
        receiver: Child,
        #[serde(default)]
        args: Child,
        operator_name: String,
        #[serde(default)]
        value: Child,
    },
    AttrAssignNode {
        #[serde(default)]
        receiver: Child,
        name: String,
        #[serde(default)]
        args: Child,
    },
    OpAsgnOrNode {
        first: Box<CstNode>,
        second: Box<CstNode>,
    },
    OpAsgnAndNode {
        first: Box<CstNode>,
        second: Box<CstNode>,
    },
    OpAsgnNode {
        #[serde(default)]
        receiver: Child,
        variable_name: String,
        operator_name: String,
        #[serde(default)]
        value: Child,
    },
    MultipleAsgnNode {
        #[serde(default)]
        pre: Child,
        #[serde(default)]
        rest: Child,
        #[serde(default)]
        post: Child,
        #[serde(default)]
        value: Child,
    },
    MultipleAsgn19Node {
        #[serde(default)]
        pre: Child,
        #[serde(default)]
        rest: Child,
        #[serde(default)]
        post: Child,
        #[serde(default)]
        value: Child,
    },
    StarNode {},

    // =========================================================================
    // CONTROL FLOW
    // =========================================================================
    IfNode {
        #[serde(default)]
        condition: Child,
        #[serde(default)]
        then_body: Child,
        #[serde(default)]
        else_body: Child,
    },
    WhileNode {
        #[serde(default)]
        condition: Child,
        #[serde(default)]
        body: Child,
    },
    UntilNode {
        #[serde(default)]
        condition: Child,
        #[serde(default)]
        body: Child,
    },
    CaseNode {
        #[serde(default)]
        case_node: Child,
        #[serde(default)]
        cases: Vec<CstNode>,
        #[serde(default)]
        else_node: Child,
    },
    WhenNode {
        #[serde(default)]
        expression: Child,
        #[serde(default)]
        body: Child,
    },
    BeginNode {
        #[serde(default)]
        body: Child,
    },
    RescueNode {
        #[serde(default)]
        body: Child,
        #[serde(default)]
        rescue_node: Child,
        #[serde(default)]
        else_node: Child,
    },
    RescueBodyNode {
        #[serde(default)]
        exception_nodes: Child,
        #[serde(default)]
        body: Child,
        #[serde(default)]
        opt_rescue: Child,
    },
    EnsureNode {
        #[serde(default)]
        body: Child,
        #[serde(default)]
        ensure: Child,
    },
    BreakNode {
        #[serde(default)]
        value: Child,
    },
    NextNode {
        #[serde(default)]
        value: Child,
    },
    ReturnNode {
        #[serde(default)]
        value: Child,
    },
    YieldNode {
        #[serde(default)]
        args: Child,
    },
    AliasNode {
        old_name: Box<CstNode>,
        new_name: Box<CstNode>,
    },
    UndefNode {
        name: Box<CstNode>,
    },
    DefinedNode {
        expression: Box<CstNode>,
    },
    AndNode {
        first: Box<CstNode>,
        second: Box<CstNode>,
    },
    OrNode {
        first: Box<CstNode>,
        second: Box<CstNode>,
    },
    NotNode {
        condition: Box<CstNode>,
    },

    // =========================================================================
    // CALLS
    // =========================================================================
    CallNode {
        #[serde(default)]
        receiver: Child,
        name: String,
        #[serde(default)]
        args: Child,
        #[serde(default)]
        iter: Child,
    },
    FCallNode {
        name: String,
        #[serde(default)]
        args: Child,
        #[serde(default)]
        iter: Child,
    },
    VCallNode {
        name: String,
    },
    SuperNode {
        #[serde(default)]
        args: Child,
        #[serde(default)]
        iter: Child,
    },
    ZSuperNode {
        #[serde(default)]
        iter: Child,
    },
    UnaryCallNode {
        receiver: Box<CstNode>,
        lexical_name: String,
    },
    Match3Node {
        receiver: Box<CstNode>,
        value: Box<CstNode>,
    },
    SelfNode {},
    DotNode {
        #[serde(default)]
        begin_node: Child,
        #[serde(default)]
        end_node: Child,
        #[serde(default)]
        exclusive: bool,
    },
    LiteralNode {
        name: String,
    },
    IterNode {
        #[serde(default)]
        var_node: Child,
        #[serde(default)]
        body: Child,
    },
    BlockPassNode {
        #[serde(default)]
        body: Child,
        #[serde(default)]
        args: Child,
    },

    // =========================================================================
    // DEFINITIONS
    // =========================================================================
    DefnNode {
        name: String,
        #[serde(default)]
        args_node: Child,
        #[serde(default)]
        body: Child,
    },
    DefsNode {
        #[serde(default)]
        receiver: Child,
        name: String,
        #[serde(default)]
        args_node: Child,
        #[serde(default)]
        body: Child,
    },
    ClassNode {
        cpath: Box<CstNode>,
        #[serde(default)]
        super_node: Child,
        #[serde(default)]
        body_node: Child,
    },
    ModuleNode {
        cpath: Box<CstNode>,
        #[serde(default)]
        body_node: Child,
    },

    // =========================================================================
    // COLLECTIONS
    // =========================================================================
    HashNode {
        #[serde(default)]
        list_node: Child,
    },
    ArrayNode {
        #[serde(default)]
        elements: Vec<CstNode>,
    },
    ZArrayNode {},
    ListNode {
        #[serde(default)]
        elements: Vec<CstNode>,
    },
    SplatNode {
        #[serde(default)]
        value: Child,
    },

    // =========================================================================
    // ARGUMENTS
    // =========================================================================
    ArgsNode {
        #[serde(default)]
        pre: Child,
        #[serde(default)]
        optional: Child,
        #[serde(default)]
        rest: Child,
        #[serde(default)]
        post: Child,
        #[serde(default)]
        block: Child,
    },
    ArgumentNode {
        name: String,
    },
    OptArgNode {
        value: Box<CstNode>,
    },
    RestArgNode {
        #[serde(default)]
        name: Option<String>,
    },
    BlockArgNode {
        name: String,
    },
    ArgsCatNode {
        first: Box<CstNode>,
        second: Box<CstNode>,
    },
    ArgsPushNode {
        first: Box<CstNode>,
        second: Box<CstNode>,
    },

    // =========================================================================
    // KINDS WITHOUT A METAMODEL COUNTERPART
    // =========================================================================
    XStrNode {
        value: String,
    },
    DXStrNode {
        #[serde(default)]
        pieces: Vec<CstNode>,
    },
    DSymNode {
        #[serde(default)]
        pieces: Vec<CstNode>,
    },
    BackRefNode {
        #[serde(default)]
        kind: String,
    },
    Match2Node {
        receiver: Box<CstNode>,
        value: Box<CstNode>,
    },
    FlipNode {
        #[serde(default)]
        begin_node: Child,
        #[serde(default)]
        end_node: Child,
        #[serde(default)]
        exclusive: bool,
    },
    RedoNode {},
    RetryNode {},
    SClassNode {
        receiver: Box<CstNode>,
        #[serde(default)]
        body_node: Child,
    },
    ForNode {
        #[serde(default)]
        var_node: Child,
        #[serde(default)]
        iter_node: Child,
        #[serde(default)]
        body: Child,
    },
    PreExeNode {
        #[serde(default)]
        body: Child,
    },
    PostExeNode {
        #[serde(default)]
        body: Child,
    },

    /// Any other parser node type, kept by name.
    #[serde(skip)]
    Unrecognized { node_type: String },
}

impl CstNode {
    /// Creates a node at the default position.
    #[inline]
    pub fn new(kind: CstKind) -> Self {
        Self {
            position: SourcePosition::default(),
            kind,
        }
    }

    /// Returns this node moved to the given start line.
    pub fn at_line(mut self, line: usize) -> Self {
        self.position = SourcePosition::line(line);
        self
    }

    /// The parser's node-type name, e.g. `"CALLNODE"`.
    pub fn node_type(&self) -> &str {
        match &self.kind {
            CstKind::Unrecognized { node_type } => node_type.as_str(),
            kind => <&'static str>::from(kind),
        }
    }

    /// Start line of the node, used in diagnostics.
    #[inline]
    pub fn line(&self) -> usize {
        self.position.start_line
    }

    /// True for the "concatenate"/"push" shapes that encode a splat inside
    /// an argument list.
    pub fn is_concatenation(&self) -> bool {
        matches!(
            self.kind,
            CstKind::ArgsCatNode { .. } | CstKind::ArgsPushNode { .. }
        )
    }

    /// Elements of a flat list-like node (`ARRAYNODE` or `LISTNODE`).
    pub fn list_elements(&self) -> Option<&[CstNode]> {
        match &self.kind {
            CstKind::ArrayNode { elements } | CstKind::ListNode { elements } => Some(elements),
            _ => None,
        }
    }
}

// =============================================================================
// SERIALIZED FORM
// =============================================================================

#[derive(Deserialize)]
struct KnownNode {
    #[serde(default)]
    position: SourcePosition,
    #[serde(flatten)]
    kind: CstKind,
}

#[derive(Serialize)]
struct KnownNodeRef<'a> {
    position: &'a SourcePosition,
    #[serde(flatten)]
    kind: &'a CstKind,
}

#[derive(Serialize)]
struct UnrecognizedNodeRef<'a> {
    #[serde(rename = "type")]
    node_type: &'a str,
    position: &'a SourcePosition,
}

impl<'de> Deserialize<'de> for CstNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut value = Value::deserialize(deserializer)?;
        let node_type = match value.get("type").and_then(Value::as_str) {
            Some(node_type) => node_type.to_owned(),
            None => return Err(D::Error::missing_field("type")),
        };

        if CstKind::VARIANTS.contains(&node_type.as_str()) {
            let KnownNode { position, kind } =
                KnownNode::deserialize(value).map_err(D::Error::custom)?;
            return Ok(CstNode { position, kind });
        }

        let position = match value.get_mut("position").map(Value::take) {
            Some(Value::Null) | None => SourcePosition::default(),
            Some(position) => SourcePosition::deserialize(position).map_err(D::Error::custom)?,
        };
        Ok(CstNode {
            position,
            kind: CstKind::Unrecognized { node_type },
        })
    }
}

impl Serialize for CstNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.kind {
            CstKind::Unrecognized { node_type } => UnrecognizedNodeRef {
                node_type,
                position: &self.position,
            }
            .serialize(serializer),
            kind => KnownNodeRef {
                position: &self.position,
                kind,
            }
            .serialize(serializer),
        }
    }
}

impl From<CstKind> for CstNode {
    fn from(kind: CstKind) -> Self {
        CstNode::new(kind)
    }
}
