use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

/// Syntax tree node produced by the Kusa parser.
/// Uses internal tagging: `#[serde(tag = "type")]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    // ── Structure ──

    /// Program root: ordered top-level statements
    Ast { body: Vec<Node> },

    /// Brace-delimited statement list
    Block {
        #[serde(rename = "blockType", default)]
        block_type: BlockKind,
        value: Vec<Node>,
    },

    // ── Declarations ──

    /// `pub class Foo { ... }`
    TypeDeclaration {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        modifiers: Option<Vec<Modifier>>,
        #[serde(rename = "typeName")]
        type_name: Box<Node>,
        body: Box<Node>,
    },

    /// Method declaration; a missing return type means no return value
    FunctionDeclaration {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        modifiers: Option<Vec<Modifier>>,
        #[serde(rename = "returnType", default, skip_serializing_if = "Option::is_none")]
        return_type: Option<Box<Node>>,
        #[serde(rename = "functionName")]
        function_name: Box<Node>,
        #[serde(rename = "argList", default)]
        arg_list: Vec<Node>,
        body: Box<Node>,
    },

    /// `Type name = default`
    VariableDeclarator(Declarator),

    /// Local variable declaration wrapping a declarator
    VariableDeclaration { declarator: Box<Node> },

    /// Field declaration: modifiers plus a declarator
    MemberDeclaration {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        modifiers: Option<Vec<Modifier>>,
        declarator: Box<Node>,
    },

    /// Property with accessor bodies keyed by accessor kind
    PropertyDeclaration {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        modifiers: Option<Vec<Modifier>>,
        #[serde(serialize_with = "serialize_tagged_declarator")]
        declarator: Declarator,
        #[serde(default)]
        content: IndexMap<AccessorKind, Node>,
    },

    // ── References ──

    /// Bare name
    Identifier { value: String },

    /// Dotted namespace/type path: `curr.next`
    StaticAccess {
        curr: Box<Node>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next: Option<Box<Node>>,
    },

    /// `import a.b.c`
    ImportStatement { target: Box<Node> },

    // ── Expressions ──

    /// `callee(args...)`
    Call {
        callee: Box<Node>,
        #[serde(default)]
        args: Vec<Node>,
    },

    /// `left.right`
    ExpressionAccess { left: Box<Node>, right: Box<Node> },

    /// `src[index]`
    ArrayAccessExpression { src: Box<Node>, index: Box<Node> },

    /// Array-of-T type: `target[]`
    ArrayStaticAccess { target: Box<Node> },

    /// `new target`
    ObjectCreateExpression { target: Box<Node> },

    /// `dest = src`
    Assignment { dest: Box<Node>, src: Box<Node> },

    /// `left op right`
    InfixExpression {
        left: Box<Node>,
        operator: String,
        right: Box<Node>,
    },

    StringLiteral { value: serde_json::Value },

    NumberLiteral { value: serde_json::Value },

    BooleanLiteral { value: serde_json::Value },

    // ── Statements ──

    IfStatement { condition: Box<Node>, body: Box<Node> },

    WhileStatement { condition: Box<Node>, body: Box<Node> },

    ReturnStatement { value: Box<Node> },

    /// Any discriminator the tree model does not know about.
    #[serde(other)]
    Unsupported,
}

/// Typed variable binding shared by variable, member and property declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declarator {
    #[serde(rename = "varType")]
    pub var_type: Box<Node>,
    #[serde(rename = "varName")]
    pub var_name: Box<Node>,
    #[serde(rename = "defaultValue", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Box<Node>>,
}

/// Distinguishes class bodies from statement bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Statement body; every statement needs a terminator
    Code,
    /// Declaration body (anything other than `"code"` on the wire)
    #[default]
    #[serde(rename = "decl")]
    #[serde(other)]
    Declaration,
}

impl BlockKind {
    pub fn is_code(self) -> bool {
        self == BlockKind::Code
    }
}

/// Source-language access/linkage modifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Modifier {
    /// `pub`
    Pub,
    /// `protect`
    Protect,
    /// `virtual`
    Virtual,
    /// `noinst`
    Noinst,
    /// Unrecognized token, kept verbatim
    Other(String),
}

impl Modifier {
    pub fn as_str(&self) -> &str {
        match self {
            Modifier::Pub => "pub",
            Modifier::Protect => "protect",
            Modifier::Virtual => "virtual",
            Modifier::Noinst => "noinst",
            Modifier::Other(token) => token,
        }
    }
}

impl From<String> for Modifier {
    fn from(token: String) -> Self {
        match token.as_str() {
            "pub" => Modifier::Pub,
            "protect" => Modifier::Protect,
            "virtual" => Modifier::Virtual,
            "noinst" => Modifier::Noinst,
            _ => Modifier::Other(token),
        }
    }
}

impl From<&str> for Modifier {
    fn from(token: &str) -> Self {
        Modifier::from(token.to_string())
    }
}

impl From<Modifier> for String {
    fn from(modifier: Modifier) -> Self {
        modifier.as_str().to_string()
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Property accessor key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccessorKind {
    Get,
    Set,
    Other(String),
}

impl AccessorKind {
    pub fn as_str(&self) -> &str {
        match self {
            AccessorKind::Get => "get",
            AccessorKind::Set => "set",
            AccessorKind::Other(key) => key,
        }
    }
}

impl From<String> for AccessorKind {
    fn from(key: String) -> Self {
        match key.as_str() {
            "get" => AccessorKind::Get,
            "set" => AccessorKind::Set,
            _ => AccessorKind::Other(key),
        }
    }
}

impl From<&str> for AccessorKind {
    fn from(key: &str) -> Self {
        AccessorKind::from(key.to_string())
    }
}

impl From<AccessorKind> for String {
    fn from(kind: AccessorKind) -> Self {
        kind.as_str().to_string()
    }
}

impl Node {
    /// Convenience constructor for an identifier node.
    pub fn ident(name: impl Into<String>) -> Self {
        Node::Identifier { value: name.into() }
    }

    /// Wire discriminator of this node.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Ast { .. } => "Ast",
            Node::Block { .. } => "Block",
            Node::TypeDeclaration { .. } => "TypeDeclaration",
            Node::FunctionDeclaration { .. } => "FunctionDeclaration",
            Node::VariableDeclarator(_) => "VariableDeclarator",
            Node::VariableDeclaration { .. } => "VariableDeclaration",
            Node::MemberDeclaration { .. } => "MemberDeclaration",
            Node::PropertyDeclaration { .. } => "PropertyDeclaration",
            Node::Identifier { .. } => "Identifier",
            Node::StaticAccess { .. } => "StaticAccess",
            Node::ImportStatement { .. } => "ImportStatement",
            Node::Call { .. } => "Call",
            Node::ExpressionAccess { .. } => "ExpressionAccess",
            Node::ArrayAccessExpression { .. } => "ArrayAccessExpression",
            Node::ArrayStaticAccess { .. } => "ArrayStaticAccess",
            Node::ObjectCreateExpression { .. } => "ObjectCreateExpression",
            Node::Assignment { .. } => "Assignment",
            Node::InfixExpression { .. } => "InfixExpression",
            Node::StringLiteral { .. } => "StringLiteral",
            Node::NumberLiteral { .. } => "NumberLiteral",
            Node::BooleanLiteral { .. } => "BooleanLiteral",
            Node::IfStatement { .. } => "IfStatement",
            Node::WhileStatement { .. } => "WhileStatement",
            Node::ReturnStatement { .. } => "ReturnStatement",
            Node::Unsupported => "Unsupported",
        }
    }

    /// Direct children in emission order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Ast { body } => body.iter().collect(),
            Node::Block { value, .. } => value.iter().collect(),
            Node::TypeDeclaration {
                type_name, body, ..
            } => vec![type_name.as_ref(), body.as_ref()],
            Node::FunctionDeclaration {
                return_type,
                function_name,
                arg_list,
                body,
                ..
            } => {
                let mut out: Vec<&Node> = return_type.iter().map(|t| t.as_ref()).collect();
                out.push(function_name);
                out.extend(arg_list.iter());
                out.push(body);
                out
            }
            Node::VariableDeclarator(decl) => decl.children(),
            Node::VariableDeclaration { declarator } => vec![declarator.as_ref()],
            Node::MemberDeclaration { declarator, .. } => vec![declarator.as_ref()],
            Node::PropertyDeclaration {
                declarator,
                content,
                ..
            } => {
                let mut out = decl_head(declarator);
                out.extend(content.values());
                out.extend(declarator.default_value.as_deref());
                out
            }
            Node::StaticAccess { curr, next } => {
                let mut out = vec![curr.as_ref()];
                out.extend(next.as_deref());
                out
            }
            Node::ImportStatement { target }
            | Node::ArrayStaticAccess { target }
            | Node::ObjectCreateExpression { target } => vec![target.as_ref()],
            Node::Call { callee, args } => {
                let mut out = vec![callee.as_ref()];
                out.extend(args.iter());
                out
            }
            Node::ExpressionAccess { left, right } | Node::InfixExpression { left, right, .. } => {
                vec![left.as_ref(), right.as_ref()]
            }
            Node::ArrayAccessExpression { src, index } => vec![src.as_ref(), index.as_ref()],
            Node::Assignment { dest, src } => vec![dest.as_ref(), src.as_ref()],
            Node::IfStatement { condition, body } | Node::WhileStatement { condition, body } => {
                vec![condition.as_ref(), body.as_ref()]
            }
            Node::ReturnStatement { value } => vec![value.as_ref()],
            Node::Identifier { .. }
            | Node::StringLiteral { .. }
            | Node::NumberLiteral { .. }
            | Node::BooleanLiteral { .. }
            | Node::Unsupported => Vec::new(),
        }
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().into_iter().map(Node::node_count).sum::<usize>()
    }

    /// Number of nodes in this subtree with an unknown discriminator.
    pub fn unsupported_count(&self) -> usize {
        let own = usize::from(matches!(self, Node::Unsupported));
        own + self
            .children()
            .into_iter()
            .map(Node::unsupported_count)
            .sum::<usize>()
    }
}

impl Declarator {
    fn children(&self) -> Vec<&Node> {
        let mut out = decl_head(self);
        out.extend(self.default_value.as_deref());
        out
    }
}

/// Writes a property's declarator with its `"type": "VariableDeclarator"` tag,
/// matching the shape the parser emits.
fn serialize_tagged_declarator<S: Serializer>(
    decl: &Declarator,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    #[serde(tag = "type")]
    enum Tagged<'a> {
        VariableDeclarator(&'a Declarator),
    }

    Tagged::VariableDeclarator(decl).serialize(serializer)
}

fn decl_head(decl: &Declarator) -> Vec<&Node> {
    vec![decl.var_type.as_ref(), decl.var_name.as_ref()]
}
