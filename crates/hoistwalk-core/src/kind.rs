//! Node kinds of the ESTree schema understood by the walker.

use std::fmt;

macro_rules! node_kinds {
    ($($variant:ident),* $(,)?) => {
        /// Discriminant of a tree node, mirroring the ESTree `type` string.
        ///
        /// Kinds outside the enumerated schema are carried verbatim in
        /// [`NodeKind::Other`] and treated as opaque leaves by the walker.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum NodeKind {
            $($variant,)*
            Other(String),
        }

        const KNOWN_KINDS: &[&str] = &[$(stringify!($variant)),*];

        impl NodeKind {
            pub fn as_str(&self) -> &str {
                match self {
                    $(NodeKind::$variant => stringify!($variant),)*
                    NodeKind::Other(name) => name,
                }
            }

            pub fn from_type(name: &str) -> Self {
                match name {
                    $(stringify!($variant) => NodeKind::$variant,)*
                    other => NodeKind::Other(other.to_string()),
                }
            }
        }
    };
}

node_kinds! {
    Program,
    // declarations
    VariableDeclaration,
    VariableDeclarator,
    FunctionDeclaration,
    ClassDeclaration,
    // expressions
    Identifier,
    PrivateIdentifier,
    Literal,
    ThisExpression,
    Super,
    MetaProperty,
    ArrayExpression,
    ObjectExpression,
    Property,
    FunctionExpression,
    ArrowFunctionExpression,
    ClassExpression,
    ClassBody,
    MethodDefinition,
    PropertyDefinition,
    ClassProperty,
    SequenceExpression,
    UnaryExpression,
    UpdateExpression,
    BinaryExpression,
    LogicalExpression,
    AssignmentExpression,
    ConditionalExpression,
    CallExpression,
    NewExpression,
    MemberExpression,
    ChainExpression,
    ParenthesizedExpression,
    ImportExpression,
    AwaitExpression,
    YieldExpression,
    SpreadElement,
    TemplateLiteral,
    TemplateElement,
    TaggedTemplateExpression,
    // patterns
    ObjectPattern,
    ArrayPattern,
    RestElement,
    AssignmentPattern,
    // statements
    ExpressionStatement,
    BlockStatement,
    EmptyStatement,
    DebuggerStatement,
    ReturnStatement,
    ThrowStatement,
    BreakStatement,
    ContinueStatement,
    LabeledStatement,
    IfStatement,
    SwitchStatement,
    SwitchCase,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    TryStatement,
    CatchClause,
    // modules
    ImportDeclaration,
    ImportSpecifier,
    ImportDefaultSpecifier,
    ImportNamespaceSpecifier,
    ExportNamedDeclaration,
    ExportDefaultDeclaration,
    ExportAllDeclaration,
    ExportSpecifier,
}

impl NodeKind {
    /// Every kind of the closed schema, in declaration order.
    pub fn known() -> impl Iterator<Item = NodeKind> {
        KNOWN_KINDS.iter().map(|name| NodeKind::from_type(name))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, NodeKind::Other(_))
    }

    /// Kinds that may stand in a binding position as a pattern.
    pub fn is_pattern(&self) -> bool {
        matches!(
            self,
            NodeKind::ObjectPattern
                | NodeKind::ArrayPattern
                | NodeKind::AssignmentPattern
                | NodeKind::RestElement
                | NodeKind::Identifier
        )
    }

    pub fn is_function(&self) -> bool {
        matches!(
            self,
            NodeKind::FunctionDeclaration
                | NodeKind::FunctionExpression
                | NodeKind::ArrowFunctionExpression
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for NodeKind {
    fn from(name: &str) -> Self {
        NodeKind::from_type(name)
    }
}

impl serde::Serialize for NodeKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
