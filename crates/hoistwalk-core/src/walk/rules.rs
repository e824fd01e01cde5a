//! Built-in recursion rules, one per node kind of the schema.

use crate::kind::NodeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// A single, possibly absent, child node.
    Node,
    /// An ordered child list, possibly containing holes.
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRule {
    pub name: &'static str,
    pub arity: Arity,
}

const fn node(name: &'static str) -> SlotRule {
    SlotRule {
        name,
        arity: Arity::Node,
    }
}

const fn list(name: &'static str) -> SlotRule {
    SlotRule {
        name,
        arity: Arity::List,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Walk the listed slots in order with the current environment.
    Slots(&'static [SlotRule]),
    /// Walk every child the node holds, in field order.
    Children,
    /// Top-level statement list under a fresh frame.
    Program,
    /// Name, parameters and body under a fresh frame.
    Function,
    /// Caught pattern and handler body under a fresh frame.
    Catch,
}

pub(crate) const PROGRAM_BODY: SlotRule = list("body");
pub(crate) const FUNCTION_ID: SlotRule = node("id");
pub(crate) const FUNCTION_PARAMS: SlotRule = list("params");
pub(crate) const FUNCTION_BODY: SlotRule = node("body");
pub(crate) const CATCH_PARAM: SlotRule = node("param");
pub(crate) const CATCH_BODY: SlotRule = node("body");

const ID_INIT: &[SlotRule] = &[node("id"), node("init")];
const DECLARATIONS: &[SlotRule] = &[list("declarations")];
const EXPRESSIONS: &[SlotRule] = &[list("expressions")];
const PROPERTIES: &[SlotRule] = &[list("properties")];
const ELEMENTS: &[SlotRule] = &[list("elements")];
const BODY_LIST: &[SlotRule] = &[list("body")];
const KEY_VALUE: &[SlotRule] = &[node("key"), node("value")];
const CLASS: &[SlotRule] = &[node("id"), node("superClass"), node("body")];
const LABEL: &[SlotRule] = &[node("label")];
const EXPRESSION: &[SlotRule] = &[node("expression")];
const TEST_BRANCHES: &[SlotRule] = &[node("test"), node("consequent"), node("alternate")];
const SWITCH_CASE: &[SlotRule] = &[node("test"), list("consequent")];
const SWITCH: &[SlotRule] = &[node("discriminant"), list("cases")];
const ARGUMENT: &[SlotRule] = &[node("argument")];
const TRY: &[SlotRule] = &[node("block"), node("handler"), node("finalizer")];
const TEST_BODY: &[SlotRule] = &[node("test"), node("body")];
const FOR: &[SlotRule] = &[node("init"), node("test"), node("update"), node("body")];
const FOR_EACH: &[SlotRule] = &[node("left"), node("right"), node("body")];
const LEFT_RIGHT: &[SlotRule] = &[node("left"), node("right")];
const CALL: &[SlotRule] = &[node("callee"), list("arguments")];
const LABELED: &[SlotRule] = &[node("label"), node("body")];
const MEMBER: &[SlotRule] = &[node("object"), node("property")];
const EXPORT_NAMED: &[SlotRule] = &[node("declaration"), list("specifiers"), node("source")];
const EXPORT_DEFAULT: &[SlotRule] = &[node("declaration")];
const EXPORT_ALL: &[SlotRule] = &[node("exported"), node("source")];
const EXPORT_SPECIFIER: &[SlotRule] = &[node("local"), node("exported")];
const IMPORT: &[SlotRule] = &[list("specifiers"), node("source")];
const IMPORT_SPECIFIER: &[SlotRule] = &[node("imported"), node("local")];
const LOCAL: &[SlotRule] = &[node("local")];
const TEMPLATE: &[SlotRule] = &[list("quasis"), list("expressions")];
const TAGGED_TEMPLATE: &[SlotRule] = &[node("tag"), node("quasi")];

impl NodeKind {
    /// The structural recursion rule for this kind; `None` marks a leaf.
    pub fn rule(&self) -> Option<Rule> {
        use NodeKind::*;

        let slots = match self {
            Program => return Some(Rule::Program),
            FunctionDeclaration | FunctionExpression | ArrowFunctionExpression => {
                return Some(Rule::Function);
            }
            CatchClause => return Some(Rule::Catch),
            ChainExpression | ParenthesizedExpression | AwaitExpression | ImportExpression => {
                return Some(Rule::Children);
            }

            VariableDeclaration => DECLARATIONS,
            VariableDeclarator => ID_INIT,
            SequenceExpression => EXPRESSIONS,
            ObjectPattern | ObjectExpression => PROPERTIES,
            ArrayPattern | ArrayExpression => ELEMENTS,
            BlockStatement | ClassBody => BODY_LIST,
            Property | MethodDefinition | PropertyDefinition | ClassProperty => KEY_VALUE,
            ClassDeclaration | ClassExpression => CLASS,
            BreakStatement | ContinueStatement => LABEL,
            ExpressionStatement => EXPRESSION,
            IfStatement | ConditionalExpression => TEST_BRANCHES,
            SwitchCase => SWITCH_CASE,
            SwitchStatement => SWITCH,
            ThrowStatement | UnaryExpression | ReturnStatement | RestElement | SpreadElement
            | YieldExpression | UpdateExpression => ARGUMENT,
            TryStatement => TRY,
            WhileStatement | DoWhileStatement => TEST_BODY,
            ForStatement => FOR,
            ForInStatement | ForOfStatement => FOR_EACH,
            BinaryExpression | LogicalExpression | AssignmentPattern | AssignmentExpression => {
                LEFT_RIGHT
            }
            NewExpression | CallExpression => CALL,
            LabeledStatement => LABELED,
            MemberExpression => MEMBER,
            ExportNamedDeclaration => EXPORT_NAMED,
            ExportDefaultDeclaration => EXPORT_DEFAULT,
            ExportAllDeclaration => EXPORT_ALL,
            ExportSpecifier => EXPORT_SPECIFIER,
            ImportDeclaration => IMPORT,
            ImportSpecifier => IMPORT_SPECIFIER,
            ImportDefaultSpecifier | ImportNamespaceSpecifier => LOCAL,
            TemplateLiteral => TEMPLATE,
            TaggedTemplateExpression => TAGGED_TEMPLATE,

            Identifier | PrivateIdentifier | Literal | ThisExpression | Super | MetaProperty
            | TemplateElement | EmptyStatement | DebuggerStatement | Other(_) => return None,
        };
        Some(Rule::Slots(slots))
    }
}
