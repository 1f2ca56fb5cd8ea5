use num_bigint::BigInt;

use crate::loc::Loc;
use crate::options::SourceType;

pub type P<T> = Box<T>;

pub fn p<T>(node: T) -> P<T> {
    Box::new(node)
}

#[derive(Debug)]
pub struct Program {
    pub loc: Loc,
    pub body: Vec<Statement>,
    pub source_type: SourceType,
    pub has_use_strict_directive: bool,
}

#[derive(Debug, Clone)]
pub struct Identifier {
    pub loc: Loc,
    pub name: String,
}

#[derive(Debug)]
pub enum Statement {
    VarDecl(VariableDeclaration),
    FuncDecl(Function),
    ClassDecl(Class),
    Expr(ExpressionStatement),
    Block(Block),
    If(IfStatement),
    Switch(SwitchStatement),
    For(ForStatement),
    ForEach(ForEachStatement),
    While(WhileStatement),
    DoWhile(DoWhileStatement),
    With(WithStatement),
    Try(TryStatement),
    Throw(ThrowStatement),
    Return(ReturnStatement),
    Break(BreakStatement),
    Continue(ContinueStatement),
    Labeled(LabeledStatement),
    Empty(Loc),
    Debugger(Loc),
    Import(ImportDeclaration),
    ExportNamed(ExportNamedDeclaration),
    ExportDefault(ExportDefaultDeclaration),
    ExportAll(ExportAllDeclaration),
}

impl Statement {
    pub fn loc(&self) -> Loc {
        match self {
            Statement::VarDecl(stmt) => stmt.loc,
            Statement::FuncDecl(stmt) => stmt.loc,
            Statement::ClassDecl(stmt) => stmt.loc,
            Statement::Expr(stmt) => stmt.loc,
            Statement::Block(stmt) => stmt.loc,
            Statement::If(stmt) => stmt.loc,
            Statement::Switch(stmt) => stmt.loc,
            Statement::For(stmt) => stmt.loc,
            Statement::ForEach(stmt) => stmt.loc,
            Statement::While(stmt) => stmt.loc,
            Statement::DoWhile(stmt) => stmt.loc,
            Statement::With(stmt) => stmt.loc,
            Statement::Try(stmt) => stmt.loc,
            Statement::Throw(stmt) => stmt.loc,
            Statement::Return(stmt) => stmt.loc,
            Statement::Break(stmt) => stmt.loc,
            Statement::Continue(stmt) => stmt.loc,
            Statement::Labeled(stmt) => stmt.loc,
            Statement::Empty(loc) => *loc,
            Statement::Debugger(loc) => *loc,
            Statement::Import(stmt) => stmt.loc,
            Statement::ExportNamed(stmt) => stmt.loc,
            Statement::ExportDefault(stmt) => stmt.loc,
            Statement::ExportAll(stmt) => stmt.loc,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

#[derive(Debug)]
pub struct VariableDeclaration {
    pub loc: Loc,
    pub kind: VarKind,
    pub declarations: Vec<VariableDeclarator>,
}

impl VariableDeclaration {
    pub fn iter_bound_names<'a, F: FnMut(&'a Identifier)>(&'a self, f: &mut F) {
        for decl in &self.declarations {
            decl.id.iter_bound_names(f)
        }
    }
}

#[derive(Debug)]
pub struct VariableDeclarator {
    pub loc: Loc,
    pub id: P<Pattern>,
    pub init: Option<P<Expression>>,
}

#[derive(Debug)]
pub struct Function {
    pub loc: Loc,
    pub id: Option<P<Identifier>>,
    pub params: Vec<FunctionParam>,
    pub body: P<FunctionBody>,
    pub is_async: bool,
    pub is_generator: bool,
    // Whether the function has a "use strict" directive of its own
    pub has_use_strict_directive: bool,
    // Whether the function is in strict mode, which may be inherited from the surrounding code
    pub is_strict_mode: bool,
}

#[derive(Debug)]
pub enum FunctionParam {
    Pattern(Pattern),
    Rest(RestElement),
}

impl FunctionParam {
    pub fn iter_bound_names<'a, F: FnMut(&'a Identifier)>(&'a self, f: &mut F) {
        match self {
            FunctionParam::Pattern(pattern) => pattern.iter_bound_names(f),
            FunctionParam::Rest(RestElement { argument, .. }) => argument.iter_bound_names(f),
        }
    }

    /// A simple parameter is a lone identifier with no default
    pub fn is_simple(&self) -> bool {
        matches!(self, FunctionParam::Pattern(Pattern::Id(_)))
    }
}

#[derive(Debug)]
pub enum FunctionBody {
    Block(Block),
    Expression(Expression),
}

#[derive(Debug)]
pub struct Class {
    pub loc: Loc,
    pub id: Option<P<Identifier>>,
    pub super_class: Option<P<Expression>>,
    pub body: Vec<ClassMethod>,
}

#[derive(Debug)]
pub struct ClassMethod {
    pub loc: Loc,
    pub key: P<Expression>,
    pub value: P<Function>,
    pub kind: ClassMethodKind,
    pub is_computed: bool,
    pub is_static: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClassMethodKind {
    Method,
    Constructor,
    Get,
    Set,
}

#[derive(Debug)]
pub struct ExpressionStatement {
    pub loc: Loc,
    pub expr: P<Expression>,
    /// Raw text of the string literal, without quotes, when this statement is part of a
    /// directive prologue
    pub directive: Option<String>,
}

#[derive(Debug)]
pub struct Block {
    pub loc: Loc,
    pub body: Vec<Statement>,
}

#[derive(Debug)]
pub struct IfStatement {
    pub loc: Loc,
    pub test: P<Expression>,
    pub conseq: P<Statement>,
    pub altern: Option<P<Statement>>,
}

#[derive(Debug)]
pub struct SwitchStatement {
    pub loc: Loc,
    pub discriminant: P<Expression>,
    pub cases: Vec<SwitchCase>,
}

#[derive(Debug)]
pub struct SwitchCase {
    pub loc: Loc,
    pub test: Option<P<Expression>>,
    pub body: Vec<Statement>,
}

#[derive(Debug)]
pub struct ForStatement {
    pub loc: Loc,
    pub init: Option<P<ForInit>>,
    pub test: Option<P<Expression>>,
    pub update: Option<P<Expression>>,
    pub body: P<Statement>,
}

#[derive(Debug)]
pub enum ForInit {
    Expression(Expression),
    VarDecl(VariableDeclaration),
}

#[derive(Debug)]
pub struct ForEachStatement {
    pub loc: Loc,
    pub kind: ForEachKind,
    pub left: P<ForEachInit>,
    pub right: P<Expression>,
    pub body: P<Statement>,
    pub is_await: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ForEachKind {
    In,
    Of,
}

#[derive(Debug)]
pub enum ForEachInit {
    VarDecl(VariableDeclaration),
    Pattern(Pattern),
}

#[derive(Debug)]
pub struct WhileStatement {
    pub loc: Loc,
    pub test: P<Expression>,
    pub body: P<Statement>,
}

#[derive(Debug)]
pub struct DoWhileStatement {
    pub loc: Loc,
    pub test: P<Expression>,
    pub body: P<Statement>,
}

#[derive(Debug)]
pub struct WithStatement {
    pub loc: Loc,
    pub object: P<Expression>,
    pub body: P<Statement>,
}

#[derive(Debug)]
pub struct TryStatement {
    pub loc: Loc,
    pub block: P<Block>,
    pub handler: Option<P<CatchClause>>,
    pub finalizer: Option<P<Block>>,
}

#[derive(Debug)]
pub struct CatchClause {
    pub loc: Loc,
    pub param: Option<P<Pattern>>,
    pub body: P<Block>,
}

#[derive(Debug)]
pub struct ThrowStatement {
    pub loc: Loc,
    pub argument: P<Expression>,
}

#[derive(Debug)]
pub struct ReturnStatement {
    pub loc: Loc,
    pub argument: Option<P<Expression>>,
}

#[derive(Debug)]
pub struct BreakStatement {
    pub loc: Loc,
    pub label: Option<P<Identifier>>,
}

#[derive(Debug)]
pub struct ContinueStatement {
    pub loc: Loc,
    pub label: Option<P<Identifier>>,
}

#[derive(Debug)]
pub struct LabeledStatement {
    pub loc: Loc,
    pub label: P<Identifier>,
    pub body: P<Statement>,
}

#[derive(Debug)]
pub struct ImportDeclaration {
    pub loc: Loc,
    pub specifiers: Vec<ImportSpecifier>,
    pub source: StringLiteral,
}

#[derive(Debug)]
pub enum ImportSpecifier {
    Default(ImportDefaultSpecifier),
    Namespace(ImportNamespaceSpecifier),
    Named(ImportNamedSpecifier),
}

#[derive(Debug)]
pub struct ImportDefaultSpecifier {
    pub loc: Loc,
    pub local: P<Identifier>,
}

#[derive(Debug)]
pub struct ImportNamespaceSpecifier {
    pub loc: Loc,
    pub local: P<Identifier>,
}

#[derive(Debug)]
pub struct ImportNamedSpecifier {
    pub loc: Loc,
    pub imported: P<Identifier>,
    pub local: P<Identifier>,
}

#[derive(Debug)]
pub struct ExportNamedDeclaration {
    pub loc: Loc,
    pub declaration: Option<P<Statement>>,
    pub specifiers: Vec<ExportSpecifier>,
    pub source: Option<StringLiteral>,
}

#[derive(Debug)]
pub struct ExportSpecifier {
    pub loc: Loc,
    pub local: P<Identifier>,
    pub exported: P<Identifier>,
}

#[derive(Debug)]
pub struct ExportDefaultDeclaration {
    pub loc: Loc,
    pub declaration: ExportDefaultKind,
}

#[derive(Debug)]
pub enum ExportDefaultKind {
    Function(Function),
    Class(Class),
    Expression(P<Expression>),
}

#[derive(Debug)]
pub struct ExportAllDeclaration {
    pub loc: Loc,
    pub exported: Option<P<Identifier>>,
    pub source: StringLiteral,
}

#[derive(Debug)]
pub enum Expression {
    Id(Identifier),
    Null(Loc),
    Boolean(BooleanLiteral),
    Number(NumberLiteral),
    String(StringLiteral),
    BigInt(BigIntLiteral),
    RegExp(RegExpLiteral),
    Unary(UnaryExpression),
    Binary(BinaryExpression),
    Logical(LogicalExpression),
    Assign(AssignmentExpression),
    Update(UpdateExpression),
    Member(MemberExpression),
    Chain(ChainExpression),
    Conditional(ConditionalExpression),
    Call(CallExpression),
    New(NewExpression),
    Sequence(SequenceExpression),
    Array(ArrayExpression),
    Object(ObjectExpression),
    Function(Function),
    ArrowFunction(Function),
    Class(Class),
    This(Loc),
    Super(Loc),
    Await(AwaitExpression),
    Yield(YieldExpression),
    Template(TemplateLiteral),
    TaggedTemplate(TaggedTemplateExpression),
    MetaProperty(MetaProperty),
    ImportCall(ImportExpression),
    Paren(ParenthesizedExpression),
}

impl Expression {
    pub fn loc(&self) -> Loc {
        match self {
            Expression::Id(expr) => expr.loc,
            Expression::Null(loc) => *loc,
            Expression::Boolean(expr) => expr.loc,
            Expression::Number(expr) => expr.loc,
            Expression::String(expr) => expr.loc,
            Expression::BigInt(expr) => expr.loc,
            Expression::RegExp(expr) => expr.loc,
            Expression::Unary(expr) => expr.loc,
            Expression::Binary(expr) => expr.loc,
            Expression::Logical(expr) => expr.loc,
            Expression::Assign(expr) => expr.loc,
            Expression::Update(expr) => expr.loc,
            Expression::Member(expr) => expr.loc,
            Expression::Chain(expr) => expr.loc,
            Expression::Conditional(expr) => expr.loc,
            Expression::Call(expr) => expr.loc,
            Expression::New(expr) => expr.loc,
            Expression::Sequence(expr) => expr.loc,
            Expression::Array(expr) => expr.loc,
            Expression::Object(expr) => expr.loc,
            Expression::Function(expr) => expr.loc,
            Expression::ArrowFunction(expr) => expr.loc,
            Expression::Class(expr) => expr.loc,
            Expression::This(loc) => *loc,
            Expression::Super(loc) => *loc,
            Expression::Await(expr) => expr.loc,
            Expression::Yield(expr) => expr.loc,
            Expression::Template(expr) => expr.loc,
            Expression::TaggedTemplate(expr) => expr.loc,
            Expression::MetaProperty(expr) => expr.loc,
            Expression::ImportCall(expr) => expr.loc,
            Expression::Paren(expr) => expr.loc,
        }
    }
}

#[derive(Debug)]
pub struct BooleanLiteral {
    pub loc: Loc,
    pub value: bool,
}

#[derive(Debug)]
pub struct NumberLiteral {
    pub loc: Loc,
    pub value: f64,
}

#[derive(Debug)]
pub struct StringLiteral {
    pub loc: Loc,
    pub value: String,
}

#[derive(Debug)]
pub struct BigIntLiteral {
    pub loc: Loc,
    pub value: BigInt,
}

#[derive(Debug)]
pub struct RegExpLiteral {
    pub loc: Loc,
    pub pattern: String,
    pub flags: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UnaryOperator {
    Plus,
    Minus,
    LogicalNot,
    BitwiseNot,
    TypeOf,
    Void,
    Delete,
}

impl UnaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::LogicalNot => "!",
            UnaryOperator::BitwiseNot => "~",
            UnaryOperator::TypeOf => "typeof",
            UnaryOperator::Void => "void",
            UnaryOperator::Delete => "delete",
        }
    }
}

#[derive(Debug)]
pub struct UnaryExpression {
    pub loc: Loc,
    pub operator: UnaryOperator,
    pub argument: P<Expression>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Exponent,
    EqEq,
    NotEq,
    EqEqEq,
    NotEqEq,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
    Xor,
    ShiftLeft,
    ShiftRightArithmetic,
    ShiftRightLogical,
    In,
    InstanceOf,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Remainder => "%",
            BinaryOperator::Exponent => "**",
            BinaryOperator::EqEq => "==",
            BinaryOperator::NotEq => "!=",
            BinaryOperator::EqEqEq => "===",
            BinaryOperator::NotEqEq => "!==",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::And => "&",
            BinaryOperator::Or => "|",
            BinaryOperator::Xor => "^",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRightArithmetic => ">>",
            BinaryOperator::ShiftRightLogical => ">>>",
            BinaryOperator::In => "in",
            BinaryOperator::InstanceOf => "instanceof",
        }
    }
}

#[derive(Debug)]
pub struct BinaryExpression {
    pub loc: Loc,
    pub operator: BinaryOperator,
    pub left: P<Expression>,
    pub right: P<Expression>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LogicalOperator {
    And,
    Or,
    NullishCoalesce,
}

impl LogicalOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "&&",
            LogicalOperator::Or => "||",
            LogicalOperator::NullishCoalesce => "??",
        }
    }
}

#[derive(Debug)]
pub struct LogicalExpression {
    pub loc: Loc,
    pub operator: LogicalOperator,
    pub left: P<Expression>,
    pub right: P<Expression>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AssignmentOperator {
    Equals,
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Exponent,
    And,
    Or,
    Xor,
    ShiftLeft,
    ShiftRightArithmetic,
    ShiftRightLogical,
    LogicalAnd,
    LogicalOr,
    NullishCoalesce,
}

impl AssignmentOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentOperator::Equals => "=",
            AssignmentOperator::Add => "+=",
            AssignmentOperator::Subtract => "-=",
            AssignmentOperator::Multiply => "*=",
            AssignmentOperator::Divide => "/=",
            AssignmentOperator::Remainder => "%=",
            AssignmentOperator::Exponent => "**=",
            AssignmentOperator::And => "&=",
            AssignmentOperator::Or => "|=",
            AssignmentOperator::Xor => "^=",
            AssignmentOperator::ShiftLeft => "<<=",
            AssignmentOperator::ShiftRightArithmetic => ">>=",
            AssignmentOperator::ShiftRightLogical => ">>>=",
            AssignmentOperator::LogicalAnd => "&&=",
            AssignmentOperator::LogicalOr => "||=",
            AssignmentOperator::NullishCoalesce => "??=",
        }
    }
}

#[derive(Debug)]
pub struct AssignmentExpression {
    pub loc: Loc,
    pub operator: AssignmentOperator,
    pub left: P<Pattern>,
    pub right: P<Expression>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpdateOperator {
    Increment,
    Decrement,
}

impl UpdateOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateOperator::Increment => "++",
            UpdateOperator::Decrement => "--",
        }
    }
}

#[derive(Debug)]
pub struct UpdateExpression {
    pub loc: Loc,
    pub operator: UpdateOperator,
    pub argument: P<Expression>,
    pub is_prefix: bool,
}

#[derive(Debug)]
pub struct MemberExpression {
    pub loc: Loc,
    pub object: P<Expression>,
    pub property: P<Expression>,
    pub is_computed: bool,
    pub is_optional: bool,
}

/// Wraps the outermost node of a chain that contains at least one `?.` link
#[derive(Debug)]
pub struct ChainExpression {
    pub loc: Loc,
    pub expression: P<Expression>,
}

#[derive(Debug)]
pub struct ConditionalExpression {
    pub loc: Loc,
    pub test: P<Expression>,
    pub conseq: P<Expression>,
    pub altern: P<Expression>,
}

#[derive(Debug)]
pub struct CallExpression {
    pub loc: Loc,
    pub callee: P<Expression>,
    pub arguments: Vec<CallArgument>,
    pub is_optional: bool,
}

#[derive(Debug)]
pub enum CallArgument {
    Expression(Expression),
    Spread(SpreadElement),
}

#[derive(Debug)]
pub struct NewExpression {
    pub loc: Loc,
    pub callee: P<Expression>,
    pub arguments: Vec<CallArgument>,
}

#[derive(Debug)]
pub struct SequenceExpression {
    pub loc: Loc,
    pub expressions: Vec<Expression>,
}

#[derive(Debug)]
pub struct ArrayExpression {
    pub loc: Loc,
    pub elements: Vec<ArrayElement>,
}

#[derive(Debug)]
pub enum ArrayElement {
    Expression(Expression),
    Spread(SpreadElement),
    Hole,
}

#[derive(Debug)]
pub struct SpreadElement {
    pub loc: Loc,
    pub argument: P<Expression>,
}

#[derive(Debug)]
pub struct ObjectExpression {
    pub loc: Loc,
    pub properties: Vec<Property>,
}

#[derive(Debug)]
pub struct Property {
    pub loc: Loc,
    pub key: P<Expression>,
    /// None for plain shorthand properties. For shorthand properties with a default (a cover
    /// grammar shape that is only valid when resolved as a pattern) this holds the
    /// assignment expression.
    pub value: Option<P<Expression>>,
    pub is_computed: bool,
    pub is_method: bool,
    pub is_shorthand: bool,
    pub kind: PropertyKind,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyKind {
    Init,
    Get,
    Set,
    // For spread properties the key is the argument and all other fields are ignored
    Spread,
}

#[derive(Debug)]
pub struct AwaitExpression {
    pub loc: Loc,
    pub argument: P<Expression>,
}

#[derive(Debug)]
pub struct YieldExpression {
    pub loc: Loc,
    pub argument: Option<P<Expression>>,
    pub delegate: bool,
}

#[derive(Debug)]
pub struct TemplateLiteral {
    pub loc: Loc,
    pub quasis: Vec<TemplateElement>,
    pub expressions: Vec<Expression>,
}

#[derive(Debug)]
pub struct TemplateElement {
    pub loc: Loc,
    pub raw: String,
    /// None when the element contained an invalid escape sequence, which is permitted only in
    /// tagged templates
    pub cooked: Option<String>,
    pub is_tail: bool,
}

#[derive(Debug)]
pub struct TaggedTemplateExpression {
    pub loc: Loc,
    pub tag: P<Expression>,
    pub quasi: P<TemplateLiteral>,
}

/// `new.target` and `import.meta`
#[derive(Debug)]
pub struct MetaProperty {
    pub loc: Loc,
    pub meta: P<Identifier>,
    pub property: P<Identifier>,
}

#[derive(Debug)]
pub struct ImportExpression {
    pub loc: Loc,
    pub source: P<Expression>,
}

#[derive(Debug)]
pub struct ParenthesizedExpression {
    pub loc: Loc,
    pub expression: P<Expression>,
}

#[derive(Debug)]
pub enum Pattern {
    Id(Identifier),
    Array(ArrayPattern),
    Object(ObjectPattern),
    Assign(AssignmentPattern),
    /// A member expression or parenthesized target, valid only on the assignment side of a
    /// destructuring
    Expr(P<Expression>),
}

impl Pattern {
    pub fn loc(&self) -> Loc {
        match self {
            Pattern::Id(patt) => patt.loc,
            Pattern::Array(patt) => patt.loc,
            Pattern::Object(patt) => patt.loc,
            Pattern::Assign(patt) => patt.loc,
            Pattern::Expr(expr) => expr.loc(),
        }
    }

    pub fn iter_bound_names<'a, F: FnMut(&'a Identifier)>(&'a self, f: &mut F) {
        match self {
            Pattern::Id(id) => f(id),
            Pattern::Array(patt) => {
                for element in &patt.elements {
                    match element {
                        ArrayPatternElement::Pattern(pattern) => pattern.iter_bound_names(f),
                        ArrayPatternElement::Rest(rest) => rest.argument.iter_bound_names(f),
                        ArrayPatternElement::Hole => {}
                    }
                }
            }
            Pattern::Object(patt) => {
                for prop in &patt.properties {
                    prop.value.iter_bound_names(f)
                }
            }
            Pattern::Assign(patt) => patt.left.iter_bound_names(f),
            Pattern::Expr(_) => {}
        }
    }
}

#[derive(Debug)]
pub struct ArrayPattern {
    pub loc: Loc,
    pub elements: Vec<ArrayPatternElement>,
}

#[derive(Debug)]
pub enum ArrayPatternElement {
    Pattern(Pattern),
    Rest(RestElement),
    Hole,
}

#[derive(Debug)]
pub struct RestElement {
    pub loc: Loc,
    pub argument: P<Pattern>,
}

#[derive(Debug)]
pub struct ObjectPattern {
    pub loc: Loc,
    pub properties: Vec<ObjectPatternProperty>,
}

#[derive(Debug)]
pub struct ObjectPatternProperty {
    pub loc: Loc,
    pub key: Option<P<Expression>>,
    pub value: P<Pattern>,
    pub is_computed: bool,
    // For rest properties the value is the argument and all other fields are ignored
    pub is_rest: bool,
}

#[derive(Debug)]
pub struct AssignmentPattern {
    pub loc: Loc,
    pub left: P<Pattern>,
    pub right: P<Expression>,
}
