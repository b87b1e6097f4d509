//! Expression trees: predicates, operators, property and parameter references.
//!
//! Expressions are plain values. Variables and parameters inside them are
//! identity handles, so cloning an expression never creates new variables.
//!
//! # Precedence
//!
//! Tightest first:
//! ```text
//! atoms (literals, params, properties, calls, lists, maps)
//! ^          (power)
//! * / %      (multiplicative)
//! + -        (additive)
//! NOT
//! = <> < > <= >= =~ IN CONTAINS STARTS WITH ENDS WITH, IS [NOT] NULL
//! AND
//! XOR
//! OR
//! ```
//! The renderer uses [`Expression::precedence`] to decide where parentheses go.
//!
//! # Explicit groups vs. shorthand extension
//!
//! [`and`]/[`or`] build a fresh boolean group around their operands, while the
//! [`Expression::and`]/[`Expression::or`] methods extend an existing group of
//! the same operator, so `a.and(b).and(c)` is one three-operand `AND` group.

use super::{
    errors::ValidationError,
    functions::FunctionCall,
    value::Value,
    variable::{Node, Param, Relationship, Var, Variable},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Equal,            // =
    NotEqual,         // <>
    LessThan,         // <
    GreaterThan,      // >
    LessThanEqual,    // <=
    GreaterThanEqual, // >=
    Contains,         // CONTAINS
    StartsWith,       // STARTS WITH
    EndsWith,         // ENDS WITH
    In,               // IN
    RegexMatch,       // =~
}

impl ComparisonOp {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonOp::Equal => "=",
            ComparisonOp::NotEqual => "<>",
            ComparisonOp::LessThan => "<",
            ComparisonOp::GreaterThan => ">",
            ComparisonOp::LessThanEqual => "<=",
            ComparisonOp::GreaterThanEqual => ">=",
            ComparisonOp::Contains => "CONTAINS",
            ComparisonOp::StartsWith => "STARTS WITH",
            ComparisonOp::EndsWith => "ENDS WITH",
            ComparisonOp::In => "IN",
            ComparisonOp::RegexMatch => "=~",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    And,
    Or,
    Xor,
}

impl BooleanOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BooleanOp::And => "AND",
            BooleanOp::Or => "OR",
            BooleanOp::Xor => "XOR",
        }
    }

    fn precedence(self) -> Precedence {
        match self {
            BooleanOp::And => Precedence::And,
            BooleanOp::Or => Precedence::Or,
            BooleanOp::Xor => Precedence::Xor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Addition,       // +
    Subtraction,    // -
    Multiplication, // *
    Division,       // /
    Modulo,         // %
    Power,          // ^
}

impl ArithmeticOp {
    pub fn as_str(self) -> &'static str {
        match self {
            ArithmeticOp::Addition => "+",
            ArithmeticOp::Subtraction => "-",
            ArithmeticOp::Multiplication => "*",
            ArithmeticOp::Division => "/",
            ArithmeticOp::Modulo => "%",
            ArithmeticOp::Power => "^",
        }
    }

    fn precedence(self) -> Precedence {
        match self {
            ArithmeticOp::Addition | ArithmeticOp::Subtraction => Precedence::Additive,
            ArithmeticOp::Multiplication | ArithmeticOp::Division | ArithmeticOp::Modulo => {
                Precedence::Multiplicative
            }
            ArithmeticOp::Power => Precedence::Power,
        }
    }
}

/// Binding strength, loosest first so that `Ord` reads "binds tighter than"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Or,
    Xor,
    And,
    Comparison,
    Not,
    Additive,
    Multiplicative,
    Power,
    Atom,
}

/// `variable.key`
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRef {
    pub variable: Variable,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A node, relationship or plain variable, rendered as its identifier
    Variable(Variable),
    /// `n1.title`
    Property(PropertyRef),
    /// `$param0`, value hoisted into the parameter map
    Param(Param),
    /// A value written inline into the query text
    Literal(Value),
    /// `[a, b, c]`
    List(Vec<Expression>),
    /// `{key: value, ...}`
    Map(Vec<(String, Expression)>),
    Comparison {
        op: ComparisonOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// `x IS NULL` / `x IS NOT NULL`
    IsNull {
        operand: Box<Expression>,
        negated: bool,
    },
    Arithmetic {
        op: ArithmeticOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// Two or more operands joined by one boolean operator
    Boolean {
        op: BooleanOp,
        operands: Vec<Expression>,
    },
    Not(Box<Expression>),
    Function(FunctionCall),
}

impl Expression {
    pub fn precedence(&self) -> Precedence {
        match self {
            Expression::Variable(_)
            | Expression::Property(_)
            | Expression::Param(_)
            | Expression::Literal(_)
            | Expression::List(_)
            | Expression::Map(_)
            | Expression::Function(_) => Precedence::Atom,
            Expression::Comparison { .. } | Expression::IsNull { .. } => Precedence::Comparison,
            Expression::Arithmetic { op, .. } => op.precedence(),
            Expression::Boolean { op, .. } => op.precedence(),
            Expression::Not(_) => Precedence::Not,
        }
    }

    /// Shorthand `AND` extension: joins the existing `AND` group when `self`
    /// is one, otherwise wraps both sides in a new group.
    pub fn and(self, other: impl Into<Expression>) -> Expression {
        self.extend_group(BooleanOp::And, other.into())
    }

    /// Shorthand `OR` extension, see [`Expression::and`]
    pub fn or(self, other: impl Into<Expression>) -> Expression {
        self.extend_group(BooleanOp::Or, other.into())
    }

    fn extend_group(self, op: BooleanOp, other: Expression) -> Expression {
        match self {
            Expression::Boolean {
                op: existing,
                mut operands,
            } if existing == op => {
                operands.push(other);
                Expression::Boolean { op, operands }
            }
            root => Expression::Boolean {
                op,
                operands: vec![root, other],
            },
        }
    }
}

impl From<Variable> for Expression {
    fn from(variable: Variable) -> Self {
        Expression::Variable(variable)
    }
}

impl From<Node> for Expression {
    fn from(node: Node) -> Self {
        Expression::Variable(node.into())
    }
}

impl From<&Node> for Expression {
    fn from(node: &Node) -> Self {
        Expression::Variable(node.into())
    }
}

impl From<Relationship> for Expression {
    fn from(rel: Relationship) -> Self {
        Expression::Variable(rel.into())
    }
}

impl From<&Relationship> for Expression {
    fn from(rel: &Relationship) -> Self {
        Expression::Variable(rel.into())
    }
}

impl From<Var> for Expression {
    fn from(var: Var) -> Self {
        Expression::Variable(var.into())
    }
}

impl From<&Var> for Expression {
    fn from(var: &Var) -> Self {
        Expression::Variable(var.into())
    }
}

impl From<Param> for Expression {
    fn from(param: Param) -> Self {
        Expression::Param(param)
    }
}

impl From<&Param> for Expression {
    fn from(param: &Param) -> Self {
        Expression::Param(param.clone())
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Expression::Literal(value)
    }
}

impl From<PropertyRef> for Expression {
    fn from(property: PropertyRef) -> Self {
        Expression::Property(property)
    }
}

impl From<FunctionCall> for Expression {
    fn from(call: FunctionCall) -> Self {
        Expression::Function(call)
    }
}

/// Inline literal: `lit("x")` renders as `'x'`, unlike `Param::new("x")`
pub fn lit(value: impl Into<Value>) -> Expression {
    Expression::Literal(value.into())
}

/// `[item, ...]`
pub fn list<I, E>(items: I) -> Expression
where
    I: IntoIterator<Item = E>,
    E: Into<Expression>,
{
    Expression::List(items.into_iter().map(Into::into).collect())
}

/// `{key: value, ...}` in the given key order
pub fn map<I, K, E>(entries: I) -> Expression
where
    I: IntoIterator<Item = (K, E)>,
    K: Into<String>,
    E: Into<Expression>,
{
    Expression::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect(),
    )
}

fn comparison(op: ComparisonOp, left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    Expression::Comparison {
        op,
        left: Box::new(left.into()),
        right: Box::new(right.into()),
    }
}

pub fn eq(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    comparison(ComparisonOp::Equal, left, right)
}

pub fn neq(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    comparison(ComparisonOp::NotEqual, left, right)
}

pub fn lt(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    comparison(ComparisonOp::LessThan, left, right)
}

pub fn gt(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    comparison(ComparisonOp::GreaterThan, left, right)
}

pub fn lte(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    comparison(ComparisonOp::LessThanEqual, left, right)
}

pub fn gte(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    comparison(ComparisonOp::GreaterThanEqual, left, right)
}

pub fn contains(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    comparison(ComparisonOp::Contains, left, right)
}

pub fn starts_with(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    comparison(ComparisonOp::StartsWith, left, right)
}

pub fn ends_with(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    comparison(ComparisonOp::EndsWith, left, right)
}

pub fn in_list(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    comparison(ComparisonOp::In, left, right)
}

pub fn regex_match(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    comparison(ComparisonOp::RegexMatch, left, right)
}

pub fn is_null(operand: impl Into<Expression>) -> Expression {
    Expression::IsNull {
        operand: Box::new(operand.into()),
        negated: false,
    }
}

pub fn is_not_null(operand: impl Into<Expression>) -> Expression {
    Expression::IsNull {
        operand: Box::new(operand.into()),
        negated: true,
    }
}

pub fn not(operand: impl Into<Expression>) -> Expression {
    Expression::Not(Box::new(operand.into()))
}

/// Explicit `left AND right` group; operands are kept as given
pub fn and(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    Expression::Boolean {
        op: BooleanOp::And,
        operands: vec![left.into(), right.into()],
    }
}

/// Explicit `left OR right` group; operands are kept as given
pub fn or(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    Expression::Boolean {
        op: BooleanOp::Or,
        operands: vec![left.into(), right.into()],
    }
}

pub fn xor(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    Expression::Boolean {
        op: BooleanOp::Xor,
        operands: vec![left.into(), right.into()],
    }
}

fn boolean_group(op: BooleanOp, operands: Vec<Expression>) -> Result<Expression, ValidationError> {
    if operands.len() < 2 {
        return Err(ValidationError::TooFewOperands {
            operator: op.as_str(),
            found: operands.len(),
        });
    }
    Ok(Expression::Boolean { op, operands })
}

/// One `AND` group over all operands (at least two)
pub fn and_all(operands: Vec<Expression>) -> Result<Expression, ValidationError> {
    boolean_group(BooleanOp::And, operands)
}

/// One `OR` group over all operands (at least two)
pub fn or_all(operands: Vec<Expression>) -> Result<Expression, ValidationError> {
    boolean_group(BooleanOp::Or, operands)
}

fn arithmetic(op: ArithmeticOp, left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    Expression::Arithmetic {
        op,
        left: Box::new(left.into()),
        right: Box::new(right.into()),
    }
}

pub fn plus(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    arithmetic(ArithmeticOp::Addition, left, right)
}

pub fn minus(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    arithmetic(ArithmeticOp::Subtraction, left, right)
}

pub fn times(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    arithmetic(ArithmeticOp::Multiplication, left, right)
}

pub fn divide(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    arithmetic(ArithmeticOp::Division, left, right)
}

pub fn modulo(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    arithmetic(ArithmeticOp::Modulo, left, right)
}

pub fn pow(left: impl Into<Expression>, right: impl Into<Expression>) -> Expression {
    arithmetic(ArithmeticOp::Power, left, right)
}
