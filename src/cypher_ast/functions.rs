//! Cypher function registry and typed call helpers
//!
//! Known functions are checked for argument count at construction time. Names
//! not in the registry (procedures, plugin functions like `apoc.*`) are only
//! checked for being well-formed dotted identifiers.

use std::collections::HashMap;

use super::{errors::ValidationError, expression::Expression};
use crate::utils::identifier_escaping::is_dotted_identifier;

/// Function signature entry
#[derive(Debug, Clone)]
pub struct FunctionSignature {
    /// Canonical spelling used when rendering
    pub name: &'static str,
    pub min_args: usize,
    /// `None` for variadic functions
    pub max_args: Option<usize>,
    /// Aggregates may take `DISTINCT`
    pub aggregate: bool,
}

impl FunctionSignature {
    fn accepts(&self, count: usize) -> bool {
        count >= self.min_args && self.max_args.is_none_or(|max| count <= max)
    }

    fn expected(&self) -> String {
        match self.max_args {
            Some(max) if max == self.min_args => max.to_string(),
            Some(max) => format!("{}..{}", self.min_args, max),
            None => format!("at least {}", self.min_args),
        }
    }
}

/// Get the signature of a known function, case-insensitively
pub fn get_function_signature(name: &str) -> Option<FunctionSignature> {
    let name_lower = name.to_lowercase();
    FUNCTION_SIGNATURES.get(name_lower.as_str()).cloned()
}

fn signature(
    name: &'static str,
    min_args: usize,
    max_args: Option<usize>,
    aggregate: bool,
) -> FunctionSignature {
    FunctionSignature {
        name,
        min_args,
        max_args,
        aggregate,
    }
}

lazy_static::lazy_static! {
    static ref FUNCTION_SIGNATURES: HashMap<String, FunctionSignature> = {
        let entries = [
            // ===== AGGREGATES =====
            signature("count", 1, Some(1), true),
            signature("collect", 1, Some(1), true),
            signature("sum", 1, Some(1), true),
            signature("avg", 1, Some(1), true),
            signature("min", 1, Some(1), true),
            signature("max", 1, Some(1), true),
            signature("stDev", 1, Some(1), true),
            signature("percentileCont", 2, Some(2), true),
            signature("percentileDisc", 2, Some(2), true),

            // ===== SCALAR =====
            signature("coalesce", 1, None, false),
            signature("elementId", 1, Some(1), false),
            signature("id", 1, Some(1), false),
            signature("type", 1, Some(1), false),
            signature("labels", 1, Some(1), false),
            signature("keys", 1, Some(1), false),
            signature("properties", 1, Some(1), false),
            signature("size", 1, Some(1), false),
            signature("length", 1, Some(1), false),
            signature("head", 1, Some(1), false),
            signature("last", 1, Some(1), false),
            signature("startNode", 1, Some(1), false),
            signature("endNode", 1, Some(1), false),
            signature("timestamp", 0, Some(0), false),
            signature("toInteger", 1, Some(1), false),
            signature("toFloat", 1, Some(1), false),
            signature("toBoolean", 1, Some(1), false),
            signature("toString", 1, Some(1), false),

            // ===== LIST =====
            signature("nodes", 1, Some(1), false),
            signature("relationships", 1, Some(1), false),
            signature("range", 2, Some(3), false),
            signature("reverse", 1, Some(1), false),
            signature("tail", 1, Some(1), false),

            // ===== STRING =====
            signature("toLower", 1, Some(1), false),
            signature("toUpper", 1, Some(1), false),
            signature("trim", 1, Some(1), false),
            signature("ltrim", 1, Some(1), false),
            signature("rtrim", 1, Some(1), false),
            signature("replace", 3, Some(3), false),
            signature("substring", 2, Some(3), false),
            signature("left", 2, Some(2), false),
            signature("right", 2, Some(2), false),
            signature("split", 2, Some(2), false),

            // ===== NUMERIC =====
            signature("abs", 1, Some(1), false),
            signature("ceil", 1, Some(1), false),
            signature("floor", 1, Some(1), false),
            signature("round", 1, Some(3), false),
            signature("sign", 1, Some(1), false),
            signature("rand", 0, Some(0), false),
            signature("sqrt", 1, Some(1), false),

            // ===== TEMPORAL =====
            signature("date", 0, Some(1), false),
            signature("datetime", 0, Some(1), false),
            signature("localdatetime", 0, Some(1), false),
            signature("duration", 1, Some(1), false),
        ];
        entries
            .into_iter()
            .map(|sig| (sig.name.to_lowercase(), sig))
            .collect()
    };
}

/// `name(args)` or `name(DISTINCT args)`.
///
/// Fields are private so every call in a statement went through name and
/// arity validation; read them through the accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    name: String,
    distinct: bool,
    args: Vec<Expression>,
}

impl FunctionCall {
    /// Validated call. Known functions are spelled canonically
    /// (`TOLOWER` renders as `toLower`) and their argument count is checked.
    pub fn new(name: &str, args: Vec<Expression>) -> Result<Self, ValidationError> {
        Self::validated(name, args, false)
    }

    /// Validated `name(DISTINCT args)`. Registry functions must be aggregates;
    /// unknown names pass, like in [`FunctionCall::new`].
    pub fn new_distinct(name: &str, args: Vec<Expression>) -> Result<Self, ValidationError> {
        Self::validated(name, args, true)
    }

    fn validated(
        name: &str,
        args: Vec<Expression>,
        distinct: bool,
    ) -> Result<Self, ValidationError> {
        if !is_dotted_identifier(name) {
            return Err(ValidationError::InvalidFunctionName(name.to_string()));
        }
        let name = match get_function_signature(name) {
            Some(sig) if !sig.accepts(args.len()) => {
                return Err(ValidationError::FunctionArity {
                    name: sig.name.to_string(),
                    expected: sig.expected(),
                    found: args.len(),
                })
            }
            Some(sig) if distinct && !sig.aggregate => {
                return Err(ValidationError::DistinctNotAggregate(sig.name.to_string()))
            }
            Some(sig) => sig.name.to_string(),
            None => name.to_string(),
        };
        Ok(Self {
            name,
            distinct,
            args,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn args(&self) -> &[Expression] {
        &self.args
    }

    /// Registry aggregate or scalar called with a known-good argument count
    fn known(name: &'static str, distinct: bool, arg: Expression) -> Expression {
        Expression::Function(FunctionCall {
            name: name.to_string(),
            distinct,
            args: vec![arg],
        })
    }
}

pub fn count(expr: impl Into<Expression>) -> Expression {
    FunctionCall::known("count", false, expr.into())
}

/// `count(DISTINCT expr)`
pub fn count_distinct(expr: impl Into<Expression>) -> Expression {
    FunctionCall::known("count", true, expr.into())
}

pub fn collect(expr: impl Into<Expression>) -> Expression {
    FunctionCall::known("collect", false, expr.into())
}

/// `collect(DISTINCT expr)`
pub fn collect_distinct(expr: impl Into<Expression>) -> Expression {
    FunctionCall::known("collect", true, expr.into())
}

pub fn sum(expr: impl Into<Expression>) -> Expression {
    FunctionCall::known("sum", false, expr.into())
}

pub fn avg(expr: impl Into<Expression>) -> Expression {
    FunctionCall::known("avg", false, expr.into())
}

pub fn min(expr: impl Into<Expression>) -> Expression {
    FunctionCall::known("min", false, expr.into())
}

pub fn max(expr: impl Into<Expression>) -> Expression {
    FunctionCall::known("max", false, expr.into())
}

pub fn size(expr: impl Into<Expression>) -> Expression {
    FunctionCall::known("size", false, expr.into())
}

pub fn to_lower(expr: impl Into<Expression>) -> Expression {
    FunctionCall::known("toLower", false, expr.into())
}

pub fn to_upper(expr: impl Into<Expression>) -> Expression {
    FunctionCall::known("toUpper", false, expr.into())
}

pub fn trim(expr: impl Into<Expression>) -> Expression {
    FunctionCall::known("trim", false, expr.into())
}

pub fn labels(expr: impl Into<Expression>) -> Expression {
    FunctionCall::known("labels", false, expr.into())
}

/// `type(r)`
pub fn rel_type(expr: impl Into<Expression>) -> Expression {
    FunctionCall::known("type", false, expr.into())
}

pub fn element_id(expr: impl Into<Expression>) -> Expression {
    FunctionCall::known("elementId", false, expr.into())
}

/// `coalesce(a, b, ...)`; needs at least one argument
pub fn coalesce(args: Vec<Expression>) -> Result<Expression, ValidationError> {
    FunctionCall::new("coalesce", args).map(Expression::from)
}
