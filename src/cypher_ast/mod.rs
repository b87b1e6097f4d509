//! Query model: variables, patterns, expressions, clauses and statements.
//!
//! Everything here is an immutable value that can be shared across threads.
//! Construction-time checks (pattern shape, operand counts, empty clauses,
//! clause ordering) happen in this module; naming and serialization happen in
//! [`crate::cypher_generator`].

pub mod clause;
pub mod errors;
pub mod expression;
pub mod functions;
pub mod path_pattern;
pub mod statement;
pub mod value;
pub mod variable;

pub use clause::{
    Clause, CreateClause, DeleteClause, MatchClause, MergeClause, OrderByClause, Projection,
    ProjectionItem, SetClause, SetItem, SortItem, UnwindClause, WhereClause,
};
pub use errors::{ConfigurationError, UnsupportedValueError, ValidationError};
pub use expression::{Expression, Precedence, PropertyRef};
pub use functions::FunctionCall;
pub use path_pattern::{Direction, HopRange, Pattern, PatternElement, PatternSegment};
pub use statement::Statement;
pub use value::Value;
pub use variable::{Node, Param, Relationship, Var, Variable, VariableKind};
