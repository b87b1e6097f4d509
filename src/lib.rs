//! cypher-builder - programmatic openCypher query construction
//!
//! This crate builds openCypher statements from typed values instead of
//! string concatenation:
//! - Node, relationship and plain variables with identity semantics
//! - Validated path patterns with direction and hop ranges
//! - Expressions with precedence-aware parenthesization
//! - Clause composition (`MATCH`, `WHERE`, `WITH`, `RETURN`, `UNWIND`, `CREATE`, ...)
//! - A compiler that names variables, hoists parameters and emits the query text
//!
//! ```
//! use cypher_builder::{expression::eq, Node, Param, Projection, Statement};
//!
//! let movie = Node::new(["Movie"]);
//! let statement = Statement::new()
//!     .match_(&movie).unwrap()
//!     .where_(eq(movie.property("title"), Param::new("The Matrix"))).unwrap()
//!     .return_(Projection::of([movie.property("title")]).unwrap()).unwrap();
//!
//! let output = statement.build().unwrap();
//! assert_eq!(
//!     output.cypher,
//!     "MATCH (n1:Movie)\nWHERE n1.title = $param0\nRETURN n1.title"
//! );
//! assert_eq!(output.params["param0"], "The Matrix");
//! ```

pub mod utils;

pub mod build_ctx;
pub mod config;
pub mod cypher_ast;
pub mod cypher_generator;
pub mod errors;

pub use cypher_ast::{clause, expression, functions, path_pattern, statement, value, variable};

pub use build_ctx::errors::NamingConflict;
pub use config::{BuildConfig, ConfigError};
pub use cypher_ast::{
    Clause, ConfigurationError, CreateClause, DeleteClause, Direction, Expression, FunctionCall,
    HopRange, MatchClause, MergeClause, Node, OrderByClause, Param, Pattern, PatternElement,
    Projection, ProjectionItem, Relationship, SetClause, SetItem, SortItem, Statement,
    UnsupportedValueError, UnwindClause, ValidationError, Value, Var, Variable, WhereClause,
};
pub use cypher_generator::{build, build_with_config, BuildOutput, CypherGeneratorError};
pub use errors::CypherBuilderError;
