//! Crate-level error type.
//!
//! Construction can fail with [`ValidationError`] or [`ConfigurationError`],
//! building with [`CypherGeneratorError`]. [`CypherBuilderError`] wraps all of
//! them so a caller can assemble and build a statement in one function using
//! `?` throughout:
//!
//! ```
//! use cypher_builder::{expression::eq, CypherBuilderError, Node, Param, Projection, Statement};
//!
//! fn movie_by_title(title: &str) -> Result<String, CypherBuilderError> {
//!     let movie = Node::new(["Movie"]);
//!     let statement = Statement::new()
//!         .match_(&movie)?
//!         .where_(eq(movie.property("title"), Param::new(title)))?
//!         .return_(Projection::of([movie.property("year")])?)?;
//!     Ok(statement.build()?.cypher)
//! }
//!
//! assert!(movie_by_title("The Matrix").is_ok());
//! ```

use thiserror::Error;

use crate::{
    build_ctx::errors::NamingConflict,
    config::ConfigError,
    cypher_ast::errors::{ConfigurationError, UnsupportedValueError, ValidationError},
    cypher_generator::CypherGeneratorError,
};

#[derive(Debug, Error)]
pub enum CypherBuilderError {
    #[error("Invalid query structure: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid clause: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Build failed: {0}")]
    Generator(#[from] CypherGeneratorError),

    #[error("Invalid build configuration: {0}")]
    Config(#[from] ConfigError),
}

impl From<NamingConflict> for CypherBuilderError {
    fn from(err: NamingConflict) -> Self {
        CypherBuilderError::Generator(err.into())
    }
}

impl From<UnsupportedValueError> for CypherBuilderError {
    fn from(err: UnsupportedValueError) -> Self {
        CypherBuilderError::Generator(err.into())
    }
}
