use thiserror::Error;

use crate::{build_ctx::errors::NamingConflict, cypher_ast::errors::UnsupportedValueError};

/// Failures that can only be detected while a statement is being built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CypherGeneratorError {
    #[error(transparent)]
    UnsupportedValue(#[from] UnsupportedValueError),
    #[error(transparent)]
    NamingConflict(#[from] NamingConflict),
    #[error("Empty {kind} cannot be written into a query (names need at least one character)")]
    EmptyName { kind: &'static str },
}
