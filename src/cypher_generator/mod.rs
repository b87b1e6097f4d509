//! Statement → (query text, parameter map) compiler.
//!
//! A build is one depth-first traversal of the statement: clauses in order,
//! sub-parts left to right. Variables and parameters are named the first time
//! the traversal reaches them, so identifier numbering follows reading order
//! of the output text.
//!
//! ```text
//! MATCH (n1:Movie)              n1     <- first node reached
//! WHERE n1.title = $param0      param0 <- first parameter reached
//! RETURN n1.title
//! ```
//!
//! Building the same statement twice yields identical output; nothing from a
//! previous build is reused.

use serde::Serialize;

use crate::{build_ctx::BuildCtx, config::BuildConfig, cypher_ast::statement::Statement};

mod errors;
mod to_cypher;

#[cfg(test)]
mod tests;

pub use errors::CypherGeneratorError;
pub use to_cypher::ToCypher;

/// Result of a successful build
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildOutput {
    pub cypher: String,
    /// Parameter name (without `$`) → value, in first-reference order
    pub params: serde_json::Map<String, serde_json::Value>,
}

/// Build with [`BuildConfig::default`]
pub fn build(statement: &Statement) -> Result<BuildOutput, CypherGeneratorError> {
    build_with_config(statement, &BuildConfig::default())
}

pub fn build_with_config(
    statement: &Statement,
    config: &BuildConfig,
) -> Result<BuildOutput, CypherGeneratorError> {
    log::debug!(
        "Building statement with {} clause(s)",
        statement.clauses().len()
    );

    let mut ctx = BuildCtx::new(config);
    let cypher = statement.to_cypher(&mut ctx)?;
    let variable_count = ctx.variable_names().len();
    let params = ctx.into_params()?;

    log::debug!(
        "Built statement: {} variable(s), {} parameter(s), {} bytes of query text",
        variable_count,
        params.len(),
        cypher.len()
    );
    Ok(BuildOutput { cypher, params })
}
