//! Rendering tests for the statement compiler


use crate::{
    build_ctx::BuildCtx,
    config::BuildConfig,
    cypher_ast::{expression::Expression, variable::Var},
};

use super::{CypherGeneratorError, ToCypher};

/// Render a lone expression in a fresh context
fn render(expr: &Expression) -> Result<String, CypherGeneratorError> {
    let config = BuildConfig::default();
    let mut ctx = BuildCtx::new(&config);
    expr.to_cypher(&mut ctx)
}

/// Plain variable rendered under its own name
fn var(name: &str) -> Expression {
    Var::named(name).into()
}
