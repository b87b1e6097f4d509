use super::errors::CypherGeneratorError;
use crate::{
    build_ctx::BuildCtx,
    cypher_ast::{
        clause::{
            Clause, CreateClause, DeleteClause, MatchClause, MergeClause, OrderByClause,
            Projection, ProjectionItem, SetClause, SetItem, SortItem, UnwindClause, WhereClause,
        },
        errors::UnsupportedValueError,
        expression::{Expression, Precedence, PropertyRef},
        functions::FunctionCall,
        path_pattern::{Direction, Pattern, PatternSegment},
        statement::Statement,
        value::Value,
        variable::{Node, Param, Relationship, Variable},
    },
    utils::identifier_escaping::{escape_identifier, escape_variable, quote_string},
};

/// Render a model object into Cypher text, naming variables and recording
/// parameters in `ctx` as they are encountered.
pub trait ToCypher {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError>;
}

impl<T: ToCypher> ToCypher for [T] {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        let parts: Result<Vec<String>, _> = self.iter().map(|item| item.to_cypher(ctx)).collect();
        Ok(parts?.join(", "))
    }
}

// ---------------------------------------------------------------------------
// Variables, parameters and literals
// ---------------------------------------------------------------------------

/// Label, relationship type or property key. Reserved words are fine here.
fn schema_name(name: &str, kind: &'static str) -> Result<String, CypherGeneratorError> {
    if name.is_empty() {
        return Err(CypherGeneratorError::EmptyName { kind });
    }
    Ok(escape_identifier(name))
}

/// Variable or parameter name, backticked when it is a reserved word
fn variable_name(name: &str, kind: &'static str) -> Result<String, CypherGeneratorError> {
    if name.is_empty() {
        return Err(CypherGeneratorError::EmptyName { kind });
    }
    Ok(escape_variable(name))
}

impl ToCypher for Variable {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        variable_name(&ctx.name_of(self)?, "variable name")
    }
}

impl ToCypher for Param {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        let name = ctx.param_name_of(self)?;
        Ok(format!("${}", variable_name(&name, "parameter name")?))
    }
}

impl ToCypher for PropertyRef {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        Ok(format!(
            "{}.{}",
            self.variable.to_cypher(ctx)?,
            schema_name(&self.key, "property key")?
        ))
    }
}

impl ToCypher for Value {
    fn to_cypher(&self, _ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        render_literal(self)
    }
}

fn render_literal(value: &Value) -> Result<String, CypherGeneratorError> {
    match value {
        Value::Null => Ok("NULL".to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) if !f.is_finite() => {
            Err(UnsupportedValueError::new(value.kind(), "inline literal").into())
        }
        // Debug keeps the fractional part (1.0, not 1) so the type survives
        Value::Float(f) => Ok(format!("{:?}", f)),
        Value::String(s) => Ok(quote_string(s)),
        Value::List(items) => {
            let items: Result<Vec<String>, _> = items.iter().map(render_literal).collect();
            Ok(format!("[{}]", items?.join(", ")))
        }
        Value::Map(entries) => {
            let entries: Result<Vec<String>, CypherGeneratorError> = entries
                .iter()
                .map(|(key, value)| {
                    let key = schema_name(key, "map key")?;
                    Ok(format!("{}: {}", key, render_literal(value)?))
                })
                .collect();
            Ok(format!("{{{}}}", entries?.join(", ")))
        }
        Value::Bytes(_) => Err(UnsupportedValueError::new(value.kind(), "inline literal").into()),
    }
}

/// `{key: value, ...}`, or nothing for an empty property list
fn render_properties(
    properties: &[(String, Expression)],
    ctx: &mut BuildCtx<'_>,
) -> Result<String, CypherGeneratorError> {
    if properties.is_empty() {
        return Ok(String::new());
    }
    let mut entries = Vec::with_capacity(properties.len());
    for (key, value) in properties {
        let key = schema_name(key, "property key")?;
        entries.push(format!("{}: {}", key, value.to_cypher(ctx)?));
    }
    Ok(format!(" {{{}}}", entries.join(", ")))
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// Render `operand`, wrapped in parentheses when `needs_parens` says so
fn render_operand(
    operand: &Expression,
    needs_parens: bool,
    ctx: &mut BuildCtx<'_>,
) -> Result<String, CypherGeneratorError> {
    let rendered = operand.to_cypher(ctx)?;
    if needs_parens {
        Ok(format!("({})", rendered))
    } else {
        Ok(rendered)
    }
}

/// Comparison chains (`a = b = c`) mean something else in Cypher, so any
/// predicate-valued operand of a comparison gets parentheses.
fn is_predicate_operand(operand: &Expression) -> bool {
    operand.precedence() < Precedence::Additive
}

impl ToCypher for Expression {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        match self {
            Expression::Variable(variable) => variable.to_cypher(ctx),
            Expression::Property(property) => property.to_cypher(ctx),
            Expression::Param(param) => param.to_cypher(ctx),
            Expression::Literal(value) => value.to_cypher(ctx),
            Expression::List(items) => Ok(format!("[{}]", items.to_cypher(ctx)?)),
            Expression::Map(entries) => {
                let mut rendered = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    let key = schema_name(key, "map key")?;
                    rendered.push(format!("{}: {}", key, value.to_cypher(ctx)?));
                }
                Ok(format!("{{{}}}", rendered.join(", ")))
            }
            Expression::Comparison { op, left, right } => {
                let left = render_operand(left, is_predicate_operand(left), ctx)?;
                let right = render_operand(right, is_predicate_operand(right), ctx)?;
                Ok(format!("{} {} {}", left, op.as_str(), right))
            }
            Expression::IsNull { operand, negated } => {
                let operand = render_operand(operand, is_predicate_operand(operand), ctx)?;
                let keyword = if *negated { "IS NOT NULL" } else { "IS NULL" };
                Ok(format!("{} {}", operand, keyword))
            }
            Expression::Arithmetic { op, left, right } => {
                let precedence = self.precedence();
                // Left-associative: only the right side needs parens at equal precedence
                let left = render_operand(left, left.precedence() < precedence, ctx)?;
                let right = render_operand(right, right.precedence() <= precedence, ctx)?;
                Ok(format!("{} {} {}", left, op.as_str(), right))
            }
            Expression::Boolean { op, operands } => {
                let precedence = self.precedence();
                let mut rendered = Vec::with_capacity(operands.len());
                for operand in operands {
                    let needs_parens = match operand {
                        Expression::Boolean { op: inner, .. } => inner != op,
                        other => other.precedence() < precedence,
                    };
                    rendered.push(render_operand(operand, needs_parens, ctx)?);
                }
                Ok(rendered.join(&format!(" {} ", op.as_str())))
            }
            Expression::Not(operand) => {
                let operand = render_operand(operand, operand.precedence() < Precedence::Not, ctx)?;
                Ok(format!("NOT {}", operand))
            }
            Expression::Function(call) => call.to_cypher(ctx),
        }
    }
}

impl ToCypher for FunctionCall {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        let args = self.args().to_cypher(ctx)?;
        if self.is_distinct() {
            Ok(format!("{}(DISTINCT {})", self.name(), args))
        } else {
            Ok(format!("{}({})", self.name(), args))
        }
    }
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

impl ToCypher for Node {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        let mut rendered = String::from("(");
        rendered.push_str(&Variable::from(self).to_cypher(ctx)?);
        for label in self.labels() {
            rendered.push(':');
            rendered.push_str(&schema_name(label, "label")?);
        }
        rendered.push_str(&render_properties(self.properties(), ctx)?);
        rendered.push(')');
        Ok(rendered)
    }
}

/// Relationship detail between its arrow parts, e.g. `[r2:ACTED_IN*1..3 {role: $param0}]`
fn render_relationship(
    relationship: &Relationship,
    ctx: &mut BuildCtx<'_>,
) -> Result<String, CypherGeneratorError> {
    let mut rendered = String::from("[");
    rendered.push_str(&Variable::from(relationship).to_cypher(ctx)?);
    if let Some(rel_type) = relationship.rel_type() {
        rendered.push(':');
        rendered.push_str(&schema_name(rel_type, "relationship type")?);
    }
    if let Some(hops) = relationship.hops() {
        rendered.push_str(&hops.render());
    }
    rendered.push_str(&render_properties(relationship.properties(), ctx)?);
    rendered.push(']');
    Ok(rendered)
}

impl ToCypher for PatternSegment {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        let detail = render_relationship(&self.relationship, ctx)?;
        let relationship = match self.direction {
            Direction::Right => format!("-{}->", detail),
            Direction::Left => format!("<-{}-", detail),
            Direction::Undirected => format!("-{}-", detail),
        };
        Ok(format!("{}{}", relationship, self.node.to_cypher(ctx)?))
    }
}

impl ToCypher for Pattern {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        let mut rendered = self.start().to_cypher(ctx)?;
        for segment in self.segments() {
            rendered.push_str(&segment.to_cypher(ctx)?);
        }
        Ok(rendered)
    }
}

// ---------------------------------------------------------------------------
// Clauses
// ---------------------------------------------------------------------------

impl ToCypher for MatchClause {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        let keyword = if self.optional { "OPTIONAL MATCH" } else { "MATCH" };
        Ok(format!("{} {}", keyword, self.patterns().to_cypher(ctx)?))
    }
}

impl ToCypher for WhereClause {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        Ok(format!("WHERE {}", self.condition().to_cypher(ctx)?))
    }
}

impl ToCypher for ProjectionItem {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        let expression = self.expression.to_cypher(ctx)?;
        match &self.alias {
            // `x AS x` is noise when the projected expression is the alias itself
            Some(alias) if self.expression == Expression::from(alias) => Ok(expression),
            Some(alias) => Ok(format!(
                "{} AS {}",
                expression,
                Variable::from(alias).to_cypher(ctx)?
            )),
            None => Ok(expression),
        }
    }
}

impl ToCypher for Projection {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        let items = self.items().to_cypher(ctx)?;
        if self.distinct {
            Ok(format!("DISTINCT {}", items))
        } else {
            Ok(items)
        }
    }
}

impl ToCypher for SortItem {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        let expression = self.expression.to_cypher(ctx)?;
        if self.descending {
            Ok(format!("{} DESC", expression))
        } else {
            Ok(expression)
        }
    }
}

impl ToCypher for OrderByClause {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        Ok(format!("ORDER BY {}", self.items().to_cypher(ctx)?))
    }
}

impl ToCypher for UnwindClause {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        let expression = self.expression.to_cypher(ctx)?;
        let alias = Variable::from(&self.alias).to_cypher(ctx)?;
        Ok(format!("UNWIND {} AS {}", expression, alias))
    }
}

impl ToCypher for CreateClause {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        Ok(format!("CREATE {}", self.patterns().to_cypher(ctx)?))
    }
}

impl ToCypher for MergeClause {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        Ok(format!("MERGE {}", self.pattern.to_cypher(ctx)?))
    }
}

impl ToCypher for SetItem {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        let property = self.property.to_cypher(ctx)?;
        Ok(format!("{} = {}", property, self.value.to_cypher(ctx)?))
    }
}

impl ToCypher for SetClause {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        Ok(format!("SET {}", self.items().to_cypher(ctx)?))
    }
}

impl ToCypher for DeleteClause {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        let keyword = if self.detach { "DETACH DELETE" } else { "DELETE" };
        Ok(format!("{} {}", keyword, self.targets().to_cypher(ctx)?))
    }
}

impl ToCypher for Clause {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        match self {
            Clause::Match(clause) => clause.to_cypher(ctx),
            Clause::Where(clause) => clause.to_cypher(ctx),
            Clause::With(projection) => Ok(format!("WITH {}", projection.to_cypher(ctx)?)),
            Clause::Return(projection) => Ok(format!("RETURN {}", projection.to_cypher(ctx)?)),
            Clause::OrderBy(clause) => clause.to_cypher(ctx),
            Clause::Skip(count) => Ok(format!("SKIP {}", count.to_cypher(ctx)?)),
            Clause::Limit(count) => Ok(format!("LIMIT {}", count.to_cypher(ctx)?)),
            Clause::Unwind(clause) => clause.to_cypher(ctx),
            Clause::Create(clause) => clause.to_cypher(ctx),
            Clause::Merge(clause) => clause.to_cypher(ctx),
            Clause::Set(clause) => clause.to_cypher(ctx),
            Clause::Delete(clause) => clause.to_cypher(ctx),
        }
    }
}

impl ToCypher for Statement {
    fn to_cypher(&self, ctx: &mut BuildCtx<'_>) -> Result<String, CypherGeneratorError> {
        let mut rendered = Vec::with_capacity(self.clauses().len());
        for clause in self.clauses() {
            rendered.push(clause.to_cypher(ctx)?);
        }
        Ok(rendered.join(ctx.config().clause_separator()))
    }
}
