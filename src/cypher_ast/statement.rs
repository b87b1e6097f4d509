//! Ordered clause composition.
//!
//! [`Statement::push`] appends clauses in call order and rejects sequences the
//! query language cannot express:
//!
//! | clause     | may follow                                         | on repeat     |
//! |------------|----------------------------------------------------|---------------|
//! | `WHERE`    | `MATCH`, `OPTIONAL MATCH`, `WITH` (and its modifiers) | merged with `AND` |
//! | `ORDER BY` | `RETURN`, `WITH`                                   | items appended |
//! | `SKIP`     | `RETURN`, `WITH`, `ORDER BY`                       | replaced      |
//! | `LIMIT`    | `RETURN`, `WITH`, `ORDER BY`, `SKIP`               | replaced      |
//!
//! Once a `RETURN` is present only `ORDER BY`, `SKIP` and `LIMIT` may follow.

use super::{
    clause::{
        Clause, CreateClause, DeleteClause, MatchClause, MergeClause, OrderByClause, Projection,
        SetClause, UnwindClause, WhereClause,
    },
    errors::ConfigurationError,
    expression::Expression,
    path_pattern::Pattern,
    value::Value,
    variable::{Param, Var, Variable},
};
use crate::{
    config::BuildConfig,
    cypher_generator::{self, BuildOutput, CypherGeneratorError},
};

const STATEMENT_START: &str = "the start of the statement";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    clauses: Vec<Clause>,
}

fn is_modifier(clause: &Clause) -> bool {
    matches!(clause, Clause::OrderBy(_) | Clause::Skip(_) | Clause::Limit(_))
}

impl Statement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    fn last_keyword(&self) -> &'static str {
        self.clauses.last().map_or(STATEMENT_START, Clause::keyword)
    }

    /// Keyword of the projection that trailing ORDER BY/SKIP/LIMIT belong to
    fn modifier_owner(&self) -> Option<&'static str> {
        self.clauses
            .iter()
            .rev()
            .find(|clause| !is_modifier(clause))
            .map(Clause::keyword)
    }

    fn has_return(&self) -> bool {
        self.clauses.iter().any(|c| matches!(c, Clause::Return(_)))
    }

    fn out_of_order(&self, clause: &'static str) -> ConfigurationError {
        ConfigurationError::ClauseOrder {
            clause,
            after: self.last_keyword(),
        }
    }

    /// Append a clause, applying the composition rules in the module docs
    pub fn push(mut self, clause: Clause) -> Result<Self, ConfigurationError> {
        if self.has_return() && !is_modifier(&clause) {
            return Err(ConfigurationError::ClauseOrder {
                clause: clause.keyword(),
                after: "RETURN",
            });
        }

        match clause {
            Clause::Where(filter) => match self.clauses.last() {
                Some(Clause::Where(_)) => {
                    if let Some(Clause::Where(existing)) = self.clauses.pop() {
                        self.clauses
                            .push(Clause::Where(existing.and(filter.condition().clone())));
                    }
                }
                Some(Clause::Match(_) | Clause::With(_)) => self.clauses.push(Clause::Where(filter)),
                Some(last) if is_modifier(last) && self.modifier_owner() == Some("WITH") => {
                    self.clauses.push(Clause::Where(filter))
                }
                _ => return Err(self.out_of_order("WHERE")),
            },
            Clause::OrderBy(order_by) => match self.clauses.last_mut() {
                Some(Clause::OrderBy(existing)) => existing.extend(order_by),
                Some(Clause::Return(_) | Clause::With(_)) => {
                    self.clauses.push(Clause::OrderBy(order_by))
                }
                _ => return Err(self.out_of_order("ORDER BY")),
            },
            Clause::Skip(count) => match self.clauses.last_mut() {
                Some(Clause::Skip(existing)) => *existing = count,
                Some(Clause::Return(_) | Clause::With(_) | Clause::OrderBy(_)) => {
                    self.clauses.push(Clause::Skip(count))
                }
                _ => return Err(self.out_of_order("SKIP")),
            },
            Clause::Limit(count) => match self.clauses.last_mut() {
                Some(Clause::Limit(existing)) => *existing = count,
                Some(
                    Clause::Return(_) | Clause::With(_) | Clause::OrderBy(_) | Clause::Skip(_),
                ) => self.clauses.push(Clause::Limit(count)),
                _ => return Err(self.out_of_order("LIMIT")),
            },
            other => self.clauses.push(other),
        }
        Ok(self)
    }

    /// `MATCH pattern`
    pub fn match_(self, pattern: impl Into<Pattern>) -> Result<Self, ConfigurationError> {
        self.push(Clause::Match(MatchClause::single(pattern, false)))
    }

    /// `OPTIONAL MATCH pattern`
    pub fn optional_match(self, pattern: impl Into<Pattern>) -> Result<Self, ConfigurationError> {
        self.push(Clause::Match(MatchClause::single(pattern, true)))
    }

    /// `WHERE condition`; a second call right after extends it with `AND`
    pub fn where_(self, condition: impl Into<Expression>) -> Result<Self, ConfigurationError> {
        self.push(Clause::Where(WhereClause::new(condition)))
    }

    /// Alias of [`Statement::where_`] that reads better on repeated calls
    pub fn and_where(self, condition: impl Into<Expression>) -> Result<Self, ConfigurationError> {
        self.where_(condition)
    }

    /// Extend the trailing `WHERE` with `OR`, or start a `WHERE` if there is none
    pub fn or_where(mut self, condition: impl Into<Expression>) -> Result<Self, ConfigurationError> {
        match self.clauses.pop() {
            Some(Clause::Where(existing)) => {
                self.clauses.push(Clause::Where(existing.or(condition)));
                Ok(self)
            }
            Some(last) => {
                self.clauses.push(last);
                self.where_(condition)
            }
            None => self.where_(condition),
        }
    }

    pub fn with(self, projection: Projection) -> Result<Self, ConfigurationError> {
        self.push(Clause::With(projection))
    }

    pub fn return_(self, projection: Projection) -> Result<Self, ConfigurationError> {
        self.push(Clause::Return(projection))
    }

    pub fn order_by(self, order_by: OrderByClause) -> Result<Self, ConfigurationError> {
        self.push(Clause::OrderBy(order_by))
    }

    pub fn skip(self, count: u32) -> Result<Self, ConfigurationError> {
        self.push(Clause::Skip(Expression::Literal(Value::from(count))))
    }

    pub fn skip_param(self, count: &Param) -> Result<Self, ConfigurationError> {
        self.push(Clause::Skip(count.into()))
    }

    pub fn limit(self, count: u32) -> Result<Self, ConfigurationError> {
        self.push(Clause::Limit(Expression::Literal(Value::from(count))))
    }

    pub fn limit_param(self, count: &Param) -> Result<Self, ConfigurationError> {
        self.push(Clause::Limit(count.into()))
    }

    pub fn unwind(
        self,
        expression: impl Into<Expression>,
        alias: &Var,
    ) -> Result<Self, ConfigurationError> {
        self.push(Clause::Unwind(UnwindClause::new(expression, alias)))
    }

    pub fn create(self, pattern: impl Into<Pattern>) -> Result<Self, ConfigurationError> {
        self.push(Clause::Create(CreateClause::new(vec![pattern.into()])?))
    }

    pub fn merge(self, pattern: impl Into<Pattern>) -> Result<Self, ConfigurationError> {
        self.push(Clause::Merge(MergeClause::new(pattern)))
    }

    pub fn set(self, set: SetClause) -> Result<Self, ConfigurationError> {
        self.push(Clause::Set(set))
    }

    pub fn delete(self, targets: Vec<Variable>) -> Result<Self, ConfigurationError> {
        self.push(Clause::Delete(DeleteClause::new(targets)?))
    }

    pub fn detach_delete(self, targets: Vec<Variable>) -> Result<Self, ConfigurationError> {
        self.push(Clause::Delete(DeleteClause::detach(targets)?))
    }

    /// Compile with the default configuration
    pub fn build(&self) -> Result<BuildOutput, CypherGeneratorError> {
        cypher_generator::build(self)
    }

    pub fn build_with_config(&self, config: &BuildConfig) -> Result<BuildOutput, CypherGeneratorError> {
        cypher_generator::build_with_config(self, config)
    }
}
