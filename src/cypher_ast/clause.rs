use super::{
    errors::ConfigurationError,
    expression::{Expression, PropertyRef},
    path_pattern::Pattern,
    variable::{Var, Variable},
};

/// One named query segment
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Match(MatchClause),
    Where(WhereClause),
    With(Projection),
    Return(Projection),
    OrderBy(OrderByClause),
    Skip(Expression),
    Limit(Expression),
    Unwind(UnwindClause),
    Create(CreateClause),
    Merge(MergeClause),
    Set(SetClause),
    Delete(DeleteClause),
}

impl Clause {
    /// Leading keyword, also used in composition error messages
    pub fn keyword(&self) -> &'static str {
        match self {
            Clause::Match(m) if m.optional => "OPTIONAL MATCH",
            Clause::Match(_) => "MATCH",
            Clause::Where(_) => "WHERE",
            Clause::With(_) => "WITH",
            Clause::Return(_) => "RETURN",
            Clause::OrderBy(_) => "ORDER BY",
            Clause::Skip(_) => "SKIP",
            Clause::Limit(_) => "LIMIT",
            Clause::Unwind(_) => "UNWIND",
            Clause::Create(_) => "CREATE",
            Clause::Merge(_) => "MERGE",
            Clause::Set(_) => "SET",
            Clause::Delete(d) if d.detach => "DETACH DELETE",
            Clause::Delete(_) => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchClause {
    pub optional: bool,
    patterns: Vec<Pattern>,
}

impl MatchClause {
    /// `MATCH p1, p2, ...`
    pub fn new(patterns: Vec<Pattern>) -> Result<Self, ConfigurationError> {
        Self::with_flag(patterns, false)
    }

    /// `OPTIONAL MATCH p1, p2, ...`
    pub fn optional(patterns: Vec<Pattern>) -> Result<Self, ConfigurationError> {
        Self::with_flag(patterns, true)
    }

    fn with_flag(patterns: Vec<Pattern>, optional: bool) -> Result<Self, ConfigurationError> {
        if patterns.is_empty() {
            return Err(ConfigurationError::EmptyPatternList {
                clause: if optional { "OPTIONAL MATCH" } else { "MATCH" },
            });
        }
        Ok(Self { optional, patterns })
    }

    /// Single-pattern clause, which cannot be empty
    pub fn single(pattern: impl Into<Pattern>, optional: bool) -> Self {
        Self {
            optional,
            patterns: vec![pattern.into()],
        }
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }
}

/// `WHERE condition`, extendable with shorthand `and`/`or`
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    condition: Expression,
}

impl WhereClause {
    pub fn new(condition: impl Into<Expression>) -> Self {
        Self {
            condition: condition.into(),
        }
    }

    /// Joins the top-level `AND` group, or starts one around the current root
    pub fn and(self, condition: impl Into<Expression>) -> Self {
        Self {
            condition: self.condition.and(condition),
        }
    }

    /// Joins the top-level `OR` group, or starts one around the current root
    pub fn or(self, condition: impl Into<Expression>) -> Self {
        Self {
            condition: self.condition.or(condition),
        }
    }

    pub fn condition(&self) -> &Expression {
        &self.condition
    }
}

/// `expression [AS alias]`
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionItem {
    pub expression: Expression,
    pub alias: Option<Var>,
}

impl ProjectionItem {
    pub fn new(expression: impl Into<Expression>) -> Self {
        Self {
            expression: expression.into(),
            alias: None,
        }
    }

    pub fn aliased(expression: impl Into<Expression>, alias: &Var) -> Self {
        Self {
            expression: expression.into(),
            alias: Some(alias.clone()),
        }
    }
}

impl From<Expression> for ProjectionItem {
    fn from(expression: Expression) -> Self {
        Self::new(expression)
    }
}

/// Body of `RETURN` and `WITH`
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub distinct: bool,
    items: Vec<ProjectionItem>,
}

impl Projection {
    pub fn new(items: Vec<ProjectionItem>) -> Result<Self, ConfigurationError> {
        if items.is_empty() {
            return Err(ConfigurationError::EmptyProjection);
        }
        Ok(Self {
            distinct: false,
            items,
        })
    }

    /// Projection of unaliased expressions
    pub fn of<I, E>(expressions: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = E>,
        E: Into<Expression>,
    {
        Self::new(
            expressions
                .into_iter()
                .map(ProjectionItem::new)
                .collect(),
        )
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn items(&self) -> &[ProjectionItem] {
        &self.items
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortItem {
    pub expression: Expression,
    pub descending: bool,
}

impl SortItem {
    pub fn asc(expression: impl Into<Expression>) -> Self {
        Self {
            expression: expression.into(),
            descending: false,
        }
    }

    pub fn desc(expression: impl Into<Expression>) -> Self {
        Self {
            expression: expression.into(),
            descending: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByClause {
    items: Vec<SortItem>,
}

impl OrderByClause {
    pub fn new(items: Vec<SortItem>) -> Result<Self, ConfigurationError> {
        if items.is_empty() {
            return Err(ConfigurationError::EmptyOrderBy);
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[SortItem] {
        &self.items
    }

    pub(crate) fn extend(&mut self, other: OrderByClause) {
        self.items.extend(other.items);
    }
}

/// `UNWIND expression AS alias`
#[derive(Debug, Clone, PartialEq)]
pub struct UnwindClause {
    pub expression: Expression,
    pub alias: Var,
}

impl UnwindClause {
    pub fn new(expression: impl Into<Expression>, alias: &Var) -> Self {
        Self {
            expression: expression.into(),
            alias: alias.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateClause {
    patterns: Vec<Pattern>,
}

impl CreateClause {
    pub fn new(patterns: Vec<Pattern>) -> Result<Self, ConfigurationError> {
        if patterns.is_empty() {
            return Err(ConfigurationError::EmptyPatternList { clause: "CREATE" });
        }
        Ok(Self { patterns })
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }
}

/// `MERGE pattern`; merge takes exactly one pattern
#[derive(Debug, Clone, PartialEq)]
pub struct MergeClause {
    pub pattern: Pattern,
}

impl MergeClause {
    pub fn new(pattern: impl Into<Pattern>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

/// `variable.key = value`
#[derive(Debug, Clone, PartialEq)]
pub struct SetItem {
    pub property: PropertyRef,
    pub value: Expression,
}

impl SetItem {
    pub fn new(
        variable: impl Into<Variable>,
        key: impl Into<String>,
        value: impl Into<Expression>,
    ) -> Self {
        Self {
            property: PropertyRef {
                variable: variable.into(),
                key: key.into(),
            },
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetClause {
    items: Vec<SetItem>,
}

impl SetClause {
    pub fn new(items: Vec<SetItem>) -> Result<Self, ConfigurationError> {
        if items.is_empty() {
            return Err(ConfigurationError::EmptySetItems);
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[SetItem] {
        &self.items
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteClause {
    pub detach: bool,
    targets: Vec<Variable>,
}

impl DeleteClause {
    pub fn new(targets: Vec<Variable>) -> Result<Self, ConfigurationError> {
        Self::with_flag(targets, false)
    }

    /// `DETACH DELETE`: also removes the relationships of deleted nodes
    pub fn detach(targets: Vec<Variable>) -> Result<Self, ConfigurationError> {
        Self::with_flag(targets, true)
    }

    fn with_flag(targets: Vec<Variable>, detach: bool) -> Result<Self, ConfigurationError> {
        if targets.is_empty() {
            return Err(ConfigurationError::EmptyDeleteTargets {
                clause: if detach { "DETACH DELETE" } else { "DELETE" },
            });
        }
        Ok(Self { detach, targets })
    }

    pub fn targets(&self) -> &[Variable] {
        &self.targets
    }
}
