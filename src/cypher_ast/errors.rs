use thiserror::Error;

/// Structurally malformed pattern or expression, raised at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Pattern is empty (a pattern needs at least one node)")]
    EmptyPattern,
    #[error("Pattern must start with a node, found a relationship at position 0")]
    PatternStartsWithRelationship,
    #[error("Pattern must end with a node, found a relationship at position {position}")]
    PatternEndsWithRelationship { position: usize },
    #[error("Two consecutive nodes at positions {position} and {next} (a relationship must separate them)")]
    ConsecutiveNodes { position: usize, next: usize },
    #[error("Two consecutive relationships at positions {position} and {next} (a node must separate them)")]
    ConsecutiveRelationships { position: usize, next: usize },
    #[error(
        "Invalid hop range: minimum hops ({min}) cannot be greater than maximum hops ({max})"
    )]
    InvalidHopRange { min: u32, max: u32 },
    #[error("{operator} needs at least 2 operands, got {found}")]
    TooFewOperands {
        operator: &'static str,
        found: usize,
    },
    #[error("Invalid function name: '{0}' (expected an identifier, optionally dot-separated)")]
    InvalidFunctionName(String),
    #[error("Function {name}() takes {expected} argument(s), got {found}")]
    FunctionArity {
        name: String,
        expected: String,
        found: usize,
    },
    #[error("Function {0}() is not an aggregate and cannot take DISTINCT")]
    DistinctNotAggregate(String),
}

/// A clause missing a required part, or clauses composed in an order the
/// query language does not allow. Raised at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Projection list is empty (at least one projection required)")]
    EmptyProjection,
    #[error("{clause} clause is empty (at least one pattern required)")]
    EmptyPatternList { clause: &'static str },
    #[error("SET clause is empty (at least one assignment required)")]
    EmptySetItems,
    #[error("{clause} clause is empty (at least one variable required)")]
    EmptyDeleteTargets { clause: &'static str },
    #[error("ORDER BY clause is empty (at least one sort item required)")]
    EmptyOrderBy,
    #[error("{clause} cannot follow {after}")]
    ClauseOrder {
        clause: &'static str,
        after: &'static str,
    },
}

/// A value kind the serializer cannot represent, raised during build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported {kind} value in {context}")]
pub struct UnsupportedValueError {
    pub kind: &'static str,
    pub context: String,
}

impl UnsupportedValueError {
    pub fn new(kind: &'static str, context: impl Into<String>) -> Self {
        Self {
            kind,
            context: context.into(),
        }
    }
}
