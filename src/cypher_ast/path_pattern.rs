use super::{
    errors::ValidationError,
    variable::{Node, Relationship},
};

/// Arrow rendering of a relationship segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,       // `<-[]-`
    Right,      // `-[]->`
    Undirected, // `-[]-`
}

impl Direction {
    /// Flip the arrowheads; `Undirected` stays undirected
    pub fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Undirected => Direction::Undirected,
        }
    }
}

/// Hop quantifier for variable-length traversal like `*1..3`, `*..5`, `*2`, `*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HopRange {
    pub min_hops: Option<u32>,
    pub max_hops: Option<u32>,
}

impl HopRange {
    /// Fixed-length: `*2` is min=2, max=2
    pub fn fixed(hops: u32) -> Self {
        Self {
            min_hops: Some(hops),
            max_hops: Some(hops),
        }
    }

    /// Bounded range: `*1..3`
    pub fn range(min: u32, max: u32) -> Result<Self, ValidationError> {
        if min > max {
            return Err(ValidationError::InvalidHopRange { min, max });
        }
        Ok(Self {
            min_hops: Some(min),
            max_hops: Some(max),
        })
    }

    /// Upper bound only: `*..5`
    pub fn max_only(max: u32) -> Self {
        Self {
            min_hops: None,
            max_hops: Some(max),
        }
    }

    /// Lower bound only: `*2..`
    pub fn min_only(min: u32) -> Self {
        Self {
            min_hops: Some(min),
            max_hops: None,
        }
    }

    /// Any length: `*`
    pub fn unbounded() -> Self {
        Self {
            min_hops: None,
            max_hops: None,
        }
    }

    /// Quantifier text including the leading `*`
    pub fn render(&self) -> String {
        match (self.min_hops, self.max_hops) {
            (None, None) => "*".to_string(),
            (Some(min), Some(max)) if min == max => format!("*{}", min),
            (Some(min), Some(max)) => format!("*{}..{}", min, max),
            (None, Some(max)) => format!("*..{}", max),
            (Some(min), None) => format!("*{}..", min),
        }
    }
}

/// One element of an unchecked pattern chain, see [`Pattern::from_elements`]
#[derive(Debug, Clone, PartialEq)]
pub enum PatternElement {
    Node(Node),
    Relationship {
        relationship: Relationship,
        direction: Direction,
    },
}

impl From<Node> for PatternElement {
    fn from(node: Node) -> Self {
        PatternElement::Node(node)
    }
}

impl From<&Node> for PatternElement {
    fn from(node: &Node) -> Self {
        PatternElement::Node(node.clone())
    }
}

/// A relationship segment and the node it leads to
#[derive(Debug, Clone, PartialEq)]
pub struct PatternSegment {
    pub relationship: Relationship,
    pub direction: Direction,
    pub node: Node,
}

/// A well-formed chain `(a)-[r]->(b)<-[s]-(c)…`: starts and ends on a node and
/// alternates node/relationship. Malformed chains cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    start: Node,
    segments: Vec<PatternSegment>,
}

impl Pattern {
    /// Single-node pattern `(a)`
    pub fn node(start: impl Into<Node>) -> Self {
        Self {
            start: start.into(),
            segments: Vec::new(),
        }
    }

    /// Extend the chain with `-[rel]-(node)` using the given arrow direction
    pub fn related(mut self, relationship: &Relationship, direction: Direction, node: &Node) -> Self {
        self.segments.push(PatternSegment {
            relationship: relationship.clone(),
            direction,
            node: node.clone(),
        });
        self
    }

    /// `-[rel]->(node)`
    pub fn outgoing(self, relationship: &Relationship, node: &Node) -> Self {
        self.related(relationship, Direction::Right, node)
    }

    /// `<-[rel]-(node)`
    pub fn incoming(self, relationship: &Relationship, node: &Node) -> Self {
        self.related(relationship, Direction::Left, node)
    }

    /// `-[rel]-(node)`
    pub fn undirected(self, relationship: &Relationship, node: &Node) -> Self {
        self.related(relationship, Direction::Undirected, node)
    }

    /// Validate an element chain: non-empty, node first and last, strictly
    /// alternating. Errors name the offending position.
    pub fn from_elements(elements: Vec<PatternElement>) -> Result<Self, ValidationError> {
        let mut iter = elements.into_iter().enumerate();

        let start = match iter.next() {
            None => return Err(ValidationError::EmptyPattern),
            Some((_, PatternElement::Node(node))) => node,
            Some((_, PatternElement::Relationship { .. })) => {
                return Err(ValidationError::PatternStartsWithRelationship)
            }
        };

        let mut segments = Vec::new();
        let mut last_position = 0;
        while let Some((position, element)) = iter.next() {
            let (relationship, direction) = match element {
                PatternElement::Relationship {
                    relationship,
                    direction,
                } => (relationship, direction),
                PatternElement::Node(_) => {
                    return Err(ValidationError::ConsecutiveNodes {
                        position: last_position,
                        next: position,
                    })
                }
            };
            let node = match iter.next() {
                Some((_, PatternElement::Node(node))) => node,
                Some((next, PatternElement::Relationship { .. })) => {
                    return Err(ValidationError::ConsecutiveRelationships { position, next })
                }
                None => return Err(ValidationError::PatternEndsWithRelationship { position }),
            };
            segments.push(PatternSegment {
                relationship,
                direction,
                node,
            });
            last_position = position + 1;
        }

        Ok(Self { start, segments })
    }

    pub fn start(&self) -> &Node {
        &self.start
    }

    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    /// Copy of this pattern with the direction of segment `index` flipped.
    /// Node order is unchanged. Out-of-range indexes leave the pattern as is.
    pub fn with_reversed_segment(&self, index: usize) -> Self {
        let mut pattern = self.clone();
        if let Some(segment) = pattern.segments.get_mut(index) {
            segment.direction = segment.direction.reversed();
        }
        pattern
    }
}

impl From<Node> for Pattern {
    fn from(node: Node) -> Self {
        Pattern::node(node)
    }
}

impl From<&Node> for Pattern {
    fn from(node: &Node) -> Self {
        Pattern::node(node.clone())
    }
}

impl From<&Node> for Node {
    fn from(node: &Node) -> Self {
        node.clone()
    }
}
