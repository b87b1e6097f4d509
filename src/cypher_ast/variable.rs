//! Identity-bearing query variables.
//!
//! [`Node`], [`Relationship`], [`Var`] and [`Param`] are cheap handles around an
//! immutable, `Arc`-shared payload. Equality is handle identity: two nodes with
//! the same labels are still two variables, while a cloned handle is the same
//! variable and renders to the same identifier.
//!
//! ```text
//! let a = Node::new(["Person"]);
//! let b = Node::new(["Person"]);   // a != b  -> (n1:Person), (n2:Person)
//! let c = a.clone();               // a == c  -> both render as n1
//! ```

use std::sync::Arc;

use super::{expression::Expression, path_pattern::HopRange, value::Value};

/// Identity key of a node, relationship or plain variable within one build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariableId(usize);

/// Identity key of a parameter within one build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(usize);

fn address_of<T>(payload: &Arc<T>) -> usize {
    Arc::as_ptr(payload).cast::<()>() as usize
}

/// Which naming prefix a generated identifier uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Node,
    Relationship,
    Var,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Node => "node",
            VariableKind::Relationship => "relationship",
            VariableKind::Var => "variable",
        }
    }
}

/// Insert or replace a property, keeping first-insertion order
fn upsert_property(properties: &mut Vec<(String, Expression)>, key: String, value: Expression) {
    match properties.iter_mut().find(|(existing, _)| *existing == key) {
        Some(slot) => slot.1 = value,
        None => properties.push((key, value)),
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct NodeData {
    name: Option<String>,
    labels: Vec<String>,
    properties: Vec<(String, Expression)>,
}

/// A node variable: `(n1:Movie {title: $param0})`
#[derive(Debug, Clone)]
pub struct Node(Arc<NodeData>);

impl Node {
    /// Node with the given labels and no properties
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder().labels(labels).build()
    }

    /// Node without labels, e.g. the far end of `(a)-[:KNOWS]->(n2)`
    pub fn unlabeled() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> NodeBuilder {
        NodeBuilder::default()
    }

    pub fn id(&self) -> VariableId {
        VariableId(address_of(&self.0))
    }

    pub fn explicit_name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    pub fn labels(&self) -> &[String] {
        &self.0.labels
    }

    pub fn properties(&self) -> &[(String, Expression)] {
        &self.0.properties
    }

    /// `n.key`
    pub fn property(&self, key: impl Into<String>) -> Expression {
        Variable::from(self.clone()).property(key)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Node {}

#[derive(Debug, Default)]
pub struct NodeBuilder {
    name: Option<String>,
    labels: Vec<String>,
    properties: Vec<(String, Expression)>,
}

impl NodeBuilder {
    /// Render with this exact identifier instead of a generated one
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        if !self.labels.contains(&label) {
            self.labels.push(label);
        }
        self
    }

    pub fn labels<I, S>(self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        labels.into_iter().fold(self, |builder, label| builder.label(label))
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<Expression>) -> Self {
        upsert_property(&mut self.properties, key.into(), value.into());
        self
    }

    pub fn build(self) -> Node {
        Node(Arc::new(NodeData {
            name: self.name,
            labels: self.labels,
            properties: self.properties,
        }))
    }
}

// ---------------------------------------------------------------------------
// Relationship
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct RelationshipData {
    name: Option<String>,
    rel_type: Option<String>,
    properties: Vec<(String, Expression)>,
    hops: Option<HopRange>,
}

/// A relationship variable: `-[r1:ACTED_IN*1..3 {role: $param1}]->`.
///
/// Direction is not part of the relationship; it belongs to the pattern
/// segment the relationship is placed in.
#[derive(Debug, Clone)]
pub struct Relationship(Arc<RelationshipData>);

impl Relationship {
    pub fn new(rel_type: impl Into<String>) -> Self {
        Self::builder(rel_type).build()
    }

    /// Relationship matching any type: `-[r1]->`
    pub fn untyped() -> Self {
        RelationshipBuilder::default().build()
    }

    pub fn builder(rel_type: impl Into<String>) -> RelationshipBuilder {
        RelationshipBuilder {
            rel_type: Some(rel_type.into()),
            ..Default::default()
        }
    }

    pub fn id(&self) -> VariableId {
        VariableId(address_of(&self.0))
    }

    pub fn explicit_name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    pub fn rel_type(&self) -> Option<&str> {
        self.0.rel_type.as_deref()
    }

    pub fn properties(&self) -> &[(String, Expression)] {
        &self.0.properties
    }

    pub fn hops(&self) -> Option<&HopRange> {
        self.0.hops.as_ref()
    }

    /// `r.key`
    pub fn property(&self, key: impl Into<String>) -> Expression {
        Variable::from(self.clone()).property(key)
    }
}

impl PartialEq for Relationship {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Relationship {}

#[derive(Debug, Default)]
pub struct RelationshipBuilder {
    name: Option<String>,
    rel_type: Option<String>,
    properties: Vec<(String, Expression)>,
    hops: Option<HopRange>,
}

impl RelationshipBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<Expression>) -> Self {
        upsert_property(&mut self.properties, key.into(), value.into());
        self
    }

    /// Variable-length traversal, e.g. `*1..3`
    pub fn hops(mut self, hops: HopRange) -> Self {
        self.hops = Some(hops);
        self
    }

    pub fn build(self) -> Relationship {
        Relationship(Arc::new(RelationshipData {
            name: self.name,
            rel_type: self.rel_type,
            properties: self.properties,
            hops: self.hops,
        }))
    }
}

// ---------------------------------------------------------------------------
// Var
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct VarData {
    name: Option<String>,
}

/// A plain variable: projection aliases, UNWIND targets.
#[derive(Debug, Clone)]
pub struct Var(Arc<VarData>);

impl Var {
    pub fn new() -> Self {
        Var(Arc::new(VarData { name: None }))
    }

    /// Variable rendered with this exact name, e.g. an output column `AS title`
    pub fn named(name: impl Into<String>) -> Self {
        Var(Arc::new(VarData {
            name: Some(name.into()),
        }))
    }

    pub fn id(&self) -> VariableId {
        VariableId(address_of(&self.0))
    }

    pub fn explicit_name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// `v.key`, for map-valued variables
    pub fn property(&self, key: impl Into<String>) -> Expression {
        Variable::from(self.clone()).property(key)
    }
}

impl Default for Var {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Var {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Var {}

// ---------------------------------------------------------------------------
// Param
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct ParamData {
    name: Option<String>,
    value: Value,
}

/// A parameter placeholder; its value is hoisted into the parameter map.
#[derive(Debug, Clone)]
pub struct Param(Arc<ParamData>);

impl Param {
    pub fn new(value: impl Into<Value>) -> Self {
        Param(Arc::new(ParamData {
            name: None,
            value: value.into(),
        }))
    }

    /// Parameter rendered as `$name` instead of a generated name
    pub fn named(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Param(Arc::new(ParamData {
            name: Some(name.into()),
            value: value.into(),
        }))
    }

    pub fn id(&self) -> ParamId {
        ParamId(address_of(&self.0))
    }

    pub fn explicit_name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    pub fn value(&self) -> &Value {
        &self.0.value
    }
}

impl PartialEq for Param {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Param {}

// ---------------------------------------------------------------------------
// Variable
// ---------------------------------------------------------------------------

/// Any variable that can be referenced by name in an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variable {
    Node(Node),
    Relationship(Relationship),
    Var(Var),
}

impl Variable {
    pub fn id(&self) -> VariableId {
        match self {
            Variable::Node(node) => node.id(),
            Variable::Relationship(rel) => rel.id(),
            Variable::Var(var) => var.id(),
        }
    }

    pub fn kind(&self) -> VariableKind {
        match self {
            Variable::Node(_) => VariableKind::Node,
            Variable::Relationship(_) => VariableKind::Relationship,
            Variable::Var(_) => VariableKind::Var,
        }
    }

    pub fn explicit_name(&self) -> Option<&str> {
        match self {
            Variable::Node(node) => node.explicit_name(),
            Variable::Relationship(rel) => rel.explicit_name(),
            Variable::Var(var) => var.explicit_name(),
        }
    }

    pub fn property(self, key: impl Into<String>) -> Expression {
        Expression::Property(super::expression::PropertyRef {
            variable: self,
            key: key.into(),
        })
    }
}

impl From<Node> for Variable {
    fn from(node: Node) -> Self {
        Variable::Node(node)
    }
}

impl From<&Node> for Variable {
    fn from(node: &Node) -> Self {
        Variable::Node(node.clone())
    }
}

impl From<Relationship> for Variable {
    fn from(rel: Relationship) -> Self {
        Variable::Relationship(rel)
    }
}

impl From<&Relationship> for Variable {
    fn from(rel: &Relationship) -> Self {
        Variable::Relationship(rel.clone())
    }
}

impl From<Var> for Variable {
    fn from(var: Var) -> Self {
        Variable::Var(var)
    }
}

impl From<&Var> for Variable {
    fn from(var: &Var) -> Self {
        Variable::Var(var.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_not_content() {
        let a = Node::new(["Person"]);
        let b = Node::new(["Person"]);
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());

        let c = a.clone();
        assert_eq!(a, c);
        assert_eq!(a.id(), c.id());
    }

    #[test]
    fn test_equal_params_are_distinct() {
        let p1 = Param::new("X");
        let p2 = Param::new("X");
        assert_eq!(p1.value(), p2.value());
        assert_ne!(p1, p2);
        assert_ne!(p1.id(), p2.id());
    }

    #[test]
    fn test_node_builder_dedupes_labels_and_replaces_properties() {
        let node = Node::builder()
            .labels(["Person", "Actor", "Person"])
            .property("name", Param::new("Keanu"))
            .property("born", Param::new(1964))
            .property("name", Param::new("Carrie"))
            .build();

        assert_eq!(node.labels(), ["Person".to_string(), "Actor".to_string()]);
        let keys: Vec<&str> = node.properties().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["name", "born"]);
    }

    #[test]
    fn test_relationship_accessors() {
        let rel = Relationship::builder("ACTED_IN")
            .name("role")
            .hops(HopRange::fixed(2))
            .build();
        assert_eq!(rel.rel_type(), Some("ACTED_IN"));
        assert_eq!(rel.explicit_name(), Some("role"));
        assert_eq!(rel.hops(), Some(&HopRange::fixed(2)));
        assert_eq!(Relationship::untyped().rel_type(), None);
    }

    #[test]
    fn test_variable_wraps_keep_identity() {
        let node = Node::unlabeled();
        let var = Variable::from(&node);
        assert_eq!(var.id(), node.id());
        assert_eq!(var.kind(), VariableKind::Node);
        assert_eq!(Variable::from(Var::named("x")).explicit_name(), Some("x"));
    }
}
