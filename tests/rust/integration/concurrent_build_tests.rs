//! One shared statement built from several threads at once

use std::sync::Arc;
use std::thread;

use cypher_builder::{
    expression::{eq, lit},
    BuildOutput, Node, Param, Pattern, Projection, Relationship, Statement,
};

fn assert_send_sync<T: Send + Sync>() {}

fn shared_statement() -> Statement {
    let person = Node::new(["Person"]);
    let follows = Relationship::new("FOLLOWS");
    let other = Node::new(["Person"]);
    Statement::new()
        .match_(Pattern::node(&person).outgoing(&follows, &other))
        .unwrap()
        .where_(eq(person.property("handle"), Param::new("ada")))
        .unwrap()
        .and_where(eq(other.property("verified"), lit(true)))
        .unwrap()
        .return_(Projection::of([other.property("handle")]).unwrap())
        .unwrap()
}

#[test]
fn test_model_is_send_and_sync() {
    assert_send_sync::<Statement>();
    assert_send_sync::<Node>();
    assert_send_sync::<Param>();
    assert_send_sync::<BuildOutput>();
}

#[test]
fn test_concurrent_builds_are_independent() {
    let statement = shared_statement();
    let expected = statement.build().unwrap();

    let outputs: Vec<BuildOutput> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| statement.build().unwrap()))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    for output in outputs {
        assert_eq!(output, expected);
    }
}

#[test]
fn test_statement_shared_through_arc() {
    let statement = Arc::new(shared_statement());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let statement = Arc::clone(&statement);
            thread::spawn(move || statement.build().unwrap().cypher)
        })
        .collect();

    for handle in handles {
        assert_eq!(
            handle.join().unwrap(),
            "MATCH (n1:Person)-[r2:FOLLOWS]->(n3:Person)\n\
             WHERE n1.handle = $param0 AND n3.verified = true\n\
             RETURN n3.handle"
        );
    }
}
