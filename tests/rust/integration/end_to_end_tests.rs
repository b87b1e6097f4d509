//! Full statements built through the public API

use anyhow::Result;
use serde_json::json;

use cypher_builder::{
    expression::{eq, gte, is_not_null, lit, or},
    functions::{count, to_lower},
    path_pattern::HopRange,
    Node, OrderByClause, Param, Pattern, Projection, ProjectionItem, Relationship, SortItem,
    Statement, Var,
};

#[test]
fn test_movie_by_title_params_serialize() -> Result<()> {
    let movie = Node::new(["Movie"]);
    let statement = Statement::new()
        .match_(&movie)?
        .where_(eq(movie.property("title"), Param::new("X")))?
        .return_(Projection::of([movie.property("title")])?)?;

    let output = statement.build()?;
    assert_eq!(
        output.cypher,
        "MATCH (n1:Movie)\nWHERE n1.title = $param0\nRETURN n1.title"
    );
    assert_eq!(
        serde_json::to_value(&output)?,
        json!({
            "cypher": "MATCH (n1:Movie)\nWHERE n1.title = $param0\nRETURN n1.title",
            "params": {"param0": "X"}
        })
    );
    Ok(())
}

#[test]
fn test_co_actor_recommendation() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let actor = Node::builder()
        .label("Person")
        .property("name", Param::new("Tom Hanks"))
        .build();
    let acted_in = Relationship::new("ACTED_IN");
    let movie = Node::new(["Movie"]);
    let co_acted = Relationship::new("ACTED_IN");
    let co_actor = Node::new(["Person"]);
    let appearances = Var::named("appearances");

    let statement = Statement::new()
        .match_(
            Pattern::node(&actor)
                .outgoing(&acted_in, &movie)
                .incoming(&co_acted, &co_actor),
        )?
        .where_(gte(movie.property("released"), Param::new(1990)))?
        .and_where(or(
            is_not_null(co_actor.property("born")),
            eq(to_lower(co_actor.property("name")), lit("unknown")),
        ))?
        .return_(Projection::new(vec![
            ProjectionItem::new(co_actor.property("name")),
            ProjectionItem::aliased(count(&movie), &appearances),
        ])?)?
        .order_by(OrderByClause::new(vec![SortItem::desc(&appearances)])?)?
        .limit(5)?;

    let output = statement.build()?;
    assert_eq!(
        output.cypher,
        [
            "MATCH (n1:Person {name: $param0})-[r2:ACTED_IN]->(n3:Movie)<-[r4:ACTED_IN]-(n5:Person)",
            "WHERE n3.released >= $param1 AND (n5.born IS NOT NULL OR toLower(n5.name) = 'unknown')",
            "RETURN n5.name, count(n3) AS appearances",
            "ORDER BY appearances DESC",
            "LIMIT 5",
        ]
        .join("\n")
    );
    assert_eq!(
        serde_json::Value::Object(output.params),
        json!({"param0": "Tom Hanks", "param1": 1990})
    );
    Ok(())
}

#[test]
fn test_friends_of_friends_compact() -> Result<()> {
    let me = Node::builder().name("me").label("User").build();
    let knows = Relationship::builder("KNOWS")
        .hops(HopRange::range(2, 3)?)
        .build();
    let other = Node::new(["User"]);

    let statement = Statement::new()
        .match_(Pattern::node(&me).undirected(&knows, &other))?
        .where_(eq(me.property("id"), Param::named("user_id", 42)))?
        .return_(Projection::of([&other])?.distinct())?;

    let output = statement.build_with_config(&cypher_builder::BuildConfig::compact())?;
    assert_eq!(
        output.cypher,
        "MATCH (me:User)-[r1:KNOWS*2..3]-(n2:User) WHERE me.id = $user_id RETURN DISTINCT n2"
    );
    assert_eq!(output.params["user_id"], json!(42));
    Ok(())
}

#[test]
fn test_param_map_holds_every_reachable_param() -> Result<()> {
    let person = Node::new(["Person"]);
    let names = Param::new(vec!["Ada", "Grace"]);
    let min_age = Param::new(30);
    let statement = Statement::new()
        .match_(&person)?
        .where_(cypher_builder::expression::in_list(person.property("name"), &names))?
        .and_where(gte(person.property("age"), &min_age))?
        .and_where(gte(person.property("score"), &min_age))?
        .return_(Projection::of([&person])?)?
        .skip_param(&Param::new(10))?;

    let output = statement.build()?;
    assert_eq!(output.params.len(), 3);
    let keys: Vec<&str> = output.params.keys().map(String::as_str).collect();
    assert_eq!(keys, ["param0", "param1", "param2"]);
    assert!(output.cypher.ends_with("SKIP $param2"));
    Ok(())
}
