//! Builds driven by file and environment configuration

use std::io::Write;

use anyhow::Result;
use serial_test::serial;

use cypher_builder::{
    expression::eq, BuildConfig, ConfigError, Node, Param, Projection, Statement,
};

fn statement() -> Statement {
    let movie = Node::new(["Movie"]);
    Statement::new()
        .match_(&movie)
        .unwrap()
        .where_(eq(movie.property("title"), Param::new("X")))
        .unwrap()
        .return_(Projection::of([&movie]).unwrap())
        .unwrap()
}

#[test]
fn test_build_with_yaml_config() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "node_prefix: movie\nparam_prefix: arg\npretty: false")?;

    let config = BuildConfig::from_yaml_file(file.path())?;
    let output = statement().build_with_config(&config)?;
    assert_eq!(
        output.cypher,
        "MATCH (movie1:Movie) WHERE movie1.title = $arg0 RETURN movie1"
    );
    Ok(())
}

#[test]
fn test_malformed_yaml_config() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "pretty: [not, a, bool]")?;

    match BuildConfig::from_yaml_file(file.path()) {
        Err(ConfigError::Parse { field, .. }) => assert_eq!(field, "yaml_content"),
        other => panic!("expected YAML parse error, got {:?}", other),
    }
    Ok(())
}

#[test]
#[serial]
fn test_build_with_env_config() -> Result<()> {
    std::env::set_var("CYPHER_BUILDER_NODE_PREFIX", "node");
    let config = BuildConfig::from_env();
    std::env::remove_var("CYPHER_BUILDER_NODE_PREFIX");

    let output = statement().build_with_config(&config?)?;
    assert!(output.cypher.starts_with("MATCH (node1:Movie)\n"));
    Ok(())
}
