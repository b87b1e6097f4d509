//! Construction-time errors for patterns, expressions and clauses

#[cfg(test)]
mod construction_error_tests {
    use cypher_builder::{
        expression::{and_all, eq, lit, or_all},
        functions::{coalesce, FunctionCall},
        path_pattern::{Direction, HopRange, Pattern, PatternElement},
        ConfigurationError, CypherBuilderError, MatchClause, Node, OrderByClause, Projection,
        Relationship, SetClause, Statement, ValidationError, Var,
    };
    use test_case::test_case;

    fn node() -> PatternElement {
        Node::unlabeled().into()
    }

    fn rel() -> PatternElement {
        PatternElement::Relationship {
            relationship: Relationship::untyped(),
            direction: Direction::Right,
        }
    }

    #[test_case(vec![], ValidationError::EmptyPattern ; "empty")]
    #[test_case(vec![rel(), node()], ValidationError::PatternStartsWithRelationship ; "starts with relationship")]
    #[test_case(vec![node(), rel()], ValidationError::PatternEndsWithRelationship { position: 1 } ; "ends with relationship")]
    #[test_case(vec![node(), node()], ValidationError::ConsecutiveNodes { position: 0, next: 1 } ; "two nodes")]
    #[test_case(vec![node(), rel(), rel(), node()], ValidationError::ConsecutiveRelationships { position: 1, next: 2 } ; "two relationships")]
    #[test_case(vec![node(), rel(), node(), node()], ValidationError::ConsecutiveNodes { position: 2, next: 3 } ; "two nodes after a segment")]
    fn test_malformed_patterns(elements: Vec<PatternElement>, expected: ValidationError) {
        assert_eq!(Pattern::from_elements(elements), Err(expected));
    }

    #[test]
    fn test_well_formed_pattern() {
        let pattern = Pattern::from_elements(vec![node(), rel(), node(), rel(), node()]).unwrap();
        assert_eq!(pattern.segments().len(), 2);
    }

    #[test]
    fn test_hop_range_bounds() {
        assert_eq!(
            HopRange::range(3, 1),
            Err(ValidationError::InvalidHopRange { min: 3, max: 1 })
        );
        assert_eq!(HopRange::range(2, 2).unwrap().render(), "*2");
        assert_eq!(HopRange::max_only(5).render(), "*..5");
        assert_eq!(HopRange::min_only(2).render(), "*2..");
        assert_eq!(HopRange::unbounded().render(), "*");
    }

    #[test]
    fn test_operand_counts() {
        assert!(matches!(
            and_all(vec![lit(true)]),
            Err(ValidationError::TooFewOperands { operator: "AND", found: 1 })
        ));
        assert!(or_all(vec![lit(true), lit(false)]).is_ok());
    }

    #[test]
    fn test_function_validation() {
        assert!(matches!(
            FunctionCall::new("count", vec![]),
            Err(ValidationError::FunctionArity { found: 0, .. })
        ));
        assert!(matches!(
            FunctionCall::new("1bad", vec![]),
            Err(ValidationError::InvalidFunctionName(_))
        ));
        assert!(coalesce(vec![lit(1), lit(2)]).is_ok());
    }

    #[test]
    fn test_empty_clause_parts() {
        let err = Projection::of(Vec::<Node>::new()).unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyProjection);
        assert!(err.to_string().contains("at least one projection required"));

        assert!(MatchClause::new(vec![]).is_err());
        assert!(OrderByClause::new(vec![]).is_err());
        assert!(SetClause::new(vec![]).is_err());
    }

    #[test]
    fn test_clause_order_through_crate_error() {
        fn compose() -> Result<Statement, CypherBuilderError> {
            let movie = Node::new(["Movie"]);
            let statement = Statement::new()
                .match_(&movie)?
                .return_(Projection::of([&movie])?)?
                .where_(eq(movie.property("title"), lit("X")))?;
            Ok(statement)
        }

        match compose() {
            Err(CypherBuilderError::Configuration(ConfigurationError::ClauseOrder {
                clause,
                after,
            })) => {
                assert_eq!(clause, "WHERE");
                assert_eq!(after, "RETURN");
            }
            other => panic!("expected clause order error, got {:?}", other),
        }
    }

    #[test]
    fn test_unwind_then_order_by_rejected() {
        let x = Var::new();
        let err = Statement::new()
            .unwind(lit(vec![1, 2]), &x)
            .unwrap()
            .order_by(OrderByClause::new(vec![cypher_builder::SortItem::asc(&x)]).unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::ClauseOrder {
                clause: "ORDER BY",
                after: "UNWIND"
            }
        );
    }
}
