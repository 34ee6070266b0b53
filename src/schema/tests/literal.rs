use super::*;

#[test]
fn test_scalars() {
    assert_eq!(parse_literal("'abc'").unwrap(), Literal::Str("abc".into()));
    assert_eq!(parse_literal("42").unwrap(), Literal::Number("42".into()));
    assert_eq!(parse_literal("-3.5").unwrap(), Literal::Number("-3.5".into()));
    assert_eq!(parse_literal("None").unwrap(), Literal::Ident("None".into()));
    assert_eq!(parse_literal("'it''s'").unwrap(), Literal::Str("it's".into()));
}

#[test]
fn test_nested_collections() {
    let parsed = parse_literal("('a', (1, 2,), [3, 'x'], ())").unwrap();
    assert_eq!(
        parsed,
        Literal::Tuple(vec![
            Literal::Str("a".into()),
            Literal::Tuple(vec![Literal::Number("1".into()), Literal::Number("2".into())]),
            Literal::List(vec![Literal::Number("3".into()), Literal::Str("x".into())]),
            Literal::Tuple(vec![]),
        ])
    );
}

#[test]
fn test_display_parses_back() {
    let source = "('a',(1,),['b','c''d'],-2,None)";
    let parsed = parse_literal(source).unwrap();
    assert_eq!(parsed.to_string(), source);
    assert_eq!(parse_literal(&parsed.to_string()).unwrap(), parsed);
}

#[test]
fn test_expressions_are_rejected() {
    assert!(parse_literal("__import__('os').system('ls')").is_err());
    assert!(parse_literal("1 + 2").is_err());
    assert!(parse_literal("(1, 2").is_err());
    assert!(parse_literal("(1 2)").is_err());
    assert!(parse_literal("").is_err());
}
