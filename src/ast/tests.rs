use crate::{errors::errors::ErrorImpl, Position};

use super::{
    expressions::Expr,
    registry::PrototypeRegistry,
    statements::{Function, Item, OperatorKind, Prototype, DEFAULT_BINARY_PRECEDENCE},
};

fn prototype(name: &str, params: &[&str]) -> Prototype {
    Prototype::new(
        name,
        params.iter().map(|param| param.to_string()).collect(),
        Position::start(),
    )
}

#[test]
fn test_registry_keeps_first_declaration() {
    let mut registry = PrototypeRegistry::new();
    let mut first = prototype("foo", &["a"]);
    first.position = Position::new(1, 8);
    let mut second = prototype("foo", &["b"]);
    second.position = Position::new(4, 8);

    assert!(registry.register(&first).is_ok());
    assert!(registry.register(&second).is_ok());

    assert_eq!(registry.len(), 1);
    assert!(registry.contains("foo"));
    assert_eq!(registry.get("foo").map(|found| found.position), Some(first.position));
}

#[test]
fn test_registry_rejects_arity_change() {
    let mut registry = PrototypeRegistry::new();
    registry
        .register(&prototype("foo", &["a"]))
        .expect("first declaration");

    let error = registry
        .register(&prototype("foo", &["a", "b"]))
        .expect_err("arity changed");
    assert_eq!(
        error.get_internal(),
        &ErrorImpl::ConflictingPrototype {
            function: String::from("foo"),
            expected: 1,
            received: 2,
        }
    );
}

#[test]
fn test_registry_keeps_operator_precedence() {
    let params = || vec![String::from("a"), String::from("b")];
    let declared = Prototype::operator(OperatorKind::Binary, '@', params(), Some(5), Position::start());
    let defaulted = Prototype::operator(OperatorKind::Binary, '@', params(), None, Position::start());
    let changed = Prototype::operator(OperatorKind::Binary, '@', params(), Some(7), Position::new(3, 1));

    let mut registry = PrototypeRegistry::new();
    registry.register(&declared).expect("first declaration");

    // omitting the precedence keeps the registered one
    let stored = registry.register(&defaulted).expect("same operator");
    assert_eq!(stored.binary_precedence(), 5);

    let error = registry.register(&changed).expect_err("precedence changed");
    assert_eq!(
        error.get_internal(),
        &ErrorImpl::ConflictingPrecedence {
            operator: String::from("@"),
            expected: 5,
            received: 7,
        }
    );
    assert_eq!(error.get_line(), 3);
}

#[test]
fn test_registry_iterates_every_signature() {
    let mut registry = PrototypeRegistry::new();
    assert!(registry.is_empty());

    for name in ["sin", "cos", "atan2"] {
        registry
            .register(&prototype(name, &["x"]))
            .expect("distinct names");
    }

    let mut names: Vec<&str> = registry.iter().map(|found| found.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["atan2", "cos", "sin"]);
}

#[test]
fn test_operator_prototype_names() {
    let params = vec![String::from("a"), String::from("b")];
    let binary = Prototype::operator(OperatorKind::Binary, '|', params, None, Position::start());

    assert_eq!(binary.name, "binary|");
    assert!(binary.is_binary_op());
    assert!(!binary.is_unary_op());
    assert_eq!(binary.operator_name(), Some('|'));
    assert_eq!(binary.binary_precedence(), DEFAULT_BINARY_PRECEDENCE);

    assert_eq!(prototype("foo", &[]).operator_name(), None);
}

#[test]
fn test_expression_rendering() {
    let expr = Expr::Var {
        bindings: vec![
            (String::from("a"), Some(Expr::Number(1.5))),
            (String::from("b"), None),
        ],
        body: Box::new(Expr::assign("b", Expr::call("f", vec![Expr::variable("a")]))),
    };

    assert_eq!(expr.to_string(), "(var ((a 1.5) b) (= b (f a)))");
}

#[test]
fn test_item_rendering() {
    let function = Function {
        prototype: prototype("neg", &["x"]),
        body: vec![Expr::binary('-', Expr::Number(0.0), Expr::variable("x"))],
    };

    assert_eq!(
        Item::Definition(function).to_string(),
        "(def neg (x) (- 0 x))"
    );
    assert_eq!(
        Item::Extern(prototype("sin", &["x"])).to_string(),
        "(extern sin(x))"
    );
}
