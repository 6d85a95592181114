use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::scope::{Environment, ScopeOwner, ScopeStack};

fn frame(bindings: &[(&str, i32)]) -> Environment<i32> {
    bindings
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

#[test]
fn test_lookup_walks_outwards() {
    let mut scopes = ScopeStack::new();
    scopes.push(frame(&[("x", 1), ("y", 2)]));
    scopes.push(frame(&[("x", 3)]));

    assert_eq!(scopes.get_variable("x"), Some(&3));
    assert_eq!(scopes.get_variable("y"), Some(&2));
    assert_eq!(scopes.get_variable("z"), None);
}

#[test]
fn test_pop_restores_shadowed_binding() {
    let mut scopes = ScopeStack::new();
    scopes.push(frame(&[("i", 1)]));
    scopes.push(frame(&[("i", 2)]));
    assert_eq!(scopes.get_variable("i"), Some(&2));

    scopes.pop();
    assert_eq!(scopes.get_variable("i"), Some(&1));
}

#[test]
fn test_nested_scopes_shadow_only_inside() {
    let mut scopes = ScopeStack::new();
    scopes.declare_variable("i", 0);

    let seen = scopes.in_scope(frame(&[("i", 1)]), |outer| {
        let inner = outer.in_scope(frame(&[("i", 2)]), |inner| inner.get_variable("i").copied());
        (inner, outer.get_variable("i").copied())
    });

    assert_eq!(seen, (Some(2), Some(1)));
    assert_eq!(scopes.get_variable("i"), Some(&0));
    assert_eq!(scopes.depth(), 1);
}

#[test]
fn test_in_scope_pops_on_early_return() {
    let mut scopes = ScopeStack::new();

    let result: Result<(), Error> = scopes.in_scope(frame(&[("x", 1)]), |scopes| {
        scopes.get_variable("missing").ok_or_else(|| {
            Error::new(
                ErrorImpl::VariableNotDeclared {
                    variable: String::from("missing"),
                },
                Position::start(),
            )
        })?;
        Ok(())
    });

    assert!(result.is_err());
    assert_eq!(scopes.depth(), 0);
    assert_eq!(scopes.get_variable("x"), None);
}

#[test]
fn test_declare_in_innermost_frame() {
    let mut scopes = ScopeStack::new();
    scopes.push(Environment::new());
    scopes.push(Environment::new());

    scopes.declare_variable("a", 5);
    scopes.pop();

    assert_eq!(scopes.get_variable("a"), None);
}
