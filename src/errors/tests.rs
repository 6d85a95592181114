//! Unit tests for error handling.
//!
//! This module contains tests for error kinds, names, tips and formatting.

use crate::errors::errors::{Error, ErrorImpl, ErrorKind, ErrorTip};
use crate::Position;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "$".to_string(),
        },
        Position::new(3, 4),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_kind(), ErrorKind::Lexical);
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "then".to_string(),
        },
        Position::new(42, 7),
    );

    assert_eq!(error.get_position().line, 42);
    assert_eq!(error.get_position().column, 7);
    assert_eq!(error.get_line(), 42);
}

#[test]
fn test_display_is_line_tagged() {
    let error = Error::new(
        ErrorImpl::ExpectedToken {
            expected: ")".to_string(),
            found: "End".to_string(),
        },
        Position::new(5, 1),
    );

    assert_eq!(error.to_string(), "line 5: expected ')', found \"End\"");
}

#[test]
fn test_syntax_kinds() {
    for internal in [
        ErrorImpl::UnexpectedToken {
            token: "then".to_string(),
        },
        ErrorImpl::UnexpectedTokenDetailed {
            token: "x".to_string(),
            message: "expected 'then'".to_string(),
        },
        ErrorImpl::ExpectedToken {
            expected: "(".to_string(),
            found: "x".to_string(),
        },
        ErrorImpl::NumberParseError {
            token: "1.2.3".to_string(),
        },
    ] {
        assert_eq!(Error::new(internal, Position::start()).get_kind(), ErrorKind::Syntax);
    }
}

#[test]
fn test_semantic_constraint_kinds() {
    let error = Error::new(ErrorImpl::InvalidAssignmentTarget, Position::start());
    assert_eq!(error.get_kind(), ErrorKind::SemanticConstraint);
    assert_eq!(error.get_error_name(), "InvalidAssignmentTarget");

    let error = Error::new(
        ErrorImpl::InvalidPrecedence {
            value: "101".to_string(),
        },
        Position::start(),
    );
    assert_eq!(error.get_kind(), ErrorKind::SemanticConstraint);

    let error = Error::new(
        ErrorImpl::InvalidOperandCount {
            operator: "binary@".to_string(),
            expected: 2,
            received: 1,
        },
        Position::start(),
    );
    assert_eq!(error.get_error_name(), "InvalidOperandCount");

    let error = Error::new(
        ErrorImpl::ConflictingPrecedence {
            operator: "@".to_string(),
            expected: 5,
            received: 7,
        },
        Position::start(),
    );
    assert_eq!(error.get_kind(), ErrorKind::SemanticConstraint);
    assert_eq!(
        error.to_string(),
        "line 1: operator \"@\" redeclared with precedence 7, previously 5"
    );

    let error = Error::new(
        ErrorImpl::BuiltinOperator {
            operator: "+".to_string(),
        },
        Position::start(),
    );
    assert_eq!(error.get_kind(), ErrorKind::SemanticConstraint);
    assert_eq!(error.get_error_name(), "BuiltinOperator");
}

#[test]
fn test_resolution_kinds() {
    let error = Error::new(
        ErrorImpl::VariableNotDeclared {
            variable: "foo".to_string(),
        },
        Position::start(),
    );
    assert_eq!(error.get_kind(), ErrorKind::Resolution);

    let error = Error::new(
        ErrorImpl::UnexpectedArguments {
            function: "add".to_string(),
            expected: 2,
            received: 3,
        },
        Position::start(),
    );
    assert_eq!(error.get_error_name(), "UnexpectedArguments");
    assert!(error.to_string().contains("expected 2, received 3"));

    let error = Error::new(
        ErrorImpl::FunctionRedefined {
            function: "fib".to_string(),
        },
        Position::start(),
    );
    assert_eq!(error.get_kind(), ErrorKind::Resolution);
    assert_eq!(error.to_string(), "line 1: function \"fib\" cannot be redefined");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "$".to_string(),
        },
        Position::start(),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnknownFunction {
            function: "sin".to_string(),
        },
        Position::start(),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("`sin`")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}
