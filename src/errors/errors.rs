use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_line(&self) -> u32 {
        self.position.line
    }

    pub fn get_internal(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorKind::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::ExpectedToken { .. }
            | ErrorImpl::NumberParseError { .. } => ErrorKind::Syntax,
            ErrorImpl::InvalidAssignmentTarget
            | ErrorImpl::InvalidPrecedence { .. }
            | ErrorImpl::InvalidOperandCount { .. }
            | ErrorImpl::ConflictingPrototype { .. }
            | ErrorImpl::ConflictingPrecedence { .. }
            | ErrorImpl::BuiltinOperator { .. } => ErrorKind::SemanticConstraint,
            ErrorImpl::VariableNotDeclared { .. }
            | ErrorImpl::UnknownFunction { .. }
            | ErrorImpl::UnexpectedArguments { .. }
            | ErrorImpl::FunctionRedefined { .. } => ErrorKind::Resolution,
            ErrorImpl::CodegenError { .. } => ErrorKind::Backend,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorImpl::InvalidPrecedence { .. } => "InvalidPrecedence",
            ErrorImpl::InvalidOperandCount { .. } => "InvalidOperandCount",
            ErrorImpl::ConflictingPrototype { .. } => "ConflictingPrototype",
            ErrorImpl::ConflictingPrecedence { .. } => "ConflictingPrecedence",
            ErrorImpl::BuiltinOperator { .. } => "BuiltinOperator",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::UnknownFunction { .. } => "UnknownFunction",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::FunctionRedefined { .. } => "FunctionRedefined",
            ErrorImpl::CodegenError { .. } => "CodegenError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected the start of an expression",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::ExpectedToken { expected, found } => {
                ErrorTip::Suggestion(format!("expected '{}', found `{}`", expected, found))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, a number may contain at most one decimal point",
                token
            )),
            ErrorImpl::InvalidAssignmentTarget => {
                ErrorTip::Suggestion(String::from("The left side of `=` must be a variable"))
            }
            ErrorImpl::InvalidPrecedence { value } => ErrorTip::Suggestion(format!(
                "Precedence `{}` is invalid, it must be an integer between 1 and 100",
                value
            )),
            ErrorImpl::InvalidOperandCount {
                operator,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Operator `{}` takes {} operands, received {}",
                operator, expected, received
            )),
            ErrorImpl::ConflictingPrototype {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Function `{}` was declared with {} parameters, redeclared with {}",
                function, expected, received
            )),
            ErrorImpl::ConflictingPrecedence {
                operator,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Operator `{}` already binds with precedence {}, redeclared with {}",
                operator, expected, received
            )),
            ErrorImpl::BuiltinOperator { operator } => ErrorTip::Suggestion(format!(
                "`{}` is a built-in binary operator and cannot be redeclared",
                operator
            )),
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::UnknownFunction { function } => ErrorTip::Suggestion(format!(
                "Function `{}` is neither defined nor declared with `extern`",
                function
            )),
            ErrorImpl::UnexpectedArguments {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` expects {} arguments, received {}",
                function, expected, received
            )),
            ErrorImpl::FunctionRedefined { function } => {
                ErrorTip::Suggestion(format!("Function `{}` already has a body", function))
            }
            ErrorImpl::CodegenError { message } => ErrorTip::Suggestion(message.clone()),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.position.line, self.internal_error)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    SemanticConstraint,
    Resolution,
    Backend,
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised character: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unknown token when expecting an expression: {token:?}")]
    UnexpectedToken { token: String },
    #[error("{message}: {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("expected '{expected}', found {found:?}")]
    ExpectedToken { expected: String, found: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("destination of '=' must be a variable")]
    InvalidAssignmentTarget,
    #[error("invalid precedence {value:?}: must be 1..100")]
    InvalidPrecedence { value: String },
    #[error("invalid number of operands for operator {operator:?}: expected {expected}, received {received}")]
    InvalidOperandCount {
        operator: String,
        expected: usize,
        received: usize,
    },
    #[error("function {function:?} redeclared with {received} parameters, previously {expected}")]
    ConflictingPrototype {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("operator {operator:?} redeclared with precedence {received}, previously {expected}")]
    ConflictingPrecedence {
        operator: String,
        expected: i32,
        received: i32,
    },
    #[error("built-in operator {operator:?} cannot be redeclared")]
    BuiltinOperator { operator: String },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("unknown function referenced: {function:?}")]
    UnknownFunction { function: String },
    #[error("incorrect number of arguments passed to {function:?}: expected {expected}, received {received}")]
    UnexpectedArguments {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("function {function:?} cannot be redefined")]
    FunctionRedefined { function: String },
    #[error("{message}")]
    CodegenError { message: String },
}
