use std::fmt::Display;

use crate::Position;

use super::expressions::Expr;

/// Precedence given to a `binary` operator declared without one.
pub const DEFAULT_BINARY_PRECEDENCE: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    None,
    Unary,
    Binary,
}

/// Prototype
///
/// The signature of a function or user operator. Operator prototypes are
/// named `unary<op>` / `binary<op>`, which is the name calls are lowered to.
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    pub name: String,
    pub params: Vec<String>,
    pub kind: OperatorKind,
    pub precedence: Option<i32>,
    pub position: Position,
}

impl Prototype {
    pub fn new(name: &str, params: Vec<String>, position: Position) -> Self {
        Prototype {
            name: name.to_string(),
            params,
            kind: OperatorKind::None,
            precedence: None,
            position,
        }
    }

    /// Builds the prototype of a `unary`/`binary` operator function.
    pub fn operator(
        kind: OperatorKind,
        op: char,
        params: Vec<String>,
        precedence: Option<i32>,
        position: Position,
    ) -> Self {
        let name = match kind {
            OperatorKind::Unary => format!("unary{}", op),
            OperatorKind::Binary => format!("binary{}", op),
            OperatorKind::None => op.to_string(),
        };

        Prototype {
            name,
            params,
            kind,
            precedence,
            position,
        }
    }

    pub fn is_unary_op(&self) -> bool {
        self.kind == OperatorKind::Unary && self.params.len() == 1
    }

    pub fn is_binary_op(&self) -> bool {
        self.kind == OperatorKind::Binary && self.params.len() == 2
    }

    /// The operator character of an operator prototype.
    pub fn operator_name(&self) -> Option<char> {
        match self.kind {
            OperatorKind::None => None,
            _ => self.name.chars().last(),
        }
    }

    pub fn binary_precedence(&self) -> i32 {
        self.precedence.unwrap_or(DEFAULT_BINARY_PRECEDENCE)
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl Display for Prototype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.params.join(" "))
    }
}

/// Function
///
/// A definition, or a top-level expression wrapped into an anonymous function.
/// The value of the function is the value of the last body expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub prototype: Prototype,
    pub body: Vec<Expr>,
}

impl Function {
    pub fn is_anonymous(&self) -> bool {
        self.prototype.name.is_empty()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(def {} ({})",
            self.prototype.name,
            self.prototype.params.join(" ")
        )?;
        for expr in &self.body {
            write!(f, " {}", expr)?;
        }
        write!(f, ")")
    }
}

/// A completed top-level construct, handed to the backend as soon as it is parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Definition(Function),
    Extern(Prototype),
    Expression(Function),
}

impl Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Item::Definition(function) | Item::Expression(function) => write!(f, "{}", function),
            Item::Extern(prototype) => write!(f, "(extern {})", prototype),
        }
    }
}
