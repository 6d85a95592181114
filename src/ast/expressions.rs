use std::fmt::Display;

/// Binary operators lowered directly, without a `binary<op>` function.
pub const BUILTIN_OPERATORS: [char; 6] = ['+', '-', '*', '/', '<', '>'];

/// Expression
///
/// Every node of an expression tree. Each composite variant owns its
/// children, so a tree is never shared and never cyclic.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal, the only value type of the language.
    Number(f64),
    /// A use of a name, resolved by the backend against the active bindings.
    Variable(String),
    /// `target = value`. The parser only builds this when the left operand was a variable.
    Assign { target: String, value: Box<Expr> },
    Binary {
        op: char,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary { op: char, operand: Box<Expr> },
    Call { callee: String, args: Vec<Expr> },
    If {
        condition: Box<Expr>,
        then_body: Vec<Expr>,
        else_body: Vec<Expr>,
    },
    For {
        var: String,
        start: Box<Expr>,
        end: Box<Expr>,
        step: Option<Box<Expr>>,
        body: Vec<Expr>,
    },
    /// `var a = 1, b in body`: local mutable bindings scoped to `body`.
    Var {
        bindings: Vec<(String, Option<Expr>)>,
        body: Box<Expr>,
    },
}

impl Expr {
    pub fn variable(name: &str) -> Self {
        Expr::Variable(name.to_string())
    }

    pub fn binary(op: char, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unary(op: char, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn assign(target: &str, value: Expr) -> Self {
        Expr::Assign {
            target: target.to_string(),
            value: Box::new(value),
        }
    }

    pub fn call(callee: &str, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: callee.to_string(),
            args,
        }
    }
}

fn write_body(f: &mut std::fmt::Formatter<'_>, body: &[Expr]) -> std::fmt::Result {
    for expr in body {
        write!(f, " {}", expr)?;
    }
    Ok(())
}

/// Renders the tree as an s-expression, e.g. `(+ 4 (* 5 2))`.
impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Number(value) => write!(f, "{}", value),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Assign { target, value } => write!(f, "(= {} {})", target, value),
            Expr::Binary { op, lhs, rhs } => write!(f, "({} {} {})", op, lhs, rhs),
            Expr::Unary { op, operand } => write!(f, "({} {})", op, operand),
            Expr::Call { callee, args } => {
                write!(f, "({}", callee)?;
                write_body(f, args)?;
                write!(f, ")")
            }
            Expr::If {
                condition,
                then_body,
                else_body,
            } => {
                write!(f, "(if {}", condition)?;
                write_body(f, then_body)?;
                write_body(f, else_body)?;
                write!(f, ")")
            }
            Expr::For {
                var,
                start,
                end,
                step,
                body,
            } => {
                write!(f, "(for ({} {} {}", var, start, end)?;
                if let Some(step) = step {
                    write!(f, " {}", step)?;
                }
                write!(f, ")")?;
                write_body(f, body)?;
                write!(f, ")")
            }
            Expr::Var { bindings, body } => {
                write!(f, "(var (")?;
                for (i, (name, initializer)) in bindings.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    match initializer {
                        Some(initializer) => write!(f, "({} {})", name, initializer)?,
                        None => write!(f, "{}", name)?,
                    }
                }
                write!(f, ") {})", body)
            }
        }
    }
}
