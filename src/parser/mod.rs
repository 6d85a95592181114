//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that pulls tokens from the lexer and
//! turns them into top-level items. Expressions are parsed by precedence
//! climbing; the precedence table is owned by the parser and grows when a
//! `binary` operator is declared. It handles:
//!
//! - Top-level constructs (definitions, externs, bare expressions)
//! - Expressions (unary and binary operators, calls, `if`, `for`, `var`)
//! - Prototypes, including user-defined operators
//! - Error recovery and reporting
//!
//! Primary expressions and top-level constructs are dispatched through
//! lookup tables keyed by token kind or keyword.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
