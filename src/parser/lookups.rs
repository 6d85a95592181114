use std::collections::HashMap;

use crate::{
    ast::{expressions::Expr, statements::Item},
    errors::errors::Error,
    lexer::tokens::{Keyword, Token, TokenKind},
};

use super::{expr::*, parser::Parser, stmt::*};

/// Precedence of `=`, the loosest built-in binary operator.
pub const ASSIGNMENT_PRECEDENCE: i32 = 2;

/// Operator Table
///
/// Maps an operator character to its binary precedence. Seeded with the
/// built-in operators and extended whenever a `binary` prototype is parsed.
/// Each parser session owns its own table.
#[derive(Debug, Clone, Default)]
pub struct OperatorTable {
    precedences: HashMap<char, i32>,
}

impl OperatorTable {
    pub fn new() -> Self {
        OperatorTable {
            precedences: HashMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut table = OperatorTable::new();
        table.insert('=', ASSIGNMENT_PRECEDENCE);
        table.insert('<', 10);
        table.insert('>', 10);
        table.insert('+', 20);
        table.insert('-', 20);
        table.insert('*', 40);
        table.insert('/', 40);
        table
    }

    pub fn precedence(&self, op: char) -> Option<i32> {
        self.precedences.get(&op).copied()
    }

    /// Sets the precedence of `op`, returning the one it replaced.
    pub fn insert(&mut self, op: char, precedence: i32) -> Option<i32> {
        self.precedences.insert(op, precedence)
    }

    pub fn contains(&self, op: char) -> bool {
        self.precedences.contains_key(&op)
    }
}

/// Key of the handler tables: either a plain token kind or a keyword subtype.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum LookupKey {
    Kind(TokenKind),
    Keyword(Keyword),
}

impl From<&Token<'_>> for LookupKey {
    fn from(token: &Token<'_>) -> Self {
        match token.keyword {
            Some(keyword) => LookupKey::Keyword(keyword),
            None => LookupKey::Kind(token.kind),
        }
    }
}

pub type StmtHandler = fn(&mut Parser<'_>) -> Result<Item, Error>;
pub type NUDHandler = fn(&mut Parser<'_>) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser<'_>) {
    // Primary expressions
    parser.nud(LookupKey::Kind(TokenKind::Number), parse_number_expr);
    parser.nud(LookupKey::Kind(TokenKind::Identifier), parse_identifier_expr);
    parser.nud(LookupKey::Kind(TokenKind::LeftParen), parse_paren_expr);
    parser.nud(LookupKey::Keyword(Keyword::If), parse_if_expr);
    parser.nud(LookupKey::Keyword(Keyword::For), parse_for_expr);
    parser.nud(LookupKey::Keyword(Keyword::Var), parse_var_expr);

    // Top-level constructs
    parser.stmt(LookupKey::Keyword(Keyword::Def), parse_definition);
    parser.stmt(LookupKey::Keyword(Keyword::Extern), parse_extern);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<LookupKey, StmtHandler>;
pub type NUDLookup = HashMap<LookupKey, NUDHandler>;
