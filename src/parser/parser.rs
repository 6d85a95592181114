//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the top-level driver.
//! The parser pulls tokens from the lexer one at a time and keeps only the
//! current token (plus the previously consumed one) as state. Expressions
//! are parsed by precedence climbing over a mutable operator table.
//!
//! It maintains:
//! - The operator table (precedences, extended by `binary` prototypes)
//! - The prototype registry (every `extern` and `def` signature)
//! - NUD (null denotation) handlers for primary expressions
//! - Statement handlers for top-level constructs

use std::collections::HashMap;

use crate::{
    ast::{registry::PrototypeRegistry, statements::{Item, Prototype}},
    backend::{compile_item, Backend},
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Keyword, Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, LookupKey, NUDHandler, NUDLookup, OperatorTable, StmtHandler,
        StmtLookup,
    },
    stmt::parse_top_level_expr,
};

/// The main parser structure that maintains parsing state.
///
/// One parser is one compilation session: the operator table and the
/// prototype registry live exactly as long as it does.
pub struct Parser<'a> {
    /// Source of tokens, pulled lazily
    lexer: Lexer<'a>,
    /// The single look-ahead token
    current: Token<'a>,
    /// The most recently consumed token
    previous: Option<Token<'a>>,
    /// Binary operator precedences
    operators: OperatorTable,
    /// Signatures declared so far
    prototypes: PrototypeRegistry,
    /// Lookup table for top-level construct handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for primary expression handlers
    nud_lookup: NUDLookup,
}

impl<'a> Parser<'a> {
    /// Creates a new Parser over `source`, primed with its first token.
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();

        let mut parser = Parser {
            lexer,
            current,
            previous: None,
            operators: OperatorTable::with_builtins(),
            prototypes: PrototypeRegistry::new(),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token<'a> {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the last consumed token, if any.
    pub fn previous_token(&self) -> Option<&Token<'a>> {
        self.previous.as_ref()
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token<'a> {
        let token = std::mem::replace(&mut self.current, self.lexer.next_token());
        self.previous = Some(token);
        token
    }

    /// Expects a token of the specified kind.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `expected` - How the expected token is spelled in the error message
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) and advances if the current token matches, otherwise an Error.
    pub fn expect(&mut self, expected_kind: TokenKind, expected: &str) -> Result<Token<'a>, Error> {
        if self.current.kind != expected_kind {
            Err(self.expected_error(expected))
        } else {
            Ok(self.advance())
        }
    }

    /// Expects the given keyword, advancing past it.
    pub fn expect_keyword(&mut self, keyword: Keyword) -> Result<Token<'a>, Error> {
        if !self.current.is_keyword(keyword) {
            Err(self.expected_error(&keyword.to_string()))
        } else {
            Ok(self.advance())
        }
    }

    fn expected_error(&self, expected: &str) -> Error {
        Error::new(
            ErrorImpl::ExpectedToken {
                expected: expected.to_string(),
                found: self.current.to_string(),
            },
            self.current.position,
        )
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current.position
    }

    /// Precedence of the current token as a binary operator, or -1 if it is not one.
    pub fn token_precedence(&self) -> i32 {
        self.current
            .operator()
            .and_then(|op| self.operators.precedence(op))
            .filter(|precedence| *precedence > 0)
            .unwrap_or(-1)
    }

    pub fn get_operator_table(&self) -> &OperatorTable {
        &self.operators
    }

    pub fn get_prototypes(&self) -> &PrototypeRegistry {
        &self.prototypes
    }

    /// Records a declared signature; a binary operator also enters the operator table.
    ///
    /// The table takes its precedence from the registry entry, so a
    /// redeclaration never rebinds an operator.
    pub fn register_prototype(&mut self, prototype: &Prototype) -> Result<(), Error> {
        let registered = self.prototypes.register(prototype)?;

        if registered.is_binary_op() {
            if let Some(op) = registered.operator_name() {
                self.operators.insert(op, registered.binary_precedence());
            }
        }

        Ok(())
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Registers a null denotation (primary expression) handler.
    pub fn nud(&mut self, key: LookupKey, nud_fn: NUDHandler) {
        self.nud_lookup.insert(key, nud_fn);
    }

    /// Registers a handler for a top-level construct.
    pub fn stmt(&mut self, key: LookupKey, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(key, stmt_fn);
    }

    /// Parses the next top-level construct.
    ///
    /// Returns `None` once the input is exhausted. When a construct fails to
    /// parse, the offending token is discarded so that the following call
    /// resumes at the next construct.
    pub fn next_item(&mut self) -> Option<Result<Item, Error>> {
        loop {
            match self.current.kind {
                TokenKind::End => return None,
                TokenKind::Semicolon => {
                    self.advance();
                }
                _ => {
                    let handler = self
                        .stmt_lookup
                        .get(&LookupKey::from(&self.current))
                        .copied();

                    let result = match handler {
                        Some(handler) => handler(self),
                        None => parse_top_level_expr(self),
                    };

                    if result.is_err() {
                        self.advance();
                    }

                    return Some(result);
                }
            }
        }
    }
}

/// Parses `source`, handing each completed construct to `backend` as soon as it is parsed.
///
/// Errors, from the parser or the backend, abandon only the construct they
/// occur in; each is written to stderr and collected.
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance (with its operator table and registry after parsing)
/// - Every error met, in source order
pub fn parse<'a, B: Backend>(source: &'a str, backend: &mut B) -> (Parser<'a>, Vec<Error>) {
    parse_with(source, backend, |_, _| {})
}

/// Like [`parse`], calling `on_compiled` with every item the backend accepted.
pub fn parse_with<'a, B, F>(
    source: &'a str,
    backend: &mut B,
    mut on_compiled: F,
) -> (Parser<'a>, Vec<Error>)
where
    B: Backend,
    F: FnMut(&Item, &B::Handle),
{
    let mut parser = Parser::new(source);
    let mut errors = vec![];

    while let Some(item) = parser.next_item() {
        let compiled = item.and_then(|item| {
            let handle = compile_item(backend, &item, parser.get_prototypes())?;
            Ok((item, handle))
        });

        match compiled {
            Ok((item, handle)) => on_compiled(&item, &handle),
            Err(error) => {
                eprintln!("error: {}", error);
                errors.push(error);
            }
        }
    }

    (parser, errors)
}
