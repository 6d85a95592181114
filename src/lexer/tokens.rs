use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Position;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, Keyword> = {
        let mut map = HashMap::new();
        map.insert("def", Keyword::Def);
        map.insert("extern", Keyword::Extern);
        map.insert("if", Keyword::If);
        map.insert("then", Keyword::Then);
        map.insert("else", Keyword::Else);
        map.insert("for", Keyword::For);
        map.insert("in", Keyword::In);
        map.insert("binary", Keyword::Binary);
        map.insert("unary", Keyword::Unary);
        map.insert("var", Keyword::Var);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    End,
    Unexpected,
    Identifier,
    Number,
    Keyword,

    LeftParen,
    RightParen,
    Comma,
    Semicolon,
    Equal,

    Plus,
    Minus,
    Star,
    Slash,
    Less,
    Greater,
    // Any other single punctuation character, usable as a user operator
    Operator,
}

impl TokenKind {
    /// Whether a token of this kind can name an operator, either built-in or user-declared.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Equal
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Less
                | TokenKind::Greater
                | TokenKind::Operator
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Keyword {
    Def,
    Extern,
    If,
    Then,
    Else,
    For,
    In,
    Binary,
    Unary,
    Var,
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let word = match self {
            Keyword::Def => "def",
            Keyword::Extern => "extern",
            Keyword::If => "if",
            Keyword::Then => "then",
            Keyword::Else => "else",
            Keyword::For => "for",
            Keyword::In => "in",
            Keyword::Binary => "binary",
            Keyword::Unary => "unary",
            Keyword::Var => "var",
        };
        write!(f, "{}", word)
    }
}

/// A lexical unit borrowing its text from the source buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub keyword: Option<Keyword>,
    pub lexeme: &'a str,
    pub position: Position,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.lexeme.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}", self.lexeme)
        }
    }
}

impl Token<'_> {
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword == Some(keyword)
    }

    pub fn is_identifier(&self, name: &str) -> bool {
        self.kind == TokenKind::Identifier && self.lexeme == name
    }

    /// The operator character this token spells, if it is an operator token.
    pub fn operator(&self) -> Option<char> {
        if self.kind.is_operator() {
            self.lexeme.chars().next()
        } else {
            None
        }
    }
}
