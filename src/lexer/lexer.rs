use lazy_static::lazy_static;
use regex::Regex;

use crate::{Position, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Keyword, Token, TokenKind, RESERVED_LOOKUP};

/// Classifies matched text, or returns `None` when the text produces no token.
pub type RegexHandler = fn(&str) -> Option<(TokenKind, Option<Keyword>)>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Tried in order; every pattern is anchored at the current position.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^//[^\\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^(?:[0-9]+(?:\\.[0-9]*)?|\\.[0-9]*)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Number) },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LeftParen) },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RightParen) },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma) },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon) },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equal) },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus) },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Minus) },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star) },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash) },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less) },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater) },
        RegexPattern { regex: Regex::new("^[[:punct:]]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Operator) },
    ];
}

/// Pulls tokens out of a source buffer one at a time.
///
/// The lexer never fails: characters no pattern accepts come back as
/// `TokenKind::Unexpected` and are left for the parser to report.
#[derive(Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            source,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Consumes `n` bytes, keeping the line and column counters in step.
    pub fn advance_n(&mut self, n: usize) {
        for c in self.source[self.pos..self.pos + n].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos += n;
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Returns the next token, or `End` once the input is exhausted.
    pub fn next_token(&mut self) -> Token<'a> {
        loop {
            let position = self.position();
            if self.at_eof() {
                return MK_TOKEN!(TokenKind::End, None, "", position);
            }

            let remaining = self.remainder();
            let matched = PATTERNS
                .iter()
                .find_map(|pattern| pattern.regex.find(remaining).map(|m| (m.end(), pattern.handler)));

            match matched {
                Some((length, handler)) => {
                    let lexeme = &remaining[..length];
                    self.advance_n(length);

                    if let Some((kind, keyword)) = handler(lexeme) {
                        return MK_TOKEN!(kind, keyword, lexeme, position);
                    }
                }
                None => {
                    let length = remaining.chars().next().map_or(1, char::len_utf8);
                    let lexeme = &remaining[..length];
                    self.advance_n(length);

                    return MK_TOKEN!(TokenKind::Unexpected, None, lexeme, position);
                }
            }
        }
    }
}

fn skip_handler(_lexeme: &str) -> Option<(TokenKind, Option<Keyword>)> {
    None
}

fn symbol_handler(lexeme: &str) -> Option<(TokenKind, Option<Keyword>)> {
    if let Some(keyword) = RESERVED_LOOKUP.get(lexeme) {
        Some((TokenKind::Keyword, Some(*keyword)))
    } else {
        Some((TokenKind::Identifier, None))
    }
}

/// Lexes the whole buffer, including the trailing `End` token.
///
/// The parser never needs this; it exists for diagnostics and tests.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lexer.next_token();
        tokens.push(token);

        if token.kind == TokenKind::End {
            return tokens;
        }
    }
}
