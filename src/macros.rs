//! Utility macros for the front end.
//!
//! This module defines helper macros used by the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for single-kind patterns
//!
//! These macros reduce boilerplate in the lexer's pattern table.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$keyword` - The keyword subtype, if any
/// * `$lexeme` - The source slice the token was built from
/// * `$position` - Where the token starts
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, None, "42", position);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $keyword:expr, $lexeme:expr, $position:expr) => {
        Token {
            kind: $kind,
            keyword: $keyword,
            lexeme: $lexeme,
            position: $position,
        }
    };
}

/// Creates a default lexer handler for patterns that always produce one token kind.
///
/// The generated handler ignores the matched text and classifies it as `$kind`
/// with no keyword subtype.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^\\(").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::LeftParen),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr) => {
        |_lexeme: &str| Some(($kind, None))
    };
}
