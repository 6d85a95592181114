#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod backend;
#[cfg(feature = "llvm")]
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod resolver;
pub mod scope;

extern crate regex;

/// A 1-based line/column location in the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    pub fn start() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Returns the text of the given 1-based line, without its line terminator.
pub fn get_line(source: &str, line: u32) -> Option<&str> {
    source
        .split('\n')
        .nth(line.checked_sub(1)? as usize)
        .map(|text| text.trim_end_matches('\r'))
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line() {
        let source = "Hello, world!\nsecond\r\n\nTesting { }\n";
        assert_eq!(super::get_line(source, 1), Some("Hello, world!"));
        assert_eq!(super::get_line(source, 2), Some("second"));
        assert_eq!(super::get_line(source, 3), Some(""));
        assert_eq!(super::get_line(source, 4), Some("Testing { }"));
        assert_eq!(super::get_line(source, 0), None);
        assert_eq!(super::get_line(source, 9), None);
    }

    #[test]
    fn test_render_error_points_at_column() {
        use crate::errors::errors::{Error, ErrorImpl};
        use crate::Position;

        let error = Error::new(
            ErrorImpl::UnrecognisedToken {
                token: "$".to_string(),
            },
            Position::new(2, 7),
        );
        let rendered = super::render_error(&error, "1 + 2\n  foo $ 3\n", "demo.ex");

        assert_eq!(
            rendered,
            "Error: UnrecognisedToken\n-> demo.ex:2:7\n  |\n2 | foo $ 3\n  | ----^\n"
        );
    }
}

/// Formats an error with the offending source line and a caret under the column.
pub fn render_error(error: &Error, source: &str, file: &str) -> String {
    /*
        Error: message
        -> final.ex:20:9
           |
        20 | let a = #;
           | --------^
    */

    let position = error.get_position();
    let line_text = get_line(source, position.line).unwrap_or_default();

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let mut rendered = String::new();
    if let ErrorTip::None = error.get_tip() {
        rendered.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        rendered.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    rendered.push_str(&format!("-> {}:{}\n", file, position));
    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = (position.column as usize)
        .saturating_sub(removed_whitespace)
        .max(1);

    rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    rendered
}

pub fn display_error(error: &Error, source: &str, file: &str) {
    print!("{}", render_error(error, source, file));
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();
    (&string[start..], start)
}
