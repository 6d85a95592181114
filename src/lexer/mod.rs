//! Lexical analysis module for the front end.
//!
//! This module contains the lexer that converts source text into tokens
//! for parsing, one token per call. It handles:
//!
//! - Recognition of keywords, identifiers, numbers and operator characters
//! - Line and column tracking for error reporting
//! - Comments and whitespace handling
//! - Degrading unknown characters to `Unexpected` tokens instead of failing

pub mod lexer;
pub mod tokens;
