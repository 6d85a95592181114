//! Error types and error handling for the front end.
//!
//! This module defines the single diagnostic type shared by the lexer,
//! parser and backends. It includes:
//!
//! - An error structure carrying the line/column it was raised at
//! - Specific error variants grouped into lexical, syntax, semantic,
//!   resolution and backend kinds
//! - Error names and suggestions used by the diagnostic renderer

pub mod errors;

#[cfg(test)]
mod tests;
