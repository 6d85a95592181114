//! Code generation module, built with the `llvm` feature.
//!
//! This module contains the LLVM-based backend that lowers each top-level
//! item to LLVM IR as soon as the parser hands it over. It handles:
//!
//! - Declaration of functions and externs as `double(double, ...)`
//! - Lowering of expressions, including `if`, `for` and `var`
//! - Calls to user-defined operators through their `unary`/`binary` functions
//! - Verification, removing any function that fails to verify

pub mod compiler;
pub mod expr;

#[cfg(test)]
mod tests;
