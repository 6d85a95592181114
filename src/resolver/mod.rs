//! Name resolution backend.
//!
//! The default backend when no code generator is compiled in. It checks what
//! a code generator would otherwise reject late:
//!
//! - Every variable reference names an active binding
//! - Every call, including user operators, names a declared function
//! - Calls pass as many arguments as the callee declares
//!
//! Scoping follows the language rules exactly, so the resolved slots show
//! which binding each reference sees.

pub mod resolver;
