//! The contract between the front end and a code-generation backend.
//!
//! The driver hands every completed top-level construct to a [`Backend`]
//! one at a time, before it continues parsing, together with the session's
//! [`PrototypeRegistry`]. Names are handled in two phases: the parser
//! registers every signature as soon as it is declared, and calls are only
//! checked when the backend lowers them through [`Backend::resolve_callee`],
//! the one place a missing callee is reported.

use std::fmt::Display;

use crate::{
    ast::{
        registry::PrototypeRegistry,
        statements::{Function, Item, Prototype},
    },
    errors::errors::Error,
};

/// What a backend knows about a callable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub arity: usize,
}

impl Signature {
    pub fn new(name: &str, arity: usize) -> Self {
        Signature {
            name: name.to_string(),
            arity,
        }
    }
}

impl From<&Prototype> for Signature {
    fn from(prototype: &Prototype) -> Self {
        Signature::new(&prototype.name, prototype.arity())
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

pub trait Backend {
    /// The backend's representation of a lowered function or declaration.
    type Handle;

    /// Lowers a definition or an anonymous top-level expression.
    fn compile_function(
        &mut self,
        function: &Function,
        prototypes: &PrototypeRegistry,
    ) -> Result<Self::Handle, Error>;

    /// Declares an external function without a body.
    fn compile_extern(
        &mut self,
        prototype: &Prototype,
        prototypes: &PrototypeRegistry,
    ) -> Result<Self::Handle, Error>;

    /// Looks a callable up by name; `None` means not found.
    fn resolve_callee(&self, name: &str, prototypes: &PrototypeRegistry) -> Option<Signature> {
        prototypes.get(name).map(Signature::from)
    }
}

/// Dispatches a top-level item to the matching backend entry point.
pub fn compile_item<B: Backend>(
    backend: &mut B,
    item: &Item,
    prototypes: &PrototypeRegistry,
) -> Result<B::Handle, Error> {
    match item {
        Item::Definition(function) | Item::Expression(function) => {
            backend.compile_function(function, prototypes)
        }
        Item::Extern(prototype) => backend.compile_extern(prototype, prototypes),
    }
}
