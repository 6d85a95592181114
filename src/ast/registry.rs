use std::collections::HashMap;

use crate::errors::errors::{Error, ErrorImpl};

use super::statements::Prototype;

/// Prototype Registry
///
/// Every signature declared by `extern` or `def` in one compilation unit.
/// Entries are added once and never removed.
#[derive(Debug, Clone, Default)]
pub struct PrototypeRegistry {
    prototypes: HashMap<String, Prototype>,
}

impl PrototypeRegistry {
    pub fn new() -> Self {
        PrototypeRegistry {
            prototypes: HashMap::new(),
        }
    }

    /// Records a signature and returns the entry in force for its name.
    ///
    /// Redeclaring a name is accepted only with the same arity, in which case
    /// the first declaration is kept. A redeclared binary operator may omit
    /// its precedence but cannot change it.
    pub fn register(&mut self, prototype: &Prototype) -> Result<&Prototype, Error> {
        if let Some(existing) = self.prototypes.get(&prototype.name) {
            if existing.arity() != prototype.arity() {
                return Err(Error::new(
                    ErrorImpl::ConflictingPrototype {
                        function: prototype.name.clone(),
                        expected: existing.arity(),
                        received: prototype.arity(),
                    },
                    prototype.position,
                ));
            }

            if let (Some(op), Some(received)) = (prototype.operator_name(), prototype.precedence) {
                if existing.binary_precedence() != received {
                    return Err(Error::new(
                        ErrorImpl::ConflictingPrecedence {
                            operator: op.to_string(),
                            expected: existing.binary_precedence(),
                            received,
                        },
                        prototype.position,
                    ));
                }
            }
        }

        Ok(self
            .prototypes
            .entry(prototype.name.clone())
            .or_insert_with(|| prototype.clone()))
    }

    pub fn get(&self, name: &str) -> Option<&Prototype> {
        self.prototypes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.prototypes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prototype> {
        self.prototypes.values()
    }
}
