use std::collections::HashSet;

use crate::{
    ast::{
        expressions::{Expr, BUILTIN_OPERATORS},
        registry::PrototypeRegistry,
        statements::{Function, Prototype},
    },
    backend::{Backend, Signature},
    errors::errors::{Error, ErrorImpl},
    scope::scope::{Environment, ScopeOwner, ScopeStack},
    Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOrigin {
    Parameter,
    LoopVariable,
    VarBinding,
}

/// A piece of mutable storage created inside a function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub name: String,
    pub origin: SlotOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// A variable use, tied to the slot it resolved to (an index into `slots`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: String,
    pub slot: usize,
    pub access: Access,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFunction {
    pub name: String,
    pub slots: Vec<Slot>,
    /// Variable uses and assignments, in evaluation order
    pub references: Vec<Reference>,
    /// Every function or operator the body calls
    pub calls: Vec<Signature>,
}

impl ResolvedFunction {
    /// The slot the `index`th reference resolved to.
    pub fn slot_of(&self, index: usize) -> Option<&Slot> {
        self.references
            .get(index)
            .and_then(|reference| self.slots.get(reference.slot))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Function(ResolvedFunction),
    Extern(Signature),
}

/// Name-resolution backend.
///
/// Lowers each function to the storage slots it creates and the slot every
/// variable reference binds to, and checks that every call names a
/// registered function with the right number of arguments.
#[derive(Debug, Default)]
pub struct Resolver {
    /// Functions whose body has been accepted
    defined: HashSet<String>,
}

impl Resolver {
    pub fn new() -> Self {
        Resolver {
            defined: HashSet::new(),
        }
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.defined.contains(name)
    }
}

impl Backend for Resolver {
    type Handle = Resolved;

    fn compile_function(
        &mut self,
        function: &Function,
        prototypes: &PrototypeRegistry,
    ) -> Result<Resolved, Error> {
        let prototype = &function.prototype;
        if self.defined.contains(&prototype.name) {
            return Err(Error::new(
                ErrorImpl::FunctionRedefined {
                    function: prototype.name.clone(),
                },
                prototype.position,
            ));
        }

        let resolved =
            FunctionResolver::new(self, prototypes, prototype.position).resolve_function(function)?;

        if !function.is_anonymous() {
            self.defined.insert(prototype.name.clone());
        }
        Ok(Resolved::Function(resolved))
    }

    fn compile_extern(
        &mut self,
        prototype: &Prototype,
        _prototypes: &PrototypeRegistry,
    ) -> Result<Resolved, Error> {
        Ok(Resolved::Extern(Signature::from(prototype)))
    }
}

/// Walks one function body.
///
/// Errors carry the position of the enclosing prototype; expressions do not
/// record where they start.
struct FunctionResolver<'r> {
    resolver: &'r Resolver,
    prototypes: &'r PrototypeRegistry,
    scopes: ScopeStack<usize>,
    slots: Vec<Slot>,
    references: Vec<Reference>,
    calls: Vec<Signature>,
    position: Position,
}

impl ScopeOwner for FunctionResolver<'_> {
    type Binding = usize;

    fn scopes(&mut self) -> &mut ScopeStack<usize> {
        &mut self.scopes
    }
}

impl<'r> FunctionResolver<'r> {
    fn new(resolver: &'r Resolver, prototypes: &'r PrototypeRegistry, position: Position) -> Self {
        FunctionResolver {
            resolver,
            prototypes,
            scopes: ScopeStack::new(),
            slots: vec![],
            references: vec![],
            calls: vec![],
            position,
        }
    }

    fn resolve_function(mut self, function: &Function) -> Result<ResolvedFunction, Error> {
        let mut parameters = Environment::new();
        for param in &function.prototype.params {
            let slot = self.new_slot(param, SlotOrigin::Parameter);
            parameters.declare_variable(param, slot);
        }

        self.in_scope(parameters, |resolver| resolver.resolve_body(&function.body))?;

        Ok(ResolvedFunction {
            name: function.prototype.name.clone(),
            slots: self.slots,
            references: self.references,
            calls: self.calls,
        })
    }

    fn new_slot(&mut self, name: &str, origin: SlotOrigin) -> usize {
        self.slots.push(Slot {
            name: name.to_string(),
            origin,
        });
        self.slots.len() - 1
    }

    fn reference(&mut self, name: &str, access: Access) -> Result<(), Error> {
        let slot = *self.scopes.get_variable(name).ok_or_else(|| {
            Error::new(
                ErrorImpl::VariableNotDeclared {
                    variable: name.to_string(),
                },
                self.position,
            )
        })?;

        self.references.push(Reference {
            name: name.to_string(),
            slot,
            access,
        });
        Ok(())
    }

    fn call(&mut self, name: &str, received: usize) -> Result<(), Error> {
        let signature = self
            .resolver
            .resolve_callee(name, self.prototypes)
            .ok_or_else(|| {
            Error::new(
                ErrorImpl::UnknownFunction {
                    function: name.to_string(),
                },
                self.position,
            )
        })?;

        if signature.arity != received {
            return Err(Error::new(
                ErrorImpl::UnexpectedArguments {
                    function: name.to_string(),
                    expected: signature.arity,
                    received,
                },
                self.position,
            ));
        }

        self.calls.push(signature);
        Ok(())
    }

    fn resolve_body(&mut self, body: &[Expr]) -> Result<(), Error> {
        for expr in body {
            self.resolve_expr(expr)?;
        }
        Ok(())
    }

    fn resolve_expr(&mut self, expr: &Expr) -> Result<(), Error> {
        match expr {
            Expr::Number(_) => Ok(()),
            Expr::Variable(name) => self.reference(name, Access::Read),
            Expr::Assign { target, value } => {
                self.resolve_expr(value)?;
                self.reference(target, Access::Write)
            }
            Expr::Binary { op, lhs, rhs } => {
                self.resolve_expr(lhs)?;
                self.resolve_expr(rhs)?;

                if BUILTIN_OPERATORS.contains(op) {
                    Ok(())
                } else {
                    self.call(&format!("binary{}", op), 2)
                }
            }
            Expr::Unary { op, operand } => {
                self.resolve_expr(operand)?;
                self.call(&format!("unary{}", op), 1)
            }
            Expr::Call { callee, args } => {
                for arg in args {
                    self.resolve_expr(arg)?;
                }
                self.call(callee, args.len())
            }
            Expr::If {
                condition,
                then_body,
                else_body,
            } => {
                self.resolve_expr(condition)?;
                self.resolve_body(then_body)?;
                self.resolve_body(else_body)
            }
            Expr::For {
                var,
                start,
                end,
                step,
                body,
            } => {
                self.resolve_expr(start)?;

                let mut loop_scope = Environment::new();
                let slot = self.new_slot(var, SlotOrigin::LoopVariable);
                loop_scope.declare_variable(var, slot);

                self.in_scope(loop_scope, |resolver| {
                    resolver.resolve_expr(end)?;
                    if let Some(step) = step {
                        resolver.resolve_expr(step)?;
                    }
                    resolver.resolve_body(body)
                })
            }
            Expr::Var { bindings, body } => self.in_scope(Environment::new(), |resolver| {
                for (name, initializer) in bindings {
                    // The initializer cannot see the name it initializes
                    if let Some(initializer) = initializer {
                        resolver.resolve_expr(initializer)?;
                    }

                    let slot = resolver.new_slot(name, SlotOrigin::VarBinding);
                    resolver.scopes.declare_variable(name, slot);
                }

                resolver.resolve_expr(body)
            }),
        }
    }
}
