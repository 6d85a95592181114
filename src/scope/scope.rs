use std::collections::HashMap;

/// One lexical frame: the bindings introduced by a function's parameters,
/// a `for` loop variable, or the names of a `var` expression.
#[derive(Debug, Clone)]
pub struct Environment<T> {
    pub variable_lookup: HashMap<String, T>,
}

impl<T> Environment<T> {
    pub fn new() -> Self {
        Environment {
            variable_lookup: HashMap::new(),
        }
    }

    /// Binds `name` in this frame, returning the binding it replaced in the same frame.
    pub fn declare_variable(&mut self, name: &str, binding: T) -> Option<T> {
        self.variable_lookup.insert(name.to_string(), binding)
    }

    pub fn get_variable(&self, name: &str) -> Option<&T> {
        self.variable_lookup.get(name)
    }
}

impl<T> Default for Environment<T> {
    fn default() -> Self {
        Environment::new()
    }
}

impl<T> FromIterator<(String, T)> for Environment<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Environment {
            variable_lookup: iter.into_iter().collect(),
        }
    }
}

/// Scope Stack
///
/// Ordered frames, innermost last. A lookup walks from the innermost frame
/// outwards, so an inner binding shadows an outer one with the same name
/// until its frame is popped.
#[derive(Debug, Clone)]
pub struct ScopeStack<T> {
    environments: Vec<Environment<T>>,
}

impl<T> ScopeStack<T> {
    pub fn new() -> Self {
        ScopeStack {
            environments: vec![],
        }
    }

    pub fn push(&mut self, environment: Environment<T>) {
        self.environments.push(environment);
    }

    pub fn pop(&mut self) -> Option<Environment<T>> {
        self.environments.pop()
    }

    /// Binds `name` in the innermost frame, opening one if the stack is empty.
    pub fn declare_variable(&mut self, name: &str, binding: T) -> Option<T> {
        if self.environments.is_empty() {
            self.environments.push(Environment::new());
        }

        self.environments
            .last_mut()
            .and_then(|environment| environment.declare_variable(name, binding))
    }

    pub fn get_variable(&self, name: &str) -> Option<&T> {
        self.environments
            .iter()
            .rev()
            .find_map(|environment| environment.get_variable(name))
    }

    pub fn depth(&self) -> usize {
        self.environments.len()
    }

    pub fn clear(&mut self) {
        self.environments.clear();
    }
}

impl<T> Default for ScopeStack<T> {
    fn default() -> Self {
        ScopeStack::new()
    }
}

/// Anything that walks a function body while carrying a [`ScopeStack`].
pub trait ScopeOwner {
    type Binding;

    fn scopes(&mut self) -> &mut ScopeStack<Self::Binding>;

    /// Runs `body` with `environment` pushed as the innermost frame.
    ///
    /// The frame is popped once `body` returns, whether it produced a value
    /// or bailed out early with `?`.
    fn in_scope<R, F>(&mut self, environment: Environment<Self::Binding>, body: F) -> R
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> R,
    {
        self.scopes().push(environment);
        let result = body(self);
        self.scopes().pop();

        result
    }
}

impl<T> ScopeOwner for ScopeStack<T> {
    type Binding = T;

    fn scopes(&mut self) -> &mut ScopeStack<T> {
        self
    }
}
