/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - expressions: The closed set of expression variants
/// - statements: Prototypes, functions and top-level items
/// - registry: The per-session table of declared prototypes
pub mod expressions;
pub mod registry;
pub mod statements;

#[cfg(test)]
mod tests;
