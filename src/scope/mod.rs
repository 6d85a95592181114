/// Lexical scoping shared by the backends.
///
/// Parameters, `for` loop variables and `var` bindings each open a frame;
/// leaving the construct pops it and uncovers whatever it shadowed.
pub mod scope;

#[cfg(test)]
mod tests;
