// File: src/interpreter/environment.rs
//
// Variable storage for the Rill interpreter.
//
// Rill has a single flat namespace by design: there is no lexical scoping or
// shadowing. A variable created inside a loop or conditional body remains
// visible after the block exits, and a variable read before assignment is an
// error, never an implicit zero. One Environment is created per run and is
// shared by every nested execution of that run, so loop bodies mutate the
// same backing store the enclosing code reads.

use ahash::AHashMap;

#[derive(Clone, Debug, Default)]
pub struct Environment {
    values: AHashMap<String, i64>,
}

impl Environment {
    pub fn new() -> Self {
        Environment { values: AHashMap::new() }
    }

    /// Look up a variable; `None` means it was never assigned
    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    /// Bind or overwrite a variable
    pub fn set(&mut self, name: String, value: i64) {
        self.values.insert(name, value);
    }

    /// All bound names, for "did you mean" suggestions
    pub fn names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    /// Bindings sorted by name, for REPL inspection
    pub fn bindings(&self) -> Vec<(String, i64)> {
        let mut entries: Vec<(String, i64)> =
            self.values.iter().map(|(k, v)| (k.clone(), *v)).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let mut env = Environment::new();
        env.set("x".to_string(), 10);
        assert_eq!(env.get("x"), Some(10));
    }

    #[test]
    fn unbound_variable_is_none_not_zero() {
        let env = Environment::new();
        assert_eq!(env.get("never_assigned"), None);
    }

    #[test]
    fn set_overwrites_existing_binding() {
        let mut env = Environment::new();
        env.set("x".to_string(), 1);
        env.set("x".to_string(), 2);
        assert_eq!(env.get("x"), Some(2));
    }

    #[test]
    fn bindings_are_sorted_by_name() {
        let mut env = Environment::new();
        env.set("b".to_string(), 2);
        env.set("a".to_string(), 1);
        assert_eq!(env.bindings(), vec![("a".to_string(), 1), ("b".to_string(), 2)]);
    }
}
