//! View model module
//!
//! The set of named string values handed to a template for substitution.
//! Entries keep their insertion order, which is part of the rendering
//! contract and is what the tests assert against.

use tera::Context;

/// Insertion-ordered mapping from field name to string value.
///
/// Created fresh for every request that renders a template and dropped once
/// the response body is built. Not shared, not cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModel {
    entries: Vec<(String, String)>,
}

impl ViewModel {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a field. Re-inserting an existing name updates its value in
    /// place without changing its position.
    pub fn insert(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => value.clone_into(v),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert to a tera `Context`, preserving insertion order
    #[must_use]
    pub fn to_context(&self) -> Context {
        let mut ctx = Context::new();
        for (name, value) in &self.entries {
            ctx.insert(name, value);
        }
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut view = ViewModel::new();
        view.insert("title", "Welcome");
        view.insert("msg", "Hello there");

        let entries = view.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], ("title".to_string(), "Welcome".to_string()));
        assert_eq!(entries[1], ("msg".to_string(), "Hello there".to_string()));
    }

    #[test]
    fn test_reinsert_updates_in_place() {
        let mut view = ViewModel::new();
        view.insert("title", "Welcome");
        view.insert("msg", "Hello there");
        view.insert("title", "Changed");

        let entries = view.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], ("title".to_string(), "Changed".to_string()));
        assert_eq!(entries[1].0, "msg");
    }

    #[test]
    fn test_to_context_contains_all_fields() {
        let mut view = ViewModel::new();
        view.insert("title", "Welcome");
        view.insert("msg", "Hello there");

        let ctx = view.to_context();
        let json = ctx.into_json();
        assert_eq!(json["title"], "Welcome");
        assert_eq!(json["msg"], "Hello there");
    }

    #[test]
    fn test_empty_view_model() {
        let view = ViewModel::new();
        assert!(view.is_empty());
        assert_eq!(view.len(), 0);
    }
}
