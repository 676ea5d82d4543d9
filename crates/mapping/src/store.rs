//! Template persistence contract and in-memory reference store

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::binding::FieldMapping;
use crate::schema::Template;

/// Errors from template store operations
///
/// Store failures are fatal for the requested operation and are never
/// retried implicitly; an unintended retry of a write is worse than a
/// visible failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template {id} has type '{actual}', expected '{expected}'")]
    TypeMismatch {
        id: String,
        expected: String,
        actual: String,
    },

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Persistence boundary for templates and their mappings
///
/// `set_default` is the one operation needing a guarantee stronger than
/// last-write-wins: after it returns, exactly one template of the given
/// document type is marked default, whatever the prior state was.
pub trait TemplateStore: Send + Sync {
    /// Fetch a template by id
    fn get(&self, id: &str) -> Result<Template, StoreError>;

    /// List templates, optionally filtered by document type
    fn list(&self, doc_type: Option<&str>) -> Result<Vec<Template>, StoreError>;

    /// Insert or update a template, returning the stored form
    fn save(&self, template: Template) -> Result<Template, StoreError>;

    /// Delete a template and its mapping
    fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Replace the mapping of a stored template
    fn update_mapping(&self, id: &str, mapping: FieldMapping) -> Result<(), StoreError>;

    /// Atomically make a template the single default of its document type
    fn set_default(&self, id: &str, doc_type: &str) -> Result<(), StoreError>;
}

/// Mutex-backed in-memory store
///
/// Every operation runs under one lock, which trivially gives `set_default`
/// the unset-all-then-set-one atomicity the contract requires. Suitable for
/// tests and single-process deployments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    templates: Mutex<HashMap<String, Template>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Template>>, StoreError> {
        self.templates
            .lock()
            .map_err(|e| StoreError::Backend(format!("store lock poisoned: {e}")))
    }
}

impl TemplateStore for MemoryStore {
    fn get(&self, id: &str) -> Result<Template, StoreError> {
        self.lock()?
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn list(&self, doc_type: Option<&str>) -> Result<Vec<Template>, StoreError> {
        let templates = self.lock()?;
        let mut result: Vec<Template> = templates
            .values()
            .filter(|t| doc_type.map_or(true, |dt| t.doc_type == dt))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(result)
    }

    fn save(&self, mut template: Template) -> Result<Template, StoreError> {
        let mut templates = self.lock()?;

        if template.id.is_empty() {
            template.id = Uuid::new_v4().to_string();
            template.created_at = Utc::now();
        }
        template.updated_at = Utc::now();

        log::debug!("Saving template {} ({})", template.id, template.name);
        templates.insert(template.id.clone(), template.clone());
        Ok(template)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut templates = self.lock()?;
        templates
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn update_mapping(&self, id: &str, mapping: FieldMapping) -> Result<(), StoreError> {
        let mut templates = self.lock()?;
        let template = templates
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        template.mapping = mapping;
        template.updated_at = Utc::now();
        Ok(())
    }

    fn set_default(&self, id: &str, doc_type: &str) -> Result<(), StoreError> {
        let mut templates = self.lock()?;

        let target = templates
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if target.doc_type != doc_type {
            return Err(StoreError::TypeMismatch {
                id: id.to_string(),
                expected: doc_type.to_string(),
                actual: target.doc_type.clone(),
            });
        }

        // Unset all, then set one; repairs zero-or-several prior defaults
        for template in templates.values_mut() {
            if template.doc_type == doc_type {
                template.is_default = template.id == id;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn saved(store: &MemoryStore, name: &str, doc_type: &str) -> Template {
        store.save(Template::new(name, doc_type)).unwrap()
    }

    #[test]
    fn test_save_assigns_id() {
        let store = MemoryStore::new();
        let template = saved(&store, "Quote layout", "quote");

        assert!(!template.id.is_empty());
        assert_eq!(store.get(&template.id).unwrap().name, "Quote layout");
    }

    #[test]
    fn test_save_updates_in_place() {
        let store = MemoryStore::new();
        let mut template = saved(&store, "Quote layout", "quote");
        let id = template.id.clone();

        template.name = "Quote layout v2".to_string();
        store.save(template).unwrap();

        assert_eq!(store.get(&id).unwrap().name, "Quote layout v2");
        assert_eq!(store.list(None).unwrap().len(), 1);
    }

    #[test]
    fn test_get_missing() {
        let store = MemoryStore::new();
        assert_eq!(
            store.get("ghost").unwrap_err(),
            StoreError::NotFound("ghost".to_string())
        );
    }

    #[test]
    fn test_list_by_type() {
        let store = MemoryStore::new();
        saved(&store, "Quote A", "quote");
        saved(&store, "Quote B", "quote");
        saved(&store, "Invoice A", "invoice");

        assert_eq!(store.list(Some("quote")).unwrap().len(), 2);
        assert_eq!(store.list(Some("invoice")).unwrap().len(), 1);
        assert_eq!(store.list(None).unwrap().len(), 3);
        assert_eq!(store.list(Some("receipt")).unwrap().len(), 0);
    }

    #[test]
    fn test_delete() {
        let store = MemoryStore::new();
        let template = saved(&store, "Quote", "quote");

        store.delete(&template.id).unwrap();
        assert!(store.get(&template.id).is_err());
        assert!(store.delete(&template.id).is_err());
    }

    #[test]
    fn test_update_mapping() {
        let store = MemoryStore::new();
        let template = saved(&store, "Quote", "quote");

        let mapping = FieldMapping::new().with_source(
            "total",
            "offers",
            "total",
            crate::schema::FieldType::Currency,
        );
        store.update_mapping(&template.id, mapping.clone()).unwrap();

        assert_eq!(store.get(&template.id).unwrap().mapping, mapping);
    }

    #[test]
    fn test_set_default_exclusive() {
        let store = MemoryStore::new();
        let a = saved(&store, "Quote A", "quote");
        let b = saved(&store, "Quote B", "quote");
        let invoice = saved(&store, "Invoice", "invoice");

        store.set_default(&a.id, "quote").unwrap();
        store.set_default(&invoice.id, "invoice").unwrap();
        store.set_default(&b.id, "quote").unwrap();

        let defaults: Vec<String> = store
            .list(Some("quote"))
            .unwrap()
            .into_iter()
            .filter(|t| t.is_default)
            .map(|t| t.id)
            .collect();
        assert_eq!(defaults, vec![b.id]);

        // The other document type keeps its own default
        assert!(store.get(&invoice.id).unwrap().is_default);
    }

    #[test]
    fn test_set_default_repairs_corrupt_state() {
        let store = MemoryStore::new();
        let mut a = saved(&store, "Quote A", "quote");
        let mut b = saved(&store, "Quote B", "quote");

        // Simulate a corrupt prior state with two defaults
        a.is_default = true;
        b.is_default = true;
        store.save(a.clone()).unwrap();
        store.save(b.clone()).unwrap();

        store.set_default(&a.id, "quote").unwrap();

        let defaults: Vec<String> = store
            .list(Some("quote"))
            .unwrap()
            .into_iter()
            .filter(|t| t.is_default)
            .map(|t| t.id)
            .collect();
        assert_eq!(defaults, vec![a.id]);
    }

    #[test]
    fn test_set_default_idempotent() {
        let store = MemoryStore::new();
        let a = saved(&store, "Quote A", "quote");

        store.set_default(&a.id, "quote").unwrap();
        store.set_default(&a.id, "quote").unwrap();

        assert!(store.get(&a.id).unwrap().is_default);
    }

    #[test]
    fn test_set_default_type_mismatch() {
        let store = MemoryStore::new();
        let a = saved(&store, "Quote A", "quote");

        let err = store.set_default(&a.id, "invoice").unwrap_err();
        assert!(matches!(err, StoreError::TypeMismatch { .. }));
        assert!(!store.get(&a.id).unwrap().is_default);
    }
}
