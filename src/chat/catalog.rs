use anyhow::Result;
use std::path::PathBuf;

use crate::store;

/// Insertion-ordered, duplicate-free list of model identifiers backed by the
/// catalog document. Every addition rewrites the document.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    models: Vec<String>,
    path: PathBuf,
}

impl ModelCatalog {
    /// Loads the catalog at `path`, falling back to `[fallback_model]` when
    /// the document is missing, malformed or empty. The fallback is not
    /// written back.
    pub fn load(path: impl Into<PathBuf>, fallback_model: &str) -> Self {
        let path = path.into();
        let mut models = store::load_models(&path);
        if models.is_empty() {
            tracing::debug!(model = fallback_model, "model catalog empty, using fallback");
            models.push(fallback_model.to_string());
        }
        Self { models, path }
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn contains(&self, model: &str) -> bool {
        self.models.iter().any(|m| m == model)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Appends `model` if it is new and persists the catalog.
    ///
    /// Returns `Ok(false)` for a known id. If persisting fails the id stays
    /// in memory and the error is returned.
    pub(crate) fn insert(&mut self, model: &str) -> Result<bool> {
        if self.contains(model) {
            return Ok(false);
        }
        self.models.push(model.to_string());
        store::save_models(&self.path, &self.models)?;
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_catalog_falls_back_to_default_model() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("models.xml");
        std::fs::write(&path, "").unwrap();

        let catalog = ModelCatalog::load(&path, "openai/gpt-4.1-mini");

        assert_eq!(catalog.models(), ["openai/gpt-4.1-mini"]);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_existing_catalog_ignores_fallback() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("models.xml");
        store::save_models(&path, &["a/one".to_string()]).unwrap();

        let catalog = ModelCatalog::load(&path, "openai/gpt-4.1-mini");

        assert_eq!(catalog.models(), ["a/one"]);
    }

    #[test]
    fn test_insert_new_model_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("models.xml");
        let mut catalog = ModelCatalog::load(&path, "a/one");

        assert!(catalog.insert("b/two").unwrap());
        assert!(!catalog.insert("b/two").unwrap());

        assert_eq!(catalog.models(), ["a/one", "b/two"]);
        assert_eq!(store::load_models(&path), ["a/one", "b/two"]);
    }

    #[test]
    fn test_insert_persist_failure_keeps_model_in_memory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("models.xml");
        let mut catalog = ModelCatalog::load(&path, "a/one");

        assert!(catalog.insert("b/two").is_err());
        assert!(catalog.contains("b/two"));
    }
}
