//! JSON template store format (spec.md §6.3).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::RegistrationError;
use crate::registry::{Registry, RegistryBuilder};

/// On-disk schema for a template store document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateStoreFile {
    /// Schema version; only `"1"` is currently recognized.
    pub version: String,
    /// Templates keyed by their decimal id.
    pub templates: BTreeMap<String, TemplateEntry>,
}

/// A single entry in a [`TemplateStoreFile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// The pattern text, with `{N}` slot placeholders.
    pub pattern: String,
}

/// Failure modes when loading a template store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document could not be read from disk.
    #[error("failed to read template store: {0}")]
    Io(#[from] std::io::Error),
    /// The document was not valid JSON or did not match the schema.
    #[error("failed to parse template store: {0}")]
    Json(#[from] serde_json::Error),
    /// The document's `version` field was not `"1"`.
    #[error("unsupported template store schema version: {0}")]
    UnsupportedVersion(String),
    /// A decimal id key could not be parsed as `u16`, or was >= 2^16.
    #[error("template id {0:?} is not a valid u16")]
    InvalidId(String),
    /// A template failed to register (duplicate id or invalid pattern).
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

impl TemplateStoreFile {
    /// Loads and parses a template store document from `path`.
    ///
    /// # Errors
    ///
    /// See [`StoreError`].
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let text = std::fs::read_to_string(path)?;
        Self::load_from_str(&text)
    }

    /// Parses a template store document from an in-memory string.
    ///
    /// # Errors
    ///
    /// See [`StoreError`].
    pub fn load_from_str(text: &str) -> Result<Self, StoreError> {
        let doc: Self = serde_json::from_str(text)?;
        if doc.version != "1" {
            return Err(StoreError::UnsupportedVersion(doc.version));
        }
        Ok(doc)
    }

    /// Builds a [`Registry`] from this document's templates.
    ///
    /// # Errors
    ///
    /// See [`StoreError`].
    pub fn into_registry(self) -> Result<Registry, StoreError> {
        let mut builder = RegistryBuilder::new();
        for (id_text, entry) in self.templates {
            let id: u16 = id_text
                .parse()
                .map_err(|_| StoreError::InvalidId(id_text.clone()))?;
            builder = builder.with_template(id, &entry.pattern)?;
        }
        Ok(builder.build())
    }
}
