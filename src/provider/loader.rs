//! Schema document loading (JSON, YAML, TOML).

use serde::Deserialize;
use std::path::Path;
use walkdir::WalkDir;

use super::{EntityDef, SchemaRegistry};
use crate::error::{RelgraphError, Result};

/// Supported schema document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Json,
    Yaml,
    Toml,
}

impl SchemaFormat {
    /// Pick a format from a file extension (case-insensitive)
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "json" => Some(SchemaFormat::Json),
            "yaml" | "yml" => Some(SchemaFormat::Yaml),
            "toml" => Some(SchemaFormat::Toml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
    }
}

/// Top-level shape of a schema document.
///
/// ```yaml
/// entities:
///   - name: Order
///     relations:
///       - propertyName: items
///         cardinality: OneToMany
///         targetTypeName: LineItem
///         isCascadeInsert: true
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub entities: Vec<EntityDef>,
}

impl SchemaDocument {
    pub fn parse(content: &str, format: SchemaFormat) -> Result<Self> {
        match format {
            SchemaFormat::Json => serde_json::from_str(content)
                .map_err(|e| RelgraphError::Parse(format!("invalid JSON schema: {}", e))),
            SchemaFormat::Yaml => serde_yaml_ng::from_str(content)
                .map_err(|e| RelgraphError::Parse(format!("invalid YAML schema: {}", e))),
            SchemaFormat::Toml => toml::from_str(content)
                .map_err(|e| RelgraphError::Parse(format!("invalid TOML schema: {}", e))),
        }
    }
}

impl SchemaRegistry {
    /// Build a registry from one schema document's text.
    pub fn from_document(content: &str, format: SchemaFormat) -> Result<Self> {
        let document = SchemaDocument::parse(content, format)?;
        Self::from_entities(document.entities)
    }

    /// Load a schema file, or every schema file under a directory.
    ///
    /// Directories are walked recursively in file-name order; files with
    /// unrecognised extensions are skipped there, but an explicit file
    /// must have a known extension.
    pub fn load(path: &Path) -> Result<Self> {
        if path.is_dir() {
            return Self::load_dir(path);
        }

        let format = SchemaFormat::from_path(path).ok_or_else(|| {
            RelgraphError::Parse(format!("unsupported schema file: {}", path.display()))
        })?;
        Self::load_file(path, format)
    }

    fn load_file(path: &Path, format: SchemaFormat) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let registry = Self::from_document(&content, format)
            .map_err(|e| RelgraphError::Parse(format!("{}: {}", path.display(), e)))?;
        log::debug!("Loaded {} entities from {}", registry.len(), path.display());
        Ok(registry)
    }

    fn load_dir(root: &Path) -> Result<Self> {
        let mut registry = Self::new();

        for entry in WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(format) = SchemaFormat::from_path(path) else {
                log::debug!("Skipping non-schema file {}", path.display());
                continue;
            };

            registry.merge(Self::load_file(path, format)?)?;
        }

        if registry.is_empty() {
            log::warn!("No entities found under {}", root.display());
        } else {
            log::info!("Loaded {} entities from {}", registry.len(), root.display());
        }

        Ok(registry)
    }
}
