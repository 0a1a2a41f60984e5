//! Static, in-memory entity metadata provider.

use serde::Deserialize;
use std::collections::HashMap;

use super::EntityMetadataProvider;
use crate::error::{RelgraphError, Result};
use crate::graph::RelationEdge;

/// One entity and its declared relations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntityDef {
    pub name: String,
    #[serde(default)]
    pub relations: Vec<RelationEdge<String>>,
}

impl EntityDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relations: Vec::new(),
        }
    }

    /// Append a relation. Any inverse handle on `edge` is ignored; the
    /// registry resolves inverses from its own entity table.
    pub fn relation(mut self, edge: RelationEdge<String>) -> Self {
        self.relations.push(edge);
        self
    }
}

/// Registry of entity metadata keyed by entity type name.
///
/// Entity handles are the type names themselves. An edge gets inverse
/// metadata exactly when its target type is registered; edges pointing
/// outside the registry are opaque.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    entities: Vec<EntityDef>,
    index: HashMap<String, usize>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from entity definitions, rejecting duplicate names.
    pub fn from_entities(entities: Vec<EntityDef>) -> Result<Self> {
        let mut registry = Self::new();
        for entity in entities {
            registry.register(entity)?;
        }
        Ok(registry)
    }

    /// Register one entity
    pub fn register(&mut self, entity: EntityDef) -> Result<()> {
        if self.index.contains_key(&entity.name) {
            return Err(RelgraphError::Parse(format!(
                "duplicate entity '{}'",
                entity.name
            )));
        }
        self.index.insert(entity.name.clone(), self.entities.len());
        self.entities.push(entity);
        Ok(())
    }

    /// Move every entity of `other` into this registry.
    pub fn merge(&mut self, other: SchemaRegistry) -> Result<()> {
        for entity in other.entities {
            self.register(entity)?;
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&EntityDef> {
        self.index.get(name).map(|&i| &self.entities[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Entity names in registration order
    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntityMetadataProvider for SchemaRegistry {
    type Entity = String;
    type Error = RelgraphError;

    fn entity_name<'a>(&'a self, entity: &'a String) -> &'a str {
        entity.as_str()
    }

    fn relations(&self, entity: &String) -> Result<Vec<RelationEdge<String>>> {
        let def = self
            .get(entity)
            .ok_or_else(|| RelgraphError::UnknownEntity(entity.clone()))?;

        Ok(def
            .relations
            .iter()
            .map(|edge| {
                let mut edge = edge.clone();
                edge.inverse_entity = self
                    .contains(&edge.target_type_name)
                    .then(|| edge.target_type_name.clone());
                edge
            })
            .collect())
    }
}
