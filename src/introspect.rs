//! Relation introspection facade for query planners and schema tooling.

use std::sync::Arc;

use crate::cache::RelationCache;
use crate::config::{Config, TraversalConfig};
use crate::graph::{extend, get_direct_relations, ExtendedRelationInfo, RelationInfo};
use crate::provider::EntityMetadataProvider;

/// Answers direct and extended relation queries against one provider,
/// applying configured depth defaults and an optional result cache.
pub struct Introspector<P> {
    provider: P,
    traversal: TraversalConfig,
    cache: Option<RelationCache>,
}

impl<P> Introspector<P>
where
    P: EntityMetadataProvider,
{
    /// Introspector with default traversal bounds and no cache.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            traversal: TraversalConfig::default(),
            cache: None,
        }
    }

    /// Introspector using the traversal and cache sections of `config`.
    pub fn with_config(provider: P, config: &Config) -> Self {
        let cache = (config.cache.capacity > 0).then(|| RelationCache::new(config.cache.capacity));
        Self {
            provider,
            traversal: config.traversal.clone(),
            cache,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cache(&self) -> Option<&RelationCache> {
        self.cache.as_ref()
    }

    /// Resolve a requested hop bound against the configured default and limit.
    pub fn effective_depth(&self, max_depth: Option<usize>) -> usize {
        let requested = max_depth.unwrap_or(self.traversal.default_max_depth);
        if requested > self.traversal.max_depth_limit {
            log::warn!(
                "max_depth {} exceeds limit {}, clamping",
                requested,
                self.traversal.max_depth_limit
            );
            return self.traversal.max_depth_limit;
        }
        requested
    }

    pub fn get_direct_relations(&self, entity: &P::Entity) -> Result<Vec<RelationInfo>, P::Error> {
        get_direct_relations(&self.provider, entity)
    }

    /// Extended relations of `entity`; `None` uses the configured default depth.
    pub fn get_extended_relations(
        &self,
        entity: &P::Entity,
        max_depth: Option<usize>,
    ) -> Result<Arc<Vec<ExtendedRelationInfo>>, P::Error> {
        let depth = self.effective_depth(max_depth);

        let Some(cache) = &self.cache else {
            return extend(&self.provider, entity, depth).map(Arc::new);
        };

        let name = self.provider.entity_name(entity);
        if let Some(hit) = cache.get(name, depth) {
            log::debug!("Relation cache hit for {} (depth {})", name, depth);
            return Ok(hit);
        }

        let relations = Arc::new(extend(&self.provider, entity, depth)?);
        cache.put(name.to_string(), depth, relations.clone());
        Ok(relations)
    }
}
