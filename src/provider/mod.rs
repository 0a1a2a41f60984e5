//! Entity metadata providers.
//!
//! The relation graph never reflects over entities itself; it asks a
//! provider for each entity's direct edges. [`SchemaRegistry`] is the bundled
//! static provider, built in code or loaded from schema documents.

mod loader;
mod registry;

pub use loader::{SchemaDocument, SchemaFormat};
pub use registry::{EntityDef, SchemaRegistry};

use crate::graph::RelationEdge;

/// Source of per-entity relation metadata.
///
/// Implementations must report the same `target_type_name` for every edge
/// that points at the same entity type; the cycle guard relies on it. An
/// edge's `inverse_entity`, when present, must be resolvable by the same
/// provider.
pub trait EntityMetadataProvider {
    /// Handle identifying one entity's metadata.
    type Entity;
    type Error;

    /// Stable type name of `entity`.
    fn entity_name<'a>(&'a self, entity: &'a Self::Entity) -> &'a str;

    /// Direct relation edges of `entity`, in declaration order.
    fn relations(
        &self,
        entity: &Self::Entity,
    ) -> Result<Vec<RelationEdge<Self::Entity>>, Self::Error>;
}

impl<P> EntityMetadataProvider for &P
where
    P: EntityMetadataProvider + ?Sized,
{
    type Entity = P::Entity;
    type Error = P::Error;

    fn entity_name<'a>(&'a self, entity: &'a Self::Entity) -> &'a str {
        (**self).entity_name(entity)
    }

    fn relations(
        &self,
        entity: &Self::Entity,
    ) -> Result<Vec<RelationEdge<Self::Entity>>, Self::Error> {
        (**self).relations(entity)
    }
}
