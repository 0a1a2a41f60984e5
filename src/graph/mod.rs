//! Relation graph module: direct and transitive relation descriptors.
//!
//! Takes the association edges an entity declares (as exposed by an
//! [`EntityMetadataProvider`](crate::provider::EntityMetadataProvider)) and
//! derives depth-1 [`RelationInfo`] descriptors plus depth-bounded,
//! cycle-safe [`ExtendedRelationInfo`] descriptors for query planning and
//! schema introspection.

mod cardinality;
mod direct;
mod flags;
mod traversal;

pub use cardinality::{aggregate, combine};
pub use direct::get_direct_relations;
pub use flags::HopFlags;
pub use traversal::{extend, DEFAULT_MAX_DEPTH};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Multiplicity of an association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinality {
    #[serde(alias = "one-to-one", alias = "one_to_one")]
    OneToOne,
    #[serde(alias = "one-to-many", alias = "one_to_many")]
    OneToMany,
    #[serde(alias = "many-to-one", alias = "many_to_one")]
    ManyToOne,
    #[serde(alias = "many-to-many", alias = "many_to_many")]
    ManyToMany,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Cardinality::OneToOne => "OneToOne",
            Cardinality::OneToMany => "OneToMany",
            Cardinality::ManyToOne => "ManyToOne",
            Cardinality::ManyToMany => "ManyToMany",
        };
        f.write_str(s)
    }
}

/// One direct association declared on an entity (owner --property--> target).
///
/// `E` is the provider's entity handle. `inverse_entity` is the target's own
/// metadata; `None` marks the target as opaque and stops expansion there.
/// Deserializing fills absent booleans and names with their zero values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationEdge<E> {
    #[serde(default, alias = "property")]
    pub property_name: String,
    #[serde(alias = "relationType")]
    pub cardinality: Cardinality,
    #[serde(default, alias = "target")]
    pub target_type_name: String,
    #[serde(default, alias = "nullable")]
    pub is_nullable: bool,
    #[serde(default)]
    pub is_cascade_insert: bool,
    #[serde(default)]
    pub is_cascade_update: bool,
    #[serde(default)]
    pub is_cascade_remove: bool,
    #[serde(default, alias = "eager")]
    pub is_eager: bool,
    #[serde(default, alias = "lazy")]
    pub is_lazy: bool,
    #[serde(skip)]
    pub inverse_entity: Option<E>,
}

impl<E> RelationEdge<E> {
    /// Create an edge with every flag off and no inverse metadata.
    pub fn new(
        property_name: impl Into<String>,
        cardinality: Cardinality,
        target_type_name: impl Into<String>,
    ) -> Self {
        Self {
            property_name: property_name.into(),
            cardinality,
            target_type_name: target_type_name.into(),
            is_nullable: false,
            is_cascade_insert: false,
            is_cascade_update: false,
            is_cascade_remove: false,
            is_eager: false,
            is_lazy: false,
            inverse_entity: None,
        }
    }

    pub fn nullable(mut self, yes: bool) -> Self {
        self.is_nullable = yes;
        self
    }

    /// Set all three cascade flags at once.
    pub fn cascade(mut self, yes: bool) -> Self {
        self.is_cascade_insert = yes;
        self.is_cascade_update = yes;
        self.is_cascade_remove = yes;
        self
    }

    pub fn eager(mut self, yes: bool) -> Self {
        self.is_eager = yes;
        self
    }

    pub fn lazy(mut self, yes: bool) -> Self {
        self.is_lazy = yes;
        self
    }

    pub fn inverse(mut self, entity: E) -> Self {
        self.inverse_entity = Some(entity);
        self
    }

    /// True if mutating the owner propagates to the target in any way.
    pub fn is_cascade(&self) -> bool {
        self.is_cascade_insert || self.is_cascade_update || self.is_cascade_remove
    }

    pub fn hop_flags(&self) -> HopFlags {
        HopFlags {
            is_nullable: self.is_nullable,
            is_cascade: self.is_cascade(),
            is_eager: self.is_eager,
            is_lazy: self.is_lazy,
        }
    }
}

/// Depth-1 relation descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationInfo {
    pub property_name: String,
    pub relation_type: Cardinality,
    pub target: String,
    pub is_nullable: bool,
    pub is_cascade: bool,
    pub is_eager: bool,
    pub is_lazy: bool,
}

impl<E> From<&RelationEdge<E>> for RelationInfo {
    fn from(edge: &RelationEdge<E>) -> Self {
        Self {
            property_name: edge.property_name.clone(),
            relation_type: edge.cardinality,
            target: edge.target_type_name.clone(),
            is_nullable: edge.is_nullable,
            is_cascade: edge.is_cascade(),
            is_eager: edge.is_eager,
            is_lazy: edge.is_lazy,
        }
    }
}

/// Relation descriptor for a path of one or more hops from a root entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedRelationInfo {
    /// Dot-joined property chain, e.g. `posts.comments`.
    pub property_name: String,
    /// Cardinality of the last hop.
    pub relation_type: Cardinality,
    /// Cardinality folded over every hop, root to leaf.
    pub aggregated_cardinality: Cardinality,
    pub target: String,
    pub is_nullable: bool,
    pub is_cascade: bool,
    pub is_eager: bool,
    pub is_lazy: bool,
    /// `[root, hop1_property, hop2_property, ...]`
    pub path: Vec<String>,
    pub is_extended: bool,
}

impl ExtendedRelationInfo {
    /// Number of hops from the root.
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Path joined by `.`, root included. Unique within one traversal result.
    pub fn path_key(&self) -> String {
        self.path.join(".")
    }

    /// Depth-1 view of this descriptor.
    pub fn to_relation_info(&self) -> RelationInfo {
        RelationInfo {
            property_name: self.property_name.clone(),
            relation_type: self.relation_type,
            target: self.target.clone(),
            is_nullable: self.is_nullable,
            is_cascade: self.is_cascade,
            is_eager: self.is_eager,
            is_lazy: self.is_lazy,
        }
    }
}
