pub mod cache;
pub mod config;
pub mod error;
pub mod graph;
pub mod introspect;
pub mod provider;

pub use config::Config;
pub use error::{RelgraphError, Result};
pub use graph::{
    extend, get_direct_relations, Cardinality, ExtendedRelationInfo, RelationEdge, RelationInfo,
};
pub use introspect::Introspector;
pub use provider::{EntityMetadataProvider, SchemaRegistry};
