//! Direct (depth-1) relation extraction.

use super::RelationInfo;
use crate::provider::EntityMetadataProvider;

/// Map every direct edge of `entity` to a [`RelationInfo`], in source order.
/// Provider errors are returned unchanged.
pub fn get_direct_relations<P>(
    provider: &P,
    entity: &P::Entity,
) -> Result<Vec<RelationInfo>, P::Error>
where
    P: EntityMetadataProvider + ?Sized,
{
    let edges = provider.relations(entity)?;
    Ok(edges.iter().map(RelationInfo::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Cardinality, RelationEdge};
    use crate::provider::{EntityDef, SchemaRegistry};

    #[test]
    fn test_direct_preserves_order() {
        let registry = SchemaRegistry::from_entities(vec![
            EntityDef::new("Post")
                .relation(RelationEdge::new("author", Cardinality::ManyToOne, "User"))
                .relation(RelationEdge::new("comments", Cardinality::OneToMany, "Comment").lazy(true))
                .relation(RelationEdge::new("tags", Cardinality::ManyToMany, "Tag").cascade(true)),
        ])
        .unwrap();

        let relations = get_direct_relations(&registry, &"Post".to_string()).unwrap();
        let names: Vec<_> = relations.iter().map(|r| r.property_name.as_str()).collect();
        assert_eq!(names, vec!["author", "comments", "tags"]);
        assert!(relations[1].is_lazy);
        assert!(relations[2].is_cascade);
        assert_eq!(relations[0].target, "User");
    }

    #[test]
    fn test_direct_no_relations() {
        let registry = SchemaRegistry::from_entities(vec![EntityDef::new("Tag")]).unwrap();
        let relations = get_direct_relations(&registry, &"Tag".to_string()).unwrap();
        assert!(relations.is_empty());
    }

    #[test]
    fn test_direct_keeps_duplicates() {
        let registry = SchemaRegistry::from_entities(vec![EntityDef::new("A")
            .relation(RelationEdge::new("b", Cardinality::OneToOne, "B"))
            .relation(RelationEdge::new("b", Cardinality::OneToOne, "B"))])
        .unwrap();
        let relations = get_direct_relations(&registry, &"A".to_string()).unwrap();
        assert_eq!(relations.len(), 2);
    }

    #[test]
    fn test_direct_unknown_entity_propagates() {
        let registry = SchemaRegistry::default();
        let err = get_direct_relations(&registry, &"Ghost".to_string()).unwrap_err();
        assert!(matches!(err, crate::RelgraphError::UnknownEntity(name) if name == "Ghost"));
    }
}
