//! Depth-bounded, cycle-safe DFS over entity relation metadata.

use std::collections::HashSet;

use super::{aggregate, Cardinality, ExtendedRelationInfo, HopFlags, RelationEdge};
use crate::provider::EntityMetadataProvider;

/// Hop bound used when the caller does not pick one.
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// One path from the root, carried by value into each branch so sibling
/// branches never see each other's visited entities.
#[derive(Debug, Clone)]
struct PathState {
    /// `[root, hop1_property, ...]`
    names: Vec<String>,
    /// Entity type names on the path, root included.
    visited: Vec<String>,
    cardinalities: Vec<Cardinality>,
    flags: Vec<HopFlags>,
}

impl PathState {
    fn root(name: &str) -> Self {
        Self {
            names: vec![name.to_string()],
            visited: vec![name.to_string()],
            cardinalities: Vec::new(),
            flags: Vec::new(),
        }
    }

    fn depth(&self) -> usize {
        self.cardinalities.len()
    }

    fn has_visited(&self, entity_name: &str) -> bool {
        self.visited.iter().any(|v| v == entity_name)
    }

    fn hop<E>(&self, edge: &RelationEdge<E>) -> Self {
        let mut next = self.clone();
        next.names.push(edge.property_name.clone());
        next.visited.push(edge.target_type_name.clone());
        next.cardinalities.push(edge.cardinality);
        next.flags.push(edge.hop_flags());
        next
    }

    fn key(&self) -> String {
        self.names.join(".")
    }

    /// Descriptor for this path, whose last hop is `edge`.
    fn describe<E>(&self, edge: &RelationEdge<E>) -> ExtendedRelationInfo {
        let flags = HopFlags::fold(self.flags.iter().copied());
        ExtendedRelationInfo {
            property_name: self.names[1..].join("."),
            relation_type: edge.cardinality,
            aggregated_cardinality: aggregate(self.cardinalities.iter().copied())
                .unwrap_or(edge.cardinality),
            target: edge.target_type_name.clone(),
            is_nullable: flags.is_nullable,
            is_cascade: flags.is_cascade,
            is_eager: flags.is_eager,
            is_lazy: flags.is_lazy,
            path: self.names.clone(),
            is_extended: self.depth() > 1,
        }
    }
}

struct Walk<'p, P: ?Sized> {
    provider: &'p P,
    max_depth: usize,
    emitted: HashSet<String>,
    out: Vec<ExtendedRelationInfo>,
}

impl<'p, P> Walk<'p, P>
where
    P: EntityMetadataProvider + ?Sized,
{
    fn emit(&mut self, path: &PathState, edge: &RelationEdge<P::Entity>) {
        let key = path.key();
        if !self.emitted.insert(key) {
            log::debug!("Skipping duplicate relation path {}", path.key());
            return;
        }
        self.out.push(path.describe(edge));
    }

    /// Expand the edges of `entity`, reached through `path`.
    fn expand(&mut self, entity: &P::Entity, path: PathState) -> Result<(), P::Error> {
        if path.depth() >= self.max_depth {
            return Ok(());
        }

        let edges = self.provider.relations(entity)?;
        for edge in &edges {
            if path.has_visited(&edge.target_type_name) {
                log::debug!(
                    "Cycle guard: {} already on path {}, not following {}",
                    edge.target_type_name,
                    path.key(),
                    edge.property_name
                );
                continue;
            }

            let next = path.hop(edge);
            self.emit(&next, edge);

            match &edge.inverse_entity {
                Some(inverse) => self.expand(inverse, next)?,
                None => log::debug!("{} is opaque, not expanding", next.key()),
            }
        }

        Ok(())
    }
}

/// Compute direct and transitive relation descriptors for `root`, up to
/// `max_depth` hops.
///
/// Depth-1 entries come first, in source order, followed by a depth-first
/// walk past every direct edge that has inverse metadata. An entity type is
/// never entered twice within one path, and each path is reported once.
/// `max_depth == 0` yields nothing.
pub fn extend<P>(
    provider: &P,
    root: &P::Entity,
    max_depth: usize,
) -> Result<Vec<ExtendedRelationInfo>, P::Error>
where
    P: EntityMetadataProvider + ?Sized,
{
    if max_depth == 0 {
        return Ok(Vec::new());
    }

    let root_path = PathState::root(provider.entity_name(root));
    let edges = provider.relations(root)?;

    let mut walk = Walk {
        provider,
        max_depth,
        emitted: HashSet::new(),
        out: Vec::with_capacity(edges.len()),
    };

    for edge in &edges {
        walk.emit(&root_path.hop(edge), edge);
    }

    for edge in &edges {
        let Some(inverse) = &edge.inverse_entity else {
            continue;
        };
        if root_path.has_visited(&edge.target_type_name) {
            log::debug!(
                "Cycle guard: {} refers back to the root, not expanding",
                edge.property_name
            );
            continue;
        }
        walk.expand(inverse, root_path.hop(edge))?;
    }

    log::debug!(
        "Extended relations for {}: {} entries (max_depth={})",
        root_path.key(),
        walk.out.len(),
        max_depth
    );

    Ok(walk.out)
}
