//! Flag aggregation along a relation path.

/// Loading and mutation flags of one hop, or of a whole path once folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HopFlags {
    pub is_nullable: bool,
    pub is_cascade: bool,
    pub is_eager: bool,
    pub is_lazy: bool,
}

impl HopFlags {
    /// Fold per-hop flags into path flags.
    ///
    /// nullable, cascade and lazy are OR-folded; eager is AND-folded, so a
    /// chain is eager only if every hop is. An empty path folds to the
    /// identity of each operator.
    pub fn fold<I>(hops: I) -> Self
    where
        I: IntoIterator<Item = HopFlags>,
    {
        hops.into_iter().fold(
            HopFlags {
                is_nullable: false,
                is_cascade: false,
                is_eager: true,
                is_lazy: false,
            },
            |acc, hop| HopFlags {
                is_nullable: acc.is_nullable || hop.is_nullable,
                is_cascade: acc.is_cascade || hop.is_cascade,
                is_eager: acc.is_eager && hop.is_eager,
                is_lazy: acc.is_lazy || hop.is_lazy,
            },
        )
    }
}
