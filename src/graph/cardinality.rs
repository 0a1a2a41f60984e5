//! Cardinality lattice: combining multiplicities along a relation path.

use super::Cardinality;

/// Combine two hop multiplicities into the multiplicity of the composed hop.
///
/// `OneToOne` is the identity. Equal cardinalities are preserved; any other
/// mixture (a fan-out followed by a fan-in, or the reverse) collapses to
/// `ManyToMany`.
pub fn combine(a: Cardinality, b: Cardinality) -> Cardinality {
    match (a, b) {
        (Cardinality::OneToOne, other) | (other, Cardinality::OneToOne) => other,
        (a, b) if a == b => a,
        _ => Cardinality::ManyToMany,
    }
}

/// Fold [`combine`] over a path, root to leaf.
/// Returns `None` for an empty path.
pub fn aggregate<I>(path: I) -> Option<Cardinality>
where
    I: IntoIterator<Item = Cardinality>,
{
    path.into_iter().reduce(combine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Cardinality::*;

    const ALL: [Cardinality; 4] = [OneToOne, OneToMany, ManyToOne, ManyToMany];

    #[test]
    fn test_one_to_one_is_identity() {
        for x in ALL {
            assert_eq!(aggregate([OneToOne, x]), Some(x));
            assert_eq!(aggregate([x, OneToOne]), Some(x));
        }
    }

    #[test]
    fn test_many_to_many_absorbs() {
        for x in ALL {
            assert_eq!(aggregate([ManyToMany, x]), Some(ManyToMany));
            assert_eq!(aggregate([x, ManyToMany]), Some(ManyToMany));
        }
        assert_eq!(
            aggregate([OneToOne, OneToMany, ManyToMany, OneToOne]),
            Some(ManyToMany)
        );
    }

    #[test]
    fn test_mixed_fan_collapses() {
        assert_eq!(aggregate([OneToMany, ManyToOne]), Some(ManyToMany));
        assert_eq!(aggregate([ManyToOne, OneToMany]), Some(ManyToMany));
    }

    #[test]
    fn test_same_type_preserved() {
        assert_eq!(aggregate([OneToMany, OneToMany]), Some(OneToMany));
        assert_eq!(aggregate([ManyToOne, ManyToOne]), Some(ManyToOne));
        assert_eq!(aggregate([ManyToMany, ManyToMany]), Some(ManyToMany));
    }

    #[test]
    fn test_single_and_empty_path() {
        assert_eq!(aggregate([ManyToOne]), Some(ManyToOne));
        assert_eq!(aggregate(std::iter::empty()), None);
    }

    #[test]
    fn test_fold_is_left_to_right() {
        // ((OneToMany + OneToOne) + OneToMany) stays a fan-out
        assert_eq!(aggregate([OneToMany, OneToOne, OneToMany]), Some(OneToMany));
    }
}
