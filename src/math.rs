use std::collections::{BTreeMap, BTreeSet};
use std::hash::Hash;

use itertools::Itertools;

use crate::Show;

/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Type alias for sets whose iteration order is determined by the elements.
pub type OrderedSet<S> = BTreeSet<S>;
/// Type alias for maps whose iteration order is determined by the keys.
pub type OrderedMap<K, V> = BTreeMap<K, V>;

/// A partition is a different view on an equivalence relation, by grouping elements of
/// type `I` into their respective classes under the relation. Blocks are never empty and
/// no element appears in more than one block.
///
/// Partitions are values: refining one produces a new partition and leaves the old one untouched.
#[derive(Debug, Clone)]
pub struct Partition<I: Hash + Eq>(Vec<BTreeSet<I>>);

impl<I: Hash + Eq> std::ops::Deref for Partition<I> {
    type Target = Vec<BTreeSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I: Hash + Eq> IntoIterator for &'a Partition<I> {
    type Item = &'a BTreeSet<I>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<I: Hash + Eq> PartialEq for Partition<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|o| other.contains(o))
    }
}
impl<I: Hash + Eq> Eq for Partition<I> {}

impl<I: Hash + Eq + Ord + Clone> Partition<I> {
    /// Returns the size of the partition, i.e. the number of classes.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Builds a new partition from an iterator that yields iterators
    /// which yield elements of type `I`. Blocks that turn out empty are dropped.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        let blocks: Vec<BTreeSet<I>> = iter
            .into_iter()
            .map(|it| it.into_iter().collect::<BTreeSet<_>>())
            .filter(|block| !block.is_empty())
            .collect();
        debug_assert!(
            blocks.iter().flatten().all_unique(),
            "blocks of a partition must be disjoint"
        );
        Self(blocks)
    }

    /// Splits every block into maximal sub-blocks of elements that are pairwise related by
    /// `equivalent`. For each block, the smallest remaining element is taken as representative
    /// and everything equivalent to it is pulled out, until the block is exhausted.
    ///
    /// The relation is expected to be an equivalence. Blocks are never merged, so the result
    /// has at least as many blocks as `self`.
    pub fn refine<F>(&self, equivalent: F) -> Self
    where
        F: Fn(&I, &I) -> bool,
    {
        let mut out = Vec::with_capacity(self.size());
        for block in &self.0 {
            let mut remaining: Vec<&I> = block.iter().collect();
            while let Some((&representative, rest)) = remaining.split_first() {
                let (class, others): (Vec<&I>, Vec<&I>) = rest
                    .iter()
                    .partition(|element| equivalent(representative, element));
                out.push(
                    std::iter::once(representative)
                        .chain(class)
                        .cloned()
                        .collect::<BTreeSet<_>>(),
                );
                remaining = others;
            }
        }
        Self(out)
    }

    /// Returns the index of the block that contains `element`.
    ///
    /// # Panics
    /// Panics if `element` is not contained in any block.
    pub fn block_index_of(&self, element: &I) -> usize
    where
        I: Show,
    {
        self.0
            .iter()
            .position(|block| block.contains(element))
            .unwrap_or_else(|| panic!("{} is not contained in any block", element.show()))
    }

    /// Produces a map that sends every element to the index of the block it belongs to.
    pub fn to_renaming(&self) -> Map<I, usize> {
        self.0
            .iter()
            .enumerate()
            .flat_map(|(i, block)| block.iter().map(move |element| (element.clone(), i)))
            .collect()
    }
}

impl<I: Hash + Eq + Ord + Clone> From<Vec<BTreeSet<I>>> for Partition<I> {
    fn from(value: Vec<BTreeSet<I>>) -> Self {
        Self::new(value)
    }
}

impl<I: Hash + Eq + Show> Show for Partition<I> {
    fn show(&self) -> String {
        format!(
            "[{}]",
            self.0
                .iter()
                .map(|block| I::show_collection(block.iter()))
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Partition;
    use crate::Show;

    #[test]
    fn empty_blocks_are_dropped() {
        let p = Partition::new([vec![], vec![0u32, 1], vec![], vec![2]]);
        assert_eq!(p.size(), 2);
        assert_eq!(p, Partition::new([vec![2u32], vec![1, 0]]));
    }

    #[test]
    fn refine_by_parity() {
        let p = Partition::new([0u32..6]);
        let refined = p.refine(|l, r| l % 2 == r % 2);
        assert_eq!(refined, Partition::new([vec![0, 2, 4], vec![1, 3, 5]]));
        // refining is pure
        assert_eq!(p.size(), 1);

        // refining never merges blocks
        let split = Partition::new([vec![0u32, 1], vec![2, 3]]);
        assert_eq!(split.refine(|_, _| true), split);
        assert_eq!(split.refine(|l, r| l == r).size(), 4);
    }

    #[test]
    fn lookup_and_renaming() {
        let p = Partition::new([vec![3u32, 4], vec![0], vec![1, 2]]);
        assert_eq!(p.block_index_of(&4), 0);
        assert_eq!(p.block_index_of(&0), 1);
        assert_eq!(p.block_index_of(&2), 2);

        let renaming = p.to_renaming();
        assert_eq!(renaming.len(), 5);
        for q in 0..5 {
            assert_eq!(renaming[&q], p.block_index_of(&q));
        }
        assert_eq!(p.show(), "[{q3, q4}, {q0}, {q1, q2}]");
    }

    #[test]
    #[should_panic(expected = "q9 is not contained in any block")]
    fn lookup_of_absent_element() {
        Partition::new([vec![0u32, 1]]).block_index_of(&9);
    }
}
