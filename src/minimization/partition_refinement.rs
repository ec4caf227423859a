use tracing::{debug, trace};

use crate::math::OrderedMap;
use crate::prelude::*;

/// Computes the coarsest partition of the states of `dfa` that separates accepting from
/// rejecting states and is stable under transitions. Starting from the split into accepting and
/// rejecting states, every round refines all blocks such that two states remain together iff
/// their rows declare the same symbols and each symbol leads into the same block. This is
/// repeated until a round does not increase the number of blocks, which happens after at most
/// `dfa.size()` rounds.
pub(crate) fn myhill_nerode_partition<S: Symbol>(dfa: &DFA<S>) -> Partition<StateIndex> {
    let (accepting, rejecting): (Vec<_>, Vec<_>) =
        dfa.state_indices().partition(|q| dfa.is_accepting(*q));
    let mut partition = Partition::new([accepting, rejecting]);

    let mut round = 0;
    loop {
        round += 1;
        let renaming = partition.to_renaming();
        let refined = partition.refine(|p, q| {
            let (left, right) = (dfa.row(*p), dfa.row(*q));
            left.len() == right.len()
                && left.iter().zip(right.iter()).all(|((a, x), (b, y))| {
                    a == b && renaming[x] == renaming[y]
                })
        });
        debug!(
            "refinement round {round} went from {} to {} blocks",
            partition.size(),
            refined.size()
        );
        trace!("refined partition {}", refined.show());

        if refined.size() == partition.size() {
            return refined;
        }
        partition = refined;
    }
}

/// Builds the quotient of `dfa` with respect to `classes`, which must be stable under transitions
/// and must not mix accepting with rejecting states. The `i`-th block becomes state `i`, its row is
/// taken from an arbitrary member with all targets renamed to their blocks.
pub(crate) fn quotient<S: Symbol>(dfa: &DFA<S>, classes: &Partition<StateIndex>) -> DFA<S> {
    let renaming = classes.to_renaming();
    let rename = |q: StateIndex| renaming[&q] as StateIndex;

    let rows = classes.iter().map(|block| {
        let representative = *block
            .first()
            .expect("blocks of a partition are never empty");
        dfa.row(representative)
            .iter()
            .map(|(&sym, &target)| (sym, rename(target)))
            .collect::<OrderedMap<_, _>>()
    });
    let accepting = classes
        .iter()
        .enumerate()
        .filter(|(_, block)| block.iter().any(|q| dfa.is_accepting(*q)))
        .map(|(i, _)| i as StateIndex);

    let out = DFA::from_parts(
        rows.collect::<Vec<_>>(),
        accepting.collect::<Vec<_>>(),
        rename(dfa.initial()),
    );
    debug!(
        "minimized DFA with {} states to {} states",
        dfa.size(),
        out.size()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::{myhill_nerode_partition, quotient};
    use crate::prelude::*;

    #[test_log::test]
    fn classes_never_mix_acceptance() {
        let dfa = divisibility::divisible_by(12);
        let classes = myhill_nerode_partition(&dfa);
        for block in &classes {
            assert!(
                block.iter().all(|q| dfa.is_accepting(*q))
                    || block.iter().all(|q| !dfa.is_accepting(*q))
            );
        }
        let min = quotient(&dfa, &classes);
        assert_eq!(min.size(), classes.size());
        assert_eq!(min.initial() as usize, classes.block_index_of(&dfa.initial()));
    }

    #[test]
    fn rows_with_different_symbols_are_separated() {
        // state 1 and 2 are both rejecting sinks, but 2 declares an extra symbol
        let dfa = DFABuilder::default()
            .with_transitions([(0, 'a', 1), (0, 'b', 2), (1, 'a', 1), (2, 'a', 2), (2, 'b', 2)])
            .into_dfa(0);
        assert_eq!(myhill_nerode_partition(&dfa).size(), 3);
    }
}
