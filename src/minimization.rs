pub(crate) mod partition_refinement;

use crate::prelude::*;

impl<S: Symbol> DFA<S> {
    /// Returns the unique (up to renaming of states) minimal DFA that has the same transition
    /// structure as `self` modulo Myhill–Nerode equivalence. For every finite word, `self` and the
    /// returned automaton agree on acceptance. The computation is done by partition refinement,
    /// `self` is left untouched.
    pub fn minimize(&self) -> DFA<S> {
        let classes = self.equivalence_classes();
        partition_refinement::quotient(self, &classes)
    }

    /// Computes the Myhill–Nerode equivalence classes of the states of `self`, meaning two
    /// states end up in the same block if and only if no word distinguishes them.
    pub fn equivalence_classes(&self) -> Partition<StateIndex> {
        partition_refinement::myhill_nerode_partition(self)
    }
}
