use crate::math::OrderedMap;
use crate::prelude::*;

/// Helper struct for the construction of [`DFA`]s. It stores a list of transitions, the accepting
/// states and optionally a minimum number of states.
///
/// # Example
///
/// We want to create a DFA with two states 0 and 1 over the alphabet `['a', 'b']` that accepts
/// the words with an even number of `b`s. State 0 should be initial and accepting.
/// ```
/// use dfa_regex::prelude::*;
///
/// let dfa = DFABuilder::default()
///     .with_transitions([(0, 'a', 0), (0, 'b', 1), (1, 'a', 1), (1, 'b', 0)])
///     .with_accepting([0])
///     .into_dfa(0); // 0 is the initial state
/// assert!(dfa.accepts("abab".chars()));
/// ```
#[derive(Clone, Debug)]
pub struct DFABuilder<S = char> {
    transitions: Vec<(StateIndex, S, StateIndex)>,
    accepting: Vec<StateIndex>,
    states: usize,
}

impl<S> Default for DFABuilder<S> {
    fn default() -> Self {
        Self {
            transitions: vec![],
            accepting: vec![],
            states: 0,
        }
    }
}

impl<S: Symbol> DFABuilder<S> {
    /// Adds the given transitions, each given as a `(source, symbol, target)` triple.
    pub fn with_transitions<I>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = (StateIndex, S, StateIndex)>,
    {
        self.transitions.extend(iter);
        self
    }

    /// Marks the given states as accepting.
    pub fn with_accepting<I: IntoIterator<Item = StateIndex>>(mut self, iter: I) -> Self {
        self.accepting.extend(iter);
        self
    }

    /// Ensures that the built automaton has at least `count` states, which is useful for
    /// states that neither have outgoing transitions nor are mentioned elsewhere.
    pub fn with_state_count(mut self, count: usize) -> Self {
        self.states = self.states.max(count);
        self
    }

    /// Builds the [`DFA`] with the given `initial` state. The number of states is one more than
    /// the largest index that is mentioned anywhere.
    ///
    /// # Panics
    /// Panics if two transitions leave the same state on the same symbol towards different targets.
    pub fn into_dfa(self, initial: StateIndex) -> DFA<S> {
        let size = self
            .transitions
            .iter()
            .flat_map(|(p, _, q)| [*p, *q])
            .chain(self.accepting.iter().copied())
            .chain(std::iter::once(initial))
            .map(|q| q as usize + 1)
            .max()
            .unwrap_or(0)
            .max(self.states);

        let mut rows = vec![OrderedMap::new(); size];
        for (source, sym, target) in self.transitions {
            if let Some(existing) = rows[source as usize].insert(sym, target) {
                if existing != target {
                    tracing::error!(
                        "tried to build DFA with nondeterministic transitions from {} on {}",
                        source.show(),
                        sym.show()
                    );
                    panic!(
                        "state {} has transitions to both {} and {} on symbol {}",
                        source.show(),
                        existing.show(),
                        target.show(),
                        sym.show()
                    );
                }
            }
        }

        DFA::from_parts(rows, self.accepting, initial)
    }
}
