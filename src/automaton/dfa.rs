use bit_set::BitSet;
use itertools::Itertools;

use crate::math::{OrderedMap, OrderedSet};
use crate::prelude::*;

/// A deterministic finite automaton (DFA). The states are the dense indices `0..size()`, each of
/// which owns a row that maps symbols to successor states. A word is accepted if running it from
/// the initial state ends in an accepting state.
///
/// A `DFA` is immutable once constructed; operations like [`DFA::minimize`] produce new values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DFA<S = char> {
    rows: Vec<OrderedMap<S, StateIndex>>,
    accepting: BitSet,
    initial: StateIndex,
}

impl<S: Symbol> DFA<S> {
    /// Creates a DFA from its transition rows, where the `i`-th row lists the transitions of
    /// state `i`, the accepting states and the initial state.
    ///
    /// # Panics
    /// Panics if the initial state, an accepting state or some transition target is not among
    /// the indices of the given rows.
    pub fn from_parts<R, T, A>(rows: R, accepting: A, initial: StateIndex) -> Self
    where
        R: IntoIterator<Item = T>,
        T: IntoIterator<Item = (S, StateIndex)>,
        A: IntoIterator<Item = StateIndex>,
    {
        let rows: Vec<OrderedMap<S, StateIndex>> = rows
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect();
        let size = rows.len();
        let in_range = |q: StateIndex| (q as usize) < size;

        assert!(
            in_range(initial),
            "initial state {} does not exist in DFA with {size} states",
            initial.show()
        );
        for (q, row) in rows.iter().enumerate() {
            for (sym, target) in row {
                assert!(
                    in_range(*target),
                    "transition ({}, {}) leads to non-existent state {}",
                    (q as StateIndex).show(),
                    sym.show(),
                    target.show()
                );
            }
        }
        let accepting: BitSet = accepting
            .into_iter()
            .inspect(|q| {
                assert!(in_range(*q), "accepting state {} does not exist", q.show());
            })
            .map(|q| q as usize)
            .collect();

        Self {
            rows,
            accepting,
            initial,
        }
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Returns the initial state.
    pub fn initial(&self) -> StateIndex {
        self.initial
    }

    /// Iterates over all state indices in ascending order.
    pub fn state_indices(&self) -> impl Iterator<Item = StateIndex> + '_ {
        (0..self.rows.len()).map(|q| q as StateIndex)
    }

    /// Returns `true` if `state` is accepting.
    pub fn is_accepting(&self, state: StateIndex) -> bool {
        self.accepting.contains(state as usize)
    }

    /// Iterates over the accepting states in ascending order.
    pub fn accepting_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.accepting.iter().map(|q| q as StateIndex)
    }

    /// Returns the set of all symbols that appear on some transition.
    pub fn symbols(&self) -> OrderedSet<S> {
        self.rows.iter().flat_map(|row| row.keys().copied()).collect()
    }

    /// Gives access to the transition row of `state`.
    ///
    /// # Panics
    /// Panics if `state` does not exist.
    pub fn row(&self, state: StateIndex) -> &OrderedMap<S, StateIndex> {
        self.rows
            .get(state as usize)
            .unwrap_or_else(|| panic!("state {} does not exist", state.show()))
    }

    /// Returns the successor of `state` on `symbol`, or `None` if the row of `state` has no
    /// entry for `symbol`.
    pub fn successor(&self, state: StateIndex, symbol: S) -> Option<StateIndex> {
        self.rows.get(state as usize)?.get(&symbol).copied()
    }

    /// Returns the successor of `state` on `symbol`.
    ///
    /// # Panics
    /// Reading a symbol that the row of `state` does not declare violates the contract of a
    /// DFA and panics.
    pub fn transition(&self, state: StateIndex, symbol: S) -> StateIndex {
        self.successor(state, symbol).unwrap_or_else(|| {
            panic!(
                "state {} has no transition on symbol {}",
                state.show(),
                symbol.show()
            )
        })
    }

    /// Groups the outgoing transitions of `state` by their target. The returned map sends each
    /// reachable successor to the symbols that lead there, in ascending order.
    pub fn out_edges(&self, state: StateIndex) -> OrderedMap<StateIndex, Vec<S>> {
        self.row(state)
            .iter()
            .fold(OrderedMap::new(), |mut acc, (&sym, &target)| {
                acc.entry(target).or_insert_with(Vec::new).push(sym);
                acc
            })
    }

    /// Runs `word` from the initial state and returns the reached state.
    ///
    /// # Panics
    /// Panics if some symbol of the word has no transition in the state where it is read.
    pub fn run<W: IntoIterator<Item = S>>(&self, word: W) -> StateIndex {
        word.into_iter()
            .fold(self.initial, |q, sym| self.transition(q, sym))
    }

    /// Returns `true` if running `word` ends in an accepting state.
    pub fn accepts<W: IntoIterator<Item = S>>(&self, word: W) -> bool {
        self.is_accepting(self.run(word))
    }

    /// Computes a regular expression that denotes exactly the language accepted by `self`. The
    /// automaton is minimized first, then converted by state elimination and the result is
    /// simplified.
    pub fn to_regex(&self) -> Result<Regex<S>, EliminationError> {
        Gnfa::dfa_to_regex(&self.minimize())
    }

    /// Like [`Self::to_regex`], but without minimizing first.
    pub fn to_regex_unminimized(&self) -> Result<Regex<S>, EliminationError> {
        Gnfa::dfa_to_regex(self)
    }

    /// Returns an anchored pattern, starting with `^` and ending with `$`, that a standard regex
    /// engine matches against exactly the words accepted by `self`.
    pub fn to_pattern(&self) -> Result<String, Error>
    where
        S: Into<char>,
    {
        Ok(self.to_regex()?.to_anchored_pattern()?)
    }

    /// Returns a string representation of the transition table. Accepting states are printed in
    /// bold and marked with `*`, the initial state is marked with `>`.
    pub fn transition_table(&self) -> String {
        use owo_colors::OwoColorize;

        let symbols = self.symbols();
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string()).chain(symbols.iter().map(|s| s.show())),
        );
        for q in self.state_indices() {
            let marker = if q == self.initial { ">" } else { "" };
            let label = if self.is_accepting(q) {
                format!("{marker}{}*", q.show()).bold().to_string()
            } else {
                format!("{marker}{}", q.show())
            };
            let mut row = vec![label];
            row.extend(symbols.iter().map(|&sym| match self.successor(q, sym) {
                Some(target) => target.show(),
                None => "-".to_string(),
            }));
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl<S: Symbol> Show for DFA<S> {
    fn show(&self) -> String {
        format!(
            "DFA with {} states, initial {}, accepting {}\n{}",
            self.size(),
            self.initial.show(),
            u32::show_collection(self.accepting_states().collect_vec().iter()),
            self.transition_table()
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn ab_parity() -> DFA {
        // accepts words with an even number of `a`s
        DFABuilder::default()
            .with_transitions([(0, 'a', 1), (0, 'b', 0), (1, 'a', 0), (1, 'b', 1)])
            .with_accepting([0])
            .into_dfa(0)
    }

    #[test]
    fn trivial_accept() {
        let dfa: DFA<char> = DFA::from_parts([Vec::<(char, u32)>::new()], [0], 0);
        assert!(dfa.accepts([]));
        assert_eq!(dfa.size(), 1);
        assert!(dfa.symbols().is_empty());
    }

    #[test]
    fn running() {
        let dfa = ab_parity();
        assert_eq!(dfa.run("".chars()), 0);
        assert_eq!(dfa.run("abba".chars()), 0);
        assert_eq!(dfa.run("abbab".chars()), 0);
        assert_eq!(dfa.run("ab".chars()), 1);
        assert!(dfa.accepts("bb".chars()));
        assert!(!dfa.accepts("bab".chars()));
        assert_eq!(dfa.successor(0, 'c'), None);
        assert_eq!(dfa.successor(7, 'a'), None);
    }

    #[test]
    fn out_edges_collapse_parallel_transitions() {
        let dfa = DFABuilder::default()
            .with_transitions([(0, 'a', 1), (0, 'b', 1), (0, 'c', 0), (1, 'a', 1)])
            .with_transitions([(1, 'b', 1), (1, 'c', 1)])
            .into_dfa(0);
        let edges = dfa.out_edges(0);
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[&1], vec!['a', 'b']);
        assert_eq!(edges[&0], vec!['c']);
        assert_eq!(dfa.out_edges(1)[&1], vec!['a', 'b', 'c']);
    }

    #[test]
    #[should_panic(expected = "has no transition on symbol")]
    fn transition_on_undeclared_symbol() {
        ab_parity().transition(0, 'z');
    }

    #[test]
    #[should_panic(expected = "leads to non-existent state")]
    fn target_out_of_range() {
        DFA::from_parts([vec![('a', 3u32)]], [], 0);
    }

    #[test]
    fn table() {
        let dfa = ab_parity();
        let table = dfa.transition_table();
        assert!(table.contains("State"));
        assert!(table.contains(">q0*"));
        assert!(table.lines().any(|line| line.contains("q1") && line.contains("q0")));
        assert!(dfa.show().starts_with("DFA with 2 states, initial q0, accepting {q0}"));
    }
}
