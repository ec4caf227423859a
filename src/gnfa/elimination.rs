use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, trace};

use crate::prelude::*;

/// Signals that state elimination did not reduce a [`Gnfa`] to a single edge from the source
/// to the sink. This points either to a malformed automaton or to a bug in the elimination.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EliminationError {
    /// Some original states or edges other than the one from source to sink survived.
    #[error("state elimination left {states} original states and {edges} edges behind")]
    Residual {
        /// The number of original states that were not eliminated.
        states: usize,
        /// The number of remaining edges.
        edges: usize,
    },
    /// No edge from the source to the sink exists, so the automaton accepts no word.
    #[error("no edge from source to sink remains, the automaton does not accept any word")]
    Disconnected,
}

impl<S: Symbol> Gnfa<S> {
    /// Eliminates the original state `q_rip`. For every pair of an incoming edge `q_in -> q_rip`
    /// labeled `r_in` and an outgoing edge `q_rip -> q_out` labeled `r_out`, a bypass
    /// `r_in loop* r_out` is added as an alternative to the edge `q_in -> q_out`, where `loop` is
    /// the label of the self loop on `q_rip`. Afterwards, `q_rip` and all edges touching it are
    /// removed. The language of the GNFA does not change.
    ///
    /// # Panics
    /// Panics if `q_rip` does not exist or was eliminated before.
    pub fn rip_state(&mut self, q_rip: StateIndex) {
        let rip = GnfaState::Original(q_rip);
        assert!(
            self.contains(rip),
            "state {} does not exist or has already been eliminated",
            q_rip.show()
        );

        let incoming = self.incoming(rip);
        let outgoing = self.outgoing(rip);
        let r_loop = Regex::star(self.label(rip, rip).cloned().unwrap_or(Regex::Empty));
        debug!(
            "ripping {} with {} incoming and {} outgoing edges",
            q_rip.show(),
            incoming.len(),
            outgoing.len()
        );

        // q_in and q_out may coincide, which yields a new self loop on q_in
        for ((q_in, r_in), (q_out, r_out)) in incoming.iter().cartesian_product(outgoing.iter()) {
            let bypass = Regex::seq([r_in.clone(), r_loop.clone(), r_out.clone()]);
            let label = match self.take_label(*q_in, *q_out) {
                None => bypass,
                Some(Regex::Alternation(mut alternatives)) => {
                    alternatives.push(bypass);
                    Regex::Alternation(alternatives)
                }
                Some(existing) => Regex::alternation([existing, bypass]),
            };
            trace!(
                "new label {} -> {} with {} nodes",
                q_in.show(),
                q_out.show(),
                label.node_count()
            );
            self.set_label(*q_in, *q_out, label.simplify());
        }

        self.remove_state(rip);
    }

    fn remove_state(&mut self, state: GnfaState) {
        let all = self.alive.iter().collect_vec();
        for other in all {
            let other = self.state_of(other);
            self.take_label(state, other);
            self.take_label(other, state);
        }
        let slot = self.slot(state);
        self.alive.remove(slot);
    }

    /// Eliminates all original states, lowest index first.
    pub fn rip_all(&mut self) {
        self.rip_in_order(std::iter::empty());
    }

    /// Eliminates the states yielded by `order` in that order, followed by all remaining
    /// original states, lowest index first. Every order results in an expression that denotes
    /// the same language, only its syntactic shape differs.
    ///
    /// # Panics
    /// Panics if `order` yields a state that does not exist or yields some state twice.
    pub fn rip_in_order<I: IntoIterator<Item = StateIndex>>(&mut self, order: I) {
        for q in order {
            self.rip_state(q);
        }
        loop {
            let Some(q) = self.remaining_states().next() else {
                break;
            };
            self.rip_state(q);
        }
    }

    /// Extracts the label of the edge from source to sink, after all original states have been
    /// eliminated. The returned expression is not simplified.
    ///
    /// Fails with [`EliminationError::Residual`] if anything but the source, the sink and the
    /// edge between them remains, and with [`EliminationError::Disconnected`] if that edge does
    /// not exist.
    pub fn into_regex(mut self) -> Result<Regex<S>, EliminationError> {
        let states = self.remaining_states().count();
        let edges = self.edge_count();
        let label = self.take_label(GnfaState::Source, GnfaState::Sink);
        match (states, edges, label) {
            (0, 1, Some(label)) => Ok(label),
            (0, 0, None) => Err(EliminationError::Disconnected),
            _ => {
                tracing::error!("state elimination did not converge\n{}", self.show());
                Err(EliminationError::Residual { states, edges })
            }
        }
    }

    /// Converts `dfa` into a simplified regular expression denoting the same language, by lifting
    /// it into a GNFA and eliminating all of its original states.
    pub fn dfa_to_regex(dfa: &DFA<S>) -> Result<Regex<S>, EliminationError> {
        let mut gnfa = Self::from_dfa(dfa);
        gnfa.rip_all();
        let raw = gnfa.into_regex()?;
        let simplified = raw.simplify();
        debug!(
            "state elimination produced {} nodes, simplified to {}",
            raw.node_count(),
            simplified.node_count()
        );
        Ok(simplified)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn check(dfa: &DFA, tests: &[(&str, bool)]) {
        let re = Gnfa::dfa_to_regex(dfa).unwrap();
        let pattern = re.to_anchored_pattern().unwrap();
        let compiled = ::regex::Regex::new(&pattern).unwrap();
        for (word, expected) in tests {
            assert_eq!(
                compiled.is_match(word),
                *expected,
                "text: {word:?} regex: {pattern}"
            );
            assert_eq!(re.matches(word.chars()), *expected);
        }
    }

    #[test]
    fn even() {
        let dfa = DFABuilder::default()
            .with_transitions([(0, 'a', 1), (1, 'a', 0)])
            .with_accepting([0])
            .into_dfa(0);
        check(&dfa, &[("", true), ("a", false), ("aa", true), ("aaa", false)]);
    }

    #[test]
    fn three_state() {
        let dfa = DFABuilder::default()
            .with_transitions([(0, 'a', 1), (0, 'b', 0), (1, 'b', 2), (1, 'a', 0)])
            .with_transitions([(2, 'a', 0), (2, 'b', 0)])
            .with_accepting([2])
            .into_dfa(0);
        check(
            &dfa,
            &[
                ("", false),
                ("ab", true),
                ("aba", false),
                ("abaab", true),
                ("abab", false),
            ],
        );
    }

    #[test]
    fn ab() {
        let dfa = DFABuilder::default()
            .with_transitions([(0, 'a', 1), (0, 'b', 3), (1, 'b', 2), (1, 'a', 3)])
            .with_transitions([(2, 'a', 3), (2, 'b', 3), (3, 'a', 3), (3, 'b', 3)])
            .with_accepting([2])
            .into_dfa(0);
        check(
            &dfa,
            &[
                ("", false),
                ("a", false),
                ("ab", true),
                ("aba", false),
                ("abaab", false),
                ("abab", false),
            ],
        );
        assert_eq!(
            Gnfa::dfa_to_regex(&dfa).unwrap(),
            Regex::seq([Regex::Literal('a'), Regex::Literal('b')])
        );
    }

    #[test]
    fn ripping_a_single_state() {
        let dfa = DFABuilder::default()
            .with_transitions([(0, 'a', 0), (0, 'b', 1), (1, 'a', 1), (1, 'b', 1)])
            .with_accepting([1])
            .into_dfa(0);
        let mut gnfa = Gnfa::from_dfa(&dfa);
        gnfa.rip_state(0);
        assert!(!gnfa.contains(GnfaState::Original(0)));
        assert_eq!(gnfa.remaining_states().collect::<Vec<_>>(), vec![1]);
        // source -> 1 now reads a*b
        assert_eq!(
            gnfa.label(GnfaState::Source, GnfaState::Original(1)),
            Some(&Regex::seq([
                Regex::star(Regex::Literal('a')),
                Regex::Literal('b')
            ]))
        );
        assert_eq!(gnfa.edge_count(), 3);
    }

    #[test]
    #[should_panic(expected = "has already been eliminated")]
    fn ripping_twice() {
        let mut gnfa = Gnfa::from_dfa(&divisibility::divisible_by(3));
        gnfa.rip_in_order([1, 1]);
    }

    #[test]
    fn residual_states_are_reported() {
        let gnfa = Gnfa::from_dfa(&divisibility::divisible_by(2));
        assert_eq!(
            gnfa.into_regex(),
            Err(EliminationError::Residual {
                states: 2,
                edges: 6
            })
        );
    }

    #[test]
    fn rejecting_everything_is_reported() {
        let dfa = DFABuilder::default()
            .with_transitions([(0, 'a', 0)])
            .into_dfa(0);
        assert_eq!(
            Gnfa::dfa_to_regex(&dfa),
            Err(EliminationError::Disconnected)
        );
        assert_eq!(
            dfa.to_pattern(),
            Err(Error::Elimination(EliminationError::Disconnected))
        );
    }

    #[test]
    fn order_independence_on_divisibility() {
        let digits = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
        let words = words_up_to(&digits, 3);
        for n in [3, 4, 5] {
            let dfa = divisibility::divisible_by(n).minimize();
            let states = dfa.state_indices().collect::<Vec<_>>();

            let mut forward = Gnfa::from_dfa(&dfa);
            forward.rip_in_order(states.iter().copied());
            let forward = forward.into_regex().unwrap().simplify();

            let mut backward = Gnfa::from_dfa(&dfa);
            backward.rip_in_order(states.iter().rev().copied());
            let backward = backward.into_regex().unwrap().simplify();

            for word in &words {
                let expected = dfa.accepts(word.iter().copied());
                assert_eq!(forward.matches(word.iter().copied()), expected);
                assert_eq!(
                    backward.matches(word.iter().copied()),
                    expected,
                    "orders disagree on {} for modulus {n}",
                    word.show()
                );
            }
        }
    }

    #[cfg(feature = "random")]
    #[test_log::test]
    fn order_independence_on_random_automata() {
        let mut rng = fastrand::Rng::with_seed(7);
        let symbols = ['a', 'b'];
        let words = words_up_to(&symbols, 6);
        let mut compared = 0;
        while compared < 40 {
            let size = rng.usize(1..6);
            let dfa = crate::random::generate_random_dfa(&mut rng, &symbols, size);
            if dfa.accepting_states().count() == 0 {
                continue;
            }
            let mut order: Vec<StateIndex> = dfa.state_indices().collect();
            rng.shuffle(&mut order);

            let mut lowest_first = Gnfa::from_dfa(&dfa);
            lowest_first.rip_all();
            let mut shuffled = Gnfa::from_dfa(&dfa);
            shuffled.rip_in_order(order.iter().copied());

            match (lowest_first.into_regex(), shuffled.into_regex()) {
                (Ok(left), Ok(right)) => {
                    for word in &words {
                        let expected = dfa.accepts(word.iter().copied());
                        assert_eq!(left.matches(word.iter().copied()), expected);
                        assert_eq!(
                            right.matches(word.iter().copied()),
                            expected,
                            "order {order:?} changed the language on {}",
                            word.show()
                        );
                    }
                }
                // an accepting state may be unreachable
                (Err(left), Err(right)) => assert_eq!(left, right),
                (left, right) => panic!("orders disagree: {left:?} vs {right:?}"),
            }
            compared += 1;
        }
    }
}
