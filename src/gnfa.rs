use bit_set::BitSet;
use itertools::Itertools;

use crate::prelude::*;

mod elimination;
pub use elimination::EliminationError;

/// Identifies a state of a [`Gnfa`]. Apart from the states of the automaton it was built from,
/// a GNFA has two sentinel states: a source without incoming edges and a sink without outgoing
/// edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GnfaState {
    /// A state of the original automaton.
    Original(StateIndex),
    /// The unique initial state.
    Source,
    /// The unique final state.
    Sink,
}

impl Show for GnfaState {
    fn show(&self) -> String {
        match self {
            GnfaState::Original(q) => q.show(),
            GnfaState::Source => "source".to_string(),
            GnfaState::Sink => "sink".to_string(),
        }
    }
}

/// A generalized nondeterministic finite automaton, whose edges are labeled with regular
/// expressions. Between any ordered pair of states there is at most one edge, a missing edge
/// stands for the empty language.
///
/// Internally, states are slots in a dense arena: the original states occupy `0..n`, the source
/// is slot `n` and the sink is slot `n + 1`. Labels are stored in a matrix indexed by pairs of
/// slots. The set of states only ever shrinks, see [`Gnfa::rip_state`].
#[derive(Clone, Debug)]
pub struct Gnfa<S> {
    originals: usize,
    labels: Vec<Option<Regex<S>>>,
    alive: BitSet,
}

impl<S: Symbol> Gnfa<S> {
    /// Lifts `dfa` into a GNFA. Parallel transitions between two states are collapsed into one
    /// edge labeled with the alternation of their symbols. The source has an edge to the initial
    /// state, and every accepting state has an edge to the sink, both labeled with [`Regex::eps`].
    pub fn from_dfa(dfa: &DFA<S>) -> Self {
        let originals = dfa.size();
        let width = originals + 2;
        let mut gnfa = Self {
            originals,
            labels: vec![None; width * width],
            alive: (0..width).collect(),
        };

        for q in dfa.state_indices() {
            for (target, symbols) in dfa.out_edges(q) {
                gnfa.set_label(
                    GnfaState::Original(q),
                    GnfaState::Original(target),
                    Regex::alternation(symbols.into_iter().map(Regex::Literal)),
                );
            }
        }
        gnfa.set_label(
            GnfaState::Source,
            GnfaState::Original(dfa.initial()),
            Regex::eps(),
        );
        for q in dfa.accepting_states() {
            gnfa.set_label(GnfaState::Original(q), GnfaState::Sink, Regex::eps());
        }

        tracing::debug!(
            "built GNFA with {} states and {} edges from DFA",
            gnfa.alive.len(),
            gnfa.edge_count()
        );
        gnfa
    }

    fn width(&self) -> usize {
        self.originals + 2
    }

    fn slot(&self, state: GnfaState) -> usize {
        match state {
            GnfaState::Original(q) => {
                assert!(
                    (q as usize) < self.originals,
                    "state {} does not exist in GNFA",
                    q.show()
                );
                q as usize
            }
            GnfaState::Source => self.originals,
            GnfaState::Sink => self.originals + 1,
        }
    }

    fn state_of(&self, slot: usize) -> GnfaState {
        match slot.checked_sub(self.originals) {
            None => GnfaState::Original(slot as StateIndex),
            Some(0) => GnfaState::Source,
            Some(_) => GnfaState::Sink,
        }
    }

    fn position(&self, from: GnfaState, to: GnfaState) -> usize {
        self.slot(from) * self.width() + self.slot(to)
    }

    pub(crate) fn set_label(&mut self, from: GnfaState, to: GnfaState, label: Regex<S>) {
        let position = self.position(from, to);
        self.labels[position] = Some(label);
    }

    pub(crate) fn take_label(&mut self, from: GnfaState, to: GnfaState) -> Option<Regex<S>> {
        let position = self.position(from, to);
        self.labels[position].take()
    }

    /// Returns `true` if `state` has not been eliminated yet.
    pub fn contains(&self, state: GnfaState) -> bool {
        match state {
            GnfaState::Original(q) if q as usize >= self.originals => false,
            _ => self.alive.contains(self.slot(state)),
        }
    }

    /// Returns the label of the edge from `from` to `to`, or `None` if there is no such edge,
    /// which denotes the empty language.
    pub fn label(&self, from: GnfaState, to: GnfaState) -> Option<&Regex<S>> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        self.labels[self.position(from, to)].as_ref()
    }

    /// Iterates over the original states that have not been eliminated yet, in ascending order.
    pub fn remaining_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.alive
            .iter()
            .take_while(|slot| *slot < self.originals)
            .map(|slot| slot as StateIndex)
    }

    /// Iterates over all edges as `(from, to, label)` triples.
    pub fn edges(&self) -> impl Iterator<Item = (GnfaState, GnfaState, &Regex<S>)> + '_ {
        self.alive
            .iter()
            .cartesian_product(self.alive.iter().collect_vec())
            .filter_map(|(from, to)| {
                self.labels[from * self.width() + to]
                    .as_ref()
                    .map(|label| (self.state_of(from), self.state_of(to), label))
            })
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Collects the edges that lead into `state` from other states, the self loop is not
    /// included.
    pub fn incoming(&self, state: GnfaState) -> Vec<(GnfaState, Regex<S>)> {
        let to = self.slot(state);
        self.alive
            .iter()
            .filter(|from| *from != to)
            .filter_map(|from| {
                self.labels[from * self.width() + to]
                    .as_ref()
                    .map(|label| (self.state_of(from), label.clone()))
            })
            .collect()
    }

    /// Collects the edges that leave `state` towards other states, the self loop is not
    /// included.
    pub fn outgoing(&self, state: GnfaState) -> Vec<(GnfaState, Regex<S>)> {
        let from = self.slot(state);
        self.alive
            .iter()
            .filter(|to| *to != from)
            .filter_map(|to| {
                self.labels[from * self.width() + to]
                    .as_ref()
                    .map(|label| (self.state_of(to), label.clone()))
            })
            .collect()
    }
}

impl<S: Symbol> Show for Gnfa<S> {
    fn show(&self) -> String {
        self.edges()
            .map(|(from, to, label)| format!("{} -> {}: {}", from.show(), to.show(), label.show()))
            .join("\n")
    }
}
