//! Library for turning deterministic finite automata into equivalent regular expressions.
//!
//! The conversion runs in three stages. First, the [`DFA`] is minimized by Myhill–Nerode partition refinement (see [`DFA::minimize`] and [`math::Partition`]), which keeps the intermediate expressions small. Then the minimal automaton is lifted into a generalized automaton [`Gnfa`], whose edges are labeled with [`Regex`]es instead of single symbols and which has two extra states, a source and a sink. States other than these two sentinels are ripped out one after another, where each elimination folds all paths through the removed state into the labels of the remaining edges. Once only the source and the sink remain, the label of the single edge between them is the result. Finally, the expression is canonicalized by a confluent rewriting system (see [`Regex::simplify`]) and can be rendered into a pattern that standard regex engines understand.
//!
//! The order in which states are eliminated influences the syntactic shape of the produced expression, but never the language it denotes.
//!
//! The alphabet is opaque: any type implementing [`Symbol`] can label transitions. Rendering a pattern additionally requires that symbols convert into a `char`.
//!
//! ```
//! use dfa_regex::prelude::*;
//!
//! let dfa = DFABuilder::default()
//!     .with_transitions([(0, 'a', 1), (0, 'b', 0), (1, 'a', 0), (1, 'b', 1)])
//!     .with_accepting([0])
//!     .into_dfa(0);
//! let pattern = dfa.to_pattern().unwrap();
//! assert!(pattern.starts_with('^') && pattern.ends_with('$'));
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use dfa_regex::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::Symbol,
        automaton::{DFABuilder, StateIndex, DFA},
        divisibility,
        gnfa::{EliminationError, Gnfa, GnfaState},
        math,
        math::Partition,
        regex::{Regex, RenderError},
        word::{words_up_to, KleeneStar},
        Error, Show,
    };
}

/// This module contains some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;

/// Module that contains the definition of symbols.
pub mod alphabet;
pub use alphabet::Symbol;

/// Enumeration of finite words over a set of symbols.
pub mod word;

/// Defines deterministic finite automata.
#[allow(clippy::upper_case_acronyms)]
pub mod automaton;
pub use automaton::{DFABuilder, DFA};

/// Contains the partition refinement algorithm that computes minimal DFAs.
pub mod minimization;

/// Regular expressions over an opaque alphabet, their simplification and rendering.
pub mod regex;
pub use regex::Regex;

/// Generalized automata with regex labeled edges and the state elimination procedure.
pub mod gnfa;
pub use gnfa::Gnfa;

/// Builds automata that recognize numerals divisible by some modulus.
pub mod divisibility;

/// Implements the generation of random automata and words.
#[cfg(feature = "random")]
pub mod random;

use itertools::Itertools;
use thiserror::Error;

/// Collects everything that can go wrong when turning an automaton into a pattern.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The produced expression could not be rendered.
    #[error(transparent)]
    Render(#[from] regex::RenderError),
    /// State elimination did not end in a single source to sink edge.
    #[error(transparent)]
    Elimination(#[from] gnfa::EliminationError),
}

/// Helper trait which can be used to display states, symbols, expressions and such.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state index that should be
    /// for example q0, q1, q2, ... and for a symbol just the symbol itself.
    /// This is mainly used for debugging purposes.
    fn show(&self) -> String;
    /// Show a collection of the thing, for a collection of states this should be {q0, q1, q2, ...}.
    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        format!("{{{}}}", iter.into_iter().map(|x| x.show()).join(", "))
    }
}

impl Show for u32 {
    fn show(&self) -> String {
        format!("q{self}")
    }
}

impl Show for char {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for u8 {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        format!("\"{}\"", self.iter().map(|x| x.show()).join(""))
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}

impl<S: Show> Show for std::collections::BTreeSet<S> {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}

impl<S: Show, T: Show> Show for (S, T) {
    fn show(&self) -> String {
        format!("({}, {})", self.0.show(), self.1.show())
    }
}

impl<S: Show> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}
