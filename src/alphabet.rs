use std::{fmt::Debug, hash::Hash};

use crate::Show;

/// A symbol labels the transitions of an automaton and the literals of a regular expression.
/// Apart from being comparable and hashable, nothing is assumed about it: the alphabet is opaque.
pub trait Symbol: PartialEq + Eq + Debug + Copy + Ord + PartialOrd + Hash + Show {}
impl<S: PartialEq + Eq + Debug + Copy + Ord + PartialOrd + Hash + Show> Symbol for S {}
