mod dfa;
pub use dfa::DFA;

mod builder;
pub use builder::DFABuilder;

/// States of a [`DFA`] are dense indices `0..n`.
pub type StateIndex = u32;
