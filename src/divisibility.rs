//! Automata recognizing numerals whose value is divisible by a fixed modulus.
//!
//! The state of such an automaton is the value of the digits read so far, modulo `n`. Reading a
//! digit `d` in state `s` leads to `(base * s + d) mod n` and a numeral is accepted if it ends in
//! state `0`. Nothing else in this crate depends on what these automata represent.

use crate::prelude::*;

const DECIMAL: u32 = 10;

/// Builds a DFA over the digits `'0'..='9'` that accepts exactly the decimal numerals (leading
/// zeros allowed, the empty word counts as zero) whose value is divisible by `n`. Running a numeral
/// yields its value modulo `n`.
///
/// # Panics
/// Panics if `n` is zero.
pub fn divisible_by(n: u32) -> DFA {
    divisible_by_in_base(n, DECIMAL)
}

/// Like [`divisible_by`], but for numerals written in the given `base`, whose digits are
/// `0-9` followed by `a-z`.
///
/// # Panics
/// Panics if `n` is zero or `base` is not in `2..=36`.
pub fn divisible_by_in_base(n: u32, base: u32) -> DFA {
    assert!(n > 0, "modulus must be positive");
    assert!(
        (2..=36).contains(&base),
        "base must be between 2 and 36, got {base}"
    );

    let rows = (0..n).map(|s| {
        (0..base).filter_map(move |d| {
            let digit = char::from_digit(d, base)?;
            let target = ((u64::from(s) * u64::from(base) + u64::from(d)) % u64::from(n)) as u32;
            Some((digit, target))
        })
    });
    DFA::from_parts(rows, [0], 0)
}

/// Computes an anchored pattern that matches exactly the decimal numerals divisible by `n`.
///
/// # Panics
/// Panics if `n` is zero.
pub fn divisibility_pattern(n: u32) -> Result<String, Error> {
    let dfa = divisible_by(n);
    tracing::info!(
        "computing pattern for divisibility by {n} from DFA with {} states",
        dfa.size()
    );
    dfa.to_pattern()
}
