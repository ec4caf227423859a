use crate::prelude::*;
use tracing::trace;

/// Generate a random DFA of size `size` by randomly drawing transitions over the given `symbols`.
/// The algorithm is as follows:
/// 1. Start with `size` states and no transitions.
/// 2. For each state, for each symbol draw a target state and add the corresponding edge.
/// 3. Flip a coin for each state to decide whether it is accepting.
///
/// State 0 is initial. Depending on the drawn transitions, there may be unreachable states.
///
/// # Panics
/// Panics if `size` is zero.
pub fn generate_random_dfa<S: Symbol>(
    rng: &mut fastrand::Rng,
    symbols: &[S],
    size: usize,
) -> DFA<S> {
    assert!(size > 0, "a DFA needs at least one state");
    let rows = (0..size)
        .map(|_| {
            symbols
                .iter()
                .map(|sym| (*sym, rng.u32(..size as StateIndex)))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let accepting = (0..size as StateIndex)
        .filter(|_| rng.bool())
        .collect::<Vec<_>>();
    let dfa = DFA::from_parts(rows, accepting, 0);
    trace!("generated random {}", dfa.show());
    dfa
}

/// Generate a random regular expression over `symbols` whose syntax tree has at most `depth`
/// levels below the root. All variants may be drawn, including the empty language, empty
/// literal groups and alternations or sequences without operands.
pub fn generate_random_regex<S: Symbol>(
    rng: &mut fastrand::Rng,
    symbols: &[S],
    depth: usize,
) -> Regex<S> {
    let leaf = depth == 0 || rng.u8(..3) == 0;
    if leaf {
        return match rng.u8(..5) {
            0 => Regex::Empty,
            1 => Regex::eps(),
            2 => Regex::group(symbols.iter().copied().filter(|_| rng.bool())),
            _ => match rng.choice(symbols) {
                Some(sym) => Regex::Literal(*sym),
                None => Regex::eps(),
            },
        };
    }

    match rng.u8(..3) {
        0 => Regex::star(generate_random_regex(rng, symbols, depth - 1)),
        1 => {
            let operands = rng.usize(..=3);
            Regex::alternation(
                (0..operands)
                    .map(|_| generate_random_regex(rng, symbols, depth - 1))
                    .collect::<Vec<_>>(),
            )
        }
        _ => {
            let operands = rng.usize(..=3);
            Regex::seq(
                (0..operands)
                    .map(|_| generate_random_regex(rng, symbols, depth - 1))
                    .collect::<Vec<_>>(),
            )
        }
    }
}

/// Draws a random word over `symbols` whose length is at most `max_len`.
pub fn generate_random_word<S: Symbol>(
    rng: &mut fastrand::Rng,
    symbols: &[S],
    max_len: usize,
) -> Vec<S> {
    let len = rng.usize(..=max_len);
    (0..len).filter_map(|_| rng.choice(symbols).copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_dfas_are_complete() {
        let mut rng = fastrand::Rng::with_seed(1);
        let symbols = ['a', 'b', 'c'];
        for size in 1..10 {
            let dfa = generate_random_dfa(&mut rng, &symbols, size);
            assert_eq!(dfa.size(), size);
            assert_eq!(dfa.initial(), 0);
            for q in dfa.state_indices() {
                assert_eq!(dfa.row(q).len(), symbols.len());
            }
            let word = generate_random_word(&mut rng, &symbols, 20);
            assert!(word.len() <= 20);
            // complete, so running never panics
            let _ = dfa.run(word);
        }
    }

    #[test]
    fn random_regexes_respect_depth() {
        fn depth<S>(r: &Regex<S>) -> usize {
            match r {
                Regex::Literal(_) | Regex::LiteralGroup(_) | Regex::Empty => 0,
                Regex::Star(inner) => 1 + depth(inner),
                Regex::Alternation(rs) | Regex::Seq(rs) => {
                    1 + rs.iter().map(|r| depth(r)).max().unwrap_or(0)
                }
            }
        }

        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..200 {
            let r = generate_random_regex(&mut rng, &['x', 'y'], 3);
            // eps leaves add one level
            assert!(depth(&r) <= 4, "{} is too deep", r.show());
        }
    }

    #[test]
    fn generation_is_reproducible() {
        let symbols = [0u8, 1];
        let left = generate_random_dfa(&mut fastrand::Rng::with_seed(9), &symbols, 5);
        let right = generate_random_dfa(&mut fastrand::Rng::with_seed(9), &symbols, 5);
        assert_eq!(left, right);
    }
}
