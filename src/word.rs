use crate::Symbol;

/// Iterates over all finite words over `symbols` in length-lexicographic order, starting with
/// the empty word. The iterator never ends, combine it with `take_while` to bound the length.
///
/// The order of the given symbols determines the order among words of equal length.
pub struct KleeneStar<S> {
    symbols: Vec<S>,
    current: Vec<usize>,
}

impl<S: Symbol> Iterator for KleeneStar<S> {
    type Item = Vec<S>;
    fn next(&mut self) -> Option<Self::Item> {
        let out = self.current.iter().map(|i| self.symbols[*i]).collect();

        if self.symbols.is_empty() {
            // only the empty word exists, it is emitted forever
            return Some(out);
        }

        let mut carry = true;
        let mut i = self.current.len();
        while carry && i > 0 {
            i -= 1;
            self.current[i] += 1;
            if self.current[i] >= self.symbols.len() {
                self.current[i] = 0;
                carry = true;
            } else {
                carry = false;
            }
        }

        if carry {
            self.current = vec![0; self.current.len() + 1];
        }

        Some(out)
    }
}

impl<S> KleeneStar<S> {
    /// Starts the enumeration with the empty word.
    pub fn new(symbols: Vec<S>) -> Self {
        Self {
            symbols,
            current: vec![],
        }
    }
}

/// Collects all words over `symbols` whose length is at most `max_len`.
pub fn words_up_to<S: Symbol>(symbols: &[S], max_len: usize) -> Vec<Vec<S>> {
    if symbols.is_empty() {
        return vec![vec![]];
    }
    KleeneStar::new(symbols.to_vec())
        .take_while(|w| w.len() <= max_len)
        .collect()
}
