use std::collections::BTreeSet;

use tracing::trace;

use crate::prelude::*;

impl<S: Symbol> Regex<S> {
    /// Canonicalizes `self` by rewriting it bottom-up until no rule applies anymore. The
    /// rules are
    /// - `Star(Star(r))` becomes `Star(r)`,
    /// - literal groups of zero or one symbol become `Empty` or a `Literal` respectively,
    /// - alternations lose their empty branches and nested alternations are flattened; without
    ///   branches the alternation becomes `Empty`, with a single branch it becomes that branch,
    ///   and if all branches are literals or literal groups they are merged into one group,
    /// - sequences containing an empty operand become `Empty`, operands denoting the empty word
    ///   are dropped and nested sequences are flattened; without operands the sequence becomes
    ///   [`Regex::eps`] and with a single operand it becomes that operand.
    ///
    /// Every rule preserves the denoted language. The result is a fixed point, so simplifying it
    /// again returns an identical tree.
    pub fn simplify(&self) -> Regex<S> {
        let mut current = self.simplify_pass();
        let mut passes = 1;
        loop {
            let next = current.simplify_pass();
            if next == current {
                trace!(
                    "simplified expression with {} nodes to {} nodes in {passes} passes",
                    self.node_count(),
                    current.node_count()
                );
                return current;
            }
            current = next;
            passes += 1;
        }
    }

    fn simplify_pass(&self) -> Regex<S> {
        match self {
            Regex::Literal(_) | Regex::Empty => self.clone(),
            Regex::LiteralGroup(symbols) => match symbols.len() {
                0 => Regex::Empty,
                1 => Regex::Literal(
                    *symbols
                        .first()
                        .expect("group has exactly one symbol"),
                ),
                _ => self.clone(),
            },
            Regex::Star(inner) => match inner.simplify_pass() {
                Regex::Star(nested) => Regex::Star(nested),
                inner => Regex::star(inner),
            },
            Regex::Alternation(rs) => {
                let mut branches = Vec::with_capacity(rs.len());
                for r in rs {
                    match r.simplify_pass() {
                        r if r.is_empty() => {}
                        Regex::Alternation(nested) => branches.extend(nested),
                        r => branches.push(r),
                    }
                }
                match branches.len() {
                    0 => Regex::Empty,
                    1 => branches.pop().expect("exactly one branch is left"),
                    _ => merge_literals(&branches).unwrap_or(Regex::Alternation(branches)),
                }
            }
            Regex::Seq(rs) => {
                let mut operands = Vec::with_capacity(rs.len());
                for r in rs {
                    match r.simplify_pass() {
                        r if r.is_empty() => return Regex::Empty,
                        r if r.is_eps() => {}
                        Regex::Seq(nested) => operands.extend(nested),
                        r => operands.push(r),
                    }
                }
                match operands.len() {
                    0 => Regex::eps(),
                    1 => operands.pop().expect("exactly one operand is left"),
                    _ => Regex::Seq(operands),
                }
            }
        }
    }
}

/// Merges alternatives into a single [`Regex::LiteralGroup`], provided every one of them is a
/// literal or a literal group.
fn merge_literals<S: Symbol>(branches: &[Regex<S>]) -> Option<Regex<S>> {
    branches
        .iter()
        .try_fold(BTreeSet::new(), |mut symbols, r| match r {
            Regex::Literal(s) => {
                symbols.insert(*s);
                Some(symbols)
            }
            Regex::LiteralGroup(group) => {
                symbols.extend(group.iter().copied());
                Some(symbols)
            }
            _ => None,
        })
        .map(Regex::LiteralGroup)
}
