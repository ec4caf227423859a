use std::collections::BTreeSet;

use itertools::Itertools;

use crate::prelude::*;

mod render;
pub use render::RenderError;

mod simplify;

/// A regular expression over symbols of type `S`. The variant set is closed, every function that
/// inspects an expression matches on it exhaustively.
///
/// There is no dedicated variant for the language that only contains the empty word, it is
/// represented by `Star(Empty)` (see [`Regex::eps`]). Expressions are values: operations like
/// [`Regex::simplify`] build new trees.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Regex<S> {
    /// Matches exactly the given symbol.
    Literal(S),
    /// Matches exactly one of the given symbols.
    LiteralGroup(BTreeSet<S>),
    /// The empty language, which matches nothing.
    Empty,
    /// Kleene star, zero or more repetitions.
    Star(Box<Regex<S>>),
    /// Disjunction of the given expressions.
    Alternation(Vec<Regex<S>>),
    /// Concatenation of the given expressions.
    Seq(Vec<Regex<S>>),
}

impl<S: Symbol> Regex<S> {
    /// The language that consists only of the empty word, represented as `Star(Empty)`.
    pub fn eps() -> Self {
        Self::star(Self::Empty)
    }

    /// Wraps `inner` in a Kleene star.
    pub fn star(inner: Self) -> Self {
        Self::Star(Box::new(inner))
    }

    /// Builds the disjunction of the given expressions.
    pub fn alternation<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        Self::Alternation(iter.into_iter().collect())
    }

    /// Builds the concatenation of the given expressions.
    pub fn seq<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        Self::Seq(iter.into_iter().collect())
    }

    /// Builds an expression that matches exactly one of the given symbols.
    pub fn group<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::LiteralGroup(iter.into_iter().collect())
    }

    /// Returns `true` if `self` structurally denotes the empty language.
    pub fn is_empty(&self) -> bool {
        match self {
            Regex::Literal(_) => false,
            Regex::LiteralGroup(symbols) => symbols.is_empty(),
            Regex::Empty => true,
            Regex::Star(_) => false,
            Regex::Alternation(rs) => rs.iter().all(Regex::is_empty),
            Regex::Seq(rs) => rs.iter().any(Regex::is_empty),
        }
    }

    /// Returns `true` if `self` structurally denotes the language that only contains the empty word.
    pub fn is_eps(&self) -> bool {
        match self {
            Regex::Literal(_) | Regex::LiteralGroup(_) | Regex::Empty => false,
            Regex::Star(inner) => inner.is_empty(),
            Regex::Alternation(rs) => rs.iter().all(Regex::is_eps),
            Regex::Seq(rs) => rs.iter().all(Regex::is_eps),
        }
    }

    /// Returns `true` if the empty word is matched by `self`.
    pub fn nullable(&self) -> bool {
        match self {
            Regex::Literal(_) | Regex::LiteralGroup(_) | Regex::Empty => false,
            Regex::Star(_) => true,
            Regex::Alternation(rs) => rs.iter().any(Regex::nullable),
            Regex::Seq(rs) => rs.iter().all(Regex::nullable),
        }
    }

    /// Computes the Brzozowski derivative of `self` with respect to `symbol`, an expression
    /// that matches a word `w` iff `self` matches `symbol` followed by `w`. Branches that
    /// are trivially empty are left out, otherwise no simplification happens.
    pub fn derivative(&self, symbol: S) -> Self {
        match self {
            Regex::Literal(s) if *s == symbol => Regex::eps(),
            Regex::LiteralGroup(symbols) if symbols.contains(&symbol) => Regex::eps(),
            Regex::Literal(_) | Regex::LiteralGroup(_) | Regex::Empty => Regex::Empty,
            Regex::Star(inner) => match inner.derivative(symbol) {
                d if d.is_empty() => Regex::Empty,
                d => Regex::Seq(vec![d, self.clone()]),
            },
            Regex::Alternation(rs) => Regex::Alternation(
                rs.iter()
                    .map(|r| r.derivative(symbol))
                    .filter(|d| !d.is_empty())
                    .collect(),
            ),
            Regex::Seq(rs) => {
                // d(r1 r2 .. rk) = d(r1) r2 .. rk | d(r2) r3 .. rk | ... as long as the
                // skipped prefix is nullable
                let mut branches = vec![];
                for (i, r) in rs.iter().enumerate() {
                    let d = r.derivative(symbol);
                    if !d.is_empty() {
                        branches.push(Regex::Seq(
                            std::iter::once(d)
                                .chain(rs[i + 1..].iter().cloned())
                                .collect(),
                        ));
                    }
                    if !r.nullable() {
                        break;
                    }
                }
                Regex::Alternation(branches)
            }
        }
    }

    /// Decides whether `self` matches the given word, by repeatedly taking derivatives.
    pub fn matches<W: IntoIterator<Item = S>>(&self, word: W) -> bool {
        let mut current = self.clone();
        for symbol in word {
            if current.is_empty() {
                return false;
            }
            current = current.derivative(symbol);
        }
        current.nullable()
    }

    /// Returns the number of nodes in the syntax tree.
    pub fn node_count(&self) -> usize {
        1 + match self {
            Regex::Literal(_) | Regex::LiteralGroup(_) | Regex::Empty => 0,
            Regex::Star(inner) => inner.node_count(),
            Regex::Alternation(rs) | Regex::Seq(rs) => rs.iter().map(Regex::node_count).sum(),
        }
    }
}

impl<S: Symbol> Show for Regex<S> {
    fn show(&self) -> String {
        match self {
            Regex::Star(inner) if inner.is_empty() => "ε".to_string(),
            Regex::Literal(s) => s.show(),
            Regex::LiteralGroup(symbols) => {
                format!("[{}]", symbols.iter().map(|s| s.show()).join(""))
            }
            Regex::Empty => "∅".to_string(),
            Regex::Star(inner) => format!("({})*", inner.show()),
            Regex::Alternation(rs) => format!("({})", rs.iter().map(|r| r.show()).join("|")),
            Regex::Seq(rs) => format!("({})", rs.iter().map(|r| r.show()).join("")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn lit(c: char) -> Regex<char> {
        Regex::Literal(c)
    }

    #[test]
    fn predicates() {
        assert!(Regex::<char>::Empty.is_empty());
        assert!(!Regex::<char>::eps().is_empty());
        assert!(Regex::<char>::eps().is_eps());
        assert!(Regex::<char>::group([]).is_empty());
        assert!(!Regex::group(['a']).is_empty());
        assert!(!lit('a').is_eps());
        assert!(!Regex::<char>::Empty.is_eps());

        assert!(Regex::<char>::alternation([]).is_empty());
        assert!(Regex::<char>::alternation([Regex::Empty, Regex::group([])]).is_empty());
        assert!(!Regex::alternation([Regex::Empty, lit('a')]).is_empty());
        assert!(Regex::seq([lit('a'), Regex::Empty]).is_empty());
        assert!(!Regex::star(Regex::seq([lit('a'), Regex::Empty])).is_empty());

        assert!(Regex::<char>::seq([]).is_eps());
        assert!(Regex::<char>::seq([Regex::eps(), Regex::star(Regex::alternation([]))]).is_eps());
        assert!(!Regex::seq([Regex::eps(), lit('a')]).is_eps());
        assert!(Regex::<char>::alternation([Regex::eps(), Regex::eps()]).is_eps());
        assert!(!Regex::alternation([Regex::eps(), lit('b')]).is_eps());
        // a star of a star of nothing denotes eps, but is not structurally recognized
        assert!(!Regex::star(Regex::<char>::eps()).is_eps());
    }

    #[test]
    fn matching() {
        // (ab|c)*d
        let r = Regex::seq([
            Regex::star(Regex::alternation([Regex::seq([lit('a'), lit('b')]), lit('c')])),
            lit('d'),
        ]);
        for (word, expected) in [
            ("d", true),
            ("abd", true),
            ("cabcd", true),
            ("", false),
            ("ab", false),
            ("abad", false),
            ("dd", false),
        ] {
            assert_eq!(r.matches(word.chars()), expected, "word {word:?}");
        }

        assert!(Regex::<char>::eps().matches([]));
        assert!(!Regex::<char>::eps().matches(['a']));
        assert!(!Regex::<char>::Empty.matches([]));
        assert!(Regex::group(['x', 'y']).matches(['y']));
        assert!(!Regex::group(['x', 'y']).matches(['x', 'y']));
    }

    #[test]
    fn showing() {
        let r = Regex::seq([
            Regex::star(Regex::group(['a', 'b'])),
            Regex::alternation([lit('c'), Regex::eps(), Regex::Empty]),
        ]);
        assert_eq!(r.show(), "(([ab])*(c|ε|∅))");
        assert_eq!(r.node_count(), 8);
    }
}
