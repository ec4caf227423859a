use thiserror::Error;

use crate::prelude::*;

/// Errors that can occur when rendering a [`Regex`] into a pattern string.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// Regex engines have no syntax for the empty language.
    #[error("the empty language cannot be represented as a regex pattern")]
    EmptyLanguage,
}

impl<S: Symbol + Into<char>> Regex<S> {
    /// Renders `self` into a pattern that standard regex engines understand. Every star,
    /// alternation and sequence wraps its operands in a non-capturing group `(?:...)`, so the
    /// precedence is correct regardless of the nesting depth. The empty word is rendered as
    /// `(?:)` and ASCII punctuation is escaped.
    ///
    /// Fails if `self` contains the empty language anywhere outside of [`Regex::eps`], which
    /// never happens for a simplified expression denoting a non-empty language.
    pub fn to_pattern(&self) -> Result<String, RenderError> {
        let mut out = String::new();
        self.write_pattern(&mut out)?;
        Ok(out)
    }

    /// Like [`Regex::to_pattern`], but anchors the pattern at the start and the end, so that it
    /// only matches whole inputs.
    pub fn to_anchored_pattern(&self) -> Result<String, RenderError> {
        Ok(format!("^{}$", self.to_pattern()?))
    }

    fn write_pattern(&self, out: &mut String) -> Result<(), RenderError> {
        match self {
            Regex::Literal(s) => push_escaped(out, (*s).into()),
            Regex::LiteralGroup(symbols) => {
                if symbols.is_empty() {
                    return Err(RenderError::EmptyLanguage);
                }
                out.push('[');
                for s in symbols {
                    push_escaped(out, (*s).into());
                }
                out.push(']');
            }
            Regex::Empty => return Err(RenderError::EmptyLanguage),
            Regex::Star(inner) if inner.is_empty() => out.push_str("(?:)"),
            Regex::Star(inner) => {
                out.push_str("(?:");
                inner.write_pattern(out)?;
                out.push_str(")*");
            }
            Regex::Alternation(rs) => {
                if rs.is_empty() {
                    return Err(RenderError::EmptyLanguage);
                }
                out.push_str("(?:");
                for (i, r) in rs.iter().enumerate() {
                    if i > 0 {
                        out.push('|');
                    }
                    r.write_pattern(out)?;
                }
                out.push(')');
            }
            Regex::Seq(rs) => {
                out.push_str("(?:");
                for r in rs {
                    r.write_pattern(out)?;
                }
                out.push(')');
            }
        }
        Ok(())
    }
}

/// Appends `symbol` to `out` such that a regex engine reads it as that literal character, both
/// inside and outside of a bracketed class. Only metacharacters are escaped, `\<` is a word
/// boundary for some engines.
fn push_escaped(out: &mut String, symbol: char) {
    if regex_syntax::is_meta_character(symbol) {
        out.push('\\');
    }
    out.push(symbol);
}
