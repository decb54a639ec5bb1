use std::fmt;
use serde::{Serialize, Serializer};

use crate::symbol::{Symbol, EPSILON};

/// The right-hand side of one production alternative.
///
/// Textually a right-hand side is either the marker `eps` or a run of
/// characters, each character naming one symbol: `aA` is `[a, A]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Rhs {
    /// The empty production `A -> eps`.
    Epsilon,
    /// A sequence of symbols, terminals and non-terminals alike.
    Symbols(Vec<Symbol>),
}

impl Rhs {
    /// Decomposes the textual form into symbols, one per character.
    pub fn parse(text: &str) -> Self {
        if text == EPSILON {
            Rhs::Epsilon
        } else {
            Rhs::Symbols(text.chars().map(Symbol::from).collect())
        }
    }

    /// `A -> a`
    pub fn terminal(a: Symbol) -> Self {
        Rhs::Symbols(vec![a])
    }

    /// `A -> a B`
    pub fn pair(a: Symbol, b: Symbol) -> Self {
        Rhs::Symbols(vec![a, b])
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Rhs::Epsilon)
    }

    /// Number of symbols; the epsilon marker counts as zero.
    pub fn len(&self) -> usize {
        self.symbols().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn symbols(&self) -> &[Symbol] {
        match self {
            Rhs::Epsilon => &[],
            Rhs::Symbols(symbols) => symbols,
        }
    }

    /// True if this right-hand side is the single symbol `symbol`.
    pub fn is_exactly(&self, symbol: &Symbol) -> bool {
        matches!(self.symbols(), [only] if only == symbol)
    }
}

impl fmt::Display for Rhs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rhs::Epsilon => f.write_str(EPSILON),
            Rhs::Symbols(symbols) => symbols.iter().try_for_each(|s| write!(f, "{}", s)),
        }
    }
}

impl From<&str> for Rhs {
    fn from(text: &str) -> Self {
        Rhs::parse(text)
    }
}

impl Serialize for Rhs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
