use indexmap::{IndexMap, IndexSet};

use crate::error::Result;
use crate::grammar::engine::Grammar;
use crate::grammar::rule::Rhs;
use crate::symbol::Symbol;

/// Accumulates the parts of a grammar and validates them on `build`.
///
/// Alternatives given for the same left-hand side more than once are unioned.
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    non_terminals: IndexSet<Symbol>,
    terminals: IndexSet<Symbol>,
    productions: IndexMap<Symbol, IndexSet<Rhs>>,
    starting_symbol: Symbol,
}

impl GrammarBuilder {
    pub fn new(starting_symbol: impl Into<Symbol>) -> Self {
        GrammarBuilder {
            non_terminals: IndexSet::new(),
            terminals: IndexSet::new(),
            productions: IndexMap::new(),
            starting_symbol: starting_symbol.into(),
        }
    }

    pub fn non_terminals<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.non_terminals.extend(symbols.into_iter().map(Into::into));
        self
    }

    pub fn terminals<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.terminals.extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Adds `lhs -> alt1 | alt2 | ...`.
    pub fn production<I, R>(mut self, lhs: impl Into<Symbol>, alternatives: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Rhs>,
    {
        let lhs = lhs.into();
        for rhs in alternatives {
            self.add_production(lhs.clone(), rhs.into());
        }
        self
    }

    pub fn add_production(&mut self, lhs: Symbol, rhs: Rhs) {
        self.productions.entry(lhs).or_default().insert(rhs);
    }

    pub fn build(self) -> Result<Grammar> {
        Grammar::new(self.non_terminals, self.terminals, self.productions, self.starting_symbol)
    }
}
