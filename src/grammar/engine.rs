use indexmap::{IndexMap, IndexSet};

use crate::error::{Error, Result};
use crate::grammar::classifier::RightLinearClassifier;
use crate::grammar::rule::Rhs;
use crate::symbol::Symbol;

/// A grammar given by its non-terminals, terminals, productions and start symbol.
///
/// Productions keep the order in which they were declared; the sequential
/// epsilon check and every rendering depend on that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    non_terminals: IndexSet<Symbol>,
    terminals: IndexSet<Symbol>,
    productions: IndexMap<Symbol, IndexSet<Rhs>>,
    starting_symbol: Symbol,
}

impl Grammar {
    /// Creates a grammar, rejecting it if its parts are inconsistent.
    pub fn new(
        non_terminals: IndexSet<Symbol>,
        terminals: IndexSet<Symbol>,
        productions: IndexMap<Symbol, IndexSet<Rhs>>,
        starting_symbol: Symbol,
    ) -> Result<Self> {
        let grammar = Self::from_parts(non_terminals, terminals, productions, starting_symbol);
        grammar.validate()?;
        Ok(grammar)
    }

    /// Assembles a grammar whose invariants the caller already guarantees.
    pub(crate) fn from_parts(
        non_terminals: IndexSet<Symbol>,
        terminals: IndexSet<Symbol>,
        productions: IndexMap<Symbol, IndexSet<Rhs>>,
        starting_symbol: Symbol,
    ) -> Self {
        Grammar {
            non_terminals,
            terminals,
            productions,
            starting_symbol,
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.is_non_terminal(&self.starting_symbol) {
            return Err(Error::malformed_grammar(format!(
                "starting symbol '{}' is not a declared non-terminal",
                self.starting_symbol
            )));
        }

        for (lhs, alternatives) in &self.productions {
            if !self.is_non_terminal(lhs) {
                return Err(Error::malformed_grammar(format!(
                    "production left-hand side '{}' is not a declared non-terminal",
                    lhs
                )));
            }
            for rhs in alternatives {
                if let Rhs::Symbols(symbols) = rhs {
                    if symbols.is_empty() {
                        return Err(Error::malformed_grammar(format!(
                            "production of '{}' has an empty right-hand side",
                            lhs
                        )));
                    }
                    if let Some(unknown) = symbols
                        .iter()
                        .find(|s| !self.is_terminal(s) && !self.is_non_terminal(s))
                    {
                        return Err(Error::malformed_grammar(format!(
                            "production {} -> {} uses undeclared symbol '{}'",
                            lhs, rhs, unknown
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn non_terminals(&self) -> &IndexSet<Symbol> {
        &self.non_terminals
    }

    pub fn terminals(&self) -> &IndexSet<Symbol> {
        &self.terminals
    }

    pub fn productions(&self) -> &IndexMap<Symbol, IndexSet<Rhs>> {
        &self.productions
    }

    /// The alternatives of one non-terminal, if it has any productions.
    pub fn productions_of(&self, symbol: &Symbol) -> Option<&IndexSet<Rhs>> {
        self.productions.get(symbol)
    }

    pub fn starting_symbol(&self) -> &Symbol {
        &self.starting_symbol
    }

    pub fn is_terminal(&self, symbol: &Symbol) -> bool {
        self.terminals.contains(symbol)
    }

    pub fn is_non_terminal(&self, symbol: &Symbol) -> bool {
        self.non_terminals.contains(symbol)
    }

    /// Regularity under the default (sequential) classifier.
    pub fn is_regular(&self) -> bool {
        RightLinearClassifier::default().is_regular(self)
    }

    fn derives_epsilon(&self, symbol: &Symbol) -> bool {
        self.productions_of(symbol)
            .map_or(false, |alternatives| alternatives.contains(&Rhs::Epsilon))
    }

    /// Decides whether `word` is derivable from the starting symbol.
    ///
    /// Only right-linear shaped alternatives (`a`, `aB`, `eps`) take part in
    /// the derivation; any other alternative is ignored.
    pub fn generates(&self, word: &[Symbol]) -> bool {
        // `None` marks a derivation closed by a terminal production.
        let mut current: IndexSet<Option<&Symbol>> = IndexSet::new();
        current.insert(Some(&self.starting_symbol));

        for letter in word {
            let mut next = IndexSet::new();
            for non_terminal in current.iter().filter_map(|state| *state) {
                for rhs in self.productions_of(non_terminal).into_iter().flatten() {
                    match rhs.symbols() {
                        [a] if a == letter => {
                            next.insert(None);
                        }
                        [a, b] if a == letter => {
                            next.insert(Some(b));
                        }
                        _ => {}
                    }
                }
            }
            if next.is_empty() {
                return false;
            }
            current = next;
        }

        current.iter().any(|state| match state {
            None => true,
            Some(non_terminal) => self.derives_epsilon(non_terminal),
        })
    }
}
