use indexmap::{IndexMap, IndexSet};

use crate::automaton::fa::{FiniteAutomaton, TransitionKey};
use crate::error::Result;
use crate::symbol::Symbol;

/// Accumulates the parts of an automaton and validates them on `build`.
#[derive(Debug, Clone)]
pub struct AutomatonBuilder {
    states: IndexSet<Symbol>,
    alphabet: IndexSet<Symbol>,
    transitions: IndexMap<TransitionKey, IndexSet<Symbol>>,
    initial_state: Symbol,
    final_states: IndexSet<Symbol>,
}

impl AutomatonBuilder {
    pub fn new(initial_state: impl Into<Symbol>) -> Self {
        AutomatonBuilder {
            states: IndexSet::new(),
            alphabet: IndexSet::new(),
            transitions: IndexMap::new(),
            initial_state: initial_state.into(),
            final_states: IndexSet::new(),
        }
    }

    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    pub fn alphabet<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.alphabet.extend(symbols.into_iter().map(Into::into));
        self
    }

    pub fn final_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.final_states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Adds `to` to `delta(from, symbol)`.
    pub fn transition(
        mut self,
        from: impl Into<Symbol>,
        symbol: impl Into<Symbol>,
        to: impl Into<Symbol>,
    ) -> Self {
        self.add_transition(from.into(), symbol.into(), to.into());
        self
    }

    pub fn add_transition(&mut self, from: Symbol, symbol: Symbol, to: Symbol) {
        self.transitions.entry((from, symbol)).or_default().insert(to);
    }

    pub fn build(self) -> Result<FiniteAutomaton> {
        FiniteAutomaton::new(
            self.states,
            self.alphabet,
            self.transitions,
            self.initial_state,
            self.final_states,
        )
    }
}
