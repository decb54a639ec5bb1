use indexmap::{IndexMap, IndexSet};

use crate::error::{Error, Result};
use crate::symbol::Symbol;

/// Key of the transition relation: (source state, input symbol).
pub type TransitionKey = (Symbol, Symbol);

/// A non-deterministic finite automaton without epsilon moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiniteAutomaton {
    states: IndexSet<Symbol>,
    alphabet: IndexSet<Symbol>,
    /// (source, symbol) -> set of destination states
    transitions: IndexMap<TransitionKey, IndexSet<Symbol>>,
    initial_state: Symbol,
    final_states: IndexSet<Symbol>,
}

impl FiniteAutomaton {
    /// Creates an automaton, rejecting it if its parts are inconsistent.
    pub fn new(
        states: IndexSet<Symbol>,
        alphabet: IndexSet<Symbol>,
        transitions: IndexMap<TransitionKey, IndexSet<Symbol>>,
        initial_state: Symbol,
        final_states: IndexSet<Symbol>,
    ) -> Result<Self> {
        let fa = Self::from_parts(states, alphabet, transitions, initial_state, final_states);
        fa.validate()?;
        Ok(fa)
    }

    pub(crate) fn from_parts(
        states: IndexSet<Symbol>,
        alphabet: IndexSet<Symbol>,
        transitions: IndexMap<TransitionKey, IndexSet<Symbol>>,
        initial_state: Symbol,
        final_states: IndexSet<Symbol>,
    ) -> Self {
        FiniteAutomaton {
            states,
            alphabet,
            transitions,
            initial_state,
            final_states,
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.states.contains(&self.initial_state) {
            return Err(Error::malformed_automaton(format!(
                "initial state '{}' is not a declared state",
                self.initial_state
            )));
        }
        if let Some(state) = self.final_states.iter().find(|s| !self.states.contains(*s)) {
            return Err(Error::malformed_automaton(format!(
                "final state '{}' is not a declared state",
                state
            )));
        }
        for ((from, symbol), targets) in &self.transitions {
            if !self.states.contains(from) {
                return Err(Error::malformed_automaton(format!(
                    "transition source '{}' is not a declared state",
                    from
                )));
            }
            if !self.alphabet.contains(symbol) {
                return Err(Error::malformed_automaton(format!(
                    "transition symbol '{}' is not in the alphabet",
                    symbol
                )));
            }
            if let Some(target) = targets.iter().find(|t| !self.states.contains(*t)) {
                return Err(Error::malformed_automaton(format!(
                    "transition delta({}, {}) targets undeclared state '{}'",
                    from, symbol, target
                )));
            }
        }
        Ok(())
    }

    pub fn states(&self) -> &IndexSet<Symbol> {
        &self.states
    }

    pub fn alphabet(&self) -> &IndexSet<Symbol> {
        &self.alphabet
    }

    pub fn transitions(&self) -> &IndexMap<TransitionKey, IndexSet<Symbol>> {
        &self.transitions
    }

    /// Destinations of `delta(state, symbol)`, if any transition exists.
    pub fn targets(&self, state: &Symbol, symbol: &Symbol) -> Option<&IndexSet<Symbol>> {
        self.transitions.get(&(state.clone(), symbol.clone()))
    }

    pub fn initial_state(&self) -> &Symbol {
        &self.initial_state
    }

    pub fn final_states(&self) -> &IndexSet<Symbol> {
        &self.final_states
    }

    pub fn is_final(&self, state: &Symbol) -> bool {
        self.final_states.contains(state)
    }

    /// Runs the automaton on `word`, tracking every reachable state at once.
    pub fn accepts(&self, word: &[Symbol]) -> bool {
        let mut current: IndexSet<&Symbol> = IndexSet::new();
        current.insert(&self.initial_state);

        for letter in word {
            let next: IndexSet<&Symbol> = current
                .iter()
                .filter_map(|state| self.targets(state, letter))
                .flatten()
                .collect();
            if next.is_empty() {
                return false;
            }
            current = next;
        }

        current.iter().any(|state| self.is_final(state))
    }
}
