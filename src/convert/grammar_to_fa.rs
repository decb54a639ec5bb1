use indexmap::{IndexMap, IndexSet};
use std::iter;

use crate::automaton::fa::FiniteAutomaton;
use crate::convert::merge;
use crate::error::{Error, Result};
use crate::grammar::classifier::RightLinearClassifier;
use crate::grammar::engine::Grammar;
use crate::grammar::rule::Rhs;
use crate::symbol::Symbol;

/// Preferred name for the synthesized accepting state.
pub const DEFAULT_SINK: &str = "K";

/// Builds a finite automaton from a regular grammar.
///
/// Non-terminals become states, terminals the alphabet. `A -> aB` becomes
/// `delta(A, a) ∋ B`, and `A -> a` becomes `delta(A, a) ∋ Sink`, where Sink is
/// a fresh accepting state. `S -> eps` marks the initial state as accepting.
#[derive(Debug, Clone)]
pub struct GrammarToAutomatonConverter {
    classifier: RightLinearClassifier,
    sink_hint: Symbol,
}

impl Default for GrammarToAutomatonConverter {
    fn default() -> Self {
        Self::new(RightLinearClassifier::default(), DEFAULT_SINK)
    }
}

impl GrammarToAutomatonConverter {
    pub fn new(classifier: RightLinearClassifier, sink_hint: impl Into<Symbol>) -> Self {
        GrammarToAutomatonConverter {
            classifier,
            sink_hint: sink_hint.into(),
        }
    }

    /// Fails with `Error::IrregularGrammar` if the grammar is not regular.
    pub fn build(&self, grammar: &Grammar) -> Result<FiniteAutomaton> {
        if let Some(violation) = self.classifier.find_violation(grammar) {
            return Err(Error::IrregularGrammar(violation));
        }

        let start = grammar.starting_symbol();
        let sink = fresh_sink(&self.sink_hint, grammar);
        log::debug!("Using '{}' as the sink state", sink);

        let (transitions, start_accepts) = grammar
            .productions()
            .iter()
            .flat_map(|(lhs, alternatives)| alternatives.iter().map(move |rhs| (lhs, rhs)))
            .fold((IndexMap::new(), false), |(transitions, start_accepts), (lhs, rhs)| {
                match (rhs, rhs.symbols()) {
                    (Rhs::Epsilon, _) if lhs == start => (transitions, true),
                    (_, [first]) => (
                        merge(transitions, (lhs.clone(), first.clone()), [sink.clone()]),
                        start_accepts,
                    ),
                    (_, [first, target]) => (
                        merge(transitions, (lhs.clone(), first.clone()), [target.clone()]),
                        start_accepts,
                    ),
                    // Excluded by the regularity check.
                    _ => (transitions, start_accepts),
                }
            });

        let states: IndexSet<Symbol> = grammar
            .non_terminals()
            .iter()
            .cloned()
            .chain(iter::once(sink.clone()))
            .collect();
        let final_states: IndexSet<Symbol> = iter::once(sink)
            .chain(start_accepts.then(|| start.clone()))
            .collect();

        Ok(FiniteAutomaton::from_parts(
            states,
            grammar.terminals().clone(),
            transitions,
            start.clone(),
            final_states,
        ))
    }
}

/// Picks a state name no terminal or non-terminal of `grammar` uses.
///
/// Tries the hint, then single upper-case letters from `Z` down, then the hint
/// followed by a counter.
fn fresh_sink(hint: &Symbol, grammar: &Grammar) -> Symbol {
    let taken =
        |candidate: &Symbol| grammar.is_terminal(candidate) || grammar.is_non_terminal(candidate);

    if !taken(hint) {
        return hint.clone();
    }
    if let Some(letter) = ('A'..='Z').rev().map(Symbol::from).find(|c| !taken(c)) {
        return letter;
    }
    let mut n = 0usize;
    loop {
        let candidate = Symbol::new(format!("{}{}", hint, n));
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
