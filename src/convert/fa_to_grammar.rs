use indexmap::IndexMap;
use std::iter;

use crate::automaton::fa::FiniteAutomaton;
use crate::convert::merge;
use crate::grammar::engine::Grammar;
use crate::grammar::rule::Rhs;

/// Builds a right-linear grammar from a finite automaton.
///
/// States become non-terminals and the alphabet becomes the terminals.
/// Every `delta(p, a) ∋ q` yields `p -> aq`, plus `p -> a` when `q` is final.
/// An accepting initial state yields `S -> eps`. This direction cannot fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutomatonToGrammarConverter;

impl AutomatonToGrammarConverter {
    pub fn new() -> Self {
        AutomatonToGrammarConverter
    }

    pub fn build(&self, fa: &FiniteAutomaton) -> Grammar {
        let start = fa.initial_state();

        let seed = if fa.is_final(start) {
            merge(IndexMap::new(), start.clone(), [Rhs::Epsilon])
        } else {
            IndexMap::new()
        };

        let productions = fa.transitions().iter().fold(seed, |acc, ((from, symbol), targets)| {
            let alternatives = targets.iter().flat_map(|target| {
                let collapsed = fa.is_final(target).then(|| Rhs::terminal(symbol.clone()));
                iter::once(Rhs::pair(symbol.clone(), target.clone())).chain(collapsed)
            });
            merge(acc, from.clone(), alternatives)
        });
        log::debug!(
            "Derived {} production groups from {} transitions",
            productions.len(),
            fa.transitions().len()
        );

        Grammar::from_parts(fa.states().clone(), fa.alphabet().clone(), productions, start.clone())
    }
}
