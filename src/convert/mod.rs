//! Conversions between right-linear grammars and finite automata.

pub mod grammar_to_fa;
pub mod fa_to_grammar;

pub use crate::convert::grammar_to_fa::{GrammarToAutomatonConverter, DEFAULT_SINK};
pub use crate::convert::fa_to_grammar::AutomatonToGrammarConverter;

use indexmap::{IndexMap, IndexSet};
use std::hash::Hash;

/// Inserts `values` under `key`, unioning with whatever is already there.
pub(crate) fn merge<K, V, I>(
    mut acc: IndexMap<K, IndexSet<V>>,
    key: K,
    values: I,
) -> IndexMap<K, IndexSet<V>>
where
    K: Hash + Eq,
    V: Hash + Eq,
    I: IntoIterator<Item = V>,
{
    acc.entry(key).or_default().extend(values);
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_unions_existing_key() {
        let acc = merge(IndexMap::new(), "k", [1, 2]);
        let acc = merge(acc, "k", [2, 3]);
        let acc = merge(acc, "j", [9]);

        assert_eq!(acc.len(), 2);
        assert_eq!(acc["k"].iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(acc["j"].len(), 1);
    }
}
