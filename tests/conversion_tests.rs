// Scenario and language-equivalence tests for the grammar/automaton conversions

use indexmap::IndexSet;
use regfa::{
    AutomatonBuilder, AutomatonToGrammarConverter, Error, FiniteAutomaton, Grammar, GrammarBuilder,
    GrammarToAutomatonConverter, Rhs, Symbol,
};

fn sym(text: &str) -> Symbol {
    Symbol::from(text)
}

fn set(items: &[&str]) -> IndexSet<Symbol> {
    items.iter().copied().map(Symbol::from).collect()
}

/// Every word over `alphabet` with at most `max_len` symbols.
fn words_up_to(alphabet: &IndexSet<Symbol>, max_len: usize) -> Vec<Vec<Symbol>> {
    let mut all = vec![Vec::new()];
    let mut frontier = vec![Vec::new()];
    for _ in 0..max_len {
        frontier = frontier
            .iter()
            .flat_map(move |prefix: &Vec<Symbol>| {
                alphabet.iter().map(move |letter| {
                    let mut word = prefix.clone();
                    word.push(letter.clone());
                    word
                })
            })
            .collect();
        all.extend(frontier.iter().cloned());
    }
    all
}

fn assert_same_language(grammar: &Grammar, fa: &FiniteAutomaton, max_len: usize) {
    for word in words_up_to(grammar.terminals(), max_len) {
        let text: String = word.iter().map(Symbol::as_str).collect();
        assert_eq!(
            grammar.generates(&word),
            fa.accepts(&word),
            "grammar and automaton disagree on '{}'",
            text
        );
    }
}

fn regular_grammars() -> Vec<Grammar> {
    vec![
        // a b
        GrammarBuilder::new("S")
            .non_terminals(["S", "A"])
            .terminals(["a", "b"])
            .production("S", ["aA"])
            .production("A", ["b"])
            .build()
            .unwrap(),
        // a*
        GrammarBuilder::new("S")
            .non_terminals(["S"])
            .terminals(["a"])
            .production("S", ["eps", "aS"])
            .build()
            .unwrap(),
        // (ab)+ | b a*
        GrammarBuilder::new("S")
            .non_terminals(["S", "A", "B", "C"])
            .terminals(["a", "b"])
            .production("S", ["aA", "bB", "b"])
            .production("A", ["bC", "b"])
            .production("C", ["aA"])
            .production("B", ["aB", "a"])
            .build()
            .unwrap(),
        // words over {a, b} ending in "ab", or empty
        GrammarBuilder::new("S")
            .non_terminals(["S", "X", "Y"])
            .terminals(["a", "b"])
            .production("S", ["eps", "aX", "bX", "aY"])
            .production("X", ["aX", "bX", "aY"])
            .production("Y", ["b"])
            .build()
            .unwrap(),
    ]
}

#[test]
fn test_scenario_single_chain() {
    let grammar = &regular_grammars()[0];
    assert!(grammar.is_regular());

    let fa = GrammarToAutomatonConverter::default().build(grammar).unwrap();
    assert_eq!(fa.states(), &set(&["S", "A", "K"]));
    assert_eq!(fa.final_states(), &set(&["K"]));
    assert_eq!(fa.transitions().len(), 2);
    assert_eq!(fa.targets(&sym("S"), &sym("a")), Some(&set(&["A"])));
    assert_eq!(fa.targets(&sym("A"), &sym("b")), Some(&set(&["K"])));
}

#[test]
fn test_scenario_epsilon_on_start() {
    let grammar = &regular_grammars()[1];
    assert!(grammar.is_regular());

    let fa = GrammarToAutomatonConverter::default().build(grammar).unwrap();
    assert!(fa.final_states().contains("S"));
}

#[test]
fn test_scenario_two_non_terminals() {
    let grammar = GrammarBuilder::new("S")
        .non_terminals(["S", "A", "B"])
        .terminals(["a", "b"])
        .production("S", ["AB"])
        .production("A", ["a"])
        .production("B", ["b"])
        .build()
        .unwrap();

    assert!(!grammar.is_regular());
    assert!(matches!(
        GrammarToAutomatonConverter::default().build(&grammar),
        Err(Error::IrregularGrammar(_))
    ));
}

#[test]
fn test_scenario_collapsed_productions() {
    let fa = AutomatonBuilder::new("S")
        .states(["S", "K"])
        .alphabet(["a"])
        .final_states(["K"])
        .transition("S", "a", "S")
        .transition("S", "a", "K")
        .build()
        .unwrap();

    let grammar = AutomatonToGrammarConverter::new().build(&fa);
    let expected: IndexSet<Rhs> = ["aS", "aK", "a"].into_iter().map(Rhs::parse).collect();
    assert_eq!(grammar.productions_of(&sym("S")), Some(&expected));
}

#[test]
fn test_long_right_hand_sides_are_never_regular() {
    for rhs in ["abA", "aaa", "abAB", "aSb"] {
        let grammar = GrammarBuilder::new("S")
            .non_terminals(["S", "A", "B"])
            .terminals(["a", "b"])
            .production("S", [rhs, "eps"])
            .build()
            .unwrap();
        assert!(!grammar.is_regular(), "{} should not be regular", rhs);
    }
}

#[test]
fn test_grammar_to_automaton_preserves_language() {
    for grammar in regular_grammars() {
        let fa = GrammarToAutomatonConverter::default().build(&grammar).unwrap();
        assert_same_language(&grammar, &fa, 6);
    }
}

#[test]
fn test_round_trip_preserves_language() {
    for grammar in regular_grammars() {
        let fa = GrammarToAutomatonConverter::default().build(&grammar).unwrap();
        let back = AutomatonToGrammarConverter::new().build(&fa);

        assert!(back.is_regular());
        assert_eq!(back.starting_symbol(), grammar.starting_symbol());
        for word in words_up_to(grammar.terminals(), 6) {
            assert_eq!(grammar.generates(&word), back.generates(&word));
        }
    }
}

#[test]
fn test_automaton_round_trip_preserves_language() {
    // Initial state is accepting and has incoming transitions
    let fa = AutomatonBuilder::new("p")
        .states(["p", "q", "r"])
        .alphabet(["a", "b"])
        .final_states(["p", "r"])
        .transition("p", "a", "q")
        .transition("q", "b", "p")
        .transition("q", "b", "r")
        .transition("r", "a", "r")
        .build()
        .unwrap();

    let grammar = AutomatonToGrammarConverter::new().build(&fa);
    assert_same_language(&grammar, &fa, 6);

    let again = GrammarToAutomatonConverter::default().build(&grammar).unwrap();
    for word in words_up_to(fa.alphabet(), 6) {
        assert_eq!(fa.accepts(&word), again.accepts(&word));
    }
}

#[test]
fn test_conversions_run_concurrently() {
    let grammars = regular_grammars();
    std::thread::scope(|scope| {
        let handles: Vec<_> = grammars
            .iter()
            .map(|grammar| {
                scope.spawn(move || {
                    let fa = GrammarToAutomatonConverter::default().build(grammar).unwrap();
                    AutomatonToGrammarConverter::new().build(&fa)
                })
            })
            .collect();
        for (handle, grammar) in handles.into_iter().zip(&grammars) {
            let back = handle.join().unwrap();
            assert_eq!(back.terminals(), grammar.terminals());
        }
    });
}
