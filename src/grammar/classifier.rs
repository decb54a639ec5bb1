//! Right-linear grammar classification.
//!
//! A grammar is regular here when every alternative has one of the shapes
//! `A -> a B`, `A -> a` or `A -> eps`, and its epsilon productions sit only on
//! the starting symbol.

use std::fmt;
use std::str::FromStr;

use crate::grammar::engine::Grammar;
use crate::grammar::rule::Rhs;
use crate::symbol::Symbol;

/// How epsilon placement is validated once the shapes are right-linear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EpsilonCheck {
    /// One ordered scan over the productions: epsilon may only be produced by
    /// the start symbol, and once an epsilon production has been seen no
    /// later production may have the start symbol alone as a right-hand side.
    #[default]
    Sequential,
    /// Order-independent textbook rule: epsilon may only be produced by the
    /// start symbol, and if it is, the start symbol appears in no
    /// right-hand side at all.
    Strict,
}

impl FromStr for EpsilonCheck {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" => Ok(EpsilonCheck::Sequential),
            "strict" => Ok(EpsilonCheck::Strict),
            other => Err(format!(
                "unknown epsilon check '{}' (expected 'sequential' or 'strict')",
                other
            )),
        }
    }
}

impl fmt::Display for EpsilonCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EpsilonCheck::Sequential => write!(f, "sequential"),
            EpsilonCheck::Strict => write!(f, "strict"),
        }
    }
}

/// The first reason a grammar is not regular.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// More than two symbols on the right-hand side.
    TooLong { lhs: Symbol, rhs: Rhs },
    /// `A -> B`
    LoneNonTerminal { lhs: Symbol, rhs: Rhs },
    /// `A -> B x`
    LeadingNonTerminal { lhs: Symbol, rhs: Rhs },
    /// `A -> x b`
    TrailingTerminal { lhs: Symbol, rhs: Rhs },
    /// `A -> eps` where `A` is not the starting symbol.
    EpsilonOffStart { lhs: Symbol },
    /// The starting symbol is used on a right-hand side while it also produces epsilon.
    StartAfterEpsilon { lhs: Symbol, rhs: Rhs },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::TooLong { lhs, rhs } => {
                write!(f, "{} -> {} has more than two symbols", lhs, rhs)
            }
            Violation::LoneNonTerminal { lhs, rhs } => {
                write!(f, "{} -> {} is a single non-terminal", lhs, rhs)
            }
            Violation::LeadingNonTerminal { lhs, rhs } => {
                write!(f, "{} -> {} starts with a non-terminal", lhs, rhs)
            }
            Violation::TrailingTerminal { lhs, rhs } => {
                write!(f, "{} -> {} ends with a terminal", lhs, rhs)
            }
            Violation::EpsilonOffStart { lhs } => {
                write!(f, "{} -> eps but {} is not the starting symbol", lhs, lhs)
            }
            Violation::StartAfterEpsilon { lhs, rhs } => {
                write!(f, "{} -> {} uses the starting symbol, which produces eps", lhs, rhs)
            }
        }
    }
}

/// Decides whether grammars are right-linear with valid epsilon placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RightLinearClassifier {
    epsilon_check: EpsilonCheck,
}

impl RightLinearClassifier {
    pub fn new(epsilon_check: EpsilonCheck) -> Self {
        RightLinearClassifier { epsilon_check }
    }

    pub fn epsilon_check(&self) -> EpsilonCheck {
        self.epsilon_check
    }

    pub fn is_regular(&self, grammar: &Grammar) -> bool {
        let violation = self.find_violation(grammar);
        if let Some(v) = &violation {
            log::debug!("Grammar is not regular: {}", v);
        }
        violation.is_none()
    }

    pub fn is_right_linear(&self, grammar: &Grammar) -> bool {
        self.shape_violation(grammar).is_none()
    }

    /// Shapes are checked first; epsilon placement only once every shape passes.
    pub fn find_violation(&self, grammar: &Grammar) -> Option<Violation> {
        self.shape_violation(grammar).or_else(|| match self.epsilon_check {
            EpsilonCheck::Sequential => sequential_epsilon_violation(grammar),
            EpsilonCheck::Strict => strict_epsilon_violation(grammar),
        })
    }

    fn shape_violation(&self, grammar: &Grammar) -> Option<Violation> {
        grammar.productions().iter().find_map(|(lhs, alternatives)| {
            alternatives.iter().find_map(|rhs| rhs_shape_violation(grammar, lhs, rhs))
        })
    }
}

fn rhs_shape_violation(grammar: &Grammar, lhs: &Symbol, rhs: &Rhs) -> Option<Violation> {
    let symbols = match rhs {
        Rhs::Epsilon => return None,
        Rhs::Symbols(symbols) => symbols.as_slice(),
    };
    let (lhs, rhs) = (lhs.clone(), rhs.clone());
    match symbols {
        [a] if grammar.is_non_terminal(a) => Some(Violation::LoneNonTerminal { lhs, rhs }),
        [a, _] if grammar.is_non_terminal(a) => Some(Violation::LeadingNonTerminal { lhs, rhs }),
        [_, b] if grammar.is_terminal(b) => Some(Violation::TrailingTerminal { lhs, rhs }),
        s if s.len() > 2 => Some(Violation::TooLong { lhs, rhs }),
        _ => None,
    }
}

fn sequential_epsilon_violation(grammar: &Grammar) -> Option<Violation> {
    let start = grammar.starting_symbol();
    let mut has_epsilon = false;

    for (lhs, alternatives) in grammar.productions() {
        if alternatives.contains(&Rhs::Epsilon) {
            has_epsilon = true;
            if lhs != start {
                return Some(Violation::EpsilonOffStart { lhs: lhs.clone() });
            }
        }
        if has_epsilon {
            if let Some(rhs) = alternatives.iter().find(|rhs| rhs.is_exactly(start)) {
                return Some(Violation::StartAfterEpsilon { lhs: lhs.clone(), rhs: rhs.clone() });
            }
        }
    }
    None
}

fn strict_epsilon_violation(grammar: &Grammar) -> Option<Violation> {
    let start = grammar.starting_symbol();
    let productions = grammar.productions();

    if let Some((lhs, _)) = productions
        .iter()
        .find(|(lhs, alternatives)| *lhs != start && alternatives.contains(&Rhs::Epsilon))
    {
        return Some(Violation::EpsilonOffStart { lhs: lhs.clone() });
    }

    let start_has_epsilon = grammar
        .productions_of(start)
        .map_or(false, |alternatives| alternatives.contains(&Rhs::Epsilon));
    if !start_has_epsilon {
        return None;
    }

    productions.iter().find_map(|(lhs, alternatives)| {
        alternatives
            .iter()
            .find(|rhs| rhs.symbols().contains(start))
            .map(|rhs| Violation::StartAfterEpsilon { lhs: lhs.clone(), rhs: rhs.clone() })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::builder::GrammarBuilder;

    fn grammar(productions: &[(&str, &[&str])]) -> Grammar {
        let mut builder = GrammarBuilder::new("S")
            .non_terminals(["S", "A", "B"])
            .terminals(["a", "b"]);
        for (lhs, alternatives) in productions {
            builder = builder.production(*lhs, alternatives.iter().copied());
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_canonical_forms_are_regular() {
        let g = grammar(&[("S", &["aA", "b"]), ("A", &["bB", "a"]), ("B", &["b"])]);
        assert!(RightLinearClassifier::default().is_regular(&g));
        assert!(g.is_regular());
    }

    #[test]
    fn test_too_long_rhs() {
        let g = grammar(&[("S", &["abA"])]);
        let classifier = RightLinearClassifier::default();
        assert!(!classifier.is_right_linear(&g));
        assert!(matches!(classifier.find_violation(&g), Some(Violation::TooLong { .. })));
    }

    #[test]
    fn test_lone_non_terminal() {
        let g = grammar(&[("S", &["A"]), ("A", &["a"])]);
        assert!(matches!(
            RightLinearClassifier::default().find_violation(&g),
            Some(Violation::LoneNonTerminal { .. })
        ));
    }

    #[test]
    fn test_two_non_terminals() {
        let g = grammar(&[("S", &["AB"]), ("A", &["a"]), ("B", &["b"])]);
        assert!(!g.is_regular());
        assert!(matches!(
            RightLinearClassifier::default().find_violation(&g),
            Some(Violation::LeadingNonTerminal { .. })
        ));
    }

    #[test]
    fn test_trailing_terminal() {
        let g = grammar(&[("S", &["ab"])]);
        assert!(matches!(
            RightLinearClassifier::default().find_violation(&g),
            Some(Violation::TrailingTerminal { .. })
        ));
    }

    #[test]
    fn test_epsilon_on_start_with_self_loop() {
        let g = grammar(&[("S", &["eps", "aS"])]);
        assert!(RightLinearClassifier::new(EpsilonCheck::Sequential).is_regular(&g));
        // The textbook rule forbids S on a right-hand side once S -> eps
        assert!(matches!(
            RightLinearClassifier::new(EpsilonCheck::Strict).find_violation(&g),
            Some(Violation::StartAfterEpsilon { .. })
        ));
    }

    #[test]
    fn test_epsilon_off_start() {
        let g = grammar(&[("S", &["aA"]), ("A", &["eps", "b"])]);
        for check in [EpsilonCheck::Sequential, EpsilonCheck::Strict] {
            let classifier = RightLinearClassifier::new(check);
            assert_eq!(
                classifier.find_violation(&g),
                Some(Violation::EpsilonOffStart { lhs: Symbol::from("A") })
            );
        }
    }

    #[test]
    fn test_strict_allows_epsilon_when_start_unused() {
        let g = grammar(&[("S", &["eps", "aA"]), ("A", &["bA", "b"])]);
        assert!(RightLinearClassifier::new(EpsilonCheck::Strict).is_regular(&g));
    }

    #[test]
    fn test_epsilon_check_from_str() {
        assert_eq!("sequential".parse::<EpsilonCheck>(), Ok(EpsilonCheck::Sequential));
        assert_eq!("STRICT".parse::<EpsilonCheck>(), Ok(EpsilonCheck::Strict));
        assert!("loose".parse::<EpsilonCheck>().is_err());
    }
}
