// Declare the library modules
pub mod automaton;
pub mod config;
pub mod convert;
pub mod error;
pub mod grammar;
pub mod io;
pub mod symbol;
pub mod utils;

// Re-export key types for easier access
pub use automaton::{AutomatonBuilder, FiniteAutomaton};
pub use convert::{AutomatonToGrammarConverter, GrammarToAutomatonConverter};
pub use error::{EntityKind, Error, Result};
pub use grammar::{EpsilonCheck, Grammar, GrammarBuilder, Rhs, RightLinearClassifier, Violation};
pub use symbol::{Symbol, EPSILON};
