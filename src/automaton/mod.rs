pub mod fa;
pub mod builder;

pub use crate::automaton::fa::{FiniteAutomaton, TransitionKey};
pub use crate::automaton::builder::AutomatonBuilder;
