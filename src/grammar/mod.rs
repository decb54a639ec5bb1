pub mod rule;
pub mod engine;
pub mod classifier;
pub mod builder;

// Export core types for anyone importing the grammar module
pub use crate::grammar::rule::Rhs;
pub use crate::grammar::engine::Grammar;
pub use crate::grammar::classifier::{EpsilonCheck, RightLinearClassifier, Violation};
pub use crate::grammar::builder::GrammarBuilder;
