use std::fmt;

use crate::grammar::classifier::Violation;

/// Result type used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Which entity failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Grammar,
    Automaton,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Grammar => write!(f, "grammar"),
            EntityKind::Automaton => write!(f, "finite automaton"),
        }
    }
}

/// Errors raised by entity construction and conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The grammar is not regular, so no automaton can be built from it.
    IrregularGrammar(Violation),
    /// An entity broke one of its structural invariants at construction.
    MalformedEntity { entity: EntityKind, reason: String },
}

impl Error {
    pub(crate) fn malformed_grammar(reason: impl Into<String>) -> Self {
        Error::MalformedEntity { entity: EntityKind::Grammar, reason: reason.into() }
    }

    pub(crate) fn malformed_automaton(reason: impl Into<String>) -> Self {
        Error::MalformedEntity { entity: EntityKind::Automaton, reason: reason.into() }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IrregularGrammar(violation) => {
                write!(
                    f,
                    "cannot build a finite automaton from an irregular grammar: {}",
                    violation
                )
            }
            Error::MalformedEntity { entity, reason } => {
                write!(f, "malformed {}: {}", entity, reason)
            }
        }
    }
}

impl std::error::Error for Error {}
