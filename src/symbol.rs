use std::borrow::Borrow;
use std::fmt;
use serde::{Serialize, Deserialize};

/// Marker used in right-hand sides for the empty production.
pub const EPSILON: &str = "eps";

/// An opaque symbol shared by grammars and automata.
///
/// The same type names terminals, non-terminals, automaton states and
/// alphabet letters. Two symbols are equal iff their text is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(text: impl Into<String>) -> Self {
        Symbol(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if this symbol spells the epsilon marker.
    pub fn is_epsilon(&self) -> bool {
        self.0 == EPSILON
    }
}

impl From<&str> for Symbol {
    fn from(text: &str) -> Self {
        Symbol(text.to_string())
    }
}

impl From<String> for Symbol {
    fn from(text: String) -> Self {
        Symbol(text)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol(c.to_string())
    }
}

// Lets symbol sets be queried with plain &str keys.
impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
