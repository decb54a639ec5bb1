//! Readers for the line-oriented grammar and automaton descriptions.
//!
//! Grammar layout:
//! ```text
//! S A          <- non-terminals
//! a b          <- terminals
//! S            <- starting symbol
//! S aA b       <- S -> aA | b
//! A eps bA
//! ```
//!
//! Automaton layout:
//! ```text
//! p q          <- states
//! a b          <- alphabet
//! p            <- initial state
//! q            <- final states (may be empty)
//! p a q        <- delta(p, a) contains q
//! ```

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::automaton::builder::AutomatonBuilder;
use crate::automaton::fa::FiniteAutomaton;
use crate::grammar::builder::GrammarBuilder;
use crate::grammar::engine::Grammar;
use crate::grammar::rule::Rhs;
use crate::symbol::Symbol;
use crate::utils::io::read_to_string;

/// Lines numbered from 1, with trailing whitespace and `\r` removed.
fn numbered_lines<'a>(text: &'a str) -> impl Iterator<Item = (usize, &'a str)> + 'a {
    text.lines().enumerate().map(|(i, line)| (i + 1, line.trim()))
}

fn header<'a>(lines: &mut impl Iterator<Item = (usize, &'a str)>, what: &str) -> Result<&'a str> {
    lines
        .next()
        .map(|(_, line)| line)
        .with_context(|| format!("Missing {} line", what))
}

fn single_token(line: &str, what: &str) -> Result<Symbol> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(token), None) => Ok(Symbol::from(token)),
        (None, _) => bail!("The {} line is empty", what),
        (Some(_), Some(_)) => {
            bail!("The {} line must hold exactly one symbol, found '{}'", what, line)
        }
    }
}

/// Parses a grammar from its textual description.
pub fn parse_grammar(text: &str) -> Result<Grammar> {
    let mut lines = numbered_lines(text);

    let non_terminals = header(&mut lines, "non-terminals")?;
    let terminals = header(&mut lines, "terminals")?;
    let start = single_token(header(&mut lines, "starting symbol")?, "starting symbol")?;

    let mut builder = GrammarBuilder::new(start)
        .non_terminals(non_terminals.split_whitespace())
        .terminals(terminals.split_whitespace());

    for (number, line) in lines.filter(|(_, line)| !line.is_empty()) {
        let mut tokens = line.split_whitespace();
        let lhs = tokens
            .next()
            .map(Symbol::from)
            .with_context(|| format!("Line {}: missing left-hand side", number))?;
        let alternatives: Vec<&str> = tokens.collect();
        if alternatives.is_empty() {
            bail!("Line {}: production for '{}' has no alternatives", number, lhs);
        }
        for alternative in alternatives {
            builder.add_production(lhs.clone(), Rhs::parse(alternative));
        }
    }

    builder.build().context("Invalid grammar")
}

/// Parses a finite automaton from its textual description.
pub fn parse_automaton(text: &str) -> Result<FiniteAutomaton> {
    let mut lines = numbered_lines(text);

    let states = header(&mut lines, "states")?;
    let alphabet = header(&mut lines, "alphabet")?;
    let initial = single_token(header(&mut lines, "initial state")?, "initial state")?;
    let final_states = header(&mut lines, "final states")?;

    let mut builder = AutomatonBuilder::new(initial)
        .states(states.split_whitespace())
        .alphabet(alphabet.split_whitespace())
        .final_states(final_states.split_whitespace());

    for (number, line) in lines.filter(|(_, line)| !line.is_empty()) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [from, symbol, to] => builder.add_transition(
                Symbol::from(*from),
                Symbol::from(*symbol),
                Symbol::from(*to),
            ),
            _ => bail!("Line {}: expected 'from symbol to', found '{}'", number, line),
        }
    }

    builder.build().context("Invalid finite automaton")
}

pub fn read_grammar_file(path: &Path) -> Result<Grammar> {
    log::info!("Reading grammar from {}", path.display());
    let text = read_to_string(path)?;
    parse_grammar(&text)
        .with_context(|| format!("Failed to parse grammar file: {}", path.display()))
}

pub fn read_automaton_file(path: &Path) -> Result<FiniteAutomaton> {
    log::info!("Reading finite automaton from {}", path.display());
    let text = read_to_string(path)?;
    parse_automaton(&text)
        .with_context(|| format!("Failed to parse automaton file: {}", path.display()))
}
