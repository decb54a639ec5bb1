use anyhow::{Context, Result};
use indexmap::IndexSet;
use std::fmt::Display;
use std::io::Write;

use crate::automaton::fa::FiniteAutomaton;
use crate::grammar::engine::Grammar;
use crate::grammar::rule::Rhs;
use crate::symbol::Symbol;

fn join<T: Display>(items: impl IntoIterator<Item = T>, separator: &str) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Formats `A -> x | y`.
fn format_production(lhs: &Symbol, alternatives: &IndexSet<Rhs>) -> String {
    format!("{} -> {}", lhs, join(alternatives, " | "))
}

/// Writes the grammar in a human-readable text format.
pub fn write_grammar_text<W: Write + ?Sized>(writer: &mut W, grammar: &Grammar) -> Result<()> {
    writeln!(writer, "Non-terminals: {}", join(grammar.non_terminals(), " "))
        .context("Failed to write non-terminals")?;
    writeln!(writer, "Terminals: {}", join(grammar.terminals(), " "))
        .context("Failed to write terminals")?;
    writeln!(writer, "Starting symbol: {}", grammar.starting_symbol())
        .context("Failed to write starting symbol")?;
    writeln!(writer, "Productions:").context("Failed to write productions header")?;
    for (lhs, alternatives) in grammar.productions() {
        writeln!(writer, "  {}", format_production(lhs, alternatives))
            .with_context(|| format!("Failed to write productions of {}", lhs))?;
    }
    Ok(())
}

/// Writes only the productions whose left-hand side is `symbol`.
pub fn write_productions_of<W: Write + ?Sized>(
    writer: &mut W,
    grammar: &Grammar,
    symbol: &Symbol,
) -> Result<()> {
    writeln!(writer, "Productions of {}:", symbol).context("Failed to write productions header")?;
    let written = match grammar.productions_of(symbol) {
        Some(alternatives) => writeln!(writer, "  {}", format_production(symbol, alternatives)),
        None => writeln!(writer, "  (none)"),
    };
    written.with_context(|| format!("Failed to write productions of {}", symbol))
}

/// Writes the automaton in a human-readable text format.
pub fn write_automaton_text<W: Write + ?Sized>(writer: &mut W, fa: &FiniteAutomaton) -> Result<()> {
    writeln!(writer, "States: {}", join(fa.states(), " ")).context("Failed to write states")?;
    writeln!(writer, "Alphabet: {}", join(fa.alphabet(), " ")).context("Failed to write alphabet")?;
    writeln!(writer, "Initial state: {}", fa.initial_state())
        .context("Failed to write initial state")?;
    writeln!(writer, "Final states: {}", join(fa.final_states(), " "))
        .context("Failed to write final states")?;
    writeln!(writer, "Transitions:").context("Failed to write transitions header")?;
    for ((from, symbol), targets) in fa.transitions() {
        writeln!(writer, "  delta({}, {}) = {{{}}}", from, symbol, join(targets, ", "))
            .with_context(|| format!("Failed to write transition delta({}, {})", from, symbol))?;
    }
    Ok(())
}
