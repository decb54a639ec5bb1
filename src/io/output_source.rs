//! Renders grammars and automata back into the layout `io::reader` parses.

use anyhow::{Context, Result};
use std::io::Write;

use crate::automaton::fa::FiniteAutomaton;
use crate::grammar::engine::Grammar;
use crate::symbol::Symbol;

fn line<'a>(symbols: impl IntoIterator<Item = &'a Symbol>) -> String {
    symbols.into_iter().map(Symbol::as_str).collect::<Vec<_>>().join(" ")
}

pub fn write_grammar_source<W: Write + ?Sized>(writer: &mut W, grammar: &Grammar) -> Result<()> {
    writeln!(writer, "{}", line(grammar.non_terminals())).context("Failed to write non-terminals")?;
    writeln!(writer, "{}", line(grammar.terminals())).context("Failed to write terminals")?;
    writeln!(writer, "{}", grammar.starting_symbol()).context("Failed to write starting symbol")?;
    for (lhs, alternatives) in grammar.productions() {
        let alternatives: Vec<String> = alternatives.iter().map(ToString::to_string).collect();
        writeln!(writer, "{} {}", lhs, alternatives.join(" "))
            .with_context(|| format!("Failed to write productions of {}", lhs))?;
    }
    Ok(())
}

pub fn write_automaton_source<W: Write + ?Sized>(
    writer: &mut W,
    fa: &FiniteAutomaton,
) -> Result<()> {
    writeln!(writer, "{}", line(fa.states())).context("Failed to write states")?;
    writeln!(writer, "{}", line(fa.alphabet())).context("Failed to write alphabet")?;
    writeln!(writer, "{}", fa.initial_state()).context("Failed to write initial state")?;
    writeln!(writer, "{}", line(fa.final_states())).context("Failed to write final states")?;
    for ((from, symbol), targets) in fa.transitions() {
        for to in targets {
            writeln!(writer, "{} {} {}", from, symbol, to)
                .with_context(|| format!("Failed to write transition {} {} {}", from, symbol, to))?;
        }
    }
    Ok(())
}
