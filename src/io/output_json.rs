use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::io::Write;

use crate::automaton::fa::FiniteAutomaton;
use crate::grammar::engine::Grammar;

/// Convert the grammar to a JSON value.
pub fn grammar_to_json(grammar: &Grammar) -> Value {
    json!({
        "non_terminals": grammar.non_terminals(),
        "terminals": grammar.terminals(),
        "starting_symbol": grammar.starting_symbol(),
        "productions": grammar.productions(),
    })
}

/// Convert the automaton to a JSON value.
///
/// Transitions become a list because their keys are (state, symbol) pairs.
pub fn automaton_to_json(fa: &FiniteAutomaton) -> Value {
    let transitions: Vec<Value> = fa
        .transitions()
        .iter()
        .map(|((from, symbol), targets)| {
            json!({
                "from": from,
                "symbol": symbol,
                "to": targets,
            })
        })
        .collect();

    json!({
        "states": fa.states(),
        "alphabet": fa.alphabet(),
        "initial_state": fa.initial_state(),
        "final_states": fa.final_states(),
        "transitions": transitions,
    })
}

fn write_json<W: Write + ?Sized>(writer: &mut W, value: &Value) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value).context("Failed to serialize to JSON")?;
    writeln!(writer).context("Failed to write newline")?;
    Ok(())
}

pub fn write_grammar_json<W: Write + ?Sized>(writer: &mut W, grammar: &Grammar) -> Result<()> {
    write_json(writer, &grammar_to_json(grammar))
}

pub fn write_automaton_json<W: Write + ?Sized>(writer: &mut W, fa: &FiniteAutomaton) -> Result<()> {
    write_json(writer, &automaton_to_json(fa))
}
