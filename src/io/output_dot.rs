use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::io::Write;

use crate::automaton::fa::FiniteAutomaton;
use crate::symbol::Symbol;

/// Quoted DOT identifier for a state.
fn dot_node_id(state: &Symbol) -> String {
    format!("\"{}\"", state.as_str().replace('"', "\\\""))
}

/// Writes the automaton as a Graphviz digraph.
///
/// Parallel transitions between the same two states share one edge whose
/// label lists every symbol.
pub fn write_automaton_dot<W: Write + ?Sized>(writer: &mut W, fa: &FiniteAutomaton) -> Result<()> {
    writeln!(writer, "digraph FiniteAutomaton {{").context("Failed to write DOT header")?;
    writeln!(writer, "  rankdir=LR;").context("Failed to write DOT rankdir")?;
    writeln!(writer, "  __start [shape=point];").context("Failed to write DOT start marker")?;

    for state in fa.states() {
        let shape = if fa.is_final(state) { "doublecircle" } else { "circle" };
        writeln!(writer, "  {} [shape={}];", dot_node_id(state), shape)
            .with_context(|| format!("Failed to write DOT node for state {}", state))?;
    }

    writeln!(writer, "  __start -> {};", dot_node_id(fa.initial_state()))
        .context("Failed to write DOT start edge")?;

    let mut edges: IndexMap<(&Symbol, &Symbol), Vec<&str>> = IndexMap::new();
    for ((from, symbol), targets) in fa.transitions() {
        for to in targets {
            edges.entry((from, to)).or_default().push(symbol.as_str());
        }
    }

    for ((from, to), labels) in &edges {
        writeln!(
            writer,
            "  {} -> {} [label=\"{}\"];",
            dot_node_id(from),
            dot_node_id(to),
            labels.join(",")
        )
        .with_context(|| format!("Failed to write DOT edge {} -> {}", from, to))?;
    }

    writeln!(writer, "}}").context("Failed to write DOT footer")?;
    Ok(())
}
