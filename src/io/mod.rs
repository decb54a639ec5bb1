pub mod reader;
pub mod output_text;
pub mod output_source;
pub mod output_json;
pub mod output_dot;

pub use reader::{parse_automaton, parse_grammar, read_automaton_file, read_grammar_file};
