use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use regfa::config::Config;
use regfa::grammar::classifier::EpsilonCheck;
use regfa::io::output_dot::write_automaton_dot;
use regfa::io::output_json::{write_automaton_json, write_grammar_json};
use regfa::io::output_source::{write_automaton_source, write_grammar_source};
use regfa::io::output_text::{write_automaton_text, write_grammar_text, write_productions_of};
use regfa::io::reader::{read_automaton_file, read_grammar_file};
use regfa::utils::io::{open_file_for_writing, resolve_format, OutputFormat};
use regfa::{AutomatonToGrammarConverter, Symbol};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    author = "regfa developers",
    version,
    about = "Right-linear grammar and finite automaton conversion",
    long_about = "regfa checks whether a grammar is right-linear (regular) and converts \
                  between regular grammars and finite automata in both directions."
)]
pub struct Cli {
    /// Epsilon placement check: 'sequential' or 'strict'.
    /// Overrides REGFA_EPSILON_CHECK.
    #[arg(long, global = true, value_parser = parse_epsilon_check)]
    epsilon_check: Option<EpsilonCheck>,

    /// Preferred name for the synthesized sink state. Overrides REGFA_SINK.
    #[arg(long, global = true)]
    sink: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a grammar is regular
    Verify {
        /// Grammar description file
        #[arg(short, long)]
        grammar: PathBuf,
    },

    /// Build a finite automaton from a regular grammar
    ToFa {
        /// Grammar description file
        #[arg(short, long)]
        grammar: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (text, source, json, dot)
        #[arg(short, long, value_parser = parse_format)]
        format: Option<OutputFormat>,
    },

    /// Build a regular grammar from a finite automaton
    ToGrammar {
        /// Automaton description file
        #[arg(short, long)]
        automaton: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (text, source, json)
        #[arg(short, long, value_parser = parse_format)]
        format: Option<OutputFormat>,
    },

    /// Display a grammar or an automaton
    Show {
        /// Grammar description file
        #[arg(short, long, conflicts_with = "automaton", required_unless_present = "automaton")]
        grammar: Option<PathBuf>,

        /// Automaton description file
        #[arg(short, long)]
        automaton: Option<PathBuf>,

        /// Only show the productions of this non-terminal
        #[arg(long, requires = "grammar")]
        productions_of: Option<String>,
    },

    /// Run an automaton on a word, one symbol per character
    Accept {
        /// Automaton description file
        #[arg(short, long)]
        automaton: PathBuf,

        /// The input word (may be empty)
        word: String,
    },
}

const GRAMMAR_DOT_UNSUPPORTED: &str = "DOT output is only available for automata";

fn parse_epsilon_check(s: &str) -> Result<EpsilonCheck, String> {
    s.parse()
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Sends rendered output to `output`, or to stdout when no path is given.
fn emit(output: Option<&Path>, render: impl FnOnce(&mut dyn Write) -> Result<()>) -> Result<()> {
    match output {
        Some(path) => {
            info!("Writing output to {}", path.display());
            let mut writer = open_file_for_writing(path)?;
            render(&mut writer)?;
            writer
                .flush()
                .with_context(|| format!("Failed to flush {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            render(&mut lock)?;
        }
    }
    Ok(())
}

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env(cli.epsilon_check, cli.sink)?;
    info!("Using {} epsilon check, sink hint '{}'", config.epsilon_check, config.sink_hint);

    match cli.command {
        Commands::Verify { grammar } => {
            let grammar = read_grammar_file(&grammar)?;
            match config.classifier().find_violation(&grammar) {
                None => println!("The grammar is regular"),
                Some(violation) => println!("The grammar is not regular: {}", violation),
            }
        }

        Commands::ToFa { grammar: path, output, format } => {
            let grammar = read_grammar_file(&path)?;
            let fa = config
                .grammar_converter()
                .build(&grammar)
                .with_context(|| format!("Failed to convert grammar {}", path.display()))?;
            let format = resolve_format(format, output.as_deref())?;
            emit(output.as_deref(), |w| match format {
                OutputFormat::Text => write_automaton_text(w, &fa),
                OutputFormat::Source => write_automaton_source(w, &fa),
                OutputFormat::Json => write_automaton_json(w, &fa),
                OutputFormat::Dot => write_automaton_dot(w, &fa),
            })?;
        }

        Commands::ToGrammar { automaton, output, format } => {
            let fa = read_automaton_file(&automaton)?;
            let format = resolve_format(format, output.as_deref())?;
            // Checked before the output file is opened
            if format == OutputFormat::Dot {
                bail!(GRAMMAR_DOT_UNSUPPORTED);
            }
            let grammar = AutomatonToGrammarConverter::new().build(&fa);
            emit(output.as_deref(), |w| match format {
                OutputFormat::Text => write_grammar_text(w, &grammar),
                OutputFormat::Source => write_grammar_source(w, &grammar),
                OutputFormat::Json => write_grammar_json(w, &grammar),
                OutputFormat::Dot => bail!(GRAMMAR_DOT_UNSUPPORTED),
            })?;
        }

        Commands::Show { grammar, automaton, productions_of } => {
            if let Some(path) = grammar {
                let grammar = read_grammar_file(&path)?;
                emit(None, |w| match &productions_of {
                    Some(symbol) => {
                        write_productions_of(w, &grammar, &Symbol::from(symbol.as_str()))
                    }
                    None => write_grammar_text(w, &grammar),
                })?;
            } else if let Some(path) = automaton {
                let fa = read_automaton_file(&path)?;
                emit(None, |w| write_automaton_text(w, &fa))?;
            }
        }

        Commands::Accept { automaton, word } => {
            let fa = read_automaton_file(&automaton)?;
            let word: Vec<Symbol> = word.chars().map(Symbol::from).collect();
            if fa.accepts(&word) {
                println!("accepted");
            } else {
                println!("rejected");
            }
        }
    }

    Ok(())
}
