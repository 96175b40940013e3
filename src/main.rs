use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use keycalc::{Config, Engine, EngineState, Token};
use tracing_subscriber::EnvFilter;

/// Drive the calculator engine from the terminal.
///
/// Each argument (or each stdin line) is a sequence of keys. Whole words
/// `Enter`, `Backspace`, `Escape` and `Sqrt` are named keys; anything else
/// is fed one character at a time.
#[derive(Parser, Debug)]
#[command(name = "keycalc", version, about)]
struct Args {
    /// Path to a config file (defaults to $XDG_CONFIG_HOME/keycalc/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print each state as a JSON object
    #[arg(long)]
    json: bool,

    /// Keys to feed; reads stdin line by line when omitted
    keys: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let json = args.json || config.json;
    let mut engine = Engine::with_options(config.engine_options());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.keys.is_empty() {
        for word in &args.keys {
            feed(&mut engine, word);
        }
        return print_state(&mut out, &engine.state(), json);
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        for word in line.split_whitespace() {
            feed(&mut engine, word);
        }
        print_state(&mut out, &engine.state(), json)?;
    }

    Ok(())
}

/// Feed a named key, or every character of `word`.
fn feed(engine: &mut Engine, word: &str) {
    let named = word.chars().count() > 1 && Token::from_key(word).is_some();
    if named {
        engine.append_key(word);
    } else {
        engine.append_str(word);
    }
}

fn print_state(out: &mut impl Write, state: &EngineState, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, state)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{}", state.display_text)?;
    if let Some(previous) = &state.previous_expression {
        writeln!(out, "  previous: {previous}")?;
    }
    if let Some(error) = &state.pending_error {
        writeln!(out, "  error: {}", error.message)?;
    }
    Ok(())
}
