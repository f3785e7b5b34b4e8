//! Terminal front end for the padcalc engine.
//!
//! Maps line input onto the engine's key events and prints each update.
//! This is deliberately thin host glue; everything interesting lives in the
//! library.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use padcalc::{Calculator, Key, Notice, Outcome, ThemePrefs, Update, evaluate, normalize};

#[derive(Debug, Parser)]
#[command(name = "padcalc", about = "Keypad calculator engine")]
struct Args {
    /// Evaluate one expression and exit.
    #[arg(long)]
    expr: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Some(expr) = args.expr {
        if let Some(output) = one_shot(&expr) {
            println!("{output}");
        }
        return Ok(());
    }

    repl()
}

/// Evaluate one expression as the `--expr` flag does, returning the line
/// that gets printed (nothing for blank input).
fn one_shot(expr: &str) -> Option<String> {
    match evaluate(&normalize(expr), true) {
        Outcome::Value(result) => Some(result),
        Outcome::Error => Some("Error".to_string()),
        Outcome::Empty => None,
    }
}

fn repl() -> Result<()> {
    let theme_path = ThemePrefs::default_path();
    let mut theme = ThemePrefs::load(&theme_path).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "could not load theme preferences, using defaults");
        ThemePrefs::default()
    });
    let mut calc = Calculator::new();

    println!("padcalc: type to insert; =, clear, back, m+, m-, mr, mc, theme, quit");
    print_prompt()?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        match input {
            "quit" | "q" => break,
            "theme" => {
                theme.toggle(&theme_path)?;
                println!("theme: {}", if theme.dark_mode { "dark" } else { "light" });
            }
            "=" => render(&calc.on_key(Key::Equals)),
            "clear" | "c" => render(&calc.on_key(Key::Clear)),
            "back" | "<" => render(&calc.on_key(Key::Backspace)),
            "m+" => render(&calc.on_key(Key::MemoryAdd)),
            "m-" => render(&calc.on_key(Key::MemorySubtract)),
            "mr" => render(&calc.on_key(Key::MemoryRecall)),
            "mc" => render(&calc.on_key(Key::MemoryClear)),
            _ => {
                let mut last = None;
                for key in keys_for(input) {
                    last = Some(calc.on_key(key));
                }
                if let Some(update) = last {
                    render(&update);
                }
            }
        }
        print_prompt()?;
    }
    Ok(())
}

fn print_prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

/// Translate typed text into keypad events. ASCII `*` and `/` stand in for
/// the `×` and `÷` keys; `sqrt(` and `log(` are the function keys.
fn keys_for(input: &str) -> Vec<Key> {
    let mut keys = Vec::new();
    let mut rest = input;
    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix("sqrt(") {
            keys.push(Key::Function("sqrt(".to_string()));
            rest = tail;
            continue;
        }
        if let Some(tail) = rest.strip_prefix("log10(").or_else(|| rest.strip_prefix("log(")) {
            keys.push(Key::Function("log10(".to_string()));
            rest = tail;
            continue;
        }
        let mut chars = rest.chars();
        let Some(c) = chars.next() else { break };
        rest = chars.as_str();
        match c {
            '0'..='9' => keys.push(Key::Digit(c)),
            '.' => keys.push(Key::Dot),
            '+' | '-' | '%' | '×' | '÷' => keys.push(Key::Operator(c)),
            '*' => keys.push(Key::Operator('×')),
            '/' => keys.push(Key::Operator('÷')),
            '√' => keys.push(Key::Function("sqrt(".to_string())),
            '(' | ')' => keys.push(Key::Paren(c)),
            _ => {} // whitespace and anything unmapped is dropped
        }
    }
    keys
}

fn render(update: &Update) {
    if let Some(notice) = update.notice {
        let message = match notice {
            Notice::MemoryAdded => "Added to Memory",
            Notice::MemorySubtracted => "Subtracted from Memory",
            Notice::MemoryCleared => "Memory Cleared",
        };
        println!("[{message}]");
    }
    if let Some(committed) = &update.committed {
        println!("{} =", committed.expression);
    }
    println!("  {}", update.expression);
    if !update.preview.is_empty() {
        println!("  → {}", update.preview);
    }
}
