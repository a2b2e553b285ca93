mod replay;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use keyboard_extension_core::Config;
use serde::Serialize;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "kbext")]
#[command(about = "Keyboard extension panel logic: diacritic folding and session replay")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fold text; reads stdin line by line when no text is given
    Normalize {
        text: Vec<String>,
    },
    /// Print the effective fold table
    Table {
        /// Emit JSON instead of one mapping per line
        #[arg(long)]
        json: bool,
    },
    /// Run a JSON session script against the simulated host
    Replay {
        script: PathBuf,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Serialize)]
struct TableEntry {
    from: char,
    to: char,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_toml(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn run_normalize(config: &Config, text: &[String]) -> Result<()> {
    let table = config.fold_table();
    if !text.is_empty() {
        println!("{}", table.fold(&text.join(" ")));
        return Ok(());
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        println!("{}", table.fold(&line));
    }
    Ok(())
}

fn run_table(config: &Config, json: bool) -> Result<()> {
    let entries = config.fold_table().entries();
    if json {
        let entries: Vec<TableEntry> = entries
            .into_iter()
            .map(|(from, to)| TableEntry { from, to })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for (from, to) in &entries {
            println!("{} U+{:04X} -> {}", from, *from as u32, to);
        }
        println!("{} mappings", entries.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Normalize { text } => run_normalize(&config, &text),
        Commands::Table { json } => run_table(&config, json),
        Commands::Replay { script } => replay::run(&script, config),
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}
