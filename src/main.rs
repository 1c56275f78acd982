// File: src/main.rs
//
// Main entry point for the Rill language interpreter.
// Handles command-line argument parsing and dispatches to the appropriate
// subcommand (run or repl).

use clap::{Parser as ClapParser, Subcommand};
use colored::Colorize;
use rill::interpreter::Interpreter;
use rill::repl::Repl;
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(ClapParser)]
#[command(
    name = "rill",
    about = "Rill: a tiny imperative scripting language",
    version = env!("CARGO_PKG_VERSION"),
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[command(arg_required_else_help = true)]
enum Commands {
    /// Run a Rill script file
    Run {
        /// Path to the .rill file
        file: PathBuf,
    },

    /// Launch the interactive Rill REPL
    Repl,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { file } => {
            let code = match fs::read_to_string(&file) {
                Ok(code) => code,
                Err(err) => {
                    eprintln!(
                        "{} Failed to read {}: {}",
                        "Error:".bright_red(),
                        file.display(),
                        err
                    );
                    process::exit(1);
                }
            };
            let mut interpreter = Interpreter::new();
            interpreter.run(&code);
        }

        Commands::Repl => {
            let mut repl = match Repl::new() {
                Ok(repl) => repl,
                Err(err) => {
                    eprintln!("{} Failed to start REPL: {}", "Error:".bright_red(), err);
                    process::exit(1);
                }
            };
            if let Err(err) = repl.run() {
                eprintln!("{} {}", "Error:".bright_red(), err);
                process::exit(1);
            }
        }
    }
}
