//! The Tython CLI.
//!
//! Provides the `tythonc` command:
//!
//! - `tythonc run <file>` - Run a Tython script
//! - `tythonc repl` - Start an interactive session (also the default)
//!
//! Options for `run`:
//! - `--emit-tokens` - Pretty-print the token stream as JSON
//! - `--emit-ast` - Pretty-print the AST as JSON
//!
//! When an emit flag is given, the script is not evaluated.

mod repl;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tythonc", version, about = "The Tython interpreter")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a Tython script
    Run {
        /// Path to the script file
        file: PathBuf,

        /// Pretty-print the token stream as JSON instead of evaluating
        #[arg(long = "emit-tokens")]
        emit_tokens: bool,

        /// Pretty-print the AST as JSON instead of evaluating
        #[arg(long = "emit-ast")]
        emit_ast: bool,
    },
    /// Start an interactive session
    Repl,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run {
            file,
            emit_tokens,
            emit_ast,
        }) => run_file(&file, emit_tokens, emit_ast),
        Some(Commands::Repl) | None => repl::run_repl(),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        process::exit(1);
    }
}

/// Execute the pipeline over a script file, or dump its intermediate
/// artifacts when an emit flag is set.
fn run_file(file: &Path, emit_tokens: bool, emit_ast: bool) -> Result<(), String> {
    let filename = file.display().to_string();
    let source = std::fs::read_to_string(file)
        .map_err(|e| format!("Failed to read '{filename}': {e}"))?;

    if emit_tokens {
        let tokens =
            tython_lexer::Lexer::tokenize(&source).map_err(|e| e.render(&filename, &source))?;
        println!(
            "{}",
            serde_json::to_string_pretty(&tokens).map_err(|e| e.to_string())?
        );
    }

    if emit_ast {
        let ast = tython_parser::parse(&source).map_err(|e| e.render(&filename, &source))?;
        println!(
            "{}",
            serde_json::to_string_pretty(&ast).map_err(|e| e.to_string())?
        );
    }

    if emit_tokens || emit_ast {
        return Ok(());
    }

    tython_interp::run(&source)
        .map(|_| ())
        .map_err(|e| e.render(&filename, &source))
}
