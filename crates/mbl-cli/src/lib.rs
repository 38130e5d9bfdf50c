//! The Marbelous CLI: argument parsing, `#include` file loading, and the
//! top-level tick loop that drives the root `MB` board to completion. The
//! interpreter core lives in `mbl-board` (parsing) and `mbl-engine`
//! (ticking); this crate is the thin collaborator the core spec calls out
//! as out of scope for the language semantics themselves.

mod error;
mod io_adapters;
mod loader;
pub mod logging;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use mbl_board::{split_boards, BoardRegistry, PortKind};
use mbl_engine::{dump_active_chain, resolve_all, tick, BoardInstance, InterpreterContext, TickResult};

pub use error::CliError;

/// `marbelous board.mbl [inputs...] [-r] [-v...] [--stderr]`, matching
/// the reference interpreter's `argparse` surface (§6.3).
#[derive(Parser, Debug)]
#[command(name = "mbl", version, about = "Interpret a Marbelous board")]
pub struct Cli {
    /// Path to the main board file.
    #[arg(value_name = "board.mbl")]
    pub board: PathBuf,

    /// Inputs for the main board, decimal 0-255.
    #[arg(value_name = "input", value_parser = clap::value_parser!(u8))]
    pub inputs: Vec<u8>,

    /// Use the main board's port-0 output as the process exit code.
    #[arg(short = 'r', long = "return")]
    pub use_return: bool,

    /// Increase verbosity; repeat for more (-v, -vv, -vvv, -vvvv).
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Send verbose trace output to stderr instead of stdout.
    #[arg(long = "stderr")]
    pub stderr: bool,
}

/// Parse arguments, load and run the board, and return the process exit
/// code the caller should use. Never itself calls `std::process::exit` —
/// that's `main`'s job, so tests can call this in-process.
pub fn run() -> Result<i32, CliError> {
    let cli = Cli::parse();
    run_with(cli)
}

pub fn run_with(cli: Cli) -> Result<i32, CliError> {
    logging::init(cli.verbose, cli.stderr);

    let lines = loader::load_lines(&cli.board)?;
    let groups = split_boards(&lines);
    let mut registry = BoardRegistry::from_grouped(groups)?;
    resolve_all(&mut registry)?;

    let root = registry.get("MB").ok_or(CliError::MissingMainBoard)?;
    if cli.inputs.len() != root.inputs.len() {
        return Err(CliError::InputCountMismatch {
            board: cli.board.display().to_string(),
            expected: root.inputs.len(),
            given: cli.inputs.len(),
        });
    }

    let mut instance = BoardInstance::from_template(root, 0);
    for (i, value) in cli.inputs.iter().enumerate() {
        instance.populate_input(i as u8, *value);
    }

    let mut stdin_source = io_adapters::StdinThread::spawn();
    let mut stdout_sink = io_adapters::RealStdout;
    let mut trace_sink = io_adapters::TracingSink;

    let has_port0_output = root.outputs.contains_key(&PortKind::Indexed(0));

    {
        let mut ctx = InterpreterContext::new(
            &registry,
            &mut stdin_source,
            &mut stdout_sink,
            &mut trace_sink,
            cli.verbose,
        );

        if cli.verbose >= 3 {
            dump_active_chain(&instance, &mut *ctx.trace);
        }
        while tick(&mut instance, &mut ctx) == TickResult::Running {
            if cli.verbose >= 3 {
                dump_active_chain(&instance, &mut *ctx.trace);
            }
        }
    }

    if cli.verbose > 0 && !instance.buffered_stdout.is_empty() {
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(&instance.buffered_stdout);
        let _ = stdout.flush();
    }

    let mut exit_code = 0;
    if cli.use_return && has_port0_output {
        if let Some(coords) = root.outputs.get(&PortKind::Indexed(0)) {
            let mut sum = 0u8;
            let mut found = false;
            for &(y, x) in coords {
                if let Some(v) = *instance.marbles.get(y, x) {
                    sum = sum.wrapping_add(v);
                    found = true;
                }
            }
            if found {
                exit_code = sum as i32;
            }
        }
    }

    Ok(exit_code)
}
