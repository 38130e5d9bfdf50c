use mbl_board::BoardRegistry;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::io::{StdinSource, StdoutSink, TraceSink};

/// The non-template, non-instance state threaded through every tick call:
/// the board registry, the RNG behind `?N`/`??`/`@N`/`&N`, and handles to
/// the ambient stdin/stdout/trace collaborators. Replaces the process
/// globals the reference interpreter used.
pub struct InterpreterContext<'a> {
    pub registry: &'a BoardRegistry,
    pub stdin: &'a mut dyn StdinSource,
    pub stdout: &'a mut dyn StdoutSink,
    pub trace: &'a mut dyn TraceSink,
    pub rng: StdRng,
    /// 0 = silent, 1 = termination reasons, 2+ = per-tick board dumps,
    /// matching the reference interpreter's `-v` counting.
    pub verbosity: u8,
}

impl<'a> InterpreterContext<'a> {
    pub fn new(
        registry: &'a BoardRegistry,
        stdin: &'a mut dyn StdinSource,
        stdout: &'a mut dyn StdoutSink,
        trace: &'a mut dyn TraceSink,
        verbosity: u8,
    ) -> Self {
        Self {
            registry,
            stdin,
            stdout,
            trace,
            rng: StdRng::from_entropy(),
            verbosity,
        }
    }

    /// Build a context with a deterministic RNG, for reproducible tests of
    /// random devices.
    pub fn with_seed(
        registry: &'a BoardRegistry,
        stdin: &'a mut dyn StdinSource,
        stdout: &'a mut dyn StdoutSink,
        trace: &'a mut dyn TraceSink,
        verbosity: u8,
        seed: u64,
    ) -> Self {
        Self {
            registry,
            stdin,
            stdout,
            trace,
            rng: StdRng::seed_from_u64(seed),
            verbosity,
        }
    }
}
