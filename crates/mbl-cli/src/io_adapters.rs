//! The real, process-backed implementations of the `mbl-engine` I/O
//! traits: a background thread draining stdin into a channel (for the
//! non-blocking `]]` device), an unbuffered stdout sink, and a trace sink
//! that forwards into `tracing` rather than printing directly.

use std::io::{self, Read, Write};
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};

use mbl_engine::{StdinSource, StdoutSink, TraceSink};

/// Spawns the stdin-draining thread and hands back the non-blocking
/// receiver side. The thread exits on its own once stdin reaches EOF.
pub struct StdinThread {
    rx: Receiver<u8>,
    _handle: JoinHandle<()>,
}

impl StdinThread {
    pub fn spawn() -> Self {
        let (tx, rx): (Sender<u8>, Receiver<u8>) = crossbeam_channel::unbounded();
        let handle = std::thread::Builder::new()
            .name("mbl-stdin".into())
            .spawn(move || drain_stdin(tx))
            .expect("failed to spawn stdin reader thread");
        Self {
            rx,
            _handle: handle,
        }
    }
}

fn drain_stdin(tx: Sender<u8>) {
    let mut stdin = io::stdin().lock();
    let mut byte = [0u8; 1];
    loop {
        match stdin.read(&mut byte) {
            Ok(0) => break,
            Ok(_) => {
                if tx.send(byte[0]).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    }
}

impl StdinSource for StdinThread {
    fn try_read_byte(&mut self) -> Option<u8> {
        self.rx.try_recv().ok()
    }
}

/// Writes bytes to the process's real stdout immediately, matching the
/// reference interpreter's non-verbose "visible immediately" behavior.
#[derive(Default)]
pub struct RealStdout;

impl StdoutSink for RealStdout {
    fn write_byte(&mut self, byte: u8) {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(&[byte]);
        let _ = stdout.flush();
    }
}

/// Forwards verbose board dumps and termination-reason lines into
/// `tracing` rather than printing them directly; the subscriber installed
/// in [`crate::logging`] picks stdout or stderr as the writer.
#[derive(Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn emit(&mut self, depth: usize, message: &str) {
        tracing::debug!(target: "mbl_cli::board_trace", depth, "{}", message);
    }
}
