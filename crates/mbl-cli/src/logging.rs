//! Tracing subscriber setup. The `-v` count selects a max level (matching
//! the reference interpreter's own `verbose` counter); `--stderr` selects
//! the writer. There is no file appender here — unlike the reference
//! `oxidized` project's editor, this is a one-shot CLI with no alternate
//! screen to keep clean, so stdout/stderr are fair game directly.

use tracing::level_filters::LevelFilter;

pub fn init(verbosity: u8, to_stderr: bool) {
    // The engine itself gates whether a trace line is produced at all
    // (termination reasons at verbosity >= 1, per-tick dumps at
    // verbosity >= 3, see `mbl_engine::tick` and `crate::run`); the
    // subscriber just needs to let debug-level events through once any
    // tracing is wanted.
    let level = if verbosity > 0 {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .without_time()
        .with_target(false);

    let result = if to_stderr {
        builder.with_writer(std::io::stderr).try_init()
    } else {
        builder.with_writer(std::io::stdout).try_init()
    };

    // A subscriber is already installed (e.g. in tests); that's fine, the
    // first one wins.
    let _ = result;
}
