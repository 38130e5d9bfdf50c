use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use mbl_cli::{run_with, Cli};

fn tempdir() -> PathBuf {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut dir = std::env::temp_dir();
    dir.push(format!("mbl-cli-e2e-{}-{}", std::process::id(), n));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    path
}

fn cli(board: PathBuf, inputs: Vec<u8>) -> Cli {
    Cli {
        board,
        inputs,
        use_return: false,
        verbose: 0,
        stderr: false,
    }
}

#[test]
fn wrong_input_count_is_rejected_without_running() {
    let dir = tempdir();
    let board = write_file(&dir, "mismatch.mbl", "}0\n++\n{0\n");
    let err = run_with(cli(board, vec![])).unwrap_err();
    assert!(matches!(err, mbl_cli::CliError::InputCountMismatch { expected: 1, given: 0, .. }));
}

#[test]
fn return_flag_uses_port_zero_output_as_exit_code() {
    let dir = tempdir();
    let board = write_file(&dir, "ret.mbl", "}0\n  \n{0\n");
    let mut args = cli(board, vec![7]);
    args.use_return = true;
    let code = run_with(args).unwrap();
    assert_eq!(code, 7);
}

#[test]
fn include_directive_inlines_the_named_board() {
    let dir = tempdir();
    write_file(&dir, "fn.mbl", ":FN\n}0\n++\n{0\n");
    let main = write_file(&dir, "main.mbl", "FN\n#include fn.mbl\n");
    let code = run_with(cli(main, vec![])).unwrap();
    assert_eq!(code, 0);
}

#[test]
fn include_cycle_is_a_fatal_error() {
    let dir = tempdir();
    let main = write_file(&dir, "self_include.mbl", "#include self_include.mbl\n");
    let err = run_with(cli(main, vec![])).unwrap_err();
    assert!(matches!(err, mbl_cli::CliError::IncludeCycle { .. }));
}

#[test]
fn missing_board_file_surfaces_an_io_error() {
    let dir = tempdir();
    let missing = dir.join("does-not-exist.mbl");
    let err = run_with(cli(missing, vec![])).unwrap_err();
    assert!(matches!(err, mbl_cli::CliError::Io { .. }));
}
