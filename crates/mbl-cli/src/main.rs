fn main() {
    let outcome: anyhow::Result<i32> = mbl_cli::run().map_err(anyhow::Error::from);
    match outcome {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    }
}
