use std::process::ExitCode;

fn main() -> ExitCode {
    schemalens::cli::run()
}
