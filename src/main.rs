use std::process::ExitCode;

fn main() -> ExitCode {
    surveyor::cli::run()
}
