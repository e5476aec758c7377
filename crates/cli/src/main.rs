use std::process::ExitCode;

fn main() -> ExitCode {
    quotegen_cli::run()
}
