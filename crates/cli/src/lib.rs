pub mod commands;
pub mod logging;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use commands::{ConfigArgs, RunArgs};

#[derive(Debug, Parser)]
#[command(
    name = "quotegen",
    about = "Quote generator API end-to-end harness",
    long_about = "Exercise a deployed quote generator's REST API (companies, quotes, purchase orders) \
                  with lifecycle scenarios that clean up after themselves.",
    after_help = "Examples:\n  quotegen run --base-url https://preview.example.com\n  quotegen run --scenario quotes --json\n  quotegen list\n  quotegen config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run scenarios against the target deployment and print a summary")]
    Run(RunArgs),
    #[command(about = "List scenario names in execution order")]
    List,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config(ConfigArgs),
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run(args) => commands::run::run(&args),
        Command::List => commands::list::run(),
        Command::Config(args) => commands::config::run(&args),
    };

    if !result.output.is_empty() {
        println!("{}", result.output);
    }
    ExitCode::from(result.exit_code)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn run_accepts_repeated_scenarios_and_overrides() {
        let cli = Cli::try_parse_from([
            "quotegen",
            "run",
            "--base-url",
            "https://preview.example.com",
            "--scenario",
            "quotes",
            "--scenario",
            "foreign-keys",
            "--verify-deletes",
            "--json",
        ])
        .expect("arguments should parse");

        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.scenario, ["quotes", "foreign-keys"]);
        assert_eq!(args.target.base_url.as_deref(), Some("https://preview.example.com"));
        assert!(args.target.verify_deletes);
        assert!(args.json);
    }

    #[test]
    fn timeout_must_be_numeric() {
        assert!(Cli::try_parse_from(["quotegen", "run", "--timeout-secs", "soon"]).is_err());
    }
}
