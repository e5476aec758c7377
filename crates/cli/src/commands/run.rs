use clap::Args;
use quotegen_core::config::HarnessConfig;
use quotegen_core::scenarios;
use quotegen_core::{ApiClient, RunOptions, Runner};
use tracing::error;

use crate::commands::{CommandResult, ConfigArgs};
use crate::logging::init_logging;

#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub target: ConfigArgs,
    #[arg(
        long,
        value_name = "NAME",
        help = "Run only the named scenario (repeatable); see `quotegen list`"
    )]
    pub scenario: Vec<String>,
    #[arg(long, help = "Print the machine-readable report after the summary")]
    pub json: bool,
}

pub fn run(args: &RunArgs) -> CommandResult {
    let config = match HarnessConfig::load(args.target.load_options()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("run", "config_validation", error.to_string(), 2);
        }
    };

    let selected = match scenarios::select(&args.scenario) {
        Ok(selected) => selected,
        Err(error) => return CommandResult::failure("run", "unknown_scenario", error.to_string(), 2),
    };

    init_logging(&config.logging);

    let client = match ApiClient::new(&config.target) {
        Ok(client) => client,
        Err(error) => {
            error!(event_name = "harness.client.build_failed", error = %error, "http client build failed");
            return CommandResult::failure("run", "http_client", error.to_string(), 3);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "run",
                "runtime_init",
                format!("failed to build tokio runtime: {error}"),
                3,
            );
        }
    };

    let runner = Runner::new(client, RunOptions::from_config(&config));
    let summary = runtime.block_on(runner.run_all(&selected));

    CommandResult {
        exit_code: summary.exit_code(),
        output: if args.json { summary.to_json() } else { String::new() },
    }
}
