pub mod config;
pub mod list;
pub mod run;

use std::path::PathBuf;

use clap::Args;
use quotegen_core::config::{ConfigOverrides, LoadOptions};
use serde::Serialize;

pub use run::RunArgs;

/// Target and file flags shared by `run` and `config`.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    #[arg(long, value_name = "PATH", help = "Config file to load instead of quotegen.toml")]
    pub config: Option<PathBuf>,
    #[arg(long, value_name = "URL", help = "Deployment base URL, e.g. http://localhost:3000")]
    pub base_url: Option<String>,
    #[arg(long, value_name = "SECS", help = "Per-request timeout in seconds")]
    pub timeout_secs: Option<u64>,
    #[arg(long, help = "Re-read every deleted record and fail if it is still served")]
    pub verify_deletes: bool,
}

impl ConfigArgs {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                base_url: self.base_url.clone(),
                timeout_secs: self.timeout_secs,
                verify_deletes: self.verify_deletes.then_some(true),
                ..ConfigOverrides::default()
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
