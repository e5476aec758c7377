use std::env;
use std::fs;
use std::path::Path;

use quotegen_core::config::{resolve_config_path, HarnessConfig, DEPLOYMENT_BASE_URL_ENV};
use toml::Value;

use crate::commands::{CommandResult, ConfigArgs};

pub fn run(args: &ConfigArgs) -> CommandResult {
    let config = match HarnessConfig::load(args.load_options()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("config", "config_validation", error.to_string(), 2);
        }
    };

    let config_file_path = resolve_config_path(args.config.as_deref());
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let file = FileSource { doc: config_file_doc.as_ref(), path: config_file_path.as_deref() };

    let mut lines =
        vec!["effective config (source precedence: override > env > file > default):".to_string()];

    lines.push(render_line(
        "target.base_url",
        &config.target.base_url,
        field_source(
            "target.base_url",
            args.base_url.is_some().then_some("--base-url"),
            &["QUOTEGEN_BASE_URL", DEPLOYMENT_BASE_URL_ENV],
            &file,
        ),
    ));
    lines.push(render_line("api base", &config.target.api_base(), "derived".to_string()));
    lines.push(render_line(
        "target.timeout_secs",
        &config.target.timeout_secs.to_string(),
        field_source(
            "target.timeout_secs",
            args.timeout_secs.is_some().then_some("--timeout-secs"),
            &["QUOTEGEN_TIMEOUT_SECS"],
            &file,
        ),
    ));
    lines.push(render_line(
        "run.verify_deletes",
        &config.run.verify_deletes.to_string(),
        field_source(
            "run.verify_deletes",
            args.verify_deletes.then_some("--verify-deletes"),
            &["QUOTEGEN_VERIFY_DELETES"],
            &file,
        ),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        field_source(
            "logging.level",
            None,
            &["QUOTEGEN_LOGGING_LEVEL", "QUOTEGEN_LOG_LEVEL"],
            &file,
        ),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        field_source(
            "logging.format",
            None,
            &["QUOTEGEN_LOGGING_FORMAT", "QUOTEGEN_LOG_FORMAT"],
            &file,
        ),
    ));

    CommandResult::success(lines.join("\n"))
}

struct FileSource<'a> {
    doc: Option<&'a Value>,
    path: Option<&'a Path>,
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    override_flag: Option<&str>,
    env_keys: &[&str],
    file: &FileSource<'_>,
) -> String {
    if let Some(flag) = override_flag {
        return format!("override ({flag})");
    }

    if let Some(env_key) =
        env_keys.iter().find(|key| env::var(key).is_ok_and(|value| !value.trim().is_empty()))
    {
        return format!("env ({env_key})");
    }

    if let Some(doc) = file.doc {
        if contains_path(doc, key_path) {
            let file_path = file
                .path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

#[cfg(test)]
mod tests {
    use super::contains_path;

    #[test]
    fn nested_keys_are_found_by_dotted_path() {
        let doc: toml::Value =
            "[target]\nbase_url = \"http://localhost:4000\"\n".parse().expect("valid toml");

        assert!(contains_path(&doc, "target.base_url"));
        assert!(!contains_path(&doc, "target.timeout_secs"));
        assert!(!contains_path(&doc, "logging.level"));
    }
}
