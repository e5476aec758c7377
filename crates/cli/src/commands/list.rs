use quotegen_core::scenarios;

use crate::commands::CommandResult;

pub fn run() -> CommandResult {
    let lines: Vec<String> = scenarios::all()
        .iter()
        .map(|scenario| format!("{:<16} {}", scenario.slug(), scenario.title()))
        .collect();
    CommandResult::success(lines.join("\n"))
}
