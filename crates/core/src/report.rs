use chrono::{Local, NaiveDateTime};
use tracing::{event, Level};

const SECTION_RULE: usize = 60;
const BANNER_RULE: usize = 80;

/// Check events mirror lines already on stdout, so they stay below the
/// default `warn` level.
pub const CHECK_PASS_LEVEL: Level = Level::DEBUG;
pub const CHECK_FAIL_LEVEL: Level = Level::INFO;

/// Console reporter. Writes straight to stdout and keeps no state.
#[derive(Clone, Copy, Debug, Default)]
pub struct Reporter;

impl Reporter {
    pub fn record(&self, name: &str, passed: bool, details: &str) {
        let now = Local::now().naive_local();
        print!("{}", format_record(now, name, passed, details));

        if passed {
            event!(
                CHECK_PASS_LEVEL,
                event_name = "harness.check.pass",
                check = name,
                details = details,
                "check passed"
            );
        } else {
            event!(
                CHECK_FAIL_LEVEL,
                event_name = "harness.check.fail",
                check = name,
                details = details,
                "check failed"
            );
        }
    }

    pub fn section(&self, title: &str) {
        let rule = "=".repeat(SECTION_RULE);
        println!("{rule}\n{title}\n{rule}");
    }

    pub fn step(&self, number: u32, description: &str) {
        println!("{number}. {description}");
    }

    pub fn banner(&self, api_base: &str) {
        println!("Starting backend API tests for Quote Generator");
        println!("Testing against: {api_base}");
        println!("{}", "=".repeat(BANNER_RULE));
    }

    pub fn summary(&self, results: &[(&str, bool)]) {
        for line in render_summary(results) {
            println!("{line}");
        }
    }
}

pub fn marker(passed: bool) -> &'static str {
    if passed {
        "PASS"
    } else {
        "FAIL"
    }
}

/// One check as printed: header line, optional indented details, blank separator.
pub fn format_record(timestamp: NaiveDateTime, name: &str, passed: bool, details: &str) -> String {
    let mut out = format!("[{}] {} - {name}\n", timestamp.format("%Y-%m-%d %H:%M:%S"), marker(passed));
    if !details.is_empty() {
        out.push_str(&format!("    Details: {details}\n"));
    }
    out.push('\n');
    out
}

pub fn render_summary(results: &[(&str, bool)]) -> Vec<String> {
    let rule = "=".repeat(BANNER_RULE);
    let mut lines = vec![rule.clone(), "TEST SUMMARY".to_string(), rule];

    let passed = results.iter().filter(|(_, passed)| *passed).count();
    let failed = results.len() - passed;

    lines.extend(results.iter().map(|(name, passed)| format!("{} - {name}", marker(*passed))));
    lines.push(String::new());
    lines.push(format!("Results: {passed} passed, {failed} failed"));
    lines.push(if failed == 0 {
        "All backend API tests passed successfully!".to_string()
    } else {
        "Some tests failed. Check the details above.".to_string()
    });
    lines
}
