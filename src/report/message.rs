use super::RunStatus;

pub const SUCCESS_MARKER: &str = "😀";
pub const FAILURE_MARKER: &str = "😭";

const DELTA_HEADER: &str = "Coverage since last run:";

pub fn status_line(status: RunStatus, date: &str) -> String {
    match status {
        RunStatus::Passed => format!("{} coverage run {} passed", SUCCESS_MARKER, date),
        RunStatus::Failed => format!("{} coverage run {} FAILED", FAILURE_MARKER, date),
    }
}

/// Status line, then the delta section when there is one, then the runner
/// text verbatim.
pub fn compose_body(status: RunStatus, date: &str, delta: &str, text: &str) -> String {
    let mut body = status_line(status, date);
    body.push_str("\n\n");
    if !delta.is_empty() {
        body.push_str(DELTA_HEADER);
        body.push('\n');
        body.push_str(delta);
        body.push('\n');
    }
    body.push_str(text);
    body
}
