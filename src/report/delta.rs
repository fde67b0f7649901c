use std::collections::HashMap;

use super::{PackageCoverageSummary, coverage_suffix};

const NEW_PACKAGE_LABEL: &str = "new: ";
const ARROW: &str = " --> ";

/// One line of the day-over-day section, one per package in today's summary.
#[derive(Debug, PartialEq, Eq)]
pub enum DeltaLine<'a> {
    New {
        current: &'a str,
    },
    Changed {
        previous: &'a str,
        current: &'a str,
    },
}

impl DeltaLine<'_> {
    pub fn render(&self) -> String {
        match *self {
            DeltaLine::New { current } => format!("{}{}", NEW_PACKAGE_LABEL, current),
            DeltaLine::Changed { previous, current } => {
                // Lines without a coverage figure are shown whole.
                let current = coverage_suffix(current).unwrap_or(current);
                format!("{}{}{}", previous, ARROW, current)
            }
        }
    }
}

pub fn delta_lines<'a>(
    previous: &'a HashMap<String, String>,
    today: &'a PackageCoverageSummary,
) -> Vec<DeltaLine<'a>> {
    today
        .iter()
        .map(|(package, current)| match previous.get(package) {
            Some(previous) => DeltaLine::Changed {
                previous: previous.as_str(),
                current,
            },
            None => DeltaLine::New { current },
        })
        .collect()
}

/// Renders today's summary against the JSON record of the prior day.
/// Anything that does not parse as a string map yields an empty section.
pub fn compose_delta(previous: &[u8], today: &PackageCoverageSummary) -> String {
    let previous: HashMap<String, String> = match serde_json::from_slice(previous) {
        Ok(previous) => previous,
        Err(e) => {
            tracing::debug!("no usable prior record: {}", e);
            return String::new();
        }
    };

    let mut section = String::new();
    for line in delta_lines(&previous, today) {
        section.push_str(&line.render());
        section.push('\n');
    }
    section
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn summary(entries: &[(&str, &str)]) -> PackageCoverageSummary {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn changed_package_shows_previous_and_current_coverage() {
        let previous = br#"{"common\t": "ok  \tgithub.com/x/common\t0.3s\tcoverage: 75.0% of statements"}"#;
        let today = summary(&[(
            "common\t",
            "ok  \tgithub.com/x/common\t0.2s\tcoverage: 80.0% of statements",
        )]);
        let delta = compose_delta(previous, &today);
        assert!(delta.contains("75.0% of statements --> coverage: 80.0% of statements"));
        assert_eq!(
            delta,
            "ok  \tgithub.com/x/common\t0.3s\tcoverage: 75.0% of statements --> coverage: 80.0% of statements\n"
        );
    }

    #[test]
    fn unseen_package_is_labelled_new() {
        let previous = br#"{"core\t": "ok  core coverage: 10.0% of statements"}"#;
        let today = summary(&[
            ("common\t", "ok  common coverage: 1.0% of statements"),
            ("core\t", "ok  core coverage: 12.0% of statements"),
        ]);
        assert_eq!(
            compose_delta(previous, &today),
            "new: ok  common coverage: 1.0% of statements\n\
             ok  core coverage: 10.0% of statements --> coverage: 12.0% of statements\n"
        );
    }

    #[test]
    fn packages_only_in_previous_are_dropped() {
        let previous = br#"{"gone\t": "ok gone coverage: 5.0%"}"#;
        assert_eq!(compose_delta(previous, &PackageCoverageSummary::new()), "");
    }

    #[test]
    fn line_without_coverage_is_kept_whole() {
        let previous = br#"{"cmd\t": "ok  cmd coverage: 3.0% of statements"}"#;
        let today = summary(&[("cmd\t", "ok  \tgithub.com/x/cmd\t0.1s\t[no statements]")]);
        assert_eq!(
            compose_delta(previous, &today),
            "ok  cmd coverage: 3.0% of statements --> ok  \tgithub.com/x/cmd\t0.1s\t[no statements]\n"
        );
    }

    #[test]
    fn empty_or_broken_previous_gives_empty_section() {
        let today = summary(&[("common\t", "ok common coverage: 80.0%")]);
        assert_eq!(compose_delta(b"", &today), "");
        assert_eq!(compose_delta(b"not json", &today), "");
        assert_eq!(compose_delta(b"[1, 2]", &today), "");
    }
}
