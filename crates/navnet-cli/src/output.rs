//! Output formatting for query reports and run progress.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;

use navnet_lib::{suggest_commands, QueryReport};

/// Supported formats for the `query` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// The same text block written to the output file by `run`.
    #[default]
    Text,
    /// The typed report serialised as pretty JSON.
    Json,
}

impl OutputFormat {
    /// Render a report in this format.
    pub fn render(self, report: &QueryReport) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(report.render()),
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(report)
                    .context("failed to serialise query report")?;
                json.push('\n');
                Ok(json)
            }
        }
    }
}

/// Progress line printed after a timed step, e.g. `BuildNetwork - 42 microseconds`.
pub fn timing_line(label: &str, elapsed: Duration) -> String {
    format!("{label} - {} microseconds", elapsed.as_micros())
}

/// Diagnostic for a command line the engine did not recognise.
pub fn unrecognised_message(line: &str) -> String {
    let mut message = format!("*** Error *** {line}");
    let name = line.split_whitespace().next().unwrap_or_default();
    let suggestions = suggest_commands(name);
    if !suggestions.is_empty() {
        message.push_str(&format!(" (did you mean {}?)", suggestions.join(", ")));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use navnet_lib::QueryOutcome;

    fn sample_report() -> QueryReport {
        QueryReport {
            header: "FindNeighbour 1".to_string(),
            outcome: QueryOutcome::Neighbours {
                references: vec![2, 3],
            },
        }
    }

    #[test]
    fn text_format_matches_output_block() {
        let rendered = OutputFormat::Text.render(&sample_report()).unwrap();
        assert_eq!(rendered, "FindNeighbour 1\n2\n3\n\n");
    }

    #[test]
    fn json_format_tags_outcome_kind() {
        let rendered = OutputFormat::Json.render(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["header"], "FindNeighbour 1");
        assert_eq!(value["outcome"]["kind"], "neighbours");
        assert_eq!(value["outcome"]["references"], serde_json::json!([2, 3]));
    }

    #[test]
    fn timing_line_reports_microseconds() {
        assert_eq!(
            timing_line("BuildNetwork", Duration::from_micros(1500)),
            "BuildNetwork - 1500 microseconds"
        );
    }

    #[test]
    fn unrecognised_message_suggests_close_names() {
        let message = unrecognised_message("FindShortest Car 1 2");
        assert!(message.starts_with("*** Error *** FindShortest Car 1 2"));
        assert!(message.contains("FindShortestRoute"));
        assert_eq!(unrecognised_message("zzz"), "*** Error *** zzz");
    }
}
