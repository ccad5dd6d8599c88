use serde::Serialize;

use crate::network::NodeRef;
use crate::routing::{HopCheck, RoutePlan};

/// Planar metres to the kilometres shown in result lines.
const METRES_TO_KILOMETRES: f64 = 0.001;

/// Convert a planar distance in metres to displayed kilometres.
pub fn kilometres(metres: f64) -> f64 {
    metres * METRES_TO_KILOMETRES
}

/// Typed result of a single query, before it is turned into text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// Distance between two named places.
    PlaceDistance {
        from: String,
        to: String,
        kilometres: f64,
    },
    /// Length of a link between two references.
    LinkDistance {
        from: NodeRef,
        to: NodeRef,
        kilometres: f64,
    },
    Neighbours {
        references: Vec<NodeRef>,
    },
    RouteCheck {
        hops: Vec<HopCheck>,
    },
    Route {
        plan: RoutePlan,
    },
    /// The query ran but found nothing (no route, empty network).
    Fail,
    /// The query could not run, e.g. because a reference does not resolve.
    Error {
        message: String,
    },
}

impl QueryOutcome {
    /// Result lines, without header or separator.
    pub fn lines(&self) -> Vec<String> {
        match self {
            QueryOutcome::PlaceDistance {
                from,
                to,
                kilometres,
            } => vec![format!("{from},{to},{kilometres:.3}")],
            QueryOutcome::LinkDistance {
                from,
                to,
                kilometres,
            } => vec![format!("{from},{to},{kilometres:.3}")],
            QueryOutcome::Neighbours { references } => {
                references.iter().map(ToString::to_string).collect()
            }
            QueryOutcome::RouteCheck { hops } => hops
                .iter()
                .map(|hop| {
                    let verdict = if hop.passed { "PASS" } else { "FAIL" };
                    format!("{},{},{verdict}", hop.from, hop.to)
                })
                .collect(),
            QueryOutcome::Route { plan } => plan.steps.iter().map(ToString::to_string).collect(),
            QueryOutcome::Fail => vec!["FAIL".to_string()],
            QueryOutcome::Error { message } => vec![format!("ERROR: {message}")],
        }
    }
}

/// A query outcome together with the header echoing the request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryReport {
    pub header: String,
    pub outcome: QueryOutcome,
}

impl QueryReport {
    /// Full output block: header, result lines and a blank separator line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(self.header.clone());
        lines.extend(self.outcome.lines());
        lines.push(String::new());
        lines
    }

    /// Block joined into text, every line newline-terminated.
    pub fn render(&self) -> String {
        let mut buffer = String::new();
        for line in self.lines() {
            buffer.push_str(&line);
            buffer.push('\n');
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::TravelMode;
    use crate::routing::RouteAlgorithm;

    #[test]
    fn distances_use_three_decimals() {
        let outcome = QueryOutcome::PlaceDistance {
            from: "Hull".to_string(),
            to: "Beverley".to_string(),
            kilometres: 12.3456,
        };
        assert_eq!(outcome.lines(), vec!["Hull,Beverley,12.346"]);

        let outcome = QueryOutcome::LinkDistance {
            from: 1,
            to: 2,
            kilometres: 0.0,
        };
        assert_eq!(outcome.lines(), vec!["1,2,0.000"]);
    }

    #[test]
    fn report_block_ends_with_blank_line() {
        let report = QueryReport {
            header: "FindRoute Rail 1 3".to_string(),
            outcome: QueryOutcome::Route {
                plan: RoutePlan {
                    algorithm: RouteAlgorithm::DepthFirst,
                    mode: TravelMode::Rail,
                    start: 1,
                    goal: 3,
                    steps: vec![1, 2, 3],
                },
            },
        };
        assert_eq!(report.lines(), vec!["FindRoute Rail 1 3", "1", "2", "3", ""]);
        assert_eq!(report.render(), "FindRoute Rail 1 3\n1\n2\n3\n\n");
    }

    #[test]
    fn check_lines_report_verdicts() {
        let outcome = QueryOutcome::RouteCheck {
            hops: vec![
                HopCheck {
                    from: 1,
                    to: 2,
                    passed: true,
                },
                HopCheck {
                    from: 2,
                    to: 9,
                    passed: false,
                },
            ],
        };
        assert_eq!(outcome.lines(), vec!["1,2,PASS", "2,9,FAIL"]);
    }

    #[test]
    fn failures_render_labels() {
        assert_eq!(QueryOutcome::Fail.lines(), vec!["FAIL"]);
        let error = QueryOutcome::Error {
            message: "Invalid node reference".to_string(),
        };
        assert_eq!(error.lines(), vec!["ERROR: Invalid node reference"]);
    }
}
