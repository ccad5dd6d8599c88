//! Command parsing and the query engine.
//!
//! A command is a name followed by whitespace-separated arguments. Recognised
//! commands always produce a [`QueryReport`], even when the query itself
//! fails; unrecognised names produce nothing so the caller can report them
//! its own way.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::mode::TravelMode;
use crate::network::{Network, NodeRef};
use crate::output::{kilometres, QueryOutcome, QueryReport};
use crate::routing::{plan_route, validate_route, RouteAlgorithm, RouteRequest};

/// Names of every command the engine understands.
pub const COMMAND_NAMES: [&str; 7] = [
    "MaxDist",
    "MaxLink",
    "FindDist",
    "FindNeighbour",
    "Check",
    "FindRoute",
    "FindShortestRoute",
];

const INVALID_REFERENCE: &str = "Invalid node reference";
const INVALID_REFERENCES: &str = "Invalid node reference(s)";
const INVALID_ARGUMENTS: &str = "Invalid arguments";

/// Minimum Jaro-Winkler similarity for a command name suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// A parsed command.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Farthest pair of places in the network.
    MaxDist,
    /// Longest link in the network.
    MaxLink,
    FindDist {
        from: NodeRef,
        to: NodeRef,
    },
    FindNeighbour {
        node: NodeRef,
    },
    Check {
        mode: TravelMode,
        route: Vec<NodeRef>,
    },
    FindRoute {
        mode: TravelMode,
        start: NodeRef,
        goal: NodeRef,
    },
    FindShortestRoute {
        mode: TravelMode,
        start: NodeRef,
        goal: NodeRef,
    },
}

impl Query {
    /// Parse a command name and its arguments.
    ///
    /// Returns `None` for an unrecognised name, and `Some(Err(..))` when the
    /// name is known but the arguments are unusable.
    pub fn parse<S: AsRef<str>>(name: &str, args: &[S]) -> Option<Result<Query>> {
        let args: Vec<&str> = args.iter().map(|arg| arg.as_ref()).collect();
        let parsed = match name {
            "MaxDist" => expect_arity(name, &args, 0).map(|_| Query::MaxDist),
            "MaxLink" => expect_arity(name, &args, 0).map(|_| Query::MaxLink),
            "FindDist" => expect_arity(name, &args, 2).and_then(|_| {
                Ok(Query::FindDist {
                    from: parse_reference(name, args[0])?,
                    to: parse_reference(name, args[1])?,
                })
            }),
            "FindNeighbour" => expect_arity(name, &args, 1).and_then(|_| {
                Ok(Query::FindNeighbour {
                    node: parse_reference(name, args[0])?,
                })
            }),
            "Check" => parse_check(name, &args),
            "FindRoute" => parse_route_args(name, &args).map(|(mode, start, goal)| {
                Query::FindRoute { mode, start, goal }
            }),
            "FindShortestRoute" => parse_route_args(name, &args)
                .map(|(mode, start, goal)| Query::FindShortestRoute { mode, start, goal }),
            _ => return None,
        };
        Some(parsed)
    }
}

fn invalid_arguments(command: &str, message: impl Into<String>) -> Error {
    Error::InvalidArguments {
        command: command.to_string(),
        message: message.into(),
    }
}

fn expect_arity(command: &str, args: &[&str], expected: usize) -> Result<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(invalid_arguments(
            command,
            format!("expected {expected} argument(s), got {}", args.len()),
        ))
    }
}

fn parse_reference(command: &str, value: &str) -> Result<NodeRef> {
    value
        .parse::<NodeRef>()
        .map_err(|err| invalid_arguments(command, format!("'{value}' is not a node reference: {err}")))
}

fn parse_check(command: &str, args: &[&str]) -> Result<Query> {
    let Some((mode, refs)) = args.split_first() else {
        return Err(invalid_arguments(command, "missing travel mode"));
    };
    if refs.is_empty() {
        return Err(invalid_arguments(command, "expected at least one node reference"));
    }
    let route = refs
        .iter()
        .map(|value| parse_reference(command, value))
        .collect::<Result<Vec<_>>>()?;
    Ok(Query::Check {
        mode: TravelMode::from_name(mode),
        route,
    })
}

fn parse_route_args(command: &str, args: &[&str]) -> Result<(TravelMode, NodeRef, NodeRef)> {
    expect_arity(command, args, 3)?;
    Ok((
        TravelMode::from_name(args[0]),
        parse_reference(command, args[1])?,
        parse_reference(command, args[2])?,
    ))
}

/// Runs queries against a borrowed network.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    network: &'a Network,
    shortest: RouteAlgorithm,
}

impl<'a> QueryEngine<'a> {
    /// Engine answering `FindShortestRoute` with breadth-first search.
    pub fn new(network: &'a Network) -> Self {
        Self {
            network,
            shortest: RouteAlgorithm::Bfs,
        }
    }

    /// Select the minimum-hop algorithm used by `FindShortestRoute`.
    ///
    /// Algorithms without a minimum-hop guarantee are ignored.
    pub fn with_shortest_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        if algorithm.is_shortest() {
            self.shortest = algorithm;
        } else {
            warn!(%algorithm, "algorithm does not minimise hops, keeping {}", self.shortest);
        }
        self
    }

    /// Run a parsed query.
    pub fn run(&self, query: &Query) -> QueryOutcome {
        match query {
            Query::MaxDist => self.max_dist(),
            Query::MaxLink => self.max_link(),
            Query::FindDist { from, to } => self.find_dist(*from, *to),
            Query::FindNeighbour { node } => self.find_neighbour(*node),
            Query::Check { mode, route } => QueryOutcome::RouteCheck {
                hops: validate_route(self.network, *mode, route),
            },
            Query::FindRoute { mode, start, goal } => {
                self.find_route(RouteRequest::depth_first(*mode, *start, *goal))
            }
            Query::FindShortestRoute { mode, start, goal } => self.find_route(RouteRequest {
                start: *start,
                goal: *goal,
                mode: *mode,
                algorithm: self.shortest,
            }),
        }
    }

    /// Parse and run a command. Returns `None` when the name is not recognised.
    pub fn execute<S: AsRef<str>>(&self, name: &str, args: &[S]) -> Option<QueryReport> {
        let parsed = Query::parse(name, args)?;

        let header = std::iter::once(name)
            .chain(args.iter().map(|arg| arg.as_ref()))
            .collect::<Vec<_>>()
            .join(" ");

        let outcome = match parsed {
            Ok(query) => self.run(&query),
            Err(err) => {
                debug!(error = %err, "rejected command arguments");
                QueryOutcome::Error {
                    message: INVALID_ARGUMENTS.to_string(),
                }
            }
        };
        debug!(command = %header, "executed command");

        Some(QueryReport { header, outcome })
    }

    /// Split a raw command line on whitespace and execute it.
    pub fn execute_line(&self, line: &str) -> Option<QueryReport> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next()?;
        let args: Vec<&str> = tokens.collect();
        self.execute(name, &args)
    }

    fn max_dist(&self) -> QueryOutcome {
        let Some(pair) = self.network.farthest_pair() else {
            return QueryOutcome::Fail;
        };
        QueryOutcome::PlaceDistance {
            from: self.network.node_at(pair.from).name().to_string(),
            to: self.network.node_at(pair.to).name().to_string(),
            kilometres: kilometres(pair.distance()),
        }
    }

    fn max_link(&self) -> QueryOutcome {
        let Some(pair) = self.network.longest_link() else {
            return QueryOutcome::Fail;
        };
        QueryOutcome::LinkDistance {
            from: self.network.node_at(pair.from).reference(),
            to: self.network.node_at(pair.to).reference(),
            kilometres: kilometres(pair.distance()),
        }
    }

    fn find_dist(&self, from: NodeRef, to: NodeRef) -> QueryOutcome {
        let (Some(a), Some(b)) = (self.network.node(from), self.network.node(to)) else {
            return QueryOutcome::Error {
                message: INVALID_REFERENCES.to_string(),
            };
        };
        QueryOutcome::PlaceDistance {
            from: a.name().to_string(),
            to: b.name().to_string(),
            kilometres: kilometres(a.position().distance_to(&b.position())),
        }
    }

    fn find_neighbour(&self, node: NodeRef) -> QueryOutcome {
        let Some(node) = self.network.node(node) else {
            return QueryOutcome::Error {
                message: INVALID_REFERENCE.to_string(),
            };
        };
        QueryOutcome::Neighbours {
            references: node.links().iter().map(|link| link.target_ref).collect(),
        }
    }

    fn find_route(&self, request: RouteRequest) -> QueryOutcome {
        match plan_route(self.network, &request) {
            Ok(plan) => QueryOutcome::Route { plan },
            Err(Error::UnknownReference { .. }) => QueryOutcome::Error {
                message: INVALID_REFERENCES.to_string(),
            },
            Err(Error::RouteNotFound { .. }) => QueryOutcome::Fail,
            Err(err) => QueryOutcome::Error {
                message: err.to_string(),
            },
        }
    }
}

/// Execute a command against a network and return its output block.
///
/// `None` means the command name was not recognised and nothing should be
/// emitted.
pub fn execute<S: AsRef<str>>(network: &Network, name: &str, args: &[S]) -> Option<Vec<String>> {
    QueryEngine::new(network)
        .execute(name, args)
        .map(|report| report.lines())
}

/// Split a raw command line and execute it, see [`execute`].
pub fn execute_line(network: &Network, line: &str) -> Option<Vec<String>> {
    QueryEngine::new(network)
        .execute_line(line)
        .map(|report| report.lines())
}

/// Known command names resembling `name`, best match first (at most three).
pub fn suggest_commands(name: &str) -> Vec<String> {
    let needle = name.to_lowercase();
    let mut scored: Vec<(f64, &str)> = COMMAND_NAMES
        .iter()
        .map(|candidate| {
            (
                strsim::jaro_winkler(&needle, &candidate.to_lowercase()),
                *candidate,
            )
        })
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recognises_every_command() {
        assert_eq!(Query::parse::<&str>("MaxDist", &[]).unwrap().unwrap(), Query::MaxDist);
        assert_eq!(Query::parse::<&str>("MaxLink", &[]).unwrap().unwrap(), Query::MaxLink);
        assert_eq!(
            Query::parse("FindDist", &["1", "2"]).unwrap().unwrap(),
            Query::FindDist { from: 1, to: 2 }
        );
        assert_eq!(
            Query::parse("FindNeighbour", &["7"]).unwrap().unwrap(),
            Query::FindNeighbour { node: 7 }
        );
        assert_eq!(
            Query::parse("Check", &["Bus", "1", "2", "3"]).unwrap().unwrap(),
            Query::Check {
                mode: TravelMode::Bus,
                route: vec![1, 2, 3]
            }
        );
        assert_eq!(
            Query::parse("FindRoute", &["Rail", "1", "2"]).unwrap().unwrap(),
            Query::FindRoute {
                mode: TravelMode::Rail,
                start: 1,
                goal: 2
            }
        );
        assert_eq!(
            Query::parse("FindShortestRoute", &["Hovercraft", "1", "2"])
                .unwrap()
                .unwrap(),
            Query::FindShortestRoute {
                mode: TravelMode::Foot,
                start: 1,
                goal: 2
            }
        );
    }

    #[test]
    fn parse_rejects_bad_arguments() {
        assert!(Query::parse("FindDist", &["1"]).unwrap().is_err());
        assert!(Query::parse("FindDist", &["1", "x"]).unwrap().is_err());
        assert!(Query::parse::<&str>("Check", &[]).unwrap().is_err());
        assert!(Query::parse("Check", &["Car"]).unwrap().is_err());
        assert!(Query::parse("FindRoute", &["Car", "1"]).unwrap().is_err());
        assert!(Query::parse("MaxDist", &["1"]).unwrap().is_err());
    }

    #[test]
    fn parse_leaves_unknown_names_unhandled() {
        assert!(Query::parse::<&str>("maxdist", &[]).is_none());
        assert!(Query::parse("Teleport", &["1", "2"]).is_none());
    }

    #[test]
    fn suggestions_rank_close_names() {
        let suggestions = suggest_commands("FindShortest");
        assert_eq!(suggestions.first().map(String::as_str), Some("FindShortestRoute"));
        assert_eq!(suggest_commands("maxdist").first().map(String::as_str), Some("MaxDist"));
        assert!(suggest_commands("zzzz").is_empty());
        assert!(suggest_commands("Find").len() <= 3);
    }
}
