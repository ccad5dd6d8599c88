use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::mode::TravelMode;
use crate::network::{Network, NodeRef};
use crate::path::{find_route_bfs, find_route_dfs, find_route_uniform_cost};

/// Supported route search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Depth-first search with backtracking (any route).
    DepthFirst,
    /// Breadth-first search (fewest hops).
    Bfs,
    /// Uniform-cost search with unit link weights (fewest hops).
    UniformCost,
}

impl RouteAlgorithm {
    /// Whether the algorithm guarantees a minimum-hop route.
    pub fn is_shortest(self) -> bool {
        matches!(self, RouteAlgorithm::Bfs | RouteAlgorithm::UniformCost)
    }
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::DepthFirst => "depth_first",
            RouteAlgorithm::Bfs => "bfs",
            RouteAlgorithm::UniformCost => "uniform_cost",
        };
        f.write_str(value)
    }
}

/// High-level route search request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: NodeRef,
    pub goal: NodeRef,
    pub mode: TravelMode,
    pub algorithm: RouteAlgorithm,
}

impl RouteRequest {
    /// Convenience constructor for minimum-hop BFS routes.
    pub fn bfs(mode: TravelMode, start: NodeRef, goal: NodeRef) -> Self {
        Self {
            start,
            goal,
            mode,
            algorithm: RouteAlgorithm::Bfs,
        }
    }

    /// Convenience constructor for depth-first routes.
    pub fn depth_first(mode: TravelMode, start: NodeRef, goal: NodeRef) -> Self {
        Self {
            start,
            goal,
            mode,
            algorithm: RouteAlgorithm::DepthFirst,
        }
    }
}

/// Route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub mode: TravelMode,
    pub start: NodeRef,
    pub goal: NodeRef,
    pub steps: Vec<NodeRef>,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Compute a route using the requested algorithm.
pub fn plan_route(network: &Network, request: &RouteRequest) -> Result<RoutePlan> {
    let start = network
        .slot(request.start)
        .ok_or(Error::UnknownReference {
            reference: request.start,
        })?;
    let goal = network.slot(request.goal).ok_or(Error::UnknownReference {
        reference: request.goal,
    })?;

    let route = match request.algorithm {
        RouteAlgorithm::DepthFirst => find_route_dfs(network, start, goal, request.mode),
        RouteAlgorithm::Bfs => find_route_bfs(network, start, goal, request.mode),
        RouteAlgorithm::UniformCost => find_route_uniform_cost(network, start, goal, request.mode),
    };
    let Some(route) = route else {
        return Err(Error::RouteNotFound {
            start: request.start,
            goal: request.goal,
        });
    };

    Ok(RoutePlan {
        algorithm: request.algorithm,
        mode: request.mode,
        start: request.start,
        goal: request.goal,
        steps: route
            .into_iter()
            .map(|slot| network.node_at(slot).reference())
            .collect(),
    })
}

/// Verdict for one consecutive pair of a checked route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HopCheck {
    pub from: NodeRef,
    pub to: NodeRef,
    pub passed: bool,
}

/// Walk a proposed route hop by hop.
///
/// A hop passes when a link joins the pair and `mode` accepts it. Checking
/// stops at the first failing hop, so the returned list ends with the only
/// failure, if any. References missing from the network fail their hop.
pub fn validate_route(network: &Network, mode: TravelMode, route: &[NodeRef]) -> Vec<HopCheck> {
    let mut hops = Vec::with_capacity(route.len().saturating_sub(1));
    for pair in route.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let passed = network
            .link(from, to)
            .is_some_and(|link| mode.accepts(link.mode));
        hops.push(HopCheck { from, to, passed });
        if !passed {
            break;
        }
    }
    hops
}
