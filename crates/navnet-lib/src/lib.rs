//! navnet library entry points.
//!
//! This crate loads a transport network of places and mode-tagged links into
//! memory, projects place coordinates onto a planar grid, and answers distance,
//! neighbour, route validation and route search queries against it. The CLI
//! should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod loader;
pub mod mode;
pub mod network;
pub mod output;
pub mod path;
pub mod projection;
pub mod query;
pub mod routing;

pub use error::{Error, Result};
pub use loader::{load_network, read_links, read_places};
pub use mode::TravelMode;
pub use network::{Link, LinkRecord, Network, Node, NodePair, NodeRef, PlaceRecord};
pub use output::{QueryOutcome, QueryReport};
pub use path::{find_route_bfs, find_route_dfs, find_route_uniform_cost};
pub use projection::{arc_length_km, project, PlanarPoint};
pub use query::{execute, execute_line, suggest_commands, Query, QueryEngine, COMMAND_NAMES};
pub use routing::{plan_route, validate_route, HopCheck, RouteAlgorithm, RoutePlan, RouteRequest};
