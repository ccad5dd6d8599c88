// Module exports for CLI subcommands
//
// Each module handles one subcommand. main.rs parses arguments and dispatches
// here; both handlers share the network loading below.

pub mod query;
pub mod run;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use navnet_lib::{load_network, Network, RouteAlgorithm};

/// Input tables and engine settings shared by every subcommand.
#[derive(Debug, Clone, Copy)]
pub struct NetworkInputs<'a> {
    pub places: &'a Path,
    pub links: &'a Path,
    pub shortest: RouteAlgorithm,
}

impl NetworkInputs<'_> {
    /// Load and build the network, returning it with the elapsed build time.
    pub fn build(&self) -> Result<(Network, std::time::Duration)> {
        let started = Instant::now();
        let network = load_network(self.places, self.links).with_context(|| {
            format!(
                "failed to build network from {} and {}",
                self.places.display(),
                self.links.display()
            )
        })?;
        let elapsed = started.elapsed();
        info!(
            nodes = network.len(),
            directed_links = network.directed_link_count(),
            elapsed_us = elapsed.as_micros() as u64,
            "network ready"
        );
        Ok((network, elapsed))
    }
}
