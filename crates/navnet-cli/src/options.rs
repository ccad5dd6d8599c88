use clap::ValueEnum;

use navnet_lib::RouteAlgorithm;

/// Algorithm used to answer `FindShortestRoute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ShortestStrategy {
    /// Breadth-first search.
    #[default]
    Bfs,
    /// Uniform-cost search with every link weighted as one hop.
    UniformCost,
}

impl From<ShortestStrategy> for RouteAlgorithm {
    fn from(strategy: ShortestStrategy) -> Self {
        match strategy {
            ShortestStrategy::Bfs => RouteAlgorithm::Bfs,
            ShortestStrategy::UniformCost => RouteAlgorithm::UniformCost,
        }
    }
}
