use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::mode::TravelMode;
use crate::network::{Link, Network};

fn traversable(mode: TravelMode, link: &Link) -> bool {
    mode.accepts(link.mode)
}

/// Find any mode-compatible route using depth-first search with
/// backtracking.
///
/// Neighbours are tried in link enumeration order. A node, once visited, is
/// never entered again, which keeps the walk finite. The returned route is
/// whichever one the search reaches first; it is not necessarily short.
pub fn find_route_dfs(
    network: &Network,
    start: usize,
    goal: usize,
    mode: TravelMode,
) -> Option<Vec<usize>> {
    if start == goal {
        return Some(vec![start]);
    }

    let mut visited = vec![false; network.len()];
    // Each frame holds a node and the index of the next link to try from it.
    let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
    visited[start] = true;

    while let Some(&(current, cursor)) = stack.last() {
        let next = network
            .node_at(current)
            .links()
            .iter()
            .enumerate()
            .skip(cursor)
            .find(|(_, link)| !visited[link.target] && traversable(mode, link));

        let Some((index, link)) = next else {
            stack.pop();
            continue;
        };

        if let Some(frame) = stack.last_mut() {
            frame.1 = index + 1;
        }

        visited[link.target] = true;
        if link.target == goal {
            let mut route: Vec<usize> = stack.iter().map(|&(node, _)| node).collect();
            route.push(goal);
            return Some(route);
        }
        stack.push((link.target, 0));
    }

    None
}

/// Run breadth-first search for the route with the fewest hops.
pub fn find_route_bfs(
    network: &Network,
    start: usize,
    goal: usize,
    mode: TravelMode,
) -> Option<Vec<usize>> {
    if start == goal {
        return Some(vec![start]);
    }

    let mut parents: Vec<Option<usize>> = vec![None; network.len()];
    let mut seen = vec![false; network.len()];
    let mut queue = VecDeque::new();

    seen[start] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for link in network.node_at(current).links() {
            let next = link.target;
            if seen[next] || !traversable(mode, link) {
                continue;
            }

            seen[next] = true;
            parents[next] = Some(current);
            if next == goal {
                return Some(reconstruct_path(&parents, start, goal));
            }
            queue.push_back(next);
        }
    }

    None
}

/// Run a uniform-cost (Dijkstra) search where every link costs one hop.
///
/// Produces a route with the same hop count as [`find_route_bfs`]; the goal
/// is accepted when it is popped from the queue rather than when discovered.
pub fn find_route_uniform_cost(
    network: &Network,
    start: usize,
    goal: usize,
    mode: TravelMode,
) -> Option<Vec<usize>> {
    if start == goal {
        return Some(vec![start]);
    }

    let mut hops: Vec<Option<u32>> = vec![None; network.len()];
    let mut parents: Vec<Option<usize>> = vec![None; network.len()];
    let mut queue = BinaryHeap::new();

    hops[start] = Some(0);
    queue.push(QueueEntry::new(start, 0));

    while let Some(entry) = queue.pop() {
        match hops[entry.node] {
            Some(best) if best < entry.cost => continue,
            Some(_) => {}
            None => continue,
        }

        if entry.node == goal {
            return Some(reconstruct_path(&parents, start, goal));
        }

        for link in network.node_at(entry.node).links() {
            if !traversable(mode, link) {
                continue;
            }

            let next = link.target;
            let next_cost = entry.cost + 1;
            if hops[next].map_or(true, |known| next_cost < known) {
                hops[next] = Some(next_cost);
                parents[next] = Some(entry.node);
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    None
}

fn reconstruct_path(parents: &[Option<usize>], start: usize, goal: usize) -> Vec<usize> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents[node];
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: usize,
    cost: u32,
}

impl QueueEntry {
    fn new(node: usize, cost: u32) -> Self {
        Self { node, cost }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{LinkRecord, PlaceRecord};

    fn place(reference: i64, latitude: f64) -> PlaceRecord {
        PlaceRecord {
            reference,
            name: format!("P{reference}"),
            latitude,
            longitude: -0.3,
        }
    }

    fn link(start: i64, end: i64, mode: &str) -> LinkRecord {
        LinkRecord {
            start,
            end,
            mode: mode.to_string(),
        }
    }

    /// 1 - 2 - 3 - 4 by Rail, plus a direct 1 - 4 Car link inserted last.
    fn ladder() -> Network {
        let places = (1..=4).map(|r| place(r, 53.0 + r as f64 * 0.01));
        let links = vec![
            link(1, 2, "Rail"),
            link(2, 3, "Rail"),
            link(3, 4, "Rail"),
            link(1, 4, "Car"),
        ];
        Network::build(places, links)
    }

    fn slots(network: &Network, refs: &[i64]) -> Vec<usize> {
        refs.iter().map(|r| network.slot(*r).unwrap()).collect()
    }

    #[test]
    fn dfs_follows_enumeration_order() {
        let network = ladder();
        let route = find_route_dfs(&network, 0, 3, TravelMode::Foot).unwrap();
        assert_eq!(route, slots(&network, &[1, 2, 3, 4]));
    }

    #[test]
    fn bfs_prefers_fewest_hops() {
        let network = ladder();
        let route = find_route_bfs(&network, 0, 3, TravelMode::Foot).unwrap();
        assert_eq!(route, slots(&network, &[1, 4]));
    }

    #[test]
    fn uniform_cost_matches_bfs_hop_count() {
        let network = ladder();
        for mode in TravelMode::ALL {
            let bfs = find_route_bfs(&network, 0, 3, mode);
            let ucs = find_route_uniform_cost(&network, 0, 3, mode);
            assert_eq!(bfs.map(|r| r.len()), ucs.map(|r| r.len()), "mode {mode}");
        }
    }

    #[test]
    fn mode_restrictions_prune_links() {
        let network = ladder();
        assert_eq!(
            find_route_bfs(&network, 0, 3, TravelMode::Rail).unwrap(),
            slots(&network, &[1, 2, 3, 4])
        );
        assert!(find_route_dfs(&network, 0, 3, TravelMode::Bike).is_none());
        assert!(find_route_uniform_cost(&network, 0, 3, TravelMode::Ship).is_none());
    }

    #[test]
    fn dfs_backtracks_out_of_dead_ends() {
        // 1 links first to a dead end at 5, then onwards to 2.
        let places = vec![place(1, 53.0), place(5, 53.05), place(2, 53.01)];
        let links = vec![link(1, 5, "Foot"), link(1, 2, "Foot")];
        let network = Network::build(places, links);

        let route = find_route_dfs(&network, 0, 2, TravelMode::Foot).unwrap();
        assert_eq!(route, slots(&network, &[1, 2]));
    }

    #[test]
    fn start_equal_goal_is_single_node() {
        let network = ladder();
        assert_eq!(find_route_dfs(&network, 2, 2, TravelMode::Rail), Some(vec![2]));
        assert_eq!(find_route_bfs(&network, 2, 2, TravelMode::Rail), Some(vec![2]));
        assert_eq!(
            find_route_uniform_cost(&network, 2, 2, TravelMode::Rail),
            Some(vec![2])
        );
    }
}
