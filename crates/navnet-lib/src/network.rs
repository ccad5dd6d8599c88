use std::collections::HashMap;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::{debug, warn};

use crate::mode::TravelMode;
use crate::projection::{project, PlanarPoint};

/// Stable integer reference identifying a place.
pub type NodeRef = i64;

/// Parsed row of the places table.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceRecord {
    pub reference: NodeRef,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Parsed row of the links table. The mode is kept as text and resolved
/// during the build.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRecord {
    pub start: NodeRef,
    pub end: NodeRef,
    pub mode: String,
}

/// Directed, mode-tagged connection from one node to a neighbour.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// Arena slot of the destination node.
    pub target: usize,
    pub target_ref: NodeRef,
    /// Square of the planar distance in metres.
    pub squared_distance: f64,
    pub mode: TravelMode,
}

impl Link {
    /// Planar length of the link in metres.
    pub fn distance(&self) -> f64 {
        self.squared_distance.sqrt()
    }
}

/// A place in the network together with its outgoing links.
#[derive(Debug, Clone)]
pub struct Node {
    reference: NodeRef,
    name: String,
    position: PlanarPoint,
    links: Vec<Link>,
    link_index: HashMap<usize, usize>,
}

impl Node {
    fn new(reference: NodeRef, name: String, position: PlanarPoint) -> Self {
        Self {
            reference,
            name,
            position,
            links: Vec::new(),
            link_index: HashMap::new(),
        }
    }

    pub fn reference(&self) -> NodeRef {
        self.reference
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> PlanarPoint {
        self.position
    }

    /// Outgoing links in enumeration order (first time each neighbour was linked).
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Link towards the node stored in arena slot `target`, if any.
    pub fn link_to(&self, target: usize) -> Option<&Link> {
        self.link_index.get(&target).map(|&index| &self.links[index])
    }

    fn set_link(&mut self, link: Link) {
        match self.link_index.get(&link.target) {
            Some(&index) => self.links[index] = link,
            None => {
                self.link_index.insert(link.target, self.links.len());
                self.links.push(link);
            }
        }
    }
}

/// Pair of nodes (by arena slot) and the squared distance between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodePair {
    pub from: usize,
    pub to: usize,
    pub squared_distance: f64,
}

impl NodePair {
    pub fn distance(&self) -> f64 {
        self.squared_distance.sqrt()
    }
}

/// Owning arena of every node, built once and read by all queries.
#[derive(Debug, Clone, Default)]
pub struct Network {
    nodes: Vec<Node>,
    slots: HashMap<NodeRef, usize>,
    farthest_pair: OnceCell<Option<NodePair>>,
    longest_link: OnceCell<Option<NodePair>>,
}

impl Network {
    /// Build the network from parsed place and link records.
    ///
    /// A repeated place reference replaces the name and coordinates of the
    /// earlier node while keeping its enumeration position. Links naming a
    /// reference that is not in the places table are skipped. Both cases are
    /// logged at `warn` level.
    pub fn build<P, L>(places: P, links: L) -> Self
    where
        P: IntoIterator<Item = PlaceRecord>,
        L: IntoIterator<Item = LinkRecord>,
    {
        let mut network = Network::default();

        for place in places {
            let position = project(place.latitude, place.longitude);
            match network.slots.get(&place.reference) {
                Some(&slot) => {
                    warn!(
                        reference = place.reference,
                        "duplicate place reference, later record replaces earlier one"
                    );
                    let node = &mut network.nodes[slot];
                    node.name = place.name;
                    node.position = position;
                }
                None => {
                    network.slots.insert(place.reference, network.nodes.len());
                    network
                        .nodes
                        .push(Node::new(place.reference, place.name, position));
                }
            }
        }

        let mut installed = 0usize;
        let mut skipped_links = 0usize;
        for link in links {
            let (Some(&from), Some(&to)) =
                (network.slots.get(&link.start), network.slots.get(&link.end))
            else {
                skipped_links += 1;
                continue;
            };

            let mode = TravelMode::from_name(&link.mode);
            let squared_distance = network.nodes[from]
                .position
                .squared_distance_to(&network.nodes[to].position);

            network.nodes[from].set_link(Link {
                target: to,
                target_ref: link.end,
                squared_distance,
                mode,
            });
            network.nodes[to].set_link(Link {
                target: from,
                target_ref: link.start,
                squared_distance,
                mode,
            });
            installed += 1;
        }

        if skipped_links > 0 {
            warn!(
                skipped_links,
                "ignored link records referencing unknown places"
            );
        }
        debug!(
            nodes = network.nodes.len(),
            links = installed,
            "built transport network"
        );

        network
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in enumeration order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Arena slot for a node reference.
    pub fn slot(&self, reference: NodeRef) -> Option<usize> {
        self.slots.get(&reference).copied()
    }

    /// Node stored in an arena slot. Slots come from [`Network::slot`] or
    /// [`Link::target`].
    pub(crate) fn node_at(&self, slot: usize) -> &Node {
        &self.nodes[slot]
    }

    /// Lookup a node by reference.
    pub fn node(&self, reference: NodeRef) -> Option<&Node> {
        self.slot(reference).map(|slot| &self.nodes[slot])
    }

    /// Directed link between two references, if both exist and are connected.
    pub fn link(&self, from: NodeRef, to: NodeRef) -> Option<&Link> {
        let from = self.slot(from)?;
        let to = self.slot(to)?;
        self.nodes[from].link_to(to)
    }

    /// Total number of directed links.
    pub fn directed_link_count(&self) -> usize {
        self.nodes.iter().map(|node| node.links.len()).sum()
    }

    /// Farthest pair of distinct nodes, compared by planar distance.
    ///
    /// Pairs are examined in enumeration order and only a strictly greater
    /// distance replaces the current best, so ties keep the first pair. The
    /// result is computed once and cached.
    pub fn farthest_pair(&self) -> Option<NodePair> {
        *self.farthest_pair.get_or_init(|| {
            let mut best: Option<NodePair> = None;
            for (from, a) in self.nodes.iter().enumerate() {
                for (offset, b) in self.nodes[from + 1..].iter().enumerate() {
                    let squared_distance = a.position.squared_distance_to(&b.position);
                    if best.map_or(true, |current| squared_distance > current.squared_distance) {
                        best = Some(NodePair {
                            from,
                            to: from + 1 + offset,
                            squared_distance,
                        });
                    }
                }
            }
            best
        })
    }

    /// Longest existing link. Same tie-breaking and caching as
    /// [`Network::farthest_pair`].
    pub fn longest_link(&self) -> Option<NodePair> {
        *self.longest_link.get_or_init(|| {
            let mut best: Option<NodePair> = None;
            for (from, node) in self.nodes.iter().enumerate() {
                for link in &node.links {
                    if best.map_or(true, |current| link.squared_distance > current.squared_distance)
                    {
                        best = Some(NodePair {
                            from,
                            to: link.target,
                            squared_distance: link.squared_distance,
                        });
                    }
                }
            }
            best
        })
    }
}
