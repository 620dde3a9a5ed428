use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::domain::cost_model;
use crate::domain::network::topology::Topology;
use crate::domain::routing::link_pool::LinkPool;
use crate::domain::routing::path::Path;
use crate::domain::utils::id::NodeId;

/// Tentative cost to reach a node. Ordered by cost, then by node id.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    cost: f64,
    node: NodeId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost.total_cmp(&other.cost).then_with(|| self.node.cmp(&other.node))
    }
}

/// Least marginal cost search over the current link state.
///
/// Edge weights come from [`cost_model::marginal_cost`] evaluated against the load
/// committed so far, which is non-negative, so a label setting search is exact for
/// the state it observes.
pub struct PathFinder<'a> {
    topology: &'a Topology,
}

impl<'a> PathFinder<'a> {
    pub fn new(topology: &'a Topology) -> Self {
        Self { topology }
    }

    /// Finds the cheapest path for `volume` units from `source` to `target`, searching every link.
    pub fn find(&self, source: NodeId, target: NodeId, volume: f64) -> Path {
        self.find_in_pool(LinkPool::full(self.topology), source, target, volume)
    }

    /// Same as [`PathFinder::find`] restricted to the links of `pool`.
    ///
    /// Returns [`Path::unreachable`] if `target` cannot be reached.
    pub fn find_in_pool(&self, mut pool: LinkPool, source: NodeId, target: NodeId, volume: f64) -> Path {
        let mut best: Vec<Path> = vec![Path::unreachable(); self.topology.node_count()];
        let mut queue: BinaryHeap<Reverse<QueueEntry>> = BinaryHeap::new();

        best[source.index] = Path::origin();
        queue.push(Reverse(QueueEntry { cost: 0.0, node: source }));

        while let Some(Reverse(entry)) = queue.peek().copied() {
            // Nothing left in the queue can beat the target's label once it is popped or matched.
            if entry.node == target || entry.cost >= best[target.index].cost() {
                break;
            }
            queue.pop();

            if entry.cost > best[entry.node.index].cost() {
                continue;
            }

            let visited = entry.node;

            for link_id in pool.outgoing(self.topology, visited) {
                let link = self.topology.link(link_id);
                let step = cost_model::marginal_cost(link, volume);
                let cost = best[visited.index].cost() + step;

                if cost < best[link.target.index].cost() {
                    best[link.target.index] = best[visited.index].extended(link_id, step);
                    queue.push(Reverse(QueueEntry { cost, node: link.target }));
                }
            }

            // A settled node is never entered again.
            pool.exclude_incoming(self.topology, visited);
        }

        let path = best.swap_remove(target.index);

        if path.is_reachable() {
            log::debug!("Path found {} => {}: {} links, cost {}", source, target, path.len(), path.cost());
        } else {
            log::debug!("NoPathFound: {} => {}", source, target);
        }

        path
    }
}
