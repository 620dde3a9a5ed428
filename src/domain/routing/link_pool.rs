use crate::domain::network::topology::Topology;
use crate::domain::utils::id::{LinkId, NodeId};

/// The set of links a single path search may still traverse.
///
/// Every link index of the topology starts in the pool; pruned links are only
/// marked, so removal is O(1) and the pool never outlives its search.
#[derive(Debug, Clone)]
pub struct LinkPool {
    excluded: Vec<bool>,
    available: usize,
}

impl LinkPool {
    /// A pool containing every link of `topology`.
    pub fn full(topology: &Topology) -> Self {
        Self { excluded: vec![false; topology.link_count()], available: topology.link_count() }
    }

    pub fn contains(&self, link_id: LinkId) -> bool {
        self.excluded.get(link_id.index).is_some_and(|excluded| !excluded)
    }

    pub fn exclude(&mut self, link_id: LinkId) {
        if let Some(excluded) = self.excluded.get_mut(link_id.index) {
            if !*excluded {
                *excluded = true;
                self.available -= 1;
            }
        }
    }

    /// Prunes every link that ends in `node`.
    pub fn exclude_incoming(&mut self, topology: &Topology, node: NodeId) {
        for link_id in topology.incoming(node) {
            self.exclude(*link_id);
        }
    }

    /// Outgoing links of `node` that are still part of the pool.
    pub fn outgoing<'a>(&'a self, topology: &'a Topology, node: NodeId) -> impl Iterator<Item = LinkId> + 'a {
        topology.outgoing(node).iter().copied().filter(|link_id| self.contains(*link_id))
    }

    pub fn available(&self) -> usize {
        self.available
    }
}
