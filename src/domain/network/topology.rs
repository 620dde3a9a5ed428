use crate::domain::cost_model;
use crate::domain::network::link::{Link, LinkParameters, LinkState};
use crate::domain::routing::path::Path;
use crate::domain::utils::id::{LinkId, NodeId};
use crate::error::{Error, Result};

/// Models the complete directed mesh.
///
/// The `Topology` exclusively owns all links. It manages:
/// * **Nodes**: the dense range `[0, node_count)`.
/// * **Links**: one link per ordered pair of distinct nodes, indexed by a fixed bijection.
/// * **Adjacency**: outgoing and incoming link lists per node, used for graph traversal.
///
/// Readers (path finder, validator, reporters) borrow it immutably. Link load is only
/// changed through a [`LinkCommitter`], which the scheduler obtains for its commit step.
#[derive(Debug, Clone)]
pub struct Topology {
    node_count: usize,

    /// All links, `links[i].id() == LinkId::new(i)`.
    links: Vec<Link>,

    /// Maps a node to its outgoing links, ordered by ascending target.
    outgoing: Vec<Vec<LinkId>>,

    /// Maps a node to its incoming links, ordered by ascending source.
    incoming: Vec<Vec<LinkId>>,
}

impl Topology {
    /// Builds the full mesh for `node_count` nodes with identical parameters on every link.
    pub fn new(node_count: usize, params: LinkParameters) -> Result<Self> {
        Self::with_overrides(node_count, params, &[])
    }

    /// Builds the full mesh, replacing the parameters of the listed `(source, target)` links.
    pub fn with_overrides(node_count: usize, params: LinkParameters, overrides: &[(NodeId, NodeId, LinkParameters)]) -> Result<Self> {
        if node_count < 2 {
            return Err(Error::InvalidNodeCount(node_count));
        }
        params.validate()?;

        // 1. Init links in index order, all unloaded.
        let link_count = node_count * (node_count - 1);
        let mut links = Vec::with_capacity(link_count);
        for index in 0..link_count {
            let (source, target) = Self::endpoints_of(node_count, index);
            links.push(Link::new(LinkId::new(index), source, target, params));
        }

        let mut topology = Topology { node_count, links, outgoing: Vec::new(), incoming: Vec::new() };

        // 2. Apply per link parameter overrides.
        for (source, target, link_params) in overrides {
            topology.check_node(*source)?;
            topology.check_node(*target)?;
            if source == target {
                return Err(Error::InvalidLinkParameters(format!("override for self loop {} -> {} is not a link of the mesh", source, target)));
            }
            link_params.validate()?;

            let link_id = Self::index_of(node_count, *source, *target);
            topology.links[link_id.index].params = *link_params;
        }

        // 3. Build the adjacency lists.
        topology.setup_adjacency();

        log::debug!("Topology built: {} nodes, {} links, {} overrides", node_count, link_count, overrides.len());

        Ok(topology)
    }

    fn setup_adjacency(&mut self) {
        let mut outgoing = vec![Vec::with_capacity(self.node_count - 1); self.node_count];
        let mut incoming = vec![Vec::with_capacity(self.node_count - 1); self.node_count];

        for link in &self.links {
            outgoing[link.source.index].push(link.id());
            incoming[link.target.index].push(link.id());
        }

        self.outgoing = outgoing;
        self.incoming = incoming;
    }

    /// Position of link `(source, target)` in the link arena.
    ///
    /// Row `source` holds the `node_count - 1` links leaving it, the self loop column is skipped.
    fn index_of(node_count: usize, source: NodeId, target: NodeId) -> LinkId {
        let column = if target.index < source.index { target.index } else { target.index - 1 };
        LinkId::new(source.index * (node_count - 1) + column)
    }

    fn endpoints_of(node_count: usize, index: usize) -> (NodeId, NodeId) {
        let source = index / (node_count - 1);
        let column = index % (node_count - 1);
        let target = if column >= source { column + 1 } else { column };
        (NodeId::new(source), NodeId::new(target))
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.node_count).map(NodeId::new)
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        node.index < self.node_count
    }

    pub fn check_node(&self, node: NodeId) -> Result<()> {
        if self.contains_node(node) { Ok(()) } else { Err(Error::NodeOutOfRange { node, node_count: self.node_count }) }
    }

    /// Returns the link `source -> target`, or `None` for self loops and unknown nodes.
    pub fn link_id(&self, source: NodeId, target: NodeId) -> Option<LinkId> {
        if source == target || !self.contains_node(source) || !self.contains_node(target) {
            return None;
        }
        Some(Self::index_of(self.node_count, source, target))
    }

    pub fn endpoints(&self, link_id: LinkId) -> Option<(NodeId, NodeId)> {
        self.links.get(link_id.index).map(|link| (link.source, link.target))
    }

    /// # Panics
    ///
    /// Panics if `link_id` does not belong to this topology.
    pub fn link(&self, link_id: LinkId) -> &Link {
        &self.links[link_id.index]
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn outgoing(&self, node: NodeId) -> &[LinkId] {
        &self.outgoing[node.index]
    }

    pub fn incoming(&self, node: NodeId) -> &[LinkId] {
        &self.incoming[node.index]
    }

    pub fn link_states(&self) -> Vec<LinkState> {
        self.links.iter().map(Link::state).collect()
    }

    /// The goal function: module activation plus throughput cost summed over all links.
    pub fn total_cost(&self) -> f64 {
        self.links.iter().map(cost_model::provisioning_cost).sum()
    }

    /// Grants mutable access to link load for the commit step.
    pub(crate) fn committer(&mut self) -> LinkCommitter<'_> {
        LinkCommitter { topology: self }
    }
}

/// The only handle through which link load can change.
pub(crate) struct LinkCommitter<'a> {
    topology: &'a mut Topology,
}

impl LinkCommitter<'_> {
    /// Adds `volume` to every link of `path`.
    pub fn commit(&mut self, path: &Path, volume: f64) {
        for link_id in path.links() {
            self.topology.links[link_id.index].add_throughput(volume);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_mesh() {
        assert!(matches!(Topology::new(0, LinkParameters::default()), Err(Error::InvalidNodeCount(0))));
        assert!(matches!(Topology::new(1, LinkParameters::default()), Err(Error::InvalidNodeCount(1))));
        assert!(Topology::new(2, LinkParameters::default()).is_ok());
    }

    #[test]
    fn test_link_index_is_a_bijection() {
        let topology = Topology::new(5, LinkParameters::default()).unwrap();
        assert_eq!(topology.link_count(), 20);

        for (index, link) in topology.links().iter().enumerate() {
            assert_eq!(link.id(), LinkId::new(index));
            assert_ne!(link.source, link.target);
            assert_eq!(topology.link_id(link.source, link.target), Some(link.id()));
        }

        // Original ordering: 0->1, 0->2, ..., 1->0, 1->2, ...
        assert_eq!(topology.endpoints(LinkId::new(0)), Some((NodeId::new(0), NodeId::new(1))));
        assert_eq!(topology.endpoints(LinkId::new(4)), Some((NodeId::new(1), NodeId::new(0))));
        assert_eq!(topology.endpoints(LinkId::new(5)), Some((NodeId::new(1), NodeId::new(2))));
        assert_eq!(topology.link_id(NodeId::new(2), NodeId::new(2)), None);
        assert_eq!(topology.link_id(NodeId::new(0), NodeId::new(5)), None);
    }

    #[test]
    fn test_adjacency_covers_every_link_once() {
        let topology = Topology::new(4, LinkParameters::default()).unwrap();
        for node in topology.nodes() {
            assert_eq!(topology.outgoing(node).len(), 3);
            assert_eq!(topology.incoming(node).len(), 3);
            assert!(topology.outgoing(node).iter().all(|id| topology.link(*id).source == node));
            assert!(topology.incoming(node).iter().all(|id| topology.link(*id).target == node));
        }
    }

    #[test]
    fn test_links_start_unloaded() {
        let topology = Topology::new(3, LinkParameters::default()).unwrap();
        assert!(topology.links().iter().all(|link| link.cumulative_throughput() == 0.0 && link.active_modules() == 0));
        assert_eq!(topology.total_cost(), 0.0);
    }

    #[test]
    fn test_overrides() {
        let cheap = LinkParameters::new(0.0, 1.0, 100.0).unwrap();
        let topology = Topology::with_overrides(3, LinkParameters::default(), &[(NodeId::new(2), NodeId::new(0), cheap)]).unwrap();
        let link_id = topology.link_id(NodeId::new(2), NodeId::new(0)).unwrap();
        assert_eq!(topology.link(link_id).params, cheap);
        assert_eq!(topology.link(LinkId::new(0)).params, LinkParameters::default());

        let self_loop = Topology::with_overrides(3, LinkParameters::default(), &[(NodeId::new(1), NodeId::new(1), cheap)]);
        assert!(matches!(self_loop, Err(Error::InvalidLinkParameters(_))));

        let unknown = Topology::with_overrides(3, LinkParameters::default(), &[(NodeId::new(1), NodeId::new(3), cheap)]);
        assert!(matches!(unknown, Err(Error::NodeOutOfRange { .. })));
    }
}
