use crate::domain::utils::id::LinkId;

/// A route through the mesh, consisting of a sequence of links plus the accumulated cost of using them.
///
/// Produced by a single path finder invocation and consumed by the scheduler's commit step.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    links: Vec<LinkId>,
    cost: f64,
}

impl Path {
    /// The empty path at the search origin.
    pub fn origin() -> Self {
        Self { links: Vec::new(), cost: 0.0 }
    }

    /// Placeholder for nodes that have not been reached (yet).
    pub fn unreachable() -> Self {
        Self { links: Vec::new(), cost: f64::INFINITY }
    }

    /// Returns a copy of this path with `link` appended and `cost` added.
    pub fn extended(&self, link: LinkId, cost: f64) -> Self {
        let mut links = Vec::with_capacity(self.links.len() + 1);
        links.extend_from_slice(&self.links);
        links.push(link);

        Self { links, cost: self.cost + cost }
    }

    pub fn links(&self) -> &[LinkId] {
        &self.links
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite()
    }
}

impl From<Path> for Vec<LinkId> {
    fn from(path: Path) -> Self {
        path.links
    }
}
