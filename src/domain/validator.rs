use thiserror::Error;

use crate::domain::cost_model;
use crate::domain::demand::Demand;
use crate::domain::network::topology::Topology;
use crate::domain::routing::path::Path;
use crate::domain::utils::id::{LinkId, NodeId};

/// Relative tolerance of the flow balance, throughput is accumulated in `f64`.
const FLOW_TOLERANCE: f64 = 1e-6;

/// A broken solver invariant. These indicate a defect in the algorithm, never bad input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("{demand} was assigned an empty path")]
    EmptyPath { demand: Demand },

    /// `position` is the index of the first link that does not continue the chain,
    /// or the path length if the chain ends at the wrong node.
    #[error("path of {demand} is not contiguous at position {position}")]
    DiscontiguousPath { demand: Demand, position: usize },

    #[error("node {node} is unbalanced by {imbalance}")]
    FlowNotConserved { node: NodeId, imbalance: f64 },

    #[error("link {link} carries {throughput} on {actual} active modules, expected {expected}")]
    ModuleCountMismatch { link: LinkId, throughput: f64, expected: u64, actual: u64 },
}

/// Checks that `path` leads from the demand's source to its target without gaps.
pub fn validate_path_consistency(topology: &Topology, path: &Path, demand: &Demand) -> Result<(), InvariantViolation> {
    if path.is_empty() {
        return Err(InvariantViolation::EmptyPath { demand: *demand });
    }

    let mut at = demand.source;
    for (position, link_id) in path.links().iter().enumerate() {
        let link = topology.link(*link_id);
        if link.source != at {
            return Err(InvariantViolation::DiscontiguousPath { demand: *demand, position });
        }
        at = link.target;
    }

    if at != demand.target {
        return Err(InvariantViolation::DiscontiguousPath { demand: *demand, position: path.len() });
    }

    Ok(())
}

/// Checks per node that committed throughput and demanded volume balance out:
/// `inflow - outflow + originating - terminating == 0`.
///
/// Every unbalanced node is reported, not only the first one.
pub fn validate_flow_conservation<'a>(topology: &Topology, demands: impl IntoIterator<Item = &'a Demand>) -> Result<(), Vec<InvariantViolation>> {
    let mut balance = vec![0.0_f64; topology.node_count()];
    let mut total_volume = 0.0;

    for link in topology.links() {
        balance[link.target.index] += link.cumulative_throughput();
        balance[link.source.index] -= link.cumulative_throughput();
    }

    for demand in demands {
        balance[demand.source.index] += demand.volume;
        balance[demand.target.index] -= demand.volume;
        total_volume += demand.volume;
    }

    let tolerance = FLOW_TOLERANCE * total_volume.max(1.0);
    let violations: Vec<InvariantViolation> = balance
        .into_iter()
        .enumerate()
        .filter(|(_, imbalance)| imbalance.abs() > tolerance)
        .map(|(node, imbalance)| InvariantViolation::FlowNotConserved { node: NodeId::new(node), imbalance })
        .collect();

    if violations.is_empty() { Ok(()) } else { Err(violations) }
}

/// Checks `active_modules == ceil(cumulative_throughput / module_capacity)` on every link.
pub fn validate_module_counts(topology: &Topology) -> Result<(), InvariantViolation> {
    for link in topology.links() {
        let expected = cost_model::required_modules(link.cumulative_throughput(), link.params.module_capacity);
        if link.active_modules() != expected {
            return Err(InvariantViolation::ModuleCountMismatch {
                link: link.id(),
                throughput: link.cumulative_throughput(),
                expected,
                actual: link.active_modules(),
            });
        }
    }
    Ok(())
}
