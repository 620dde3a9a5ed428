use thiserror::Error;

use crate::domain::demand::Demand;
use crate::domain::utils::id::NodeId;
use crate::domain::validator::InvariantViolation;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse planner configuration JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to write link state CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("A full mesh needs at least 2 nodes, got {0}")]
    InvalidNodeCount(usize),

    #[error("Node {node} is out of range, the network has {node_count} nodes")]
    NodeOutOfRange { node: NodeId, node_count: usize },

    #[error("Demand from node {0} targets its own source")]
    SelfTargetedDemand(NodeId),

    #[error("Demand {source_node} -> {target_node} has invalid data volume {volume}, expected a finite value >= 0")]
    InvalidDemandVolume { source_node: NodeId, target_node: NodeId, volume: f64 },

    #[error("Invalid link parameters: {0}")]
    InvalidLinkParameters(String),

    #[error("Invalid workload: {0}")]
    InvalidWorkload(String),

    #[error("Unknown demand order '{0}'")]
    UnknownDemandOrder(String),

    #[error("The planner has already been solved, create a new instance for another run")]
    AlreadySolved,

    #[error("No path available for {demand}")]
    UnreachableDestination { demand: Demand },

    #[error("Routing {demand} would overflow the link cost or throughput to a non finite value")]
    CostOverflow { demand: Demand },

    #[error("Solver invariant violated: {0}")]
    InvariantViolation(#[from] InvariantViolation),

    #[error("Flow conservation violated at {} node(s): {:?}", .0.len(), .0)]
    FlowNotConserved(Vec<InvariantViolation>),
}

pub type Result<T> = std::result::Result<T, Error>;
