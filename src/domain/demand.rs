use serde::Serialize;
use std::fmt;

use crate::domain::network::topology::Topology;
use crate::domain::utils::id::NodeId;
use crate::error::{Error, Result};

/// A point to point traffic demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Demand {
    pub source: NodeId,
    pub target: NodeId,
    pub volume: f64,
}

impl Demand {
    pub fn new(source: usize, target: usize, volume: f64) -> Self {
        Self { source: NodeId::new(source), target: NodeId::new(target), volume }
    }

    /// Checks that the demand can be routed on `topology`.
    pub fn validate(&self, topology: &Topology) -> Result<()> {
        topology.check_node(self.source)?;
        topology.check_node(self.target)?;

        if self.source == self.target {
            return Err(Error::SelfTargetedDemand(self.source));
        }

        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(Error::InvalidDemandVolume { source_node: self.source, target_node: self.target, volume: self.volume });
        }

        Ok(())
    }
}

impl fmt::Display for Demand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "demand({}, {}), data size: {}", self.source, self.target, self.volume)
    }
}

/// A demand together with the position at which it was added to the planner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegisteredDemand {
    pub registration_index: usize,
    pub demand: Demand,
}
