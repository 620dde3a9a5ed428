use serde::Serialize;
use std::fmt;

use crate::domain::cost_model;
use crate::domain::utils::id::{LinkId, NodeId};
use crate::error::{Error, Result};

/// Default fixed cost of activating one capacity module.
pub const MODULE_TURN_ON_COST: f64 = 10.0;

/// Default cost of carrying one unit of data across a link.
pub const LINK_THROUGHPUT_COST: f64 = 0.1;

/// Default maximum throughput of a single module.
pub const LINK_MAX_THROUGHPUT: f64 = 10.0;

/// Immutable cost and capacity parameters of a directed link.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinkParameters {
    /// Cost per unit of data routed across the link.
    pub unit_throughput_cost: f64,

    /// Fixed cost paid once for every module that has to be switched on.
    pub module_turn_on_cost: f64,

    /// Maximum throughput a single module can carry.
    pub module_capacity: f64,
}

impl Default for LinkParameters {
    fn default() -> Self {
        Self { unit_throughput_cost: LINK_THROUGHPUT_COST, module_turn_on_cost: MODULE_TURN_ON_COST, module_capacity: LINK_MAX_THROUGHPUT }
    }
}

impl LinkParameters {
    pub fn new(unit_throughput_cost: f64, module_turn_on_cost: f64, module_capacity: f64) -> Result<Self> {
        let params = Self { unit_throughput_cost, module_turn_on_cost, module_capacity };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.unit_throughput_cost.is_finite() || self.unit_throughput_cost < 0.0 {
            return Err(Error::InvalidLinkParameters(format!("unit throughput cost must be finite and >= 0, got {}", self.unit_throughput_cost)));
        }
        if !self.module_turn_on_cost.is_finite() || self.module_turn_on_cost < 0.0 {
            return Err(Error::InvalidLinkParameters(format!("module turn on cost must be finite and >= 0, got {}", self.module_turn_on_cost)));
        }
        if !self.module_capacity.is_finite() || self.module_capacity <= 0.0 {
            return Err(Error::InvalidLinkParameters(format!("module capacity must be finite and > 0, got {}", self.module_capacity)));
        }
        Ok(())
    }
}

/// A directed link of the full mesh.
///
/// Endpoints and parameters never change after the topology is built. Only the
/// cumulative throughput and the active module count are updated, and only when
/// the scheduler commits a routed demand.
#[derive(Debug, Clone)]
pub struct Link {
    id: LinkId,
    pub source: NodeId,
    pub target: NodeId,
    pub params: LinkParameters,

    /// Sum of the data volumes of every demand routed across this link so far.
    cumulative_throughput: f64,

    /// Always `ceil(cumulative_throughput / module_capacity)`.
    active_modules: u64,
}

impl Link {
    pub fn new(id: LinkId, source: NodeId, target: NodeId, params: LinkParameters) -> Self {
        Self { id, source, target, params, cumulative_throughput: 0.0, active_modules: 0 }
    }

    pub fn id(&self) -> LinkId {
        self.id
    }

    pub fn cumulative_throughput(&self) -> f64 {
        self.cumulative_throughput
    }

    pub fn active_modules(&self) -> u64 {
        self.active_modules
    }

    /// Adds `volume` to the carried throughput and recomputes the module count.
    pub(crate) fn add_throughput(&mut self, volume: f64) {
        self.cumulative_throughput += volume;
        self.active_modules = cost_model::required_modules(self.cumulative_throughput, self.params.module_capacity);
    }

    pub fn state(&self) -> LinkState {
        LinkState {
            id: self.id,
            source: self.source,
            target: self.target,
            cumulative_throughput: self.cumulative_throughput,
            active_modules: self.active_modules,
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link({}, {}), throughput: {}", self.source, self.target, self.cumulative_throughput)
    }
}

/// Point in time snapshot of a link, handed to reporters and written to reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkState {
    pub id: LinkId,
    pub source: NodeId,
    pub target: NodeId,
    pub cumulative_throughput: f64,
    pub active_modules: u64,
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link({}, {}), throughput: {}  {}", self.source, self.target, self.cumulative_throughput, self.active_modules)
    }
}
