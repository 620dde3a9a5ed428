use serde::Serialize;

use crate::domain::demand::Demand;
use crate::domain::network::link::LinkState;
use crate::domain::utils::id::LinkId;

/// The routing decision the scheduler committed for one demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingDecision {
    /// 1 based position in commit order.
    pub sequence: usize,
    pub demand: Demand,
    pub path: Vec<LinkId>,

    /// Sum of marginal link costs, evaluated against the link state as of this demand.
    pub cost: f64,

    /// Goal function value right after the commit.
    pub goal_after: f64,
}

/// Outcome of a full solve.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveReport {
    pub decisions: Vec<RoutingDecision>,
    pub links: Vec<LinkState>,
    pub total_cost: f64,
}

impl SolveReport {
    /// Links that carry any traffic.
    pub fn active_links(&self) -> impl Iterator<Item = &LinkState> {
        self.links.iter().filter(|link| link.active_modules > 0)
    }

    pub fn total_modules(&self) -> u64 {
        self.links.iter().map(|link| link.active_modules).sum()
    }
}
