use crate::domain::network::link::LinkState;
use crate::domain::report::RoutingDecision;

/// Target of the structured solver events.
pub const ANALYTICS_TARGET: &str = "analytics";

/// Receives the solver's events for external inspection.
///
/// Reporters are write only, nothing they do feeds back into routing.
pub trait Reporter {
    /// Called once per committed demand, `path_links` holds the state of the path's links after the commit.
    fn on_demand_routed(&mut self, decision: &RoutingDecision, path_links: &[LinkState]);

    /// Called once after every demand has been committed and the final state was validated.
    fn on_solve_finished(&mut self, links: &[LinkState], total_cost: f64);
}

/// Emits every event as a `tracing` event on [`ANALYTICS_TARGET`].
#[derive(Debug, Default)]
pub struct LogReporter;

impl LogReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for LogReporter {
    fn on_demand_routed(&mut self, decision: &RoutingDecision, path_links: &[LinkState]) {
        tracing::info!(
            target: ANALYTICS_TARGET,
            LogDescription = "Demand routed",
            Sequence = decision.sequence,
            Demand = %decision.demand,
            Cost = decision.cost,
            PathLength = decision.path.len(),
            GoalFunction = decision.goal_after,
        );

        for link in path_links {
            tracing::debug!(target: ANALYTICS_TARGET, Sequence = decision.sequence, Link = %link);
        }
    }

    fn on_solve_finished(&mut self, links: &[LinkState], total_cost: f64) {
        for link in links {
            tracing::debug!(target: ANALYTICS_TARGET, Link = %link);
        }

        tracing::info!(
            target: ANALYTICS_TARGET,
            LogDescription = "Solve finished",
            ActiveLinks = links.iter().filter(|link| link.active_modules > 0).count(),
            GoalFunction = total_cost,
        );
    }
}

/// An event captured by [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    DemandRouted { decision: RoutingDecision, path_links: Vec<LinkState> },
    SolveFinished { links: Vec<LinkState>, total_cost: f64 },
}

/// Keeps every event in memory, in the order received.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<ReportEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn routed(&self) -> impl Iterator<Item = &RoutingDecision> {
        self.events.iter().filter_map(|event| match event {
            ReportEvent::DemandRouted { decision, .. } => Some(decision),
            ReportEvent::SolveFinished { .. } => None,
        })
    }
}

impl Reporter for RecordingReporter {
    fn on_demand_routed(&mut self, decision: &RoutingDecision, path_links: &[LinkState]) {
        self.events.push(ReportEvent::DemandRouted { decision: decision.clone(), path_links: path_links.to_vec() });
    }

    fn on_solve_finished(&mut self, links: &[LinkState], total_cost: f64) {
        self.events.push(ReportEvent::SolveFinished { links: links.to_vec(), total_cost });
    }
}
