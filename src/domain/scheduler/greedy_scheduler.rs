use crate::domain::cost_model;
use crate::domain::demand::{Demand, RegisteredDemand};
use crate::domain::network::link::LinkState;
use crate::domain::network::topology::Topology;
use crate::domain::report::RoutingDecision;
use crate::domain::reporter::Reporter;
use crate::domain::routing::path_finder::PathFinder;
use crate::domain::scheduler::demand_order::DemandOrder;
use crate::domain::validator;
use crate::error::{Error, Result};

/// Routes demands one at a time and commits each path before the next search starts.
///
/// Because marginal costs depend on the load committed so far, the order in which
/// demands are routed changes which paths are chosen. Commits are never revisited.
pub struct GreedyScheduler<'a, R: Reporter + ?Sized> {
    topology: &'a mut Topology,
    reporter: &'a mut R,

    /// Number of demands committed so far.
    sequence: usize,

    /// Running goal function, every commit adds exactly its path cost.
    goal: f64,
}

impl<'a, R: Reporter + ?Sized> GreedyScheduler<'a, R> {
    pub fn new(topology: &'a mut Topology, reporter: &'a mut R) -> Self {
        let goal = topology.total_cost();
        Self { topology, reporter, sequence: 0, goal }
    }

    pub fn topology(&self) -> &Topology {
        &*self.topology
    }

    pub fn goal(&self) -> f64 {
        self.goal
    }

    /// Routes every demand in the order given by `order`.
    ///
    /// Stops at the first demand that cannot be routed; earlier commits stay in place.
    pub fn run(&mut self, demands: &[RegisteredDemand], order: DemandOrder) -> Result<Vec<RoutingDecision>> {
        let ordered = order.sorted(demands);
        let mut decisions = Vec::with_capacity(ordered.len());

        for registered in ordered {
            decisions.push(self.route(&registered.demand)?);
        }

        Ok(decisions)
    }

    /// Finds the cheapest path for `demand` under the current load, validates and commits it.
    ///
    /// Nothing is committed if any check fails.
    pub fn route(&mut self, demand: &Demand) -> Result<RoutingDecision> {
        demand.validate(self.topology)?;

        // The direct link is always searched, an infinite cost on it would otherwise look like an unreachable target.
        if let Some(direct) = self.topology.link_id(demand.source, demand.target) {
            if !cost_model::marginal_cost(self.topology.link(direct), demand.volume).is_finite() {
                log::error!("CostOverflow: marginal cost of {} is not finite, aborting solve", demand);
                return Err(Error::CostOverflow { demand: *demand });
            }
        }

        let path = PathFinder::new(self.topology).find(demand.source, demand.target, demand.volume);

        if !path.is_reachable() {
            log::error!("UnreachableDestination: no path for {}, aborting solve", demand);
            return Err(Error::UnreachableDestination { demand: *demand });
        }

        if let Err(violation) = validator::validate_path_consistency(self.topology, &path, demand) {
            log::error!("InvariantViolation while routing {}: {}", demand, violation);
            return Err(violation.into());
        }

        if path.links().iter().any(|link_id| !(self.topology.link(*link_id).cumulative_throughput() + demand.volume).is_finite()) {
            log::error!("CostOverflow: committing {} would overflow the link throughput, aborting solve", demand);
            return Err(Error::CostOverflow { demand: *demand });
        }

        self.topology.committer().commit(&path, demand.volume);
        self.sequence += 1;
        self.goal += path.cost();

        let path_links: Vec<LinkState> = path.links().iter().map(|link_id| self.topology.link(*link_id).state()).collect();

        let decision = RoutingDecision { sequence: self.sequence, demand: *demand, cost: path.cost(), goal_after: self.goal, path: path.into() };

        log::debug!("Routed #{} {}: cost {}, path length {}", decision.sequence, demand, decision.cost, decision.path.len());

        self.reporter.on_demand_routed(&decision, &path_links);

        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::network::link::LinkParameters;
    use crate::domain::reporter::RecordingReporter;
    use crate::domain::utils::id::NodeId;

    fn mesh(node_count: usize) -> Topology {
        Topology::new(node_count, LinkParameters::new(0.1, 10.0, 10.0).unwrap()).unwrap()
    }

    #[test]
    fn test_route_commits_path() {
        let mut topology = mesh(3);
        let mut reporter = RecordingReporter::new();
        let mut scheduler = GreedyScheduler::new(&mut topology, &mut reporter);

        let decision = scheduler.route(&Demand::new(0, 1, 5.0)).unwrap();
        assert_eq!(decision.sequence, 1);
        assert!((decision.cost - 10.5).abs() < 1e-9);
        assert!((scheduler.goal() - scheduler.topology().total_cost()).abs() < 1e-9);

        let link_id = scheduler.topology().link_id(NodeId::new(0), NodeId::new(1)).unwrap();
        assert_eq!(decision.path, vec![link_id]);
        assert_eq!(scheduler.topology().link(link_id).cumulative_throughput(), 5.0);
        assert_eq!(scheduler.topology().link(link_id).active_modules(), 1);

        assert_eq!(reporter.routed().count(), 1);
    }

    #[test]
    fn test_second_demand_shares_spare_capacity() {
        let mut topology = mesh(3);
        let mut reporter = RecordingReporter::new();
        let mut scheduler = GreedyScheduler::new(&mut topology, &mut reporter);

        let first = scheduler.route(&Demand::new(0, 1, 4.0)).unwrap();
        let second = scheduler.route(&Demand::new(0, 1, 4.0)).unwrap();

        assert_eq!(first.path, second.path);
        assert!((first.cost - 10.4).abs() < 1e-9);
        // The module switched on for the first demand still has room.
        assert!((second.cost - 0.4).abs() < 1e-9);
        assert_eq!(second.sequence, 2);
    }

    #[test]
    fn test_route_rejects_invalid_demand() {
        let mut topology = mesh(3);
        let mut reporter = RecordingReporter::new();
        let mut scheduler = GreedyScheduler::new(&mut topology, &mut reporter);

        assert!(matches!(scheduler.route(&Demand::new(0, 7, 1.0)), Err(Error::NodeOutOfRange { node_count: 3, .. })));
        assert!(matches!(scheduler.route(&Demand::new(1, 1, 1.0)), Err(Error::SelfTargetedDemand(_))));
        assert!(matches!(scheduler.route(&Demand::new(1, 2, f64::NAN)), Err(Error::InvalidDemandVolume { .. })));
        assert_eq!(scheduler.goal(), 0.0);

        assert!(reporter.events.is_empty());
    }

    #[test]
    fn test_route_rejects_cost_overflow() {
        let mut topology = Topology::new(3, LinkParameters::new(10.0, 10.0, 10.0).unwrap()).unwrap();
        let before = topology.link_states();
        let mut reporter = RecordingReporter::new();
        let mut scheduler = GreedyScheduler::new(&mut topology, &mut reporter);

        // 1e308 * 10 does not fit in an f64.
        let result = scheduler.route(&Demand::new(0, 1, 1e308));
        assert!(matches!(result, Err(Error::CostOverflow { demand }) if demand == Demand::new(0, 1, 1e308)));
        assert_eq!(scheduler.goal(), 0.0);
        assert_eq!(scheduler.topology().link_states(), before);

        assert!(reporter.events.is_empty());
    }

    #[test]
    fn test_route_rejects_throughput_overflow() {
        let mut topology = mesh(3);
        let mut reporter = RecordingReporter::new();
        let mut scheduler = GreedyScheduler::new(&mut topology, &mut reporter);

        let first = scheduler.route(&Demand::new(0, 1, 1e308)).unwrap();
        let after_first = scheduler.topology().link_states();

        // The second commit would push the direct link's throughput past f64::MAX.
        assert!(matches!(scheduler.route(&Demand::new(0, 1, 1e308)), Err(Error::CostOverflow { .. })));
        assert_eq!(scheduler.topology().link_states(), after_first);
        assert_eq!(scheduler.goal(), first.goal_after);
    }

    #[test]
    fn test_run_follows_demand_order() {
        let demands = [
            RegisteredDemand { registration_index: 0, demand: Demand::new(0, 1, 2.0) },
            RegisteredDemand { registration_index: 1, demand: Demand::new(1, 2, 9.0) },
            RegisteredDemand { registration_index: 2, demand: Demand::new(2, 0, 9.0) },
        ];

        let mut topology = mesh(3);
        let mut reporter = RecordingReporter::new();
        let decisions = GreedyScheduler::new(&mut topology, &mut reporter).run(&demands, DemandOrder::VolumeDescending).unwrap();

        let volumes: Vec<(usize, f64)> = decisions.iter().map(|decision| (decision.demand.source.index, decision.demand.volume)).collect();
        assert_eq!(volumes, vec![(1, 9.0), (2, 9.0), (0, 2.0)]);

        let sequences: Vec<usize> = decisions.iter().map(|decision| decision.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
    }
}
