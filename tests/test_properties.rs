use rand::SeedableRng;
use rand::rngs::StdRng;

use mesh_capacity_planner::domain::cost_model;
use mesh_capacity_planner::domain::demand::{Demand, RegisteredDemand};
use mesh_capacity_planner::domain::network::link::LinkParameters;
use mesh_capacity_planner::domain::network::topology::Topology;
use mesh_capacity_planner::domain::planner::Planner;
use mesh_capacity_planner::domain::reporter::{RecordingReporter, ReportEvent};
use mesh_capacity_planner::domain::scheduler::demand_order::DemandOrder;
use mesh_capacity_planner::domain::scheduler::greedy_scheduler::GreedyScheduler;
use mesh_capacity_planner::domain::validator;
use mesh_capacity_planner::domain::workload::full_mesh_demands;

const EPSILON: f64 = 1e-6;

fn random_demands(node_count: usize, seed: u64) -> Vec<Demand> {
    full_mesh_demands(node_count, 1, 20, &mut StdRng::seed_from_u64(seed)).unwrap()
}

fn solved_planner(node_count: usize, seed: u64, order: DemandOrder) -> (Planner, RecordingReporter) {
    let mut planner = Planner::new(node_count).unwrap();
    planner.set_demand_order(order);
    planner.add_demands(random_demands(node_count, seed)).unwrap();

    let mut reporter = RecordingReporter::new();
    planner.solve_with_reporter(&mut reporter).unwrap();
    (planner, reporter)
}

#[test]
fn test_final_state_invariants_hold() {
    for seed in [1, 2, 3] {
        for order in [DemandOrder::VolumeDescending, DemandOrder::VolumeAscending, DemandOrder::Registration] {
            let (planner, _) = solved_planner(8, seed, order);

            let demands = planner.demands().iter().map(|registered| &registered.demand);
            assert!(validator::validate_flow_conservation(planner.topology(), demands).is_ok());

            for link in planner.topology().links() {
                let expected = (link.cumulative_throughput() / link.params.module_capacity).ceil() as u64;
                assert_eq!(link.active_modules(), expected, "{}", link);
            }
        }
    }
}

#[test]
fn test_paths_are_contiguous_and_reported_once() {
    let (planner, reporter) = solved_planner(7, 11, DemandOrder::VolumeDescending);
    let decisions: Vec<_> = reporter.routed().collect();

    assert_eq!(decisions.len(), planner.demands().len());

    for decision in decisions {
        let mut at = decision.demand.source;
        for link_id in &decision.path {
            let link = planner.topology().link(*link_id);
            assert_eq!(link.source, at);
            at = link.target;
        }
        assert_eq!(at, decision.demand.target);
    }
}

#[test]
fn test_path_cost_matches_link_state_at_routing_time() {
    let node_count = 6;
    let demands: Vec<RegisteredDemand> = random_demands(node_count, 5)
        .into_iter()
        .enumerate()
        .map(|(registration_index, demand)| RegisteredDemand { registration_index, demand })
        .collect();

    let mut topology = Topology::new(node_count, LinkParameters::default()).unwrap();
    let mut reporter = RecordingReporter::new();
    let mut scheduler = GreedyScheduler::new(&mut topology, &mut reporter);

    let mut previous_goal = 0.0;
    for registered in DemandOrder::VolumeDescending.sorted(&demands) {
        let before = scheduler.topology().clone();
        let decision = scheduler.route(&registered.demand).unwrap();

        let replayed: f64 = decision.path.iter().map(|link_id| cost_model::marginal_cost(before.link(*link_id), decision.demand.volume)).sum();
        assert!((replayed - decision.cost).abs() < EPSILON);

        // The goal grows by exactly the path cost and never shrinks.
        assert!(decision.goal_after >= previous_goal);
        assert!((decision.goal_after - previous_goal - decision.cost).abs() < EPSILON);
        assert!((decision.goal_after - scheduler.topology().total_cost()).abs() < EPSILON);
        previous_goal = decision.goal_after;
    }
}

#[test]
fn test_reported_path_links_reflect_commit() {
    let (_, reporter) = solved_planner(5, 21, DemandOrder::Registration);

    for event in &reporter.events {
        if let ReportEvent::DemandRouted { decision, path_links } = event {
            let ids: Vec<_> = path_links.iter().map(|link| link.id).collect();
            assert_eq!(ids, decision.path);
            assert!(path_links.iter().all(|link| link.cumulative_throughput >= decision.demand.volume && link.active_modules > 0));
        }
    }
}

#[test]
fn test_runs_are_deterministic() {
    let (first, first_reporter) = solved_planner(9, 99, DemandOrder::VolumeDescending);
    let (second, second_reporter) = solved_planner(9, 99, DemandOrder::VolumeDescending);

    assert_eq!(first_reporter.events, second_reporter.events);
    assert_eq!(first.topology().link_states(), second.topology().link_states());
    assert_eq!(first.total_cost(), second.total_cost());
}

#[test]
fn test_goal_equals_sum_of_path_costs() {
    let (planner, reporter) = solved_planner(10, 3, DemandOrder::VolumeAscending);

    let summed: f64 = reporter.routed().map(|decision| decision.cost).sum();
    let provisioned: f64 = planner.topology().links().iter().map(cost_model::provisioning_cost).sum();

    assert!((summed - planner.total_cost()).abs() < EPSILON * summed.max(1.0));
    assert!((provisioned - planner.total_cost()).abs() < EPSILON * provisioned.max(1.0));
}
