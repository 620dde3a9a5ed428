use crate::api::planner_dto::{LinkParametersDto, PlannerDto};
use crate::domain::demand::{Demand, RegisteredDemand};
use crate::domain::network::link::{Link, LinkParameters};
use crate::domain::network::topology::Topology;
use crate::domain::report::SolveReport;
use crate::domain::reporter::{LogReporter, Reporter};
use crate::domain::scheduler::demand_order::DemandOrder;
use crate::domain::scheduler::greedy_scheduler::GreedyScheduler;
use crate::domain::utils::id::NodeId;
use crate::domain::validator;
use crate::error::{Error, Result};

/// Entry point of the capacity planner.
///
/// Owns the full mesh and the demand set. Demands are collected first and then
/// routed in a single greedy pass by [`Planner::solve`]; an instance is solved at most once.
#[derive(Debug, Clone)]
pub struct Planner {
    topology: Topology,
    demands: Vec<RegisteredDemand>,
    demand_order: DemandOrder,
    solved: bool,
}

impl TryFrom<LinkParametersDto> for LinkParameters {
    type Error = Error;

    fn try_from(dto: LinkParametersDto) -> Result<Self> {
        LinkParameters::new(dto.unit_throughput_cost, dto.module_turn_on_cost, dto.module_capacity)
    }
}

impl Planner {
    /// Builds the mesh for `node_count` nodes with the default link parameters.
    pub fn new(node_count: usize) -> Result<Self> {
        Self::with_link_parameters(node_count, LinkParameters::default())
    }

    pub fn with_link_parameters(node_count: usize, params: LinkParameters) -> Result<Self> {
        Ok(Self::from_topology(Topology::new(node_count, params)?))
    }

    /// Wraps an unloaded topology.
    pub fn from_topology(topology: Topology) -> Self {
        Self { topology, demands: Vec::new(), demand_order: DemandOrder::default(), solved: false }
    }

    pub fn from_dto(dto: PlannerDto) -> Result<Self> {
        let params = match dto.link_parameters {
            Some(params_dto) => LinkParameters::try_from(params_dto)?,
            None => LinkParameters::default(),
        };

        let overrides = dto
            .link_overrides
            .iter()
            .map(|link| -> Result<(NodeId, NodeId, LinkParameters)> {
                Ok((NodeId::new(link.source), NodeId::new(link.target), LinkParameters::try_from(link.parameters)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut planner = Self::from_topology(Topology::with_overrides(dto.node_count, params, &overrides)?);

        if let Some(order) = dto.demand_order {
            planner.set_demand_order(order.parse::<DemandOrder>()?);
        }

        planner.add_demands(dto.demands.iter().map(|demand| Demand::new(demand.source, demand.target, demand.volume)))?;

        log::info!(
            "Planner constructed from configuration: {} nodes, {} overrides, {} demands, order {}",
            planner.topology.node_count(),
            overrides.len(),
            planner.demands.len(),
            planner.demand_order
        );

        Ok(planner)
    }

    pub fn set_demand_order(&mut self, order: DemandOrder) {
        self.demand_order = order;
    }

    pub fn demand_order(&self) -> DemandOrder {
        self.demand_order
    }

    /// Adds a demand of `volume` from `source` to `target`.
    pub fn add_demand(&mut self, source: usize, target: usize, volume: f64) -> Result<()> {
        self.add_demands([Demand::new(source, target, volume)])
    }

    /// Adds all `demands`, or none of them if any is invalid.
    pub fn add_demands(&mut self, demands: impl IntoIterator<Item = Demand>) -> Result<()> {
        if self.solved {
            return Err(Error::AlreadySolved);
        }

        let demands: Vec<Demand> = demands.into_iter().collect();
        for demand in &demands {
            if let Err(e) = demand.validate(&self.topology) {
                log::warn!("Rejected {}: {}", demand, e);
                return Err(e);
            }
        }

        let offset = self.demands.len();
        self.demands
            .extend(demands.into_iter().enumerate().map(|(index, demand)| RegisteredDemand { registration_index: offset + index, demand }));

        Ok(())
    }

    pub fn demands(&self) -> &[RegisteredDemand] {
        &self.demands
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Read only view of every link, in link index order.
    pub fn links(&self) -> &[Link] {
        self.topology.links()
    }

    pub fn total_cost(&self) -> f64 {
        self.topology.total_cost()
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Routes every demand and reports through a [`LogReporter`].
    pub fn solve(&mut self) -> Result<SolveReport> {
        self.solve_with_reporter(&mut LogReporter::new())
    }

    /// Routes every demand in the configured order, then validates the final link state.
    ///
    /// Any failure aborts the solve; the instance cannot be solved again afterwards.
    pub fn solve_with_reporter(&mut self, reporter: &mut dyn Reporter) -> Result<SolveReport> {
        if self.solved {
            return Err(Error::AlreadySolved);
        }
        self.solved = true;

        log::info!(
            "Solving {} demands on {} nodes ({} links), order {}",
            self.demands.len(),
            self.topology.node_count(),
            self.topology.link_count(),
            self.demand_order
        );

        let decisions = GreedyScheduler::new(&mut self.topology, &mut *reporter).run(&self.demands, self.demand_order)?;

        validator::validate_flow_conservation(&self.topology, self.demands.iter().map(|registered| &registered.demand)).map_err(|violations| {
            for violation in &violations {
                log::error!("InvariantViolation after solve: {}", violation);
            }
            Error::FlowNotConserved(violations)
        })?;

        if let Err(violation) = validator::validate_module_counts(&self.topology) {
            log::error!("InvariantViolation after solve: {}", violation);
            return Err(violation.into());
        }

        let links = self.topology.link_states();
        let total_cost = self.topology.total_cost();

        reporter.on_solve_finished(&links, total_cost);

        log::info!("Goal function result: {:.10}", total_cost);

        Ok(SolveReport { decisions, links, total_cost })
    }
}
