use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use mesh_capacity_planner::domain::planner::Planner;
use mesh_capacity_planner::domain::scheduler::demand_order::DemandOrder;
use mesh_capacity_planner::domain::workload::full_mesh_demands;
use mesh_capacity_planner::loader::export::{write_json_file, write_links_csv};
use mesh_capacity_planner::{load_planner, logger};

/// Greedy capacity planner for a full mesh of modular links.
#[derive(Parser, Debug)]
#[command(name = "mesh-capacity-planner", about = "Routes point to point demands over a full mesh at least marginal cost")]
struct Args {
    /// JSON planner configuration, replaces the generated workload
    #[arg(short, long)]
    config: Option<String>,

    /// Number of nodes of the generated mesh
    #[arg(short, long, default_value = "100")]
    nodes: usize,

    /// Seed of the workload generator, drawn from the OS if omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Smallest generated demand volume
    #[arg(long, default_value = "1")]
    min_volume: u64,

    /// Largest generated demand volume
    #[arg(long, default_value = "20")]
    max_volume: u64,

    /// Demand order: Volume-Descending, Volume-Ascending or Registration
    #[arg(short, long)]
    order: Option<DemandOrder>,

    /// Writes the full solve report as JSON
    #[arg(long)]
    report: Option<String>,

    /// Writes the final link states as `;` separated CSV
    #[arg(long)]
    links_csv: Option<String>,
}

impl Args {
    fn build_planner(&self) -> anyhow::Result<Planner> {
        if let Some(config) = &self.config {
            log::info!("Loading planner configuration from '{}'", config);
            return load_planner(config).with_context(|| format!("failed to load configuration '{}'", config));
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut planner = Planner::new(self.nodes)?;
        planner.add_demands(full_mesh_demands(self.nodes, self.min_volume, self.max_volume, &mut rng)?)?;

        Ok(planner)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init();

    let mut planner = args.build_planner()?;
    if let Some(order) = args.order {
        planner.set_demand_order(order);
    }

    log::info!("Starting solve of {} demands on {} nodes.", planner.demands().len(), planner.topology().node_count());

    let start = Instant::now();
    let report = planner.solve()?;
    let elapsed = start.elapsed();

    println!("Computing time: {:.3} s", elapsed.as_secs_f64());
    println!("Goal function: {:.10}", report.total_cost);
    println!("Active links: {} of {}, modules: {}", report.active_links().count(), report.links.len(), report.total_modules());

    if let Some(path) = &args.report {
        write_json_file(path, &report).with_context(|| format!("failed to write report '{}'", path))?;
        log::info!("Solve report written to '{}'", path);
    }

    if let Some(path) = &args.links_csv {
        write_links_csv(path, &report.links).with_context(|| format!("failed to write link states '{}'", path))?;
        log::info!("Link states written to '{}'", path);
    }

    Ok(())
}
