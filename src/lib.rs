use crate::api::planner_dto::PlannerDto;
use crate::domain::planner::Planner;
use crate::domain::report::SolveReport;
use crate::error::Result;
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

/// Loads a planner configuration from `file_path`.
pub fn load_planner(file_path: &str) -> Result<Planner> {
    let dto: PlannerDto = parse_json_file::<PlannerDto>(file_path)?;
    log::info!("JSON file parsed successfully.");

    Planner::from_dto(dto)
}

/// Loads the configuration at `file_path` and runs the full greedy pass.
pub fn plan_from_file(file_path: &str) -> Result<SolveReport> {
    let mut planner = load_planner(file_path)?;
    planner.solve()
}
