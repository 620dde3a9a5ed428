pub mod cost_model;
pub mod demand;
pub mod network;
pub mod planner;
pub mod report;
pub mod reporter;
pub mod routing;
pub mod scheduler;
pub mod utils;
pub mod validator;
pub mod workload;
