use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlannerDto {
    pub node_count: usize,
    #[serde(default)]
    pub link_parameters: Option<LinkParametersDto>,
    #[serde(default)]
    pub link_overrides: Vec<LinkOverrideDto>,
    #[serde(default)]
    pub demand_order: Option<String>,
    #[serde(default)]
    pub demands: Vec<DemandDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct LinkParametersDto {
    pub unit_throughput_cost: f64,
    pub module_turn_on_cost: f64,
    pub module_capacity: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct LinkOverrideDto {
    pub source: usize,
    pub target: usize,
    #[serde(flatten)]
    pub parameters: LinkParametersDto,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct DemandDto {
    pub source: usize,
    pub target: usize,
    pub volume: f64,
}
