use crate::domain::network::link::Link;

/// Number of modules needed to carry `throughput` on links whose modules hold `module_capacity` each.
pub fn required_modules(throughput: f64, module_capacity: f64) -> u64 {
    (throughput / module_capacity).ceil() as u64
}

/// Cost of pushing `volume` more data across `link`, given its currently committed load.
///
/// Modules are never switched off, so the needed module count is never below the active one
/// and the result is non-negative for any non-negative `volume`. The link itself is not touched.
pub fn marginal_cost(link: &Link, volume: f64) -> f64 {
    let params = &link.params;
    let needed_modules = required_modules(link.cumulative_throughput() + volume, params.module_capacity);
    let new_modules = needed_modules.saturating_sub(link.active_modules());

    new_modules as f64 * params.module_turn_on_cost + volume * params.unit_throughput_cost
}

/// Contribution of `link` to the goal function.
pub fn provisioning_cost(link: &Link) -> f64 {
    link.active_modules() as f64 * link.params.module_turn_on_cost + link.cumulative_throughput() * link.params.unit_throughput_cost
}
