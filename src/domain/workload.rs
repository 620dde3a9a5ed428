use rand::Rng;

use crate::domain::demand::Demand;
use crate::error::{Error, Result};

/// Generates one demand for every ordered pair of distinct nodes, with an integer
/// volume drawn uniformly from `[min_volume, max_volume]`.
///
/// Demands are produced source major, so registration order is `(0, 1), (0, 2), ..., (1, 0), ...`.
pub fn full_mesh_demands<R: Rng>(node_count: usize, min_volume: u64, max_volume: u64, rng: &mut R) -> Result<Vec<Demand>> {
    if min_volume == 0 || min_volume > max_volume {
        return Err(Error::InvalidWorkload(format!("volume range [{}, {}] must be positive and non empty", min_volume, max_volume)));
    }

    let mut demands = Vec::with_capacity(node_count * node_count.saturating_sub(1));

    for source in 0..node_count {
        for target in 0..node_count {
            if source == target {
                continue;
            }
            let volume = rng.random_range(min_volume..=max_volume);
            demands.push(Demand::new(source, target, volume as f64));
        }
    }

    log::debug!("Generated {} demands for {} nodes, volumes in [{}, {}]", demands.len(), node_count, min_volume, max_volume);

    Ok(demands)
}
