use crate::domain::demand::RegisteredDemand;

use std::cmp::Ordering;

/// Compares demands by their data volume.
pub struct VolumeCompare {
    descending: bool,
}

impl VolumeCompare {
    /// * `descending`: if `true`, larger demands are ordered first.
    pub fn new(descending: bool) -> Self {
        Self { descending }
    }

    /// Returns `Ordering::Less` if demand1 is routed before demand2.
    ///
    /// Note: if both volumes are equal, the registration_index of both demands is compared, so the
    ///       earlier registered demand always goes first regardless of the direction.
    pub fn compare(&self, demand1: &RegisteredDemand, demand2: &RegisteredDemand) -> Ordering {
        if demand1.registration_index == demand2.registration_index {
            return Ordering::Equal;
        }

        let by_volume = demand1.demand.volume.total_cmp(&demand2.demand.volume);
        let by_volume = if self.descending { by_volume.reverse() } else { by_volume };

        match by_volume {
            Ordering::Equal => demand1.registration_index.cmp(&demand2.registration_index),
            other => other,
        }
    }
}
