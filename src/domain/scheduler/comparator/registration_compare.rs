use crate::domain::demand::RegisteredDemand;

use std::cmp::Ordering;

/// Compares demands by the order in which they were added.
pub struct RegistrationCompare;

impl RegistrationCompare {
    pub fn new() -> Self {
        Self
    }

    pub fn compare(&self, demand1: &RegisteredDemand, demand2: &RegisteredDemand) -> Ordering {
        demand1.registration_index.cmp(&demand2.registration_index)
    }
}
