use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::demand::RegisteredDemand;
use crate::domain::scheduler::comparator::{registration_compare::RegistrationCompare, volume_compare::VolumeCompare};
use crate::error::Error;

/// An enum to describe the order in which the greedy scheduler routes demands.
///
/// For each order a comparator is available and can be generated
/// with [DemandOrder::get_comparator]. Every order breaks ties by registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DemandOrder {
    /// Largest demands first, so they get first claim on unfragmented capacity.
    #[default]
    VolumeDescending,

    /// Smallest demands first.
    VolumeAscending,

    /// Plain insertion order.
    Registration,
}

impl DemandOrder {
    /// Generates a comparator for this order of demands.
    pub fn get_comparator(&self) -> Box<dyn Fn(&RegisteredDemand, &RegisteredDemand) -> Ordering> {
        match *self {
            DemandOrder::VolumeDescending => {
                let volume = VolumeCompare::new(true);
                Box::new(move |demand1, demand2| volume.compare(demand1, demand2))
            }

            DemandOrder::VolumeAscending => {
                let volume = VolumeCompare::new(false);
                Box::new(move |demand1, demand2| volume.compare(demand1, demand2))
            }

            DemandOrder::Registration => {
                let registration = RegistrationCompare::new();
                Box::new(move |demand1, demand2| registration.compare(demand1, demand2))
            }
        }
    }

    /// Returns the demands in routing order.
    pub fn sorted<'a>(&self, demands: &'a [RegisteredDemand]) -> Vec<&'a RegisteredDemand> {
        let comparator = self.get_comparator();
        let mut ordered: Vec<&RegisteredDemand> = demands.iter().collect();
        ordered.sort_by(|demand1, demand2| comparator(demand1, demand2));
        ordered
    }
}

impl FromStr for DemandOrder {
    type Err = Error;

    fn from_str(order: &str) -> Result<Self, Self::Err> {
        match order {
            "Volume-Descending" => Ok(DemandOrder::VolumeDescending),
            "Volume-Ascending" => Ok(DemandOrder::VolumeAscending),
            "Registration" => Ok(DemandOrder::Registration),
            _ => Err(Error::UnknownDemandOrder(order.to_string())),
        }
    }
}

impl fmt::Display for DemandOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DemandOrder::VolumeDescending => "Volume-Descending",
            DemandOrder::VolumeAscending => "Volume-Ascending",
            DemandOrder::Registration => "Registration",
        };
        write!(f, "{}", name)
    }
}
