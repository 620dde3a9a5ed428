pub mod comparator;
pub mod demand_order;
pub mod greedy_scheduler;
