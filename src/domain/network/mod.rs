pub mod link;
pub mod topology;
