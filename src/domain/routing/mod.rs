pub mod link_pool;
pub mod path;
pub mod path_finder;
