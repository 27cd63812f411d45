pub mod iterator;
pub mod plan;
pub mod summary;
