pub mod repositories;
pub mod seed;
pub mod snapshot;
