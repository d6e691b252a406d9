pub mod maintenance;
pub mod pool;
pub mod seed;
