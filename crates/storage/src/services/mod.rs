pub mod auto_assign;
pub mod board;
pub mod heat_pool;
pub mod lanes;
