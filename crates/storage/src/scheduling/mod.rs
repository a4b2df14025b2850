//! Heat capacity and lane assignment.
//!
//! Everything in here is pure: callers load a snapshot of the competition
//! inside a transaction, run the planning functions, and persist the
//! resulting changes.

pub mod auto_assign;
pub mod board;
pub mod policy;
pub mod pool;

pub use auto_assign::{AutoAssignOutcome, auto_assign};
pub use board::{BoardEntry, BoardHeat, BoardLane, BoardTicketType, HeatBoard, LaneChange};
pub use policy::{CapacityPolicy, SchedulingSettings};
pub use pool::{HeatPoolPlan, NewHeat, desired_heat_count, plan_heat_pool};
