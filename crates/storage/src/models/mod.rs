mod competition;
mod entry;
mod heat;
mod lane;
mod ticket_type;
mod workout;

pub use competition::{Competition, HeatLimitType};
pub use entry::Entry;
pub use heat::{Heat, HeatOccupancy, LinkedHeat};
pub use lane::{Lane, LaneAssignment};
pub use ticket_type::TicketType;
pub use workout::Workout;
