pub mod competition;
pub mod entry;
pub mod heat;
pub mod lane;
pub mod ticket_type;
pub mod workout;
