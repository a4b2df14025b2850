pub mod heat;
pub mod lane;
