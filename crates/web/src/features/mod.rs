pub mod heats;
pub mod lanes;
