pub mod board;
pub mod organization;
