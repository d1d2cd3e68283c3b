pub mod activity;
pub mod cli;
pub mod surface;
