pub mod config;
pub mod helper;
pub mod providers;
