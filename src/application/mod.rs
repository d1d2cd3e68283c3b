pub mod translate;
pub mod view_state;
