pub mod descriptor;
pub mod error;
pub mod events;
pub mod state;
