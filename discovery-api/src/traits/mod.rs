pub mod client;
pub mod observer;
pub mod scheduler;
pub mod selector;
