pub mod advisory;
pub mod api;
pub mod client;
pub mod infrastructure;
pub mod types;
