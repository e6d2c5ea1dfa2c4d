pub mod advisory;
pub mod server;
