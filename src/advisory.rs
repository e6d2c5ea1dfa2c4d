pub mod advisor;
pub mod content;
pub mod fault;
pub mod generator;
pub mod prompt;

pub use advisor::{Advisor, Outcome, Settings};
pub use fault::{AdvisoryError, Fault};
