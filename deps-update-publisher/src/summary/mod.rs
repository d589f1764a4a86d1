//! Run outcome types and GitHub Actions reporting.

mod action_output;
mod outcome;

pub use action_output::{write_outputs, write_step_summary};
pub use outcome::Outcome;
