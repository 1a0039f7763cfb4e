pub mod stats;
pub mod trainer;

pub use stats::IterationStats;
pub use trainer::{genetic_iteration, gradient_iteration};
