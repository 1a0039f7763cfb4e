pub mod activation;
pub mod error;
pub mod genetic;
pub mod loader;
pub mod math;
pub mod network;
pub mod train;

// Convenience re-exports
pub use error::{Error, Result};
pub use genetic::population::Population;
pub use loader::{load_grid, parse_grid, polarize};
pub use math::grid::{Crossover, Grid};
pub use network::network::Network;
pub use network::neuron::Neuron;
pub use train::stats::IterationStats;
pub use train::trainer::{genetic_iteration, gradient_iteration};
