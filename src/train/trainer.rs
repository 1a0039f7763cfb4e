use std::time::Instant;

use rand::RngCore;

use crate::genetic::population::Population;
use crate::math::grid::Grid;
use crate::network::network::Network;
use crate::train::stats::IterationStats;

/// Runs one gradient-descent iteration on a single network.
pub fn gradient_iteration(
    network: &mut Network,
    target: &Grid<f64>,
    learning_rate: f64,
    iteration: usize,
) -> IterationStats {
    let started = Instant::now();
    network.backpropagation_learn(target, learning_rate);

    let stats = IterationStats {
        iteration,
        mse: network.mean_squared_error(target),
        elapsed_ms: started.elapsed().as_millis() as u64,
    };
    log::info!(
        "gradient iteration {}: mse {:.6} ({} ms)",
        stats.iteration,
        stats.mse,
        stats.elapsed_ms
    );
    stats
}

/// Runs one genetic generation and reports the new leader's error.
pub fn genetic_iteration(
    population: &mut Population,
    rng: &mut dyn RngCore,
    iteration: usize,
) -> IterationStats {
    let started = Instant::now();
    population.generation_step(rng);

    let stats = IterationStats {
        iteration,
        mse: population.leader().mean_squared_error(&population.target),
        elapsed_ms: started.elapsed().as_millis() as u64,
    };
    log::info!(
        "generation {}: leader mse {:.6} ({} ms)",
        stats.iteration,
        stats.mse,
        stats.elapsed_ms
    );
    stats
}
