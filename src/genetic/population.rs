use rand::RngCore;

use crate::math::grid::{Crossover, Grid};
use crate::network::network::Network;

/// An ordered population of single-layer models sharing one target and
/// learning rate. After `select()` the order encodes fitness rank.
#[derive(Debug, Clone)]
pub struct Population {
    pub learning_rate: f64,
    pub elite_count: usize,
    pub individuals: Vec<Network>,
    pub target: Grid<f64>,
}

impl Population {
    /// `size` independently initialized models over the same input.
    /// The elite count is one tenth of the population, rounded down.
    pub fn new(
        rng: &mut dyn RngCore,
        size: usize,
        learning_rate: f64,
        input: &Grid<f64>,
        target: Grid<f64>,
    ) -> Population {
        assert!(size >= 2, "population needs at least two individuals");

        let individuals = (0..size).map(|_| Network::new(rng, input.clone())).collect();
        Population {
            learning_rate,
            elite_count: (size as f64 * 0.1) as usize,
            individuals,
            target,
        }
    }

    /// One gradient step on every individual. This is the population's
    /// per-generation parameter nudge: a shared hill-climbing move, not
    /// random noise.
    pub fn learn_step(&mut self) {
        let target = &self.target;
        let learning_rate = self.learning_rate;
        for network in &mut self.individuals {
            network.backpropagation_learn(target, learning_rate);
        }
    }

    /// Stable sort, lowest error first. Ties keep their current order.
    pub fn select(&mut self) {
        let target = &self.target;
        let mut scored: Vec<(f64, Network)> = self
            .individuals
            .drain(..)
            .map(|network| (network.mean_squared_error(target), network))
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.individuals = scored.into_iter().map(|(_, network)| network).collect();
    }

    /// Breeds a child from two parents. The lower-error parent is the
    /// receiver and contributes the larger share of genes — with
    /// errors `little ≤ bigger` the share is `1 − little/(2·bigger)`,
    /// so a far superior parent passes on nearly everything.
    pub fn crossover_pair(
        &self,
        rng: &mut dyn RngCore,
        parent_a: &Network,
        parent_b: &Network,
    ) -> Network {
        let mse_a = parent_a.mean_squared_error(&self.target);
        let mse_b = parent_b.mean_squared_error(&self.target);

        let share = |little: f64, bigger: f64| 1.0 - little / (2.0 * bigger);

        if mse_a <= mse_b {
            parent_a.crossover(parent_b, rng, share(mse_a, mse_b))
        } else {
            parent_b.crossover(parent_a, rng, share(mse_b, mse_a))
        }
    }

    /// One full generation: rank, keep the elite prefix plus one,
    /// regrow to the previous size by breeding adjacent pairs, then
    /// run the shared learning step.
    ///
    /// Regrowth walks the population while appending to it, so later
    /// pairs may breed from children produced earlier in the same
    /// generation. Populations below ten individuals have an elite
    /// count of zero and leave a single survivor, which makes the
    /// pairing step panic.
    pub fn generation_step(&mut self, rng: &mut dyn RngCore) {
        self.select();

        let size = self.individuals.len();
        self.individuals.truncate(self.elite_count + 1);
        self.regrow(rng, size);

        self.learn_step();
    }

    fn regrow(&mut self, rng: &mut dyn RngCore, size: usize) {
        let mut i = 0;
        loop {
            let child =
                self.crossover_pair(rng, &self.individuals[i], &self.individuals[i + 1]);
            self.individuals.push(child);
            i += 1;

            if self.individuals.len() >= size {
                break;
            }
        }
        log::debug!("population regrown to {} individuals", self.individuals.len());
    }

    /// The current best individual. Meaningful after a selection; until
    /// then it is simply the first constructed model.
    pub fn leader(&self) -> &Network {
        &self.individuals[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::grid::Grid;
    use crate::network::neuron::Neuron;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn polarized_checker() -> Grid<f64> {
        Grid::from_rows(vec![vec![1.0, -1.0], vec![-1.0, 1.0]]).unwrap()
    }

    fn soft_target() -> Grid<f64> {
        Grid::from_rows(vec![vec![0.9, 0.1], vec![0.1, 0.9]]).unwrap()
    }

    fn population(rng: &mut ChaCha8Rng, size: usize) -> Population {
        Population::new(rng, size, 1.0, &polarized_checker(), soft_target())
    }

    /// Zero weights, chosen biases: forward responses are known exactly.
    fn network_with_biases(biases: [[f64; 2]; 2]) -> Network {
        let input = polarized_checker();
        let data = biases
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&b| Neuron::new(Grid::filled(2, 2, 0.0).unwrap(), b))
                    .collect()
            })
            .collect();
        Network {
            input,
            output_neurons: Grid {
                rows: 2,
                cols: 2,
                data,
            },
        }
    }

    #[test]
    fn construction_sizes_the_population_and_elite() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let population = population(&mut rng, 20);
        assert_eq!(population.individuals.len(), 20);
        assert_eq!(population.elite_count, 2);
        // Independent initialization: the individuals differ.
        assert_ne!(population.individuals[0], population.individuals[1]);
    }

    #[test]
    fn selection_orders_by_ascending_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut population = population(&mut rng, 12);
        population.select();

        let errors: Vec<f64> = population
            .individuals
            .iter()
            .map(|network| network.mean_squared_error(&population.target))
            .collect();
        assert!(errors.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn leader_is_no_worse_than_any_individual() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut population = population(&mut rng, 12);
        population.select();

        let best = population.leader().mean_squared_error(&population.target);
        for network in &population.individuals {
            assert!(best <= network.mean_squared_error(&population.target));
        }
    }

    #[test]
    fn crossover_pair_receives_from_the_fitter_parent() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let population = population(&mut rng, 10);

        // `good` matches the soft target almost exactly, `bad` is its
        // inversion; the receiver's biases survive crossover verbatim.
        let good = network_with_biases([[2.2, -2.2], [-2.2, 2.2]]);
        let bad = network_with_biases([[-2.2, 2.2], [2.2, -2.2]]);

        for (a, b) in [(&good, &bad), (&bad, &good)] {
            let child = population.crossover_pair(&mut rng, a, b);
            for i in 0..2 {
                for j in 0..2 {
                    assert_eq!(
                        child.output_neurons.data[i][j].bias,
                        good.output_neurons.data[i][j].bias
                    );
                }
            }
        }
    }

    #[test]
    fn generation_step_restores_the_population_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut population = population(&mut rng, 15);
        population.generation_step(&mut rng);
        assert_eq!(population.individuals.len(), 15);
    }

    #[test]
    fn truncation_and_regrowth_keep_the_best_individual_intact() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut population = population(&mut rng, 10);

        population.select();
        let best = population.individuals[0].clone();

        let size = population.individuals.len();
        population.individuals.truncate(population.elite_count + 1);
        population.regrow(&mut rng, size);

        assert_eq!(population.individuals[0], best);
        assert_eq!(population.individuals.len(), size);
    }
}
