use rand::{Rng, RngCore};

use crate::math::grid::{Crossover, Grid};

/// One output unit. Its receptive field is the entire input grid, so
/// the weight grid has the input's exact shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    pub weights: Grid<f64>,
    pub bias: f64,
}

impl Neuron {
    /// A neuron with weights and bias drawn uniformly from [-1, 1].
    pub fn random(rng: &mut dyn RngCore, rows: usize, cols: usize) -> Neuron {
        let mut weights = Grid {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        };
        for i in 0..rows {
            for j in 0..cols {
                weights.data[i][j] = rng.gen::<f64>() * 2.0 - 1.0;
            }
        }
        let bias = rng.gen::<f64>() * 2.0 - 1.0;
        Neuron { weights, bias }
    }

    pub fn new(weights: Grid<f64>, bias: f64) -> Neuron {
        Neuron { weights, bias }
    }

    /// Affine response: bias + Σ input[i][j] × weight[i][j].
    /// The input must have the weight grid's shape.
    pub fn produce(&self, input: &Grid<f64>) -> f64 {
        assert_eq!(self.weights.rows, input.rows, "input height differs from weights");
        assert_eq!(self.weights.cols, input.cols, "input width differs from weights");

        let mut res = self.bias;
        for i in 0..input.rows {
            for j in 0..input.cols {
                res += input.data[i][j] * self.weights.data[i][j];
            }
        }
        res
    }
}

/// The weight grids recombine cell by cell; the bias is copied from
/// the receiver alone. The asymmetry is deliberate: callers put the
/// fitter parent on the receiving side, so its bias carries over.
impl Crossover for Neuron {
    fn crossover(&self, other: &Self, rng: &mut dyn RngCore, ratio: f64) -> Self {
        Neuron {
            weights: self.weights.crossover(&other.weights, rng, ratio),
            bias: self.bias,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn random_parameters_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let neuron = Neuron::random(&mut rng, 3, 4);
        assert!(neuron.bias >= -1.0 && neuron.bias <= 1.0);
        for row in &neuron.weights.data {
            for &w in row {
                assert!((-1.0..=1.0).contains(&w));
            }
        }
    }

    #[test]
    fn produce_is_the_affine_response() {
        let weights = Grid::from_rows(vec![vec![0.5, -1.0], vec![2.0, 0.0]]).unwrap();
        let neuron = Neuron::new(weights, 0.25);
        let input = Grid::from_rows(vec![vec![1.0, 1.0], vec![-1.0, 1.0]]).unwrap();
        // 0.25 + 0.5 - 1.0 - 2.0 + 0.0
        assert_relative_eq!(neuron.produce(&input), -2.25);
    }

    #[test]
    #[should_panic(expected = "differs from weights")]
    fn produce_rejects_mismatched_input() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let neuron = Neuron::random(&mut rng, 2, 2);
        let input = Grid::from_rows(vec![vec![1.0, 1.0, 1.0]]).unwrap();
        neuron.produce(&input);
    }

    #[test]
    fn crossover_keeps_the_receiver_bias() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let a = Neuron::new(Grid::filled(2, 2, 1.0).unwrap(), 0.7);
        let b = Neuron::new(Grid::filled(2, 2, 2.0).unwrap(), -0.3);

        let child = a.crossover(&b, &mut rng, 0.5);
        assert_relative_eq!(child.bias, 0.7);
        for row in &child.weights.data {
            for &w in row {
                assert!(w == 1.0 || w == 2.0);
            }
        }
    }
}
