use rand::RngCore;

use crate::activation::{sigmoid, sigmoid_derivative};
use crate::math::grid::{Crossover, Grid};
use crate::network::neuron::Neuron;

/// A single-layer model: one neuron per output cell, each seeing the
/// whole input grid. The output has the input's shape, so the model
/// reconstructs an image of the same size it reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    pub input: Grid<f64>,
    pub output_neurons: Grid<Neuron>,
}

impl Network {
    /// Builds a model over `input` with independently randomly
    /// initialized neurons. The input must be non-empty.
    pub fn new(rng: &mut dyn RngCore, input: Grid<f64>) -> Network {
        assert!(!input.is_empty(), "input grid must not be empty");

        let (rows, cols) = (input.rows, input.cols);
        let mut data = Vec::with_capacity(rows);
        for _ in 0..rows {
            let mut row = Vec::with_capacity(cols);
            for _ in 0..cols {
                row.push(Neuron::random(rng, rows, cols));
            }
            data.push(row);
        }

        Network {
            input,
            output_neurons: Grid { rows, cols, data },
        }
    }

    /// One response per output cell. With `derivative` false the raw
    /// affine response is squashed through the sigmoid; with it true
    /// the cell holds `sigmoid_derivative` of the *raw* response — the
    /// slope term the learning step consumes.
    pub fn forward_pass(&self, derivative: bool) -> Grid<f64> {
        let mut res = Grid {
            rows: self.output_neurons.rows,
            cols: self.output_neurons.cols,
            data: vec![vec![0.0; self.output_neurons.cols]; self.output_neurons.rows],
        };

        for i in 0..res.rows {
            for j in 0..res.cols {
                let response = self.output_neurons.data[i][j].produce(&self.input);
                res.data[i][j] = if derivative {
                    sigmoid_derivative(response)
                } else {
                    sigmoid(response)
                };
            }
        }
        res
    }

    /// The reconstructed binary image: activations below 0.5 become 0,
    /// everything else 1.
    pub fn produce_output(&self) -> Grid<u8> {
        let activations = self.forward_pass(false);
        let mut res = Grid {
            rows: activations.rows,
            cols: activations.cols,
            data: vec![vec![0u8; activations.cols]; activations.rows],
        };

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = if activations.data[i][j] < 0.5 { 0 } else { 1 };
            }
        }
        res
    }

    /// Fitness: mean squared distance between the squashed forward
    /// pass and `target`.
    pub fn mean_squared_error(&self, target: &Grid<f64>) -> f64 {
        let diff = self.forward_pass(false) - target.clone();
        diff.sum_of_squares() / (target.rows * target.cols) as f64
    }

    /// One full-batch gradient step over the whole output layer.
    ///
    /// Per cell, the bias gradient is `diff × slope / N` and the weight
    /// gradient is the input grid scaled by that same scalar. The
    /// update subtracts `gradient × learning_rate × (−1)`; the double
    /// negation is kept verbatim — the sign arithmetic is part of the
    /// model contract.
    pub fn backpropagation_learn(&mut self, target: &Grid<f64>, learning_rate: f64) {
        let n = (self.output_neurons.rows * self.output_neurons.cols) as f64;
        let diff = self.forward_pass(false) - target.clone();
        let slope = self.forward_pass(true);

        for i in 0..self.output_neurons.rows {
            for j in 0..self.output_neurons.cols {
                let grad_b = diff.data[i][j] * slope.data[i][j] / n;
                let grad_w = self.input.scale(grad_b);

                let neuron = &mut self.output_neurons.data[i][j];
                neuron.bias -= grad_b * learning_rate * -1.0;
                neuron.weights = neuron.weights.clone() - grad_w.scale(learning_rate * -1.0);
            }
        }
    }
}

/// The child shares the receiver's input grid; its neurons recombine
/// cell by cell through the structural grid crossover.
impl Crossover for Network {
    fn crossover(&self, other: &Self, rng: &mut dyn RngCore, ratio: f64) -> Self {
        Network {
            input: self.input.clone(),
            output_neurons: self.output_neurons.crossover(&other.output_neurons, rng, ratio),
        }
    }
}
