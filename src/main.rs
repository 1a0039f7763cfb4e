use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use cobalt_nn::{
    genetic_iteration, gradient_iteration, load_grid, polarize, Error, Grid, Network,
    Population, Result,
};

#[derive(Parser)]
#[command(name = "cobalt-nn")]
#[command(version)]
#[command(about = "Reconstructs a binary image by training a single-layer network")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a single network with gradient descent
    Gradient {
        /// Binary input image, one row per line
        #[arg(short, long, default_value = "matrix_input.txt")]
        input: PathBuf,

        /// Target image with real-valued cells
        #[arg(short, long, default_value = "matrix_ethalon.txt")]
        target: PathBuf,

        #[arg(short, long, default_value_t = 1.0)]
        learning_rate: f64,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Evolve a population of networks with selection and crossover
    Genetic {
        /// Binary input image, one row per line
        #[arg(short, long, default_value = "matrix_input.txt")]
        input: PathBuf,

        /// Target image with real-valued cells
        #[arg(short, long, default_value = "matrix_ethalon.txt")]
        target: PathBuf,

        /// Number of individuals
        #[arg(short, long, default_value_t = 100)]
        population: usize,

        #[arg(short, long, default_value_t = 1.0)]
        learning_rate: f64,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Gradient {
            input,
            target,
            learning_rate,
            seed,
        } => run_gradient(&input, &target, learning_rate, seed),
        Commands::Genetic {
            input,
            target,
            population,
            learning_rate,
            seed,
        } => run_genetic(&input, &target, population, learning_rate, seed),
    }
}

fn run_gradient(
    input_path: &Path,
    target_path: &Path,
    learning_rate: f64,
    seed: Option<u64>,
) -> Result<()> {
    let (raw_input, target) = load_training_pair(input_path, target_path)?;
    let mut rng = make_rng(seed);
    let mut network = Network::new(&mut rng, polarize(&raw_input));

    println!("Gradient descent approach");
    println!("Input image:");
    print!("{}", render_image(&integer_view(&raw_input)));

    let mut iteration = 0;
    loop {
        println!("Reconstruction after {iteration} iterations:");
        print!("{}", render_image(&network.produce_output()));

        if !confirm_next_iteration() {
            return Ok(());
        }

        iteration += 1;
        let stats = gradient_iteration(&mut network, &target, learning_rate, iteration);
        println!("Mean squared error: {:.6}", stats.mse);
    }
}

fn run_genetic(
    input_path: &Path,
    target_path: &Path,
    population_size: usize,
    learning_rate: f64,
    seed: Option<u64>,
) -> Result<()> {
    let (raw_input, target) = load_training_pair(input_path, target_path)?;
    let mut rng = make_rng(seed);
    let mut population = Population::new(
        &mut rng,
        population_size,
        learning_rate,
        &polarize(&raw_input),
        target,
    );

    println!("Genetic algorithm approach");
    println!("Population size: {population_size}");
    println!("Input image:");
    print!("{}", render_image(&integer_view(&raw_input)));

    let mut iteration = 0;
    loop {
        println!("Reconstruction after {iteration} iterations:");
        print!("{}", render_image(&population.leader().produce_output()));

        if !confirm_next_iteration() {
            return Ok(());
        }

        iteration += 1;
        let stats = genetic_iteration(&mut population, &mut rng, iteration);
        println!("Mean squared error: {:.6}", stats.mse);
    }
}

/// Loads both matrices and applies the boundary validation: the input
/// must be non-empty and the target square.
fn load_training_pair(input_path: &Path, target_path: &Path) -> Result<(Grid<f64>, Grid<f64>)> {
    let input = load_grid(input_path)?;
    if input.is_empty() {
        return Err(Error::EmptyGrid);
    }

    let target = load_grid(target_path)?;
    if !target.is_square() {
        return Err(Error::NotSquare {
            rows: target.rows,
            cols: target.cols,
        });
    }

    Ok((input, target))
}

fn make_rng(seed: Option<u64>) -> impl RngCore {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn confirm_next_iteration() -> bool {
    println!("Run the next iteration? [y/n]");

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    answer.trim() == "y"
}

/// Literal cell values for display; presentation only.
fn integer_view(grid: &Grid<f64>) -> Grid<u8> {
    Grid {
        rows: grid.rows,
        cols: grid.cols,
        data: grid
            .data
            .iter()
            .map(|row| row.iter().map(|&value| value as u8).collect())
            .collect(),
    }
}

/// Zero cells render as blanks so the image shape stands out.
fn render_image(grid: &Grid<u8>) -> String {
    let mut out = String::new();
    for row in &grid.data {
        for &cell in row {
            if cell == 0 {
                out.push_str("  ");
            } else {
                out.push_str(&format!("{cell} "));
            }
        }
        out.push('\n');
    }
    out
}
