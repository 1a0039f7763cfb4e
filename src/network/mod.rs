pub mod network;
pub mod neuron;

pub use network::Network;
pub use neuron::Neuron;
