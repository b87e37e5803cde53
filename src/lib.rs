pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod dataset;
pub mod store;
pub mod formula;
pub mod curve;
pub mod registry;
pub mod train;
pub mod config;

// Convenience re-exports
pub use error::{NetError, Result};
pub use math::matrix::Matrix;
pub use network::{Network, NetworkSpec};
pub use dataset::{Sample, TrainingSet};
pub use store::{ParameterStore, FileStore, MemoryStore};
pub use registry::Registry;
pub use curve::{sample_curve, SampleGrid};
pub use train::{train_loop, train_loop_with, Checkpoint, PassStats, TrainConfig};
pub use config::RunConfig;
