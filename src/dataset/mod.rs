pub mod anchors;
pub mod training_set;

pub use training_set::{Sample, TrainingSet};
