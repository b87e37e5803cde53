pub mod grid;

pub use grid::{sample_curve, SampleGrid};
