pub mod trainer;
pub mod pass_stats;
pub mod train_config;
pub mod loop_fn;
pub mod checkpoint;

pub use trainer::{train_pass, evaluate};
pub use pass_stats::PassStats;
pub use train_config::TrainConfig;
pub use loop_fn::{train_loop, train_loop_with};
pub use checkpoint::Checkpoint;
