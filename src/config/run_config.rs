use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::dataset::anchors::{DEFAULT_POINTS_PER_SEGMENT, RAMP_STEP_PATH, STEP_PATH};
use crate::dataset::TrainingSet;
use crate::error::{NetError, Result};
use crate::network::NetworkSpec;

/// Which target path the networks learn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PathChoice {
    Step,
    RampStep,
    Custom { anchors: Vec<(f64, f64)> },
}

impl PathChoice {
    pub fn anchors(&self) -> &[(f64, f64)] {
        match self {
            PathChoice::Step => STEP_PATH,
            PathChoice::RampStep => RAMP_STEP_PATH,
            PathChoice::Custom { anchors } => anchors.as_slice(),
        }
    }
}

/// Everything the `pathfit-nn` binary needs for one run. Every field has a
/// default, so a config file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub networks: Vec<NetworkSpec>,
    pub path: PathChoice,
    pub points_per_segment: usize,
    /// `None` trains until `q` is entered on stdin.
    pub passes: Option<usize>,
    pub render_every: usize,
    /// Save (and export, if enabled) every this many passes; `0` never.
    pub save_every: usize,
    /// RNG seed for parameter initialisation; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub store_dir: PathBuf,
    pub export_dir: PathBuf,
    pub load_on_start: bool,
    pub save_on_finish: bool,
    pub export_formulas: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            networks: NetworkSpec::comparison_set(),
            path: PathChoice::Step,
            points_per_segment: DEFAULT_POINTS_PER_SEGMENT,
            passes: Some(2000),
            render_every: 10,
            save_every: 500,
            seed: None,
            store_dir: PathBuf::from("trained_models"),
            export_dir: PathBuf::from("trained_models"),
            load_on_start: true,
            save_on_finish: true,
            export_formulas: true,
        }
    }
}

impl RunConfig {
    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `RunConfig` from a JSON file.
    pub fn load_json(path: &str) -> Result<RunConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Rejects configs that cannot produce a meaningful run. Layer shapes
    /// themselves are checked when the networks are built.
    pub fn validate(&self) -> Result<()> {
        if self.networks.is_empty() {
            return Err(NetError::Config("no networks configured".into()));
        }
        let mut seen = HashSet::new();
        for spec in &self.networks {
            if !seen.insert(spec.id) {
                return Err(NetError::Config(format!("network id {} listed twice", spec.id)));
            }
            if spec.layers.first() != Some(&1) || spec.layers.last() != Some(&1) {
                return Err(NetError::Config(format!(
                    "network {} must take 1 input and give 1 output to learn a path",
                    spec.id
                )));
            }
            if !(spec.learning_rate > 0.0) {
                return Err(NetError::Config(format!(
                    "network {}: learning rate must be positive",
                    spec.id
                )));
            }
        }
        if self.path.anchors().len() < 2 {
            return Err(NetError::Config("a path needs at least two anchors".into()));
        }
        if self.points_per_segment == 0 {
            return Err(NetError::Config("points_per_segment must be at least 1".into()));
        }
        Ok(())
    }

    pub fn training_set(&self) -> TrainingSet {
        TrainingSet::from_anchors(self.path.anchors(), self.points_per_segment)
    }
}
