use crate::{
    dataset::TrainingSet,
    loss::MseLoss,
    network::Network,
};

/// One online pass: every sample, in order, gets one `train_one` step.
/// Returns the mean squared error of the outputs seen before each step.
pub fn train_pass(network: &mut Network, set: &TrainingSet) -> f64 {
    if set.is_empty() {
        return 0.0;
    }

    let mut total_loss = 0.0;
    for sample in set {
        let output = network.backpropagate(&[sample.x], &[sample.y]);
        total_loss += MseLoss::loss(&output, &[sample.y]);
    }

    total_loss / set.len() as f64
}

/// Mean squared error over the set without updating anything.
pub fn evaluate(network: &mut Network, set: &TrainingSet) -> f64 {
    if set.is_empty() {
        return 0.0;
    }

    let total: f64 = set
        .iter()
        .map(|sample| {
            let output = network.predict(&[sample.x]);
            MseLoss::loss(&output, &[sample.y])
        })
        .sum();
    total / set.len() as f64
}
