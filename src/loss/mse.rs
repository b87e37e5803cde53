/// Squared-error loss used to report training progress.
pub struct MseLoss;

impl MseLoss {
    /// mean((predicted - expected)²) over the output neurons.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>() / n
    }

    /// Per-output error `predicted - expected`, the factor backprop scales by
    /// the activation derivative to get the output delta.
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| a - b)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_averages_over_outputs() {
        assert_eq!(MseLoss::loss(&[1.0, 0.0], &[0.0, 0.0]), 0.5);
        assert_eq!(MseLoss::derivative(&[0.5, -1.0], &[1.0, -1.0]), vec![-0.5, 0.0]);
    }
}
