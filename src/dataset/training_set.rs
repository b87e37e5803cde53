use serde::{Deserialize, Serialize};

/// One training pair: the network sees `x` and should answer `y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

/// Ordered, immutable training data for a 1-in/1-out network.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    samples: Vec<Sample>,
}

impl TrainingSet {
    pub fn new(samples: Vec<Sample>) -> TrainingSet {
        TrainingSet { samples }
    }

    /// Interpolates `points_per_segment` evenly spaced samples along each
    /// segment between consecutive anchors. Each segment includes its start
    /// point and stops one step short of its end, so the final anchor is
    /// never emitted.
    pub fn from_anchors(anchors: &[(f64, f64)], points_per_segment: usize) -> TrainingSet {
        let n = points_per_segment as f64;
        let samples = anchors
            .windows(2)
            .flat_map(|pair| {
                let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
                let (x_step, y_step) = ((x2 - x1) / n, (y2 - y1) / n);
                (0..points_per_segment).map(move |j| Sample {
                    x: x1 + x_step * j as f64,
                    y: y1 + y_step * j as f64,
                })
            })
            .collect();
        TrainingSet { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl<'a> IntoIterator for &'a TrainingSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
