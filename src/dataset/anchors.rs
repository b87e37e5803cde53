//! Built-in target paths, as (x, y) anchor points joined by straight lines.

/// Low plateau, a jump to a high plateau, then a drop to zero:
///
/// ```text
///        ___
///        |  |___
///     ___|
/// ```
pub const STEP_PATH: &[(f64, f64)] = &[
    (-1.0, -1.0),
    (-0.32, -1.0),
    (-0.32, 1.0),
    (0.32, 1.0),
    (0.32, 0.0),
    (1.0, 0.0),
];

/// Like [`STEP_PATH`] but climbing to the high plateau along a ramp.
pub const RAMP_STEP_PATH: &[(f64, f64)] = &[
    (-1.0, -1.0),
    (-0.8, -1.0),
    (-0.5, -0.5),
    (-0.32, 1.0),
    (0.32, 1.0),
    (0.32, 0.0),
    (1.0, 0.0),
];

/// Samples per straight segment between two anchors.
pub const DEFAULT_POINTS_PER_SEGMENT: usize = 51;
