use std::f64::consts::E;

/// Logistic sigmoid `1 / (1 + e^-x)`.
///
/// Saturates towards 0 and 1 for large |x|; no clamping is applied.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Slope of the sigmoid expressed through its own output: `y * (1 - y)`.
pub fn sigmoid_slope(y: f64) -> f64 {
    y * (1.0 - y)
}
