//! Easing curves applied to range fractions.

use serde::{Deserialize, Serialize};

/// Curve shaping a 0..1 progress value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    #[default]
    Linear,
    SmoothStep,
    QuadraticIn,
    QuadraticOut,
    CubicOut,
}

impl Easing {
    /// Apply the curve to `t`. Input is expected in [0, 1]; output stays
    /// in [0, 1] for in-range input.
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
            Easing::QuadraticIn => t * t,
            Easing::QuadraticOut => t * (2.0 - t),
            Easing::CubicOut => {
                let t1 = t - 1.0;
                t1 * t1 * t1 + 1.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_fixed() {
        for easing in [
            Easing::Linear,
            Easing::SmoothStep,
            Easing::QuadraticIn,
            Easing::QuadraticOut,
            Easing::CubicOut,
        ] {
            assert!((easing.apply(0.0) - 0.0).abs() < 1e-6);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_smoothstep_midpoint() {
        assert!((Easing::SmoothStep.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_quadratic_out_front_loads() {
        assert!(Easing::QuadraticOut.apply(0.25) > 0.25);
        assert!(Easing::QuadraticIn.apply(0.25) < 0.25);
    }
}
