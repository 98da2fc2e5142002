//! Inverse-quadratic falloff: `1 / (1 + a*d + b*d^2)`.
//!
//! Not a photometric model, just a cheap curve that is 1.0 at the light and
//! fades smoothly without the singularity of a plain `1/d^2`.

use super::Falloff;

/// Default linear coefficient `a`
pub const DEFAULT_LINEAR: f32 = 0.1;
/// Default quadratic coefficient `b`
pub const DEFAULT_QUADRATIC: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseQuadratic {
    /// Linear term `a`
    pub linear: f32,
    /// Quadratic term `b`
    pub quadratic: f32,
}

impl Default for InverseQuadratic {
    fn default() -> Self {
        InverseQuadratic {
            linear: DEFAULT_LINEAR,
            quadratic: DEFAULT_QUADRATIC,
        }
    }
}

impl InverseQuadratic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coefficients(linear: f32, quadratic: f32) -> Self {
        InverseQuadratic { linear, quadratic }
    }
}

impl Falloff for InverseQuadratic {
    #[inline]
    fn attenuate(&self, distance: f32) -> f32 {
        1.0 / (1.0 + self.linear * distance + self.quadratic * distance * distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attenuation::falloff_to_string;

    #[test]
    fn test_unit_at_source() {
        assert_eq!(InverseQuadratic::new().attenuate(0.0), 1.0);
        assert_eq!(InverseQuadratic::with_coefficients(3.0, 9.0).attenuate(0.0), 1.0);
    }

    #[test]
    fn test_default_curve() {
        let falloff = InverseQuadratic::new();
        // 1 / (1 + 0.1 + 0.1)
        assert!((falloff.attenuate(1.0) - 1.0 / 1.2).abs() < 1e-6);
        // 1 / (1 + 0.1*sqrt(2) + 0.1*2)
        let diag = falloff.attenuate(std::f32::consts::SQRT_2);
        assert!((diag - 0.745_478).abs() < 1e-4, "diag = {}", diag);
    }

    #[test]
    fn test_monotonic() {
        let falloff = InverseQuadratic::new();
        println!("Falloff: {}", falloff_to_string(&falloff, 10));
        let mut prev = falloff.attenuate(0.0);
        for d in 1..50 {
            let att = falloff.attenuate(d as f32 * 0.5);
            assert!(att < prev && att > 0.0);
            prev = att;
        }
    }
}
