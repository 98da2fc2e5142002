//! Distance falloff models.
//!
//! The compositor scales each visible light's color by a falloff factor
//! computed from the distance between the light and the cell center. All
//! models implement the `Falloff` trait.

pub mod inverse_quadratic;

pub use inverse_quadratic::InverseQuadratic;

/// Trait for light falloff models.
pub trait Falloff {
    /// Attenuation factor for a light `distance` cells away.
    ///
    /// Expected to be 1.0 at distance 0 and non-increasing with distance.
    fn attenuate(&self, distance: f32) -> f32;
}

/// Converts a row of falloff samples to a formatted string for debugging
pub fn falloff_to_string<F: Falloff>(falloff: &F, max_distance: usize) -> String {
    let mut result = String::new();
    for d in 0..=max_distance {
        result.push_str(&format!("{:5.2} ", falloff.attenuate(d as f32)));
    }
    result
}
