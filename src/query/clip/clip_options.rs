use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, DEFAULT_RELATIVE_TOLERANCE};

/// The tolerance used to decide whether a vertex lies on a plane.
///
/// A vertex with a signed distance `d` to the plane such that `|d| <= epsilon`
/// is considered to lie on the plane.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Tolerance {
    /// `epsilon` is this value multiplied by the length of the diagonal of the
    /// bounding box of the mesh vertices.
    Relative(Real),
    /// `epsilon` is this value, whatever the size of the mesh.
    Absolute(Real),
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::Relative(DEFAULT_RELATIVE_TOLERANCE)
    }
}

/// Configuration of the plane clipping and slicing of triangle meshes.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ClipOptions {
    /// The tolerance used to classify vertices as lying on the plane.
    pub tolerance: Tolerance,
}

impl ClipOptions {
    /// Creates a [`ClipOptions`] with an absolute on-plane tolerance.
    pub fn with_absolute_tolerance(epsilon: Real) -> Self {
        Self {
            tolerance: Tolerance::Absolute(epsilon),
        }
    }

    /// Creates a [`ClipOptions`] with an on-plane tolerance relative to the size of the mesh.
    pub fn with_relative_tolerance(factor: Real) -> Self {
        Self {
            tolerance: Tolerance::Relative(factor),
        }
    }

    /// The on-plane tolerance to apply to a mesh with the given vertices.
    ///
    /// Negative or NaN tolerances are treated as zero.
    pub fn epsilon(&self, vertices: &[Point<Real>]) -> Real {
        let epsilon = match self.tolerance {
            Tolerance::Absolute(epsilon) => epsilon,
            Tolerance::Relative(factor) => {
                factor * Aabb::from_points(vertices.iter().copied()).diagonal_length()
            }
        };

        let epsilon = epsilon.max(0.0);
        log::trace!("plane tolerance {:?} resolved to {epsilon}", self.tolerance);
        epsilon
    }
}

#[cfg(test)]
mod test {
    use super::{ClipOptions, Tolerance};
    use crate::math::{Point, Real, DEFAULT_RELATIVE_TOLERANCE};

    #[test]
    fn relative_tolerance_scales_with_the_mesh() {
        let small = [Point::origin(), Point::new(1.0, 1.0, 1.0)];
        let large = [Point::origin(), Point::new(1000.0, 1000.0, 1000.0)];
        let options = ClipOptions::default();

        assert_eq!(options.tolerance, Tolerance::Relative(DEFAULT_RELATIVE_TOLERANCE));
        assert_relative_eq!(
            options.epsilon(&large),
            options.epsilon(&small) * 1000.0,
            max_relative = 1.0e-4
        );
        assert_eq!(options.epsilon(&[]), 0.0);
    }

    #[test]
    fn absolute_tolerance_is_clamped() {
        let pts = [Point::origin(), Point::new(1.0, 1.0, 1.0)];
        assert_eq!(ClipOptions::with_absolute_tolerance(0.5).epsilon(&pts), 0.5);
        assert_eq!(ClipOptions::with_absolute_tolerance(-0.5).epsilon(&pts), 0.0);
        assert_eq!(
            ClipOptions::with_absolute_tolerance(Real::NAN).epsilon(&pts),
            0.0
        );
        assert_eq!(ClipOptions::with_relative_tolerance(-1.0).epsilon(&pts), 0.0);
    }
}
