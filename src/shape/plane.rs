//! A plane with an oriented normal, delimiting the kept and discarded half-spaces.

use crate::math::{Point, Real, UnitVector, Vector};
use crate::query::ClipError;

/// The side of a plane a point lies on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlaneSide {
    /// The point lies strictly on the half-space the normal points away from.
    Negative,
    /// The point lies on the plane, within the classification tolerance.
    OnPlane,
    /// The point lies strictly on the half-space the normal points toward.
    Positive,
}

impl PlaneSide {
    /// Classifies a signed distance given a non-negative tolerance.
    #[inline]
    pub fn from_signed_distance(dist: Real, epsilon: Real) -> Self {
        if dist < -epsilon {
            PlaneSide::Negative
        } else if dist > epsilon {
            PlaneSide::Positive
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Is this on the kept side of a clipping plane, i.e., not negative?
    #[inline]
    pub fn is_kept(self) -> bool {
        self != PlaneSide::Negative
    }

    /// Are `self` and `other` strictly on opposite sides of the plane?
    #[inline]
    pub fn is_opposite(self, other: PlaneSide) -> bool {
        matches!(
            (self, other),
            (PlaneSide::Negative, PlaneSide::Positive) | (PlaneSide::Positive, PlaneSide::Negative)
        )
    }
}

/// An infinite plane defined by a point and a unit normal.
///
/// The signed distance of a point `pt` to the plane is
/// `(pt - point).dot(normal)`. Clipping keeps the points with a non-negative
/// signed distance.
#[derive(PartialEq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Plane {
    /// A point on the plane.
    pub point: Point<Real>,
    /// The unit normal of the plane, pointing toward the kept half-space.
    pub normal: UnitVector<Real>,
}

impl Plane {
    /// Builds a plane from a point and a (not necessarily normalized) normal.
    ///
    /// Fails with [`ClipError::DegeneratePlane`] if `normal` has a zero length, or if
    /// any component of `point` or `normal` is not finite.
    pub fn new(point: Point<Real>, normal: Vector<Real>) -> Result<Self, ClipError> {
        if !point.coords.iter().chain(normal.iter()).all(|x| x.is_finite()) {
            return Err(ClipError::DegeneratePlane);
        }

        let normal = UnitVector::try_new(normal, 0.0).ok_or(ClipError::DegeneratePlane)?;
        Ok(Self { point, normal })
    }

    /// Builds a plane from a point and a normal already known to be normalized.
    #[inline]
    pub fn from_unit_normal(point: Point<Real>, normal: UnitVector<Real>) -> Self {
        Self { point, normal }
    }

    /// The signed distance from `pt` to this plane.
    #[inline]
    pub fn signed_distance(&self, pt: &Point<Real>) -> Real {
        self.normal.dot(&(pt - self.point))
    }

    /// The side of this plane `pt` lies on, with the tolerance `epsilon`.
    #[inline]
    pub fn side(&self, pt: &Point<Real>, epsilon: Real) -> PlaneSide {
        PlaneSide::from_signed_distance(self.signed_distance(pt), epsilon)
    }

    /// The orthogonal projection of `pt` on this plane.
    #[inline]
    pub fn project_point(&self, pt: &Point<Real>) -> Point<Real> {
        pt - *self.normal * self.signed_distance(pt)
    }

    /// This plane shifted by `distance` along its normal.
    #[inline]
    pub fn offset(&self, distance: Real) -> Self {
        Self {
            point: self.point + *self.normal * distance,
            normal: self.normal,
        }
    }

    /// This plane with its normal flipped, swapping the kept and discarded half-spaces.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            point: self.point,
            normal: -self.normal,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Plane, PlaneSide};
    use crate::math::{Point, Real, Vector};
    use crate::query::ClipError;

    #[test]
    fn normal_is_normalized() {
        let plane = Plane::new(Point::new(0.5, 0.0, 0.0), Vector::new(10.0, 0.0, 0.0)).unwrap();
        assert_relative_eq!(plane.normal.into_inner(), Vector::x());
        assert_relative_eq!(plane.signed_distance(&Point::new(2.0, 3.0, -1.0)), 1.5);
        assert_eq!(plane.side(&Point::new(0.5, 7.0, 0.0), 0.0), PlaneSide::OnPlane);
        assert_eq!(plane.flipped().side(&Point::origin(), 0.0), PlaneSide::Positive);
    }

    #[test]
    fn zero_or_non_finite_normal_is_rejected() {
        assert_eq!(
            Plane::new(Point::origin(), Vector::zeros()),
            Err(ClipError::DegeneratePlane)
        );
        assert_eq!(
            Plane::new(Point::origin(), Vector::new(Real::NAN, 1.0, 0.0)),
            Err(ClipError::DegeneratePlane)
        );
        assert_eq!(
            Plane::new(Point::new(Real::INFINITY, 0.0, 0.0), Vector::x()),
            Err(ClipError::DegeneratePlane)
        );
    }

    #[test]
    fn offset_and_projection() {
        let plane = Plane::new(Point::origin(), Vector::new(0.0, 0.0, 2.0)).unwrap();
        let shifted = plane.offset(0.25);
        assert_relative_eq!(shifted.signed_distance(&Point::new(1.0, 1.0, 0.25)), 0.0);
        assert_relative_eq!(
            plane.project_point(&Point::new(1.0, 2.0, 3.0)),
            Point::new(1.0, 2.0, 0.0)
        );
    }

    #[test]
    fn opposite_sides() {
        assert!(PlaneSide::Negative.is_opposite(PlaneSide::Positive));
        assert!(!PlaneSide::OnPlane.is_opposite(PlaneSide::Positive));
        assert!(PlaneSide::OnPlane.is_kept());
        assert!(!PlaneSide::Negative.is_kept());
    }
}
