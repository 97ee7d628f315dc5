//! Definition of the triangle shape.

use crate::math::{Isometry, Point, Real, UnitVector, Vector, DEFAULT_EPSILON};

/// A triangle shape.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
}

impl From<[Point<Real>; 3]> for Triangle {
    fn from(arr: [Point<Real>; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl Triangle {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// The three vertices of this triangle.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 3] {
        [self.a, self.b, self.c]
    }

    /// Returns a new triangle with vertices transformed by `m`.
    #[inline]
    pub fn transformed(&self, m: &Isometry<Real>) -> Self {
        Triangle::new(m * self.a, m * self.b, m * self.c)
    }

    /// A vector normal of this triangle.
    ///
    /// The vector points such that it is collinear to `AB × AC` (where `×` denotes the cross
    /// product). Its length is twice the area of the triangle.
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        ab.cross(&ac)
    }

    /// The normal of this triangle assuming it is oriented ccw.
    ///
    /// The normal points such that it is collinear to `AB × AC` (where `×` denotes the cross
    /// product). Returns `None` for a degenerate triangle.
    #[inline]
    pub fn normal(&self) -> Option<UnitVector<Real>> {
        UnitVector::try_new(self.scaled_normal(), DEFAULT_EPSILON)
    }

    /// The area of this triangle.
    #[inline]
    pub fn area(&self) -> Real {
        self.scaled_normal().norm() * 0.5
    }

    /// The geometric center of this triangle.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        Point::from((self.a.coords + self.b.coords + self.c.coords) / 3.0)
    }

    /// Tests if this triangle is affinely dependent, i.e., its points are almost aligned.
    ///
    /// The threshold is absolute, so this is only meaningful for triangles
    /// with edges of length close to one. See [`Triangle::is_degenerate`]
    /// for a scale-independent test.
    pub fn is_affinely_dependent(&self) -> bool {
        const EPS: Real = DEFAULT_EPSILON * 100.0;

        let p1p2 = self.b - self.a;
        let p1p3 = self.c - self.a;
        relative_eq!(p1p2.cross(&p1p3).norm_squared(), 0.0, epsilon = EPS * EPS)
    }

    /// Tests if two vertices of this triangle coincide, or if its three vertices
    /// are collinear up to machine precision.
    ///
    /// The test bounds the sine of the angle at `a`, so it does not depend on the
    /// scale of the triangle.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        let cross = ab.cross(&ac).norm_squared();
        cross <= DEFAULT_EPSILON * DEFAULT_EPSILON * ab.norm_squared() * ac.norm_squared()
    }
}

#[cfg(test)]
mod test {
    use crate::math::{Point, Real, Vector};
    use crate::shape::Triangle;

    #[test]
    fn normal_follows_winding() {
        let tri = Triangle::new(
            Point::origin(),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(tri.normal().unwrap().into_inner(), Vector::z());

        let flipped = Triangle::new(tri.a, tri.c, tri.b);
        assert_relative_eq!(flipped.normal().unwrap().into_inner(), -Vector::z());
        assert_relative_eq!(tri.area(), 0.5);
    }

    #[test]
    fn degeneracy_is_scale_independent() {
        let scale: Real = 1.0e-8;
        let tiny = Triangle::new(
            Point::origin(),
            Point::new(scale, 0.0, 0.0),
            Point::new(0.0, scale, 0.0),
        );
        assert!(!tiny.is_degenerate());
        // The absolute test flags it, the relative one does not.
        assert!(tiny.is_affinely_dependent());

        let collinear = Triangle::new(
            Point::origin(),
            Point::new(1.0, 1.0, 1.0),
            Point::new(2.0, 2.0, 2.0),
        );
        assert!(collinear.is_degenerate());

        let repeated = Triangle::new(Point::origin(), Point::origin(), Point::new(1.0, 0.0, 0.0));
        assert!(repeated.is_degenerate());
    }
}
