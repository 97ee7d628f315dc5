use crate::math::{Point, Real};
use core::fmt;

/// Indicated an inconsistency while building a line set.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LineSetBuilderError {
    /// A segment references a point that does not exist.
    #[error("the segment {segment} references the point {index}, but the line set only has {num_points} points.")]
    InvalidIndex {
        /// The index of the faulty segment.
        segment: u32,
        /// The out-of-bounds point index.
        index: u32,
        /// The number of points of the line set.
        num_points: usize,
    },
}

/// A set of segments sharing a point buffer.
///
/// This is what slicing a [`TriMesh`](crate::shape::TriMesh) with planes produces: each
/// closed cross-section of the mesh shows up as a loop of segments.
#[cfg_attr(
    feature = "serde-serialize",
    derive(Serialize, Deserialize),
    serde(try_from = "RawLineSet")
)]
#[derive(Clone, Default, PartialEq)]
pub struct LineSet {
    points: Vec<Point<Real>>,
    lines: Vec<[u32; 2]>,
}

#[cfg(feature = "serde-serialize")]
#[derive(Deserialize)]
struct RawLineSet {
    points: Vec<Point<Real>>,
    lines: Vec<[u32; 2]>,
}

#[cfg(feature = "serde-serialize")]
impl TryFrom<RawLineSet> for LineSet {
    type Error = LineSetBuilderError;

    fn try_from(raw: RawLineSet) -> Result<Self, Self::Error> {
        LineSet::new(raw.points, raw.lines)
    }
}

impl fmt::Debug for LineSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LineSet {{ {} points, {} lines }}",
            self.points.len(),
            self.lines.len()
        )
    }
}

impl LineSet {
    /// Creates a new line set from a point buffer and a segment index buffer.
    pub fn new(points: Vec<Point<Real>>, lines: Vec<[u32; 2]>) -> Result<Self, LineSetBuilderError> {
        for (segment, idx) in lines.iter().enumerate() {
            if let Some(index) = idx.iter().find(|i| **i as usize >= points.len()) {
                return Err(LineSetBuilderError::InvalidIndex {
                    segment: segment as u32,
                    index: *index,
                    num_points: points.len(),
                });
            }
        }

        Ok(Self { points, lines })
    }

    pub(crate) fn from_raw_parts(points: Vec<Point<Real>>, lines: Vec<[u32; 2]>) -> Self {
        Self { points, lines }
    }

    /// The point buffer of this line set.
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }

    /// The segment index buffer of this line set.
    pub fn lines(&self) -> &[[u32; 2]] {
        &self.lines
    }

    /// The number of points of this line set.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The number of segments of this line set.
    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    /// Does this line set have no segment?
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// An iterator through the endpoints of every segment of this line set.
    pub fn segments(&self) -> impl ExactSizeIterator<Item = [Point<Real>; 2]> + '_ {
        self.lines
            .iter()
            .map(move |idx| [self.points[idx[0] as usize], self.points[idx[1] as usize]])
    }

    /// The sum of the lengths of every segment.
    pub fn total_length(&self) -> Real {
        self.segments().map(|[a, b]| na::distance(&a, &b)).sum()
    }

    /// Splits this line set into its point buffer and its segment buffer.
    pub fn into_buffers(self) -> (Vec<Point<Real>>, Vec<[u32; 2]>) {
        (self.points, self.lines)
    }
}

#[cfg(test)]
mod test {
    use super::{LineSet, LineSetBuilderError};
    use crate::math::Point;

    #[test]
    fn invalid_segment_index() {
        assert_eq!(
            LineSet::new(vec![Point::origin(); 2], vec![[0, 1], [1, 2]]),
            Err(LineSetBuilderError::InvalidIndex {
                segment: 1,
                index: 2,
                num_points: 2
            })
        );
    }

    #[test]
    fn total_length() {
        let lines = LineSet::new(
            vec![
                Point::origin(),
                Point::new(3.0, 0.0, 0.0),
                Point::new(3.0, 4.0, 0.0),
            ],
            vec![[0, 1], [1, 2], [2, 0]],
        )
        .unwrap();
        assert_relative_eq!(lines.total_length(), 12.0);
    }

    #[cfg(feature = "serde-serialize")]
    #[test]
    fn deserialization_checks_indices() {
        use super::RawLineSet;

        let raw = RawLineSet {
            points: vec![Point::origin()],
            lines: vec![[0, 5]],
        };
        assert_eq!(
            LineSet::try_from(raw),
            Err(LineSetBuilderError::InvalidIndex {
                segment: 0,
                index: 5,
                num_points: 1
            })
        );

        let raw = RawLineSet {
            points: vec![Point::origin(), Point::new(1.0, 0.0, 0.0)],
            lines: vec![[0, 1]],
        };
        assert_eq!(LineSet::try_from(raw).map(|l| l.num_lines()), Ok(1));
    }
}
