#![allow(dead_code)]

use planeclip3d::math::{Point, Real};
use planeclip3d::shape::TriMesh;

/// An axis-aligned box with one corner at the origin, wound counter-clockwise
/// when seen from outside.
pub fn build_box(width: Real, height: Real, depth: Real) -> TriMesh {
    let vertices = vec![
        Point::new(0.0, 0.0, 0.0),
        Point::new(width, 0.0, 0.0),
        Point::new(0.0, 0.0, depth),
        Point::new(width, 0.0, depth),
        Point::new(0.0, height, 0.0),
        Point::new(width, height, 0.0),
        Point::new(0.0, height, depth),
        Point::new(width, height, depth),
    ];
    let indices = vec![
        [4, 7, 5],
        [4, 6, 7],
        [0, 2, 4],
        [2, 6, 4],
        [0, 1, 2],
        [1, 3, 2],
        [1, 5, 7],
        [1, 7, 3],
        [2, 3, 7],
        [2, 7, 6],
        [0, 4, 1],
        [1, 4, 5],
    ];

    TriMesh::new(vertices, indices).unwrap()
}

pub fn build_unit_box() -> TriMesh {
    build_box(1.0, 1.0, 1.0)
}

/// A UV sphere centered at the origin, with one vertex at each pole.
pub fn build_sphere(radius: Real, nrings: u32, nsegments: u32) -> TriMesh {
    use core::f64::consts::PI;

    let mut vertices = vec![Point::new(0.0, 0.0, radius)];

    for ring in 1..nrings {
        let theta = PI * ring as f64 / nrings as f64;

        for segment in 0..nsegments {
            let phi = 2.0 * PI * segment as f64 / nsegments as f64;
            vertices.push(Point::new(
                (theta.sin() * phi.cos()) as Real * radius,
                (theta.sin() * phi.sin()) as Real * radius,
                theta.cos() as Real * radius,
            ));
        }
    }

    vertices.push(Point::new(0.0, 0.0, -radius));

    let south = vertices.len() as u32 - 1;
    let ring_vertex = |ring: u32, segment: u32| 1 + (ring - 1) * nsegments + segment % nsegments;
    let mut indices = vec![];

    for segment in 0..nsegments {
        indices.push([0, ring_vertex(1, segment), ring_vertex(1, segment + 1)]);
        indices.push([
            south,
            ring_vertex(nrings - 1, segment + 1),
            ring_vertex(nrings - 1, segment),
        ]);
    }

    for ring in 1..nrings - 1 {
        for segment in 0..nsegments {
            let (u0, u1) = (ring_vertex(ring, segment), ring_vertex(ring, segment + 1));
            let (l0, l1) = (
                ring_vertex(ring + 1, segment),
                ring_vertex(ring + 1, segment + 1),
            );
            indices.push([u0, l0, l1]);
            indices.push([u0, l1, u1]);
        }
    }

    TriMesh::new(vertices, indices).unwrap()
}

/// Counts the segments attached to each point of a contour.
pub fn point_degrees(num_points: usize, lines: &[[u32; 2]]) -> Vec<usize> {
    let mut degrees = vec![0; num_points];

    for line in lines {
        degrees[line[0] as usize] += 1;
        degrees[line[1] as usize] += 1;
    }

    degrees
}
