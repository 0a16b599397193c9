// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 the tridel authors
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use tridel::geometry::{Point3, Vector3};
use tridel::mesh::TriMesh;

/// Flat hexagonal disk in the ground plane: vertex 0 at the origin, six
/// ring vertices, six faces wound CCW when seen from above.
fn hexagon() -> TriMesh<f64> {
    let mut mesh = TriMesh::new();
    mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
    for k in 0..6 {
        let theta = std::f64::consts::FRAC_PI_3 * k as f64;
        mesh.add_vertex(Point3::new(theta.cos(), 0.0, -theta.sin()));
    }
    for k in 0..6 {
        mesh.add_face(0, 1 + k, 1 + (k + 1) % 6).unwrap();
    }
    mesh
}

#[test]
fn hexagon_center_has_a_closed_fan() {
    let mesh = hexagon();
    let fan: Vec<usize> = mesh.faces_around_vertex(0).collect();
    assert_eq!(fan.len(), 6);
    mesh.integrity_check().unwrap();
}

#[test]
fn laplacian_of_positions_vanishes_on_a_flat_interior_vertex() {
    let mesh = hexagon();
    let lap: Vector3<f64> = mesh.laplacian(0, |i| mesh.vertices[i].position.to_vector());
    assert!(lap.norm() < 1e-9, "got {lap:?}");
}

#[test]
fn laplacian_of_a_linear_field_vanishes() {
    let mesh = hexagon();
    let lap: f64 = mesh.laplacian(0, |i| {
        let p = mesh.vertices[i].position;
        3.0 * p.x - 2.0 * p.z + 1.0
    });
    assert!(lap.abs() < 1e-9, "got {lap}");
}

#[test]
fn laplacian_is_positive_at_a_strict_minimum() {
    let mesh = hexagon();
    // Paraboloid field: zero at the center, positive on the ring.
    let lap: f64 = mesh.laplacian(0, |i| {
        let p = mesh.vertices[i].position;
        p.x * p.x + p.z * p.z
    });
    assert!(lap > 0.0, "got {lap}");
}

#[test]
fn laplacian_on_a_boundary_vertex_is_zero() {
    let mesh = hexagon();
    // Ring vertices have open fans.
    let lap: Vector3<f64> = mesh.laplacian(1, |i| mesh.vertices[i].position.to_vector());
    assert_eq!(lap, Vector3::default());
}

#[test]
fn laplacian_points_inward_on_a_curved_vertex() {
    let mut mesh = hexagon();
    // Lift the center out of the plane; the position Laplacian approximates
    // mean curvature flow and must pull it back down.
    mesh.set_vertex_position(0, Point3::new(0.0, 0.5, 0.0)).unwrap();
    let lap: Vector3<f64> = mesh.laplacian(0, |i| mesh.vertices[i].position.to_vector());
    assert!(lap.y < 0.0, "got {lap:?}");
    assert!(lap.x.abs() < 1e-9 && lap.z.abs() < 1e-9, "got {lap:?}");
}

#[test]
fn heat_data_keeps_a_constant_field_constant() {
    let mesh = hexagon();
    let data = mesh.to_heat_data(|_| 4.5, 0.1);
    assert_eq!(data.vertices.len(), 7);
    for v in &data.vertices {
        assert!((v.scalar - 4.5).abs() < 1e-9);
    }
}

#[test]
fn heat_data_diffuses_towards_the_neighborhood_mean() {
    let mesh = hexagon();
    // Hot center, cold ring: one diffusion step must cool the center.
    let field = |i: usize| if i == 0 { 1.0 } else { 0.0 };
    let data = mesh.to_heat_data(field, 0.01);
    assert!(data.vertices[0].scalar < 1.0);
    // Boundary vertices have no closed fan and keep their value.
    assert_eq!(data.vertices[1].scalar, 0.0);
}

#[test]
fn smooth_render_data_indexes_every_face() {
    let mesh = hexagon();
    let data = mesh.to_smooth_render_data();
    assert_eq!(data.vertices.len(), 7);
    assert_eq!(data.indices.len(), 18);
    assert!(data.indices.iter().all(|&i| (i as usize) < 7));
}

#[test]
fn flat_render_data_triplicates_corners_with_up_normals() {
    let mesh = hexagon();
    let data = mesh.to_flat_render_data();
    assert_eq!(data.vertices.len(), 18);
    assert_eq!(data.indices.len(), 18);
    for v in &data.vertices {
        assert!((v.normal.x).abs() < 1e-9);
        assert!((v.normal.y - 1.0).abs() < 1e-9);
        assert!((v.normal.z).abs() < 1e-9);
    }
}

#[test]
fn flat_render_data_skips_infinite_faces() {
    let mut mesh: TriMesh<f64> = TriMesh::new();
    mesh.add_vertex(Point3::new(-200.0, 0.0, 0.0));
    mesh.add_vertex(Point3::new(0.0, 0.0, 200.0));
    mesh.add_vertex(Point3::new(200.0, 0.0, 0.0));
    mesh.add_first_face_for_triangulation(0, 1, 2).unwrap();

    let data = mesh.to_flat_render_data();
    assert_eq!(data.vertices.len(), 3, "only the one finite face is exported");
}
