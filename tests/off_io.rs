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

use tridel::geometry::Point3;
use tridel::io::{read_off, read_off_from, write_off, write_off_to};
use tridel::mesh::TriMesh;
use tridel::MeshError;

const TWO_TRIANGLES: &str = "\
OFF
4 2 0

0 0 0
1 0 0
1 0 -1
0 0 -1

3 0 1 2
3 0 2 3
";

#[test]
fn read_builds_vertices_faces_and_adjacency() {
    let mesh: TriMesh<f64> = read_off_from(TWO_TRIANGLES.as_bytes()).unwrap();

    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.face_count(), 2);
    assert_eq!(mesh.vertices[2].position, Point3::new(1.0, 0.0, -1.0));

    // The shared edge (0, 2) was matched up.
    assert!(mesh.faces[0].neighbors.contains(&Some(1)));
    assert!(mesh.faces[1].neighbors.contains(&Some(0)));
    mesh.integrity_check().unwrap();
}

#[test]
fn read_accepts_comments_and_loose_whitespace() {
    let text = "\
# a triangle
OFF
3 1 0  # counts
0 0 0
 1  0  0
0 0 -1
3 0 1 2 # the face
";
    let mesh: TriMesh<f64> = read_off_from(text.as_bytes()).unwrap();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.face_count(), 1);
}

#[test]
fn read_rejects_a_bad_header() {
    let r: Result<TriMesh<f64>, _> = read_off_from("PLY\n0 0 0\n".as_bytes());
    assert!(matches!(r, Err(MeshError::MalformedFile { .. })));
}

#[test]
fn read_rejects_non_triangle_faces() {
    let text = "OFF\n4 1 0\n0 0 0\n1 0 0\n1 0 -1\n0 0 -1\n4 0 1 2 3\n";
    let r: Result<TriMesh<f64>, _> = read_off_from(text.as_bytes());
    assert!(matches!(r, Err(MeshError::MalformedFile { .. })));
}

#[test]
fn read_rejects_truncated_input() {
    let text = "OFF\n3 1 0\n0 0 0\n1 0 0\n";
    let r: Result<TriMesh<f64>, _> = read_off_from(text.as_bytes());
    assert!(matches!(r, Err(MeshError::MalformedFile { .. })));
}

#[test]
fn read_rejects_out_of_range_face_indices() {
    let text = "OFF\n3 1 0\n0 0 0\n1 0 0\n0 0 -1\n3 0 1 7\n";
    let r: Result<TriMesh<f64>, _> = read_off_from(text.as_bytes());
    assert!(matches!(r, Err(MeshError::InvalidIndex { index: 7, .. })));
}

#[test]
fn write_then_read_round_trips() {
    let mesh: TriMesh<f64> = read_off_from(TWO_TRIANGLES.as_bytes()).unwrap();

    let mut buf = Vec::new();
    write_off_to(&mesh, &mut buf).unwrap();
    let back: TriMesh<f64> = read_off_from(buf.as_slice()).unwrap();

    assert_eq!(back.vertex_count(), mesh.vertex_count());
    assert_eq!(back.face_count(), mesh.face_count());
    for (a, b) in back.vertices.iter().zip(&mesh.vertices) {
        assert_eq!(a.position, b.position);
    }
    for (a, b) in back.faces.iter().zip(&mesh.faces) {
        assert_eq!(a.vertices, b.vertices);
    }
}

#[test]
fn file_round_trip() {
    let mesh: TriMesh<f64> = read_off_from(TWO_TRIANGLES.as_bytes()).unwrap();
    let path = std::env::temp_dir().join(format!("tridel-off-{}.off", std::process::id()));

    write_off(&mesh, &path).unwrap();
    let back: TriMesh<f64> = read_off(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(back.vertex_count(), 4);
    assert_eq!(back.face_count(), 2);
    back.integrity_check().unwrap();
}
