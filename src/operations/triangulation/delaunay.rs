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

//! Incremental planar triangulation over the ground plane, with Delaunay
//! legalization.
//!
//! The mesh triangulates the projection `(x, -z)` of its vertices. A single
//! sentinel vertex far below the plane closes the structure: every convex
//! hull edge is shared with an "infinite" face incident to the sentinel, so
//! hull growth is ordinary face surgery and no code path ever deals with a
//! missing neighbor.

use std::collections::VecDeque;

use ahash::AHashSet;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::error::{MeshError, Result};
use crate::geometry::Point3;
use crate::kernel::predicates::{ground, in_circle, orient2d};
use crate::mesh::basic_types::{Edge, Face, TriMesh};
use crate::numeric::scalar::Scalar;

impl<T: Scalar> TriMesh<T> {
    /// Bootstraps triangulation mode on an empty mesh from three existing
    /// vertices, CCW in the ground plane.
    ///
    /// Creates the infinite sentinel vertex plus four mutually wired faces:
    /// the real triangle and one infinite face per hull edge. Returns the
    /// real face's index.
    pub fn add_first_face_for_triangulation(
        &mut self,
        v0: usize,
        v1: usize,
        v2: usize,
    ) -> Result<usize> {
        for v in [v0, v1, v2] {
            if v >= self.vertices.len() {
                return Err(MeshError::InvalidIndex {
                    index: v,
                    len: self.vertices.len(),
                });
            }
        }
        if !self.faces.is_empty() || self.infinite_vertex.is_some() {
            return Err(MeshError::NotTriangulation);
        }

        let inf = self.add_vertex(Point3::new(
            T::from_f64(0.0),
            T::from_f64(-1e7),
            T::from_f64(0.0),
        ));
        self.infinite_vertex = Some(inf);

        let f = self.faces.len();
        let (f_inf0, f_inf1, f_inf2) = (f + 1, f + 2, f + 3);

        self.faces.push(Face {
            vertices: [v0, v1, v2],
            neighbors: [Some(f_inf1), Some(f_inf2), Some(f_inf0)],
        });
        self.faces.push(Face {
            vertices: [inf, v1, v0],
            neighbors: [Some(f), Some(f_inf2), Some(f_inf1)],
        });
        self.faces.push(Face {
            vertices: [inf, v2, v1],
            neighbors: [Some(f), Some(f_inf0), Some(f_inf2)],
        });
        self.faces.push(Face {
            vertices: [inf, v0, v2],
            neighbors: [Some(f), Some(f_inf1), Some(f_inf0)],
        });

        self.vertices[inf].face = f_inf0;
        for v in [v0, v1, v2] {
            self.vertices[v].face = f;
        }

        Ok(f)
    }

    /// Finite face whose ground-plane projection contains the point, if
    /// any. Linear scan; a point on an edge counts as inside.
    pub fn face_containing_point(&self, point: &Point3<T>) -> Option<usize> {
        let p = ground(point);

        'faces: for f_i in 0..self.faces.len() {
            if self.is_face_infinite(f_i) {
                continue;
            }
            let f = &self.faces[f_i];
            for i in 0..3 {
                let a = ground(&self.vertices[f.vertices[i]].position);
                let b = ground(&self.vertices[f.vertices[(i + 1) % 3]].position);
                // For a CCW face the point is outside as soon as it lies
                // strictly right of one directed edge.
                if orient2d(&a, &p, &b) > T::zero() {
                    continue 'faces;
                }
            }
            return Some(f_i);
        }

        None
    }

    /// True iff the point lies strictly on the outer side of the directed
    /// hull edge `(v0, v1)` in the ground plane.
    pub(crate) fn point_sees_edge(&self, point: &Point3<T>, v0: usize, v1: usize) -> bool {
        let a = ground(&self.vertices[v0].position);
        let b = ground(&self.vertices[v1].position);
        let p = ground(point);
        orient2d(&a, &p, &b) > T::zero()
    }

    /// Inserts a point into the triangulation: a split of the containing
    /// face for interior points, hull growth for exterior ones. Returns the
    /// new vertex's index.
    ///
    /// Hull growth walks the infinite-vertex fan once over a snapshot,
    /// marks which hull edges the point sees, splits the infinite face over
    /// the first visible edge of the run and flips the radial infinite edge
    /// before each remaining visible face, so the new vertex ends up
    /// connected to every hull vertex it can see.
    pub fn add_streaming_vertex(&mut self, position: Point3<T>) -> Result<usize> {
        let inf = self.infinite_vertex.ok_or(MeshError::NotTriangulation)?;

        if let Some(face) = self.face_containing_point(&position) {
            trace!(face, "interior insertion");
            return self.face_split(face, position);
        }

        let fan: SmallVec<[usize; 16]> = self.faces_around_vertex(inf).collect();
        let n = fan.len();
        let visible: SmallVec<[bool; 16]> = fan
            .iter()
            .map(|&f| {
                let face = &self.faces[f];
                // local_vertex_index cannot fail on the fan's own faces
                let l = self.local_vertex_index(inf, f).unwrap_or(0);
                self.point_sees_edge(
                    &position,
                    face.vertices[(l + 2) % 3],
                    face.vertices[(l + 1) % 3],
                )
            })
            .collect();

        // Start of the visible run: a visible face whose CW predecessor is
        // not visible. No such face means the point sees nothing (or,
        // degenerately, everything) and the hull cannot grow towards it.
        let start = (0..n)
            .find(|&k| visible[k] && !visible[(k + n - 1) % n])
            .ok_or(MeshError::NoVisibleHullEdge)?;
        let run = (0..n).take_while(|&i| visible[(start + i) % n]).count();
        trace!(start = fan[start], run, "hull growth");

        let vertex = self.face_split(fan[start], position)?;

        for i in 1..run {
            let f = fan[(start + i) % n];
            let l = self
                .local_vertex_index(inf, f)
                .ok_or(MeshError::VertexNotInFace { vertex: inf, face: f })?;
            let hull_vertex = self.faces[f].vertices[(l + 1) % 3];
            self.edge_flip(inf, hull_vertex)?;
        }

        Ok(vertex)
    }

    fn face_apex(&self, face: usize, v0: usize, v1: usize) -> Result<usize> {
        self.faces[face]
            .vertices
            .iter()
            .copied()
            .find(|&v| v != v0 && v != v1)
            .ok_or(MeshError::IntegrityViolation {
                details: format!("face {face} is degenerate"),
            })
    }

    fn edge_delaunay_between(&self, v0: usize, v1: usize, if0: usize, if1: usize) -> Result<bool> {
        if self.is_infinite_vertex(v0) || self.is_infinite_vertex(v1) {
            return Ok(true);
        }
        // Hull edges have one infinite incident face and are always kept.
        if self.is_face_infinite(if0) || self.is_face_infinite(if1) {
            return Ok(true);
        }

        let [a, b, c] = self.faces[if1].vertices;
        let d = self.face_apex(if0, v0, v1)?;

        let det = in_circle(
            &ground(&self.vertices[a].position),
            &ground(&self.vertices[b].position),
            &ground(&self.vertices[c].position),
            &ground(&self.vertices[d].position),
        );
        Ok(det <= T::zero())
    }

    /// Whether the edge `(v0, v1)` satisfies the local Delaunay criterion
    /// in the ground plane: the opposite vertex of each incident face lies
    /// on or outside the other face's circumcircle. Edges incident to the
    /// infinite vertex or to an infinite face are always legal.
    pub fn is_edge_delaunay(&self, v0: usize, v1: usize) -> Result<bool> {
        let (if0, if1) = self.edge_faces(v0, v1)?;
        self.edge_delaunay_between(v0, v1, if0, if1)
    }

    /// Flip-propagation sweep over a queue of candidate edges, identified
    /// by their endpoint pair so that earlier flips cannot leave stale face
    /// indices behind. Returns the number of flips performed.
    fn legalize(&mut self, mut queue: VecDeque<(usize, usize)>) -> Result<usize> {
        let cap = (self.faces.len() * self.faces.len()).max(1024);
        let mut iterations = 0usize;
        let mut flips = 0usize;

        while let Some((v0, v1)) = queue.pop_front() {
            iterations += 1;
            if iterations > cap {
                return Err(MeshError::LegalizationDivergence { iterations });
            }

            if self.is_infinite_vertex(v0) || self.is_infinite_vertex(v1) {
                continue;
            }
            // The edge may have been flipped away by now.
            let (if0, if1) = match self.edge_faces(v0, v1) {
                Ok(faces) => faces,
                Err(MeshError::EdgeNotFound { .. }) => continue,
                Err(e) => return Err(e),
            };
            if self.edge_delaunay_between(v0, v1, if0, if1)? {
                continue;
            }

            let flipped = self.edge_flip(v0, v1)?;
            flips += 1;

            let (a0, a1) = flipped.vertices;
            queue.push_back((v0, a0));
            queue.push_back((a0, v1));
            queue.push_back((v1, a1));
            queue.push_back((a1, v0));
            queue.push_back((a0, a1));
        }

        debug!(flips, iterations, "legalization finished");
        Ok(flips)
    }

    /// Inserts a point and restores the Delaunay property around it,
    /// seeding legalization with the ring of edges opposite the new vertex.
    /// Returns the number of flips performed.
    pub fn add_streaming_delaunay_vertex(&mut self, position: Point3<T>) -> Result<usize> {
        let vertex = self.add_streaming_vertex(position)?;

        let ring: SmallVec<[usize; 16]> = self.faces_around_vertex(vertex).collect();
        let mut queue = VecDeque::with_capacity(ring.len());
        for f in ring {
            let l = self
                .local_vertex_index(vertex, f)
                .ok_or(MeshError::VertexNotInFace { vertex, face: f })?;
            let face = &self.faces[f];
            queue.push_back((face.vertices[(l + 1) % 3], face.vertices[(l + 2) % 3]));
        }

        self.legalize(queue)
    }

    /// Re-legalizes the whole triangulation, seeding the sweep with every
    /// interior edge once. Returns the number of flips performed.
    pub fn delaunay_algorithm(&mut self) -> Result<usize> {
        let mut seen = AHashSet::new();
        let mut queue = VecDeque::new();

        for f in 0..self.faces.len() {
            if self.is_face_infinite(f) {
                continue;
            }
            for k in 0..3 {
                let a = self.faces[f].vertices[(k + 1) % 3];
                let b = self.faces[f].vertices[(k + 2) % 3];
                if self.is_infinite_vertex(a) || self.is_infinite_vertex(b) {
                    continue;
                }
                if seen.insert((a.min(b), a.max(b))) {
                    queue.push_back((a, b));
                }
            }
        }

        self.legalize(queue)
    }

    /// Locates the face containing the point and flips the edge of that
    /// face with the smallest orientation determinant relative to the
    /// point, i.e. the edge the point is "most behind". A geometric picking
    /// aid; fails with `PointOutsideTriangulation` if no finite face
    /// contains the point.
    pub fn edge_flip_at(&mut self, point: &Point3<T>) -> Result<Edge> {
        let face = self
            .face_containing_point(point)
            .ok_or(MeshError::PointOutsideTriangulation)?;

        let p = ground(point);
        let mut best: Option<(T, usize, usize)> = None;
        for i in 0..3 {
            let vi = self.faces[face].vertices[i];
            let vn = self.faces[face].vertices[(i + 1) % 3];
            let det = orient2d(
                &ground(&self.vertices[vi].position),
                &ground(&self.vertices[vn].position),
                &p,
            );
            if best.is_none_or(|(d, _, _)| det < d) {
                best = Some((det, vi, vn));
            }
        }

        let (_, v0, v1) = best.ok_or(MeshError::PointOutsideTriangulation)?;
        self.edge_flip(v0, v1)
    }
}
