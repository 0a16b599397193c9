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

use tracing::trace;

use crate::error::{MeshError, Result};
use crate::geometry::Point3;
use crate::mesh::basic_types::{Edge, Face, NO_FACE, TriMesh};
use crate::numeric::scalar::Scalar;

/// Walks the fan of faces around one vertex.
///
/// Starting from a given face, repeatedly steps to the CCW (or CW) neighbor
/// until it returns to the start or falls off an open boundary. On a closed
/// fan every incident face is produced exactly once; restarting a fresh
/// circulator from the same face yields the same sequence.
pub struct FaceCirculator<'m, T: Scalar> {
    mesh: &'m TriMesh<T>,
    vertex: usize,
    start: usize,
    current: usize,
    clockwise: bool,
    steps: usize,
    done: bool,
}

impl<'m, T: Scalar> FaceCirculator<'m, T> {
    pub(crate) fn new(mesh: &'m TriMesh<T>, vertex: usize, start: usize, clockwise: bool) -> Self {
        Self {
            mesh,
            vertex,
            start,
            current: start,
            clockwise,
            steps: 0,
            done: start == NO_FACE,
        }
    }
}

impl<'m, T: Scalar> Iterator for FaceCirculator<'m, T> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done {
            return None;
        }
        let out = self.current;

        // A corrupt adjacency graph could cycle without passing the start;
        // a fan can never be longer than the face array.
        self.steps += 1;
        if self.steps > self.mesh.faces.len() {
            self.done = true;
            return Some(out);
        }

        let next = if self.clockwise {
            self.mesh.cw_face_index(self.vertex, out)
        } else {
            self.mesh.ccw_face_index(self.vertex, out)
        };
        match next {
            Some(n) if n != self.start => self.current = n,
            _ => self.done = true,
        }
        Some(out)
    }
}

impl<T: Scalar> TriMesh<T> {
    /// The slot (0, 1, 2) of `vertex` within `face`, or `None` if the face
    /// does not contain it.
    pub fn local_vertex_index(&self, vertex: usize, face: usize) -> Option<usize> {
        self.faces[face].vertices.iter().position(|&v| v == vertex)
    }

    pub fn global_vertex_index(&self, local: usize, face: usize) -> usize {
        self.faces[face].vertices[local]
    }

    /// The stored incident face of a vertex; [`NO_FACE`] if none yet.
    pub fn first_face_index(&self, vertex: usize) -> usize {
        self.vertices[vertex].face
    }

    /// The next face counter-clockwise around `vertex`, `None` across an
    /// open boundary (or if `vertex` is not a corner of `face`).
    pub fn ccw_face_index(&self, vertex: usize, face: usize) -> Option<usize> {
        let l = self.local_vertex_index(vertex, face)?;
        self.faces[face].neighbors[(l + 1) % 3]
    }

    /// The next face clockwise around `vertex`.
    pub fn cw_face_index(&self, vertex: usize, face: usize) -> Option<usize> {
        let l = self.local_vertex_index(vertex, face)?;
        self.faces[face].neighbors[(l + 2) % 3]
    }

    /// The face across the edge opposite `vertex` in `face`.
    pub fn opposite_face_index(&self, vertex: usize, face: usize) -> Option<usize> {
        let l = self.local_vertex_index(vertex, face)?;
        self.faces[face].neighbors[l]
    }

    /// CCW circulator over the faces incident to `vertex`, starting at its
    /// stored incident face.
    pub fn faces_around_vertex(&self, vertex: usize) -> FaceCirculator<'_, T> {
        FaceCirculator::new(self, vertex, self.first_face_index(vertex), false)
    }

    /// CW counterpart of [`faces_around_vertex`](Self::faces_around_vertex).
    pub fn faces_around_vertex_cw(&self, vertex: usize) -> FaceCirculator<'_, T> {
        FaceCirculator::new(self, vertex, self.first_face_index(vertex), true)
    }

    /// First face of the fan around `vertex`: for a closed fan this is the
    /// stored incident face, for an open fan the CW-most face. A CCW walk
    /// from here covers the whole fan even on a boundary vertex.
    pub(crate) fn fan_start(&self, vertex: usize) -> usize {
        let first = self.first_face_index(vertex);
        if first == NO_FACE {
            return NO_FACE;
        }
        let mut f = first;
        let mut steps = 0;
        loop {
            match self.cw_face_index(vertex, f) {
                Some(p) if p != first => f = p,
                Some(_) => return first,
                None => return f,
            }
            steps += 1;
            if steps > self.faces.len() {
                return first;
            }
        }
    }

    /// Locates the two faces incident to the edge `(v0, v1)` by fanning
    /// around `v0`. The first face returned lies CW of the edge, the second
    /// CCW (i.e. in the second face `v1` directly follows `v0`).
    pub(crate) fn edge_faces(&self, v0: usize, v1: usize) -> Result<(usize, usize)> {
        for v in [v0, v1] {
            if v >= self.vertices.len() {
                return Err(MeshError::InvalidIndex {
                    index: v,
                    len: self.vertices.len(),
                });
            }
        }

        let start = self.fan_start(v0);
        if start == NO_FACE {
            return Err(MeshError::EdgeNotFound { v0, v1 });
        }
        let mut prev = self.cw_face_index(v0, start);

        for f in FaceCirculator::new(self, v0, start, false) {
            let l = self
                .local_vertex_index(v0, f)
                .ok_or(MeshError::VertexNotInFace { vertex: v0, face: f })?;
            if self.faces[f].vertices[(l + 1) % 3] == v1 {
                let p = prev.ok_or(MeshError::EdgeNotFound { v0, v1 })?;
                return Ok((p, f));
            }
            prev = Some(f);
        }

        Err(MeshError::EdgeNotFound { v0, v1 })
    }

    /// Splits `face` into three children around a new vertex at `position`,
    /// which must lie strictly inside the face.
    ///
    /// The original face index is reused for one child and two faces are
    /// appended. The three outward edges keep their old neighbors, re-pointed
    /// at the right child; three new internal edges tie the children
    /// together. Returns the index of the new vertex.
    pub fn face_split(&mut self, face: usize, position: Point3<T>) -> Result<usize> {
        if face >= self.faces.len() {
            return Err(MeshError::InvalidIndex {
                index: face,
                len: self.faces.len(),
            });
        }

        let iv3 = self.add_vertex(position);
        let if3 = self.faces.len();
        let if4 = self.faces.len() + 1;

        let f = self.faces[face];
        let [iv0, iv1, iv2] = f.vertices;
        let [if0, _if1, if2] = f.neighbors;

        // Children: `face` keeps (iv0, iv3, iv2), f3 = (iv3, iv0, iv1),
        // f4 = (iv3, iv1, iv2). Slot k of each child is opposite edge
        // ((k+1)%3, (k+2)%3), which fixes the neighbor tables below.
        self.faces.push(Face {
            vertices: [iv3, iv0, iv1],
            neighbors: [if2, Some(if4), Some(face)],
        });
        self.faces.push(Face {
            vertices: [iv3, iv1, iv2],
            neighbors: [if0, Some(face), Some(if3)],
        });
        self.faces[face].vertices[1] = iv3;
        self.faces[face].neighbors[0] = Some(if4);
        self.faces[face].neighbors[2] = Some(if3);
        // The neighbor across (iv2, iv0) was and stays at slot 1.

        if let Some(f0) = if0 {
            let v00 = (self
                .local_vertex_index(iv1, f0)
                .ok_or(MeshError::VertexNotInFace { vertex: iv1, face: f0 })?
                + 1)
                % 3;
            self.faces[f0].neighbors[v00] = Some(if4);
        }
        if let Some(f2) = if2 {
            let v20 = (self
                .local_vertex_index(iv0, f2)
                .ok_or(MeshError::VertexNotInFace { vertex: iv0, face: f2 })?
                + 1)
                % 3;
            self.faces[f2].neighbors[v20] = Some(if3);
        }

        self.vertices[iv0].face = face;
        self.vertices[iv1].face = if3;
        self.vertices[iv2].face = if4;
        self.vertices[iv3].face = face;

        Ok(iv3)
    }

    /// Replaces the edge `(v0, v1)` with the other diagonal of the local
    /// quadrilateral, rewriting the two incident faces in place and patching
    /// the four outer back-pointers. Fails with `EdgeNotFound` if the
    /// vertices share no edge or the edge is on a boundary.
    ///
    /// Returns the record of the new edge so callers can chain flips.
    pub fn edge_flip(&mut self, v0: usize, v1: usize) -> Result<Edge> {
        trace!(v0, v1, "flipping edge");

        let (if0, if1) = self.edge_faces(v0, v1)?;

        // Slot of the apex (the vertex opposite the shared edge) in each face.
        let v00 = (self
            .local_vertex_index(v0, if0)
            .ok_or(MeshError::VertexNotInFace { vertex: v0, face: if0 })?
            + 1)
            % 3;
        let v10 = (self
            .local_vertex_index(v1, if1)
            .ok_or(MeshError::VertexNotInFace { vertex: v1, face: if1 })?
            + 1)
            % 3;

        let iv00 = self.faces[if0].vertices[v00];
        let iv11 = self.faces[if1].vertices[v10];
        let ifp0 = self.faces[if0].neighbors[(v00 + 1) % 3];
        let ifp1 = self.faces[if1].neighbors[(v10 + 1) % 3];

        // Outer slots to patch, resolved before any mutation.
        let vp00 = match ifp0 {
            Some(fp0) => Some(
                self.local_vertex_index(iv00, fp0)
                    .ok_or(MeshError::VertexNotInFace { vertex: iv00, face: fp0 })?,
            ),
            None => None,
        };
        let vp10 = match ifp1 {
            Some(fp1) => Some(
                self.local_vertex_index(iv11, fp1)
                    .ok_or(MeshError::VertexNotInFace { vertex: iv11, face: fp1 })?,
            ),
            None => None,
        };

        self.faces[if0].vertices[(v00 + 2) % 3] = iv11;
        self.faces[if0].neighbors[v00] = ifp1;
        if let (Some(fp1), Some(vp10)) = (ifp1, vp10) {
            self.faces[fp1].neighbors[(vp10 + 2) % 3] = Some(if0);
        }
        self.faces[if0].neighbors[(v00 + 1) % 3] = Some(if1);

        self.faces[if1].vertices[(v10 + 2) % 3] = iv00;
        self.faces[if1].neighbors[v10] = ifp0;
        if let (Some(fp0), Some(vp00)) = (ifp0, vp00) {
            self.faces[fp0].neighbors[(vp00 + 2) % 3] = Some(if1);
        }
        self.faces[if1].neighbors[(v10 + 1) % 3] = Some(if0);

        // Each endpoint stays in exactly one of the two rewritten faces.
        self.vertices[v0].face = if1;
        self.vertices[v1].face = if0;

        Ok(Edge {
            vertices: (iv00, iv11),
            faces: (if0, if1),
        })
    }
}
