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

use crate::error::{MeshError, Result};
use crate::geometry::Point3;
use crate::mesh::basic_types::{Face, NO_FACE, TriMesh, Vertex};
use crate::numeric::scalar::Scalar;

impl<T: Scalar> TriMesh<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every vertex, face and pending edge; leaves the mesh as if
    /// freshly constructed.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Appends a vertex and returns its index. The vertex has no incident
    /// face until a face referencing it is added.
    pub fn add_vertex(&mut self, position: Point3<T>) -> usize {
        self.vertices.push(Vertex {
            position,
            face: NO_FACE,
        });
        self.vertices.len() - 1
    }

    /// Positions are immutable except for post-processing passes such as
    /// assigning terrain heights after a ground-plane triangulation.
    pub fn set_vertex_position(&mut self, vertex: usize, position: Point3<T>) -> Result<()> {
        let len = self.vertices.len();
        let v = self
            .vertices
            .get_mut(vertex)
            .ok_or(MeshError::InvalidIndex { index: vertex, len })?;
        v.position = position;
        Ok(())
    }

    /// Adds a face over three existing vertices and returns its index.
    ///
    /// Each of the three edges is looked up in the pending-edge map by its
    /// canonical `(min, max)` vertex pair: on a hit the two faces become
    /// mutual neighbors and the entry is discarded, otherwise the new face
    /// registers itself as pending for that edge. Every corner's incident
    /// face is set to the new face; last writer wins, which is fine because
    /// any incident face is a valid traversal start.
    pub fn add_face(&mut self, v0: usize, v1: usize, v2: usize) -> Result<usize> {
        for v in [v0, v1, v2] {
            if v >= self.vertices.len() {
                return Err(MeshError::InvalidIndex {
                    index: v,
                    len: self.vertices.len(),
                });
            }
        }

        let fi = self.faces.len();
        let mut f = Face {
            vertices: [v0, v1, v2],
            neighbors: [None; 3],
        };

        for v in [v0, v1, v2] {
            self.vertices[v].face = fi;
        }

        for k in 0..3 {
            let a = f.vertices[(k + 1) % 3];
            let b = f.vertices[(k + 2) % 3];
            // Smallest index first so the same edge is never stored twice.
            let key = (a.min(b), a.max(b));

            if let Some((other_face, other_slot)) = self.pending_edges.remove(&key) {
                f.neighbors[k] = Some(other_face);
                self.faces[other_face].neighbors[other_slot] = Some(fi);
            } else {
                self.pending_edges.insert(key, (fi, k));
            }
        }

        self.faces.push(f);
        Ok(fi)
    }

    /// True iff the face is incident to the triangulation's infinite vertex.
    pub fn is_face_infinite(&self, face: usize) -> bool {
        match self.infinite_vertex {
            Some(iv) => self.faces[face].vertices.contains(&iv),
            None => false,
        }
    }

    pub(crate) fn is_infinite_vertex(&self, vertex: usize) -> bool {
        self.infinite_vertex == Some(vertex)
    }

    /// Validates every structural invariant: all indices in range, every
    /// neighbor lists this face among its own neighbors (checked over the
    /// three distinct slots), and every vertex's incident face actually
    /// contains it.
    pub fn integrity_check(&self) -> Result<()> {
        for (i, f) in self.faces.iter().enumerate() {
            for &v in &f.vertices {
                if v >= self.vertices.len() {
                    return Err(MeshError::IntegrityViolation {
                        details: format!("face {i} references missing vertex {v}"),
                    });
                }
            }
            for &n in &f.neighbors {
                let Some(n) = n else { continue };
                if n >= self.faces.len() {
                    return Err(MeshError::IntegrityViolation {
                        details: format!("face {i} references missing neighbor {n}"),
                    });
                }
                if !self.faces[n].neighbors.contains(&Some(i)) {
                    return Err(MeshError::IntegrityViolation {
                        details: format!("face {n} does not list face {i} back"),
                    });
                }
            }
        }

        for (v, vert) in self.vertices.iter().enumerate() {
            if vert.face == NO_FACE {
                continue;
            }
            if vert.face >= self.faces.len() {
                return Err(MeshError::IntegrityViolation {
                    details: format!("vertex {v} points at missing face {}", vert.face),
                });
            }
            if !self.faces[vert.face].vertices.contains(&v) {
                return Err(MeshError::IntegrityViolation {
                    details: format!("vertex {v} points at face {} which does not contain it", vert.face),
                });
            }
        }

        Ok(())
    }
}
