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

use rayon::prelude::*;

use crate::geometry::Vector3;
use crate::mesh::basic_types::{NO_FACE, RenderData, RenderVertex, TriMesh};
use crate::mesh::topology::FaceCirculator;
use crate::numeric::scalar::Scalar;

impl<T: Scalar> TriMesh<T> {
    fn fan_touches_infinite(&self, vertex: usize) -> bool {
        FaceCirculator::new(self, vertex, self.fan_start(vertex), false)
            .any(|f| self.is_face_infinite(f))
    }

    /// Unnormalized geometric normal of a face, `(B - A) x (C - A)`.
    fn flat_normal(&self, face: usize) -> Vector3<T> {
        let [i0, i1, i2] = self.faces[face].vertices;
        let a = self.vertices[i0].position;
        let ab = self.vertices[i1].position - a;
        let ac = self.vertices[i2].position - a;
        ab.cross(&ac)
    }

    /// Per-vertex normal from the Laplacian of the position field, oriented
    /// to agree with the incident face's geometric normal. Falls back to the
    /// flat normal for vertices whose one-ring is open or touches an
    /// infinite face, where the Laplacian is not meaningful.
    fn smooth_normal(&self, vertex: usize) -> Vector3<T> {
        let incident = self.first_face_index(vertex);
        if incident == NO_FACE {
            return Vector3::default();
        }
        let flat = self.flat_normal(incident);

        if self.fan_touches_infinite(vertex) {
            return flat.normalized();
        }
        let lap = self.laplacian(vertex, |i| self.vertices[i].position.to_vector());
        if lap.dot(&lap) <= T::zero() {
            return flat.normalized();
        }
        let n = lap.normalized();
        if n.dot(&flat) < T::zero() { -n } else { n }
    }

    /// Triplicates each finite face's corners so every triangle carries its
    /// own geometric normal. Infinite faces are dropped.
    pub fn to_flat_render_data(&self) -> RenderData<T> {
        let mut out = RenderData {
            vertices: Vec::with_capacity(self.faces.len() * 3),
            indices: Vec::with_capacity(self.faces.len() * 3),
        };

        for f in 0..self.faces.len() {
            if self.is_face_infinite(f) {
                continue;
            }
            let normal = self.flat_normal(f).normalized();
            let offset = out.vertices.len() as u32;
            for &v in &self.faces[f].vertices {
                out.vertices.push(RenderVertex {
                    position: self.vertices[v].position,
                    normal,
                    scalar: T::zero(),
                });
            }
            out.indices.extend([offset, offset + 1, offset + 2]);
        }

        out
    }

    /// One render vertex per mesh vertex with a Laplacian smooth normal and
    /// a zero scalar channel; indices cover every finite face. The infinite
    /// vertex, if present, gets a default entry so face indices stay valid.
    pub fn to_smooth_render_data(&self) -> RenderData<T> {
        self.render_data_with_scalar(|_| T::zero())
    }

    /// Same geometry as [`to_smooth_render_data`](Self::to_smooth_render_data)
    /// but the scalar channel carries one explicit diffusion step of `field`:
    /// `field(i) + factor * laplacian(field)(i)`. Vertices without a closed
    /// fan keep `field(i)` unchanged.
    pub fn to_heat_data<F>(&self, field: F, factor: T) -> RenderData<T>
    where
        F: Fn(usize) -> T + Sync,
    {
        self.render_data_with_scalar(|i| field(i) + factor * self.laplacian(i, &field))
    }

    fn render_data_with_scalar<S>(&self, scalar: S) -> RenderData<T>
    where
        S: Fn(usize) -> T + Sync,
    {
        let vertices = (0..self.vertices.len())
            .into_par_iter()
            .map(|i| {
                if self.is_infinite_vertex(i) {
                    return RenderVertex::default();
                }
                RenderVertex {
                    position: self.vertices[i].position,
                    normal: self.smooth_normal(i),
                    scalar: scalar(i),
                }
            })
            .collect();

        let mut indices = Vec::with_capacity(self.faces.len() * 3);
        for f in 0..self.faces.len() {
            if self.is_face_infinite(f) {
                continue;
            }
            indices.extend(self.faces[f].vertices.map(|v| v as u32));
        }

        RenderData { vertices, indices }
    }
}
