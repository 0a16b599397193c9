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

use std::ops::{Add, Div, Mul, Sub};

use crate::mesh::basic_types::{NO_FACE, TriMesh};
use crate::numeric::scalar::Scalar;

impl<T: Scalar> TriMesh<T> {
    /// Cotangent-weighted Laplace-Beltrami estimate of `field` at `vertex`.
    ///
    /// For each neighbor `j` in the one-ring the difference
    /// `field(j) - field(i)` is weighted by `cot(alpha) + cot(beta)`, the
    /// angles opposite the edge `(i, j)` in its two incident faces, then the
    /// sum is normalized by twice the barycentric cell area (one third of
    /// the incident-face area sum).
    ///
    /// The field is any per-vertex quantity that forms a vector space over
    /// the mesh scalar: positions for smoothing, a temperature for heat
    /// diffusion. The cotangent weights themselves always come from the
    /// current vertex positions.
    ///
    /// Requires a closed fan around `vertex`; on a boundary vertex (or a
    /// degenerate zero-area ring) the estimate is undefined and the zero
    /// value of the field is returned.
    pub fn laplacian<V, F>(&self, vertex: usize, field: F) -> V
    where
        V: Copy
            + Default
            + Add<Output = V>
            + Sub<Output = V>
            + Mul<T, Output = V>
            + Div<T, Output = V>,
        F: Fn(usize) -> V,
    {
        let i = vertex;
        let f0 = self.first_face_index(i);
        if f0 == NO_FACE {
            return V::default();
        }

        let pos = |v: usize| self.vertices[v].position.to_vector();

        let mut acc = V::default();
        let mut sum_areas = T::zero();
        let mut f = f0;
        let mut steps = 0;

        loop {
            steps += 1;
            if steps > self.faces.len() {
                return V::default();
            }

            let Some(i_local) = self.local_vertex_index(i, f) else {
                return V::default();
            };
            let j_local = (i_local + 1) % 3;
            let j = self.global_vertex_index(j_local, f);

            // The two faces sharing edge (i, j): `f` CCW of the edge and its
            // CW neighbor. No CW neighbor means the fan is open.
            let Some(left) = self.cw_face_index(i, f) else {
                return V::default();
            };
            let Some(cw_local) = self.local_vertex_index(i, left) else {
                return V::default();
            };
            let cw = self.global_vertex_index((cw_local + 1) % 3, left);
            let ccw = self.global_vertex_index((j_local + 1) % 3, f);

            let cw_to_i = pos(i) - pos(cw);
            let cw_to_j = pos(j) - pos(cw);
            let cot_alpha = cw_to_i.dot(&cw_to_j) / cw_to_i.cross(&cw_to_j).norm();

            let ccw_to_i = pos(i) - pos(ccw);
            let ccw_to_j = pos(j) - pos(ccw);
            let cross = ccw_to_i.cross(&ccw_to_j);
            let cot_beta = ccw_to_i.dot(&ccw_to_j) / cross.norm();

            let ij = field(j) - field(i);
            acc = acc + ij * (cot_alpha + cot_beta);
            sum_areas = sum_areas + cross.norm() / T::from_f64(2.0);

            match self.ccw_face_index(i, f) {
                Some(n) if n != f0 => f = n,
                Some(_) => break,
                None => return V::default(),
            }
        }

        if sum_areas <= T::zero() {
            return V::default();
        }
        acc / (T::from_f64(2.0) * sum_areas / T::from_f64(3.0))
    }
}
