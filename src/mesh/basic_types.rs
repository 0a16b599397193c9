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

use ahash::AHashMap;

use crate::geometry::{Point3, Vector3};
use crate::numeric::scalar::Scalar;

/// Incident-face value for a vertex that no face references yet.
pub const NO_FACE: usize = usize::MAX;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex<T: Scalar> {
    pub position: Point3<T>,
    /// Index of one face incident to this vertex; the traversal starting
    /// point. Kept valid across every topology edit.
    pub face: usize,
}

/// Triangle with face-neighbor adjacency.
///
/// `vertices` are in consistent winding order. `neighbors[k]` is the face
/// across the edge *opposite* vertex slot `k`, i.e. the edge between local
/// vertices `(k+1)%3` and `(k+2)%3`; `None` marks an unmatched boundary
/// edge. In triangulation mode the infinite faces make every slot `Some`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Face {
    pub vertices: [usize; 3],
    pub neighbors: [Option<usize>; 3],
}

/// Transient edge record handed between `edge_flip` and the legalization
/// sweep: the two endpoints and the two incident faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub vertices: (usize, usize),
    pub faces: (usize, usize),
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderVertex<T: Scalar> {
    pub position: Point3<T>,
    pub normal: Vector3<T>,
    pub scalar: T,
}

/// Plain vertex/index buffers handed to presentation code.
#[derive(Debug, Clone, Default)]
pub struct RenderData<T: Scalar> {
    pub vertices: Vec<RenderVertex<T>>,
    pub indices: Vec<u32>,
}

/// Halfedge-free triangular mesh store.
///
/// Vertices and faces live in flat arrays; faces are never physically
/// removed, so indices are stable for the lifetime of the mesh. All edits
/// are synchronous and single-threaded; read-side queries always observe a
/// consistent structure.
#[derive(Debug, Clone, Default)]
pub struct TriMesh<T: Scalar> {
    pub vertices: Vec<Vertex<T>>,
    pub faces: Vec<Face>,

    /// Boundary edges seen exactly once during `add_face`, keyed by the
    /// canonical `(min, max)` vertex pair, mapping to `(face, slot)` still
    /// waiting for the matching face.
    pub(crate) pending_edges: AHashMap<(usize, usize), (usize, usize)>,

    /// Sentinel vertex of the triangulation, if bootstrapped. Faces
    /// incident to it are the infinite faces.
    pub infinite_vertex: Option<usize>,
}
