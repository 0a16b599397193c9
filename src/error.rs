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

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors raised by mesh construction, traversal, triangulation and I/O.
///
/// Every broken invariant stops the operation that detected it; no variant is
/// ever downgraded to a silent truncation.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A vertex or face index is out of range for the current arrays.
    #[error("index {index} out of range (len {len})")]
    InvalidIndex { index: usize, len: usize },

    /// A face was queried for a vertex it does not contain.
    #[error("vertex {vertex} is not a corner of face {face}")]
    VertexNotInFace { vertex: usize, face: usize },

    /// Two vertices were expected to share an edge but do not.
    #[error("vertices {v0} and {v1} share no edge")]
    EdgeNotFound { v0: usize, v1: usize },

    /// A point outside the hull sees no boundary edge of the triangulation.
    #[error("no hull edge is visible from the inserted point")]
    NoVisibleHullEdge,

    /// A point-insertion query landed outside every real face.
    #[error("point lies outside the triangulated region")]
    PointOutsideTriangulation,

    /// A triangulation operation ran before `add_first_face_for_triangulation`.
    #[error("mesh is not in triangulation mode")]
    NotTriangulation,

    /// The legalization sweep exceeded its iteration cap, which signals a
    /// numerically or topologically degenerate configuration.
    #[error("Delaunay legalization diverged after {iterations} iterations")]
    LegalizationDivergence { iterations: usize },

    /// An OFF file did not match the expected layout.
    #[error("malformed mesh file: {message}")]
    MalformedFile { message: String },

    /// The adjacency or incident-face invariants do not hold.
    #[error("mesh integrity violated: {details}")]
    IntegrityViolation { details: String },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
