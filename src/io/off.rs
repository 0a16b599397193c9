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

//! OFF (Object File Format) reading and writing.
//!
//! The accepted dialect is the plain ASCII one: an `OFF` header, a
//! `vertices faces edges` count line (the edge count is ignored), one
//! `x y z` line per vertex, then one `3 i j k` line per triangle. `#`
//! starts a comment anywhere on a line; blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::{MeshError, Result};
use crate::geometry::Point3;
use crate::mesh::TriMesh;
use crate::numeric::scalar::Scalar;

fn malformed(message: impl Into<String>) -> MeshError {
    MeshError::MalformedFile {
        message: message.into(),
    }
}

struct Tokens {
    tokens: Vec<String>,
    next: usize,
}

impl Tokens {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut tokens = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let data = line.split('#').next().unwrap_or("");
            tokens.extend(data.split_whitespace().map(str::to_owned));
        }
        Ok(Self { tokens, next: 0 })
    }

    fn next(&mut self) -> Result<&str> {
        let t = self
            .tokens
            .get(self.next)
            .ok_or_else(|| malformed("unexpected end of file"))?;
        self.next += 1;
        Ok(t)
    }

    fn next_usize(&mut self) -> Result<usize> {
        let t = self.next()?;
        t.parse()
            .map_err(|_| malformed(format!("expected an integer, got {t:?}")))
    }

    fn next_scalar<T: Scalar>(&mut self) -> Result<T> {
        let t = self.next()?;
        let v: f64 = t
            .parse()
            .map_err(|_| malformed(format!("expected a number, got {t:?}")))?;
        Ok(T::from_f64(v))
    }
}

/// Parses an OFF document from any buffered reader.
pub fn read_off_from<T: Scalar, R: BufRead>(reader: R) -> Result<TriMesh<T>> {
    let mut tokens = Tokens::from_reader(reader)?;

    let header = tokens.next()?;
    if header != "OFF" {
        return Err(malformed(format!("expected OFF header, got {header:?}")));
    }

    let vertex_count = tokens.next_usize()?;
    let face_count = tokens.next_usize()?;
    let _edge_count = tokens.next_usize()?;

    let mut mesh = TriMesh::new();
    for _ in 0..vertex_count {
        let x = tokens.next_scalar()?;
        let y = tokens.next_scalar()?;
        let z = tokens.next_scalar()?;
        mesh.add_vertex(Point3::new(x, y, z));
    }

    for _ in 0..face_count {
        let arity = tokens.next_usize()?;
        if arity != 3 {
            return Err(malformed(format!("only triangles are supported, got a face of {arity} vertices")));
        }
        let i0 = tokens.next_usize()?;
        let i1 = tokens.next_usize()?;
        let i2 = tokens.next_usize()?;
        mesh.add_face(i0, i1, i2)?;
    }

    Ok(mesh)
}

/// Loads a triangular mesh from an OFF file.
pub fn read_off<T: Scalar>(path: impl AsRef<Path>) -> Result<TriMesh<T>> {
    let path = path.as_ref();
    let mesh = read_off_from(BufReader::new(File::open(path)?))?;
    info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "loaded OFF file"
    );
    Ok(mesh)
}

/// Writes an OFF document to any writer. Every face is written, including
/// infinite ones; strip them beforehand if the file is meant for a viewer.
pub fn write_off_to<T: Scalar, W: Write>(mesh: &TriMesh<T>, mut writer: W) -> Result<()> {
    writeln!(writer, "OFF")?;
    writeln!(writer, "{} {} 0", mesh.vertex_count(), mesh.face_count())?;
    writeln!(writer)?;

    for v in &mesh.vertices {
        let p = &v.position;
        writeln!(
            writer,
            "{} {} {}",
            p.x.into_f64(),
            p.y.into_f64(),
            p.z.into_f64()
        )?;
    }
    writeln!(writer)?;

    for f in &mesh.faces {
        let [i0, i1, i2] = f.vertices;
        writeln!(writer, "3 {i0} {i1} {i2}")?;
    }

    Ok(())
}

/// Saves a triangular mesh as an OFF file, truncating any existing file.
pub fn write_off<T: Scalar>(mesh: &TriMesh<T>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_off_to(mesh, &mut writer)?;
    writer.flush()?;
    info!(path = %path.display(), "wrote OFF file");
    Ok(())
}
