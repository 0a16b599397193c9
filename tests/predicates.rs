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

use tridel::geometry::{Point2, Point3};
use tridel::kernel::predicates::{ground, in_circle, orient2d};

#[test]
fn ground_negates_z() {
    let p = ground(&Point3::new(1.0, 2.0, 3.0));
    assert_eq!(p, Point2::new(1.0, -3.0));
}

#[test]
fn orient2d_sign_matches_winding() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(1.0, 0.0);
    let c = Point2::new(0.0, 1.0);

    assert!(orient2d(&a, &b, &c) > 0.0, "CCW is positive");
    assert!(orient2d(&a, &c, &b) < 0.0, "CW is negative");
    assert_eq!(orient2d(&a, &b, &Point2::new(2.0, 0.0)), 0.0, "collinear is zero");
}

#[test]
fn orient2d_is_twice_the_area() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(4.0, 0.0);
    let c = Point2::new(0.0, 3.0);
    assert_eq!(orient2d(&a, &b, &c), 12.0);
}

#[test]
fn in_circle_sign_for_a_ccw_triangle() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(1.0, 0.0);
    let c = Point2::new(1.0, 1.0);

    // Circumcircle is centered at (0.5, 0.5) with radius sqrt(0.5).
    assert!(in_circle(&a, &b, &c, &Point2::new(0.5, 0.5)) > 0.0);
    assert!(in_circle(&a, &b, &c, &Point2::new(2.0, 2.0)) < 0.0);
    assert_eq!(in_circle(&a, &b, &c, &Point2::new(0.0, 1.0)), 0.0, "cocircular");
}

#[test]
fn in_circle_flips_sign_with_winding() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(1.0, 0.0);
    let c = Point2::new(1.0, 1.0);
    let inside = Point2::new(0.9, 0.4);

    let ccw = in_circle(&a, &b, &c, &inside);
    let cw = in_circle(&a, &c, &b, &inside);
    assert!(ccw > 0.0);
    assert_eq!(ccw, -cw);
}
