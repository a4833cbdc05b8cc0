// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time iteration at the heart of the renderer.  Every
//! pixel of the image is one call to [`escape_time`].

use num::Complex;

/// This is our classic iterator function, which either returns the
/// number of iterations it took for `c` to escape the Mandelbrot
/// set, or it returns nothing at all.
///
/// Starting from z = 0, squares z and adds `c` until the squared
/// norm of z exceeds 4.0 (the square of the canonical bailout radius
/// of two).  Comparing squared norms spares us a square root per
/// iteration; the threshold is the squared radius, so the comparison
/// is exact, not an approximation.  A point already outside the
/// bailout circle escapes at iteration zero.
pub fn escape_time(c: Complex<f64>, limit: usize) -> Option<usize> {
    let mut z = Complex { re: 0.0, im: 0.0 };
    for i in 0..limit {
        z = z * z + c;
        if z.norm_sqr() > 4.0 {
            return Some(i);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_immediately_outside_the_bailout_circle() {
        // norm_sqr(c) > 4 must report an escape at iteration zero no
        // matter the limit.
        for c in &[
            Complex::new(-2.0, 1.0),
            Complex::new(3.0, 0.0),
            Complex::new(0.0, -2.5),
        ] {
            assert_eq!(escape_time(*c, 1), Some(0));
            assert_eq!(escape_time(*c, 255), Some(0));
        }
    }

    #[test]
    fn the_origin_never_escapes() {
        // Zero is a fixed point of the iteration.
        assert_eq!(escape_time(Complex::new(0.0, 0.0), 255), None);
        assert_eq!(escape_time(Complex::new(0.0, 0.0), 10_000), None);
    }

    #[test]
    fn interior_points_never_escape() {
        // -1 cycles between 0 and -1 forever.
        assert_eq!(escape_time(Complex::new(-1.0, 0.0), 255), None);
    }

    #[test]
    fn the_bailout_circle_itself_does_not_escape() {
        // c = -2 iterates to a fixed point of squared norm exactly
        // 4.0, and the comparison is strict.
        assert_eq!(escape_time(Complex::new(-2.0, 0.0), 255), None);
    }

    #[test]
    fn known_escape_counts() {
        // c = 2: z1 = 2 (norm_sqr exactly 4, still in), z2 = 6 (out).
        assert_eq!(escape_time(Complex::new(2.0, 0.0), 255), Some(1));
        // c = -0.5 + i: z1 norm_sqr 1.25, z2 = (-1.25, 0), z3 =
        // (1.0625, 1), z4 = (-0.37109375, 3.125) norm_sqr > 9.  All
        // arithmetic on these values is exact.
        assert_eq!(escape_time(Complex::new(-0.5, 1.0), 255), Some(3));
    }
}
