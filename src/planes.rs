// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane with an arbitrary pair of
//! corners defining the upper-left and lower-right corners of the
//! viewport.
use num::Complex;

/// Describes the width and height of an integral plane that is
/// assumed to start at 0,0 and all values are assumed to be
/// non-negative integers.  Both dimensions must be at least one.
#[derive(Copy, Clone, Debug)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the upper-left corner and lower-right corner of the
/// viewport on the complex plane, treating the real part of each
/// value as the x-component and the imaginary part of each value as
/// the y-component.  In the default orientation the upper-left corner
/// carries the larger imaginary part.
#[derive(Copy, Clone, Debug)]
pub struct ComplexPlane(pub Complex<f64>, pub Complex<f64>);

/// Describes the column, row of a point in a region.  Yes, it's the
/// exact same.  Names are important.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// We don't need a Point, as a single Complex number is a Point.

/// The ways constructing a PlaneMapper can go wrong.
#[derive(Debug, Fail, PartialEq)]
pub enum PlaneError {
    /// One or both of the requested pixel dimensions was zero.
    #[fail(display = "image bounds must be at least 1x1, not {}x{}", _0, _1)]
    EmptyBounds(usize, usize),
}

/// Contains the definitions of two planes: an integral cartesian
/// plane, and a complex cartesian plane.  Maps pixels from one to
/// points in the other.
///
/// Note that pixel rows grow downward while the imaginary axis grows
/// upward, so a row step *subtracts* from the imaginary component.
/// A viewport handed in upside-down (upper-left imaginary part below
/// the lower-right's) is tolerated and simply renders mirrored.
#[derive(Debug)]
pub struct PlaneMapper {
    /// The width and height of the integral cartesian plane.  The
    /// upper-left corner is assumed to be at 0,0.
    pub integral_plane: IntegralPlane,
    /// The two coordinates defining the viewport, upper-left and
    /// lower-right.
    pub complex_plane: ComplexPlane,
    // The real and imaginary extent of a single pixel step.
    point_pitch: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the width and height of the integral
    /// plane, and the two corner points of the viewport.  Fails only
    /// when a pixel dimension is zero; the corner points may be in
    /// any orientation.
    pub fn new(
        width: usize,
        height: usize,
        upper_left: Complex<f64>,
        lower_right: Complex<f64>,
    ) -> Result<PlaneMapper, PlaneError> {
        if width == 0 || height == 0 {
            return Err(PlaneError::EmptyBounds(width, height));
        }

        // How far one pixel moves us along each axis of the viewport.
        let point_pitch = (
            (lower_right.re - upper_left.re) / (width as f64),
            (upper_left.im - lower_right.im) / (height as f64),
        );

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            complex_plane: ComplexPlane(upper_left, lower_right),
            point_pitch,
        })
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Given a pixel on the integral cartesian plane, map that to the
    /// corresponding point on the complex cartesian plane.  No bounds
    /// checking is done; a column equal to the width or a row equal
    /// to the height is a valid boundary input and lands on the far
    /// edge of the viewport, which is how a band derives its own
    /// lower-right corner.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.complex_plane.0.re + (pixel.0 as f64) * self.point_pitch.0,
            self.complex_plane.0.im - (pixel.1 as f64) * self.point_pitch.1,
        )
    }
}
