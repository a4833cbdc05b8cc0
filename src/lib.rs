#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set takes a point on the complex plane and
//! repeatedly multiplies it by itself, measuring how quickly that
//! number goes to infinity.  This "velocity" is the number used to
//! render the image: a point that leaves the circle of radius two
//! immediately is painted white, a point that dawdles near the border
//! is painted progressively darker, and a point that never leaves at
//! all is part of the set proper and painted black.
//!
//! The work splits naturally into horizontal bands.  Every band is a
//! disjoint slice of one flat pixel buffer paired with the rectangle
//! of the complex plane it covers, so the bands can be handed to
//! worker threads that never have to talk to each other.  The only
//! synchronization in the whole crate is the join at the end of the
//! render.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;

pub mod escape;
pub mod planes;
pub mod render;

pub use escape::escape_time;
pub use planes::{ComplexPlane, IntegralPlane, Pixel, PlaneError, PlaneMapper};
pub use render::{partition_rows, render_band, EscapeTimeRenderer, ESCAPE_LIMIT};
