// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time rendering of the Mandelbrot set.
//!
//! The image is cut into contiguous horizontal bands, one per
//! worker.  A band is a disjoint mutable slice of the one flat pixel
//! buffer paired with its own sub-rectangle of the viewport, so the
//! workers share nothing and need no locks; the scope join at the
//! end of the render is the only synchronization anywhere.

use std::cmp;
use std::ops::Range;

use itertools::iproduct;
use num::Complex;

use escape::escape_time;
use planes::{Pixel, PlaneError, PlaneMapper};

/// The per-pixel iteration cap.  255 maps the escape counts 1:1 onto
/// the 8-bit intensity range: an escape at iteration `i` renders as
/// `255 - i`, and a point that never escapes renders as zero.
pub const ESCAPE_LIMIT: usize = 255;

/// Renders one band of the image into the caller-provided slice.
/// `plane` is the band's own mapper, carrying the band's dimensions
/// and the sub-rectangle of the viewport it covers.  Points that
/// escape quickly are dark, points that cling to the border of the
/// set are bright, and points that never escape at all are black.
pub fn render_band(pixels: &mut [u8], plane: &PlaneMapper) {
    assert!(pixels.len() == plane.len());
    let width = plane.integral_plane.0;
    let height = plane.integral_plane.1;
    for (row, column) in iproduct!(0..height, 0..width) {
        let point = plane.pixel_to_point(&Pixel(column, row));
        pixels[row * width + column] = match escape_time(point, ESCAPE_LIMIT) {
            None => 0,
            Some(count) => (ESCAPE_LIMIT - count) as u8,
        };
    }
}

/// Splits `height` rows into one contiguous range per worker.  The
/// band height is the ceiling of `height / workers`, so the ranges
/// cover every row exactly once; when there are more workers than
/// rows the trailing workers receive empty ranges and do no work.
/// Row assignment depends only on (height, workers), never on
/// scheduling.
pub fn partition_rows(height: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = cmp::max(workers, 1);
    let rows_per_band = (height + workers - 1) / workers;
    (0..workers)
        .map(|i| {
            cmp::min(i * rows_per_band, height)..cmp::min((i + 1) * rows_per_band, height)
        })
        .collect()
}

/// Takes a viewport and an image size and renders the classic
/// escape-time picture of the Mandelbrot set, one byte of intensity
/// per pixel.
pub struct EscapeTimeRenderer {
    plane: PlaneMapper,
}

impl EscapeTimeRenderer {
    /// Requires the width and height of the image and the upper-left
    /// and lower-right corners of the viewport where the rendering
    /// will take place.
    pub fn new(
        width: usize,
        height: usize,
        upper_left: Complex<f64>,
        lower_right: Complex<f64>,
    ) -> Result<Self, PlaneError> {
        match PlaneMapper::new(width, height, upper_left, lower_right) {
            Ok(plane) => Ok(EscapeTimeRenderer { plane }),
            Err(u) => Err(u),
        }
    }

    // A band's mapper: the full-image mapper applied at the band's
    // top row and at its lower-right pixel boundary.
    fn band_plane(&self, rows: &Range<usize>) -> Result<PlaneMapper, PlaneError> {
        let width = self.plane.integral_plane.0;
        let upper_left = self.plane.pixel_to_point(&Pixel(0, rows.start));
        let lower_right = self.plane.pixel_to_point(&Pixel(width, rows.end));
        PlaneMapper::new(width, rows.end - rows.start, upper_left, lower_right)
    }

    /// Renders the whole image across `threads` concurrent workers
    /// and returns the finished pixel buffer.  The buffer is handed
    /// back only after every worker has been joined; a worker that
    /// fails to spawn panics the render.  Output is byte-identical
    /// for any worker count.
    pub fn render(&self, threads: usize) -> Result<Vec<u8>, PlaneError> {
        let width = self.plane.integral_plane.0;
        let height = self.plane.integral_plane.1;
        let workers = cmp::max(threads, 1);
        let rows_per_band = (height + workers - 1) / workers;
        debug!(
            "rendering {}x{} across {} workers, {} rows per band",
            width, height, workers, rows_per_band
        );

        let mut pixels = vec![0 as u8; self.plane.len()];
        {
            let ranges: Vec<Range<usize>> = partition_rows(height, workers)
                .into_iter()
                .filter(|rows| rows.start < rows.end)
                .collect();
            let mut planes = Vec::with_capacity(ranges.len());
            for rows in &ranges {
                planes.push(self.band_plane(rows)?);
            }

            // chunks_mut carves the buffer into exactly the byte
            // ranges of the non-empty bands: disjoint, contiguous,
            // and jointly exhaustive.
            let bands: Vec<&mut [u8]> = pixels.chunks_mut(rows_per_band * width).collect();
            crossbeam::scope(|spawner| {
                for (band, plane) in bands.into_iter().zip(&planes) {
                    spawner.spawn(move |_| {
                        render_band(band, plane);
                    });
                }
            })
            .unwrap();
        }
        Ok(pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::iproduct;

    #[test]
    fn partition_covers_every_row_exactly_once() {
        for &(height, workers) in &[
            (750, 1),
            (750, 3),
            (750, 8),
            (1, 1),
            (2, 8),
            (5, 5),
            (100, 7),
            (64, 64),
        ] {
            let ranges = partition_rows(height, workers);
            assert_eq!(ranges.len(), workers);
            let mut next = 0;
            for rows in &ranges {
                assert!(rows.start <= rows.end);
                if rows.start < rows.end {
                    assert_eq!(rows.start, next);
                    next = rows.end;
                } else {
                    // Empty bands only ever trail the full ones.
                    assert_eq!(rows.start, height);
                }
            }
            assert_eq!(next, height);
        }
    }

    #[test]
    fn partition_tolerates_zero_workers() {
        assert_eq!(partition_rows(10, 0), vec![0..10]);
    }

    #[test]
    fn render_is_deterministic_across_worker_counts() {
        let renderer = EscapeTimeRenderer::new(
            64,
            32,
            Complex::new(-2.0, 1.0),
            Complex::new(1.0, -1.0),
        )
        .unwrap();
        let alone = renderer.render(1).unwrap();
        for workers in &[2, 3, 8, 50] {
            assert_eq!(alone, renderer.render(*workers).unwrap());
        }
    }

    #[test]
    fn render_matches_the_per_pixel_pipeline() {
        let plane =
            PlaneMapper::new(16, 16, Complex::new(-2.0, 1.0), Complex::new(1.0, -1.0)).unwrap();
        let renderer = EscapeTimeRenderer::new(
            16,
            16,
            Complex::new(-2.0, 1.0),
            Complex::new(1.0, -1.0),
        )
        .unwrap();
        let pixels = renderer.render(3).unwrap();
        for (row, column) in iproduct!(0..16, 0..16) {
            let expected = match escape_time(plane.pixel_to_point(&Pixel(column, row)), ESCAPE_LIMIT)
            {
                None => 0,
                Some(count) => (ESCAPE_LIMIT - count) as u8,
            };
            assert_eq!(pixels[row * 16 + column], expected);
        }
    }

    #[test]
    fn two_by_two_end_to_end() {
        // (0,0) -> -2+1i, outside the bailout circle, escapes at 0.
        // (1,0) -> -0.5+1i, escapes at 3.  (0,1) -> -2 and (1,1) ->
        // -0.5 both sit inside the set and render black.
        let renderer = EscapeTimeRenderer::new(
            2,
            2,
            Complex::new(-2.0, 1.0),
            Complex::new(1.0, -1.0),
        )
        .unwrap();
        let pixels = renderer.render(2).unwrap();
        assert_eq!(pixels, vec![255, 252, 0, 0]);
    }

    #[test]
    fn more_workers_than_rows() {
        let renderer = EscapeTimeRenderer::new(
            8,
            2,
            Complex::new(-2.0, 1.0),
            Complex::new(1.0, -1.0),
        )
        .unwrap();
        assert_eq!(renderer.render(1).unwrap(), renderer.render(16).unwrap());
    }
}
