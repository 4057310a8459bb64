//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude)
//! and Web Mercator tile coordinates, plus selection of the 2×2 tile block
//! used to assemble a map mosaic centered on a point.

mod types;

pub use types::{
    CoordError, GeoPoint, RoundedPoint, TileCoord, TileNeighborhood, MAX_LAT, MAX_LON, MAX_ZOOM,
    MIN_LAT, MIN_LON, MIN_ZOOM,
};

use std::f64::consts::PI;

/// Converts a geographic point to the coordinates of its containing tile.
///
/// # Arguments
///
/// * `point` - Validated geographic point
/// * `zoom` - Zoom level (1 to 16)
#[inline]
pub fn to_tile_coords(point: GeoPoint, zoom: u8) -> Result<TileCoord, CoordError> {
    let (xf, yf) = fractional_coords(point, zoom)?;
    Ok(TileCoord {
        x: xf as u32,
        y: yf as u32,
        zoom,
    })
}

/// Selects the 2×2 tile block bracketing a point.
///
/// The containing tile is paired on each axis with whichever neighbor is
/// closer to the true position (fractional remainder < 0.5 picks the
/// previous tile, otherwise the next one), so the point lands near the
/// center of the assembled mosaic rather than at its edge. The pairs are
/// normalized so `x1 <= x2` and `y1 <= y2`.
///
/// Also returns the point's pixel position on the 512×512 canvas formed by
/// pasting the four 256×256 tiles, which is where the mosaic crop centers.
///
/// Purely deterministic: no I/O, no side effects.
pub fn tiles_for(point: GeoPoint, zoom: u8) -> Result<TileNeighborhood, CoordError> {
    let (xf, yf) = fractional_coords(point, zoom)?;
    let n = 1i64 << zoom;

    let (x1, x2) = neighbor_pair(xf, n);
    let (y1, y2) = neighbor_pair(yf, n);

    // Pixel position relative to the canvas: the larger tile of each pair
    // starts at canvas offset 256. Clamped so the centered 256×256 crop
    // stays on the canvas even where the neighbor pair had to be flipped
    // at the edge of the grid.
    let px = ((256.0 + (xf - x2 as f64) * 256.0) as i64).clamp(128, 384) as u32;
    let py = ((256.0 + (yf - y2 as f64) * 256.0) as i64).clamp(128, 384) as u32;

    Ok(TileNeighborhood {
        x1: x1 as u32,
        y1: y1 as u32,
        x2: x2 as u32,
        y2: y2 as u32,
        zoom,
        pixel: (px, py),
    })
}

/// Fractional Web Mercator tile coordinates for a point.
fn fractional_coords(point: GeoPoint, zoom: u8) -> Result<(f64, f64), CoordError> {
    if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
        return Err(CoordError::InvalidZoom(zoom));
    }

    let n = (1i64 << zoom) as f64;
    let x = (point.longitude() + 180.0) / 360.0 * n;

    let lat_rad = point.latitude() * PI / 180.0;
    let y = (1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n;

    Ok((x, y))
}

/// The ordered (lower, upper) pair of adjacent tiles along one axis.
///
/// The second tile would fall outside the grid at the edges of the map; in
/// that case the neighbor on the other side is taken so the pair stays
/// adjacent and in range.
fn neighbor_pair(frac: f64, n: i64) -> (i64, i64) {
    let base = frac.floor() as i64;
    let mut other = if frac - (base as f64) < 0.5 {
        base - 1
    } else {
        base + 1
    };
    if other < 0 {
        other = base + 1;
    } else if other >= n {
        other = base - 1;
    }

    if base < other {
        (base, other)
    } else {
        (other, base)
    }
}
