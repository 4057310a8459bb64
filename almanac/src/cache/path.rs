//! Cache path construction and filename handling.

use crate::coord::TileCoord;
use std::path::PathBuf;

/// Construct the cache-relative path for a tile image.
///
/// Creates a hierarchical path structure:
/// ```text
/// <layer>/<zoom>/<x>/<y>.<ext>
/// ```
///
/// # Example
///
/// ```
/// use almanac::cache::tile_path;
/// use almanac::coord::TileCoord;
/// use std::path::PathBuf;
///
/// let tile = TileCoord { x: 75, y: 96, zoom: 8 };
/// assert_eq!(
///     tile_path("clouds", &tile, "png"),
///     PathBuf::from("clouds/8/75/96.png")
/// );
/// ```
pub fn tile_path(layer: &str, tile: &TileCoord, ext: &str) -> PathBuf {
    PathBuf::from(layer)
        .join(tile.zoom.to_string())
        .join(tile.x.to_string())
        .join(format!("{}.{}", tile.y, ext))
}
