//! Mosaic assembly from adjacent map tiles.
//!
//! Four 256×256 tiles are pasted onto a 512×512 canvas and cropped to a
//! 256×256 window centered on the point of interest. Radar overlays are
//! composited with attenuated alpha so base-map detail stays visible
//! underneath the weather layer.

use image::{imageops, RgbaImage};
use thiserror::Error;

/// Side length of one map tile in pixels.
pub const TILE_SIZE: u32 = 256;

/// Side length of the assembled canvas (2×2 tiles).
pub const CANVAS_SIZE: u32 = 512;

/// Side length of the cropped output view.
pub const VIEW_SIZE: u32 = 256;

/// Alpha attenuation applied to radar layers before compositing.
const RADAR_ALPHA: f32 = 0.75;

/// Errors from tile decoding or mosaic encoding.
#[derive(Debug, Error)]
pub enum MosaicError {
    /// A source tile could not be decoded. Aborts the whole assembly;
    /// no partial mosaics are produced.
    #[error("Failed to decode tile image: {0}")]
    Decode(String),

    /// The assembled mosaic could not be encoded.
    #[error("Failed to encode mosaic: {0}")]
    Encode(String),
}

/// Decodes raw tile bytes (JPEG or PNG) into an RGBA image.
pub fn decode_tile(bytes: &[u8]) -> Result<RgbaImage, MosaicError> {
    let img = image::load_from_memory(bytes).map_err(|e| MosaicError::Decode(e.to_string()))?;
    Ok(img.to_rgba8())
}

/// Assembles four tiles into a view centered on `center`.
///
/// Tiles are pasted in `(x1,y1), (x1,y2), (x2,y1), (x2,y2)` order (the
/// order produced by [`crate::coord::TileNeighborhood::corners`]) at
/// canvas positions (0,0), (0,256), (256,0), (256,256). The canvas is then
/// cropped to `[cx-128, cy-128, cx+128, cy+128]`.
///
/// Deterministic: fixed inputs produce an identical image every time.
pub fn assemble(tiles: &[RgbaImage; 4], center: (u32, u32)) -> RgbaImage {
    let mut canvas = RgbaImage::new(CANVAS_SIZE, CANVAS_SIZE);

    imageops::replace(&mut canvas, &tiles[0], 0, 0);
    imageops::replace(&mut canvas, &tiles[1], 0, TILE_SIZE as i64);
    imageops::replace(&mut canvas, &tiles[2], TILE_SIZE as i64, 0);
    imageops::replace(&mut canvas, &tiles[3], TILE_SIZE as i64, TILE_SIZE as i64);

    let half = VIEW_SIZE / 2;
    let cx = center.0.clamp(half, CANVAS_SIZE - half);
    let cy = center.1.clamp(half, CANVAS_SIZE - half);

    imageops::crop_imm(&canvas, cx - half, cy - half, VIEW_SIZE, VIEW_SIZE).to_image()
}

/// Alpha-composites `top` over `base` in place.
pub fn composite_over(base: &mut RgbaImage, top: &RgbaImage) {
    imageops::overlay(base, top, 0, 0);
}

/// Composites a radar layer over `base` with attenuated alpha.
pub fn composite_radar(base: &mut RgbaImage, radar: &RgbaImage) {
    let mut attenuated = radar.clone();
    for pixel in attenuated.pixels_mut() {
        pixel.0[3] = (pixel.0[3] as f32 * RADAR_ALPHA) as u8;
    }
    imageops::overlay(base, &attenuated, 0, 0);
}

/// Encodes an image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, MosaicError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, image::ImageFormat::Png)
        .map_err(|e| MosaicError::Encode(e.to_string()))?;
    Ok(buffer)
}
