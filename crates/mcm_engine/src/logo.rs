use image::{imageops, RgbImage};

use crate::{encode, EngineError, McmFont, Result, SheetLayout, INJECT_COUNT, INJECT_START};

/// Writes a pre-tiled logo into glyphs `0xA0..=0xFF`.
///
/// The logo must be aligned to 12x18 tiles and hold exactly 96 of them in any
/// arrangement, 16x6 (192x108) and 24x4 (288x72) are the common ones. Tiles are
/// taken row by row, left to right. The base font is left untouched, the result is
/// a new font where only the 96 logo glyphs differ.
///
/// # Errors
///
/// Fails if the logo isn't tile aligned, has the wrong tile count, or uses colors
/// outside of the palette.
pub fn inject_logo(base: &McmFont, logo: &RgbImage) -> Result<McmFont> {
    let (width, height) = logo.dimensions();
    let layout = SheetLayout::for_image(width, height)?;
    if layout.tile_count() != INJECT_COUNT {
        return Err(EngineError::TileCount {
            expected: INJECT_COUNT,
            actual: layout.tile_count(),
            columns: layout.columns,
            rows: layout.rows,
            width,
            height,
        });
    }
    log::debug!("Injecting {}x{} logo tiles into glyphs 0x{INJECT_START:02X}..", layout.columns, layout.rows);

    let mut font = base.clone();
    for (position, (x, y)) in layout.origins().enumerate() {
        let index = INJECT_START + position;
        let tile = imageops::crop_imm(logo, x, y, layout.tile_width, layout.tile_height).to_image();
        let glyph = encode(&tile).map_err(|err| err.at_glyph(index))?;
        font.replace_glyph(index, glyph)?;
    }
    Ok(font)
}
