//! Conversion between a font and its 16x16 glyph sheet image.

use std::{io::Cursor, path::Path};

use image::{imageops, ImageFormat, RgbImage};

use crate::{encode, util::write_atomic, EngineError, McmFont, Result, SheetLayout, GLYPH_HEIGHT, GLYPH_WIDTH, RGB_GRAY};

/// Renders all 256 glyphs into a 192x288 sheet. Glyph `i` lands in column `i % 16`, row `i / 16`.
pub fn font_to_sheet(font: &McmFont) -> RgbImage {
    let layout = SheetLayout::FONT;
    let (width, height) = layout.size();
    let mut sheet = RgbImage::from_pixel(width, height, RGB_GRAY);

    for (index, glyph) in font.glyphs.iter().enumerate().take(layout.tile_count()) {
        if glyph.has_reserved_pixels() {
            log::warn!("Glyph 0x{index:02X} uses reserved pixel value 3, rendered as white.");
        }
        let (x, y) = layout.origin(index);
        imageops::replace(&mut sheet, &glyph.to_tile(), i64::from(x), i64::from(y));
    }
    sheet
}

/// Builds a font from a 192x288 glyph sheet.
///
/// # Errors
///
/// Fails if the sheet has the wrong size or any tile contains a color outside of the
/// palette. Tile errors name the glyph index.
pub fn sheet_to_font(sheet: &RgbImage) -> Result<McmFont> {
    let layout = SheetLayout::FONT;
    let (expected_width, expected_height) = layout.size();
    if sheet.dimensions() != (expected_width, expected_height) {
        return Err(EngineError::SheetDimension {
            width: sheet.width(),
            height: sheet.height(),
            expected_width,
            expected_height,
        });
    }

    let glyphs = layout
        .origins()
        .enumerate()
        .map(|(index, (x, y))| {
            let tile = imageops::crop_imm(sheet, x, y, GLYPH_WIDTH, GLYPH_HEIGHT).to_image();
            encode(&tile).map_err(|err| err.at_glyph(index))
        })
        .collect::<Result<Vec<_>>>()?;
    McmFont::from_glyphs(glyphs)
}

/// Loads any image format the `image` crate can decode as 8 bit RGB.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|err| EngineError::image(path, err))?.to_rgb8();
    log::debug!("Loaded image {} ({}x{})", path.display(), img.width(), img.height());
    Ok(img)
}

/// Saves an image, format chosen by file extension.
///
/// Use a lossless format: lossy formats shift colors off the palette and the sheet
/// can't be converted back.
pub fn save_image(img: &RgbImage, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path).map_err(|err| EngineError::image(path, err))?;
    if matches!(format, ImageFormat::Jpeg | ImageFormat::WebP) {
        log::warn!("{} uses a lossy format, colors may not survive a round trip. Use PNG.", path.display());
    }
    let mut data = Vec::new();
    img.write_to(&mut Cursor::new(&mut data), format).map_err(|err| EngineError::image(path, err))?;
    write_atomic(path, &data)?;
    log::debug!("Saved image {} ({}x{})", path.display(), img.width(), img.height());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, Glyph, PixelLocation, BYTES_PER_GLYPH, RGB_GREEN, RGB_WHITE, SHEET_HEIGHT, SHEET_WIDTH};
    use image::Rgb;

    #[test]
    fn test_sheet_size() {
        let sheet = font_to_sheet(&McmFont::default());
        assert_eq!(sheet.dimensions(), (SHEET_WIDTH, SHEET_HEIGHT));
    }

    #[test]
    fn test_glyph_placement() {
        let mut font = McmFont::default();
        // all white
        font.glyphs[0x21] = Glyph::new([0xAA; BYTES_PER_GLYPH]);
        let sheet = font_to_sheet(&font);
        assert_eq!(*sheet.get_pixel(12, 36), RGB_WHITE);
        assert_eq!(*sheet.get_pixel(23, 53), RGB_WHITE);
        assert_ne!(*sheet.get_pixel(24, 36), RGB_WHITE);
        assert_ne!(*sheet.get_pixel(12, 54), RGB_WHITE);
    }

    #[test]
    fn test_wrong_sheet_size() {
        let sheet = RgbImage::from_pixel(191, 288, RGB_GRAY);
        assert_eq!(sheet_to_font(&sheet).unwrap_err().kind(), ErrorKind::Dimension);
        let sheet = RgbImage::from_pixel(192, 289, RGB_GRAY);
        assert_eq!(sheet_to_font(&sheet).unwrap_err().kind(), ErrorKind::Dimension);
    }

    #[test]
    fn test_illegal_color_names_glyph() {
        let mut sheet = RgbImage::from_pixel(SHEET_WIDTH, SHEET_HEIGHT, RGB_GREEN);
        // glyph 0x12 starts at (24, 18)
        sheet.put_pixel(24 + 4, 18 + 2, Rgb([200, 10, 10]));
        match sheet_to_font(&sheet) {
            Err(EngineError::IllegalColor { color, location }) => {
                assert_eq!(color, (200, 10, 10));
                assert_eq!(location, PixelLocation { x: 4, y: 2, glyph: Some(0x12) });
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_green_sheet_reads_transparent() {
        let sheet = RgbImage::from_pixel(SHEET_WIDTH, SHEET_HEIGHT, RGB_GREEN);
        let font = sheet_to_font(&sheet).unwrap();
        let transparent = Glyph::new({
            let mut data = [0x55; BYTES_PER_GLYPH];
            data[crate::DATA_BYTES_PER_GLYPH..].fill(0);
            data
        });
        assert!(font.glyphs.iter().all(|g| *g == transparent));
        // rendering canonicalizes green to gray
        assert!(font_to_sheet(&font).pixels().all(|p| *p == RGB_GRAY));
    }
}
