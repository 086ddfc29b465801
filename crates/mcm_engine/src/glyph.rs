use std::fmt::Display;

use image::{GenericImageView, Rgb, RgbImage};

use crate::{
    palette::color_to_value_at, value_to_color, EngineError, PixelValue, Result, BITS_PER_PIXEL, BYTES_PER_GLYPH, BYTES_PER_ROW, GLYPH_HEIGHT, GLYPH_WIDTH,
};

const PIXEL_MASK: u32 = 0b11;
const PIXELS_PER_GLYPH: usize = (GLYPH_WIDTH * GLYPH_HEIGHT) as usize;

/// One 64 byte glyph record: 18 rows of 3 bytes pixel data followed by 10 bytes padding.
///
/// Within a row the 12 pixels are packed as 2-bit fields, most significant pair first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph {
    data: [u8; BYTES_PER_GLYPH],
}

impl Default for Glyph {
    fn default() -> Self {
        Self { data: [0; BYTES_PER_GLYPH] }
    }
}

impl Display for Glyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = String::new();
        for y in 0..GLYPH_HEIGHT {
            s.push_str(&format!("{y:2} "));
            for x in 0..GLYPH_WIDTH {
                s.push(match self.pixel(x, y) {
                    PixelValue::Black => '.',
                    PixelValue::Transparent => ' ',
                    PixelValue::White | PixelValue::Reserved => '#',
                });
            }
            s.push('\n');
        }
        write!(f, "{s}---")
    }
}

impl Glyph {
    pub const fn new(data: [u8; BYTES_PER_GLYPH]) -> Self {
        Self { data }
    }

    /// Takes a glyph record as stored in a font.
    ///
    /// # Errors
    ///
    /// Fails with a size mismatch unless `data` is exactly 64 bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let data: [u8; BYTES_PER_GLYPH] = data.try_into().map_err(|_| EngineError::GlyphSize { actual: data.len(), glyph: None })?;
        Ok(Self { data })
    }

    /// Packs a row-major list of 216 pixel values. Reserved values are written as white.
    pub fn from_pixel_values(values: &[PixelValue]) -> Result<Self> {
        if values.len() != PIXELS_PER_GLYPH {
            return Err(EngineError::invariant(format!(
                "glyph needs {PIXELS_PER_GLYPH} pixel values, got {}",
                values.len()
            )));
        }
        let mut data = [0; BYTES_PER_GLYPH];
        for (row, chunk) in values.chunks_exact(GLYPH_WIDTH as usize).enumerate() {
            let bits = chunk.iter().fold(0, |bits, v| push_pixel(bits, v.displayable()));
            store_row(&mut data, row, bits);
        }
        Ok(Self { data })
    }

    pub fn as_bytes(&self) -> &[u8; BYTES_PER_GLYPH] {
        &self.data
    }

    /// The stored 2-bit value, without remapping reserved pixels.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside of the 12x18 glyph.
    pub fn raw_value(&self, x: u32, y: u32) -> PixelValue {
        assert!(x < GLYPH_WIDTH && y < GLYPH_HEIGHT, "pixel ({x}, {y}) outside of glyph");
        let shift = (GLYPH_WIDTH - 1 - x) * BITS_PER_PIXEL;
        PixelValue::from_bits(((self.row_bits(y) >> shift) & PIXEL_MASK) as u8)
    }

    /// Pixel value as shown on screen. Reserved pixels are displayed white.
    pub fn pixel(&self, x: u32, y: u32) -> PixelValue {
        self.raw_value(x, y).displayable()
    }

    /// All 216 pixels row by row, reserved values remapped to white.
    pub fn pixel_values(&self) -> Vec<PixelValue> {
        let mut values = Vec::with_capacity(PIXELS_PER_GLYPH);
        for y in 0..GLYPH_HEIGHT {
            for x in 0..GLYPH_WIDTH {
                values.push(self.pixel(x, y));
            }
        }
        values
    }

    pub fn has_reserved_pixels(&self) -> bool {
        (0..GLYPH_HEIGHT).any(|y| (0..GLYPH_WIDTH).any(|x| self.raw_value(x, y) == PixelValue::Reserved))
    }

    /// Renders the glyph as a 12x18 tile in display colors.
    pub fn to_tile(&self) -> RgbImage {
        RgbImage::from_fn(GLYPH_WIDTH, GLYPH_HEIGHT, |x, y| value_to_color(self.pixel(x, y)))
    }

    fn row_bits(&self, y: u32) -> u32 {
        let offset = y as usize * BYTES_PER_ROW;
        let row = &self.data[offset..offset + BYTES_PER_ROW];
        u32::from_be_bytes([0, row[0], row[1], row[2]])
    }
}

fn push_pixel(bits: u32, value: PixelValue) -> u32 {
    (bits << BITS_PER_PIXEL) | (u32::from(value.bits()) & PIXEL_MASK)
}

fn store_row(data: &mut [u8; BYTES_PER_GLYPH], row: usize, bits: u32) {
    let offset = row * BYTES_PER_ROW;
    data[offset..offset + BYTES_PER_ROW].copy_from_slice(&bits.to_be_bytes()[1..]);
}

/// Decodes a glyph record into 216 row-major pixel values.
///
/// The padding bytes are ignored. Reserved pixels (value 3) come back as white.
///
/// # Errors
///
/// Fails with a size mismatch unless `data` is exactly 64 bytes.
pub fn decode(data: &[u8]) -> Result<Vec<PixelValue>> {
    Ok(Glyph::from_bytes(data)?.pixel_values())
}

/// Encodes a 12x18 tile. Accepts owned tiles as well as views into a larger sheet.
///
/// # Errors
///
/// Fails with a size mismatch for tiles that aren't 12x18 and with an illegal color
/// error for the first pixel outside of the palette.
pub fn encode<I>(tile: &I) -> Result<Glyph>
where
    I: GenericImageView<Pixel = Rgb<u8>>,
{
    let (width, height) = tile.dimensions();
    if width != GLYPH_WIDTH || height != GLYPH_HEIGHT {
        return Err(EngineError::TileSize { width, height, glyph: None });
    }

    let mut data = [0; BYTES_PER_GLYPH];
    for y in 0..GLYPH_HEIGHT {
        let mut bits = 0;
        for x in 0..GLYPH_WIDTH {
            bits = push_pixel(bits, color_to_value_at(tile.get_pixel(x, y), x, y)?);
        }
        store_row(&mut data, y as usize, bits);
    }
    Ok(Glyph { data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, DATA_BYTES_PER_GLYPH, RGB_BLACK, RGB_GRAY, RGB_GREEN, RGB_WHITE};

    #[test]
    fn test_row_bit_order() {
        let mut data = [0; BYTES_PER_GLYPH];
        data[0..3].copy_from_slice(&[0b0101_0101, 0b0101_0101, 0b0101_0101]);
        let values = decode(&data).unwrap();
        assert_eq!(values[..12], [PixelValue::Transparent; 12]);
        assert_eq!(values[12..24], [PixelValue::Black; 12]);
    }

    #[test]
    fn test_msb_pair_is_leftmost_pixel() {
        let mut data = [0; BYTES_PER_GLYPH];
        // row 1: white, black, transparent, black ... last pixel transparent
        data[3] = 0b1000_0100;
        data[5] = 0b0000_0001;
        let glyph = Glyph::new(data);
        assert_eq!(glyph.pixel(0, 1), PixelValue::White);
        assert_eq!(glyph.pixel(1, 1), PixelValue::Black);
        assert_eq!(glyph.pixel(2, 1), PixelValue::Transparent);
        assert_eq!(glyph.pixel(11, 1), PixelValue::Transparent);
        assert_eq!(glyph.pixel(10, 1), PixelValue::Black);
    }

    #[test]
    fn test_padding_is_ignored() {
        let mut data = [0x55; BYTES_PER_GLYPH];
        data[DATA_BYTES_PER_GLYPH..].fill(0xFF);
        let values = decode(&data).unwrap();
        assert!(values.iter().all(|v| *v == PixelValue::Transparent));
    }

    #[test]
    fn test_decode_size_mismatch() {
        let err = decode(&[0; 63]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeMismatch);
        assert!(decode(&[0; 65]).is_err());
    }

    #[test]
    fn test_reserved_value_displays_white() {
        let mut data = [0; BYTES_PER_GLYPH];
        data[0] = 0b1100_0000;
        let glyph = Glyph::new(data);
        assert_eq!(glyph.raw_value(0, 0), PixelValue::Reserved);
        assert_eq!(glyph.pixel(0, 0), PixelValue::White);
        assert!(glyph.has_reserved_pixels());
        assert_eq!(decode(&data).unwrap()[0], PixelValue::White);
        assert!(!Glyph::default().has_reserved_pixels());
    }

    #[test]
    fn test_encode_transparent_tile() {
        let tile = RgbImage::from_pixel(GLYPH_WIDTH, GLYPH_HEIGHT, RGB_GRAY);
        let glyph = encode(&tile).unwrap();
        assert!(glyph.as_bytes()[..DATA_BYTES_PER_GLYPH].iter().all(|b| *b == 0x55));
        assert!(glyph.as_bytes()[DATA_BYTES_PER_GLYPH..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_encode_green_is_transparent() {
        let gray = encode(&RgbImage::from_pixel(GLYPH_WIDTH, GLYPH_HEIGHT, RGB_GRAY)).unwrap();
        let green = encode(&RgbImage::from_pixel(GLYPH_WIDTH, GLYPH_HEIGHT, RGB_GREEN)).unwrap();
        assert_eq!(gray, green);
    }

    #[test]
    fn test_encode_packs_msb_first() {
        let mut tile = RgbImage::from_pixel(GLYPH_WIDTH, GLYPH_HEIGHT, RGB_BLACK);
        tile.put_pixel(0, 0, RGB_WHITE);
        tile.put_pixel(11, 0, RGB_GRAY);
        let glyph = encode(&tile).unwrap();
        assert_eq!(glyph.as_bytes()[0..3], [0b1000_0000, 0, 0b0000_0001]);
    }

    #[test]
    fn test_encode_tile_size_mismatch() {
        let tile = RgbImage::from_pixel(11, GLYPH_HEIGHT, RGB_GRAY);
        let err = encode(&tile).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeMismatch);
    }

    #[test]
    fn test_encode_illegal_color_reports_position() {
        let mut tile = RgbImage::from_pixel(GLYPH_WIDTH, GLYPH_HEIGHT, RGB_GRAY);
        tile.put_pixel(5, 7, Rgb([1, 1, 1]));
        match encode(&tile) {
            Err(EngineError::IllegalColor { color, location }) => {
                assert_eq!(color, (1, 1, 1));
                assert_eq!((location.x, location.y, location.glyph), (5, 7, None));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_encode_decode_encode_is_stable() {
        let mut tile = RgbImage::from_pixel(GLYPH_WIDTH, GLYPH_HEIGHT, RGB_GREEN);
        for i in 0..GLYPH_WIDTH {
            tile.put_pixel(i, i, RGB_WHITE);
            tile.put_pixel(GLYPH_WIDTH - 1 - i, i + 3, RGB_BLACK);
        }
        let glyph = encode(&tile).unwrap();
        let again = encode(&glyph.to_tile()).unwrap();
        assert_eq!(glyph, again);
        assert_eq!(glyph.pixel_values(), again.pixel_values());
    }

    #[test]
    fn test_from_pixel_values() {
        let mut values = vec![PixelValue::Transparent; PIXELS_PER_GLYPH];
        values[0] = PixelValue::White;
        values[13] = PixelValue::Reserved;
        let glyph = Glyph::from_pixel_values(&values).unwrap();
        assert_eq!(glyph.raw_value(0, 0), PixelValue::White);
        assert_eq!(glyph.raw_value(1, 1), PixelValue::White);
        assert!(!glyph.has_reserved_pixels());
        assert!(Glyph::from_pixel_values(&values[1..]).is_err());
    }

    #[test]
    fn test_display() {
        let mut values = vec![PixelValue::Transparent; PIXELS_PER_GLYPH];
        values[0] = PixelValue::White;
        values[1] = PixelValue::Black;
        let glyph = Glyph::from_pixel_values(&values).unwrap();
        let text = glyph.to_string();
        assert!(text.starts_with(" 0 #.          \n"), "{text}");
        assert!(text.ends_with("---"));
    }
}
