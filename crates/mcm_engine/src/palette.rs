use image::Rgb;

use crate::{EngineError, PixelLocation, Result};

pub const RGB_BLACK: Rgb<u8> = Rgb([0, 0, 0]);
/// Transparency placeholder, used for everything this crate renders.
pub const RGB_GRAY: Rgb<u8> = Rgb([128, 128, 128]);
pub const RGB_WHITE: Rgb<u8> = Rgb([255, 255, 255]);
/// Chroma-key transparency used by Betaflight logo sheets.
pub const RGB_GREEN: Rgb<u8> = Rgb([0, 255, 0]);

pub(crate) const ALLOWED_COLORS_TEXT: &str = "black (0, 0, 0), gray (128, 128, 128), green (0, 255, 0), white (255, 255, 255)";

/// A 2-bit MAX7456 pixel.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelValue {
    Black = 0,
    #[default]
    Transparent = 1,
    White = 2,
    /// Never written by the encoder. Only found in third-party fonts.
    Reserved = 3,
}

impl PixelValue {
    /// Interprets the low two bits of `bits`.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => PixelValue::Black,
            1 => PixelValue::Transparent,
            2 => PixelValue::White,
            _ => PixelValue::Reserved,
        }
    }

    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Reserved pixels are shown as white.
    pub fn displayable(self) -> Self {
        match self {
            PixelValue::Reserved => PixelValue::White,
            v => v,
        }
    }
}

impl From<PixelValue> for u8 {
    fn from(value: PixelValue) -> u8 {
        value.bits()
    }
}

/// Maps an exact palette color to its pixel value.
///
/// Only black, white, gray and green are accepted. There is no nearest color
/// matching: any other color is rejected so a sheet can't be re-encoded lossy.
pub fn color_to_value(rgb: Rgb<u8>) -> Result<PixelValue> {
    color_to_value_at(rgb, 0, 0)
}

pub(crate) fn color_to_value_at(rgb: Rgb<u8>, x: u32, y: u32) -> Result<PixelValue> {
    if rgb == RGB_BLACK {
        return Ok(PixelValue::Black);
    }
    if rgb == RGB_WHITE {
        return Ok(PixelValue::White);
    }
    if rgb == RGB_GRAY || rgb == RGB_GREEN {
        return Ok(PixelValue::Transparent);
    }
    let Rgb([r, g, b]) = rgb;
    Err(EngineError::IllegalColor {
        color: (r, g, b),
        location: PixelLocation { x, y, glyph: None },
    })
}

/// Display color of a pixel value. Transparency is always rendered gray.
pub fn value_to_color(value: PixelValue) -> Rgb<u8> {
    match value {
        PixelValue::Black => RGB_BLACK,
        PixelValue::Transparent => RGB_GRAY,
        PixelValue::White | PixelValue::Reserved => RGB_WHITE,
    }
}
