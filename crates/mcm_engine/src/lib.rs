#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::return_self_not_must_use
)]
//! Codec for MAX7456 / AT7456E on-screen-display fonts.
//!
//! A `.mcm` font is a text file holding 256 glyphs of 64 bytes each, one byte per
//! line written as 8 binary digits. Every glyph is a 12x18 grid of 2-bit pixels
//! (black, transparent, white). This crate converts such fonts to a 16x16 glyph
//! sheet image and back, and injects pre-tiled logos into glyphs `0xA0..=0xFF`.
//!
//! ```no_run
//! use mcm_engine::{font_to_sheet, inject_logo, load_image, save_image, McmFont};
//! use std::path::Path;
//!
//! let font = McmFont::load(Path::new("betaflight.mcm")).unwrap();
//! let sheet = font_to_sheet(&font);
//! save_image(&sheet, Path::new("sheet.png")).unwrap();
//!
//! let logo = load_image(Path::new("logo_192x108.png")).unwrap();
//! let branded = inject_logo(&font, &logo).unwrap();
//! branded.save(Path::new("branded.mcm")).unwrap();
//! ```

mod error;
pub use error::*;

mod palette;
pub use palette::*;

mod glyph;
pub use glyph::*;

mod font;
pub use font::*;

mod layout;
pub use layout::*;

mod sheet;
pub use sheet::*;

mod logo;
pub use logo::*;

pub mod convert;
mod util;

/// Glyph width in pixels.
pub const GLYPH_WIDTH: u32 = 12;
/// Glyph height in pixels.
pub const GLYPH_HEIGHT: u32 = 18;

/// Size of one glyph record in a .mcm font.
pub const BYTES_PER_GLYPH: usize = 64;
/// Bytes that carry pixel data, the rest is zero padding.
pub const DATA_BYTES_PER_GLYPH: usize = 54;
pub const PADDING_BYTES: usize = BYTES_PER_GLYPH - DATA_BYTES_PER_GLYPH;
/// One glyph row of 12 pixels packs into 24 bits.
pub const BYTES_PER_ROW: usize = 3;
pub const BITS_PER_PIXEL: u32 = 2;

/// Number of glyphs in a font.
pub const GLYPH_COUNT: usize = 256;
pub const GRID_COLUMNS: u32 = 16;
pub const GRID_ROWS: u32 = 16;
pub const SHEET_WIDTH: u32 = GLYPH_WIDTH * GRID_COLUMNS;
pub const SHEET_HEIGHT: u32 = GLYPH_HEIGHT * GRID_ROWS;

/// First line of every text .mcm file.
pub const MCM_HEADER: &str = "MAX7456";

/// Logo injection range.
pub const INJECT_START: usize = 0xA0;
pub const INJECT_END: usize = 0xFF;
pub const INJECT_COUNT: usize = INJECT_END - INJECT_START + 1;
