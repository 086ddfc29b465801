//! File level operations: read inputs, convert, write the output atomically.

use std::path::Path;

use crate::{font_to_sheet, inject_logo, load_image, save_image, sheet_to_font, McmFont, Result};

/// Reads a text .mcm font and writes its 192x288 glyph sheet.
pub fn convert_font_to_sheet(font_path: &Path, sheet_path: &Path) -> Result<()> {
    let font = McmFont::load(font_path)?;
    let sheet = font_to_sheet(&font);
    save_image(&sheet, sheet_path)?;
    log::info!("Wrote sheet {} from {}", sheet_path.display(), font_path.display());
    Ok(())
}

/// Reads a 192x288 glyph sheet and writes it as text .mcm font.
pub fn convert_sheet_to_font(sheet_path: &Path, font_path: &Path) -> Result<()> {
    let sheet = load_image(sheet_path)?;
    let font = sheet_to_font(&sheet)?;
    font.save(font_path)
}

/// Injects a pre-tiled logo image into glyphs `0xA0..=0xFF` of a base font and writes the result.
///
/// The base font file is only read; it's fine for `out_font_path` to name the same file.
pub fn inject_logo_file(base_font_path: &Path, logo_path: &Path, out_font_path: &Path) -> Result<()> {
    let base = McmFont::load(base_font_path)?;
    let logo = load_image(logo_path)?;
    let font = inject_logo(&base, &logo)?;
    font.save(out_font_path)
}
