use std::{fs, path::Path};

use crate::{util::write_atomic, EngineError, Glyph, Result, BYTES_PER_GLYPH, GLYPH_COUNT, MCM_HEADER};

/// A MAX7456 font: exactly 256 glyphs of 64 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McmFont {
    pub glyphs: Vec<Glyph>,
}

impl Default for McmFont {
    fn default() -> Self {
        Self {
            glyphs: vec![Glyph::default(); GLYPH_COUNT],
        }
    }
}

impl McmFont {
    /// # Errors
    ///
    /// Fails unless exactly 256 glyphs are given.
    pub fn from_glyphs(glyphs: Vec<Glyph>) -> Result<Self> {
        let font = Self { glyphs };
        font.check_glyph_count()?;
        Ok(font)
    }

    /// Parses a text .mcm font.
    ///
    /// The first line must be `MAX7456`, followed by exactly 256 * 64 lines of 8 binary
    /// digits each, most significant bit first. Surrounding whitespace on a line is
    /// ignored so files with CRLF line endings load as well.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        match lines.next() {
            Some(header) if header.trim() == MCM_HEADER => {}
            _ => return Err(EngineError::MissingHeader),
        }

        let data_lines: Vec<&str> = lines.collect();
        let expected = GLYPH_COUNT * BYTES_PER_GLYPH;
        if data_lines.len() != expected {
            return Err(EngineError::LineCount {
                expected,
                actual: data_lines.len(),
            });
        }

        let mut glyphs = Vec::with_capacity(GLYPH_COUNT);
        for (index, chunk) in data_lines.chunks_exact(BYTES_PER_GLYPH).enumerate() {
            let mut data = [0; BYTES_PER_GLYPH];
            for (offset, (byte, line)) in data.iter_mut().zip(chunk).enumerate() {
                *byte = parse_byte_line(line).ok_or_else(|| EngineError::InvalidByteLine {
                    glyph: index,
                    // header is line 1
                    line: index * BYTES_PER_GLYPH + offset + 2,
                    text: line.trim().to_string(),
                })?;
            }
            glyphs.push(Glyph::new(data));
        }
        Ok(Self { glyphs })
    }

    /// Serializes to the text .mcm format, one newline terminated line per byte.
    ///
    /// # Errors
    ///
    /// Fails with an invariant violation if the font doesn't hold 256 glyphs.
    pub fn to_text(&self) -> Result<String> {
        self.check_glyph_count()?;
        let mut text = String::with_capacity(MCM_HEADER.len() + 1 + GLYPH_COUNT * BYTES_PER_GLYPH * 9);
        text.push_str(MCM_HEADER);
        text.push('\n');
        for glyph in &self.glyphs {
            for b in glyph.as_bytes() {
                text.push_str(&format!("{b:08b}\n"));
            }
        }
        Ok(text)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| EngineError::read_file(path, err))?;
        let font = Self::parse(&text)?;
        log::info!("Loaded font {} (crc32 {:08X})", path.display(), font.checksum());
        Ok(font)
    }

    /// Writes the font atomically: either the complete file appears or nothing changes.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = self.to_text()?;
        write_atomic(path, text.as_bytes())?;
        log::info!("Saved font {} (crc32 {:08X})", path.display(), self.checksum());
        Ok(())
    }

    pub fn glyph(&self, index: usize) -> Option<&Glyph> {
        self.glyphs.get(index)
    }

    pub fn replace_glyph(&mut self, index: usize, glyph: Glyph) -> Result<()> {
        let Some(slot) = self.glyphs.get_mut(index) else {
            return Err(EngineError::invariant(format!("glyph index {index} out of range (0..{})", self.glyphs.len())));
        };
        *slot = glyph;
        Ok(())
    }

    /// CRC32 over all glyph bytes.
    pub fn checksum(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        for glyph in &self.glyphs {
            hasher.update(glyph.as_bytes());
        }
        hasher.finalize()
    }

    fn check_glyph_count(&self) -> Result<()> {
        if self.glyphs.len() != GLYPH_COUNT {
            return Err(EngineError::invariant(format!(
                "font must hold exactly {GLYPH_COUNT} glyphs, got {}",
                self.glyphs.len()
            )));
        }
        Ok(())
    }
}

fn parse_byte_line(line: &str) -> Option<u8> {
    let line = line.trim();
    if line.len() != 8 || !line.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }
    u8::from_str_radix(line, 2).ok()
}
