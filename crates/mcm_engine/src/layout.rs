use crate::{EngineError, Result, GLYPH_HEIGHT, GLYPH_WIDTH, GRID_COLUMNS, GRID_ROWS};

/// Pixel origin of tile `index` in a grid with `grid_cols` columns.
pub fn glyph_origin(index: usize, tile_w: u32, tile_h: u32, grid_cols: u32) -> (u32, u32) {
    let index = index as u32;
    ((index % grid_cols) * tile_w, (index / grid_cols) * tile_h)
}

pub fn sheet_size(grid_cols: u32, grid_rows: u32, tile_w: u32, tile_h: u32) -> (u32, u32) {
    (grid_cols * tile_w, grid_rows * tile_h)
}

/// A grid of equally sized tiles, numbered row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetLayout {
    pub tile_width: u32,
    pub tile_height: u32,
    pub columns: u32,
    pub rows: u32,
}

impl SheetLayout {
    /// The 16x16 glyph sheet of a full font (192x288 pixels).
    pub const FONT: SheetLayout = SheetLayout {
        tile_width: GLYPH_WIDTH,
        tile_height: GLYPH_HEIGHT,
        columns: GRID_COLUMNS,
        rows: GRID_ROWS,
    };

    /// Derives the glyph grid covering an image of the given size.
    ///
    /// # Errors
    ///
    /// Fails if either side isn't a multiple of the glyph size.
    pub fn for_image(width: u32, height: u32) -> Result<Self> {
        if width % GLYPH_WIDTH != 0 || height % GLYPH_HEIGHT != 0 {
            return Err(EngineError::TileAlignment {
                width,
                height,
                tile_width: GLYPH_WIDTH,
                tile_height: GLYPH_HEIGHT,
            });
        }
        Ok(Self {
            tile_width: GLYPH_WIDTH,
            tile_height: GLYPH_HEIGHT,
            columns: width / GLYPH_WIDTH,
            rows: height / GLYPH_HEIGHT,
        })
    }

    pub fn tile_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn origin(&self, index: usize) -> (u32, u32) {
        glyph_origin(index, self.tile_width, self.tile_height, self.columns)
    }

    pub fn size(&self) -> (u32, u32) {
        sheet_size(self.columns, self.rows, self.tile_width, self.tile_height)
    }

    /// Tile origins in row-major order.
    pub fn origins(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.tile_count()).map(|index| self.origin(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, SHEET_HEIGHT, SHEET_WIDTH};

    #[test]
    fn test_font_sheet_size() {
        assert_eq!(SheetLayout::FONT.size(), (192, 288));
        assert_eq!(SheetLayout::FONT.size(), (SHEET_WIDTH, SHEET_HEIGHT));
        assert_eq!(SheetLayout::FONT.tile_count(), 256);
    }

    #[test]
    fn test_glyph_origin() {
        assert_eq!(glyph_origin(0, 12, 18, 16), (0, 0));
        assert_eq!(glyph_origin(15, 12, 18, 16), (180, 0));
        assert_eq!(glyph_origin(16, 12, 18, 16), (0, 18));
        assert_eq!(glyph_origin(0x41, 12, 18, 16), (12, 72));
        assert_eq!(glyph_origin(255, 12, 18, 16), (180, 270));
        assert_eq!(glyph_origin(25, 12, 18, 24), (12, 18));
    }

    #[test]
    fn test_for_image() {
        let layout = SheetLayout::for_image(288, 72).unwrap();
        assert_eq!((layout.columns, layout.rows), (24, 4));
        assert_eq!(layout.tile_count(), 96);
        assert_eq!(layout.origin(24), (0, 18));

        let err = SheetLayout::for_image(190, 108).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimension);
        assert!(SheetLayout::for_image(192, 100).is_err());
    }

    #[test]
    fn test_origins_row_major() {
        let layout = SheetLayout::for_image(24, 36).unwrap();
        let origins: Vec<_> = layout.origins().collect();
        assert_eq!(origins, vec![(0, 0), (12, 0), (0, 18), (12, 18)]);
    }
}
