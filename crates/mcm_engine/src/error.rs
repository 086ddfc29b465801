//! Unified error types for mcm_engine

use std::{fmt::Display, path::PathBuf};
use thiserror::Error;

use crate::{palette::ALLOWED_COLORS_TEXT, BYTES_PER_GLYPH, GLYPH_HEIGHT, GLYPH_WIDTH};

/// Main error type for mcm_engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    // === Format Errors ===
    #[error("Not a MAX7456 text .mcm file (missing 'MAX7456' header).")]
    MissingHeader,

    #[error("Unexpected line count: got {actual}, expected {expected} (256 glyphs * 64 bytes per glyph).")]
    LineCount { expected: usize, actual: usize },

    #[error("Invalid byte line {line} at glyph {glyph}: {text:?}")]
    InvalidByteLine { glyph: usize, line: usize, text: String },

    // === Size Errors ===
    #[error("Glyph size mismatch: expected {expected} bytes, got {actual}{}", glyph_suffix(.glyph), expected = BYTES_PER_GLYPH)]
    GlyphSize { actual: usize, glyph: Option<usize> },

    #[error("Tile must be {tile_width}x{tile_height}, got {width}x{height}{}", glyph_suffix(.glyph), tile_width = GLYPH_WIDTH, tile_height = GLYPH_HEIGHT)]
    TileSize { width: u32, height: u32, glyph: Option<usize> },

    // === Palette Errors ===
    #[error("Illegal pixel color {color:?} at {location}. Allowed: {allowed}.", allowed = ALLOWED_COLORS_TEXT)]
    IllegalColor { color: (u8, u8, u8), location: PixelLocation },

    // === Dimension Errors ===
    #[error("Sheet must be exactly {expected_width}x{expected_height}, got {width}x{height}.")]
    SheetDimension {
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    #[error("Image must be divisible by {tile_width}x{tile_height}. Got {width}x{height}.")]
    TileAlignment { width: u32, height: u32, tile_width: u32, tile_height: u32 },

    #[error("Logo must contain exactly {expected} tiles for A0-FF. Got {actual} tiles ({columns}x{rows}) from {width}x{height}.")]
    TileCount {
        expected: usize,
        actual: usize,
        columns: u32,
        rows: u32,
        width: u32,
        height: u32,
    },

    // === I/O Errors ===
    #[error("Failed to read file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image error for '{path}': {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    // === Internal Errors ===
    #[error("Invariant violation: {message}")]
    InvariantViolation { message: String },
}

/// Result type alias for mcm_engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Error categories callers dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Format,
    SizeMismatch,
    IllegalColor,
    Dimension,
    TileCount,
    Io,
    Internal,
}

impl ErrorKind {
    /// Internal errors are bugs, not bad input.
    pub fn is_internal(self) -> bool {
        matches!(self, ErrorKind::Internal)
    }
}

/// Where an illegal pixel was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelLocation {
    pub x: u32,
    pub y: u32,
    pub glyph: Option<usize>,
}

impl Display for PixelLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pixel ({}, {})", self.x, self.y)?;
        if let Some(glyph) = self.glyph {
            write!(f, " of glyph 0x{glyph:02X}")?;
        }
        Ok(())
    }
}

fn glyph_suffix(glyph: &Option<usize>) -> String {
    match glyph {
        Some(glyph) => format!(" (glyph 0x{glyph:02X})"),
        None => String::new(),
    }
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::MissingHeader | EngineError::LineCount { .. } | EngineError::InvalidByteLine { .. } => ErrorKind::Format,
            EngineError::GlyphSize { .. } | EngineError::TileSize { .. } => ErrorKind::SizeMismatch,
            EngineError::IllegalColor { .. } => ErrorKind::IllegalColor,
            EngineError::SheetDimension { .. } | EngineError::TileAlignment { .. } => ErrorKind::Dimension,
            EngineError::TileCount { .. } => ErrorKind::TileCount,
            EngineError::ReadFile { .. } | EngineError::WriteFile { .. } | EngineError::Image { .. } => ErrorKind::Io,
            EngineError::InvariantViolation { .. } => ErrorKind::Internal,
        }
    }

    /// Attaches the glyph index to errors raised while encoding a single tile.
    pub fn at_glyph(self, index: usize) -> Self {
        match self {
            EngineError::IllegalColor { color, location } => EngineError::IllegalColor {
                color,
                location: PixelLocation {
                    glyph: Some(index),
                    ..location
                },
            },
            EngineError::TileSize { width, height, .. } => EngineError::TileSize {
                width,
                height,
                glyph: Some(index),
            },
            EngineError::GlyphSize { actual, .. } => EngineError::GlyphSize { actual, glyph: Some(index) },
            err => err,
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation { message: message.into() }
    }

    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile { path: path.into(), source }
    }

    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFile { path: path.into(), source }
    }

    pub fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Image { path: path.into(), source }
    }
}
