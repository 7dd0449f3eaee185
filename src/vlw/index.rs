use super::tables::GlyphRecord;
use super::{bitmap_len, is_drawable, VlwFont};
use crate::errors::DecodeError;
use crate::parsing::Position;
use crate::primitives::Glyph;
use std::collections::HashMap;

/// Precomputed directory positions and bitmap offsets of a VLW font’s glyphs.
///
/// `make_glyph` produces the same glyphs as `VlwFont::make_glyph`,
/// without scanning the directory each time.
#[derive(Debug)]
pub struct GlyphIndex<'a> {
    font: &'a VlwFont,
    glyphs: HashMap<u32, (Position<GlyphRecord>, u64)>,
}

impl<'a> GlyphIndex<'a> {
    pub(super) fn new(font: &'a VlwFont) -> Result<Self, DecodeError> {
        let bytes = font.bytes();
        let mut glyphs = HashMap::new();
        let mut bitmap_offset = font.bitmaps_start();
        for record in font.directory {
            let codepoint = record.codepoint().read_from(bytes)?;
            // Like a directory scan, the first record for a codepoint wins.
            glyphs.entry(codepoint).or_insert((record, bitmap_offset));
            bitmap_offset = bitmap_offset.saturating_add(bitmap_len(bytes, record)?);
        }
        Ok(GlyphIndex { font, glyphs })
    }

    pub fn font(&self) -> &'a VlwFont {
        self.font
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        self.glyphs.contains_key(&codepoint)
    }

    pub fn make_glyph(&self, codepoint: u32, color: u32) -> Result<Glyph, DecodeError> {
        if !is_drawable(codepoint) {
            return Ok(self.font.blank_glyph());
        }
        match self.glyphs.get(&codepoint) {
            Some(&(record, bitmap_offset)) => self.font.render(record, bitmap_offset, color),
            None => Ok(self.font.blank_glyph()),
        }
    }
}
