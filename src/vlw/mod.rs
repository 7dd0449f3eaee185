//! Processing VLW fonts: a directory of fixed-size glyph records
//! followed by the glyphs’ 8-bit alpha bitmaps.

mod index;
mod tables;

pub use self::index::GlyphIndex;

use self::tables::*;
use crate::errors::DecodeError;
use crate::parsing::{Position, Slice};
use crate::primitives::{size, vector, DebugAsDisplay, Glyph};
use rayon::prelude::*;
use std::borrow::Cow;
use std::fmt;

/// The space width is `(ascent + descent) * SPACE_WIDTH_FACTOR`.
/// This factor is computed with integer division and is zero,
/// so the space width of every VLW font is zero.
// FIXME: `2 / 7` is probably meant as a fraction, but changing it changes the output of every font.
const SPACE_WIDTH_FACTOR: i32 = 2 / 7;

/// A Processing font loaded from a `.vlw` file.
#[derive(Clone, PartialEq)]
pub struct VlwFont {
    bytes: Cow<'static, [u8]>,
    directory: Slice<GlyphRecord>,
    metrics: VlwMetrics,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VlwMetrics {
    pub glyph_count: u32,
    pub line_advance: u32,
    pub ascent: i32,
    pub descent: i32,
    /// Width and advance of blank glyphs. Always zero, see `SPACE_WIDTH_FACTOR`.
    pub space_width: u32,
    /// The largest height of a drawable glyph
    pub line_height: u32,
}

/// Whether a codepoint has a glyph bitmap rather than rendering as blank space:
/// printable ASCII and Latin-1 except for space and no-break space, and anything above Latin-1.
pub fn is_drawable(codepoint: u32) -> bool {
    (codepoint > 0x20 && codepoint < 0xA0 && codepoint != 0x7F) || codepoint > 0xFF
}

impl VlwFont {
    pub fn load<B: Into<Cow<'static, [u8]>>>(bytes: B) -> Result<Self, DecodeError> {
        Self::load_cow(bytes.into())
    }

    fn load_cow(bytes: Cow<'static, [u8]>) -> Result<Self, DecodeError> {
        let directory;
        let metrics;
        {
            let bytes: &[u8] = &bytes;
            let header = Position::<VlwHeader>::initial();
            let glyph_count = header.glyph_count().read_from(bytes)?;
            let ascent = header.ascent().read_from(bytes)?;
            let descent = header.descent().read_from(bytes)?;
            let space_width = ascent.wrapping_add(descent).wrapping_mul(SPACE_WIDTH_FACTOR);
            directory = Slice::new(header.followed_by(), glyph_count);

            let mut line_height = 0;
            for record in directory {
                if is_drawable(record.codepoint().read_from(bytes)?) {
                    line_height = line_height.max(record.height().read_from(bytes)?);
                }
            }

            metrics = VlwMetrics {
                glyph_count,
                line_advance: header.line_advance().read_from(bytes)?,
                ascent,
                descent,
                space_width: u32::try_from(space_width).unwrap_or(0),
                line_height,
            };
            log::debug!("VLW font: {} glyphs, line height {}", glyph_count, line_height);
        }

        Ok(VlwFont {
            bytes,
            directory,
            metrics,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn metrics(&self) -> &VlwMetrics {
        &self.metrics
    }

    pub fn line_height(&self) -> u32 {
        self.metrics.line_height
    }

    pub fn space_width(&self) -> u32 {
        self.metrics.space_width
    }

    /// Codepoints of the glyph directory, in directory order.
    pub fn codepoints(&self) -> Result<Vec<u32>, DecodeError> {
        self.directory
            .into_iter()
            .map(|record| record.codepoint().read_from(&self.bytes))
            .collect()
    }

    /// Rasterize one glyph.
    ///
    /// `color` is a packed `0xAARRGGBB` value.
    /// Each pixel keeps the color’s RGB bits, with the color’s alpha scaled by the glyph’s coverage.
    /// Pixels with zero coverage are zero.
    ///
    /// Codepoints that are not drawable or not in the font produce a blank glyph
    /// `space_width` wide and `line_height` tall.
    ///
    /// This scans the glyph directory. See `index` for repeated lookups.
    pub fn make_glyph(&self, codepoint: u32, color: u32) -> Result<Glyph, DecodeError> {
        if !is_drawable(codepoint) {
            return Ok(self.blank_glyph());
        }
        match self.find(codepoint)? {
            Some((record, bitmap_offset)) => self.render(record, bitmap_offset, color),
            None => {
                log::debug!("VLW codepoint {:#x} is missing, rendering as a space", codepoint);
                Ok(self.blank_glyph())
            }
        }
    }

    /// Build a lookup table for this font.
    pub fn index(&self) -> Result<GlyphIndex<'_>, DecodeError> {
        GlyphIndex::new(self)
    }

    /// Rasterize every drawable glyph of the font, in parallel.
    pub fn make_glyphs(&self, color: u32) -> Result<Vec<(u32, Glyph)>, DecodeError> {
        let index = self.index()?;
        let codepoints = self.codepoints()?;
        codepoints
            .into_par_iter()
            .filter(|&codepoint| is_drawable(codepoint))
            .map(|codepoint| Ok((codepoint, index.make_glyph(codepoint, color)?)))
            .collect()
    }

    fn blank_glyph(&self) -> Glyph {
        let width = self.metrics.space_width;
        Glyph::blank(size(width, self.metrics.line_height), width)
    }

    /// Bitmaps are not referenced from the directory:
    /// each one starts where the previous one ends.
    fn find(&self, codepoint: u32) -> Result<Option<(Position<GlyphRecord>, u64)>, DecodeError> {
        let bytes: &[u8] = &self.bytes;
        let mut bitmap_offset = self.bitmaps_start();
        for record in self.directory {
            if record.codepoint().read_from(bytes)? == codepoint {
                return Ok(Some((record, bitmap_offset)));
            }
            bitmap_offset = bitmap_offset.saturating_add(bitmap_len(bytes, record)?);
        }
        Ok(None)
    }

    fn bitmaps_start(&self) -> u64 {
        u64::from(self.directory.followed_by::<u8>().byte_position())
    }

    fn render(&self, record: Position<GlyphRecord>, bitmap_offset: u64, color: u32) -> Result<Glyph, DecodeError> {
        let bytes: &[u8] = &self.bytes;
        let height = record.height().read_from(bytes)?;
        let width = record.width().read_from(bytes)?;
        let advance = record.advance().read_from(bytes)?;
        let top_extent = record.top_extent().read_from(bytes)?;
        let left_extent = record.left_extent().read_from(bytes)?;
        let y_offset = i64::from(self.metrics.line_advance) - i64::from(top_extent);
        let offset = vector(
            left_extent,
            i32::try_from(y_offset).map_err(|_| DecodeError::MalformedHeader)?,
        );

        let bitmap = Slice::new(
            Position::<u8>::at(u32::try_from(bitmap_offset).map_err(|_| DecodeError::BufferTruncated)?),
            u32::try_from(bitmap_len(bytes, record)?).map_err(|_| DecodeError::BufferTruncated)?,
        );
        let alphas = bitmap.read_from(bytes)?;
        log::trace!("VLW glyph {}x{} at {:#x}", width, height, bitmap_offset);

        let alpha_factor = f64::from(color >> 24) / 255.0;
        let rgb = color & 0x00FF_FFFF;
        let packed = alphas.iter().map(|&alpha| {
            if alpha == 0 {
                0
            } else {
                let alpha = (f64::from(alpha) * alpha_factor).floor() as u32;
                rgb | (alpha << 24)
            }
        });
        Ok(Glyph::from_packed_pixels(size(width, height), advance, offset, packed))
    }
}

fn bitmap_len(bytes: &[u8], record: Position<GlyphRecord>) -> Result<u64, DecodeError> {
    let width = record.width().read_from(bytes)?;
    let height = record.height().read_from(bytes)?;
    Ok(u64::from(width) * u64::from(height))
}

impl fmt::Debug for VlwFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let VlwFont {
            bytes: _,
            ref directory,
            ref metrics,
        } = *self;
        f.debug_struct("VlwFont")
            .field("bytes", &DebugAsDisplay("[…]"))
            .field("directory", directory)
            .field("metrics", metrics)
            .finish()
    }
}
