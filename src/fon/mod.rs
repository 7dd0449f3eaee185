//! Windows 3.1 bitmap fonts: `.FNT` resources, bare or inside an NE (`.FON`) executable.
//!
//! <https://learn.microsoft.com/en-us/windows/win32/menurc/font-file-format>

mod resources;
mod tables;

use self::resources::{FontResources, ResourceGroups};
use self::tables::*;
use crate::errors::DecodeError;
use crate::parsing::{Position, Slice};
use crate::primitives::{size, DebugAsDisplay, Glyph, Vector};
use rayon::prelude::*;
use std::borrow::Cow;
use std::fmt;

const MZ: u16 = u16::from_le_bytes(*b"MZ");
const NE: u16 = u16::from_le_bytes(*b"NE");

const VERSION_2: u16 = 0x200;
const VERSION_3: u16 = 0x300;

/// Bit 0 of `dfType`
const VECTOR_FONT: u16 = 1;

/// A bitmap font loaded from a `.FON` or `.FNT` file.
///
/// The font is immutable once loaded: every `make_glyph` call reads from the buffer
/// at offsets computed locally, so a font can be shared across threads.
#[derive(Clone, PartialEq, Default)]
pub struct FonFont {
    bytes: Cow<'static, [u8]>,
    font_offset: u32,
    char_table: Option<CharTable>,
    metrics: FonMetrics,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct FonMetrics {
    /// Height of every glyph bitmap, in pixels
    pub line_height: u16,
    /// Width of every glyph for fixed-pitch fonts, zero for proportional fonts
    pub pixel_width: u16,
    /// Distance from the top of the glyph bitmaps to the baseline
    pub ascent: u16,
    pub points: u16,
    pub weight: u16,
    pub first_char: u8,
    pub last_char: u8,
    /// Substitute for characters outside of the font, relative to `first_char`
    pub default_char: u8,
    /// Word break character, relative to `first_char`
    pub break_char: u8,
}

/// The layout of character table entries depends on the format version.
#[derive(Debug, Copy, Clone, PartialEq)]
enum CharTable {
    V2(Slice<CharEntryV2>),
    V3(Slice<CharEntryV3>),
}

impl FonFont {
    /// Load the first font of a `.FON` file, or a bare `.FNT` resource.
    pub fn parse<B: Into<Cow<'static, [u8]>>>(bytes: B) -> Result<Self, DecodeError> {
        Self::load(bytes, 0)
    }

    /// Load the `font_set_index`-th font of a `.FON` file (counting from zero),
    /// or a bare `.FNT` resource if the buffer is not an MZ executable.
    pub fn load<B: Into<Cow<'static, [u8]>>>(bytes: B, font_set_index: usize) -> Result<Self, DecodeError> {
        Self::load_cow(bytes.into(), font_set_index)
    }

    fn load_cow(bytes: Cow<'static, [u8]>, font_set_index: usize) -> Result<Self, DecodeError> {
        let font_offset;
        let char_table;
        let metrics;
        {
            let bytes: &[u8] = &bytes;
            font_offset = match resource_table(bytes)? {
                Some(table) => {
                    let shift = table.alignment_shift().read_from(bytes)?;
                    let entry = font_resources(bytes, table)
                        .nth(font_set_index)
                        .ok_or(DecodeError::FontIndexOutOfRange)??;
                    resource_offset(entry.shifted_offset().read_from(bytes)?, shift)?
                }
                None => 0,
            };

            let header = Position::<FontHeader>::at(font_offset);
            let version = header.version().read_from(bytes)?;
            let table_start = match version {
                VERSION_2 => header.followed_by(),
                VERSION_3 => header.followed_by::<FontHeaderV3Extension>().followed_by(),
                _ => return Err(DecodeError::UnsupportedVersion(version)),
            };

            if header.font_type().read_from(bytes)? & VECTOR_FONT != 0 {
                return Err(DecodeError::UnsupportedFontKind);
            }

            metrics = FonMetrics {
                line_height: header.pixel_height().read_from(bytes)?,
                pixel_width: header.pixel_width().read_from(bytes)?,
                ascent: header.ascent().read_from(bytes)?,
                points: header.points().read_from(bytes)?,
                weight: header.weight().read_from(bytes)?,
                first_char: header.first_char().read_from(bytes)?,
                last_char: header.last_char().read_from(bytes)?,
                default_char: header.default_char().read_from(bytes)?,
                break_char: header.break_char().read_from(bytes)?,
            };

            let char_count = (u32::from(metrics.last_char) + 1).saturating_sub(u32::from(metrics.first_char));
            char_table = match version {
                VERSION_2 => CharTable::V2(Slice::new(table_start, char_count)),
                _ => CharTable::V3(Slice::new(table_start.cast(), char_count)),
            };
            log::debug!(
                "FON font #{} at {:#x}: version {:#x}, {} px, chars {:#x}..={:#x}",
                font_set_index,
                font_offset,
                version,
                metrics.line_height,
                metrics.first_char,
                metrics.last_char,
            );
        }

        Ok(FonFont {
            bytes,
            font_offset,
            char_table: Some(char_table),
            metrics,
        })
    }

    /// How many bitmap fonts a `.FON` file contains: 1 for a bare `.FNT` resource.
    pub fn font_count(bytes: &[u8]) -> Result<usize, DecodeError> {
        match resource_table(bytes)? {
            Some(table) => font_resources(bytes, table).try_fold(0, |count, entry| entry.map(|_| count + 1)),
            None => Ok(1),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn metrics(&self) -> &FonMetrics {
        &self.metrics
    }

    pub fn line_height(&self) -> u16 {
        self.metrics.line_height
    }

    /// Byte offset of the font resource within the buffer
    pub fn font_offset(&self) -> u32 {
        self.font_offset
    }

    /// Byte offset of the character table, relative to the font resource
    pub fn char_table_offset(&self) -> Option<u32> {
        let start = match self.char_table? {
            CharTable::V2(entries) => entries.start().byte_position(),
            CharTable::V3(entries) => entries.start().byte_position(),
        };
        Some(start - self.font_offset)
    }

    /// Size in bytes of each character table entry: 4 in version 2.0 fonts, 6 in version 3.0
    pub fn char_table_stride(&self) -> Option<u32> {
        match self.char_table? {
            CharTable::V2(_) => Some(4),
            CharTable::V3(_) => Some(6),
        }
    }

    pub fn char_range(&self) -> std::ops::RangeInclusive<u32> {
        u32::from(self.metrics.first_char)..=u32::from(self.metrics.last_char)
    }

    pub fn contains(&self, char_code: u32) -> bool {
        self.char_range().contains(&char_code)
    }

    /// Read the font’s face name from the buffer.
    pub fn face_name(&self) -> Result<String, DecodeError> {
        if self.char_table.is_none() {
            return Err(DecodeError::NotInitialized);
        }
        let bytes: &[u8] = &self.bytes;
        let header = Position::<FontHeader>::at(self.font_offset);
        let start = header.offset_bytes::<u8>(header.face().read_from(bytes)?);
        let tail = bytes
            .get(start.byte_position() as usize..)
            .ok_or(DecodeError::BufferTruncated)?;
        let name = tail
            .split(|&byte| byte == 0)
            .next()
            .filter(|name| name.len() < tail.len())
            .ok_or(DecodeError::BufferTruncated)?;
        // Windows-1252 and Latin-1 agree on letters used in face names
        Ok(name.iter().map(|&byte| char::from(byte)).collect())
    }

    /// Rasterize one character.
    ///
    /// `color` is a packed `0xRRGGBBAA` value, stored as is for set bits of the glyph bitmap.
    /// Clear bits are fully transparent.
    pub fn make_glyph(&self, char_code: u32, color: u32) -> Result<Glyph, DecodeError> {
        let char_table = self.char_table.ok_or(DecodeError::NotInitialized)?;
        if !self.contains(char_code) {
            return Err(DecodeError::CharacterOutOfRange(char_code));
        }
        let bytes: &[u8] = &self.bytes;
        let index = char_code - u32::from(self.metrics.first_char);
        let (width, bitmap_offset) = match char_table {
            CharTable::V2(entries) => {
                let entry = entries.get_unchecked(index);
                (
                    entry.width().read_from(bytes)?,
                    u32::from(entry.bitmap_offset().read_from(bytes)?),
                )
            }
            CharTable::V3(entries) => {
                let entry = entries.get_unchecked(index);
                (entry.width().read_from(bytes)?, entry.bitmap_offset().read_from(bytes)?)
            }
        };
        log::trace!("FON glyph {:#x}: {} px wide, bitmap at {:#x}", char_code, width, bitmap_offset);
        let bitmap = Position::<u8>::at(self.font_offset).offset_bytes(bitmap_offset);
        rasterize_bitplane(bytes, bitmap, width, self.metrics.line_height, color)
    }

    /// Like `make_glyph`, but characters outside of the font use its default character.
    pub fn make_glyph_or_default(&self, char_code: u32, color: u32) -> Result<Glyph, DecodeError> {
        if self.char_table.is_some() && !self.contains(char_code) {
            let default = u32::from(self.metrics.first_char) + u32::from(self.metrics.default_char);
            return self.make_glyph(default, color);
        }
        self.make_glyph(char_code, color)
    }

    /// Rasterize every character of the font, in parallel.
    pub fn make_glyphs(&self, color: u32) -> Result<Vec<(u32, Glyph)>, DecodeError> {
        if self.char_table.is_none() {
            return Err(DecodeError::NotInitialized);
        }
        self.char_range()
            .into_par_iter()
            .map(|char_code| Ok((char_code, self.make_glyph(char_code, color)?)))
            .collect()
    }
}

/// `None` if the buffer is not an MZ executable, and so presumably a bare FNT resource.
fn resource_table(bytes: &[u8]) -> Result<Option<Position<ResourceTableHeader>>, DecodeError> {
    let dos_header = Position::<DosHeader>::initial();
    if dos_header.magic().read_from(bytes)? != MZ {
        return Ok(None);
    }
    let ne_header = Position::<NeHeader>::at(dos_header.new_header_offset().read_from(bytes)?);
    if ne_header.signature().read_from(bytes)? != NE {
        // Possibly a PE (32-bit) executable
        return Err(DecodeError::MalformedHeader);
    }
    let table_offset = ne_header.resource_table_offset().read_from(bytes)?;
    Ok(Some(ne_header.offset_bytes(u32::from(table_offset))))
}

/// Resource offsets are stored in units of `1 << alignment_shift` bytes.
fn resource_offset(shifted_offset: u16, alignment_shift: u16) -> Result<u32, DecodeError> {
    if alignment_shift >= 32 {
        return Err(DecodeError::MalformedHeader);
    }
    u32::try_from(u64::from(shifted_offset) << alignment_shift).map_err(|_| DecodeError::MalformedHeader)
}

fn font_resources(bytes: &[u8], table: Position<ResourceTableHeader>) -> FontResources<'_> {
    FontResources::new(ResourceGroups::new(bytes, table.followed_by()))
}

/// Glyph bitmaps are stored one byte-wide column at a time:
/// byte `i` of scanline `j` is at `bitmap + i * line_height + j`.
/// Within a scanline the leftmost pixel is the most significant bit,
/// and bits past `width` in the last byte are padding.
fn rasterize_bitplane(
    bytes: &[u8],
    bitmap: Position<u8>,
    width: u16,
    line_height: u16,
    color: u32,
) -> Result<Glyph, DecodeError> {
    let width = u32::from(width);
    let line_height = u32::from(line_height);
    let width_bytes = (width + 7) / 8;
    let len = width_bytes
        .checked_mul(line_height)
        .ok_or(DecodeError::BufferTruncated)?;
    // Nothing is allocated for the glyph before its whole bitmap is known to be in the buffer.
    let columns = Slice::new(bitmap, len).read_from(bytes)?;
    let packed = (0..line_height).flat_map(|y| {
        (0..width).map(move |x| {
            let byte = columns[(x / 8 * line_height + y) as usize];
            if byte & (0x80 >> (x % 8)) != 0 {
                color
            } else {
                0
            }
        })
    });
    Ok(Glyph::from_packed_pixels(
        size(width, line_height),
        width,
        Vector::zero(),
        packed,
    ))
}

impl fmt::Debug for FonFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let FonFont {
            bytes: _,
            font_offset,
            ref char_table,
            ref metrics,
        } = *self;
        f.debug_struct("FonFont")
            .field("bytes", &DebugAsDisplay("[…]"))
            .field("font_offset", &font_offset)
            .field("char_table", char_table)
            .field("metrics", metrics)
            .finish()
    }
}
