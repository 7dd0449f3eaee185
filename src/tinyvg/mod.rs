//! TinyVG: header, color table, and draw command headers.
//!
//! Path segments are not interpreted.
//!
//! <https://tinyvg.tech/download/specification.pdf>

mod color;
mod commands;

pub use self::color::ColorEncoding;
pub use self::commands::{CommandHeader, CommandKind, Commands, Gradient, Style};

use crate::errors::DecodeError;
use crate::parsing::{ByteCursor, Position};
use crate::primitives::{size, Size, RGBA};
use crate::types::*;
use smallvec::SmallVec;

const MAGIC: [u8; 2] = [0x72, 0x56];
const VERSION: u8 = 1;

/// The width of every coordinate and dimension in a file
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordinateRange {
    /// 16 bits
    Default,
    /// 8 bits
    Reduced,
    /// 32 bits
    Extended,
}

impl CoordinateRange {
    /// Bits 6 and 7 of the header flags
    fn from_flags(flags: u8) -> Option<Self> {
        match flags >> 6 {
            0 => Some(CoordinateRange::Default),
            1 => Some(CoordinateRange::Reduced),
            2 => Some(CoordinateRange::Extended),
            _ => None,
        }
    }

    pub fn byte_width(self) -> u32 {
        match self {
            CoordinateRange::Default => 2,
            CoordinateRange::Reduced => 1,
            CoordinateRange::Extended => 4,
        }
    }

    pub fn max_value(self) -> u32 {
        match self {
            CoordinateRange::Default => 0xFFFF,
            CoordinateRange::Reduced => 0xFF,
            CoordinateRange::Extended => 0xFFFF_FFFF,
        }
    }

    fn read_unsigned(self, cursor: &mut ByteCursor<'_>) -> Result<u32, DecodeError> {
        match self {
            CoordinateRange::Default => cursor.read::<u16_le>().map(u32::from),
            CoordinateRange::Reduced => cursor.read::<u8>().map(u32::from),
            CoordinateRange::Extended => cursor.read::<u32_le>(),
        }
    }

    fn read_signed(self, cursor: &mut ByteCursor<'_>) -> Result<i32, DecodeError> {
        match self {
            CoordinateRange::Default => cursor.read::<i16_le>().map(i32::from),
            CoordinateRange::Reduced => cursor.read::<i8>().map(i32::from),
            CoordinateRange::Extended => cursor.read::<i32_le>(),
        }
    }

    /// A zero width or height stands for the largest representable value.
    fn read_dimension(self, cursor: &mut ByteCursor<'_>) -> Result<u32, DecodeError> {
        match self.read_unsigned(cursor)? {
            0 => Ok(self.max_value()),
            value => Ok(value),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Header {
    /// Coordinates are divided by `1 << scale`
    pub scale: u8,
    pub color_encoding: ColorEncoding,
    pub coordinate_range: CoordinateRange,
    pub size: Size<u32>,
}

impl Header {
    fn parse(cursor: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        if [cursor.read::<u8>()?, cursor.read::<u8>()?] != MAGIC {
            return Err(DecodeError::MalformedHeader);
        }
        let version = cursor.read::<u8>()?;
        if version != VERSION {
            return Err(DecodeError::UnsupportedVersion(u16::from(version)));
        }
        let flags = cursor.read::<u8>()?;
        let coordinate_range = CoordinateRange::from_flags(flags).ok_or(DecodeError::MalformedHeader)?;
        let width = coordinate_range.read_dimension(cursor)?;
        let height = coordinate_range.read_dimension(cursor)?;
        Ok(Header {
            scale: flags & 0x0F,
            color_encoding: ColorEncoding::from_flags(flags),
            coordinate_range,
            size: size(width, height),
        })
    }

    /// Read a signed coordinate and apply the scale.
    pub(crate) fn read_unit(&self, cursor: &mut ByteCursor<'_>) -> Result<f32, DecodeError> {
        let value = self.coordinate_range.read_signed(cursor)?;
        Ok(value as f32 / (1_u32 << self.scale) as f32)
    }
}

/// Width and height of a TinyVG image,
/// or `None` if the buffer does not start with a version 1 TinyVG header.
///
/// This only looks at the first few bytes and is meant to sniff the format.
pub fn read_dimensions(bytes: &[u8]) -> Option<Size<u32>> {
    if bytes.len() < 5 || bytes[..2] != MAGIC || bytes[2] != VERSION {
        return None;
    }
    let coordinate_range = CoordinateRange::from_flags(bytes[3])?;
    let mut cursor = ByteCursor::at(bytes, Position::<()>::at(4));
    let width = coordinate_range.read_dimension(&mut cursor).ok()?;
    let height = coordinate_range.read_dimension(&mut cursor).ok()?;
    Some(size(width, height))
}

/// A TinyVG image decoded up to its color table.
#[derive(Debug, Clone)]
pub struct TinyVg<'a> {
    bytes: &'a [u8],
    pub header: Header,
    pub colors: SmallVec<[RGBA; 16]>,
    commands_start: Position<()>,
}

impl<'a> TinyVg<'a> {
    pub fn decode(bytes: &'a [u8]) -> Result<Self, DecodeError> {
        let mut cursor = ByteCursor::new(bytes);
        let header = Header::parse(&mut cursor)?;
        let colors = color::parse_color_table(&mut cursor, header.color_encoding)?;
        log::debug!(
            "TinyVG {}x{}, {:?} range, scale {}, {} colors",
            header.size.width,
            header.size.height,
            header.coordinate_range,
            header.scale,
            colors.len(),
        );
        Ok(TinyVg {
            bytes,
            header,
            colors,
            commands_start: cursor.position(),
        })
    }

    pub fn size(&self) -> Size<u32> {
        self.header.size
    }

    /// The headers of the draw commands that follow the color table.
    pub fn commands(&self) -> Commands<'a> {
        Commands::new(ByteCursor::at(self.bytes, self.commands_start), self.header)
    }
}
