use crate::errors::DecodeError;
use crate::parsing::ByteCursor;
use crate::primitives::RGBA;
use crate::types::*;
use smallvec::SmallVec;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorEncoding {
    /// Four bytes: red, green, blue, alpha
    Rgba8888,
    /// A little-endian u16 with 5, 6 and 5 bits of red, green and blue
    Rgb565,
    /// Four little-endian f32: red, green, blue, alpha
    RgbaF32,
    /// Application-defined, not decodable here
    Custom,
}

impl ColorEncoding {
    /// Bits 4 and 5 of the header flags
    pub(super) fn from_flags(flags: u8) -> Self {
        match (flags >> 4) & 0b11 {
            0 => ColorEncoding::Rgba8888,
            1 => ColorEncoding::Rgb565,
            2 => ColorEncoding::RgbaF32,
            _ => ColorEncoding::Custom,
        }
    }
}

type ReadColor = fn(&mut ByteCursor<'_>) -> Result<RGBA, DecodeError>;

pub(super) fn parse_color_table(
    cursor: &mut ByteCursor<'_>,
    encoding: ColorEncoding,
) -> Result<SmallVec<[RGBA; 16]>, DecodeError> {
    let count = cursor.read_var_uint()?;
    if count == 0 {
        return Err(DecodeError::EmptyColorTable);
    }
    let read_color: ReadColor = match encoding {
        ColorEncoding::Rgba8888 => read_rgba8888,
        ColorEncoding::Rgb565 => read_rgb565,
        ColorEncoding::RgbaF32 => read_rgba_f32,
        ColorEncoding::Custom => return Err(DecodeError::UnsupportedColorEncoding),
    };
    // `count` is untrusted, no preallocation.
    let mut colors = SmallVec::new();
    for _ in 0..count {
        colors.push(read_color(cursor)?);
    }
    Ok(colors)
}

fn read_rgba8888(cursor: &mut ByteCursor<'_>) -> Result<RGBA, DecodeError> {
    let mut channel = || cursor.read::<u8>().map(|byte| f32::from(byte) / 255.);
    Ok(RGBA(channel()?, channel()?, channel()?, channel()?))
}

// FIXME: divides by 15 and 31 rather than 31 and 63,
// so channels past half intensity come out above 1.
fn read_rgb565(cursor: &mut ByteCursor<'_>) -> Result<RGBA, DecodeError> {
    let packed = cursor.read::<u16_le>()?;
    let red = f32::from(packed & 0x1F) / 15.;
    let green = f32::from((packed >> 5) & 0x3F) / 31.;
    let blue = f32::from((packed >> 11) & 0x1F) / 15.;
    Ok(RGBA(red, green, blue, 1.))
}

fn read_rgba_f32(cursor: &mut ByteCursor<'_>) -> Result<RGBA, DecodeError> {
    Ok(RGBA(
        cursor.read::<f32_le>()?,
        cursor.read::<f32_le>()?,
        cursor.read::<f32_le>()?,
        cursor.read::<f32_le>()?,
    ))
}
