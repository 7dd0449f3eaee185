// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use oldtype::Glyph;
use std::env;

/// Compare a glyph’s packed pixels with an expected slice,
/// printing both as hexadecimal grids on failure.
macro_rules! assert_pixels_eq {
    ($glyph: expr, $expected: expr) => {{
        let glyph: &oldtype::Glyph = &$glyph;
        let actual: Vec<u32> = glyph.packed_pixels().collect();
        let expected: &[u32] = $expected;
        if actual != expected {
            panic!(
                "pixels differ\n  actual:\n{}\nexpected:\n{}",
                common::pixel_grid(&actual, glyph.width()),
                common::pixel_grid(expected, glyph.width()),
            )
        }
    }};
}

pub fn pixel_grid(pixels: &[u32], width: u32) -> String {
    pixels
        .chunks(width.max(1) as usize)
        .map(|row| {
            row.iter()
                .map(|pixel| format!("{:08X}", pixel))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// With `OLDTYPE_PRINT` set, print glyphs as ASCII art.
pub fn print_glyph(label: &str, glyph: &Glyph) {
    if env::var("OLDTYPE_PRINT").is_err() {
        return;
    }
    println!("{} ({}x{}, advance {})", label, glyph.width(), glyph.height(), glyph.advance);
    for y in 0..glyph.height() {
        let row: String = (0..glyph.width())
            .map(|x| match glyph.pixel(x, y) {
                Some(0) | None => '.',
                Some(_) => '#',
            })
            .collect();
        println!("{}", row);
    }
}

fn put_u16(bytes: &mut [u8], at: usize, value: u16) {
    bytes[at..at + 2].copy_from_slice(&value.to_le_bytes())
}

fn put_u32(bytes: &mut [u8], at: usize, value: u32) {
    bytes[at..at + 4].copy_from_slice(&value.to_le_bytes())
}

/// A bare FNT resource.
pub struct Fnt {
    pub version: u16,
    pub font_type: u16,
    pub line_height: u16,
    pub first_char: u8,
    pub default_char: u8,
    pub face: &'static str,
    /// Width and column-major bitmap of each character, starting at `first_char`
    pub glyphs: Vec<(u16, Vec<u8>)>,
}

impl Fnt {
    pub fn new(line_height: u16, first_char: u8) -> Self {
        Fnt {
            version: 0x200,
            font_type: 0,
            line_height,
            first_char,
            default_char: 0,
            face: "System",
            glyphs: Vec::new(),
        }
    }

    pub fn glyph(mut self, width: u16, bitmap: &[u8]) -> Self {
        self.glyphs.push((width, bitmap.to_vec()));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        assert!(!self.glyphs.is_empty());
        let (header_len, stride) = if self.version == 0x300 { (0x94, 6) } else { (0x76, 4) };
        let face_offset = header_len + self.glyphs.len() * stride;
        let mut bitmap_offset = face_offset + self.face.len() + 1;

        let mut bytes = vec![0; header_len];
        put_u16(&mut bytes, 0x00, self.version);
        put_u16(&mut bytes, 0x42, self.font_type);
        put_u16(&mut bytes, 0x44, 10);
        put_u16(&mut bytes, 0x4A, self.line_height.saturating_sub(2));
        put_u16(&mut bytes, 0x53, 400);
        put_u16(&mut bytes, 0x58, self.line_height);
        bytes[0x5F] = self.first_char;
        bytes[0x60] = self.first_char + (self.glyphs.len() - 1) as u8;
        bytes[0x61] = self.default_char;
        put_u32(&mut bytes, 0x69, face_offset as u32);

        for (width, bitmap) in &self.glyphs {
            bytes.extend_from_slice(&width.to_le_bytes());
            if self.version == 0x300 {
                bytes.extend_from_slice(&(bitmap_offset as u32).to_le_bytes());
            } else {
                bytes.extend_from_slice(&(bitmap_offset as u16).to_le_bytes());
            }
            bitmap_offset += bitmap.len();
        }
        bytes.extend_from_slice(self.face.as_bytes());
        bytes.push(0);
        for (_, bitmap) in &self.glyphs {
            bytes.extend_from_slice(bitmap);
        }
        bytes
    }
}

const NE_HEADER: usize = 0x40;
const RESOURCE_TABLE: usize = 0x80;
const ALIGNMENT_SHIFT: u16 = 4;

/// An NE executable with a font directory resource followed by one font resource per FNT.
pub fn ne_container(fonts: &[Vec<u8>]) -> Vec<u8> {
    let align = 1 << ALIGNMENT_SHIFT;
    let table_len = 2 + (8 + 12) + (8 + 12 * fonts.len()) + 2;
    let mut offsets = Vec::new();
    let mut end = (RESOURCE_TABLE + table_len + align - 1) / align * align;
    for font in fonts {
        offsets.push(end);
        end = (end + font.len() + align - 1) / align * align;
    }

    let mut bytes = vec![0; RESOURCE_TABLE];
    bytes[..2].copy_from_slice(b"MZ");
    put_u32(&mut bytes, 0x3C, NE_HEADER as u32);
    bytes[NE_HEADER..NE_HEADER + 2].copy_from_slice(b"NE");
    put_u16(&mut bytes, NE_HEADER + 0x24, (RESOURCE_TABLE - NE_HEADER) as u16);

    let mut table = Vec::new();
    table.extend_from_slice(&ALIGNMENT_SHIFT.to_le_bytes());
    // RT_FONTDIR
    table.extend_from_slice(&[0x07, 0x80, 1, 0, 0, 0, 0, 0]);
    table.extend_from_slice(&[0; 12]);
    // RT_FONT
    table.extend_from_slice(&0x8008_u16.to_le_bytes());
    table.extend_from_slice(&(fonts.len() as u16).to_le_bytes());
    table.extend_from_slice(&[0; 4]);
    for (font, &offset) in fonts.iter().zip(&offsets) {
        table.extend_from_slice(&((offset >> ALIGNMENT_SHIFT) as u16).to_le_bytes());
        table.extend_from_slice(&((font.len() >> ALIGNMENT_SHIFT) as u16 + 1).to_le_bytes());
        table.extend_from_slice(&[0; 8]);
    }
    table.extend_from_slice(&[0, 0]);
    assert_eq!(table.len(), table_len);
    bytes.extend_from_slice(&table);

    for (font, &offset) in fonts.iter().zip(&offsets) {
        bytes.resize(offset, 0);
        bytes.extend_from_slice(font);
    }
    bytes
}

pub struct VlwGlyph {
    pub codepoint: u32,
    pub width: u32,
    pub height: u32,
    pub advance: u32,
    pub top_extent: i32,
    pub left_extent: i32,
    /// Row-major coverage, `width * height` bytes
    pub alphas: Vec<u8>,
}

pub fn vlw(line_advance: u32, ascent: i32, descent: i32, glyphs: &[VlwGlyph]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for value in [glyphs.len() as u32, 11, line_advance, 0] {
        bytes.extend_from_slice(&value.to_be_bytes());
    }
    bytes.extend_from_slice(&ascent.to_be_bytes());
    bytes.extend_from_slice(&descent.to_be_bytes());
    for glyph in glyphs {
        for value in [glyph.codepoint, glyph.height, glyph.width, glyph.advance] {
            bytes.extend_from_slice(&value.to_be_bytes());
        }
        bytes.extend_from_slice(&glyph.top_extent.to_be_bytes());
        bytes.extend_from_slice(&glyph.left_extent.to_be_bytes());
        bytes.extend_from_slice(&[0; 4]);
    }
    for glyph in glyphs {
        assert_eq!(glyph.alphas.len() as u32, glyph.width * glyph.height);
        bytes.extend_from_slice(&glyph.alphas);
    }
    bytes
}
