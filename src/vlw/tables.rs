// The structs’ fields are not actually used, they are only input to #[derive(BinaryTable)]
#![allow(dead_code)]

use crate::types::*;

#[derive(BinaryTable)]
pub(crate) struct VlwHeader {
    glyph_count: u32_be,
    _version: u32_be,
    line_advance: u32_be,
    _m_box_y: u32_be,
    ascent: i32_be,
    descent: i32_be,
}

/// One entry of the glyph directory that follows the header.
/// Alpha bitmaps follow the whole directory, in the same order, without recorded offsets.
#[derive(BinaryTable)]
pub(crate) struct GlyphRecord {
    codepoint: u32_be,
    height: u32_be,
    width: u32_be,
    advance: u32_be,
    top_extent: i32_be,
    left_extent: i32_be,
    _padding: u32_be,
}
