// The structs’ fields are not actually used, they are only input to #[derive(BinaryTable)]
#![allow(dead_code)]

use crate::types::*;

/// The start of an MZ executable
#[derive(BinaryTable)]
pub(crate) struct DosHeader {
    magic: u16_le,
    _unused: [u8; 58],
    new_header_offset: u32_le,
}

/// The start of the NE (“New Executable”) header, up to the fields we use
#[derive(BinaryTable)]
pub(crate) struct NeHeader {
    signature: u16_le,
    _linker_version: [u8; 2],
    _entry_table: [u8; 4],
    _crc: u32_le,
    _flags: u16_le,
    _segments: [u8; 22],
    resource_table_offset: u16_le,
}

#[derive(BinaryTable)]
pub(crate) struct ResourceTableHeader {
    alignment_shift: u16_le,
}

/// Header of a group of resources of the same type.
/// A `type_id` of zero ends the resource table.
#[derive(BinaryTable)]
pub(crate) struct ResourceTypeInfo {
    type_id: u16_le,
    count: u16_le,
    _reserved: u32_le,
}

#[derive(BinaryTable)]
pub(crate) struct ResourceNameInfo {
    /// In units of `1 << alignment_shift` bytes
    shifted_offset: u16_le,
    _length: u16_le,
    _flags: u16_le,
    _id: u16_le,
    _reserved: u32_le,
}

/// The FNT header shared by versions 2.0 and 3.0
#[derive(BinaryTable)]
pub(crate) struct FontHeader {
    version: u16_le,
    _size: u32_le,
    _copyright: [u8; 60],
    font_type: u16_le,
    points: u16_le,
    _vertical_resolution: u16_le,
    _horizontal_resolution: u16_le,
    ascent: u16_le,
    _internal_leading: u16_le,
    _external_leading: u16_le,
    _italic: u8,
    _underline: u8,
    _strike_out: u8,
    weight: u16_le,
    _char_set: u8,
    pixel_width: u16_le,
    pixel_height: u16_le,
    _pitch_and_family: u8,
    _average_width: u16_le,
    _maximum_width: u16_le,
    first_char: u8,
    last_char: u8,
    default_char: u8,
    break_char: u8,
    _width_bytes: u16_le,
    _device: u32_le,
    face: u32_le,
    _bits_pointer: u32_le,
    _bits_offset: u32_le,
    _reserved: u8,
}

/// Fields that version 3.0 adds after `FontHeader`
#[derive(BinaryTable)]
pub(crate) struct FontHeaderV3Extension {
    _flags: u32_le,
    _a_space: u16_le,
    _b_space: u16_le,
    _c_space: u16_le,
    _color_pointer: u32_le,
    _reserved: [u8; 16],
}

/// Character table entry in version 2.0 fonts
#[derive(BinaryTable)]
pub(crate) struct CharEntryV2 {
    width: u16_le,
    bitmap_offset: u16_le,
}

/// Character table entry in version 3.0 fonts
#[derive(BinaryTable)]
pub(crate) struct CharEntryV3 {
    width: u16_le,
    bitmap_offset: u32_le,
}
