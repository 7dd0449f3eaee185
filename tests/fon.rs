#[macro_use]
mod common;

use common::{ne_container, print_glyph, Fnt};
use oldtype::fon::FonFont;
use oldtype::primitives::{size, Vector};
use oldtype::DecodeError;

const WHITE: u32 = 0xFFFF_FFFF;
const ____: u32 = 0x0000_0000;

fn letters() -> Fnt {
    // 'A' and 'B', 5 px wide, 3 lines
    Fnt::new(3, b'A')
        .glyph(5, &[0b0111_0000, 0b1000_1000, 0b1111_1000])
        .glyph(5, &[0b1111_0000, 0b1111_1000, 0b1111_0000])
}

#[test]
fn bits_are_read_most_significant_first() {
    let font = FonFont::parse(Fnt::new(1, 0x20).glyph(8, &[0b1011_0010]).build()).unwrap();
    let glyph = font.make_glyph(0x20, WHITE).unwrap();
    print_glyph("0x20", &glyph);
    assert_eq!(glyph.size, size(8, 1));
    assert_pixels_eq!(glyph, &[WHITE, ____, WHITE, WHITE, ____, ____, WHITE, ____]);
}

#[test]
fn padding_bits_are_discarded() {
    let font = FonFont::parse(letters().build()).unwrap();
    const RED_: u32 = 0xFF00_00FF;
    let glyph = font.make_glyph(u32::from(b'A'), RED_).unwrap();
    print_glyph("A", &glyph);
    assert_pixels_eq!(glyph, &[
        ____, RED_, RED_, RED_, ____,
        RED_, ____, ____, ____, RED_,
        RED_, RED_, RED_, RED_, RED_,
    ]);
}

#[test]
fn glyph_size_and_metrics() {
    let font = FonFont::parse(letters().build()).unwrap();
    for char_code in font.char_range() {
        let glyph = font.make_glyph(char_code, WHITE).unwrap();
        assert_eq!(glyph.pixels.len(), 5 * 3 * 4);
        assert_eq!(glyph.advance, glyph.width());
        assert_eq!(glyph.offset, Vector::zero());
    }
    assert_eq!(font.char_range(), 0x41..=0x42);
    assert_eq!(font.line_height(), 3);
    assert_eq!(font.metrics().weight, 400);
    assert_eq!(font.metrics().points, 10);
    assert_eq!(font.metrics().ascent, 1);
    assert_eq!(font.metrics().pixel_width, 0);
    assert_eq!(font.face_name().unwrap(), "System");
}

#[test]
fn characters_outside_of_the_font() {
    let font = FonFont::parse(letters().build()).unwrap();
    assert_eq!(font.make_glyph(0x40, WHITE), Err(DecodeError::CharacterOutOfRange(0x40)));
    assert_eq!(font.make_glyph(0x43, WHITE), Err(DecodeError::CharacterOutOfRange(0x43)));
    assert_eq!(
        font.make_glyph(0x1_0041, WHITE),
        Err(DecodeError::CharacterOutOfRange(0x1_0041))
    );
    assert!(!font.contains(0x43));

    let mut fnt = letters();
    fnt.default_char = 1;
    let font = FonFont::parse(fnt.build()).unwrap();
    assert_eq!(
        font.make_glyph_or_default(u32::from(b'?'), WHITE),
        font.make_glyph(u32::from(b'B'), WHITE)
    );
    assert_eq!(
        font.make_glyph_or_default(u32::from(b'A'), WHITE),
        font.make_glyph(u32::from(b'A'), WHITE)
    );
}

#[test]
fn colors_are_stored_big_endian() {
    let font = FonFont::parse(Fnt::new(1, 0).glyph(1, &[0x80]).build()).unwrap();
    let glyph = font.make_glyph(0, 0x1122_3344).unwrap();
    assert_eq!(glyph.pixels, [0x11, 0x22, 0x33, 0x44]);
}

#[test]
fn byte_columns() {
    // 10 px wide: two byte columns, each `line_height` bytes long
    let font = FonFont::parse(Fnt::new(2, b'W').glyph(10, &[0xFF, 0x81, 0xC0, 0x40]).build()).unwrap();
    let glyph = font.make_glyph(u32::from(b'W'), WHITE).unwrap();
    print_glyph("W", &glyph);
    assert_pixels_eq!(glyph, &[
        WHITE, WHITE, WHITE, WHITE, WHITE, WHITE, WHITE, WHITE, WHITE, WHITE,
        WHITE, ____, ____, ____, ____, ____, ____, WHITE, ____, WHITE,
    ]);
}

#[test]
fn version_3_char_table() {
    let mut fnt = letters();
    let font = FonFont::parse(fnt.build()).unwrap();
    assert_eq!(font.char_table_offset(), Some(0x76));
    assert_eq!(font.char_table_stride(), Some(4));

    fnt.version = 0x300;
    let font_3 = FonFont::parse(fnt.build()).unwrap();
    assert_eq!(font_3.char_table_offset(), Some(0x94));
    assert_eq!(font_3.char_table_stride(), Some(6));
    for char_code in font.char_range() {
        assert_eq!(font.make_glyph(char_code, WHITE), font_3.make_glyph(char_code, WHITE));
    }
}

#[test]
fn unsupported_fonts() {
    let mut fnt = letters();
    fnt.version = 0x100;
    assert_eq!(FonFont::parse(fnt.build()), Err(DecodeError::UnsupportedVersion(0x100)));

    let mut fnt = letters();
    fnt.font_type = 1;
    assert_eq!(FonFont::parse(fnt.build()), Err(DecodeError::UnsupportedFontKind));
}

#[test]
fn ne_container_font_sets() {
    let small = Fnt::new(1, b'a').glyph(3, &[0b1010_0000]).build();
    let large = letters().build();
    let fon = ne_container(&[small.clone(), large.clone()]);

    assert_eq!(FonFont::font_count(&fon), Ok(2));
    assert_eq!(FonFont::font_count(&large), Ok(1));

    let first = FonFont::load(fon.clone(), 0).unwrap();
    assert!(first.font_offset() > 0);
    assert_eq!(first.char_range(), 0x61..=0x61);
    assert_eq!(first.make_glyph(0x61, WHITE), FonFont::parse(small).unwrap().make_glyph(0x61, WHITE));

    let second = FonFont::load(fon.clone(), 1).unwrap();
    assert!(second.font_offset() > first.font_offset());
    assert_eq!(second.char_range(), 0x41..=0x42);
    assert_eq!(second.face_name().unwrap(), "System");
    assert_eq!(
        second.make_glyph(0x42, WHITE),
        FonFont::parse(large).unwrap().make_glyph(0x42, WHITE)
    );

    assert_eq!(FonFont::load(fon, 2), Err(DecodeError::FontIndexOutOfRange));
}

#[test]
fn malformed_ne_container() {
    let mut fon = ne_container(&[letters().build()]);
    fon[0x40..0x42].copy_from_slice(b"PE");
    assert_eq!(FonFont::parse(fon.clone()), Err(DecodeError::MalformedHeader));
    assert_eq!(FonFont::font_count(&fon), Err(DecodeError::MalformedHeader));

    // Resource table runs past the end of the buffer
    let fon = ne_container(&[letters().build()]);
    assert_eq!(FonFont::parse(fon[..0x90].to_vec()), Err(DecodeError::BufferTruncated));
}

#[test]
fn truncated_fonts() {
    let fnt = letters().build();
    assert_eq!(FonFont::parse(fnt[..0x50].to_vec()), Err(DecodeError::BufferTruncated));
    assert_eq!(FonFont::parse(Vec::new()), Err(DecodeError::BufferTruncated));

    // The header loads, but the last bitmap is cut short
    let font = FonFont::parse(fnt[..fnt.len() - 1].to_vec()).unwrap();
    assert!(font.make_glyph(u32::from(b'A'), WHITE).is_ok());
    assert_eq!(font.make_glyph(u32::from(b'B'), WHITE), Err(DecodeError::BufferTruncated));
}

#[test]
fn oversized_glyph_without_bitmap() {
    // 65535 x 65535 px claimed by a font with no bitmap data at all
    let font = FonFont::parse(Fnt::new(0xFFFF, b'A').glyph(0xFFFF, &[]).build()).unwrap();
    assert_eq!(font.make_glyph(0x41, WHITE), Err(DecodeError::BufferTruncated));
    assert_eq!(font.make_glyphs(WHITE), Err(DecodeError::BufferTruncated));
}

#[test]
fn resource_offset_overflow() {
    let mut fon = ne_container(&[letters().build()]);
    assert!(FonFont::parse(fon.clone()).is_ok());

    // The font resource offset is 0xB units: 0xB << 29 does not fit in 32 bits
    fon[0x80..0x82].copy_from_slice(&29_u16.to_le_bytes());
    assert_eq!(FonFont::parse(fon.clone()), Err(DecodeError::MalformedHeader));
    fon[0x80..0x82].copy_from_slice(&40_u16.to_le_bytes());
    assert_eq!(FonFont::parse(fon), Err(DecodeError::MalformedHeader));
}

#[test]
fn debug_elides_bytes() {
    let font = FonFont::parse(letters().build()).unwrap();
    let debug = format!("{:?}", font);
    assert!(debug.starts_with("FonFont { bytes: […], font_offset: 0,"), "{}", debug);
    let glyph = font.make_glyph(0x41, WHITE).unwrap();
    assert!(format!("{:?}", glyph).ends_with("pixels: […] }"));
}

#[test]
fn loading_is_idempotent() {
    let bytes = letters().build();
    let first = FonFont::parse(bytes.clone()).unwrap();
    let second = FonFont::parse(bytes).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.metrics(), second.metrics());
}

#[test]
fn uninitialized_font() {
    let font = FonFont::default();
    assert_eq!(font.make_glyph(0, WHITE), Err(DecodeError::NotInitialized));
    assert_eq!(font.make_glyph_or_default(0, WHITE), Err(DecodeError::NotInitialized));
    assert_eq!(font.make_glyphs(WHITE), Err(DecodeError::NotInitialized));
    assert_eq!(font.face_name(), Err(DecodeError::NotInitialized));
    assert_eq!(font.char_table_offset(), None);
}

#[test]
fn all_glyphs_in_parallel() {
    let font = FonFont::parse(letters().build()).unwrap();
    let glyphs = font.make_glyphs(WHITE).unwrap();
    let codes: Vec<u32> = glyphs.iter().map(|&(code, _)| code).collect();
    assert_eq!(codes, [0x41, 0x42]);
    for (char_code, glyph) in glyphs {
        assert_eq!(Ok(glyph), font.make_glyph(char_code, WHITE));
    }
}

#[test]
fn fonts_are_shared_across_threads() {
    let font = std::sync::Arc::new(FonFont::parse(letters().build()).unwrap());
    let expected = font.make_glyph(0x41, WHITE).unwrap();
    let threads: Vec<_> = (0..4)
        .map(|_| {
            let font = font.clone();
            std::thread::spawn(move || font.make_glyph(0x41, WHITE).unwrap())
        })
        .collect();
    for thread in threads {
        assert_eq!(thread.join().unwrap(), expected);
    }
}
