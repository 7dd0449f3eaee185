//! Oldtype reads old type.
//!
//! * [`fon`]: Windows 3.1 bitmap fonts, rasterized to colored glyphs
//! * [`vlw`]: Processing fonts, rasterized to colored glyphs
//! * [`tinyvg`]: TinyVG images, decoded up to their color table and draw command headers
//!
//! Every decoder works on a byte buffer provided by the caller and does no I/O.

#[macro_use]
extern crate oldtype_internal_proc_macros;

pub mod fon;
pub mod primitives;
pub mod tinyvg;
pub mod vlw;

mod errors;
mod parsing;
mod types;

pub use crate::errors::DecodeError;
pub use crate::fon::FonFont;
pub use crate::primitives::{Glyph, RGBA};
pub use crate::tinyvg::TinyVg;
pub use crate::vlw::VlwFont;
