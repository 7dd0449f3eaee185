use std::fmt;

/// Origin at top-left corner, unit `1px`
pub struct Px;

pub use euclid::point2 as point;
pub use euclid::size2 as size;
pub use euclid::vec2 as vector;
pub type Point<T> = euclid::Point2D<T, Px>;
pub type Size<T> = euclid::Size2D<T, Px>;
pub type Vector<T> = euclid::Vector2D<T, Px>;

/// A color with normalized red, green, blue and alpha components.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RGBA(pub f32, pub f32, pub f32, pub f32);

/// A rasterized glyph.
///
/// `pixels` is row-major, four bytes per pixel.
/// Each pixel is the caller’s packed 32-bit color (or zero) stored in big-endian byte order,
/// so `0xRRGGBBAA` colors produce RGBA8 bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Glyph {
    pub size: Size<u32>,
    /// Horizontal distance to the next glyph’s origin.
    pub advance: u32,
    /// Where to draw the top-left pixel, relative to the pen position.
    pub offset: Vector<i32>,
    pub pixels: Vec<u8>,
}

impl Glyph {
    /// A glyph with no visible pixels.
    pub(crate) fn blank(size: Size<u32>, advance: u32) -> Self {
        let len = size.width as usize * size.height as usize * 4;
        Glyph {
            size,
            advance,
            offset: Vector::zero(),
            pixels: vec![0; len],
        }
    }

    pub(crate) fn from_packed_pixels<I>(size: Size<u32>, advance: u32, offset: Vector<i32>, packed: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let mut pixels = Vec::with_capacity(size.width as usize * size.height as usize * 4);
        for pixel in packed {
            pixels.extend_from_slice(&pixel.to_be_bytes());
        }
        Glyph {
            size,
            advance,
            offset,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// The packed color at `(x, y)`, or `None` outside of the glyph.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let index = (y as usize * self.size.width as usize + x as usize) * 4;
        let bytes = self.pixels.get(index..index + 4)?;
        Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// All packed colors in row-major order.
    pub fn packed_pixels(&self) -> impl Iterator<Item = u32> + '_ {
        self.pixels
            .chunks_exact(4)
            .map(|bytes| u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&byte| byte == 0)
    }
}

/// Prints its string as is, for `Debug` impls that elide a field.
pub(crate) struct DebugAsDisplay(pub(crate) &'static str);

impl fmt::Debug for DebugAsDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Debug for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Glyph {
            ref size,
            advance,
            ref offset,
            pixels: _,
        } = *self;
        f.debug_struct("Glyph")
            .field("size", size)
            .field("advance", &advance)
            .field("offset", offset)
            .field("pixels", &DebugAsDisplay("[…]"))
            .finish()
    }
}
