use thiserror::Error;

/// An error returned when decoding a font or a TinyVG image.
///
/// Every error is terminal for the call that returned it:
/// a malformed buffer does not become valid on a second attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Bad magic number, signature, or header field.
    #[error("malformed header")]
    MalformedHeader,

    #[error("unsupported format version {0:#x}")]
    UnsupportedVersion(u16),

    /// The FON resource holds a vector font rather than a bitmap font.
    #[error("vector fonts are not supported")]
    UnsupportedFontKind,

    /// The TinyVG file uses the custom color encoding.
    #[error("custom color encodings are not supported")]
    UnsupportedColorEncoding,

    /// The NE container holds fewer bitmap fonts than the requested font set index.
    #[error("font index out of range")]
    FontIndexOutOfRange,

    #[error("character {0:#x} is outside of the font’s range")]
    CharacterOutOfRange(u32),

    /// The font handle was not created by `load`.
    #[error("font is not initialized")]
    NotInitialized,

    #[error("the color table is empty")]
    EmptyColorTable,

    /// An offset or length points past the end of the buffer.
    #[error("offset beyond the end of the buffer")]
    BufferTruncated,

    /// A TinyVG style kind other than flat, linear or radial.
    #[error("invalid style kind {0}")]
    InvalidStyle(u8),

    /// A TinyVG command that cannot be skipped over without interpreting paths.
    #[error("unsupported command {0}")]
    UnsupportedCommand(u8),
}
