use super::Header;
use crate::errors::DecodeError;
use crate::parsing::ByteCursor;
use crate::primitives::{point, Point};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CommandKind {
    FillPolygon,
    FillRectangles,
    FillPath,
    DrawLines,
    DrawLineLoop,
    DrawLineStrip,
    DrawLinePath,
    OutlineFillPolygon,
    OutlineFillRectangles,
    OutlineFillPath,
}

impl CommandKind {
    /// The low 6 bits of a command byte. Zero ends the document.
    fn from_index(index: u8) -> Option<Self> {
        Some(match index {
            1 => CommandKind::FillPolygon,
            2 => CommandKind::FillRectangles,
            3 => CommandKind::FillPath,
            4 => CommandKind::DrawLines,
            5 => CommandKind::DrawLineLoop,
            6 => CommandKind::DrawLineStrip,
            7 => CommandKind::DrawLinePath,
            8 => CommandKind::OutlineFillPolygon,
            9 => CommandKind::OutlineFillRectangles,
            10 => CommandKind::OutlineFillPath,
            _ => return None,
        })
    }

    fn index(self) -> u8 {
        match self {
            CommandKind::FillPolygon => 1,
            CommandKind::FillRectangles => 2,
            CommandKind::FillPath => 3,
            CommandKind::DrawLines => 4,
            CommandKind::DrawLineLoop => 5,
            CommandKind::DrawLineStrip => 6,
            CommandKind::DrawLinePath => 7,
            CommandKind::OutlineFillPolygon => 8,
            CommandKind::OutlineFillRectangles => 9,
            CommandKind::OutlineFillPath => 10,
        }
    }

    /// How many units each of the `count` items after the header takes,
    /// or `None` for paths whose size depends on their segments.
    fn units_per_item(self) -> Option<u64> {
        match self {
            CommandKind::FillPolygon
            | CommandKind::DrawLineLoop
            | CommandKind::DrawLineStrip
            | CommandKind::OutlineFillPolygon => Some(2),
            CommandKind::FillRectangles | CommandKind::DrawLines | CommandKind::OutlineFillRectangles => Some(4),
            CommandKind::FillPath | CommandKind::DrawLinePath | CommandKind::OutlineFillPath => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Style {
    /// An index into the color table
    Flat(u32),
    Linear(Gradient),
    Radial(Gradient),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Gradient {
    pub start: Point<f32>,
    pub end: Point<f32>,
    pub start_color: u32,
    pub end_color: u32,
}

/// The header of a draw command, without its points or path segments.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CommandHeader {
    Fill {
        kind: CommandKind,
        count: u32,
        style: Style,
    },
    Line {
        kind: CommandKind,
        count: u32,
        style: Style,
        line_width: f32,
    },
    OutlineFill {
        kind: CommandKind,
        count: u32,
        fill_style: Style,
        line_style: Style,
        line_width: f32,
    },
}

impl CommandHeader {
    pub fn kind(&self) -> CommandKind {
        match *self {
            CommandHeader::Fill { kind, .. }
            | CommandHeader::Line { kind, .. }
            | CommandHeader::OutlineFill { kind, .. } => kind,
        }
    }

    /// Number of points, rectangles, lines or path segments.
    pub fn count(&self) -> u32 {
        match *self {
            CommandHeader::Fill { count, .. }
            | CommandHeader::Line { count, .. }
            | CommandHeader::OutlineFill { count, .. } => count,
        }
    }
}

/// An iterator of draw command headers.
///
/// Iteration ends at the end-of-document command, or after the first error.
/// Path commands are yielded, followed by `UnsupportedCommand`
/// since finding the next command requires decoding the path.
#[derive(Clone)]
pub struct Commands<'a> {
    cursor: ByteCursor<'a>,
    header: Header,
    pending_error: Option<DecodeError>,
    finished: bool,
}

impl<'a> Commands<'a> {
    pub(super) fn new(cursor: ByteCursor<'a>, header: Header) -> Self {
        Commands {
            cursor,
            header,
            pending_error: None,
            finished: false,
        }
    }

    fn read_command(&mut self) -> Result<Option<CommandHeader>, DecodeError> {
        let byte = self.cursor.read::<u8>()?;
        let index = byte & 0x3F;
        if index == 0 {
            return Ok(None);
        }
        let kind = CommandKind::from_index(index).ok_or(DecodeError::UnsupportedCommand(index))?;
        let primary_style_kind = byte >> 6;

        let command = match kind {
            CommandKind::FillPolygon | CommandKind::FillRectangles | CommandKind::FillPath => {
                let count = self.read_count()?;
                let style = self.read_style(primary_style_kind)?;
                CommandHeader::Fill { kind, count, style }
            }
            CommandKind::DrawLines
            | CommandKind::DrawLineLoop
            | CommandKind::DrawLineStrip
            | CommandKind::DrawLinePath => {
                let count = self.read_count()?;
                let style = self.read_style(primary_style_kind)?;
                let line_width = self.header.read_unit(&mut self.cursor)?;
                CommandHeader::Line {
                    kind,
                    count,
                    style,
                    line_width,
                }
            }
            CommandKind::OutlineFillPolygon | CommandKind::OutlineFillRectangles | CommandKind::OutlineFillPath => {
                let packed = self.cursor.read::<u8>()?;
                let count = u32::from(packed & 0x3F) + 1;
                let fill_style = self.read_style(primary_style_kind)?;
                let line_style = self.read_style(packed >> 6)?;
                let line_width = self.header.read_unit(&mut self.cursor)?;
                CommandHeader::OutlineFill {
                    kind,
                    count,
                    fill_style,
                    line_style,
                    line_width,
                }
            }
        };

        match kind.units_per_item() {
            Some(units) => {
                let unit_width = u64::from(self.header.coordinate_range.byte_width());
                self.cursor.skip(u64::from(command.count()) * units * unit_width)?
            }
            None => self.pending_error = Some(DecodeError::UnsupportedCommand(kind.index())),
        }
        log::trace!("TinyVG command {:?}", command);
        Ok(Some(command))
    }

    /// Counts are stored minus one.
    fn read_count(&mut self) -> Result<u32, DecodeError> {
        self.cursor
            .read_var_uint()?
            .checked_add(1)
            .ok_or(DecodeError::MalformedHeader)
    }

    fn read_style(&mut self, style_kind: u8) -> Result<Style, DecodeError> {
        match style_kind {
            0 => Ok(Style::Flat(self.cursor.read_var_uint()?)),
            1 => Ok(Style::Linear(self.read_gradient()?)),
            2 => Ok(Style::Radial(self.read_gradient()?)),
            _ => Err(DecodeError::InvalidStyle(style_kind)),
        }
    }

    fn read_gradient(&mut self) -> Result<Gradient, DecodeError> {
        let header = self.header;
        let cursor = &mut self.cursor;
        let start = point(header.read_unit(cursor)?, header.read_unit(cursor)?);
        let end = point(header.read_unit(cursor)?, header.read_unit(cursor)?);
        Ok(Gradient {
            start,
            end,
            start_color: cursor.read_var_uint()?,
            end_color: cursor.read_var_uint()?,
        })
    }
}

impl Iterator for Commands<'_> {
    type Item = Result<CommandHeader, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(error) = self.pending_error.take() {
            self.finished = true;
            return Some(Err(error));
        }
        if self.finished {
            return None;
        }
        match self.read_command() {
            Ok(Some(command)) => Some(Ok(command)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}
